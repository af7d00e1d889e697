use tracing::{debug, info};

use fundlink_types::api::LoginForm;
use fundlink_types::models::{Role, Session, StartupProject, UserId};

use crate::{Result, Store, StoreError};

impl Store {
    // -- Session --

    /// Fabricate a session from the mock login form. Logging in while another
    /// session is active switches the actor: requests and notifications stay,
    /// the previous actor's project and bookmarks do not.
    pub fn login(&mut self, role: Role, form: LoginForm) -> &Session {
        let (default_name, default_company) = match role {
            Role::Startup => ("John Founder", "My Startup"),
            Role::Investor => ("Jane Investor", "Investment Firm"),
        };

        let session = Session {
            role,
            user_id: UserId::generate(),
            name: non_blank(form.name).unwrap_or_else(|| default_name.to_string()),
            email: form.email.trim().to_string(),
            company: non_blank(form.company).unwrap_or_else(|| default_company.to_string()),
        };

        if let Some(previous) = &self.session {
            debug!("Switching session from {} to {}", previous.user_id, session.user_id);
        }
        info!("{} ({}) logged in as {}", session.name, session.user_id, role);

        self.project = None;
        self.bookmarks.clear();
        self.session.insert(session)
    }

    /// Make a known identity the active actor again, keeping every collection.
    pub fn resume(&mut self, session: Session) -> &Session {
        debug!("Resuming session for {}", session.user_id);
        self.project = None;
        self.bookmarks.clear();
        self.session.insert(session)
    }

    /// Drop the session and every collection it accumulated.
    pub fn logout(&mut self) -> Option<Session> {
        let session = self.session.take();
        if let Some(s) = &session {
            info!(
                "{} logged out, discarding {} requests and {} notifications",
                s.user_id,
                self.requests.len(),
                self.notifications.len()
            );
        }

        self.requests.clear();
        self.notifications.clear();
        self.project = None;
        self.bookmarks.clear();
        session
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    // -- Project --

    pub fn set_project(&mut self, project: StartupProject) -> Result<&StartupProject> {
        let session = self.require_session()?;
        if session.role != Role::Startup {
            return Err(StoreError::WrongRole {
                expected: Role::Startup,
                action: "create a project",
            });
        }

        info!("{} created project '{}'", session.user_id, project.name);
        Ok(&*self.project.insert(project))
    }

    pub fn project(&self) -> Option<&StartupProject> {
        self.project.as_ref()
    }

    // -- Bookmarks --

    /// Toggle a bookmark on a startup. Returns whether it is bookmarked now.
    pub fn toggle_bookmark(&mut self, startup_id: &str) -> Result<bool> {
        let session = self.require_session()?;
        if session.role != Role::Investor {
            return Err(StoreError::WrongRole {
                expected: Role::Investor,
                action: "bookmark startups",
            });
        }

        if let Some(pos) = self.bookmarks.iter().position(|id| id == startup_id) {
            self.bookmarks.remove(pos);
            Ok(false)
        } else {
            self.bookmarks.push(startup_id.to_string());
            Ok(true)
        }
    }

    pub fn bookmarks(&self) -> &[String] {
        &self.bookmarks
    }

    pub fn is_bookmarked(&self, startup_id: &str) -> bool {
        self.bookmarks.iter().any(|id| id == startup_id)
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
