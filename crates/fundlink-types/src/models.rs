use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of the marketplace an actor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Startup,
    Investor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Startup => "startup",
            Self::Investor => "investor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque user identifier. Catalog entries carry fixed ids (`investor1`),
/// sessions get a freshly generated one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The logged-in actor. Lives only between login and logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub role: Role,
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub company: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Accepted,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        })
    }
}

/// A recipient's answer to a pending connection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Accepted,
    Rejected,
}

impl Decision {
    pub fn status(&self) -> RequestStatus {
        match self {
            Self::Accepted => RequestStatus::Accepted,
            Self::Rejected => RequestStatus::Rejected,
        }
    }

    pub fn notification_kind(&self) -> NotificationKind {
        match self {
            Self::Accepted => NotificationKind::RequestAccepted,
            Self::Rejected => NotificationKind::RequestRejected,
        }
    }
}

/// A directed proposal to connect, from the session owner to a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    pub id: Uuid,
    pub from_user_id: UserId,
    pub to_user_id: UserId,
    pub from_user_name: String,
    pub from_user_company: String,
    pub from_user_role: Role,
    pub status: RequestStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Only ever set when the sender is a startup.
    pub project_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ConnectionRequest,
    RequestAccepted,
    RequestRejected,
}

/// A per-user event record. `related_request_id` is a plain id, resolve it
/// through the store; the notification outlives whatever it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
    pub related_request_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupProject {
    pub id: String,
    pub name: String,
    pub idea: String,
    pub implementation: String,
    pub target_audience: String,
    pub problem_solution: String,
    pub category: String,
    pub user_id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investor {
    pub id: UserId,
    pub name: String,
    pub company: String,
    pub focus_areas: Vec<String>,
    pub funding_stages: Vec<String>,
    pub description: String,
    pub location: String,
}

/// Addressing details for the target of a connection request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub user_id: UserId,
    pub name: String,
    pub company: String,
    pub role: Role,
}

impl Recipient {
    /// A session acting as this directory identity.
    pub fn into_session(self, email: String) -> Session {
        Session {
            role: self.role,
            user_id: self.user_id,
            name: self.name,
            email,
            company: self.company,
        }
    }
}

impl From<&Investor> for Recipient {
    fn from(investor: &Investor) -> Self {
        Self {
            user_id: investor.id.clone(),
            name: investor.name.clone(),
            company: investor.company.clone(),
            role: Role::Investor,
        }
    }
}

impl From<&StartupProject> for Recipient {
    fn from(project: &StartupProject) -> Self {
        Self {
            user_id: project.user_id.clone(),
            name: project.name.clone(),
            company: format!("{} (Startup)", project.name),
            role: Role::Startup,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_maps_to_terminal_status() {
        assert_eq!(Decision::Accepted.status(), RequestStatus::Accepted);
        assert_eq!(Decision::Rejected.status(), RequestStatus::Rejected);
        assert!(Decision::Rejected.status().is_terminal());
        assert!(!RequestStatus::Pending.is_terminal());
    }

    #[test]
    fn startup_recipient_company_is_tagged() {
        let project = StartupProject {
            id: "startup3".into(),
            name: "LearnPath".into(),
            idea: String::new(),
            implementation: String::new(),
            target_audience: String::new(),
            problem_solution: String::new(),
            category: "EdTech".into(),
            user_id: "startup3".into(),
        };

        let recipient = Recipient::from(&project);
        assert_eq!(recipient.company, "LearnPath (Startup)");
        assert_eq!(recipient.role, Role::Startup);
        assert_eq!(recipient.user_id.as_str(), "startup3");

        let session = recipient.into_session("team@learnpath.io".into());
        assert_eq!(session.user_id.as_str(), "startup3");
        assert_eq!(session.role, Role::Startup);
        assert_eq!(session.email, "team@learnpath.io");
    }

    #[test]
    fn wire_names_are_snake_case() {
        let json = serde_json::to_string(&NotificationKind::RequestAccepted).unwrap();
        assert_eq!(json, "\"request_accepted\"");

        let id: UserId = serde_json::from_str("\"investor2\"").unwrap();
        assert_eq!(id, UserId::from("investor2"));
    }
}
