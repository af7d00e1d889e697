use anyhow::{Result, bail};

use fundlink_types::api::LoginRequest;
use fundlink_types::models::{Role, UserId};

const DEFAULT_EVENT_BUFFER: usize = 1024;

/// Runtime settings, read from the environment (and `.env`, loaded by main).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Role to log in as before reading the first command, if any
    pub role: Option<Role>,
    /// Directory entry to act as, e.g. `investor1`
    pub user_id: Option<UserId>,
    pub name: String,
    pub email: String,
    pub company: String,
    pub event_buffer: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let role = match lookup("FUNDLINK_ROLE").as_deref().map(str::trim) {
            None | Some("") => None,
            Some(r) if r.eq_ignore_ascii_case("startup") => Some(Role::Startup),
            Some(r) if r.eq_ignore_ascii_case("investor") => Some(Role::Investor),
            Some(other) => bail!("FUNDLINK_ROLE must be 'startup' or 'investor', got '{}'", other),
        };

        let event_buffer = match lookup("FUNDLINK_EVENT_BUFFER") {
            Some(v) => v.trim().parse()?,
            None => DEFAULT_EVENT_BUFFER,
        };

        Ok(Self {
            role,
            user_id: lookup("FUNDLINK_USER_ID")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(UserId::from),
            name: lookup("FUNDLINK_NAME").unwrap_or_default(),
            email: lookup("FUNDLINK_EMAIL").unwrap_or_default(),
            company: lookup("FUNDLINK_COMPANY").unwrap_or_default(),
            event_buffer,
        })
    }

    /// The login to issue on startup, when a role is configured.
    pub fn auto_login(&self) -> Option<LoginRequest> {
        self.role.map(|role| LoginRequest {
            role,
            user_id: self.user_id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            company: self.company.clone(),
        })
    }
}
