pub mod error;
pub mod notifications;
pub mod queries;
pub mod requests;
pub mod session;

pub use error::{Result, StoreError};

use fundlink_types::models::{ConnectionRequest, Notification, Session, StartupProject};

/// A request together with the notification its creation or resolution emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub request: ConnectionRequest,
    pub notification: Notification,
}

/// Sole owner of the live session state: the active actor, every connection
/// request and every notification. Nothing here survives a logout.
#[derive(Debug, Default)]
pub struct Store {
    session: Option<Session>,
    requests: Vec<ConnectionRequest>,
    notifications: Vec<Notification>,
    project: Option<StartupProject>,
    bookmarks: Vec<String>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn require_session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or(StoreError::InvalidState("no active session"))
    }
}
