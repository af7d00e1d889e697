use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ConnectionRequest, Notification, Role, UserId};

/// Events published by the hub after a command changed store state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum StoreEvent {
    /// A mock login created (or switched to) a session
    SessionStarted { user_id: UserId, role: Role, name: String },

    /// Logout dropped the session and every live collection
    SessionEnded { user_id: UserId },

    /// A connection request was created along with the recipient's notification
    RequestSent {
        request: ConnectionRequest,
        notification: Notification,
    },

    /// A pending request was accepted or rejected; the notification goes to the sender
    RequestResolved {
        request: ConnectionRequest,
        notification: Notification,
    },

    /// A single notification was marked as read
    NotificationRead { notification_id: Uuid, user_id: UserId },

    /// Every notification of a user was marked as read
    NotificationsRead { user_id: UserId, count: usize },
}

impl StoreEvent {
    /// Returns the user this event should be surfaced to, if it is addressed.
    /// Session lifecycle events return `None`.
    pub fn recipient(&self) -> Option<&UserId> {
        match self {
            Self::RequestSent { notification, .. } => Some(&notification.user_id),
            Self::RequestResolved { notification, .. } => Some(&notification.user_id),
            Self::NotificationRead { user_id, .. } => Some(user_id),
            Self::NotificationsRead { user_id, .. } => Some(user_id),
            _ => None,
        }
    }
}
