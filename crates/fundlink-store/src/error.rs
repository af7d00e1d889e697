use thiserror::Error;
use uuid::Uuid;

use fundlink_types::models::{RequestStatus, Role, UserId};

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The operation needs something the store does not currently hold,
    /// usually an active session.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("connection request {id} is already {status}")]
    AlreadyResolved { id: Uuid, status: RequestStatus },

    #[error("connection request {id} is not addressed to {user_id}")]
    NotRecipient { id: Uuid, user_id: UserId },

    #[error("cannot send a connection request to yourself")]
    SelfConnection,

    #[error("a {status} connection request to {to_user_id} already exists")]
    DuplicateRequest {
        to_user_id: UserId,
        status: RequestStatus,
    },

    #[error("only {expected} sessions can {action}")]
    WrongRole {
        expected: Role,
        action: &'static str,
    },
}

impl StoreError {
    pub(crate) fn request_not_found(id: Uuid) -> Self {
        Self::NotFound {
            kind: "connection request",
            id: id.to_string(),
        }
    }

    pub(crate) fn notification_not_found(id: Uuid) -> Self {
        Self::NotFound {
            kind: "notification",
            id: id.to_string(),
        }
    }
}
