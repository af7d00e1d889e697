use thiserror::Error;

use fundlink_catalog::filters::FilterError;
use fundlink_catalog::projects::ProjectErrors;
use fundlink_store::StoreError;
use fundlink_types::models::{Role, UserId};

#[derive(Debug, Error)]
pub enum HubError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Project(#[from] ProjectErrors),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("unknown catalog user: {0}")]
    UnknownUser(UserId),

    #[error("catalog user {user_id} is a {role}")]
    RoleMismatch { user_id: UserId, role: Role },

    #[error("hub is no longer running")]
    Closed,
}
