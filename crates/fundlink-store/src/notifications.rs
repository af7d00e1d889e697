use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use fundlink_types::models::{
    ConnectionRequest, Decision, Notification, NotificationKind, Session, UserId,
};

use crate::{Result, Store, StoreError};

/// Notification for the recipient of a freshly sent request.
pub(crate) fn request_received(request: &ConnectionRequest) -> Notification {
    Notification {
        id: Uuid::new_v4(),
        user_id: request.to_user_id.clone(),
        kind: NotificationKind::ConnectionRequest,
        title: "New Connection Request".to_string(),
        message: format!(
            "{} from {} wants to connect with you",
            request.from_user_name, request.from_user_company
        ),
        is_read: false,
        created_at: Utc::now(),
        related_request_id: Some(request.id),
    }
}

/// Notification for the original sender once the recipient answered.
pub(crate) fn request_answered(
    request: &ConnectionRequest,
    responder: &Session,
    decision: Decision,
) -> Notification {
    let title = match decision {
        Decision::Accepted => "Connection Request Accepted!",
        Decision::Rejected => "Connection Request Declined",
    };

    Notification {
        id: Uuid::new_v4(),
        user_id: request.from_user_id.clone(),
        kind: decision.notification_kind(),
        title: title.to_string(),
        message: format!(
            "{} has {} your connection request",
            responder.name,
            decision.status()
        ),
        is_read: false,
        created_at: Utc::now(),
        related_request_id: Some(request.id),
    }
}

impl Store {
    /// Mark one notification as read. Already-read notifications stay read.
    pub fn mark_notification_as_read(&mut self, notification_id: Uuid) -> Result<&Notification> {
        let notification = self
            .notifications
            .iter_mut()
            .find(|n| n.id == notification_id)
            .ok_or_else(|| StoreError::notification_not_found(notification_id))?;

        notification.is_read = true;
        Ok(&*notification)
    }

    /// Mark every notification owned by `user_id` as read.
    /// Returns how many were unread before the call.
    pub fn mark_all_notifications_as_read(&mut self, user_id: &UserId) -> usize {
        let mut flipped = 0;
        for notification in self
            .notifications
            .iter_mut()
            .filter(|n| &n.user_id == user_id && !n.is_read)
        {
            notification.is_read = true;
            flipped += 1;
        }

        debug!("Marked {} notifications read for {}", flipped, user_id);
        flipped
    }
}
