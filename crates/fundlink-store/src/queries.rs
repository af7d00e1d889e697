use uuid::Uuid;

use fundlink_types::models::{ConnectionRequest, Notification, RequestStatus, UserId};

use crate::Store;

// Read projections. Nothing here is cached; every call walks the live collections.
impl Store {
    // -- Notifications --

    pub fn user_notifications(&self, user_id: &UserId) -> Vec<&Notification> {
        self.notifications
            .iter()
            .filter(|n| &n.user_id == user_id)
            .collect()
    }

    pub fn unread_count(&self, user_id: &UserId) -> usize {
        self.notifications
            .iter()
            .filter(|n| &n.user_id == user_id && !n.is_read)
            .count()
    }

    pub fn notification(&self, id: Uuid) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    // -- Connection requests --

    /// Pending requests addressed to `user_id`.
    pub fn incoming_requests(&self, user_id: &UserId) -> Vec<&ConnectionRequest> {
        self.requests
            .iter()
            .filter(|r| &r.to_user_id == user_id && r.status == RequestStatus::Pending)
            .collect()
    }

    /// Every request `user_id` sent, whatever its status.
    pub fn outgoing_requests(&self, user_id: &UserId) -> Vec<&ConnectionRequest> {
        self.requests
            .iter()
            .filter(|r| &r.from_user_id == user_id)
            .collect()
    }

    /// Status of the latest request `from` sent to `counterparty`.
    pub fn request_status(&self, from: &UserId, counterparty: &UserId) -> Option<RequestStatus> {
        self.requests
            .iter()
            .rev()
            .find(|r| &r.from_user_id == from && &r.to_user_id == counterparty)
            .map(|r| r.status)
    }

    pub fn request(&self, id: Uuid) -> Option<&ConnectionRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    pub fn requests(&self) -> &[ConnectionRequest] {
        &self.requests
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }
}
