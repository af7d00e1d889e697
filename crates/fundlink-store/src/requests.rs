use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use fundlink_types::models::{ConnectionRequest, Decision, Recipient, RequestStatus, Role};

use crate::notifications::{request_answered, request_received};
use crate::{Delivery, Result, Store, StoreError};

impl Store {
    /// Send a connection request from the session owner to `to`.
    ///
    /// The request and the recipient's notification are appended together;
    /// every check runs before either collection is touched.
    pub fn send_connection_request(
        &mut self,
        to: &Recipient,
        message: Option<String>,
        project_name: Option<String>,
    ) -> Result<Delivery> {
        let sender = self.require_session()?;

        if sender.user_id == to.user_id {
            return Err(StoreError::SelfConnection);
        }

        // At most one live request per directed pair; a rejected one may be retried.
        if let Some(existing) = self.requests.iter().find(|r| {
            r.from_user_id == sender.user_id
                && r.to_user_id == to.user_id
                && r.status != RequestStatus::Rejected
        }) {
            return Err(StoreError::DuplicateRequest {
                to_user_id: to.user_id.clone(),
                status: existing.status,
            });
        }

        let project_name = match sender.role {
            Role::Startup => project_name.or_else(|| self.project.as_ref().map(|p| p.name.clone())),
            Role::Investor => {
                if project_name.is_some() {
                    debug!("Ignoring project name on request from investor {}", sender.user_id);
                }
                None
            }
        };

        let request = ConnectionRequest {
            id: Uuid::new_v4(),
            from_user_id: sender.user_id.clone(),
            to_user_id: to.user_id.clone(),
            from_user_name: sender.name.clone(),
            from_user_company: sender.company.clone(),
            from_user_role: sender.role,
            status: RequestStatus::Pending,
            message: message.filter(|m| !m.trim().is_empty()),
            created_at: Utc::now(),
            project_name,
        };
        let notification = request_received(&request);

        info!(
            "{} sent connection request {} to {} ({}, {})",
            request.from_user_id, request.id, to.user_id, to.name, to.role
        );

        self.requests.push(request.clone());
        self.notifications.push(notification.clone());

        Ok(Delivery {
            request,
            notification,
        })
    }

    /// Accept or reject a pending request addressed to the session owner.
    /// The original sender is notified.
    ///
    /// Unknown ids, requests addressed to someone else and already-resolved
    /// requests leave both collections untouched.
    pub fn respond_to_connection_request(
        &mut self,
        request_id: Uuid,
        decision: Decision,
    ) -> Result<Delivery> {
        let responder = self.require_session()?.clone();

        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == request_id)
            .ok_or_else(|| StoreError::request_not_found(request_id))?;

        if request.to_user_id != responder.user_id {
            warn!(
                "{} tried to answer request {} addressed to {}",
                responder.user_id, request_id, request.to_user_id
            );
            return Err(StoreError::NotRecipient {
                id: request_id,
                user_id: responder.user_id,
            });
        }

        if request.status.is_terminal() {
            warn!(
                "{} tried to answer request {} which is already {}",
                responder.user_id, request_id, request.status
            );
            return Err(StoreError::AlreadyResolved {
                id: request_id,
                status: request.status,
            });
        }

        request.status = decision.status();
        let request = request.clone();
        let notification = request_answered(&request, &responder, decision);

        info!("{} {} connection request {}", responder.user_id, request.status, request_id);

        self.notifications.push(notification.clone());

        Ok(Delivery {
            request,
            notification,
        })
    }
}
