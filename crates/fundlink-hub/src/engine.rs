use tracing::debug;

use fundlink_catalog::filters::Filter;
use fundlink_catalog::{Catalog, projects, seed};
use fundlink_store::{Store, StoreError};
use fundlink_types::api::{Command, InvestorListing, Reply, StartupListing};
use fundlink_types::events::StoreEvent;
use fundlink_types::models::{Role, Session, UserId};

use crate::HubError;

/// Applies commands to the store and catalog it owns. Synchronous: the hub
/// task drives it one command at a time.
pub struct Engine {
    store: Store,
    catalog: Catalog,
}

/// What a command produced: the reply for the caller and the events to publish.
pub type Outcome = (Reply, Vec<StoreEvent>);

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Engine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            store: Store::new(),
            catalog,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    fn session(&self) -> Result<&Session, StoreError> {
        self.store
            .session()
            .ok_or(StoreError::InvalidState("no active session"))
    }

    fn current_user(&self) -> Result<UserId, StoreError> {
        self.session().map(|s| s.user_id.clone())
    }

    /// Switch the session to a directory entry so its inbox can be worked.
    /// Startups also pick up their listed project.
    fn act_as(
        &mut self,
        role: Role,
        user_id: UserId,
        email: String,
    ) -> Result<Session, HubError> {
        let recipient = self
            .catalog
            .recipient(&user_id)
            .ok_or_else(|| HubError::UnknownUser(user_id.clone()))?;
        if recipient.role != role {
            return Err(HubError::RoleMismatch {
                user_id,
                role: recipient.role,
            });
        }

        let session = self.store.resume(recipient.into_session(email)).clone();
        if let Some(project) = self.catalog.startup(&session.user_id) {
            self.store.set_project(project.clone())?;
        }
        Ok(session)
    }

    pub fn handle(&mut self, command: Command) -> Result<Outcome, HubError> {
        debug!("Handling {:?}", command);

        match command {
            Command::Login(req) => {
                let session = match req.into_parts() {
                    (role, Some(user_id), form) => self.act_as(role, user_id, form.email)?,
                    (role, None, form) => self.store.login(role, form).clone(),
                };
                let event = StoreEvent::SessionStarted {
                    user_id: session.user_id.clone(),
                    role: session.role,
                    name: session.name.clone(),
                };
                Ok((Reply::Session { session: Some(session) }, vec![event]))
            }

            Command::Logout => {
                let events = self
                    .store
                    .logout()
                    .map(|s| StoreEvent::SessionEnded { user_id: s.user_id })
                    .into_iter()
                    .collect();
                Ok((Reply::LoggedOut, events))
            }

            Command::WhoAmI => Ok((
                Reply::Session {
                    session: self.store.session().cloned(),
                },
                vec![],
            )),

            Command::CreateProject(draft) => {
                let owner = self.current_user()?;
                let project = projects::create_project(draft, &owner)?;
                let project = self.store.set_project(project)?.clone();
                Ok((Reply::Project { project }, vec![]))
            }

            Command::BrowseInvestors(filter) => {
                filter.validate()?;
                if self.store.session().is_some_and(|s| s.role == Role::Startup)
                    && self.store.project().is_none()
                {
                    return Err(StoreError::InvalidState("create a project before browsing").into());
                }
                let me = self.store.session().map(|s| &s.user_id);
                let investors = self
                    .catalog
                    .investors(&filter)
                    .into_iter()
                    .map(|investor| InvestorListing {
                        request_status: me
                            .and_then(|me| self.store.request_status(me, &investor.id)),
                        investor: investor.clone(),
                    })
                    .collect();
                Ok((Reply::Investors { investors }, vec![]))
            }

            Command::BrowseStartups(filter) => {
                filter.validate()?;
                let me = self.store.session().map(|s| &s.user_id);
                let startups = self
                    .catalog
                    .startups(&filter)
                    .into_iter()
                    .map(|startup| StartupListing {
                        request_status: me
                            .and_then(|me| self.store.request_status(me, &startup.user_id)),
                        bookmarked: self.store.is_bookmarked(&startup.id),
                        startup: startup.clone(),
                    })
                    .collect();
                Ok((Reply::Startups { startups }, vec![]))
            }

            Command::SendConnectionRequest(req) => {
                let recipient = self
                    .catalog
                    .recipient(&req.to_user_id)
                    .ok_or_else(|| HubError::UnknownUser(req.to_user_id.clone()))?;
                let delivery = self
                    .store
                    .send_connection_request(&recipient, req.message, None)?;
                let reply = Reply::RequestSent {
                    request: delivery.request.clone(),
                };
                let event = StoreEvent::RequestSent {
                    request: delivery.request,
                    notification: delivery.notification,
                };
                Ok((reply, vec![event]))
            }

            Command::RespondToRequest(req) => {
                let delivery = self
                    .store
                    .respond_to_connection_request(req.request_id, req.decision)?;
                let reply = Reply::RequestResolved {
                    request: delivery.request.clone(),
                };
                let event = StoreEvent::RequestResolved {
                    request: delivery.request,
                    notification: delivery.notification,
                };
                Ok((reply, vec![event]))
            }

            Command::GetRequest { request_id } => {
                let user_id = self.current_user()?;
                let request = self
                    .store
                    .request(request_id)
                    .filter(|r| r.from_user_id == user_id || r.to_user_id == user_id)
                    .cloned()
                    .ok_or_else(|| StoreError::NotFound {
                        kind: "connection request",
                        id: request_id.to_string(),
                    })?;
                Ok((Reply::Request { request }, vec![]))
            }

            Command::MarkNotificationRead { notification_id } => {
                let was_read = self
                    .store
                    .notification(notification_id)
                    .is_some_and(|n| n.is_read);
                let user_id = self
                    .store
                    .mark_notification_as_read(notification_id)?
                    .user_id
                    .clone();
                let events = if was_read {
                    vec![]
                } else {
                    vec![StoreEvent::NotificationRead {
                        notification_id,
                        user_id,
                    }]
                };
                Ok((Reply::NotificationRead { notification_id }, events))
            }

            Command::MarkAllNotificationsRead => {
                let user_id = self.current_user()?;
                let count = self.store.mark_all_notifications_as_read(&user_id);
                let events = if count > 0 {
                    vec![StoreEvent::NotificationsRead { user_id, count }]
                } else {
                    vec![]
                };
                Ok((Reply::NotificationsRead { count }, events))
            }

            Command::ListNotifications => {
                let user_id = self.current_user()?;
                let notifications = self
                    .store
                    .user_notifications(&user_id)
                    .into_iter()
                    .cloned()
                    .collect();
                Ok((
                    Reply::Notifications {
                        unread_count: self.store.unread_count(&user_id),
                        notifications,
                    },
                    vec![],
                ))
            }

            Command::IncomingRequests => {
                let user_id = self.current_user()?;
                let requests = self
                    .store
                    .incoming_requests(&user_id)
                    .into_iter()
                    .cloned()
                    .collect();
                Ok((Reply::Requests { requests }, vec![]))
            }

            Command::OutgoingRequests => {
                let user_id = self.current_user()?;
                let requests = self
                    .store
                    .outgoing_requests(&user_id)
                    .into_iter()
                    .cloned()
                    .collect();
                Ok((Reply::Requests { requests }, vec![]))
            }

            Command::RequestStatus { counterparty_id } => {
                let user_id = self.current_user()?;
                let status = self.store.request_status(&user_id, &counterparty_id);
                Ok((
                    Reply::RequestStatus {
                        counterparty_id,
                        status,
                    },
                    vec![],
                ))
            }

            Command::ToggleBookmark { startup_id } => {
                if !self.catalog.has_startup(&startup_id) {
                    return Err(HubError::UnknownUser(UserId::new(startup_id)));
                }
                let bookmarked = self.store.toggle_bookmark(&startup_id)?;
                Ok((
                    Reply::Bookmark {
                        startup_id,
                        bookmarked,
                    },
                    vec![],
                ))
            }

            Command::Vocabularies => {
                Ok((
                    Reply::Vocabularies {
                        startup_categories: owned(seed::STARTUP_CATEGORIES),
                        focus_areas: owned(seed::INVESTOR_FOCUS_AREAS),
                        funding_stages: owned(seed::FUNDING_STAGES),
                    },
                    vec![],
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundlink_types::api::{
        LoginRequest, ProjectDraft, RespondToRequest, SendConnectionRequest, StartupFilter,
    };
    use fundlink_types::models::{ConnectionRequest, Decision, NotificationKind, RequestStatus};

    fn login_request(role: Role, user_id: Option<&str>, name: &str) -> Command {
        Command::Login(LoginRequest {
            role,
            user_id: user_id.map(UserId::from),
            name: name.to_string(),
            email: String::new(),
            company: String::new(),
        })
    }

    fn login(engine: &mut Engine, role: Role, name: &str) -> Session {
        match engine.handle(login_request(role, None, name)).unwrap().0 {
            Reply::Session { session: Some(s) } => s,
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    fn act_as(engine: &mut Engine, role: Role, user_id: &str) -> Session {
        match engine.handle(login_request(role, Some(user_id), "")).unwrap().0 {
            Reply::Session { session: Some(s) } => s,
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    fn sent_request(outcome: Outcome) -> ConnectionRequest {
        match outcome.0 {
            Reply::RequestSent { request } => request,
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    fn send(engine: &mut Engine, to: &str) -> Result<Outcome, HubError> {
        engine.handle(Command::SendConnectionRequest(SendConnectionRequest {
            to_user_id: UserId::from(to),
            message: Some("Hi".into()),
        }))
    }

    #[test]
    fn send_resolves_recipient_from_catalog() {
        let mut engine = Engine::new(Catalog::seeded());
        login(&mut engine, Role::Startup, "Alice");

        let (reply, events) = send(&mut engine, "investor1").unwrap();
        match reply {
            Reply::RequestSent { request } => {
                assert_eq!(request.to_user_id, UserId::from("investor1"));
                assert_eq!(request.message.as_deref(), Some("Hi"));
            }
            other => panic!("unexpected reply: {:?}", other),
        }
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].recipient(), Some(&UserId::from("investor1")));
    }

    #[test]
    fn unknown_recipient_is_rejected() {
        let mut engine = Engine::new(Catalog::seeded());
        login(&mut engine, Role::Startup, "Alice");

        let err = send(&mut engine, "investor42").unwrap_err();
        assert!(matches!(err, HubError::UnknownUser(_)));
        assert!(engine.store().requests().is_empty());
    }

    #[test]
    fn listings_reflect_request_status() {
        let mut engine = Engine::new(Catalog::seeded());
        act_as(&mut engine, Role::Startup, "startup1");
        send(&mut engine, "investor3").unwrap();

        let (reply, _) = engine
            .handle(Command::BrowseInvestors(Default::default()))
            .unwrap();
        let Reply::Investors { investors } = reply else {
            panic!("expected investors");
        };
        let statuses: Vec<Option<RequestStatus>> =
            investors.iter().map(|l| l.request_status).collect();
        assert_eq!(statuses, [None, None, Some(RequestStatus::Pending), None]);
    }

    #[test]
    fn resolving_publishes_notification_for_sender() {
        let mut engine = Engine::new(Catalog::seeded());
        let alice = login(&mut engine, Role::Startup, "Alice");
        let request = sent_request(send(&mut engine, "investor2").unwrap());

        act_as(&mut engine, Role::Investor, "investor2");
        let (_, events) = engine
            .handle(Command::RespondToRequest(RespondToRequest {
                request_id: request.id,
                decision: Decision::Accepted,
            }))
            .unwrap();

        match &events[..] {
            [StoreEvent::RequestResolved { request, notification }] => {
                assert_eq!(request.status, RequestStatus::Accepted);
                assert_eq!(notification.user_id, alice.user_id);
                assert_eq!(notification.kind, NotificationKind::RequestAccepted);
            }
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn mark_all_without_unread_publishes_nothing() {
        let mut engine = Engine::new(Catalog::seeded());
        login(&mut engine, Role::Investor, "Ivy");

        let (reply, events) = engine.handle(Command::MarkAllNotificationsRead).unwrap();
        assert!(matches!(reply, Reply::NotificationsRead { count: 0 }));
        assert!(events.is_empty());
    }

    #[test]
    fn queries_need_a_session() {
        let mut engine = Engine::new(Catalog::seeded());
        for cmd in [
            Command::ListNotifications,
            Command::IncomingRequests,
            Command::OutgoingRequests,
            Command::MarkAllNotificationsRead,
        ] {
            let err = engine.handle(cmd).unwrap_err();
            assert!(matches!(err, HubError::Store(StoreError::InvalidState(_))));
        }
    }

    #[test]
    fn invalid_project_reports_fields() {
        let mut engine = Engine::new(Catalog::seeded());
        login(&mut engine, Role::Startup, "Alice");

        let err = engine
            .handle(Command::CreateProject(Default::default()))
            .unwrap_err();
        let HubError::Project(errors) = err else {
            panic!("expected project errors");
        };
        assert!(errors.fields.contains_key("idea"));
        assert!(engine.store().project().is_none());
    }

    #[test]
    fn bookmark_only_known_startups() {
        let mut engine = Engine::new(Catalog::seeded());
        login(&mut engine, Role::Investor, "Ivy");

        let err = engine
            .handle(Command::ToggleBookmark {
                startup_id: "startup9".into(),
            })
            .unwrap_err();
        assert!(matches!(err, HubError::UnknownUser(_)));

        let (reply, _) = engine
            .handle(Command::ToggleBookmark {
                startup_id: "startup2".into(),
            })
            .unwrap();
        assert!(matches!(reply, Reply::Bookmark { bookmarked: true, .. }));

        let (reply, _) = engine
            .handle(Command::BrowseStartups(Default::default()))
            .unwrap();
        let Reply::Startups { startups } = reply else {
            panic!("expected startups");
        };
        let bookmarked: Vec<&str> = startups
            .iter()
            .filter(|l| l.bookmarked)
            .map(|l| l.startup.id.as_str())
            .collect();
        assert_eq!(bookmarked, ["startup2"]);
    }

    #[test]
    fn logout_emits_session_ended_once() {
        let mut engine = Engine::new(Catalog::seeded());
        login(&mut engine, Role::Investor, "Ivy");

        let (_, events) = engine.handle(Command::Logout).unwrap();
        assert!(matches!(events.as_slice(), [StoreEvent::SessionEnded { .. }]));

        let (_, events) = engine.handle(Command::Logout).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn login_can_take_over_a_directory_entry() {
        let mut engine = Engine::new(Catalog::seeded());

        let sarah = act_as(&mut engine, Role::Investor, "investor1");
        assert_eq!(sarah.user_id, UserId::from("investor1"));
        assert_eq!(sarah.name, "Sarah Chen");
        assert_eq!(sarah.company, "TechVentures Capital");

        let medassist = act_as(&mut engine, Role::Startup, "startup1");
        assert_eq!(medassist.role, Role::Startup);
        let project = engine.store().project().unwrap();
        assert_eq!(project.id, "startup1");

        let err = engine
            .handle(login_request(Role::Startup, Some("investor2"), ""))
            .unwrap_err();
        assert!(matches!(err, HubError::RoleMismatch { role: Role::Investor, .. }));

        let err = engine
            .handle(login_request(Role::Investor, Some("investor9"), ""))
            .unwrap_err();
        assert!(matches!(err, HubError::UnknownUser(_)));
        // failed takeovers keep the previous actor
        assert_eq!(engine.store().session().unwrap().user_id, medassist.user_id);
    }

    #[test]
    fn only_the_addressee_can_answer() {
        let mut engine = Engine::new(Catalog::seeded());
        login(&mut engine, Role::Startup, "Alice");
        let request = sent_request(send(&mut engine, "investor1").unwrap());

        let respond = |decision| {
            Command::RespondToRequest(RespondToRequest {
                request_id: request.id,
                decision,
            })
        };

        let err = engine.handle(respond(Decision::Accepted)).unwrap_err();
        assert!(matches!(err, HubError::Store(StoreError::NotRecipient { .. })));

        act_as(&mut engine, Role::Investor, "investor2");
        assert!(engine.handle(respond(Decision::Accepted)).is_err());

        act_as(&mut engine, Role::Investor, "investor1");
        let (reply, _) = engine.handle(respond(Decision::Rejected)).unwrap();
        assert!(matches!(
            reply,
            Reply::RequestResolved { request } if request.status == RequestStatus::Rejected
        ));
    }

    #[test]
    fn get_request_is_visible_to_both_parties_only() {
        let mut engine = Engine::new(Catalog::seeded());
        login(&mut engine, Role::Startup, "Alice");
        let request = sent_request(send(&mut engine, "investor4").unwrap());
        let get = || Command::GetRequest {
            request_id: request.id,
        };

        let (reply, _) = engine.handle(get()).unwrap();
        assert!(matches!(reply, Reply::Request { request: r } if r.id == request.id));

        act_as(&mut engine, Role::Investor, "investor4");
        let (reply, _) = engine.handle(Command::ListNotifications).unwrap();
        let Reply::Notifications { notifications, .. } = reply else {
            panic!("expected notifications");
        };
        let related = notifications[0].related_request_id.unwrap();
        let (reply, _) = engine
            .handle(Command::GetRequest {
                request_id: related,
            })
            .unwrap();
        assert!(matches!(reply, Reply::Request { request: r } if r.id == request.id));

        act_as(&mut engine, Role::Investor, "investor3");
        let err = engine.handle(get()).unwrap_err();
        assert!(matches!(err, HubError::Store(StoreError::NotFound { .. })));
    }

    #[test]
    fn marking_read_twice_publishes_once() {
        let mut engine = Engine::new(Catalog::seeded());
        login(&mut engine, Role::Startup, "Alice");
        send(&mut engine, "investor1").unwrap();
        act_as(&mut engine, Role::Investor, "investor1");
        let notification_id = engine.store().notifications()[0].id;

        let mark = || Command::MarkNotificationRead { notification_id };
        let (_, events) = engine.handle(mark()).unwrap();
        assert!(matches!(events.as_slice(), [StoreEvent::NotificationRead { .. }]));

        let (reply, events) = engine.handle(mark()).unwrap();
        assert!(matches!(reply, Reply::NotificationRead { .. }));
        assert!(events.is_empty());
    }

    #[test]
    fn startups_browse_investors_after_creating_a_project() {
        let mut engine = Engine::new(Catalog::seeded());
        login(&mut engine, Role::Startup, "Alice");

        let err = engine
            .handle(Command::BrowseInvestors(Default::default()))
            .unwrap_err();
        assert!(matches!(err, HubError::Store(StoreError::InvalidState(_))));

        engine
            .handle(Command::CreateProject(ProjectDraft {
                name: "Orbit".into(),
                idea: "Satellite data".into(),
                implementation: "Direct sales".into(),
                target_audience: "Farmers".into(),
                problem_solution: "Cheaper forecasts".into(),
                category: "AgriTech".into(),
            }))
            .unwrap();
        let (reply, _) = engine
            .handle(Command::BrowseInvestors(Default::default()))
            .unwrap();
        assert!(matches!(reply, Reply::Investors { investors } if investors.len() == 4));
    }

    #[test]
    fn filters_are_checked_against_vocabularies() {
        let mut engine = Engine::new(Catalog::seeded());
        login(&mut engine, Role::Investor, "Ivy");

        let err = engine
            .handle(Command::BrowseStartups(StartupFilter {
                categories: vec!["Gaming".into()],
                ..Default::default()
            }))
            .unwrap_err();
        assert_eq!(err.to_string(), "unknown category: Gaming");

        let (reply, _) = engine.handle(Command::Vocabularies).unwrap();
        let Reply::Vocabularies {
            startup_categories,
            focus_areas,
            funding_stages,
        } = reply
        else {
            panic!("expected vocabularies");
        };
        assert_eq!(startup_categories.len(), 14);
        assert!(focus_areas.iter().any(|a| a == "Machine Learning"));
        assert_eq!(funding_stages.first().map(String::as_str), Some("Pre-seed"));
    }
}
