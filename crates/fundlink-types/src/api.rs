use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    ConnectionRequest, Decision, Investor, Notification, RequestStatus, Role, Session,
    StartupProject, UserId,
};

// -- Session --

/// Mock login form. Blank fields are filled with per-role defaults.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub name: String,
    pub email: String,
    pub company: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub role: Role,
    /// Act as this directory entry instead of a freshly minted user
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub company: String,
}

impl LoginRequest {
    pub fn into_parts(self) -> (Role, Option<UserId>, LoginForm) {
        let form = LoginForm {
            name: self.name,
            email: self.email,
            company: self.company,
        };
        (self.role, self.user_id, form)
    }
}

// -- Projects --

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub idea: String,
    #[serde(default)]
    pub implementation: String,
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub problem_solution: String,
    #[serde(default)]
    pub category: String,
}

// -- Browsing --

/// Filters a startup applies to the investor catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvestorFilter {
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub funding_stages: Vec<String>,
    #[serde(default)]
    pub location: String,
}

/// Filters an investor applies to the startup catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StartupFilter {
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub query: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InvestorListing {
    pub investor: Investor,
    pub request_status: Option<RequestStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartupListing {
    pub startup: StartupProject,
    pub request_status: Option<RequestStatus>,
    pub bookmarked: bool,
}

// -- Connection requests --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendConnectionRequest {
    pub to_user_id: UserId,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RespondToRequest {
    pub request_id: Uuid,
    pub decision: Decision,
}

// -- Envelopes --

/// Commands sent into the hub, one per console line.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Command {
    Login(LoginRequest),
    Logout,
    WhoAmI,
    CreateProject(ProjectDraft),
    BrowseInvestors(InvestorFilter),
    BrowseStartups(StartupFilter),
    SendConnectionRequest(SendConnectionRequest),
    RespondToRequest(RespondToRequest),
    GetRequest { request_id: Uuid },
    MarkNotificationRead { notification_id: Uuid },
    MarkAllNotificationsRead,
    ListNotifications,
    IncomingRequests,
    OutgoingRequests,
    RequestStatus { counterparty_id: UserId },
    ToggleBookmark { startup_id: String },
    Vocabularies,
}

/// Replies returned by the hub for each command.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum Reply {
    Session { session: Option<Session> },
    LoggedOut,
    Project { project: StartupProject },
    Investors { investors: Vec<InvestorListing> },
    Startups { startups: Vec<StartupListing> },
    RequestSent { request: ConnectionRequest },
    RequestResolved { request: ConnectionRequest },
    Request { request: ConnectionRequest },
    NotificationRead { notification_id: Uuid },
    NotificationsRead { count: usize },
    Notifications {
        unread_count: usize,
        notifications: Vec<Notification>,
    },
    Requests { requests: Vec<ConnectionRequest> },
    RequestStatus {
        counterparty_id: UserId,
        status: Option<RequestStatus>,
    },
    Bookmark { startup_id: String, bookmarked: bool },
    Vocabularies {
        startup_categories: Vec<String>,
        focus_areas: Vec<String>,
        funding_stages: Vec<String>,
    },
    Error { message: String },
}
