use chrono::{DateTime, Utc};
use serde::Serialize;

use fundlink_types::api::Reply;
use fundlink_types::models::Notification;

#[derive(Serialize)]
struct NotificationView<'a> {
    #[serde(flatten)]
    notification: &'a Notification,
    age: String,
}

#[derive(Serialize)]
#[serde(tag = "type", content = "data")]
enum Rendered<'a> {
    Notifications {
        unread_count: usize,
        badge: Option<String>,
        notifications: Vec<NotificationView<'a>>,
    },
}

/// Serialize a reply as one JSON line. Notification lists get a relative
/// age per entry and the unread badge text.
pub fn render(reply: &Reply, now: DateTime<Utc>) -> serde_json::Result<String> {
    match reply {
        Reply::Notifications {
            unread_count,
            notifications,
        } => serde_json::to_string(&Rendered::Notifications {
            unread_count: *unread_count,
            badge: badge(*unread_count),
            notifications: notifications
                .iter()
                .map(|n| NotificationView {
                    notification: n,
                    age: time_ago(n.created_at, now),
                })
                .collect(),
        }),
        other => serde_json::to_string(other),
    }
}

pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - at).num_minutes();
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / 1440)
    }
}

pub fn badge(unread: usize) -> Option<String> {
    match unread {
        0 => None,
        1..=9 => Some(unread.to_string()),
        _ => Some("9+".to_string()),
    }
}
