//! Local view of server-side notifications.
//!
//! The unread count is sourced from the server response rather than
//! recomputed from the list: the list is a truncated page while the count
//! is global.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Category of a notification, matching the server's wire values.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    Order,
    Inventory,
    Chat,
    System,
}

/// Reference to the entity a notification is about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedEntity {
    pub entity_type: String,
    pub entity_id: String,
}

/// One notification record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub related: Option<RelatedEntity>,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// Response of `GET /notifications?limit&offset`.
///
/// `notifications` is most-recent-first; `unread_count` is the global
/// count, independent of the page window.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NotificationPage {
    pub notifications: Vec<Notification>,
    pub unread_count: u32,
}
