//! User notifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use brightbuy_core::{NotificationId, NotificationKind, UserId};

/// A message shown in a user's notification list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    /// Recipient.
    pub user_id: UserId,
    pub title: String,
    pub message: String,
    /// Category, serialized as `type`.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Set once the user has seen it; never cleared.
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Number of notifications not yet read, as shown on the bell badge.
#[must_use]
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}
