//! Notifications and their mutation rules.

use std::{
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Unique token identifying a notification within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(String);

impl NotificationId {
    /// Creates an id from a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        NotificationId(token.into())
    }

    /// The counter behind a sequence-issued id, `None` for any other token.
    fn counter(&self) -> Option<u64> {
        self.0.strip_prefix("ntf-")?.parse().ok()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How prominently a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Neutral information.
    Info,
    /// A completed or positive event.
    Success,
    /// Something needing attention soon.
    Warning,
    /// Something that went wrong.
    Error,
}

/// A user-facing notification. Newest notifications sit at the front of the
/// state's sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// Unique id within the session.
    pub id: NotificationId,

    /// Short headline.
    pub title: String,

    /// Body text.
    pub message: String,

    /// Presentation severity.
    pub severity: Severity,

    /// Whether the user has opened this notification. One-way: once read,
    /// never unread.
    pub is_read: bool,

    /// When the notification was created.
    pub created_at: Timestamp,

    /// Optional deep-link the notification points at, e.g. `/orders`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_ref: Option<String>,
}

/// Issues session-unique notification ids from a monotonic counter.
///
/// Wall-clock ids collide under rapid-fire creation within one tick, so the
/// counter is the id and the clock stays a separate `created_at` field.
#[derive(Debug, Default)]
pub struct NotificationSequence {
    next: AtomicU64,
}

impl NotificationSequence {
    /// Creates a sequence starting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a sequence that resumes past any counter-issued ids already
    /// present, so a restored session never reissues an id a previous
    /// session handed out. Ids from other origins are ignored.
    #[must_use]
    pub fn resuming_after(notifications: &[Notification]) -> Self {
        let highest = notifications
            .iter()
            .filter_map(|notification| notification.id.counter())
            .max()
            .unwrap_or(0);

        NotificationSequence {
            next: AtomicU64::new(highest),
        }
    }

    /// Issues the next id.
    pub fn next_id(&self) -> NotificationId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        NotificationId(format!("ntf-{n}"))
    }
}

/// Prepend a notification, keeping the sequence newest-first.
pub(crate) fn prepend(mut notifications: Vec<Notification>, notification: Notification) -> Vec<Notification> {
    notifications.insert(0, notification);
    notifications
}

/// Mark the matching notification as read. No-op when the id is unknown or
/// the notification was already read.
pub(crate) fn mark_read(mut notifications: Vec<Notification>, id: &NotificationId) -> Vec<Notification> {
    for notification in &mut notifications {
        if notification.id == *id {
            notification.is_read = true;
        }
    }

    notifications
}
