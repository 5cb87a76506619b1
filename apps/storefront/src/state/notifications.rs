//! # Notification State
//!
//! The toast queue. Commands push one notification per mutation; the
//! frontend renders `snapshot()` and calls `dismiss` when a toast closes.
//! Timed auto-dismiss is left to the frontend. Past [`MAX_NOTIFICATIONS`]
//! the oldest toast is dropped, so a frontend that never dismisses (the CLI)
//! holds a bounded queue.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Toasts kept before the oldest is evicted.
pub const MAX_NOTIFICATIONS: usize = 20;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
}

/// One toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub kind: NotificationKind,
}

/// Shared, ordered notification queue (oldest first).
#[derive(Debug, Clone, Default)]
pub struct NotificationState {
    items: Arc<Mutex<VecDeque<Notification>>>,
}

impl NotificationState {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notification and returns its id, evicting the oldest
    /// when the queue is full.
    pub fn push(&self, message: impl Into<String>, kind: NotificationKind) -> String {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            message: message.into(),
            kind,
        };
        let id = notification.id.clone();

        let mut items = self.lock();
        if items.len() >= MAX_NOTIFICATIONS {
            items.pop_front();
        }
        items.push_back(notification);
        id
    }

    /// Removes a notification. Returns false if it was already gone.
    pub fn dismiss(&self, id: &str) -> bool {
        let mut items = self.lock();
        let before = items.len();
        items.retain(|n| n.id != id);
        items.len() != before
    }

    /// Current notifications, oldest first.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().iter().cloned().collect()
    }

    /// The most recent notification, if any.
    pub fn latest(&self) -> Option<Notification> {
        self.lock().back().cloned()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Notification>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let notices = NotificationState::new();

        let first = notices.push("Coupon applied", NotificationKind::Success);
        let second = notices.push("Coupon code 'X' already exists", NotificationKind::Warning);

        let all = notices.snapshot();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first);
        assert_eq!(all[1].kind, NotificationKind::Warning);

        assert!(notices.dismiss(&first));
        assert!(!notices.dismiss(&first));
        assert_eq!(notices.latest().map(|n| n.id), Some(second));
    }

    #[test]
    fn test_queue_evicts_oldest_when_full() {
        let notices = NotificationState::new();

        let first = notices.push("toast 0", NotificationKind::Success);
        for i in 1..=MAX_NOTIFICATIONS {
            notices.push(format!("toast {}", i), NotificationKind::Success);
        }

        let all = notices.snapshot();
        assert_eq!(all.len(), MAX_NOTIFICATIONS);
        assert_eq!(all[0].message, "toast 1");
        assert!(!notices.dismiss(&first));
        assert_eq!(notices.latest().unwrap().message, format!("toast {}", MAX_NOTIFICATIONS));
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_value(NotificationKind::Warning).unwrap();
        assert_eq!(json, "warning");
    }
}
