//! # Notification Commands
//!
//! Read and dismiss the toast queue.

use tracing::debug;

use crate::state::{Notification, NotificationState};

/// Current notifications, oldest first.
pub fn get_notifications(notices: &NotificationState) -> Vec<Notification> {
    notices.snapshot()
}

/// Dismisses a notification. Returns false if it was already gone.
pub fn dismiss_notification(notices: &NotificationState, id: &str) -> bool {
    debug!(id = %id, "dismiss_notification command");
    notices.dismiss(id)
}
