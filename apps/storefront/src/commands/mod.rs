//! # Commands Module
//!
//! Everything the frontend can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs           ◄─── You are here (shared helpers)
//! ├── cart.rs          ◄─── Cart, coupon selection, checkout
//! ├── product.rs       ◄─── Catalog listing and admin
//! ├── coupon.rs        ◄─── Coupon registry admin
//! ├── config.rs        ◄─── Configuration retrieval
//! └── notification.rs  ◄─── Toast queue
//! ```
//!
//! ## How a Mutating Command Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. let mut draft = store.begin().await   (one writer at a time)      │
//! │        ▼                                                                │
//! │  2. draft.<operation>(..)?                                              │
//! │        │  validation or rule failure → draft dropped, nothing changed   │
//! │        ▼                                                                │
//! │  3. db.collections().save_*(draft.<collection>()).await?                │
//! │        │  save failure → draft dropped, memory matches disk             │
//! │        ▼                                                                │
//! │  draft.commit()                                                         │
//! │        ▼                                                                │
//! │  4. report(): push a success notification, or the error's message       │
//! │     with its severity                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Read only
//! fn get_cart(store: &StoreState) -> CartResponse
//!
//! // Mutates and persists
//! async fn add_to_cart(db: &DbState, store: &StoreState, notices: &NotificationState, ..)
//! ```

pub mod cart;
pub mod config;
pub mod coupon;
pub mod notification;
pub mod product;

use crate::error::ApiResult;
use crate::state::{NotificationKind, NotificationState};

/// Pushes the notification for a command outcome and hands the result back.
pub(crate) fn report<T>(
    notices: &NotificationState,
    result: ApiResult<T>,
    success: impl FnOnce(&T) -> String,
) -> ApiResult<T> {
    match &result {
        Ok(value) => {
            notices.push(success(value), NotificationKind::Success);
        }
        Err(err) => {
            tracing::debug!(code = ?err.code, message = %err.message, "Command rejected");
            notices.push(err.message.clone(), err.severity);
        }
    }

    result
}

#[cfg(test)]
pub(crate) mod test_support {
    use storefront_db::{Database, DbConfig};

    use crate::state::{DbState, NotificationState, Store, StoreState};

    /// Fresh in-memory database and a store loaded from it (seed data).
    pub async fn context() -> (DbState, StoreState, NotificationState) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let stored = db.collections().load_all().await.unwrap();

        (
            DbState::new(db),
            StoreState::new(Store::from(stored)),
            NotificationState::new(),
        )
    }
}
