//! # State Module
//!
//! Application state for the storefront, split into focused types the
//! way commands consume them.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐  │
//! │  │   DbState    │  │  StoreState  │  │ ConfigState  │  │Notification │  │
//! │  │              │  │              │  │              │  │   State     │  │
//! │  │  Database    │  │  Arc<Mutex<  │  │  db path     │  │ Arc<Mutex<  │  │
//! │  │  (SQLite     │  │    Store     │  │  view mode   │  │  Vec<..>>>  │  │
//! │  │   pool)      │  │  >>          │  │  currency    │  │             │  │
//! │  └──────────────┘  └──────────────┘  └──────────────┘  └─────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • DbState: Database has internal connection pool (thread-safe)         │
//! │  • StoreState: single writer through Arc<Mutex<Store>>                  │
//! │  • ConfigState: Read-only after initialization                          │
//! │  • NotificationState: Arc<Mutex<..>>, append/dismiss only               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod notifications;
mod store;

pub use config::ConfigState;
pub use db::DbState;
pub use notifications::{Notification, NotificationKind, NotificationState};
pub use store::{Store, StoreDraft, StoreState};
