//! # Storefront Application Library
//!
//! Wires the pricing core and the durable store into one explicitly owned
//! application handle.
//!
//! ## Module Organization
//! ```text
//! storefront/
//! ├── lib.rs             ◄─── You are here (startup, shutdown, tracing)
//! ├── state/
//! │   ├── mod.rs         ◄─── State type exports
//! │   ├── db.rs          ◄─── Database state wrapper
//! │   ├── store.rs       ◄─── Catalog, cart, coupons, selection
//! │   ├── config.rs      ◄─── Configuration state
//! │   └── notifications.rs ◄─ Toast queue
//! ├── commands/
//! │   ├── cart.rs        ◄─── Cart, coupon selection, checkout
//! │   ├── product.rs     ◄─── Catalog listing and admin
//! │   ├── coupon.rs      ◄─── Coupon admin
//! │   └── ...
//! └── error.rs           ◄─── API error type for commands
//! ```
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront::open(config)                                               │
//! │    1. resolve database path (config, or platform data dir)              │
//! │    2. connect + migrate                                                 │
//! │    3. load products / cart / coupons (defaults on missing or malformed) │
//! │    4. build StoreState, NotificationState                               │
//! │                                                                         │
//! │  ... commands::*(app.db(), app.store(), app.notifications(), ..) ...    │
//! │                                                                         │
//! │  Storefront::shutdown()                                                 │
//! │    close the pool; the store is dropped with the handle                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::{ApiError, ApiResult};
use state::{ConfigState, DbState, NotificationState, Store, StoreState};
use storefront_db::{Database, DbConfig};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug,sqlx=warn";

/// The running storefront: one of each state type.
#[derive(Debug, Clone)]
pub struct Storefront {
    db: DbState,
    store: StoreState,
    config: ConfigState,
    notifications: NotificationState,
}

impl Storefront {
    /// Opens the database named by `config` and loads the store from it.
    pub async fn open(config: ConfigState) -> ApiResult<Self> {
        let db_path = database_path(&config)?;
        info!(?db_path, "Database path determined");

        let db = Database::new(DbConfig::new(db_path)).await?;
        Self::with_database(db, config).await
    }

    /// Loads the store from an already connected database.
    pub async fn with_database(db: Database, config: ConfigState) -> ApiResult<Self> {
        let stored = db.collections().load_all().await?;

        info!(
            products = stored.products.len(),
            cart_lines = stored.cart.len(),
            coupons = stored.coupons.len(),
            "Store loaded"
        );

        Ok(Storefront {
            db: DbState::new(db),
            store: StoreState::new(Store::from(stored)),
            config,
            notifications: NotificationState::new(),
        })
    }

    pub fn db(&self) -> &DbState {
        &self.db
    }

    pub fn store(&self) -> &StoreState {
        &self.store
    }

    pub fn config(&self) -> &ConfigState {
        &self.config
    }

    pub fn notifications(&self) -> &NotificationState {
        &self.notifications
    }

    /// Closes the database. Collections were already saved by each command.
    pub async fn shutdown(self) {
        info!("Shutting down storefront");
        self.db.inner().close().await;
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_db=trace` - Trace the persistence layer only
/// - Default: [`DEFAULT_LOG_FILTER`]
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.storefront.storefront/storefront.db`
/// - **Windows**: `%APPDATA%\storefront\storefront\data\storefront.db`
/// - **Linux**: `~/.local/share/storefront/storefront.db`
///
/// `ConfigState::db_path` (or `STOREFRONT_DB_PATH`) overrides this.
pub fn database_path(config: &ConfigState) -> ApiResult<PathBuf> {
    if let Some(path) = &config.db_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "storefront", "storefront")
        .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir)
        .map_err(|e| ApiError::internal(format!("Could not create data directory: {}", e)))?;

    Ok(data_dir.join("storefront.db"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{CartItem, Product};

    #[test]
    fn test_configured_path_wins() {
        let config = ConfigState {
            db_path: Some(PathBuf::from("/tmp/shop.db")),
            ..ConfigState::default()
        };
        assert_eq!(database_path(&config).unwrap(), PathBuf::from("/tmp/shop.db"));
    }

    #[tokio::test]
    async fn test_with_database_loads_seed_data() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let app = Storefront::with_database(db, ConfigState::default())
            .await
            .unwrap();

        assert_eq!(app.store().with_store(|s| s.products().len()), 3);
        assert_eq!(app.store().with_store(|s| s.coupons().len()), 2);
        assert!(app.notifications().snapshot().is_empty());

        app.shutdown().await;
    }

    #[tokio::test]
    async fn test_persisted_cart_survives_reload() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let product = Product::new("p1", "Product 1", 10_000, 20);
        db.collections()
            .save_cart(&[CartItem::new(product, 3)])
            .await
            .unwrap();

        let app = Storefront::with_database(db, ConfigState::default())
            .await
            .unwrap();

        let cart = commands::cart::get_cart(app.store());
        assert_eq!(cart.item_count, 3);
        assert_eq!(cart.totals.total_before_discount.amount(), 30_000);
    }
}
