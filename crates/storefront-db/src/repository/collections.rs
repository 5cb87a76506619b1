//! # Collection Repository
//!
//! Typed load/save of the three storefront collections.
//!
//! ## Stored Layout
//! ```text
//! ┌──────────────┬──────────────────────────────────────────────┐
//! │ key          │ value                                        │
//! ├──────────────┼──────────────────────────────────────────────┤
//! │ "products"   │ [{"id":"p1","name":..,"price":10000,..}, ..] │
//! │ "cart"       │ [{"product":{..},"quantity":2}, ..]          │
//! │ "coupons"    │ [{"code":"AMOUNT5000","discountType":..}, ..]│
//! └──────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! ## Fallbacks
//! A missing or unreadable value never fails a load:
//!
//! | Collection | Fallback                |
//! |------------|-------------------------|
//! | products   | `default_products()`    |
//! | cart       | empty                   |
//! | coupons    | `default_coupons()`     |
//!
//! The cart row is deleted rather than written when the cart is empty.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use storefront_core::defaults::{default_coupons, default_products};
use storefront_core::{CartItem, Coupon, Product};

use crate::error::{DbError, DbResult};
use crate::repository::kv::KeyValueRepository;

/// Key of the catalog collection.
pub const PRODUCTS_KEY: &str = "products";

/// Key of the cart collection.
pub const CART_KEY: &str = "cart";

/// Key of the coupon collection.
pub const COUPONS_KEY: &str = "coupons";

/// All three collections, as loaded at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCollections {
    pub products: Vec<Product>,
    pub cart: Vec<CartItem>,
    pub coupons: Vec<Coupon>,
}

/// Repository for the typed storefront collections.
#[derive(Debug, Clone)]
pub struct CollectionRepository {
    kv: KeyValueRepository,
}

impl CollectionRepository {
    /// Creates a new CollectionRepository.
    pub fn new(kv: KeyValueRepository) -> Self {
        CollectionRepository { kv }
    }

    /// Loads and decodes `key`, or returns `fallback()` when it is missing
    /// or malformed.
    async fn load_or<T, F>(&self, key: &str, fallback: F) -> DbResult<Vec<T>>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Vec<T>,
    {
        let Some(raw) = self.kv.get(key).await? else {
            debug!(key = %key, "Collection not stored, using fallback");
            return Ok(fallback());
        };

        match serde_json::from_str(&raw) {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(key = %key, error = %e, "Stored collection is malformed, using fallback");
                Ok(fallback())
            }
        }
    }

    async fn save<T: Serialize>(&self, key: &str, items: &[T]) -> DbResult<()> {
        let json = serde_json::to_string(items).map_err(|e| DbError::serialization(key, e))?;
        self.kv.set(key, &json).await?;

        debug!(key = %key, count = items.len(), "Saved collection");
        Ok(())
    }

    /// Loads the catalog, falling back to the seed catalog.
    pub async fn load_products(&self) -> DbResult<Vec<Product>> {
        self.load_or(PRODUCTS_KEY, default_products).await
    }

    /// Loads the cart, falling back to an empty cart.
    pub async fn load_cart(&self) -> DbResult<Vec<CartItem>> {
        self.load_or(CART_KEY, Vec::new).await
    }

    /// Loads the coupons, falling back to the seed coupons.
    pub async fn load_coupons(&self) -> DbResult<Vec<Coupon>> {
        self.load_or(COUPONS_KEY, default_coupons).await
    }

    /// Loads all three collections.
    pub async fn load_all(&self) -> DbResult<StoredCollections> {
        Ok(StoredCollections {
            products: self.load_products().await?,
            cart: self.load_cart().await?,
            coupons: self.load_coupons().await?,
        })
    }

    /// Persists the catalog.
    pub async fn save_products(&self, products: &[Product]) -> DbResult<()> {
        self.save(PRODUCTS_KEY, products).await
    }

    /// Persists the cart; an empty cart removes the key.
    pub async fn save_cart(&self, cart: &[CartItem]) -> DbResult<()> {
        if cart.is_empty() {
            self.kv.remove(CART_KEY).await?;
            debug!("Cart empty, removed stored cart");
            return Ok(());
        }

        self.save(CART_KEY, cart).await
    }

    /// Persists the coupons.
    pub async fn save_coupons(&self, coupons: &[Coupon]) -> DbResult<()> {
        self.save(COUPONS_KEY, coupons).await
    }

    /// Whether the catalog or coupons have ever been stored.
    pub async fn is_initialized(&self) -> DbResult<bool> {
        Ok(self.kv.contains(PRODUCTS_KEY).await? || self.kv.contains(COUPONS_KEY).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
