//! # storefront-core: Pure Pricing Logic for the Storefront
//!
//! This crate turns a cart snapshot, a catalog and an optional coupon into
//! remaining-stock figures, per-line totals and cart totals. Every function
//! is a pure mapping over immutable snapshots.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (out of tree)                       │   │
//! │  │    Catalog UI ──► Cart UI ──► Coupon picker ──► Admin panel     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/storefront (Store + commands)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ snapshots                              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   catalog + cart ─► stock ─► discount ─► item ─► cart totals    │   │
//! │  │                                              ▲                  │   │
//! │  │                                   coupon ────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, Coupon, CartTotals)
//! - [`money`] - Whole-won money type
//! - [`pricing`] - Stock, discount, line and cart total calculations
//! - [`coupon`] - Coupon eligibility, application and registration rules
//! - [`format`] - Display strings for prices
//! - [`search`] - Catalog filtering
//! - [`defaults`] - Seed catalog and coupons
//! - [`validation`] - Admin form rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::pricing::cart_totals;
//! use storefront_core::{CartItem, DiscountTier, Product};
//!
//! let product = Product::new("p1", "Tumbler", 1000, 20)
//!     .with_discounts(vec![DiscountTier::new(10, 0.1)]);
//! let cart = vec![CartItem::new(product, 10)];
//!
//! // 10% tier + 5% bulk bonus
//! let totals = cart_totals(&cart, None);
//! assert_eq!(totals.total_before_discount.amount(), 10_000);
//! assert_eq!(totals.total_after_discount.amount(), 8_500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod coupon;
pub mod defaults;
pub mod error;
pub mod format;
pub mod money;
pub mod pricing;
pub mod search;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantity on any single cart line that unlocks the bulk-purchase bonus
/// for every line of the cart.
pub const BULK_PURCHASE_QUANTITY: i64 = 10;

/// Extra discount rate granted cart-wide by a bulk purchase.
pub const BULK_BONUS_RATE: f64 = 0.05;

/// Upper bound of any line discount rate once the bulk bonus is added.
pub const MAX_DISCOUNT_RATE: f64 = 0.5;

/// Pre-coupon total a cart must reach before a percentage coupon applies.
pub const PERCENTAGE_COUPON_MIN_TOTAL: Money = Money::new(10_000);

/// Remaining stock at or below which the catalog shows a "few left" badge.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Maximum stock an admin can record for one product.
pub const MAX_PRODUCT_STOCK: i64 = 9_999;

/// Maximum value of a fixed-amount coupon.
pub const MAX_COUPON_AMOUNT: i64 = 100_000;

/// Maximum value of a percentage coupon.
pub const MAX_COUPON_PERCENTAGE: i64 = 100;
