//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                     │
//! │  ├── CoreError        - Cart, catalog and coupon rule violations        │
//! │  └── ValidationError  - Admin form input failures                       │
//! │                                                                         │
//! │  storefront-db errors (separate crate)                                  │
//! │  └── DbError          - Key-value store failures                        │
//! │                                                                         │
//! │  App errors (apps/storefront)                                           │
//! │  └── ApiError         - What the frontend sees (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Notification            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal. They are declined-with-reason results that the
//! caller surfaces as a notification while leaving state unchanged.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business rule errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A coupon with the same code is already registered.
    ///
    /// Codes are compared case-sensitively. The coupon collection is left
    /// unchanged.
    #[error("Coupon code '{code}' already exists")]
    DuplicateCouponCode { code: String },

    /// A percentage coupon was selected for a cart below the minimum total.
    ///
    /// ## User Workflow
    /// ```text
    /// Select "10% off" (pre-coupon total: 5,000)
    ///      │
    ///      ▼
    /// can_apply_coupon → false (minimum 10,000)
    ///      │
    ///      ▼
    /// CouponThresholdNotMet, previously selected coupon stays selected
    /// ```
    #[error("Percentage coupon '{code}' requires a total of at least {minimum} (current {current})")]
    CouponThresholdNotMet {
        code: String,
        minimum: Money,
        current: Money,
    },

    /// Not enough stock left to put another unit in the cart.
    #[error("Insufficient stock for {product_id}: available {available}, requested {requested}")]
    InsufficientStock {
        product_id: String,
        available: i64,
        requested: i64,
    },

    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Coupon code is not registered.
    #[error("Coupon not found: {0}")]
    CouponNotFound(String),

    /// Product has no line in the cart.
    #[error("Product {0} is not in the cart")]
    ItemNotInCart(String),

    /// Checkout was requested on an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised by the admin forms.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. a rate outside 0..=1).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. two tiers with the same threshold).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
