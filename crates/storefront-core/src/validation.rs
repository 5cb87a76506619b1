//! # Validation Module
//!
//! Input validation for the catalog and coupon admin forms and the cart.
//!
//! ## Where Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Command input (apps/storefront)                               │
//! │  └── Type validation (deserialization)                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE: field rules                                      │
//! │  ├── product: name, price, stock, tiers                                 │
//! │  └── coupon: name, code, value per discount type                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store rules (crate::coupon, crate::pricing)                   │
//! │  ├── duplicate coupon codes                                             │
//! │  └── stock and coupon thresholds against the live cart                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::validation::{validate_product_name, validate_stock};
//!
//! validate_product_name("Tumbler").unwrap();
//! assert!(validate_stock(10_000).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Coupon, DiscountTier, DiscountType, Product};
use crate::{MAX_COUPON_AMOUNT, MAX_COUPON_PERCENTAGE, MAX_PRODUCT_STOCK};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_CODE_LEN: usize = 50;

fn required(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Product Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Travel Mug").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    required("name", name, MAX_NAME_LEN)
}

/// Validates a unit price in won. Zero is allowed.
pub fn validate_price(price: i64) -> ValidationResult<()> {
    if price < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a warehouse stock count (0..=9999).
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRODUCT_STOCK).contains(&stock) {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: MAX_PRODUCT_STOCK,
        });
    }

    Ok(())
}

/// Validates one quantity tier.
///
/// ## Rules
/// - `quantity` ≥ 1
/// - `rate` within `[0, 1]` (NaN rejected)
pub fn validate_discount_tier(tier: &DiscountTier) -> ValidationResult<()> {
    if tier.quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "discount quantity".to_string(),
        });
    }

    if !(0.0..=1.0).contains(&tier.rate) {
        return Err(ValidationError::InvalidFormat {
            field: "discount rate".to_string(),
            reason: "must be between 0 and 1".to_string(),
        });
    }

    Ok(())
}

/// Validates a whole product before it enters the catalog.
///
/// Two tiers with the same threshold are rejected as duplicates.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_name(&product.name)?;
    validate_price(product.price.amount())?;
    validate_stock(product.stock)?;

    for (i, tier) in product.discounts.iter().enumerate() {
        validate_discount_tier(tier)?;

        if product.discounts[..i]
            .iter()
            .any(|other| other.quantity == tier.quantity)
        {
            return Err(ValidationError::Duplicate {
                field: "discount quantity".to_string(),
                value: tier.quantity.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Coupon Validators
// =============================================================================

/// Validates a coupon before registration.
///
/// ## Rules
/// - `name` and `code` must not be blank
/// - `Percentage`: value in 0..=100
/// - `Amount`: value in 0..=100,000
///
/// Code uniqueness is checked against the registry by
/// [`crate::coupon::ensure_unique_code`].
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_coupon;
/// use storefront_core::Coupon;
///
/// assert!(validate_coupon(&Coupon::percentage("Half off", "HALF", 50)).is_ok());
/// assert!(validate_coupon(&Coupon::percentage("Too much", "MORE", 150)).is_err());
/// assert!(validate_coupon(&Coupon::amount("Big", "BIG", 200_000)).is_err());
/// ```
pub fn validate_coupon(coupon: &Coupon) -> ValidationResult<()> {
    required("coupon name", &coupon.name, MAX_NAME_LEN)?;
    required("coupon code", &coupon.code, MAX_CODE_LEN)?;

    let max = match coupon.discount_type {
        DiscountType::Percentage => MAX_COUPON_PERCENTAGE,
        DiscountType::Amount => MAX_COUPON_AMOUNT,
    };

    if !(0..=max).contains(&coupon.discount_value) {
        return Err(ValidationError::OutOfRange {
            field: "discount value".to_string(),
            min: 0,
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Cart Validators
// =============================================================================

/// Validates a requested cart quantity (≥ 1).
///
/// Upper bounds come from live stock, checked by the store.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
