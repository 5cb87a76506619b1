//! # Coupon Rules
//!
//! Eligibility, application and registration rules for cart-wide coupons.
//!
//! ## Coupon Selection Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shopper picks a coupon                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  pre-coupon total = cart_totals(cart, None).total_after_discount        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  can_apply_coupon(coupon, total)                                        │
//! │       │                                                                 │
//! │       ├── percentage && total < 10,000 → CouponThresholdNotMet          │
//! │       │                                  (selection unchanged)          │
//! │       │                                                                 │
//! │       └── otherwise → coupon becomes the selected coupon                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Coupon, DiscountType};
use crate::PERCENTAGE_COUPON_MIN_TOTAL;

/// Whether `coupon` may be selected for a cart whose pre-coupon total is
/// `current_total_after_discount`.
///
/// Only percentage coupons have a minimum; amount coupons are always
/// eligible.
///
/// ## Example
/// ```rust
/// use storefront_core::coupon::can_apply_coupon;
/// use storefront_core::{Coupon, Money};
///
/// let pct = Coupon::percentage("10% off", "PERCENT10", 10);
/// assert!(!can_apply_coupon(&pct, Money::new(5_000)));
/// assert!(can_apply_coupon(&pct, Money::new(10_000)));
///
/// let amt = Coupon::amount("5,000 off", "AMOUNT5000", 5_000);
/// assert!(can_apply_coupon(&amt, Money::new(0)));
/// ```
pub fn can_apply_coupon(coupon: &Coupon, current_total_after_discount: Money) -> bool {
    !(coupon.discount_type == DiscountType::Percentage
        && current_total_after_discount < PERCENTAGE_COUPON_MIN_TOTAL)
}

/// [`can_apply_coupon`] as a `Result`, naming the shortfall on rejection.
pub fn ensure_coupon_applicable(
    coupon: &Coupon,
    current_total_after_discount: Money,
) -> CoreResult<()> {
    if can_apply_coupon(coupon, current_total_after_discount) {
        Ok(())
    } else {
        Err(CoreError::CouponThresholdNotMet {
            code: coupon.code.clone(),
            minimum: PERCENTAGE_COUPON_MIN_TOTAL,
            current: current_total_after_discount,
        })
    }
}

/// Applies a coupon to a post-line-discount total.
///
/// - `Amount`: subtract, floored at zero
/// - `Percentage`: `round(total × (1 - value / 100))`
pub fn apply_coupon(total_after_discount: Money, coupon: &Coupon) -> Money {
    match coupon.discount_type {
        DiscountType::Amount => {
            total_after_discount.saturating_deduct(Money::new(coupon.discount_value))
        }
        DiscountType::Percentage => {
            total_after_discount.apply_discount_rate(coupon.discount_value as f64 / 100.0)
        }
    }
}

/// Rejects a new coupon whose code is already registered.
///
/// Exact, case-sensitive comparison on the code; names may repeat.
pub fn ensure_unique_code(existing: &[Coupon], candidate: &Coupon) -> CoreResult<()> {
    if existing.iter().any(|coupon| coupon.code == candidate.code) {
        return Err(CoreError::DuplicateCouponCode {
            code: candidate.code.clone(),
        });
    }

    Ok(())
}

/// Looks up a registered coupon by code.
pub fn find_coupon<'a>(coupons: &'a [Coupon], code: &str) -> Option<&'a Coupon> {
    coupons.iter().find(|coupon| coupon.code == code)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn percent10() -> Coupon {
        Coupon::percentage("10% off", "PERCENT10", 10)
    }

    fn amount3000() -> Coupon {
        Coupon::amount("3,000 off", "AMOUNT3000", 3_000)
    }

    #[test]
    fn test_percentage_coupon_below_threshold_is_rejected() {
        assert!(!can_apply_coupon(&percent10(), Money::new(5_000)));
        assert!(!can_apply_coupon(&percent10(), Money::new(9_999)));
    }

    #[test]
    fn test_percentage_coupon_at_threshold_is_accepted() {
        assert!(can_apply_coupon(&percent10(), Money::new(10_000)));
        assert!(can_apply_coupon(&percent10(), Money::new(250_000)));
    }

    #[test]
    fn test_amount_coupon_has_no_minimum() {
        assert!(can_apply_coupon(&amount3000(), Money::zero()));
        assert!(can_apply_coupon(&amount3000(), Money::new(500)));
    }

    #[test]
    fn test_ensure_coupon_applicable_reports_shortfall() {
        let err = ensure_coupon_applicable(&percent10(), Money::new(5_000)).unwrap_err();
        match err {
            CoreError::CouponThresholdNotMet {
                code,
                minimum,
                current,
            } => {
                assert_eq!(code, "PERCENT10");
                assert_eq!(minimum, Money::new(10_000));
                assert_eq!(current, Money::new(5_000));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(ensure_coupon_applicable(&amount3000(), Money::new(5_000)).is_ok());
    }

    #[test]
    fn test_apply_amount_coupon() {
        assert_eq!(apply_coupon(Money::new(8_500), &amount3000()), Money::new(5_500));
        assert_eq!(apply_coupon(Money::new(2_000), &amount3000()), Money::zero());
    }

    #[test]
    fn test_apply_percentage_coupon() {
        assert_eq!(apply_coupon(Money::new(20_000), &percent10()), Money::new(18_000));
        // 12,345 × 0.9 = 11,110.5 → 11,111
        assert_eq!(apply_coupon(Money::new(12_345), &percent10()), Money::new(11_111));
    }

    #[test]
    fn test_duplicate_code_is_rejected() {
        let existing = vec![amount3000(), percent10()];
        let candidate = Coupon::amount("Another name", "AMOUNT3000", 1_000);

        let err = ensure_unique_code(&existing, &candidate).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateCouponCode { code } if code == "AMOUNT3000"));
    }

    #[test]
    fn test_code_comparison_is_case_sensitive() {
        let existing = vec![percent10()];
        let candidate = Coupon::percentage("10% off", "percent10", 10);

        assert!(ensure_unique_code(&existing, &candidate).is_ok());
    }

    #[test]
    fn test_find_coupon() {
        let coupons = vec![amount3000(), percent10()];
        assert_eq!(find_coupon(&coupons, "PERCENT10"), Some(&coupons[1]));
        assert_eq!(find_coupon(&coupons, "NOPE"), None);
    }
}
