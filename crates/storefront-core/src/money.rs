//! # Money Module
//!
//! Provides the `Money` type for whole-won amounts.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Discount rates are fractions (0.1, 0.15, 0.5) so the products of a     │
//! │  price and a rate are not whole numbers:                                │
//! │    1,000 × 10 × (1 - 0.15) = 8,499.999999999999                         │
//! │                                                                         │
//! │  OUR SOLUTION: round once, at the boundary                              │
//! │    Prices and totals are always whole won (i64).                        │
//! │    A rate is applied to a whole amount and rounded exactly once,        │
//! │    half away from zero → 8,500.                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::new(1_000);
//! let line = price.multiply_quantity(10);          // 10,000
//! let payable = line.apply_discount_rate(0.15);    // 8,500
//! assert_eq!(payable.amount(), 8_500);
//! assert_eq!(payable.grouped(), "8,500");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole won (the currency has no minor unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate differences may be negative; every
///   total the engine returns is clamped or proven non-negative
/// - **Transparent serde**: serializes as a bare JSON number so persisted
///   collections keep the `price: 10000` shape
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole won.
    #[inline]
    pub const fn new(amount: i64) -> Self {
        Money(amount)
    }

    /// Returns the value in whole won.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::new(20_000);
    /// assert_eq!(unit_price.multiply_quantity(3).amount(), 60_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a fractional discount rate and rounds once.
    ///
    /// Returns `round(amount × (1 - rate))` with rounding half away from
    /// zero. The rate is used as given; callers keep it within `[0, 1]`.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let subtotal = Money::new(10_000);
    /// assert_eq!(subtotal.apply_discount_rate(0.1).amount(), 9_000);
    /// assert_eq!(Money::new(5).apply_discount_rate(0.5).amount(), 3); // 2.5 → 3
    /// ```
    pub fn apply_discount_rate(&self, rate: f64) -> Money {
        // f64::round rounds half away from zero
        Money((self.0 as f64 * (1.0 - rate)).round() as i64)
    }

    /// Subtracts a deduction, flooring the result at zero.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let total = Money::new(2_000);
    /// assert_eq!(total.saturating_deduct(Money::new(5_000)), Money::zero());
    /// ```
    pub fn saturating_deduct(&self, deduction: Money) -> Money {
        Money((self.0 - deduction.0).max(0))
    }

    /// Renders the amount with thousands separators, without any currency
    /// marker.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::new(1_234_567).grouped(), "1,234,567");
    /// assert_eq!(Money::new(-2_500).grouped(), "-2,500");
    /// assert_eq!(Money::new(999).grouped(), "999");
    /// ```
    pub fn grouped(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

        if self.0 < 0 {
            out.push('-');
        }

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }

        out
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the customer-facing form (`₩10,000`).
///
/// ## Note
/// Views pick their own marker through [`crate::format`]; this is for logs
/// and error messages.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₩{}", self.grouped())
    }
}

impl From<i64> for Money {
    fn from(amount: i64) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_amount() {
        let money = Money::new(10_000);
        assert_eq!(money.amount(), 10_000);
        assert!(!money.is_zero());
        assert!(Money::zero().is_zero());
        assert!(Money::new(-1).is_negative());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::new(10_000)), "₩10,000");
        assert_eq!(format!("{}", Money::new(0)), "₩0");
        assert_eq!(format!("{}", Money::new(-5_500)), "₩-5,500");
    }

    #[test]
    fn test_grouped_boundaries() {
        assert_eq!(Money::new(0).grouped(), "0");
        assert_eq!(Money::new(100).grouped(), "100");
        assert_eq!(Money::new(1_000).grouped(), "1,000");
        assert_eq!(Money::new(100_000).grouped(), "100,000");
        assert_eq!(Money::new(1_000_000).grouped(), "1,000,000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::new(1_000);
        let b = Money::new(500);

        assert_eq!((a + b).amount(), 1_500);
        assert_eq!((a - b).amount(), 500);
        assert_eq!((a * 3).amount(), 3_000);

        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total.amount(), 2_000);
    }

    /// 0.1 + 0.05 is not exactly 0.15 in binary floating point; the single
    /// rounding step must still land on the whole-won result.
    #[test]
    fn test_discount_rate_absorbs_float_noise() {
        let line = Money::new(1_000).multiply_quantity(10);
        let rate = 0.1 + 0.05;
        assert_eq!(line.apply_discount_rate(rate).amount(), 8_500);
    }

    #[test]
    fn test_discount_rate_rounds_half_away_from_zero() {
        assert_eq!(Money::new(5).apply_discount_rate(0.5).amount(), 3);
        assert_eq!(Money::new(15).apply_discount_rate(0.1).amount(), 14); // 13.5 → 14
        assert_eq!(Money::new(100).apply_discount_rate(0.0).amount(), 100);
    }

    #[test]
    fn test_saturating_deduct() {
        assert_eq!(
            Money::new(8_500).saturating_deduct(Money::new(3_000)),
            Money::new(5_500)
        );
        assert_eq!(
            Money::new(1_000).saturating_deduct(Money::new(1_000)),
            Money::zero()
        );
        assert_eq!(
            Money::new(1_000).saturating_deduct(Money::new(5_000)),
            Money::zero()
        );
    }

    #[test]
    fn test_serializes_as_bare_number() {
        let json = serde_json::to_string(&Money::new(8_500)).unwrap();
        assert_eq!(json, "8500");

        let back: Money = serde_json::from_str("12000").unwrap();
        assert_eq!(back, Money::new(12_000));
    }
}
