//! # Default Catalog
//!
//! The catalog and coupons a fresh store starts with, and the fallback
//! when a persisted collection is missing or unreadable.

use crate::types::{Coupon, DiscountTier, Product};

/// Seed catalog: three products with quantity tiers.
pub fn default_products() -> Vec<Product> {
    vec![
        Product::new("p1", "Product 1", 10_000, 20)
            .with_discounts(vec![DiscountTier::new(10, 0.1), DiscountTier::new(20, 0.2)])
            .with_description("Premium quality product."),
        Product::new("p2", "Product 2", 20_000, 20)
            .with_discounts(vec![DiscountTier::new(10, 0.15)])
            .with_description("Practical product with many features.")
            .recommended(),
        Product::new("p3", "Product 3", 30_000, 20)
            .with_discounts(vec![DiscountTier::new(10, 0.2), DiscountTier::new(30, 0.25)])
            .with_description("High capacity, high performance product."),
    ]
}

/// Seed coupons: one fixed-amount, one percentage.
pub fn default_coupons() -> Vec<Coupon> {
    vec![
        Coupon::amount("5,000 won off", "AMOUNT5000", 5_000),
        Coupon::percentage("10% off", "PERCENT10", 10),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_coupon, validate_product};

    #[test]
    fn test_defaults_pass_validation() {
        for product in default_products() {
            validate_product(&product).unwrap();
        }
        for coupon in default_coupons() {
            validate_coupon(&coupon).unwrap();
        }
    }

    #[test]
    fn test_default_ids_and_codes_are_unique() {
        let products = default_products();
        let coupons = default_coupons();

        for (i, a) in products.iter().enumerate() {
            assert!(products[i + 1..].iter().all(|b| b.id != a.id));
        }
        for (i, a) in coupons.iter().enumerate() {
            assert!(coupons[i + 1..].iter().all(|b| b.code != a.code));
        }
    }
}
