//! # Domain Types
//!
//! Core domain types shared by the pricing engine, the key-value store and
//! the application layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │     Coupon      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  product        │   │  code (unique)  │       │
//! │  │  name           │   │  quantity ≥ 1   │   │  name           │       │
//! │  │  price (won)    │   └─────────────────┘   │  discount_type  │       │
//! │  │  stock          │                         │  discount_value │       │
//! │  │  discounts ─────┼──► DiscountTier         └─────────────────┘       │
//! │  └─────────────────┘    quantity, rate                                  │
//! │                                                                         │
//! │  CartTotals (computed, never stored)                                    │
//! │    total_before_discount, total_after_discount                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Shape
//! Field names are camelCase so persisted collections read
//! `{"discountType": "percentage", "discountValue": 10}`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Discount Tier
// =============================================================================

/// A quantity-threshold discount defined on a product.
///
/// `rate` applies once a cart line holds at least `quantity` units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountTier {
    /// Minimum line quantity (≥ 1).
    pub quantity: i64,

    /// Discount rate in `[0, 1]` (0.1 = 10%).
    pub rate: f64,
}

impl DiscountTier {
    /// Creates a tier.
    pub const fn new(quantity: i64, rate: f64) -> Self {
        DiscountTier { quantity, rate }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Read-only input to the pricing engine; only the catalog admin commands
/// mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price in won.
    pub price: Money,

    /// Units held in the warehouse (before subtracting the cart).
    pub stock: i64,

    /// Quantity tiers; no ordering is required.
    #[serde(default)]
    pub discounts: Vec<DiscountTier>,

    /// Optional text searched alongside the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Shown with a "recommended" badge.
    #[serde(default)]
    pub is_recommended: bool,
}

impl Product {
    /// Creates a product without tiers or description.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: i64, stock: i64) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price: Money::new(price),
            stock,
            discounts: Vec::new(),
            description: None,
            is_recommended: false,
        }
    }

    /// Replaces the discount tiers.
    pub fn with_discounts(mut self, discounts: Vec<DiscountTier>) -> Self {
        self.discounts = discounts;
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the product as recommended.
    pub fn recommended(mut self) -> Self {
        self.is_recommended = true;
        self
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// One cart line: a product snapshot plus a quantity.
///
/// ## Invariant
/// At most one line per product id. The store's cart operations keep this;
/// the pricing functions assume it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub product: Product,

    /// Quantity in the cart (≥ 1).
    pub quantity: i64,
}

impl CartItem {
    /// Creates a cart line.
    pub fn new(product: Product, quantity: i64) -> Self {
        CartItem { product, quantity }
    }

    /// Undiscounted line price (`price × quantity`).
    #[inline]
    pub fn line_price(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// How a coupon's `discount_value` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum DiscountType {
    /// Fixed amount in won subtracted from the total.
    Amount,
    /// Percentage (0-100) taken off the total.
    Percentage,
}

impl Default for DiscountType {
    fn default() -> Self {
        DiscountType::Amount
    }
}

/// A cart-wide coupon applied after per-line discounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Coupon {
    pub name: String,

    /// Unique, case-sensitive code.
    pub code: String,

    pub discount_type: DiscountType,

    /// Won for `Amount`, percent for `Percentage`.
    pub discount_value: i64,
}

impl Coupon {
    /// Creates a fixed-amount coupon.
    pub fn amount(name: impl Into<String>, code: impl Into<String>, value: i64) -> Self {
        Coupon {
            name: name.into(),
            code: code.into(),
            discount_type: DiscountType::Amount,
            discount_value: value,
        }
    }

    /// Creates a percentage coupon.
    pub fn percentage(name: impl Into<String>, code: impl Into<String>, value: i64) -> Self {
        Coupon {
            name: name.into(),
            code: code.into(),
            discount_type: DiscountType::Percentage,
            discount_value: value,
        }
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals before and after all discounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub total_before_discount: Money,
    pub total_after_discount: Money,
}

impl CartTotals {
    /// Amount saved by tiers, bulk bonus and coupon combined.
    pub fn savings(&self) -> Money {
        self.total_before_discount - self.total_after_discount
    }
}

// =============================================================================
// View Mode
// =============================================================================

/// Which side of the storefront is rendering prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ViewMode {
    /// Shopper-facing catalog and cart (`₩10,000`).
    Customer,
    /// Management panel (`10,000원`).
    Admin,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Customer
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_json_shape() {
        let product = Product::new("p1", "Tumbler", 10_000, 20)
            .with_discounts(vec![DiscountTier::new(10, 0.1)]);

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price"], 10_000);
        assert_eq!(json["stock"], 20);
        assert_eq!(json["discounts"][0]["quantity"], 10);
        assert_eq!(json["isRecommended"], false);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_product_parses_without_optional_fields() {
        let json = r#"{"id":"p9","name":"Mug","price":3000,"stock":4,"discounts":[]}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.price, Money::new(3_000));
        assert!(product.description.is_none());
        assert!(!product.is_recommended);
    }

    #[test]
    fn test_coupon_json_shape() {
        let coupon = Coupon::percentage("10% off", "PERCENT10", 10);
        let json = serde_json::to_value(&coupon).unwrap();

        assert_eq!(json["discountType"], "percentage");
        assert_eq!(json["discountValue"], 10);

        let back: Coupon = serde_json::from_value(json).unwrap();
        assert_eq!(back, coupon);
    }

    #[test]
    fn test_cart_totals_json_shape() {
        let totals = CartTotals {
            total_before_discount: Money::new(10_000),
            total_after_discount: Money::new(8_500),
        };
        let json = serde_json::to_value(totals).unwrap();

        assert_eq!(json["totalBeforeDiscount"], 10_000);
        assert_eq!(json["totalAfterDiscount"], 8_500);
        assert_eq!(totals.savings(), Money::new(1_500));
    }

    #[test]
    fn test_line_price() {
        let item = CartItem::new(Product::new("p1", "Tumbler", 2_000, 5), 3);
        assert_eq!(item.line_price(), Money::new(6_000));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(DiscountType::default(), DiscountType::Amount);
        assert_eq!(ViewMode::default(), ViewMode::Customer);
    }
}
