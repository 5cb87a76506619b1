//! # Pricing Module
//!
//! Stock, discount, line and cart total calculations.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pricing Pipeline                                 │
//! │                                                                         │
//! │  catalog + cart                                                         │
//! │       │                                                                 │
//! │       ├──► remaining_stock(product, cart)       stock - reserved        │
//! │       │                                                                 │
//! │       ├──► has_bulk_purchase(cart)              any line qty ≥ 10       │
//! │       │         │  (computed ONCE per cart, shared by every line)       │
//! │       ▼         ▼                                                       │
//! │  base_discount(tiers, qty) ──► apply_bulk_bonus ──► rate ∈ [0, 0.5]     │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                               item_total = round(price × qty × (1-rate))│
//! │                                                        │                │
//! │                                                        ▼                │
//! │                         cart_totals(cart, coupon) ──► CartTotals        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Bulk Purchase Is Cart-Wide
//! A single line with 10 or more units grants the +5% bonus to every line
//! of the cart, including lines with a quantity of one.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::coupon::apply_coupon;
use crate::money::Money;
use crate::types::{CartItem, CartTotals, Coupon, DiscountTier, Product};
use crate::{BULK_BONUS_RATE, BULK_PURCHASE_QUANTITY, LOW_STOCK_THRESHOLD, MAX_DISCOUNT_RATE};

// =============================================================================
// Stock
// =============================================================================

/// Units of `product` still available after subtracting its cart line.
///
/// Not clamped: when the catalog stock was lowered after the line was
/// added the result is negative. Treat anything `<= 0` as unavailable.
///
/// ## Example
/// ```rust
/// use storefront_core::pricing::remaining_stock;
/// use storefront_core::{CartItem, Product};
///
/// let product = Product::new("p1", "Tumbler", 2_000, 5);
/// let cart = vec![CartItem::new(product.clone(), 5)];
/// assert_eq!(remaining_stock(&product, &cart), 0);
/// assert_eq!(remaining_stock(&product, &[]), 5);
/// ```
pub fn remaining_stock(product: &Product, cart: &[CartItem]) -> i64 {
    let reserved = cart
        .iter()
        .find(|item| item.product.id == product.id)
        .map_or(0, |item| item.quantity);

    product.stock - reserved
}

/// Availability badge for a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "status", content = "remaining", rename_all = "camelCase")]
#[ts(export)]
pub enum StockStatus {
    /// Nothing left to add to the cart.
    SoldOut,
    /// Only a handful left (1..=5).
    Low(i64),
    /// Plenty left.
    Available(i64),
}

impl StockStatus {
    /// Whether another unit can be added to the cart.
    pub fn can_add(&self) -> bool {
        !matches!(self, StockStatus::SoldOut)
    }
}

/// Classifies [`remaining_stock`] for display.
pub fn stock_status(product: &Product, cart: &[CartItem]) -> StockStatus {
    match remaining_stock(product, cart) {
        n if n <= 0 => StockStatus::SoldOut,
        n if n <= LOW_STOCK_THRESHOLD => StockStatus::Low(n),
        n => StockStatus::Available(n),
    }
}

// =============================================================================
// Discounts
// =============================================================================

/// Highest tier rate unlocked by `quantity`, or 0 when no tier qualifies.
///
/// Every tier is scanned; their order does not matter.
///
/// ## Example
/// ```rust
/// use storefront_core::pricing::base_discount;
/// use storefront_core::DiscountTier;
///
/// let tiers = [DiscountTier::new(10, 0.1), DiscountTier::new(20, 0.2)];
/// assert_eq!(base_discount(&tiers, 9), 0.0);
/// assert_eq!(base_discount(&tiers, 15), 0.1);
/// assert_eq!(base_discount(&tiers, 20), 0.2);
/// ```
pub fn base_discount(tiers: &[DiscountTier], quantity: i64) -> f64 {
    tiers
        .iter()
        .filter(|tier| quantity >= tier.quantity)
        .fold(0.0, |max, tier| if tier.rate > max { tier.rate } else { max })
}

/// True when any line of the cart holds at least
/// [`BULK_PURCHASE_QUANTITY`] units.
pub fn has_bulk_purchase(cart: &[CartItem]) -> bool {
    cart.iter().any(|item| item.quantity >= BULK_PURCHASE_QUANTITY)
}

/// Adds the bulk bonus to a base rate, capped at [`MAX_DISCOUNT_RATE`].
///
/// Without a bulk purchase the base rate is returned untouched, even when
/// it already exceeds the cap.
pub fn apply_bulk_bonus(base_rate: f64, has_bulk_purchase: bool) -> f64 {
    if has_bulk_purchase {
        (base_rate + BULK_BONUS_RATE).min(MAX_DISCOUNT_RATE)
    } else {
        base_rate
    }
}

/// Final discount rate of one cart line.
pub fn max_applicable_discount(item: &CartItem, has_bulk_purchase: bool) -> f64 {
    apply_bulk_bonus(
        base_discount(&item.product.discounts, item.quantity),
        has_bulk_purchase,
    )
}

// =============================================================================
// Line Totals
// =============================================================================

/// Payable total of one line: `round(price × quantity × (1 - rate))`.
///
/// Rounded once, on the final product.
pub fn item_total(item: &CartItem, has_bulk_purchase: bool) -> Money {
    item.line_price()
        .apply_discount_rate(max_applicable_discount(item, has_bulk_purchase))
}

/// A priced cart line for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,

    /// `unit_price × quantity`.
    pub line_price: Money,

    /// What the shopper pays for this line.
    pub total: Money,

    /// Tier rate plus any bulk bonus.
    pub discount_rate: f64,
}

impl CartLine {
    /// Whether the line shows a discount badge.
    pub fn is_discounted(&self) -> bool {
        self.total < self.line_price
    }

    /// Discount as a whole percentage for badges (0.15 → 15).
    pub fn discount_percent(&self) -> i64 {
        (self.discount_rate * 100.0).round() as i64
    }
}

/// Prices every line of the cart, sharing one bulk-purchase flag.
pub fn price_cart(cart: &[CartItem]) -> Vec<CartLine> {
    let bulk = has_bulk_purchase(cart);

    cart.iter()
        .map(|item| CartLine {
            product_id: item.product.id.clone(),
            name: item.product.name.clone(),
            quantity: item.quantity,
            unit_price: item.product.price,
            line_price: item.line_price(),
            total: item_total(item, bulk),
            discount_rate: max_applicable_discount(item, bulk),
        })
        .collect()
}

/// Total number of units across all lines (header badge).
pub fn cart_item_count(cart: &[CartItem]) -> i64 {
    cart.iter().map(|item| item.quantity).sum()
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Cart totals before and after every discount.
///
/// ## Steps
/// 1. `has_bulk_purchase` once for the whole cart
/// 2. before = Σ price × quantity
/// 3. after = Σ item_total
/// 4. coupon, if any: amount coupons floor at zero, percentage coupons
///    round once
///
/// ## Example
/// ```rust
/// use storefront_core::pricing::cart_totals;
/// use storefront_core::{CartItem, Coupon, Product};
///
/// let cart = vec![CartItem::new(Product::new("p1", "Mug", 3_000, 10), 2)];
/// let coupon = Coupon::amount("5,000 off", "AMOUNT5000", 5_000);
///
/// let totals = cart_totals(&cart, Some(&coupon));
/// assert_eq!(totals.total_before_discount.amount(), 6_000);
/// assert_eq!(totals.total_after_discount.amount(), 1_000);
/// ```
pub fn cart_totals(cart: &[CartItem], selected_coupon: Option<&Coupon>) -> CartTotals {
    let bulk = has_bulk_purchase(cart);

    let total_before_discount: Money = cart.iter().map(CartItem::line_price).sum();
    let mut total_after_discount: Money = cart.iter().map(|item| item_total(item, bulk)).sum();

    if let Some(coupon) = selected_coupon {
        total_after_discount = apply_coupon(total_after_discount, coupon);
    }

    CartTotals {
        total_before_discount,
        total_after_discount,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
