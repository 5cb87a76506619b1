//! # Price Formatting
//!
//! Turns a price into the string the catalog, cart or admin table shows.
//!
//! ```text
//! Customer view:  ₩10,000
//! Admin view:     10,000원
//! Out of stock:   SOLD OUT      (either view, whenever a product context
//!                                is given and remaining stock <= 0)
//! ```
//!
//! Purely textual: no currency conversion, no rounding.

use crate::money::Money;
use crate::pricing::remaining_stock;
use crate::types::{CartItem, Product, ViewMode};

/// Sentinel shown instead of a price when nothing is left to sell.
pub const SOLD_OUT: &str = "SOLD OUT";

/// Leading glyph used in the customer view.
pub const CURRENCY_GLYPH: &str = "₩";

/// Trailing unit word used in the admin view.
pub const CURRENCY_UNIT: &str = "원";

/// Currency markers for the two views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyStyle<'a> {
    /// Prefix in the customer view.
    pub glyph: &'a str,
    /// Suffix in the admin view.
    pub unit: &'a str,
}

impl CurrencyStyle<'static> {
    /// Won: `₩` prefix, `원` suffix.
    pub const WON: CurrencyStyle<'static> = CurrencyStyle {
        glyph: CURRENCY_GLYPH,
        unit: CURRENCY_UNIT,
    };
}

/// Product and cart against which stock is checked before formatting.
#[derive(Debug, Clone, Copy)]
pub struct StockContext<'a> {
    pub product: &'a Product,
    pub cart: &'a [CartItem],
}

/// Formats `price` for `mode`, or returns [`SOLD_OUT`] when a stock
/// context is supplied and its product has no remaining stock.
///
/// ## Example
/// ```rust
/// use storefront_core::format::{format_price, StockContext};
/// use storefront_core::{CartItem, Money, Product, ViewMode};
///
/// assert_eq!(format_price(Money::new(10_000), ViewMode::Customer, None), "₩10,000");
/// assert_eq!(format_price(Money::new(10_000), ViewMode::Admin, None), "10,000원");
///
/// let product = Product::new("p1", "Tumbler", 2_000, 5);
/// let cart = vec![CartItem::new(product.clone(), 5)];
/// let ctx = StockContext { product: &product, cart: &cart };
/// assert_eq!(format_price(product.price, ViewMode::Customer, Some(ctx)), "SOLD OUT");
/// ```
pub fn format_price(price: Money, mode: ViewMode, stock: Option<StockContext<'_>>) -> String {
    format_price_styled(price, mode, stock, CurrencyStyle::WON)
}

/// [`format_price`] with caller-supplied currency markers.
pub fn format_price_styled(
    price: Money,
    mode: ViewMode,
    stock: Option<StockContext<'_>>,
    style: CurrencyStyle<'_>,
) -> String {
    if let Some(ctx) = stock {
        if remaining_stock(ctx.product, ctx.cart) <= 0 {
            return SOLD_OUT.to_string();
        }
    }

    match mode {
        ViewMode::Admin => format!("{}{}", price.grouped(), style.unit),
        ViewMode::Customer => format!("{}{}", style.glyph, price.grouped()),
    }
}

/// Formats `price`, resolving the stock context by product id.
///
/// An id that is not in the catalog formats the price normally.
pub fn format_catalog_price(
    price: Money,
    mode: ViewMode,
    product_id: Option<&str>,
    catalog: &[Product],
    cart: &[CartItem],
) -> String {
    let stock = product_id
        .and_then(|id| catalog.iter().find(|product| product.id == id))
        .map(|product| StockContext { product, cart });

    format_price(price, mode, stock)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("p1", "Tumbler", 2_000, 5),
            Product::new("p2", "Mug", 12_500, 3),
        ]
    }

    #[test]
    fn test_format_modes() {
        let price = Money::new(1_234_567);
        assert_eq!(format_price(price, ViewMode::Customer, None), "₩1,234,567");
        assert_eq!(format_price(price, ViewMode::Admin, None), "1,234,567원");
        assert_eq!(format_price(Money::zero(), ViewMode::Customer, None), "₩0");
    }

    #[test]
    fn test_sold_out_when_cart_holds_all_stock() {
        let catalog = catalog();
        let cart = vec![CartItem::new(catalog[0].clone(), 5)];

        let text = format_catalog_price(
            catalog[0].price,
            ViewMode::Customer,
            Some("p1"),
            &catalog,
            &cart,
        );
        assert_eq!(text, SOLD_OUT);

        // Admin view gets the same sentinel
        let text = format_catalog_price(
            catalog[0].price,
            ViewMode::Admin,
            Some("p1"),
            &catalog,
            &cart,
        );
        assert_eq!(text, SOLD_OUT);
    }

    #[test]
    fn test_sold_out_ignores_price() {
        let product = Product::new("p3", "Gone", 99_000, 0);
        let ctx = StockContext {
            product: &product,
            cart: &[],
        };
        assert_eq!(format_price(Money::new(1), ViewMode::Admin, Some(ctx)), SOLD_OUT);
    }

    #[test]
    fn test_in_stock_product_formats_price() {
        let catalog = catalog();
        let cart = vec![CartItem::new(catalog[1].clone(), 2)];

        let text = format_catalog_price(
            catalog[1].price,
            ViewMode::Customer,
            Some("p2"),
            &catalog,
            &cart,
        );
        assert_eq!(text, "₩12,500");
    }

    #[test]
    fn test_custom_style() {
        let style = CurrencyStyle { glyph: "KRW ", unit: " KRW" };
        let price = Money::new(45_000);
        assert_eq!(format_price_styled(price, ViewMode::Customer, None, style), "KRW 45,000");
        assert_eq!(format_price_styled(price, ViewMode::Admin, None, style), "45,000 KRW");
    }

    #[test]
    fn test_unknown_or_missing_id_formats_price() {
        let catalog = catalog();
        let text = format_catalog_price(
            Money::new(3_000),
            ViewMode::Admin,
            Some("zzz"),
            &catalog,
            &[],
        );
        assert_eq!(text, "3,000원");

        let text = format_catalog_price(Money::new(3_000), ViewMode::Customer, None, &catalog, &[]);
        assert_eq!(text, "₩3,000");
    }
}
