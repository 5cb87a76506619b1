//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOREFRONT_*`)
//! 2. Defaults (this file)
//!
//! Read-only after initialization, so no mutex.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use storefront_core::format::{format_price_styled, CurrencyStyle, StockContext};
use storefront_core::format::{CURRENCY_GLYPH, CURRENCY_UNIT};
use storefront_core::{Money, ViewMode};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Database file. `None` resolves to the platform data directory.
    pub db_path: Option<PathBuf>,

    /// View the storefront opens in
    pub view_mode: ViewMode,

    /// Prefix for customer-facing prices
    pub currency_glyph: String,

    /// Suffix for admin prices
    pub currency_unit: String,

    /// Store name (page header)
    pub store_name: String,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Database: platform data directory
    /// - View: customer
    /// - Currency: `₩` / `원`
    fn default() -> Self {
        ConfigState {
            db_path: None,
            view_mode: ViewMode::Customer,
            currency_glyph: CURRENCY_GLYPH.to_string(),
            currency_unit: CURRENCY_UNIT.to_string(),
            store_name: "Storefront".to_string(),
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_DB_PATH`: database file
    /// - `STOREFRONT_STORE_NAME`: store name
    /// - `STOREFRONT_VIEW_MODE`: `customer` or `admin` (anything else ignored)
    pub fn from_env() -> Self {
        let mut config = ConfigState::default();

        if let Ok(path) = std::env::var("STOREFRONT_DB_PATH") {
            config.db_path = Some(PathBuf::from(path));
        }

        if let Ok(store_name) = std::env::var("STOREFRONT_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Ok(mode) = std::env::var("STOREFRONT_VIEW_MODE") {
            if let Some(mode) = parse_view_mode(&mode) {
                config.view_mode = mode;
            }
        }

        config
    }

    /// Configured currency markers.
    pub fn currency_style(&self) -> CurrencyStyle<'_> {
        CurrencyStyle {
            glyph: &self.currency_glyph,
            unit: &self.currency_unit,
        }
    }

    /// Formats a price with the configured currency markers.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_price(Money::new(1234), ViewMode::Admin, None), "1,234원");
    /// ```
    pub fn format_price(
        &self,
        price: Money,
        mode: ViewMode,
        stock: Option<StockContext<'_>>,
    ) -> String {
        format_price_styled(price, mode, stock, self.currency_style())
    }
}

fn parse_view_mode(value: &str) -> Option<ViewMode> {
    match value.trim().to_ascii_lowercase().as_str() {
        "customer" => Some(ViewMode::Customer),
        "admin" => Some(ViewMode::Admin),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{CartItem, Product};

    #[test]
    fn test_format_price_defaults() {
        let config = ConfigState::default();
        let price = Money::new(1_234);
        assert_eq!(config.format_price(price, ViewMode::Customer, None), "₩1,234");
        assert_eq!(config.format_price(price, ViewMode::Admin, None), "1,234원");
    }

    #[test]
    fn test_format_price_sold_out() {
        let config = ConfigState::default();
        let product = Product::new("p1", "Mug", 1_000, 1);
        let cart = vec![CartItem::new(product.clone(), 1)];
        let ctx = StockContext {
            product: &product,
            cart: &cart,
        };

        assert_eq!(config.format_price(product.price, ViewMode::Admin, Some(ctx)), "SOLD OUT");
    }

    #[test]
    fn test_parse_view_mode() {
        assert_eq!(parse_view_mode("admin"), Some(ViewMode::Admin));
        assert_eq!(parse_view_mode(" Customer "), Some(ViewMode::Customer));
        assert_eq!(parse_view_mode("kiosk"), None);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ConfigState::default()).unwrap();
        assert_eq!(json["viewMode"], "customer");
        assert_eq!(json["currencyGlyph"], "₩");
        assert_eq!(json["currencyUnit"], "원");
        assert!(json["dbPath"].is_null());
    }
}
