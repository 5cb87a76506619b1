//! # Product Commands
//!
//! Catalog listing for both views and the catalog admin operations.
//!
//! ## Listing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list_products(term, mode)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  filter_products(catalog, term)  ← name or description, ignoring case   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  per product: remaining stock, badge, formatted price                   │
//! │       │          "₩10,000" | "10,000원" | "SOLD OUT"                    │
//! │       ▼                                                                 │
//! │  Vec<ProductView>                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Admin mutations persist the catalog after every successful change.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use storefront_core::format::StockContext;
use storefront_core::pricing::{remaining_stock, stock_status, StockStatus};
use storefront_core::{DiscountTier, Product, ViewMode};

use crate::commands::report;
use crate::error::{ApiError, ApiResult};
use crate::state::{ConfigState, DbState, NotificationState, StoreState};

/// A catalog entry as a view renders it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,

    /// Formatted price, or "SOLD OUT"
    pub display_price: String,

    /// Warehouse stock minus the cart; may be negative
    pub remaining_stock: i64,

    pub stock_status: StockStatus,
}

/// Input for a new product. The id is generated.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    pub stock: i64,
    #[serde(default)]
    pub discounts: Vec<DiscountTier>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_recommended: bool,
}

impl NewProduct {
    fn into_product(self, id: String) -> Product {
        let mut product = Product::new(id, self.name, self.price, self.stock)
            .with_discounts(self.discounts);
        product.description = self.description.filter(|d| !d.trim().is_empty());
        product.is_recommended = self.is_recommended;
        product
    }
}

/// Helper to generate a new product ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

/// Lists the catalog, filtered by `term`, priced for `mode` (defaults to
/// the configured view).
pub fn list_products(
    store: &StoreState,
    config: &ConfigState,
    term: &str,
    mode: Option<ViewMode>,
) -> Vec<ProductView> {
    let mode = mode.unwrap_or(config.view_mode);
    debug!(term = %term, ?mode, "list_products command");

    store.with_store(|s| {
        let cart = s.cart();

        s.list_products(term)
            .into_iter()
            .map(|product| {
                let ctx = StockContext {
                    product: &product,
                    cart,
                };
                let display_price = config.format_price(product.price, mode, Some(ctx));
                let remaining = remaining_stock(&product, cart);
                let status = stock_status(&product, cart);

                ProductView {
                    product,
                    display_price,
                    remaining_stock: remaining,
                    stock_status: status,
                }
            })
            .collect()
    })
}

async fn save_products(db: &DbState, products: &[Product]) -> ApiResult<()> {
    db.collections().save_products(products).await?;
    Ok(())
}

/// Adds a product with a generated id.
pub async fn add_product(
    db: &DbState,
    store: &StoreState,
    notices: &NotificationState,
    input: NewProduct,
) -> ApiResult<Product> {
    debug!(name = %input.name, "add_product command");

    let result = async {
        let product = input.into_product(generate_product_id());

        let mut draft = store.begin().await;
        draft.add_product(product.clone())?;

        save_products(db, draft.products()).await?;
        draft.commit();
        Ok::<_, ApiError>(product)
    }
    .await;

    report(notices, result, |p| format!("Product '{}' added", p.name))
}

/// Replaces a product by id.
pub async fn update_product(
    db: &DbState,
    store: &StoreState,
    notices: &NotificationState,
    product: Product,
) -> ApiResult<Product> {
    debug!(id = %product.id, "update_product command");

    let result = async {
        let mut draft = store.begin().await;
        draft.update_product(product.clone())?;

        save_products(db, draft.products()).await?;
        draft.commit();
        Ok::<_, ApiError>(product)
    }
    .await;

    report(notices, result, |p| format!("Product '{}' updated", p.name))
}

/// Deletes a product; its cart line goes with it.
pub async fn delete_product(
    db: &DbState,
    store: &StoreState,
    notices: &NotificationState,
    product_id: &str,
) -> ApiResult<()> {
    debug!(id = %product_id, "delete_product command");

    let result = async {
        let mut draft = store.begin().await;
        let cart_changed = draft.delete_product(product_id)?;

        // Cart first: a cart line must never outlive its product on disk
        if cart_changed {
            db.collections().save_cart(draft.cart()).await?;
        }
        save_products(db, draft.products()).await?;
        draft.commit();
        Ok::<_, ApiError>(())
    }
    .await;

    report(notices, result, |_| "Product deleted".to_string())
}

/// Sets a product's warehouse stock (0..=9999).
pub async fn update_product_stock(
    db: &DbState,
    store: &StoreState,
    notices: &NotificationState,
    product_id: &str,
    stock: i64,
) -> ApiResult<()> {
    debug!(id = %product_id, stock, "update_product_stock command");

    let result = async {
        let mut draft = store.begin().await;
        draft.update_product_stock(product_id, stock)?;

        save_products(db, draft.products()).await?;
        draft.commit();
        Ok::<_, ApiError>(())
    }
    .await;

    report(notices, result, |_| "Stock updated".to_string())
}

/// Adds a quantity tier to a product.
pub async fn add_product_discount(
    db: &DbState,
    store: &StoreState,
    notices: &NotificationState,
    product_id: &str,
    tier: DiscountTier,
) -> ApiResult<Vec<DiscountTier>> {
    debug!(
        id = %product_id,
        quantity = tier.quantity,
        rate = tier.rate,
        "add_product_discount command"
    );

    let result = async {
        let mut draft = store.begin().await;
        draft.add_product_discount(product_id, tier)?;

        save_products(db, draft.products()).await?;
        let tiers = tiers_of(draft.products(), product_id);
        draft.commit();
        Ok::<_, ApiError>(tiers)
    }
    .await;

    report(notices, result, |_| "Discount added".to_string())
}

/// Removes the tier at `index` from a product.
pub async fn remove_product_discount(
    db: &DbState,
    store: &StoreState,
    notices: &NotificationState,
    product_id: &str,
    index: usize,
) -> ApiResult<Vec<DiscountTier>> {
    debug!(id = %product_id, index, "remove_product_discount command");

    let result = async {
        let mut draft = store.begin().await;
        draft.remove_product_discount(product_id, index)?;

        save_products(db, draft.products()).await?;
        let tiers = tiers_of(draft.products(), product_id);
        draft.commit();
        Ok::<_, ApiError>(tiers)
    }
    .await;

    report(notices, result, |_| "Discount removed".to_string())
}

fn tiers_of(products: &[Product], product_id: &str) -> Vec<DiscountTier> {
    products
        .iter()
        .find(|p| p.id == product_id)
        .map(|p| p.discounts.clone())
        .unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, get_cart, update_cart_item};
    use crate::commands::test_support::context;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_list_products_formats_per_view() {
        let (_db, store, _notices) = context().await;
        let config = ConfigState::default();

        let customer = list_products(&store, &config, "", Some(ViewMode::Customer));
        assert_eq!(customer.len(), 3);
        assert_eq!(customer[0].display_price, "₩10,000");

        let admin = list_products(&store, &config, "", Some(ViewMode::Admin));
        assert_eq!(admin[1].display_price, "20,000원");
    }

    #[tokio::test]
    async fn test_sold_out_listing() {
        let (db, store, notices) = context().await;
        let config = ConfigState::default();

        add_to_cart(&db, &store, &notices, "p1").await.unwrap();
        update_cart_item(&db, &store, &notices, "p1", 20).await.unwrap();

        let views = list_products(&store, &config, "", None);
        assert_eq!(views[0].display_price, "SOLD OUT");
        assert_eq!(views[0].remaining_stock, 0);
        assert_eq!(views[0].stock_status, StockStatus::SoldOut);
        assert_eq!(views[1].stock_status, StockStatus::Available(20));
    }

    #[tokio::test]
    async fn test_add_product_persists_with_generated_id() {
        let (db, store, notices) = context().await;

        let input = NewProduct {
            name: "Ceramic Kettle".to_string(),
            price: 45_000,
            stock: 3,
            discounts: vec![DiscountTier::new(2, 0.05)],
            description: Some("  ".to_string()),
            is_recommended: false,
        };
        let product = add_product(&db, &store, &notices, input).await.unwrap();

        assert!(!product.id.is_empty());
        assert!(product.description.is_none());

        let stored = db.collections().load_products().await.unwrap();
        assert_eq!(stored.len(), 4);
        assert_eq!(stored[3].id, product.id);
    }

    #[tokio::test]
    async fn test_add_invalid_product_is_rejected() {
        let (db, store, notices) = context().await;

        let input = NewProduct {
            name: "Too Many".to_string(),
            price: 1_000,
            stock: 10_000,
            discounts: Vec::new(),
            description: None,
            is_recommended: false,
        };
        let err = add_product(&db, &store, &notices, input).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(store.with_store(|s| s.products().len()), 3);
    }

    #[tokio::test]
    async fn test_delete_product_persists_cart() {
        let (db, store, notices) = context().await;

        add_to_cart(&db, &store, &notices, "p2").await.unwrap();
        delete_product(&db, &store, &notices, "p2").await.unwrap();

        assert!(get_cart(&store).items.is_empty());
        assert!(db.collections().load_cart().await.unwrap().is_empty());
        assert_eq!(db.collections().load_products().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_product_and_cart_line() {
        let (db, store, notices) = context().await;

        add_to_cart(&db, &store, &notices, "p2").await.unwrap();
        db.inner().close().await;

        let err = delete_product(&db, &store, &notices, "p2").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        assert_eq!(store.with_store(|s| s.products().len()), 3);
        assert_eq!(get_cart(&store).item_count, 1);

        let err = update_product_stock(&db, &store, &notices, "p2", 7)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(store.with_store(|s| s.products()[1].stock), 20);
    }

    #[tokio::test]
    async fn test_discount_admin() {
        let (db, store, notices) = context().await;

        let tiers = add_product_discount(&db, &store, &notices, "p2", DiscountTier::new(30, 0.3))
            .await
            .unwrap();
        assert_eq!(tiers.len(), 2);

        let tiers = remove_product_discount(&db, &store, &notices, "p2", 0)
            .await
            .unwrap();
        assert_eq!(tiers, vec![DiscountTier::new(30, 0.3)]);

        let stored = db.collections().load_products().await.unwrap();
        assert_eq!(stored[1].discounts, tiers);
    }

    #[tokio::test]
    async fn test_update_stock_and_product() {
        let (db, store, notices) = context().await;

        update_product_stock(&db, &store, &notices, "p3", 0).await.unwrap();

        let mut product = store.with_store(|s| s.products()[2].clone());
        assert_eq!(product.stock, 0);

        product.name = "Product 3 (restocking)".to_string();
        update_product(&db, &store, &notices, product).await.unwrap();

        let stored = db.collections().load_products().await.unwrap();
        assert_eq!(stored[2].name, "Product 3 (restocking)");
        assert_eq!(stored[2].stock, 0);

        let err = update_product_stock(&db, &store, &notices, "p3", -1)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
