//! # Cart Commands
//!
//! Cart manipulation, coupon selection and checkout.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐        │
//! │  │  Empty   │────►│ In Cart  │────►│  Coupon  │────►│  Order   │        │
//! │  │  Cart    │     │          │     │ selected │     │ complete │        │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘        │
//! │       ▲                │                                  │             │
//! │       │           add_to_cart                       complete_order      │
//! │       │           update_cart_item                        │             │
//! │       │           remove_from_cart                        │             │
//! │       └───────────────────────────────────────────────────┘             │
//! │                 (cart and coupon selection cleared)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use storefront_core::pricing::{cart_item_count, CartLine};
use storefront_core::{CartItem, CartTotals, Coupon, Money};

use crate::commands::report;
use crate::error::{ApiError, ApiResult};
use crate::state::{DbState, NotificationKind, NotificationState, Store, StoreState};

/// Cart response including lines and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub savings: Money,

    /// Units across all lines (header badge)
    pub item_count: i64,
    pub selected_coupon: Option<Coupon>,
}

impl From<&Store> for CartResponse {
    fn from(store: &Store) -> Self {
        let totals = store.totals();

        CartResponse {
            items: store.cart().to_vec(),
            lines: store.lines(),
            totals,
            savings: totals.savings(),
            item_count: cart_item_count(store.cart()),
            selected_coupon: store.selected_coupon().cloned(),
        }
    }
}

/// Result of a checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    /// `ORD-<millis>`
    pub order_number: String,
    pub totals: CartTotals,
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │  CART                                              11 items    │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Product 1      x10   −15%        ₩100,000 → ₩85,000           │
/// │  Product 2      x1                ₩20,000                      │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Coupon: 5,000 won off (AMOUNT5000)                            │
/// │  Total before discount            ₩120,000                     │
/// │  Total                            ₩95,000                      │
/// └────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(store: &StoreState) -> CartResponse {
    debug!("get_cart command");
    store.with_store(|s| CartResponse::from(s))
}

async fn save_cart(db: &DbState, cart: &[CartItem]) -> ApiResult<()> {
    db.collections().save_cart(cart).await?;
    Ok(())
}

/// Adds one unit of a product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity + 1
/// - Otherwise: new line with quantity 1
/// - Rejected when nothing is left or the warehouse stock would be exceeded
pub async fn add_to_cart(
    db: &DbState,
    store: &StoreState,
    notices: &NotificationState,
    product_id: &str,
) -> ApiResult<CartResponse> {
    debug!(product_id = %product_id, "add_to_cart command");

    let result = async {
        let mut draft = store.begin().await;
        draft.add_to_cart(product_id)?;

        save_cart(db, draft.cart()).await?;
        draft.commit();
        Ok::<_, ApiError>(get_cart(store))
    }
    .await;

    report(notices, result, |_| "Added to cart".to_string())
}

/// Sets the quantity of a line.
///
/// ## Behavior
/// - Quantity ≤ 0: removes the line
/// - Quantity > warehouse stock: rejected
pub async fn update_cart_item(
    db: &DbState,
    store: &StoreState,
    notices: &NotificationState,
    product_id: &str,
    quantity: i64,
) -> ApiResult<CartResponse> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    let result = async {
        let mut draft = store.begin().await;
        draft.update_cart_item(product_id, quantity)?;

        save_cart(db, draft.cart()).await?;
        draft.commit();
        Ok::<_, ApiError>(get_cart(store))
    }
    .await;

    report(notices, result, |_| "Cart updated".to_string())
}

/// Removes a line from the cart.
pub async fn remove_from_cart(
    db: &DbState,
    store: &StoreState,
    notices: &NotificationState,
    product_id: &str,
) -> ApiResult<CartResponse> {
    debug!(product_id = %product_id, "remove_from_cart command");

    let result = async {
        let mut draft = store.begin().await;
        draft.remove_from_cart(product_id)?;

        save_cart(db, draft.cart()).await?;
        draft.commit();
        Ok::<_, ApiError>(get_cart(store))
    }
    .await;

    report(notices, result, |_| "Removed from cart".to_string())
}

/// Selects a coupon for the cart.
///
/// Percentage coupons need a pre-coupon total of at least 10,000; on
/// rejection the previous selection stays. The selection is not persisted.
pub async fn apply_coupon(
    store: &StoreState,
    notices: &NotificationState,
    code: &str,
) -> ApiResult<CartResponse> {
    debug!(code = %code, "apply_coupon command");

    let result = async {
        let mut draft = store.begin().await;
        draft.apply_coupon(code)?;

        let response = CartResponse::from(&*draft);
        draft.commit();
        Ok::<_, ApiError>(response)
    }
    .await;

    report(notices, result, |_| "Coupon applied".to_string())
}

/// Deselects the current coupon.
pub async fn clear_coupon(store: &StoreState, notices: &NotificationState) -> CartResponse {
    debug!("clear_coupon command");

    let mut draft = store.begin().await;
    draft.clear_coupon();

    let response = CartResponse::from(&*draft);
    draft.commit();

    notices.push("Coupon removed", NotificationKind::Success);
    response
}

/// Completes the order.
///
/// No payment happens: the cart and the coupon selection are cleared and
/// an order number is issued.
pub async fn complete_order(
    db: &DbState,
    store: &StoreState,
    notices: &NotificationState,
) -> ApiResult<OrderReceipt> {
    debug!("complete_order command");

    let result = async {
        let now = chrono::Utc::now().timestamp_millis();
        let mut draft = store.begin().await;
        let (order_number, totals) = draft.complete_order(now)?;

        save_cart(db, draft.cart()).await?;
        draft.commit();

        info!(
            order_number = %order_number,
            total = totals.total_after_discount.amount(),
            "Order completed"
        );

        Ok::<_, ApiError>(OrderReceipt {
            order_number,
            totals,
        })
    }
    .await;

    report(notices, result, |receipt| {
        format!("Order completed. Order number: {}", receipt.order_number)
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_add_to_cart_persists() {
        let (db, store, notices) = context().await;

        let cart = add_to_cart(&db, &store, &notices, "p1").await.unwrap();
        assert_eq!(cart.item_count, 1);
        assert_eq!(cart.totals.total_after_discount, Money::new(10_000));

        let stored = db.collections().load_cart().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].product.id, "p1");

        let latest = notices.latest().unwrap();
        assert_eq!(latest.kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_out_of_stock_notifies_error() {
        let (db, store, notices) = context().await;

        add_to_cart(&db, &store, &notices, "p1").await.unwrap();
        update_cart_item(&db, &store, &notices, "p1", 20).await.unwrap();

        let err = add_to_cart(&db, &store, &notices, "p1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InsufficientStock);
        assert_eq!(notices.latest().unwrap().kind, NotificationKind::Error);
        assert_eq!(get_cart(&store).item_count, 20);
    }

    /// 10 units of p1 (tiers 10%/20%) plus bulk bonus: 100,000 → 85,000.
    #[tokio::test]
    async fn test_bulk_purchase_totals() {
        let (db, store, notices) = context().await;

        add_to_cart(&db, &store, &notices, "p1").await.unwrap();
        let cart = update_cart_item(&db, &store, &notices, "p1", 10).await.unwrap();

        assert_eq!(cart.totals.total_before_discount, Money::new(100_000));
        assert_eq!(cart.totals.total_after_discount, Money::new(85_000));
        assert_eq!(cart.lines[0].discount_percent(), 15);
        assert_eq!(cart.savings, Money::new(15_000));
    }

    #[tokio::test]
    async fn test_percentage_coupon_below_minimum_is_rejected() {
        let (db, store, notices) = context().await;

        // 5,000-won product so the pre-coupon total stays under 10,000
        store.with_store_mut(|s| {
            s.add_product(storefront_core::Product::new("cheap", "Sticker", 5_000, 10))
        })
        .unwrap();
        add_to_cart(&db, &store, &notices, "cheap").await.unwrap();

        let err = apply_coupon(&store, &notices, "PERCENT10").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CouponNotApplicable);
        assert_eq!(notices.latest().unwrap().kind, NotificationKind::Error);
        assert!(get_cart(&store).selected_coupon.is_none());
    }

    #[tokio::test]
    async fn test_complete_order_clears_everything() {
        let (db, store, notices) = context().await;

        add_to_cart(&db, &store, &notices, "p2").await.unwrap();
        apply_coupon(&store, &notices, "PERCENT10").await.unwrap();

        let receipt = complete_order(&db, &store, &notices).await.unwrap();
        assert!(receipt.order_number.starts_with("ORD-"));
        assert_eq!(receipt.totals.total_after_discount, Money::new(18_000));

        let cart = get_cart(&store);
        assert!(cart.items.is_empty());
        assert!(cart.selected_coupon.is_none());

        // Empty cart is removed from storage, not stored as []
        assert!(!db.inner().kv().contains("cart").await.unwrap());
        assert!(notices
            .latest()
            .unwrap()
            .message
            .contains(&receipt.order_number));
    }

    #[tokio::test]
    async fn test_checkout_on_empty_cart() {
        let (db, store, notices) = context().await;

        let err = complete_order(&db, &store, &notices).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[tokio::test]
    async fn test_clear_coupon() {
        let (db, store, notices) = context().await;

        add_to_cart(&db, &store, &notices, "p3").await.unwrap();
        let cart = apply_coupon(&store, &notices, "AMOUNT5000").await.unwrap();
        assert_eq!(cart.totals.total_after_discount, Money::new(25_000));

        let cart = clear_coupon(&store, &notices).await;
        assert_eq!(cart.totals.total_after_discount, Money::new(30_000));
    }

    #[tokio::test]
    async fn test_failed_save_leaves_cart_unchanged() {
        let (db, store, notices) = context().await;
        db.inner().close().await;

        let err = add_to_cart(&db, &store, &notices, "p1").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);

        assert_eq!(get_cart(&store).item_count, 0);
        let latest = notices.latest().unwrap();
        assert_eq!(latest.kind, NotificationKind::Error);
        assert_eq!(latest.message, "Database connection failed");
    }

    #[tokio::test]
    async fn test_failed_checkout_keeps_cart_and_coupon() {
        let (db, store, notices) = context().await;

        add_to_cart(&db, &store, &notices, "p2").await.unwrap();
        update_cart_item(&db, &store, &notices, "p2", 2).await.unwrap();
        apply_coupon(&store, &notices, "AMOUNT5000").await.unwrap();
        db.inner().close().await;

        assert!(update_cart_item(&db, &store, &notices, "p2", 5).await.is_err());
        assert!(complete_order(&db, &store, &notices).await.is_err());

        let cart = get_cart(&store);
        assert_eq!(cart.item_count, 2);
        assert_eq!(cart.selected_coupon.unwrap().code, "AMOUNT5000");
        assert_eq!(cart.totals.total_after_discount, Money::new(35_000));
    }
}
