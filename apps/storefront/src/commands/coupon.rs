//! # Coupon Commands
//!
//! Coupon registry admin. Selecting a coupon for the cart lives in
//! [`crate::commands::cart::apply_coupon`].

use tracing::debug;

use storefront_core::Coupon;

use crate::commands::report;
use crate::error::{ApiError, ApiResult};
use crate::state::{DbState, NotificationState, StoreState};

/// Lists registered coupons.
pub fn list_coupons(store: &StoreState) -> Vec<Coupon> {
    debug!("list_coupons command");
    store.with_store(|s| s.coupons().to_vec())
}

async fn save_coupons(db: &DbState, coupons: &[Coupon]) -> ApiResult<()> {
    db.collections().save_coupons(coupons).await?;
    Ok(())
}

/// Registers a coupon.
///
/// ## Rejections
/// - blank name or code, value out of range → validation error
/// - code already registered (case-sensitive) → warning, registry unchanged
pub async fn add_coupon(
    db: &DbState,
    store: &StoreState,
    notices: &NotificationState,
    coupon: Coupon,
) -> ApiResult<Vec<Coupon>> {
    debug!(code = %coupon.code, "add_coupon command");

    let result = async {
        let mut draft = store.begin().await;
        draft.add_coupon(coupon)?;

        save_coupons(db, draft.coupons()).await?;
        let coupons = draft.coupons().to_vec();
        draft.commit();
        Ok::<_, ApiError>(coupons)
    }
    .await;

    report(notices, result, |_| "Coupon added".to_string())
}

/// Deletes a coupon; if it was selected, the selection is cleared.
pub async fn delete_coupon(
    db: &DbState,
    store: &StoreState,
    notices: &NotificationState,
    code: &str,
) -> ApiResult<Vec<Coupon>> {
    debug!(code = %code, "delete_coupon command");

    let result = async {
        let mut draft = store.begin().await;
        draft.delete_coupon(code)?;

        save_coupons(db, draft.coupons()).await?;
        let coupons = draft.coupons().to_vec();
        draft.commit();
        Ok::<_, ApiError>(coupons)
    }
    .await;

    report(notices, result, |_| "Coupon deleted".to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, apply_coupon, get_cart};
    use crate::commands::test_support::context;
    use crate::error::ErrorCode;
    use crate::state::NotificationKind;
    use storefront_core::defaults::default_coupons;

    #[tokio::test]
    async fn test_add_coupon_persists() {
        let (db, store, notices) = context().await;

        let spring = Coupon::percentage("Spring", "SPRING20", 20);
        let coupons = add_coupon(&db, &store, &notices, spring).await.unwrap();
        assert_eq!(coupons.len(), 3);

        let stored = db.collections().load_coupons().await.unwrap();
        assert_eq!(stored, coupons);
    }

    #[tokio::test]
    async fn test_duplicate_code_warns_and_changes_nothing() {
        let (db, store, notices) = context().await;

        let err = add_coupon(&db, &store, &notices, Coupon::amount("Another", "AMOUNT5000", 1_000))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::DuplicateCoupon);
        assert_eq!(notices.latest().unwrap().kind, NotificationKind::Warning);
        assert_eq!(list_coupons(&store), default_coupons());
        assert!(!db.inner().kv().contains("coupons").await.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_coupon_is_rejected() {
        let (db, store, notices) = context().await;

        let err = add_coupon(&db, &store, &notices, Coupon::percentage("Too much", "MORE", 150))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(notices.latest().unwrap().kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_delete_selected_coupon() {
        let (db, store, notices) = context().await;

        add_to_cart(&db, &store, &notices, "p1").await.unwrap();
        apply_coupon(&store, &notices, "AMOUNT5000").await.unwrap();

        let coupons = delete_coupon(&db, &store, &notices, "AMOUNT5000").await.unwrap();
        assert_eq!(coupons.len(), 1);
        assert!(get_cart(&store).selected_coupon.is_none());

        let err = delete_coupon(&db, &store, &notices, "AMOUNT5000").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_registry() {
        let (db, store, notices) = context().await;
        db.inner().close().await;

        let err = add_coupon(&db, &store, &notices, Coupon::amount("Extra", "EXTRA1000", 1_000))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(list_coupons(&store), default_coupons());

        assert!(delete_coupon(&db, &store, &notices, "PERCENT10").await.is_err());
        assert_eq!(list_coupons(&store).len(), 2);
    }
}
