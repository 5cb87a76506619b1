//! # Store State
//!
//! The single owner of the catalog, the cart, the coupon registry and the
//! selected coupon.
//!
//! ## Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Operations                                     │
//! │                                                                         │
//! │  Shopper                    Store method              Persisted         │
//! │  ───────                    ────────────              ─────────         │
//! │  Click "add"      ────────► add_to_cart()       ────► cart              │
//! │  Change quantity  ────────► update_cart_item()  ────► cart              │
//! │  Pick coupon      ────────► apply_coupon()      ────► (in memory only)  │
//! │  Checkout         ────────► complete_order()    ────► cart (removed)    │
//! │                                                                         │
//! │  Admin                                                                  │
//! │  ─────                                                                  │
//! │  Product form     ────────► add/update/delete   ────► products (+ cart) │
//! │  Coupon form      ────────► add/delete_coupon   ────► coupons           │
//! │                                                                         │
//! │  Every method validates first and leaves state untouched on error.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are never cached; [`Store::totals`] recomputes from the current
//! cart and selected coupon on every call.

use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, PoisonError};

use storefront_core::coupon::{ensure_coupon_applicable, ensure_unique_code, find_coupon};
use storefront_core::pricing::{cart_totals, price_cart, remaining_stock, CartLine};
use storefront_core::search::{filter_products, find_product};
use storefront_core::validation::{
    validate_coupon, validate_discount_tier, validate_product, validate_stock,
};
use storefront_core::{
    CartItem, CartTotals, CoreError, CoreResult, Coupon, DiscountTier, Product, ValidationError,
};
use storefront_db::StoredCollections;

// =============================================================================
// Store
// =============================================================================

/// Catalog, cart and coupons for one storefront session.
///
/// ## Invariants
/// - At most one cart line per product id
/// - Every cart quantity is ≥ 1
/// - Coupon codes are unique
/// - The selected coupon, if any, is registered
#[derive(Debug, Clone, Default)]
pub struct Store {
    products: Vec<Product>,
    cart: Vec<CartItem>,
    coupons: Vec<Coupon>,
    selected_coupon: Option<Coupon>,
}

impl Store {
    /// Creates a store from loaded collections. No coupon is selected.
    pub fn new(products: Vec<Product>, cart: Vec<CartItem>, coupons: Vec<Coupon>) -> Self {
        Store {
            products,
            cart,
            coupons,
            selected_coupon: None,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    pub fn selected_coupon(&self) -> Option<&Coupon> {
        self.selected_coupon.as_ref()
    }

    /// Totals with the selected coupon applied.
    pub fn totals(&self) -> CartTotals {
        cart_totals(&self.cart, self.selected_coupon.as_ref())
    }

    /// Priced cart lines.
    pub fn lines(&self) -> Vec<CartLine> {
        price_cart(&self.cart)
    }

    fn product(&self, id: &str) -> CoreResult<&Product> {
        find_product(&self.products, id).ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    fn product_mut(&mut self, id: &str) -> CoreResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()))
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds one unit of a catalog product. Returns the line's new quantity.
    ///
    /// ## Rejections
    /// - remaining stock ≤ 0
    /// - resulting quantity > warehouse stock
    pub fn add_to_cart(&mut self, product_id: &str) -> CoreResult<i64> {
        let product = self.product(product_id)?.clone();

        let remaining = remaining_stock(&product, &self.cart);
        if remaining <= 0 {
            return Err(CoreError::InsufficientStock {
                product_id: product.id,
                available: remaining.max(0),
                requested: 1,
            });
        }

        if let Some(item) = self.cart.iter_mut().find(|i| i.product.id == product.id) {
            let new_quantity = item.quantity + 1;
            if new_quantity > product.stock {
                return Err(CoreError::InsufficientStock {
                    product_id: product.id,
                    available: product.stock,
                    requested: new_quantity,
                });
            }
            item.quantity = new_quantity;
            return Ok(new_quantity);
        }

        self.cart.push(CartItem::new(product, 1));
        Ok(1)
    }

    /// Sets a line's quantity. Zero or less removes the line.
    pub fn update_cart_item(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_from_cart(product_id);
        }

        let stock = self.product(product_id)?.stock;

        let item = self
            .cart
            .iter_mut()
            .find(|i| i.product.id == product_id)
            .ok_or_else(|| CoreError::ItemNotInCart(product_id.to_string()))?;

        if quantity > stock {
            return Err(CoreError::InsufficientStock {
                product_id: product_id.to_string(),
                available: stock,
                requested: quantity,
            });
        }

        item.quantity = quantity;
        Ok(())
    }

    /// Removes a product's line.
    pub fn remove_from_cart(&mut self, product_id: &str) -> CoreResult<()> {
        let before = self.cart.len();
        self.cart.retain(|i| i.product.id != product_id);

        if self.cart.len() == before {
            return Err(CoreError::ItemNotInCart(product_id.to_string()));
        }

        Ok(())
    }

    /// Selects a coupon after checking it against the pre-coupon total.
    ///
    /// On rejection the previous selection stays.
    pub fn apply_coupon(&mut self, code: &str) -> CoreResult<Coupon> {
        let coupon = find_coupon(&self.coupons, code)
            .cloned()
            .ok_or_else(|| CoreError::CouponNotFound(code.to_string()))?;

        let current = cart_totals(&self.cart, None).total_after_discount;
        ensure_coupon_applicable(&coupon, current)?;

        self.selected_coupon = Some(coupon.clone());
        Ok(coupon)
    }

    /// Deselects the coupon, returning it.
    pub fn clear_coupon(&mut self) -> Option<Coupon> {
        self.selected_coupon.take()
    }

    /// Checks out: returns `ORD-<millis>` and empties the cart and the
    /// coupon selection.
    pub fn complete_order(&mut self, now_millis: i64) -> CoreResult<(String, CartTotals)> {
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let totals = self.totals();
        self.cart.clear();
        self.selected_coupon = None;

        Ok((format!("ORD-{}", now_millis), totals))
    }

    // =========================================================================
    // Catalog Admin
    // =========================================================================

    /// Catalog entries matching `term` (all of them when blank).
    pub fn list_products(&self, term: &str) -> Vec<Product> {
        filter_products(&self.products, term)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Adds a product. Ids must be unique.
    pub fn add_product(&mut self, product: Product) -> CoreResult<()> {
        validate_product(&product)?;

        if find_product(&self.products, &product.id).is_some() {
            return Err(ValidationError::Duplicate {
                field: "product id".to_string(),
                value: product.id,
            }
            .into());
        }

        self.products.push(product);
        Ok(())
    }

    /// Replaces a product by id. Cart lines keep their snapshot.
    pub fn update_product(&mut self, product: Product) -> CoreResult<()> {
        validate_product(&product)?;

        let slot = self.product_mut(&product.id)?;
        *slot = product;
        Ok(())
    }

    /// Deletes a product and its cart line. Returns whether the cart changed.
    pub fn delete_product(&mut self, product_id: &str) -> CoreResult<bool> {
        let before = self.products.len();
        self.products.retain(|p| p.id != product_id);

        if self.products.len() == before {
            return Err(CoreError::ProductNotFound(product_id.to_string()));
        }

        let cart_before = self.cart.len();
        self.cart.retain(|i| i.product.id != product_id);
        Ok(self.cart.len() != cart_before)
    }

    /// Sets warehouse stock. The cart is left alone, so remaining stock may
    /// go negative.
    pub fn update_product_stock(&mut self, product_id: &str, stock: i64) -> CoreResult<()> {
        validate_stock(stock)?;
        self.product_mut(product_id)?.stock = stock;
        Ok(())
    }

    /// Appends a quantity tier.
    pub fn add_product_discount(&mut self, product_id: &str, tier: DiscountTier) -> CoreResult<()> {
        validate_discount_tier(&tier)?;

        let product = self.product_mut(product_id)?;
        if product.discounts.iter().any(|t| t.quantity == tier.quantity) {
            return Err(ValidationError::Duplicate {
                field: "discount quantity".to_string(),
                value: tier.quantity.to_string(),
            }
            .into());
        }

        product.discounts.push(tier);
        Ok(())
    }

    /// Removes the tier at `index`, returning it.
    pub fn remove_product_discount(
        &mut self,
        product_id: &str,
        index: usize,
    ) -> CoreResult<DiscountTier> {
        let product = self.product_mut(product_id)?;

        if index >= product.discounts.len() {
            return Err(ValidationError::InvalidFormat {
                field: "discount index".to_string(),
                reason: format!("no tier at index {}", index),
            }
            .into());
        }

        Ok(product.discounts.remove(index))
    }

    // =========================================================================
    // Coupon Admin
    // =========================================================================

    /// Registers a coupon.
    pub fn add_coupon(&mut self, coupon: Coupon) -> CoreResult<()> {
        validate_coupon(&coupon)?;
        ensure_unique_code(&self.coupons, &coupon)?;

        self.coupons.push(coupon);
        Ok(())
    }

    /// Deletes a coupon, deselecting it if selected.
    pub fn delete_coupon(&mut self, code: &str) -> CoreResult<()> {
        let before = self.coupons.len();
        self.coupons.retain(|c| c.code != code);

        if self.coupons.len() == before {
            return Err(CoreError::CouponNotFound(code.to_string()));
        }

        if self.selected_coupon.as_ref().is_some_and(|c| c.code == code) {
            self.selected_coupon = None;
        }

        Ok(())
    }
}

impl From<StoredCollections> for Store {
    fn from(stored: StoredCollections) -> Self {
        Store::new(stored.products, stored.cart, stored.coupons)
    }
}

// =============================================================================
// Store State
// =============================================================================

/// Shared store handle.
///
/// ## Writes
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  let mut draft = store.begin().await;   one writer at a time            │
/// │  draft.add_to_cart(id)?;                 mutate a copy                  │
/// │  db.collections().save_cart(..).await?;  persist the copy               │
/// │  draft.commit();                         publish                        │
/// │                                                                         │
/// │  An early return drops the draft: memory and disk both keep the old     │
/// │  state. Readers see the old store until commit.                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    store: Arc<Mutex<Store>>,
    writer: Arc<tokio::sync::Mutex<()>>,
}

impl StoreState {
    /// Wraps a store.
    pub fn new(store: Store) -> Self {
        StoreState {
            store: Arc::new(Mutex::new(store)),
            writer: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = store_state.with_store(|s| s.totals());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Store) -> R,
    {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Executes a function with write access to the store, bypassing the
    /// writer queue. Commands go through [`StoreState::begin`].
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Store) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }

    /// Waits for the writer slot and returns a copy of the store to mutate.
    pub async fn begin(&self) -> StoreDraft<'_> {
        let gate = self.writer.lock().await;
        let draft = self.with_store(Store::clone);

        StoreDraft {
            state: self,
            draft,
            _gate: gate,
        }
    }
}

/// A pending change to the store. Dropping it discards the change.
pub struct StoreDraft<'a> {
    state: &'a StoreState,
    draft: Store,
    _gate: tokio::sync::MutexGuard<'a, ()>,
}

impl StoreDraft<'_> {
    /// Publishes the draft and releases the writer slot.
    pub fn commit(self) {
        let StoreDraft { state, draft, _gate } = self;
        state.with_store_mut(|s| *s = draft);
    }
}

impl Deref for StoreDraft<'_> {
    type Target = Store;

    fn deref(&self) -> &Store {
        &self.draft
    }
}

impl DerefMut for StoreDraft<'_> {
    fn deref_mut(&mut self) -> &mut Store {
        &mut self.draft
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
