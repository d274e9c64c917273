//! # Storefront Container
//!
//! The one object that owns every store. It is built once at startup and
//! handed explicitly to whatever needs it; there is no global instance.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UI action                                                              │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  Storefront::add_to_cart(...)                                           │
//! │     │                                                                   │
//! │     ├── 1. cart.add_item(...)           in-memory mutation              │
//! │     │                                                                   │
//! │     ├── 2. encode(cart lines)           full collection, JSON           │
//! │     │                                                                   │
//! │     └── 3. sink.write(Cart, payload)    observer, fire-and-forget       │
//! │               │                                                         │
//! │               └── Err? ──► warn!(...)   in-memory state is kept         │
//! │                                                                         │
//! │  UI re-reads: storefront.cart(), storefront.cart_totals(zone), ...      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Mutations that change nothing (unknown id, missing cart line, clearing an
//! empty cart) skip the write and return `false`.
//!
//! ## Sharing
//! Several UI components can hold a [`SharedStorefront`] handle, which wraps
//! the container in `Arc<Mutex<_>>` and exposes closure-based access.

use std::fmt;
use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::cart::{Cart, VariationSelection};
use crate::catalog::{Catalog, CatalogQuery};
use crate::config::StoreConfig;
use crate::error::{CoreResult, PersistError, ValidationError};
use crate::money::Money;
use crate::orders::{DashboardStats, OrderHistory};
use crate::persistence::{encode, RecordKey, StateSink, StateSnapshot};
use crate::pricing::{self, CartTotals, CheckoutRequest, ResolvedLine, ShippingZone};
use crate::sample::sample_catalog;
use crate::session::Session;
use crate::types::{Order, Product, User};
use crate::wishlist::Wishlist;

// =============================================================================
// Storefront
// =============================================================================

/// All storefront state plus the sink that persists it.
pub struct Storefront {
    config: StoreConfig,
    catalog: Catalog,
    cart: Cart,
    wishlist: Wishlist,
    session: Session,
    orders: OrderHistory,
    sink: Arc<dyn StateSink>,
}

impl fmt::Debug for Storefront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storefront")
            .field("store_name", &self.config.store_name)
            .field("products", &self.catalog.len())
            .field("cart_lines", &self.cart.line_count())
            .field("wishlist", &self.wishlist.len())
            .field("signed_in", &self.session.is_signed_in())
            .field("orders", &self.orders.len())
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Builds the container from previously loaded records.
    ///
    /// ## Startup Rules
    /// - No products record and `seed_sample_catalog` on: the sample catalog
    ///   is loaded and written back immediately
    /// - Cart lines with duplicate identities are merged
    /// - Everything else is taken as stored
    pub fn open(config: StoreConfig, snapshot: StateSnapshot, sink: Arc<dyn StateSink>) -> Self {
        let seeded = snapshot.products.is_none() && config.seed_sample_catalog;
        let products = match snapshot.products {
            Some(products) => products,
            None if config.seed_sample_catalog => sample_catalog(),
            None => Vec::new(),
        };

        let storefront = Storefront {
            catalog: Catalog::from(products),
            cart: Cart::from(snapshot.cart),
            wishlist: Wishlist::from(snapshot.wishlist),
            session: Session::new(snapshot.user),
            orders: OrderHistory::from(snapshot.orders),
            config,
            sink,
        };

        if seeded {
            storefront.persist(RecordKey::Products);
        }

        info!(
            store = %storefront.config.store_name,
            products = storefront.catalog.len(),
            cart_lines = storefront.cart.line_count(),
            orders = storefront.orders.len(),
            seeded,
            "Storefront opened"
        );

        storefront
    }

    /// Fresh storefront with nothing persisted yet.
    pub fn empty(config: StoreConfig, sink: Arc<dyn StateSink>) -> Self {
        Self::open(config, StateSnapshot::default(), sink)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// All products, newest first.
    pub fn products(&self) -> &[Product] {
        self.catalog.list()
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.catalog.get(id)
    }

    pub fn browse(&self, query: &CatalogQuery) -> Vec<&Product> {
        self.catalog.browse(query)
    }

    pub fn create_product(&mut self, product: Product) -> String {
        let sku = product.sku.clone();
        let id = self.catalog.create(product);
        debug!(product_id = %id, sku = %sku, "Creating product");
        self.persist(RecordKey::Products);
        id
    }

    /// Returns `false` (and writes nothing) if the id is unknown.
    pub fn update_product(&mut self, product: Product) -> bool {
        let id = product.id.clone();
        let changed = self.catalog.update(product);
        debug!(product_id = %id, changed, "Updating product");
        if changed {
            self.persist(RecordKey::Products);
        }
        changed
    }

    /// Returns `false` (and writes nothing) if the id is unknown.
    ///
    /// Cart lines and wishlist entries pointing at the product are left in
    /// place; pricing skips them from now on.
    pub fn delete_product(&mut self, id: &str) -> bool {
        let changed = self.catalog.delete(id);
        debug!(product_id = %id, changed, "Deleting product");
        if changed {
            self.persist(RecordKey::Products);
        }
        changed
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds to the cart, merging with a matching line.
    ///
    /// The product id is not checked against the catalog.
    pub fn add_to_cart(
        &mut self,
        product_id: &str,
        quantity: u32,
        selection: VariationSelection,
    ) -> Result<(), ValidationError> {
        self.cart.add_item(product_id, quantity, selection)?;
        debug!(product_id, quantity, lines = self.cart.line_count(), "Added to cart");
        self.persist(RecordKey::Cart);
        Ok(())
    }

    pub fn remove_from_cart(&mut self, product_id: &str, selection: &VariationSelection) -> bool {
        let changed = self.cart.remove_item(product_id, selection);
        debug!(product_id, changed, "Removing from cart");
        if changed {
            self.persist(RecordKey::Cart);
        }
        changed
    }

    /// Adjusts a line by `delta`, flooring at 1.
    pub fn update_cart_quantity(
        &mut self,
        product_id: &str,
        selection: &VariationSelection,
        delta: i64,
    ) -> bool {
        let changed = self.cart.update_quantity(product_id, selection, delta);
        debug!(product_id, delta, changed, "Updating cart quantity");
        if changed {
            self.persist(RecordKey::Cart);
        }
        changed
    }

    pub fn clear_cart(&mut self) {
        if self.cart.is_empty() {
            return;
        }
        self.cart.clear();
        debug!("Cart cleared");
        self.persist(RecordKey::Cart);
    }

    /// Units in the cart, for the header badge.
    pub fn cart_item_count(&self) -> u64 {
        self.cart.total_item_count()
    }

    /// Cart lines joined with their products; dangling lines are omitted.
    pub fn cart_lines(&self) -> Vec<ResolvedLine<'_>> {
        pricing::resolve_lines(&self.cart, &self.catalog)
    }

    pub fn cart_subtotal(&self) -> Money {
        pricing::cart_subtotal(&self.cart, &self.catalog)
    }

    pub fn shipping_charge(&self, zone: ShippingZone) -> Money {
        self.config.shipping_rates.charge(zone)
    }

    pub fn cart_totals(&self, zone: ShippingZone) -> CartTotals {
        CartTotals::compute(&self.cart, &self.catalog, zone, &self.config.shipping_rates)
    }

    // =========================================================================
    // Wishlist
    // =========================================================================

    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// Returns `true` if the product is saved after the call.
    pub fn toggle_wishlist(&mut self, product_id: &str) -> bool {
        let saved = self.wishlist.toggle(product_id);
        debug!(product_id, saved, "Wishlist toggled");
        self.persist(RecordKey::Wishlist);
        saved
    }

    pub fn in_wishlist(&self, product_id: &str) -> bool {
        self.wishlist.contains(product_id)
    }

    /// Saved products that still exist, in saved order.
    pub fn wishlist_products(&self) -> Vec<&Product> {
        self.wishlist
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Signs in (`Some`) or out (`None`). Signing out deletes the user record.
    pub fn set_user(&mut self, user: Option<User>) {
        match &user {
            Some(u) => debug!(user_id = %u.id, role = ?u.role, "User signed in"),
            None => debug!("User signed out"),
        }
        self.session.set_user(user);
        self.persist(RecordKey::User);
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.current_user()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub fn orders(&self) -> &OrderHistory {
        &self.orders
    }

    /// Prepends an already built order to the history.
    pub fn append_order(&mut self, order: Order) {
        debug!(order_id = %order.id, total = %order.total, "Order appended");
        self.orders.append(order);
        self.persist(RecordKey::Orders);
    }

    /// Checks out the current cart.
    ///
    /// ## Steps
    /// 1. Build the order from the cart at the configured shipping rates
    /// 2. Append it to the history (persisted)
    /// 3. Clear the cart (persisted)
    ///
    /// A request without `user_id` is attributed to the signed-in user, or
    /// to the guest marker when nobody is signed in.
    ///
    /// ## Errors
    /// `ValidationError::Required` when no cart line resolves to a product;
    /// nothing is changed in that case.
    pub fn place_order(&mut self, mut request: CheckoutRequest) -> CoreResult<Order> {
        if request.user_id.is_none() {
            request.user_id = self.session.current_user().map(|u| u.id.clone());
        }

        let order = pricing::build_order(
            &self.cart,
            &self.catalog,
            request,
            &self.config.shipping_rates,
        );
        if order.items.is_empty() {
            return Err(ValidationError::Required {
                field: "cart items".to_string(),
            }
            .into());
        }

        info!(
            order_id = %order.id,
            user_id = %order.user_id,
            items = order.item_count(),
            total = %order.total,
            payment = order.payment_method.label(),
            "Order placed"
        );

        self.append_order(order.clone());
        self.clear_cart();
        Ok(order)
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats::compute(&self.catalog, &self.orders)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Hands one store's full collection to the sink.
    fn persist(&self, key: RecordKey) {
        if let Err(err) = self.write_record(key) {
            warn!(record = %key, error = %err, "Failed to persist state, keeping in-memory change");
        }
    }

    fn write_record(&self, key: RecordKey) -> Result<(), PersistError> {
        let payload = match key {
            RecordKey::Products => encode(self.catalog.list())?,
            RecordKey::Cart => {
                let lines: Vec<_> = self.cart.lines().collect();
                encode(&lines)?
            }
            RecordKey::Wishlist => encode(&self.wishlist.to_vec())?,
            RecordKey::User => match self.session.current_user() {
                Some(user) => encode(user)?,
                None => return self.sink.remove(key),
            },
            RecordKey::Orders => encode(self.orders.list())?,
        };
        self.sink.write(key, payload)
    }
}

// =============================================================================
// Shared Handle
// =============================================================================

/// Cloneable handle to one [`Storefront`].
///
/// ## Thread Safety
/// The container is wrapped in `Arc<Mutex<T>>`: every clone sees the same
/// state and only one caller mutates at a time.
#[derive(Debug, Clone)]
pub struct SharedStorefront {
    inner: Arc<Mutex<Storefront>>,
}

impl SharedStorefront {
    pub fn new(storefront: Storefront) -> Self {
        SharedStorefront {
            inner: Arc::new(Mutex::new(storefront)),
        }
    }

    /// Executes a function with read access to the storefront.
    ///
    /// ## Usage
    /// ```rust
    /// use std::sync::Arc;
    /// use glow_core::{NullSink, SharedStorefront, StoreConfig, Storefront};
    ///
    /// let shared = SharedStorefront::new(Storefront::empty(StoreConfig::default(), Arc::new(NullSink)));
    /// let count = shared.with_state(|s| s.products().len());
    /// assert_eq!(count, 4);
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Storefront) -> R,
    {
        // A panic mid-mutation leaves state that is still structurally valid.
        let state = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&state)
    }

    /// Executes a function with write access to the storefront.
    pub fn with_state_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Storefront) -> R,
    {
        let mut state = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut state)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
