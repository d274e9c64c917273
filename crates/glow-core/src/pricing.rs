//! # Pricing & Checkout
//!
//! Pure functions that turn catalog prices and cart lines into totals, and
//! the order assembly that freezes them at checkout.
//!
//! ## Single Source of Truth
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  effective_unit_price(product)                                          │
//! │     │                                                                   │
//! │     ├──► product card / product page price                             │
//! │     ├──► shop filters and price sorting                                │
//! │     ├──► line_item_total ──► cart_subtotal ──► cart page summary       │
//! │     └──► build_order ──► frozen unit_price on every order line         │
//! │                                                                         │
//! │  Every displayed price and every summed price goes through the same    │
//! │  function, so the cart page and the order can never disagree.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart lines whose product has left the catalog are skipped everywhere in
//! this module (subtotal and order alike), never reported as errors.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLineItem};
use crate::catalog::Catalog;
use crate::money::Money;
use crate::types::{Address, Order, OrderLineItem, OrderStatus, PaymentMethod, Product};
use crate::GUEST_USER_ID;

// =============================================================================
// Unit Prices
// =============================================================================

/// What one unit of this product costs right now.
///
/// The sale price wins only when it is set, positive, and below the regular
/// price; anything else falls back to the regular price.
///
/// ```rust
/// use glow_core::pricing::effective_unit_price;
/// use glow_core::sample::sample_catalog;
/// use glow_core::Money;
///
/// let products = sample_catalog();
/// assert_eq!(effective_unit_price(&products[0]), Money::from_major(850));  // 950, sale 850
/// assert_eq!(effective_unit_price(&products[1]), Money::from_major(1450)); // no sale
/// ```
pub fn effective_unit_price(product: &Product) -> Money {
    match product.sale_price {
        Some(sale) if sale.is_positive() && sale < product.price => sale,
        _ => product.price,
    }
}

/// Rounded percentage saved by the sale price, for the "-11%" badge.
///
/// `None` when no valid sale price is set.
pub fn discount_percent(product: &Product) -> Option<u32> {
    let sale = effective_unit_price(product);
    if sale == product.price || !product.price.is_positive() {
        return None;
    }

    let price = product.price.minor();
    let saved = price - sale.minor();
    // Round half up in integer math.
    let pct = (saved * 100 + price / 2) / price;
    u32::try_from(pct).ok()
}

/// effective_unit_price × quantity.
pub fn line_item_total(line: &CartLineItem, product: &Product) -> Money {
    effective_unit_price(product).multiply_quantity(line.quantity)
}

// =============================================================================
// Resolved Lines & Subtotal
// =============================================================================

/// A cart line joined with its catalog product.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedLine<'a> {
    pub item: &'a CartLineItem,
    pub product: &'a Product,
    pub unit_price: Money,
    pub line_total: Money,
}

/// Joins cart lines with the catalog, silently dropping lines whose product
/// no longer exists.
pub fn resolve_lines<'a>(cart: &'a Cart, catalog: &'a Catalog) -> Vec<ResolvedLine<'a>> {
    cart.lines()
        .filter_map(|item| {
            let product = catalog.get(&item.product_id)?;
            Some(ResolvedLine {
                item,
                product,
                unit_price: effective_unit_price(product),
                line_total: line_item_total(item, product),
            })
        })
        .collect()
}

/// Sum of line totals over the lines that still resolve in the catalog.
pub fn cart_subtotal(cart: &Cart, catalog: &Catalog) -> Money {
    resolve_lines(cart, catalog)
        .iter()
        .map(|line| line.line_total)
        .sum()
}

// =============================================================================
// Shipping
// =============================================================================

/// Delivery area picked at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ShippingZone {
    /// Inside the Dhaka metro area.
    #[default]
    InsideDhaka,
    OutsideDhaka,
}

/// Flat delivery fee per zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingRates {
    pub inside_dhaka: Money,
    pub outside_dhaka: Money,
}

impl ShippingRates {
    pub const fn charge(&self, zone: ShippingZone) -> Money {
        match zone {
            ShippingZone::InsideDhaka => self.inside_dhaka,
            ShippingZone::OutsideDhaka => self.outside_dhaka,
        }
    }
}

/// ৳60 inside Dhaka, ৳120 outside.
impl Default for ShippingRates {
    fn default() -> Self {
        ShippingRates {
            inside_dhaka: Money::from_major(60),
            outside_dhaka: Money::from_major(120),
        }
    }
}

/// Fee for a zone at the standard rates.
pub fn shipping_charge(zone: ShippingZone) -> Money {
    ShippingRates::default().charge(zone)
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Summary shown beside the cart and on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct lines that resolve in the catalog.
    pub line_count: usize,
    /// Units across those lines.
    pub item_count: u64,
    pub subtotal: Money,
    pub shipping: Money,
    pub total: Money,
}

impl CartTotals {
    pub fn compute(cart: &Cart, catalog: &Catalog, zone: ShippingZone, rates: &ShippingRates) -> Self {
        let lines = resolve_lines(cart, catalog);
        let subtotal: Money = lines.iter().map(|l| l.line_total).sum();
        let shipping = rates.charge(zone);

        CartTotals {
            line_count: lines.len(),
            item_count: lines.iter().map(|l| u64::from(l.item.quantity)).sum(),
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

// =============================================================================
// Order Assembly
// =============================================================================

/// Everything the checkout form contributes to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub shipping_address: Address,
    pub payment_method: PaymentMethod,
    pub zone: ShippingZone,
    /// Signed-in user, or `None` for a guest checkout.
    #[ts(optional)]
    pub user_id: Option<String>,
    /// Wallet transaction reference, when the gateway returned one.
    #[ts(optional)]
    pub transaction_id: Option<String>,
}

/// Freezes the cart into a new pending order.
///
/// Lines whose product is gone are dropped, exactly as in [`cart_subtotal`].
/// The discount is always zero. The order is returned, not stored: the
/// caller appends it to the history first and clears the cart after, so a
/// failed append never loses the cart.
pub fn build_order(
    cart: &Cart,
    catalog: &Catalog,
    request: CheckoutRequest,
    rates: &ShippingRates,
) -> Order {
    let items: Vec<OrderLineItem> = resolve_lines(cart, catalog)
        .into_iter()
        .map(|line| OrderLineItem {
            product_id: line.item.product_id.clone(),
            quantity: line.item.quantity,
            selection: line.item.selection.clone(),
            product: line.product.clone(),
            unit_price: line.unit_price,
            line_total: line.line_total,
        })
        .collect();

    let subtotal: Money = items.iter().map(|i| i.line_total).sum();
    let shipping_charge = rates.charge(request.zone);
    let discount = Money::zero();

    Order {
        id: Uuid::new_v4().to_string(),
        user_id: request.user_id.unwrap_or_else(|| GUEST_USER_ID.to_string()),
        items,
        subtotal,
        shipping_charge,
        discount,
        total: subtotal + shipping_charge - discount,
        status: OrderStatus::Pending,
        payment_method: request.payment_method,
        shipping_address: request.shipping_address,
        transaction_id: request.transaction_id,
        created_at: Utc::now(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::VariationSelection;
    use crate::sample::sample_catalog;

    fn catalog() -> Catalog {
        Catalog::from(sample_catalog())
    }

    fn address() -> Address {
        Address {
            id: "new".to_string(),
            label: "Shipping".to_string(),
            street: "House 12, Road 5".to_string(),
            area: "Dhanmondi".to_string(),
            city: "Dhaka".to_string(),
            district: "Dhaka".to_string(),
            is_default: true,
        }
    }

    fn request(zone: ShippingZone) -> CheckoutRequest {
        CheckoutRequest {
            shipping_address: address(),
            payment_method: PaymentMethod::Bkash,
            zone,
            user_id: None,
            transaction_id: None,
        }
    }

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add_item("1", 2, VariationSelection::new().with("Size", "30ml"))
            .unwrap();
        cart.add_item("2", 1, VariationSelection::new().with("Size", "236ml"))
            .unwrap();
        cart
    }

    #[test]
    fn test_effective_price_precedence() {
        let catalog = catalog();
        assert_eq!(effective_unit_price(catalog.get("1").unwrap()), Money::from_major(850));
        assert_eq!(effective_unit_price(catalog.get("2").unwrap()), Money::from_major(1450));
    }

    #[test]
    fn test_invalid_sale_price_is_ignored() {
        let mut product = catalog().get("2").unwrap().clone();

        product.sale_price = Some(Money::from_major(1450));
        assert_eq!(effective_unit_price(&product), Money::from_major(1450));

        product.sale_price = Some(Money::from_major(1600));
        assert_eq!(effective_unit_price(&product), Money::from_major(1450));

        product.sale_price = Some(Money::zero());
        assert_eq!(effective_unit_price(&product), Money::from_major(1450));
    }

    #[test]
    fn test_discount_percent() {
        let catalog = catalog();
        // (950 - 850) / 950 = 10.5% → 11
        assert_eq!(discount_percent(catalog.get("1").unwrap()), Some(11));
        // (2200 - 1950) / 2200 = 11.4% → 11
        assert_eq!(discount_percent(catalog.get("3").unwrap()), Some(11));
        assert_eq!(discount_percent(catalog.get("2").unwrap()), None);
    }

    #[test]
    fn test_subtotal() {
        assert_eq!(cart_subtotal(&sample_cart(), &catalog()), Money::from_major(3150));
        assert_eq!(cart_subtotal(&Cart::new(), &catalog()), Money::zero());
    }

    #[test]
    fn test_subtotal_skips_dangling_lines() {
        let mut cart = sample_cart();
        cart.add_item("deleted", 3, VariationSelection::new()).unwrap();

        assert_eq!(cart_subtotal(&cart, &catalog()), Money::from_major(3150));
    }

    #[test]
    fn test_shipping_zones() {
        assert_eq!(shipping_charge(ShippingZone::InsideDhaka), Money::from_major(60));
        assert_eq!(shipping_charge(ShippingZone::OutsideDhaka), Money::from_major(120));
    }

    #[test]
    fn test_cart_totals() {
        let totals = CartTotals::compute(
            &sample_cart(),
            &catalog(),
            ShippingZone::InsideDhaka,
            &ShippingRates::default(),
        );

        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.item_count, 3);
        assert_eq!(totals.subtotal, Money::from_major(3150));
        assert_eq!(totals.total, Money::from_major(3210));
    }

    #[test]
    fn test_build_order() {
        let order = build_order(
            &sample_cart(),
            &catalog(),
            request(ShippingZone::OutsideDhaka),
            &ShippingRates::default(),
        );

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.user_id, GUEST_USER_ID);
        assert!(order.is_guest());
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].unit_price, Money::from_major(850));
        assert_eq!(order.items[0].line_total, Money::from_major(1700));
        assert_eq!(order.subtotal, Money::from_major(3150));
        assert_eq!(order.shipping_charge, Money::from_major(120));
        assert_eq!(order.discount, Money::zero());
        assert_eq!(order.total, Money::from_major(3270));
        assert_eq!(order.item_count(), 3);
    }

    #[test]
    fn test_build_order_drops_dangling_lines_and_keeps_user() {
        let mut cart = sample_cart();
        cart.add_item("deleted", 1, VariationSelection::new()).unwrap();

        let mut req = request(ShippingZone::InsideDhaka);
        req.user_id = Some("u-42".to_string());
        let order = build_order(&cart, &catalog(), req, &ShippingRates::default());

        assert_eq!(order.items.len(), 2);
        assert_eq!(order.user_id, "u-42");
        assert_eq!(order.total, Money::from_major(3210));
    }

    #[test]
    fn test_order_is_detached_from_cart_and_catalog() {
        let mut cart = sample_cart();
        let mut catalog = catalog();
        let order = build_order(
            &cart,
            &catalog,
            request(ShippingZone::InsideDhaka),
            &ShippingRates::default(),
        );
        let frozen = order.clone();

        cart.clear();
        let mut repriced = catalog.get("1").unwrap().clone();
        repriced.sale_price = None;
        catalog.update(repriced);

        assert_eq!(order, frozen);
        assert_eq!(order.items[0].product.sale_price, Some(Money::from_major(850)));
    }

    #[test]
    fn test_fresh_order_ids() {
        let a = build_order(&sample_cart(), &catalog(), request(ShippingZone::InsideDhaka), &ShippingRates::default());
        let b = build_order(&sample_cart(), &catalog(), request(ShippingZone::InsideDhaka), &ShippingRates::default());
        assert_ne!(a.id, b.id);
    }
}
