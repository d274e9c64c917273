//! # Order History
//!
//! Placed orders, newest first, and the admin dashboard figures derived from
//! them.
//!
//! Orders are append-only: nothing here edits or removes a placed order.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::money::Money;
use crate::types::Order;

// =============================================================================
// Order History
// =============================================================================

/// Every order placed in this storefront, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderHistory {
    orders: Vec<Order>,
}

impl OrderHistory {
    pub fn new() -> Self {
        OrderHistory::default()
    }

    /// Records a placed order at the front of the history.
    pub fn append(&mut self, order: Order) {
        self.orders.insert(0, order);
    }

    /// All orders, newest first.
    pub fn list(&self) -> &[Order] {
        &self.orders
    }

    pub fn get(&self, id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Orders belonging to one user (or to [`crate::GUEST_USER_ID`]).
    pub fn for_user<'a>(&'a self, user_id: &'a str) -> impl Iterator<Item = &'a Order> {
        self.orders.iter().filter(move |o| o.user_id == user_id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl From<Vec<Order>> for OrderHistory {
    fn from(orders: Vec<Order>) -> Self {
        OrderHistory { orders }
    }
}

// =============================================================================
// Dashboard
// =============================================================================

/// Summary cards on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub order_count: usize,
    /// Sum of order totals, excluding cancelled and refunded orders.
    pub revenue: Money,
    pub product_count: usize,
    pub featured_count: usize,
}

impl DashboardStats {
    pub fn compute(catalog: &Catalog, orders: &OrderHistory) -> Self {
        DashboardStats {
            order_count: orders.len(),
            revenue: orders
                .list()
                .iter()
                .filter(|o| o.status.counts_as_revenue())
                .map(|o| o.total)
                .sum(),
            product_count: catalog.len(),
            featured_count: catalog.featured().count(),
        }
    }
}
