//! # Domain Types
//!
//! Core domain types used throughout Glow Storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      User       │   │     Order       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id (UUID)      │       │
//! │  │  sku            │   │  role           │   │  user_id|guest  │       │
//! │  │  price          │   │  addresses      │   │  items (frozen) │       │
//! │  │  sale_price?    │   └─────────────────┘   │  status         │       │
//! │  │  variations     │                         │  total          │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! │                                                                         │
//! │  StockStatus   Role   OrderStatus   PaymentMethod   Category            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All types serialize in camelCase: they are the persisted record format and
//! the shapes the storefront UI reads.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::VariationSelection;
use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// Availability shown on the product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    #[default]
    InStock,
    OutOfStock,
    PreOrder,
}

/// One variation axis of a product, e.g. `Size: [30ml, 60ml]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariation {
    pub id: String,
    /// Axis name, e.g. "Size", "Shade".
    pub name: String,
    /// Option labels in display order.
    pub options: Vec<String>,
}

/// A customer review attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub rating: f32,
    pub comment: String,
    pub date: String,
}

/// A catalog entry.
///
/// The `id` is assigned when the admin form creates the product and never
/// changes afterwards; every other field may be replaced by an update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// One-line pitch shown on cards.
    pub short_description: String,

    /// Long-form description for the product page.
    pub description: String,

    /// Category id (see [`Category`]).
    pub category: String,

    pub sub_category: String,

    pub brand: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Regular price.
    pub price: Money,

    /// Discounted price. Only honoured while it undercuts `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub sale_price: Option<Money>,

    pub stock_count: u32,

    pub stock_status: StockStatus,

    /// Image URLs, first one is the cover.
    pub images: Vec<String>,

    pub variations: Vec<ProductVariation>,

    /// Specification table, e.g. "Skin Type" → "All types".
    pub specifications: BTreeMap<String, String>,

    /// Average rating, 0 to 5.
    pub rating: f32,

    pub reviews: Vec<Review>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub warranty: Option<String>,

    /// Shown on the home page carousel.
    pub is_featured: bool,
}

impl Product {
    /// Returns the variation axis with the given name.
    pub fn variation(&self, axis: &str) -> Option<&ProductVariation> {
        self.variations.iter().find(|v| v.name == axis)
    }

    /// Checks if the product can go into a cart right now.
    #[inline]
    pub fn is_available(&self) -> bool {
        self.stock_status != StockStatus::OutOfStock
    }
}

/// A top-level shop category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub image: String,
    pub sub_categories: Vec<String>,
}

// =============================================================================
// User & Address
// =============================================================================

/// What a signed-in user may see. Enforcement belongs to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Customer,
    Admin,
}

/// A saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: String,
    /// e.g. "Home", "Office".
    pub label: String,
    pub street: String,
    pub area: String,
    pub city: String,
    pub district: String,
    pub is_default: bool,
}

/// The signed-in shopper or administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub phone: Option<String>,
    #[serde(default)]
    pub addresses: Vec<Address>,
    pub role: Role,
}

impl User {
    /// Builds the demo account offered on the sign-in page.
    ///
    /// ```rust
    /// use glow_core::{Role, User};
    ///
    /// let admin = User::demo(Role::Admin);
    /// assert!(admin.is_admin());
    /// assert_eq!(admin.email, "admin@glowbeauty.com");
    /// ```
    pub fn demo(role: Role) -> Self {
        let (name, email) = match role {
            Role::Admin => ("System Administrator", "admin@glowbeauty.com"),
            Role::Customer => ("John Doe", "user@example.com"),
        };

        User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            addresses: Vec::new(),
            role,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Returns the address flagged as default, if any.
    pub fn default_address(&self) -> Option<&Address> {
        self.addresses.iter().find(|a| a.is_default)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Lifecycle of a placed order.
///
/// Orders are always created `Pending`; nothing in this crate moves them on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    OnHold,
    Shipped,
    Completed,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// Whether the order's money still counts as revenue.
    #[inline]
    pub fn counts_as_revenue(&self) -> bool {
        !matches!(self, OrderStatus::Cancelled | OrderStatus::Refunded)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the shopper chose to pay at checkout.
///
/// No gateway is contacted; the choice is recorded on the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Bkash,
    Nagad,
    CashOnDelivery,
}

impl PaymentMethod {
    /// Label shown on the checkout buttons and order confirmation.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Bkash => "bKash",
            PaymentMethod::Nagad => "Nagad",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Mobile wallets redirect to their gateway; cash is settled on delivery.
    #[inline]
    pub fn is_prepaid(&self) -> bool {
        !matches!(self, PaymentMethod::CashOnDelivery)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A line in a placed order.
/// Uses snapshot pattern to freeze product data at time of checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineItem {
    pub product_id: String,
    pub quantity: u32,
    pub selection: VariationSelection,
    /// Product as it looked at checkout (frozen).
    pub product: Product,
    /// Effective unit price at checkout (frozen).
    pub unit_price: Money,
    /// unit_price × quantity.
    pub line_total: Money,
}

/// A placed order. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Owning user id, or [`crate::GUEST_USER_ID`].
    pub user_id: String,
    pub items: Vec<OrderLineItem>,
    pub subtotal: Money,
    pub shipping_charge: Money,
    pub discount: Money,
    /// subtotal + shipping_charge − discount.
    pub total: Money,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub shipping_address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub transaction_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    #[inline]
    pub fn is_guest(&self) -> bool {
        self.user_id == crate::GUEST_USER_ID
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(Role::default(), Role::Customer);
        assert_eq!(StockStatus::default(), StockStatus::InStock);
    }

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::Bkash.label(), "bKash");
        assert_eq!(PaymentMethod::Nagad.label(), "Nagad");
        assert_eq!(PaymentMethod::CashOnDelivery.label(), "Cash on Delivery");
        assert!(!PaymentMethod::CashOnDelivery.is_prepaid());
    }

    #[test]
    fn test_revenue_statuses() {
        assert!(OrderStatus::Pending.counts_as_revenue());
        assert!(OrderStatus::Shipped.counts_as_revenue());
        assert!(!OrderStatus::Cancelled.counts_as_revenue());
        assert!(!OrderStatus::Refunded.counts_as_revenue());
    }

    #[test]
    fn test_demo_users() {
        let customer = User::demo(Role::Customer);
        assert_eq!(customer.name, "John Doe");
        assert!(!customer.is_admin());
        assert!(customer.addresses.is_empty());

        let other = User::demo(Role::Customer);
        assert_ne!(customer.id, other.id);
    }

    #[test]
    fn test_enum_wire_format() {
        assert_eq!(
            serde_json::to_string(&StockStatus::PreOrder).unwrap(),
            "\"pre_order\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::CashOnDelivery).unwrap(),
            "\"cash_on_delivery\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::OnHold).unwrap(),
            "\"on_hold\""
        );
    }

    #[test]
    fn test_user_without_optional_fields_decodes() {
        let json = r#"{"id":"u1","name":"A","email":"a@b.c","role":"admin"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.is_admin());
        assert!(user.phone.is_none());
        assert!(user.default_address().is_none());
    }
}
