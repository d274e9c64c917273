//! # glow-core: Storefront State and Pricing
//!
//! This crate is the **heart** of Glow Storefront. It owns the catalog, the
//! shopping cart, the wishlist, the signed-in session and the order history,
//! plus the pricing and checkout math that derives totals from them.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Glow Storefront Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI (external)                     │   │
//! │  │    Shop ──► Product ──► Cart ──► Checkout ──► Order Success     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ declared operations only               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ glow-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐         │   │
//! │  │   │ catalog  │ │   cart   │ │ wishlist │ │ session  │         │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘         │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────────────────┐          │   │
//! │  │   │  orders  │ │ pricing  │ │ storefront container │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┬───────────┘          │   │
//! │  │                                         │ StateSink            │   │
//! │  └─────────────────────────────────────────┼───────────────────────┘   │
//! │                                            ▼                            │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        glow-db (SQLite)  or  MemoryStore (tests)                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, User, Address, Order, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Product catalog with admin CRUD and browse queries
//! - [`cart`] - Cart lines keyed by (product, variation selection)
//! - [`wishlist`] - Toggle set of product ids
//! - [`session`] - At most one signed-in user
//! - [`orders`] - Append-only order history and dashboard stats
//! - [`pricing`] - Effective prices, subtotals, shipping, order assembly
//! - [`persistence`] - Record keys, the `StateSink` observer, snapshots
//! - [`storefront`] - The explicitly constructed state container
//! - [`config`] - Store configuration
//! - [`sample`] - Sample catalog used to seed a fresh store
//! - [`validation`] - Form-level validation helpers
//!
//! ## Example Usage
//!
//! ```rust
//! use glow_core::money::Money;
//! use glow_core::pricing::{shipping_charge, ShippingZone};
//!
//! let subtotal = Money::from_major(3150);
//! let total = subtotal + shipping_charge(ShippingZone::InsideDhaka);
//!
//! assert_eq!(total, Money::from_major(3210));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod money;
pub mod orders;
pub mod persistence;
pub mod pricing;
pub mod sample;
pub mod session;
pub mod storefront;
pub mod types;
pub mod validation;
pub mod wishlist;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLineItem, VariationSelection};
pub use catalog::{Catalog, CatalogQuery, CatalogSort};
pub use config::StoreConfig;
pub use error::{CoreError, CoreResult, PersistError, ValidationError};
pub use money::Money;
pub use orders::{DashboardStats, OrderHistory};
pub use persistence::{MemoryStore, NullSink, RecordKey, StateSink, StateSnapshot};
pub use pricing::{CheckoutRequest, ShippingRates, ShippingZone};
pub use session::Session;
pub use storefront::{SharedStorefront, Storefront};
pub use types::*;
pub use wishlist::Wishlist;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Owner id recorded on orders placed without a signed-in user.
pub const GUEST_USER_ID: &str = "guest";

/// Currency sign used when rendering [`Money`].
pub const CURRENCY_SYMBOL: &str = "৳";

/// Largest quantity the product page lets a shopper pick in one go.
///
/// Only the form helpers enforce this; the cart itself never caps merged
/// quantities.
pub const MAX_ITEM_QUANTITY: i64 = 999;
