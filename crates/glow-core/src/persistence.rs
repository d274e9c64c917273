//! # Persistence Contract
//!
//! How storefront state leaves and re-enters memory.
//!
//! ## Record Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RecordKey      Payload (JSON)                 Absent on load means     │
//! │  ──────────     ──────────────────────────     ──────────────────────   │
//! │  products       [Product, ...]                 sample catalog / empty   │
//! │  cart           [CartLineItem, ...]            empty cart               │
//! │  wishlist       ["product-id", ...]            empty wishlist           │
//! │  user           User                           guest                    │
//! │  orders         [Order, ...] newest first      no orders                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Observer
//! The [`crate::storefront::Storefront`] container mutates a store, encodes
//! that store's full collection and hands it to a [`StateSink`]. Stores never
//! see the sink. Sinks are synchronous and fire-and-forget: a sink error is
//! logged by the container and the in-memory change stands.
//!
//! Implementations:
//! - [`MemoryStore`] - shared in-memory map, for tests and previews
//! - [`NullSink`] - discards everything
//! - `glow_db::SqliteSink` - queues writes to a background SQLite writer

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::cart::CartLineItem;
use crate::error::{CoreError, CoreResult, PersistError};
use crate::types::{Order, Product, User};

// =============================================================================
// Record Keys
// =============================================================================

/// The five independently persisted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordKey {
    Products,
    Cart,
    Wishlist,
    User,
    Orders,
}

impl RecordKey {
    pub const ALL: [RecordKey; 5] = [
        RecordKey::Products,
        RecordKey::Cart,
        RecordKey::Wishlist,
        RecordKey::User,
        RecordKey::Orders,
    ];

    /// Storage key, as written to the `state_records` table.
    pub const fn as_str(&self) -> &'static str {
        match self {
            RecordKey::Products => "products",
            RecordKey::Cart => "cart",
            RecordKey::Wishlist => "wishlist",
            RecordKey::User => "user",
            RecordKey::Orders => "orders",
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A storage key that names none of the five records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown record key: {0}")]
pub struct UnknownRecordKey(pub String);

impl FromStr for RecordKey {
    type Err = UnknownRecordKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownRecordKey(s.to_string()))
    }
}

// =============================================================================
// State Sink
// =============================================================================

/// Receives the full serialized collection after every mutation.
///
/// Implementations must not block for long: they are called inline, while
/// the storefront is borrowed mutably.
pub trait StateSink: Send + Sync {
    /// Stores `payload` under `key`, replacing any previous payload.
    fn write(&self, key: RecordKey, payload: String) -> Result<(), PersistError>;

    /// Deletes the record. Removing an absent record is not an error.
    fn remove(&self, key: RecordKey) -> Result<(), PersistError>;
}

/// Encodes one collection as a record payload.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, PersistError> {
    Ok(serde_json::to_string(value)?)
}

fn decode_record<T: DeserializeOwned>(key: RecordKey, payload: &str) -> CoreResult<T> {
    serde_json::from_str(payload).map_err(|source| CoreError::CorruptRecord { key, source })
}

// =============================================================================
// Snapshot
// =============================================================================

/// Everything loaded at startup, before the stores are built.
///
/// `products` stays `None` when no record exists, so the container can tell
/// "never saved" (seed the sample catalog) from "saved empty" (admin deleted
/// every product).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    pub products: Option<Vec<Product>>,
    pub cart: Vec<CartLineItem>,
    pub wishlist: Vec<String>,
    pub user: Option<User>,
    pub orders: Vec<Order>,
}

impl StateSnapshot {
    /// Decodes whichever records are present.
    ///
    /// ## Errors
    /// `CoreError::CorruptRecord` for the first payload that is not valid
    /// JSON of the expected shape. Missing records are fine.
    pub fn decode<I>(records: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (RecordKey, String)>,
    {
        let mut snapshot = StateSnapshot::default();

        for (key, payload) in records {
            match key {
                RecordKey::Products => snapshot.products = Some(decode_record(key, &payload)?),
                RecordKey::Cart => snapshot.cart = decode_record(key, &payload)?,
                RecordKey::Wishlist => snapshot.wishlist = decode_record(key, &payload)?,
                RecordKey::User => snapshot.user = decode_record(key, &payload)?,
                RecordKey::Orders => snapshot.orders = decode_record(key, &payload)?,
            }
        }

        Ok(snapshot)
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Record store backed by `Arc<RwLock<HashMap>>`.
///
/// Cloning shares the same map, so a test can hand one clone to the
/// storefront and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<RwLock<HashMap<RecordKey, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Raw payload currently stored under `key`.
    pub fn read(&self, key: RecordKey) -> Result<Option<String>, PersistError> {
        let records = self
            .records
            .read()
            .map_err(|_| PersistError::LockPoisoned("record read"))?;
        Ok(records.get(&key).cloned())
    }

    /// Decodes everything stored so far, as a restart would.
    pub fn snapshot(&self) -> CoreResult<StateSnapshot> {
        let records = self
            .records
            .read()
            .map_err(|_| PersistError::LockPoisoned("record read"))?;
        StateSnapshot::decode(records.iter().map(|(k, v)| (*k, v.clone())))
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StateSink for MemoryStore {
    fn write(&self, key: RecordKey, payload: String) -> Result<(), PersistError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PersistError::LockPoisoned("record write"))?;
        records.insert(key, payload);
        Ok(())
    }

    fn remove(&self, key: RecordKey) -> Result<(), PersistError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| PersistError::LockPoisoned("record write"))?;
        records.remove(&key);
        Ok(())
    }
}

/// Sink that keeps nothing. State lives only as long as the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StateSink for NullSink {
    fn write(&self, _key: RecordKey, _payload: String) -> Result<(), PersistError> {
        Ok(())
    }

    fn remove(&self, _key: RecordKey) -> Result<(), PersistError> {
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{Cart, VariationSelection};
    use crate::catalog::Catalog;
    use crate::pricing::{build_order, CheckoutRequest, ShippingRates, ShippingZone};
    use crate::sample::sample_catalog;
    use crate::types::{Address, PaymentMethod, Role};

    fn address() -> Address {
        Address {
            id: "a1".to_string(),
            label: "Home".to_string(),
            street: "Road 11, House 4".to_string(),
            area: "Banani".to_string(),
            city: "Dhaka".to_string(),
            district: "Dhaka".to_string(),
            is_default: true,
        }
    }

    #[test]
    fn test_record_key_round_trip() {
        for key in RecordKey::ALL {
            assert_eq!(key.as_str().parse::<RecordKey>(), Ok(key));
        }
        assert_eq!(
            "sessions".parse::<RecordKey>(),
            Err(UnknownRecordKey("sessions".to_string()))
        );
    }

    #[test]
    fn test_every_collection_round_trips() {
        let catalog = Catalog::from(sample_catalog());
        let mut cart = Cart::new();
        cart.add_item("1", 2, VariationSelection::new().with("Size", "60ml"))
            .unwrap();
        cart.add_item("3", 1, VariationSelection::new().with("Shade", "Chili"))
            .unwrap();
        let mut user = crate::types::User::demo(Role::Customer);
        user.phone = Some("01700000000".to_string());
        user.addresses.push(address());
        let order = build_order(
            &cart,
            &catalog,
            CheckoutRequest {
                shipping_address: address(),
                payment_method: PaymentMethod::Nagad,
                zone: ShippingZone::OutsideDhaka,
                user_id: Some(user.id.clone()),
                transaction_id: Some("TXN-8842".to_string()),
            },
            &ShippingRates::default(),
        );
        let lines: Vec<CartLineItem> = cart.lines().cloned().collect();

        let store = MemoryStore::new();
        store.write(RecordKey::Products, encode(catalog.list()).unwrap()).unwrap();
        store.write(RecordKey::Cart, encode(&lines).unwrap()).unwrap();
        store.write(RecordKey::Wishlist, encode(&["2", "4"]).unwrap()).unwrap();
        store.write(RecordKey::User, encode(&user).unwrap()).unwrap();
        store.write(RecordKey::Orders, encode(&[order.clone()]).unwrap()).unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.products.as_deref(), Some(catalog.list()));
        assert_eq!(snapshot.cart, lines);
        assert_eq!(snapshot.wishlist, ["2", "4"]);
        assert_eq!(snapshot.user, Some(user));
        assert_eq!(snapshot.orders, vec![order]);
    }

    #[test]
    fn test_empty_collections_round_trip() {
        let store = MemoryStore::new();
        store.write(RecordKey::Products, encode::<[Product]>(&[]).unwrap()).unwrap();
        store.write(RecordKey::Cart, encode::<[CartLineItem]>(&[]).unwrap()).unwrap();
        store.write(RecordKey::Orders, encode::<[Order]>(&[]).unwrap()).unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.products, Some(Vec::new()));
        assert!(snapshot.cart.is_empty());
        assert!(snapshot.orders.is_empty());
    }

    #[test]
    fn test_absent_records_are_empty() {
        let snapshot = StateSnapshot::decode(Vec::new()).unwrap();
        assert_eq!(snapshot, StateSnapshot::default());
        assert!(snapshot.products.is_none());
        assert!(snapshot.user.is_none());
    }

    #[test]
    fn test_corrupt_record_is_reported() {
        let err = StateSnapshot::decode(vec![(RecordKey::Cart, "{not json".to_string())])
            .unwrap_err();

        match err {
            CoreError::CorruptRecord { key, .. } => assert_eq!(key, RecordKey::Cart),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_memory_store_remove() {
        let store = MemoryStore::new();
        store.write(RecordKey::User, "{}".to_string()).unwrap();
        store.remove(RecordKey::User).unwrap();
        store.remove(RecordKey::User).unwrap();

        assert!(store.read(RecordKey::User).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_records() {
        let store = MemoryStore::new();
        let handle = store.clone();
        handle.write(RecordKey::Wishlist, "[\"1\"]".to_string()).unwrap();

        assert_eq!(store.read(RecordKey::Wishlist).unwrap().as_deref(), Some("[\"1\"]"));
    }
}
