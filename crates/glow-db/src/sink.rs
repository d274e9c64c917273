//! # SQLite State Sink
//!
//! Bridges the synchronous [`StateSink`] contract to the async database.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Storefront mutation (sync, caller's thread)                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteSink::write(key, payload)                                       │
//! │       │  tx.send(WriteOp::Put)   never blocks, never awaits            │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            BACKGROUND WRITER TASK (tokio)                        │   │
//! │  │                                                                 │   │
//! │  │  while let Some(op) = rx.recv().await                           │   │
//! │  │     Put    ──► records().put(key, payload)                      │   │
//! │  │     Remove ──► records().delete(key)                            │   │
//! │  │     Flush  ──► reply once everything queued before it is done   │   │
//! │  │                                                                 │   │
//! │  │  Failed writes are logged at warn and dropped.                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations are applied strictly in send order, so the last write for a
//! key always wins. The task exits when every `SqliteSink` clone is dropped.

use glow_core::{PersistError, RecordKey, StateSink};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::Database;

/// One queued operation for the writer task.
#[derive(Debug)]
enum WriteOp {
    Put(RecordKey, String),
    Remove(RecordKey),
    Flush(oneshot::Sender<()>),
}

/// Fire-and-forget [`StateSink`] backed by SQLite.
#[derive(Debug, Clone)]
pub struct SqliteSink {
    tx: mpsc::UnboundedSender<WriteOp>,
}

impl SqliteSink {
    /// Starts the writer task on the current tokio runtime.
    ///
    /// Must be called from within a runtime.
    pub fn spawn(db: Database) -> Self {
        let (sink, _handle) = Self::spawn_with_handle(db);
        sink
    }

    /// Like [`SqliteSink::spawn`], also returning the writer task's handle
    /// so shutdown can wait for it.
    pub fn spawn_with_handle(db: Database) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run_writer(db, rx));
        info!("SQLite state writer started");
        (SqliteSink { tx }, handle)
    }

    /// Waits until every write queued so far has been applied.
    ///
    /// ## Errors
    /// `DbError::Internal` if the writer task is gone.
    pub async fn flush(&self) -> DbResult<()> {
        let (done_tx, done_rx) = oneshot::channel();
        self.tx
            .send(WriteOp::Flush(done_tx))
            .map_err(|_| writer_stopped())?;
        done_rx.await.map_err(|_| writer_stopped())
    }

    fn enqueue(&self, op: WriteOp) -> Result<(), PersistError> {
        self.tx
            .send(op)
            .map_err(|_| PersistError::Sink("SQLite writer has stopped".to_string()))
    }
}

impl StateSink for SqliteSink {
    fn write(&self, key: RecordKey, payload: String) -> Result<(), PersistError> {
        self.enqueue(WriteOp::Put(key, payload))
    }

    fn remove(&self, key: RecordKey) -> Result<(), PersistError> {
        self.enqueue(WriteOp::Remove(key))
    }
}

fn writer_stopped() -> DbError {
    DbError::Internal("SQLite writer has stopped".to_string())
}

async fn run_writer(db: Database, mut rx: mpsc::UnboundedReceiver<WriteOp>) {
    let records = db.records();

    while let Some(op) = rx.recv().await {
        match op {
            WriteOp::Put(key, payload) => {
                if let Err(err) = records.put(key, &payload).await {
                    warn!(record = %key, error = %err, "Failed to write state record");
                }
            }
            WriteOp::Remove(key) => {
                if let Err(err) = records.delete(key).await {
                    warn!(record = %key, error = %err, "Failed to delete state record");
                }
            }
            WriteOp::Flush(done) => {
                // The receiver may have given up waiting; nothing to do then.
                let _ = done.send(());
            }
        }
    }

    debug!("SQLite state writer stopped");
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DbConfig;
    use glow_core::{Money, Role, ShippingZone, StoreConfig, Storefront, User, VariationSelection};
    use std::sync::Arc;

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_writes_apply_in_order() {
        let db = db().await;
        let sink = SqliteSink::spawn(db.clone());

        sink.write(RecordKey::Wishlist, r#"["1"]"#.to_string()).unwrap();
        sink.write(RecordKey::Wishlist, r#"["1","2"]"#.to_string()).unwrap();
        sink.write(RecordKey::User, "{}".to_string()).unwrap();
        sink.remove(RecordKey::User).unwrap();
        sink.flush().await.unwrap();

        assert_eq!(
            db.records().get(RecordKey::Wishlist).await.unwrap().as_deref(),
            Some(r#"["1","2"]"#)
        );
        assert!(db.records().get(RecordKey::User).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_write_after_writer_stops_is_an_error() {
        let db = db().await;
        let (sink, handle) = SqliteSink::spawn_with_handle(db);
        handle.abort();
        let _ = handle.await;

        assert!(sink.write(RecordKey::Cart, "[]".to_string()).is_err());
        assert!(sink.flush().await.is_err());
    }

    #[tokio::test]
    async fn test_storefront_round_trip_through_sqlite() {
        let db = db().await;
        let sink = SqliteSink::spawn(db.clone());

        let snapshot = db.load_snapshot().await.unwrap();
        let mut storefront =
            Storefront::open(StoreConfig::default(), snapshot, Arc::new(sink.clone()));

        storefront
            .add_to_cart("1", 2, VariationSelection::new().with("Size", "30ml"))
            .unwrap();
        storefront
            .add_to_cart("2", 1, VariationSelection::new().with("Size", "236ml"))
            .unwrap();
        storefront.toggle_wishlist("3");
        storefront.set_user(Some(User::demo(Role::Customer)));
        sink.flush().await.unwrap();

        let reopened = Storefront::open(
            StoreConfig::default(),
            db.load_snapshot().await.unwrap(),
            Arc::new(sink.clone()),
        );
        assert_eq!(reopened.cart(), storefront.cart());
        assert_eq!(reopened.wishlist(), storefront.wishlist());
        assert_eq!(reopened.current_user(), storefront.current_user());
        assert_eq!(reopened.products().len(), 4);
        assert_eq!(reopened.cart_subtotal(), Money::from_major(3150));
    }

    #[tokio::test]
    async fn test_checkout_persists_order_and_empty_cart() {
        let db = db().await;
        let sink = SqliteSink::spawn(db.clone());
        let mut storefront = Storefront::empty(StoreConfig::default(), Arc::new(sink.clone()));

        storefront
            .add_to_cart("4", 1, VariationSelection::new().with("Flavor", "Berry"))
            .unwrap();
        let order = storefront
            .place_order(glow_core::CheckoutRequest {
                shipping_address: glow_core::Address {
                    id: "new".to_string(),
                    label: "Shipping".to_string(),
                    street: "Flat 5B, 14 Station Road".to_string(),
                    area: "Agrabad".to_string(),
                    city: "Chattogram".to_string(),
                    district: "Chattogram".to_string(),
                    is_default: false,
                },
                payment_method: glow_core::PaymentMethod::CashOnDelivery,
                zone: ShippingZone::OutsideDhaka,
                user_id: None,
                transaction_id: None,
            })
            .unwrap();
        sink.flush().await.unwrap();

        let snapshot = db.load_snapshot().await.unwrap();
        assert!(snapshot.cart.is_empty());
        assert_eq!(snapshot.orders, vec![order]);
        assert_eq!(snapshot.orders[0].total, Money::from_major(1970));
    }
}
