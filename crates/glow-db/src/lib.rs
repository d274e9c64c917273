//! # glow-db: SQLite Persistence for Glow Storefront
//!
//! Durable storage for the five storefront state records, plus the
//! [`SqliteSink`] that plugs it into `glow_core::Storefront`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Glow Storefront Data Flow                           │
//! │                                                                         │
//! │  Storefront mutation (glow-core)                                       │
//! │       │ StateSink::write(key, payload)                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     glow-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  SqliteSink   │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │  (sink.rs)    │    │  (record.rs)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ mpsc queue ──►│───►│ StateRecord   │    │ 001_state_   │  │   │
//! │  │   │ writer task   │    │ Repository    │    │  records.sql │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │  Database (pool.rs)          │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite: state_records(key, payload, updated_at)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation, configuration, snapshot loading
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - The `state_records` repository
//! - [`sink`] - Background writer implementing `StateSink`
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use glow_core::{StoreConfig, Storefront};
//! use glow_db::{Database, DbConfig, SqliteSink};
//!
//! # async fn run() -> Result<(), glow_db::DbError> {
//! let db = Database::new(DbConfig::from_env()?).await?;
//! let snapshot = db.load_snapshot().await?;
//! let sink = SqliteSink::spawn(db.clone());
//!
//! let storefront = Storefront::open(StoreConfig::from_env(), snapshot, Arc::new(sink));
//! # let _ = storefront;
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod sink;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::StateRecordRepository;
pub use sink::SqliteSink;
