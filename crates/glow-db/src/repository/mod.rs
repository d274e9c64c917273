//! # Repository Module
//!
//! Database repository implementations for Glow Storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SqliteSink writer task / Database::load_snapshot                      │
//! │       │                                                                 │
//! │       │  db.records().put(RecordKey::Cart, payload)                    │
//! │       ▼                                                                 │
//! │  StateRecordRepository                                                 │
//! │  ├── put(&self, key, payload)      upsert                              │
//! │  ├── get(&self, key)                                                   │
//! │  ├── delete(&self, key)                                                │
//! │  └── load_all(&self)                                                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  state_records table                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`StateRecordRepository`] - The five JSON state records

pub mod record;

pub use record::StateRecordRepository;
