//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)          corrupt payload (CoreError)       │
//! │       │                                      │                          │
//! │       ▼                                      ▼                          │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ├──► startup: load_snapshot() fails, storefront is not built     │
//! │       │                                                                 │
//! │       └──► SqliteSink writer: logged at warn, write dropped            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use glow_core::persistence::UnknownRecordKey;
use glow_core::CoreError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A `state_records` row carries a key this version does not know.
    ///
    /// Only possible if the table was written by hand; the schema's CHECK
    /// constraint rejects unknown keys.
    #[error("Unknown state record: {0}")]
    UnknownRecord(String),

    /// A stored payload failed to decode.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → DbError::QueryFailed
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::ConnectionFailed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),
            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<UnknownRecordKey> for DbError {
    fn from(err: UnknownRecordKey) -> Self {
        DbError::UnknownRecord(err.0)
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_mapping() {
        assert!(matches!(DbError::from(sqlx::Error::PoolTimedOut), DbError::PoolExhausted));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
        assert!(matches!(DbError::from(sqlx::Error::RowNotFound), DbError::Internal(_)));
    }

    #[test]
    fn test_unknown_record_key() {
        let err: DbError = "sessions".parse::<glow_core::RecordKey>().unwrap_err().into();
        assert_eq!(err.to_string(), "Unknown state record: sessions");
    }
}
