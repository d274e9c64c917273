//! # State Record Repository
//!
//! Reads and replaces the JSON payloads in `state_records`.
//!
//! Payloads are opaque here; decoding happens in
//! [`glow_core::StateSnapshot::decode`].

use chrono::Utc;
use glow_core::RecordKey;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// One row of `state_records`, as read back at startup.
#[derive(Debug, sqlx::FromRow)]
struct StateRecordRow {
    key: String,
    payload: String,
}

/// Repository for the `state_records` table.
#[derive(Debug, Clone)]
pub struct StateRecordRepository {
    pool: SqlitePool,
}

impl StateRecordRepository {
    /// Creates a new StateRecordRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StateRecordRepository { pool }
    }

    /// Inserts or replaces the payload for `key`.
    pub async fn put(&self, key: RecordKey, payload: &str) -> DbResult<()> {
        debug!(record = %key, bytes = payload.len(), "Writing state record");

        sqlx::query(
            r#"
            INSERT INTO state_records (key, payload, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key.as_str())
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns the payload for `key`, or `None` if it was never written.
    pub async fn get(&self, key: RecordKey) -> DbResult<Option<String>> {
        let payload: Option<String> =
            sqlx::query_scalar("SELECT payload FROM state_records WHERE key = ?1")
                .bind(key.as_str())
                .fetch_optional(&self.pool)
                .await?;

        Ok(payload)
    }

    /// Deletes the record. Returns `true` if a row was removed.
    pub async fn delete(&self, key: RecordKey) -> DbResult<bool> {
        debug!(record = %key, "Deleting state record");

        let result = sqlx::query("DELETE FROM state_records WHERE key = ?1")
            .bind(key.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Every stored record, in key order.
    ///
    /// ## Errors
    /// `DbError::UnknownRecord` if a row's key is not one of the five records.
    pub async fn load_all(&self) -> DbResult<Vec<(RecordKey, String)>> {
        let rows: Vec<StateRecordRow> =
            sqlx::query_as("SELECT key, payload FROM state_records ORDER BY key")
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter()
            .map(|row| -> DbResult<(RecordKey, String)> {
                Ok((row.key.parse::<RecordKey>()?, row.payload))
            })
            .collect()
    }

    /// Number of stored records.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM state_records")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
