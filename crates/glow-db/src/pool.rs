//! # Database Pool Management
//!
//! Connection pool creation and configuration for SQLite.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new(path) ← Configure pool settings                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ← Create pool + run migrations            │
//! │       │                                                                 │
//! │       ├──► db.load_snapshot().await ──► StateSnapshot                  │
//! │       │                                       │                         │
//! │       └──► SqliteSink::spawn(db) ───────┐     │                         │
//! │                                         ▼     ▼                         │
//! │                          Storefront::open(config, snapshot, sink)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## WAL Mode
//! SQLite WAL (Write-Ahead Logging) mode is enabled so the startup read and
//! the background writer never block each other.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use glow_core::StateSnapshot;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::StateRecordRepository;

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "GLOW_DB_PATH";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust
/// use glow_db::DbConfig;
///
/// let config = DbConfig::new("/tmp/glow.db").max_connections(2);
/// assert_eq!(config.max_connections, 2);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Maximum number of connections in the pool.
    /// Default: 5
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,

    /// Whether to run migrations on connect.
    /// Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// The file is created on first connect if it doesn't exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }

    /// Configuration for the default location.
    ///
    /// ## Path Resolution
    /// 1. `GLOW_DB_PATH`, if set
    /// 2. The platform data directory:
    ///    - **macOS**: `~/Library/Application Support/com.glowbeauty.storefront/glow.db`
    ///    - **Windows**: `%APPDATA%\glowbeauty\storefront\data\glow.db`
    ///    - **Linux**: `~/.local/share/storefront/glow.db`
    pub fn from_env() -> DbResult<Self> {
        if let Ok(path) = std::env::var(DB_PATH_ENV) {
            return Ok(DbConfig::new(path));
        }

        let dirs = ProjectDirs::from("com", "glowbeauty", "storefront").ok_or_else(|| {
            DbError::ConnectionFailed("Could not determine app data directory".to_string())
        })?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)
            .map_err(|e| DbError::ConnectionFailed(format!("{}: {e}", data_dir.display())))?;

        Ok(DbConfig::new(data_dir.join("glow.db")))
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets whether to run migrations on connect.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// Each in-memory database is private to its connection, so the pool is
    /// pinned to exactly one.
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
            run_migrations: true,
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Database handle providing repository access.
///
/// Cheap to clone: clones share one connection pool.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,
}

impl Database {
    /// Creates a new database connection pool.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures WAL mode and NORMAL synchronous
    /// 3. Creates the connection pool
    /// 4. Runs migrations (if enabled)
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            "Initializing database connection"
        );

        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        let connect_options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL: safe from corruption, may lose the last write on power loss
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true);

        debug!("Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        info!(
            max_connections = config.max_connections,
            "Database pool created"
        );

        let db = Database { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs database migrations.
    ///
    /// Called by `new()` when `run_migrations` is set.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.pool).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the state record repository.
    pub fn records(&self) -> StateRecordRepository {
        StateRecordRepository::new(self.pool.clone())
    }

    /// Reads and decodes every stored record.
    ///
    /// ## Returns
    /// * `Ok(snapshot)` - absent records are simply empty in the snapshot
    /// * `Err(DbError::Core(CorruptRecord))` - a payload failed to decode
    pub async fn load_snapshot(&self) -> DbResult<StateSnapshot> {
        let records = self.records().load_all().await?;
        info!(records = records.len(), "Loading storefront state");
        Ok(StateSnapshot::decode(records)?)
    }

    /// Closes the database connection pool.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
