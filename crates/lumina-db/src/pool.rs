//! # Database Pool Management
//!
//! Opening the cart database and handing out storage handles.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Connection Pool                                      │
//! │                                                                         │
//! │  DbCartStore ──► SqliteStorage ──► SqlitePool ──► lumina.db (WAL)      │
//! │                                                                         │
//! │  One statement per cart operation, so a small pool is enough.          │
//! │  Several `lumina` processes may share the file: busy_timeout makes a   │
//! │  writer wait for the lock instead of failing immediately.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::storage::SqliteStorage;

// =============================================================================
// Configuration
// =============================================================================

/// Where the cart database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// A database file, created on first open.
    File(PathBuf),
    /// A private in-memory database, gone when the pool closes.
    Memory,
}

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new(data_dir.join("lumina.db")).busy_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: DbLocation,

    /// Pool size. Default: 2
    pub max_connections: u32,

    /// How long to wait for a free connection. Default: 10 seconds
    pub acquire_timeout: Duration,

    /// How long a statement waits on a locked database file. Default: 5 seconds
    pub busy_timeout: Duration,

    /// Apply pending migrations when opening. Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Configuration for the database file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: DbLocation::File(path.into()),
            max_connections: 2,
            acquire_timeout: Duration::from_secs(10),
            busy_timeout: Duration::from_secs(5),
            run_migrations: true,
        }
    }

    /// Configuration for an isolated in-memory database (tests).
    pub fn in_memory() -> Self {
        DbConfig {
            location: DbLocation::Memory,
            // Every connection to ":memory:" is a different database.
            max_connections: 1,
            ..DbConfig::new(":memory:")
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = match &self.location {
            DbLocation::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::Open(e.to_string()))?,
            DbLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                // NORMAL: no corruption on power loss, the last write may be lost
                .synchronous(SqliteSynchronous::Normal),
        };

        Ok(options.busy_timeout(self.busy_timeout))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the cart database. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens the pool and, unless disabled, applies migrations.
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(location = ?config.location, "Opening cart database");

        let options = config.connect_options()?;
        debug!(busy_timeout = ?config.busy_timeout, "Connection options configured");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(config.acquire_timeout)
            // Never recycle: the in-memory database dies with its last connection.
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect_with(options)
            .await
            .map_err(|e| DbError::Open(e.to_string()))?;

        let db = Database { pool };

        if config.run_migrations {
            migrations::run_migrations(&db.pool).await?;
        }

        Ok(db)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Key-value storage over this database.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let raw = db.kv().get("cart").await?;
    /// ```
    pub fn kv(&self) -> SqliteStorage {
        SqliteStorage::new(self.pool.clone())
    }

    /// Closes the pool. Every later statement fails with [`DbError::Closed`].
    pub async fn close(&self) {
        debug!("Closing cart database");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
