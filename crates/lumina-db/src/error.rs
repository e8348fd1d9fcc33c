//! # Database Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error / MigrateError                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module)                                                 │
//! │       │                                                                 │
//! │       ├──► Database::new() → caller decides (CLI exits with code 2)    │
//! │       │                                                                 │
//! │       └──► DbCartStore write → logged, cart left unchanged,            │
//! │            surfaced as CartError::Persistence                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Cart database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// The database could not be opened.
    ///
    /// ## When This Occurs
    /// - Data directory missing or read-only
    /// - File is not a SQLite database
    #[error("Cannot open database: {0}")]
    Open(String),

    /// Applying the embedded schema failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// SQLite rejected a statement.
    ///
    /// ## When This Occurs
    /// - Disk full
    /// - Lock still held after `busy_timeout`
    /// - `kv_store` missing because migrations were disabled
    #[error("Query failed: {0}")]
    Query(String),

    /// No connection became free within the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// The pool was closed.
    #[error("Database is closed")]
    Closed,

    /// Any other driver failure.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// ```text
/// sqlx::Error::Database       → DbError::Query
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// sqlx::Error::PoolClosed     → DbError::Closed
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::Query(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::Closed,
            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Migration(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlx_error_mapping() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::Closed
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::Internal(_)
        ));
        assert_eq!(DbError::Closed.to_string(), "Database is closed");
    }
}
