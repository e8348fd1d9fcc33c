//! # SQLite Key-Value Storage
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  kv_store                                                               │
//! │  ┌────────┬──────────────────────────────┬───────────────────────────┐  │
//! │  │ key    │ value                        │ updated_at                │  │
//! │  ├────────┼──────────────────────────────┼───────────────────────────┤  │
//! │  │ cart   │ [{"id":"p1",...,"quantity":2}]│ 2026-10-17T08:15:02Z     │  │
//! │  └────────┴──────────────────────────────┴───────────────────────────┘  │
//! │                                                                         │
//! │  set() is a single upsert: the previous value stays readable until     │
//! │  the statement commits.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Key-value slots in the `kv_store` table.
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Creates a storage over an open pool.
    pub fn new(pool: SqlitePool) -> Self {
        SqliteStorage { pool }
    }

    /// Reads the value under `key`. Returns `None` if nothing is stored.
    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(key = %key, bytes = value.len(), "Slot written");
        Ok(())
    }

    /// Removes `key`. Returns `Ok` even if the key doesn't exist.
    pub async fn remove(&self, key: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// When the slot was last written.
    pub async fn updated_at(&self, key: &str) -> DbResult<Option<DateTime<Utc>>> {
        let updated_at: Option<DateTime<Utc>> =
            sqlx::query_scalar("SELECT updated_at FROM kv_store WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(updated_at)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_get_set_remove() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();

        assert_eq!(kv.get("cart").await.unwrap(), None);
        assert_eq!(kv.updated_at("cart").await.unwrap(), None);

        kv.set("cart", "[]").await.unwrap();
        assert_eq!(kv.get("cart").await.unwrap().as_deref(), Some("[]"));
        assert!(kv.updated_at("cart").await.unwrap().is_some());

        kv.set("cart", r#"[{"id":"p1"}]"#).await.unwrap();
        assert_eq!(
            kv.get("cart").await.unwrap().as_deref(),
            Some(r#"[{"id":"p1"}]"#)
        );

        kv.remove("cart").await.unwrap();
        kv.remove("cart").await.unwrap();
        assert_eq!(kv.get("cart").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();

        kv.set("cart", "[1]").await.unwrap();
        kv.set("wishlist", "[2]").await.unwrap();
        kv.remove("wishlist").await.unwrap();

        assert_eq!(kv.get("cart").await.unwrap().as_deref(), Some("[1]"));
    }

    #[tokio::test]
    async fn test_write_after_close_fails() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let kv = db.kv();
        db.close().await;

        assert!(kv.set("cart", "[]").await.is_err());
    }
}
