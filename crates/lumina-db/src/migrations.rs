//! Embedded schema for the cart database.
//!
//! Files in `migrations/sqlite/` are compiled into the binary and applied in
//! filename order (`001_kv_store.sql`, ...). Applied files are recorded in
//! `_sqlx_migrations` with their checksum, so editing one after release breaks
//! existing databases: add a new file instead.

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies pending migrations. Safe to call on every open.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    debug!(available = MIGRATOR.migrations.len(), "Applying migrations");
    MIGRATOR.run(pool).await?;
    info!("Cart database schema up to date");
    Ok(())
}
