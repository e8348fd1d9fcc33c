//! # lumina-db: SQLite Persistence for the Cart
//!
//! Asynchronous key-value storage on SQLite (sqlx) and [`DbCartStore`], the
//! cart store for backends whose writes must be awaited.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Lumina Cart Data Flow                            │
//! │                                                                         │
//! │  lumina add --backend sqlite p1 ...                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     lumina-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  DbCartStore  │───►│ SqliteStorage │───►│   Database   │  │   │
//! │  │   │   (cart.rs)   │    │ (storage.rs)  │    │  (pool.rs)   │  │   │
//! │  │   └───────┬───────┘    └───────────────┘    └──────┬───────┘  │   │
//! │  │           │                                        │          │   │
//! │  │           ▼                                        ▼          │   │
//! │  │     lumina-core::Cart                   migrations/sqlite     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lumina.db (WAL mode)                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,ignore
//! let db = Database::new(DbConfig::new("./lumina.db")).await?;
//! let mut store = DbCartStore::load(&db).await;
//! store.add_item(product).await?;
//! ```

pub mod cart;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod storage;

pub use cart::DbCartStore;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use storage::SqliteStorage;
