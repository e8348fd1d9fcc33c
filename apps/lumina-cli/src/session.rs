//! # Cart Session
//!
//! One process invocation = one browsing session over the configured backend.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Backend::File    → CartStore<FileStorage>   (<data_dir>/<key>.json)   │
//! │  Backend::Sqlite  → DbCartStore              (<data_dir>/lumina.db)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::info;

use lumina_core::{Cart, CartChange, CartCommand, CartResult, CheckoutStatus};
use lumina_db::{Database, DbCartStore, DbConfig};
use lumina_store::{CartStore, FileStorage};

use crate::config::{Backend, CliConfig, DATABASE_FILE};
use crate::error::AppResult;

/// The loaded cart store for the configured backend.
#[derive(Debug)]
pub enum Session {
    File(CartStore<FileStorage>),
    Sqlite { db: Database, store: DbCartStore },
}

impl Session {
    /// Opens the backend and loads the cart.
    ///
    /// Only backend setup can fail; a missing or corrupt cart slot loads empty.
    pub async fn open(config: &CliConfig) -> AppResult<Self> {
        let data_dir = config.data_dir()?;
        info!(backend = %config.backend, dir = %data_dir.display(), "Opening cart session");

        match config.backend {
            Backend::File => {
                let storage = FileStorage::new(data_dir);
                Ok(Session::File(CartStore::load_with_key(
                    storage,
                    config.storage_key.clone(),
                )))
            }
            Backend::Sqlite => {
                std::fs::create_dir_all(&data_dir)?;
                let db = Database::new(DbConfig::new(data_dir.join(DATABASE_FILE))).await?;
                let store = DbCartStore::load_with_key(&db, config.storage_key.clone()).await;
                Ok(Session::Sqlite { db, store })
            }
        }
    }

    /// Runs a mutating command and persists its result.
    pub async fn apply(&mut self, command: CartCommand) -> CartResult<CartChange> {
        match self {
            Session::File(store) => store.apply(command),
            Session::Sqlite { store, .. } => store.apply(command).await,
        }
    }

    pub fn checkout(&self) -> CartResult<CheckoutStatus> {
        self.cart().checkout()
    }

    pub fn cart(&self) -> &Cart {
        match self {
            Session::File(store) => store.cart(),
            Session::Sqlite { store, .. } => store.cart(),
        }
    }

    /// Releases the backend.
    pub async fn close(self) {
        if let Session::Sqlite { db, .. } = self {
            db.close().await;
        }
    }
}
