//! # SQLite-Backed Cart Store
//!
//! Same operations as `lumina_store::CartStore`, over an asynchronous backend.
//!
//! ## Commit Or Leave Untouched
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add_item(p).await                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  next = cart.clone(); next.add_item(p)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  kv.set("cart", next.encode()).await                                   │
//! │       │                                                                 │
//! │       ├── Ok  ──► cart = next, return Ok(change)                       │
//! │       │                                                                 │
//! │       └── Err ──► cart untouched, error!(...), Err(Persistence)        │
//! │                                                                         │
//! │  Memory only changes after the write resolves. If the future is        │
//! │  dropped mid-write, the next operation reloads the slot first.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, error, info, warn};

use lumina_core::{
    Cart, CartChange, CartCommand, CartError, CartResult, CartSnapshot, CheckoutStatus,
    DecodeReport, LineItem, Price, Product, SlotState, CART_STORAGE_KEY,
};

use crate::pool::Database;
use crate::storage::SqliteStorage;

/// The persisted cart, backed by the `kv_store` table.
#[derive(Debug)]
pub struct DbCartStore {
    cart: Cart,
    kv: SqliteStorage,
    key: String,
    load_report: DecodeReport,
    /// Set while a write is awaited. Still set on entry if that future was dropped.
    write_pending: bool,
}

impl DbCartStore {
    /// Loads the cart from the default `"cart"` slot. Never fails.
    pub async fn load(db: &Database) -> Self {
        Self::load_with_key(db, CART_STORAGE_KEY).await
    }

    /// Loads the cart from a custom slot. Never fails.
    pub async fn load_with_key(db: &Database, key: impl Into<String>) -> Self {
        let key = key.into();
        let kv = db.kv();

        let raw = match kv.get(&key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %key, error = %e, "Cart table unreadable, starting with an empty cart");
                None
            }
        };

        let (cart, load_report) = Cart::decode(raw.as_deref());
        match load_report.state {
            SlotState::Absent => debug!(key = %key, "No saved cart"),
            SlotState::Corrupt => {
                warn!(key = %key, "Saved cart is not valid JSON, starting with an empty cart")
            }
            SlotState::Restored => info!(key = %key, items = load_report.restored, "Cart restored"),
        }
        if load_report.discarded > 0 {
            warn!(
                key = %key,
                discarded = load_report.discarded,
                "Discarded saved cart entries that violate cart invariants"
            );
        }

        DbCartStore {
            cart,
            kv,
            key,
            load_report,
            write_pending: false,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    pub async fn add_item(&mut self, product: Product) -> CartResult<CartChange> {
        self.commit("add_item", |cart| cart.add_item(product)).await
    }

    pub async fn remove_item(&mut self, id: &str, confirmed: bool) -> CartResult<CartChange> {
        self.commit("remove_item", |cart| cart.remove_item(id, confirmed))
            .await
    }

    pub async fn set_quantity(&mut self, id: &str, quantity: i64) -> CartResult<CartChange> {
        self.commit("set_quantity", |cart| cart.set_quantity(id, quantity))
            .await
    }

    pub async fn increase_quantity(&mut self, id: &str) -> CartResult<CartChange> {
        self.commit("increase_quantity", |cart| cart.increase_quantity(id))
            .await
    }

    pub async fn decrease_quantity(&mut self, id: &str) -> CartResult<CartChange> {
        self.commit("decrease_quantity", |cart| cart.decrease_quantity(id))
            .await
    }

    pub async fn clear(&mut self, confirmed: bool) -> CartResult<CartChange> {
        self.commit("clear", |cart| cart.clear(confirmed)).await
    }

    pub async fn apply(&mut self, command: CartCommand) -> CartResult<CartChange> {
        self.commit("apply", |cart| cart.apply(command)).await
    }

    /// Checkout stub. Does not touch storage.
    pub fn checkout(&self) -> CartResult<CheckoutStatus> {
        self.cart.checkout()
    }

    async fn commit<F>(&mut self, operation: &'static str, mutate: F) -> CartResult<CartChange>
    where
        F: FnOnce(&mut Cart) -> CartResult<CartChange>,
    {
        if self.write_pending {
            self.resync().await;
        }

        let mut next = self.cart.clone();
        let change = match mutate(&mut next) {
            Ok(change) => change,
            Err(err) => {
                debug!(operation, error = %err, "Cart operation refused");
                return Err(err);
            }
        };

        if !change.is_mutation() {
            return Ok(change);
        }

        self.write_pending = true;
        let written = self.kv.set(&self.key, &next.encode()).await;
        self.write_pending = false;

        if let Err(e) = written {
            error!(
                operation,
                key = %self.key,
                error = %e,
                "Cart write failed, in-memory cart left unchanged"
            );
            return Err(CartError::Persistence(e.to_string()));
        }

        self.cart = next;
        debug!(operation, ?change, items = self.cart.len(), "Cart change committed");
        Ok(change)
    }

    /// Reloads the slot after a write whose outcome was never observed.
    async fn resync(&mut self) {
        match self.kv.get(&self.key).await {
            Ok(raw) => {
                self.cart = Cart::decode(raw.as_deref()).0;
                self.write_pending = false;
                warn!(
                    key = %self.key,
                    items = self.cart.len(),
                    "Previous cart write was cancelled, reloaded from storage"
                );
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Cannot reload cart after a cancelled write");
            }
        }
    }

    // =========================================================================
    // Projections
    // =========================================================================

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn total_price(&self) -> Price {
        self.cart.total_price()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.cart.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// What was found in the table when this store was loaded.
    pub fn load_report(&self) -> DecodeReport {
        self.load_report
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
