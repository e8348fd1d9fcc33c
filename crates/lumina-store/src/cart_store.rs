//! # Cart Store
//!
//! The session's single cart, persisted after every successful mutation.
//!
//! ## Commit Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Operation Call                                   │
//! │                                                                         │
//! │  next = cart.clone()                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  next.<operation>() ── Err ──► return Err (cart untouched)             │
//! │       │ Ok(change)                                                      │
//! │       ▼                                                                 │
//! │  change is a no-op? ── yes ──► return Ok(change) (no write)            │
//! │       │ no                                                              │
//! │       ▼                                                                 │
//! │  storage.set(key, next.encode()) ── Err ──► error!(...)                │
//! │       │ Ok                                   return Err(Persistence)    │
//! │       ▼                                                                 │
//! │  cart = next; return Ok(change)                                        │
//! │                                                                         │
//! │  After every call: persisted slot == in-memory cart                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Single-threaded and run-to-completion: every method takes `&mut self`,
//! so no other caller can observe the cart between the in-memory change and
//! the write. No locking is needed.

use tracing::{debug, error, info, warn};

use lumina_core::{
    Cart, CartChange, CartCommand, CartError, CartResult, CartSnapshot, CheckoutStatus,
    DecodeReport, LineItem, Price, Product, SlotState, CART_STORAGE_KEY,
};

use crate::storage::KeyValueStorage;

/// The persisted cart of one browsing session.
///
/// The storage slot under `key` is owned exclusively by this store.
#[derive(Debug)]
pub struct CartStore<S: KeyValueStorage> {
    cart: Cart,
    storage: S,
    key: String,
    load_report: DecodeReport,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Loads the cart from the default `"cart"` slot.
    ///
    /// Never fails: an absent, unreadable or corrupt slot yields an empty cart.
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, CART_STORAGE_KEY)
    }

    /// Loads the cart from a custom slot.
    pub fn load_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let raw = match storage.get(&key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %key, error = %e, "Cart storage unreadable, starting with an empty cart");
                None
            }
        };

        let (cart, load_report) = Cart::decode(raw.as_deref());
        match load_report.state {
            SlotState::Absent => debug!(key = %key, "No saved cart"),
            SlotState::Corrupt => {
                warn!(key = %key, "Saved cart is not valid JSON, starting with an empty cart")
            }
            SlotState::Restored => info!(
                key = %key,
                items = load_report.restored,
                "Cart restored"
            ),
        }
        if load_report.discarded > 0 {
            warn!(
                key = %key,
                discarded = load_report.discarded,
                "Discarded saved cart entries that violate cart invariants"
            );
        }

        CartStore {
            cart,
            storage,
            key,
            load_report,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product, or increments its quantity when already in the cart.
    pub fn add_item(&mut self, product: Product) -> CartResult<CartChange> {
        self.commit("add_item", |cart| cart.add_item(product))
    }

    /// Removes an item. Only proceeds when `confirmed` is true.
    pub fn remove_item(&mut self, id: &str, confirmed: bool) -> CartResult<CartChange> {
        self.commit("remove_item", |cart| cart.remove_item(id, confirmed))
    }

    /// Sets an item's quantity (must be in `1..=99`).
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> CartResult<CartChange> {
        self.commit("set_quantity", |cart| cart.set_quantity(id, quantity))
    }

    /// Increments an item's quantity by one.
    pub fn increase_quantity(&mut self, id: &str) -> CartResult<CartChange> {
        self.commit("increase_quantity", |cart| cart.increase_quantity(id))
    }

    /// Decrements an item's quantity by one. Rejected at 1.
    pub fn decrease_quantity(&mut self, id: &str) -> CartResult<CartChange> {
        self.commit("decrease_quantity", |cart| cart.decrease_quantity(id))
    }

    /// Empties the cart. Only proceeds when `confirmed` is true.
    pub fn clear(&mut self, confirmed: bool) -> CartResult<CartChange> {
        self.commit("clear", |cart| cart.clear(confirmed))
    }

    /// Applies a command decoded from an adapter message.
    pub fn apply(&mut self, command: CartCommand) -> CartResult<CartChange> {
        self.commit("apply", |cart| cart.apply(command))
    }

    /// Checkout stub. Does not touch storage.
    pub fn checkout(&self) -> CartResult<CheckoutStatus> {
        let result = self.cart.checkout();
        debug!(?result, "checkout");
        result
    }

    fn commit<F>(&mut self, operation: &'static str, mutate: F) -> CartResult<CartChange>
    where
        F: FnOnce(&mut Cart) -> CartResult<CartChange>,
    {
        let mut next = self.cart.clone();
        let change = match mutate(&mut next) {
            Ok(change) => change,
            Err(err) => {
                debug!(operation, error = %err, "Cart operation refused");
                return Err(err);
            }
        };

        if !change.is_mutation() {
            debug!(operation, ?change, "Cart unchanged, nothing to write");
            return Ok(change);
        }

        if let Err(e) = self.storage.set(&self.key, &next.encode()) {
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

    // =========================================================================
    // Projections
    // =========================================================================

    /// Ordered, read-only snapshot of the line items.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Sum of quantities.
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    /// Sum of `price * quantity`.
    pub fn total_price(&self) -> Price {
        self.cart.total_price()
    }

    /// Existence check.
    pub fn contains(&self, id: &str) -> bool {
        self.cart.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Read model for render consumers.
    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    /// The underlying cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// What was found in storage when this store was loaded.
    pub fn load_report(&self) -> DecodeReport {
        self.load_report
    }

    /// Storage key of the cart slot.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read access to the backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Tears the store down, returning the backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    #[cfg(test)]
    fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::file::FileStorage;
    use crate::storage::memory::MemoryStorage;
    use lumina_core::{Direction, ErrorKind};
    use proptest::prelude::*;

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, id.to_uppercase(), Price::new(price), "x")
    }

    fn persisted(store: &CartStore<MemoryStorage>) -> Cart {
        Cart::decode(store.storage().raw(store.key())).0
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut store = CartStore::load(MemoryStorage::new());
        assert!(store.is_empty());

        store.add_item(product("a", 100_000)).unwrap();
        assert_eq!(store.item_count(), 1);
        assert_eq!(store.total_price(), Price::new(100_000));

        let change = store.add_item(product("a", 100_000)).unwrap();
        assert_eq!(change.direction(), Some(Direction::Increased));
        assert_eq!(store.items()[0].quantity, 2);
        assert_eq!(store.total_price(), Price::new(200_000));

        store.decrease_quantity("a").unwrap();
        assert_eq!(store.items()[0].quantity, 1);

        let err = store.decrease_quantity("a").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert_eq!(store.items()[0].quantity, 1);

        store.remove_item("a", true).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.total_price(), Price::zero());
        assert_eq!(store.storage().raw("cart"), Some("[]"));
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let mut store = CartStore::load(MemoryStorage::new());

        store.add_item(product("a", 100)).unwrap();
        assert_eq!(&persisted(&store), store.cart());

        store.add_item(product("b", 250)).unwrap();
        store.set_quantity("b", 7).unwrap();
        assert_eq!(&persisted(&store), store.cart());

        store.remove_item("a", true).unwrap();
        assert_eq!(&persisted(&store), store.cart());

        store.clear(true).unwrap();
        assert!(persisted(&store).is_empty());
    }

    #[test]
    fn test_round_trip_into_fresh_store() {
        let mut store = CartStore::load(MemoryStorage::new());
        store.add_item(product("z", 10)).unwrap();
        store.add_item(product("m", 20)).unwrap();
        store.add_item(product("a", 30)).unwrap();
        store.set_quantity("m", 12).unwrap();
        let before: Vec<LineItem> = store.items().to_vec();

        let reloaded = CartStore::load(store.into_storage());
        assert_eq!(reloaded.items(), before.as_slice());
        assert_eq!(reloaded.load_report().state, SlotState::Restored);
    }

    #[test]
    fn test_rejected_operations_do_not_write() {
        let mut store = CartStore::load(MemoryStorage::new());
        store.add_item(product("a", 100)).unwrap();
        let writes = store.storage().write_count();

        assert!(store.set_quantity("a", 0).is_err());
        assert!(store.set_quantity("a", 100).is_err());
        assert!(store.remove_item("a", false).is_err());
        assert!(store.remove_item("missing", true).is_err());
        assert!(store.clear(false).is_err());
        store.set_quantity("a", 1).unwrap();

        assert_eq!(store.storage().write_count(), writes);
        assert_eq!(store.items()[0].quantity, 1);
    }

    #[test]
    fn test_clear_on_empty_is_info_without_write() {
        let mut store = CartStore::load(MemoryStorage::new());
        assert_eq!(store.clear(true), Ok(CartChange::AlreadyEmpty));
        assert_eq!(store.storage().write_count(), 0);
    }

    #[test]
    fn test_write_failure_rolls_back() {
        let mut store = CartStore::load(MemoryStorage::new());
        store.add_item(product("a", 100)).unwrap();
        let before = store.cart().clone();

        store.storage_mut().fail_writes(true);

        let err = store.add_item(product("b", 200)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PersistenceError);
        assert_eq!(store.cart(), &before);

        assert!(store.increase_quantity("a").is_err());
        assert!(store.remove_item("a", true).is_err());
        assert!(store.clear(true).is_err());
        assert_eq!(store.cart(), &before);
        assert_eq!(&persisted(&store), &before);

        store.storage_mut().fail_writes(false);
        store.add_item(product("b", 200)).unwrap();
        assert_eq!(store.item_count(), 2);
    }

    #[test]
    fn test_quota_exceeded_rolls_back() {
        let mut store = CartStore::load(MemoryStorage::new().with_quota(100));
        store.add_item(product("a", 100)).unwrap();

        let long_name = Product::new("b", "B".repeat(200), Price::new(1), "x");
        let err = store.add_item(long_name).unwrap_err();
        assert!(matches!(err, CartError::Persistence(ref msg) if msg.contains("quota")));
        assert!(!store.contains("b"));
        assert_eq!(&persisted(&store), store.cart());
    }

    #[test]
    fn test_load_from_corrupt_slot_is_empty() {
        let store = CartStore::load(MemoryStorage::with_entry("cart", "{oops"));
        assert!(store.is_empty());
        assert_eq!(store.load_report().state, SlotState::Corrupt);
    }

    #[test]
    fn test_load_from_unreadable_storage_is_empty() {
        let mut storage = MemoryStorage::with_entry(
            "cart",
            r#"[{"id":"p1","name":"Serum X","price":250000,"image":"/img/p1.jpg","quantity":2}]"#,
        );
        storage.fail_reads(true);

        let store = CartStore::load(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_spec_layout() {
        let store = CartStore::load(MemoryStorage::with_entry(
            "cart",
            r#"[{"id":"p1","name":"Serum X","price":250000,"image":"/img/p1.jpg","quantity":2}]"#,
        ));
        assert_eq!(store.item_count(), 2);
        assert_eq!(store.total_price().to_string(), "500.000 ₫");
        assert!(store.contains("p1"));
    }

    #[test]
    fn test_custom_key_is_isolated() {
        let mut store = CartStore::load_with_key(MemoryStorage::new(), "cart-preview");
        store.add_item(product("a", 100)).unwrap();

        let storage = store.into_storage();
        assert!(storage.raw("cart").is_none());
        assert!(storage.raw("cart-preview").is_some());
        assert!(CartStore::load(storage).is_empty());
    }

    #[test]
    fn test_projections_are_idempotent() {
        let mut store = CartStore::load(MemoryStorage::new());
        store.add_item(product("a", 123)).unwrap();
        store.set_quantity("a", 3).unwrap();

        let totals: Vec<_> = (0..5).map(|_| store.total_price()).collect();
        let counts: Vec<_> = (0..5).map(|_| store.item_count()).collect();
        assert!(totals.iter().all(|t| *t == Price::new(369)));
        assert!(counts.iter().all(|c| *c == 3));
    }

    #[test]
    fn test_checkout() {
        let mut store = CartStore::load(MemoryStorage::new());
        assert_eq!(store.checkout(), Err(CartError::EmptyCart));
        store.add_item(product("a", 1)).unwrap();
        assert_eq!(store.checkout(), Ok(CheckoutStatus::ComingSoon));
    }

    #[test]
    fn test_file_backed_store_survives_reload() {
        let dir = tempfile::tempdir().unwrap();

        let mut store = CartStore::load(FileStorage::new(dir.path()));
        store.add_item(product("p1", 250_000)).unwrap();
        store.increase_quantity("p1").unwrap();
        drop(store);

        let store = CartStore::load(FileStorage::new(dir.path()));
        assert_eq!(store.items()[0].quantity, 2);
        assert_eq!(store.total_price(), Price::new(500_000));
    }

    // =========================================================================
    // Properties
    // =========================================================================

    fn command() -> impl Strategy<Value = CartCommand> {
        let id = (0u8..5).prop_map(|n| format!("p{n}"));
        prop_oneof![
            (id.clone(), 1i64..1_000_000).prop_map(|(id, price)| CartCommand::Add {
                product: Product::new(id, "P", Price::new(price), "x"),
            }),
            id.clone().prop_map(|id| CartCommand::Increase { id }),
            id.clone().prop_map(|id| CartCommand::Decrease { id }),
            (id.clone(), -2i64..=102).prop_map(|(id, quantity)| CartCommand::SetQuantity {
                id,
                quantity
            }),
            (id, any::<bool>()).prop_map(|(id, confirmed)| CartCommand::Remove { id, confirmed }),
            any::<bool>().prop_map(|confirmed| CartCommand::Clear { confirmed }),
        ]
    }

    proptest! {
        #[test]
        fn prop_distinct_adds_sum_up(prices in proptest::collection::vec(1i64..=10_000_000, 0..40)) {
            let mut store = CartStore::load(MemoryStorage::new());
            for (i, price) in prices.iter().enumerate() {
                store.add_item(Product::new(format!("p{i}"), "P", Price::new(*price), "x")).unwrap();
            }
            prop_assert_eq!(store.item_count(), prices.len() as i64);
            prop_assert_eq!(store.total_price().amount(), prices.iter().sum::<i64>());
        }

        #[test]
        fn prop_set_quantity_in_range_always_succeeds(q in 1i64..=99) {
            let mut store = CartStore::load(MemoryStorage::new());
            store.add_item(product("a", 10)).unwrap();
            prop_assert!(store.set_quantity("a", q).is_ok());
            prop_assert_eq!(store.items()[0].quantity, q);
        }

        #[test]
        fn prop_invariants_hold_and_storage_matches(commands in proptest::collection::vec(command(), 0..60)) {
            let mut store = CartStore::load(MemoryStorage::new());
            for cmd in commands {
                let _ = store.apply(cmd);

                let items = store.items();
                prop_assert!(items.iter().all(|i| (1..=99).contains(&i.quantity)));
                for (n, item) in items.iter().enumerate() {
                    prop_assert!(items[n + 1..].iter().all(|other| other.id != item.id));
                }
                prop_assert_eq!(&persisted(&store), store.cart());
            }
        }
    }
}
