//! # lumina-store: Persisted Cart for the Lumina Storefront
//!
//! Owns the single cart of a browsing session and keeps it in sync with a
//! durable key-value slot.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Lumina Cart Data Flow                            │
//! │                                                                         │
//! │  Adapter (CLI / DOM bindings)                                          │
//! │       │  add_item, set_quantity, remove_item, ...                      │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  lumina-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌──────────────────────────────────┐    │   │
//! │  │   │  CartStore    │    │  KeyValueStorage (trait)         │    │   │
//! │  │   │ (cart_store)  │───►│  ├── MemoryStorage (tests)       │    │   │
//! │  │   │ commit or     │    │  └── FileStorage (one JSON file  │    │   │
//! │  │   │ roll back     │    │       per key, atomic rename)    │    │   │
//! │  │   └───────────────┘    └──────────────────────────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cart slot: [{"id":"p1","name":"Serum X","price":250000,...}]           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use lumina_core::{Price, Product};
//! use lumina_store::{CartStore, MemoryStorage};
//!
//! let mut store = CartStore::load(MemoryStorage::new());
//! store.add_item(Product::new("p1", "Serum X", Price::new(250_000), "/img/p1.jpg")).unwrap();
//!
//! assert_eq!(store.item_count(), 1);
//! assert_eq!(store.total_price().to_string(), "250.000 ₫");
//! ```

pub mod cart_store;
pub mod error;
pub mod storage;

pub use cart_store::CartStore;
pub use error::{StorageError, StorageResult};
pub use storage::file::FileStorage;
pub use storage::memory::MemoryStorage;
pub use storage::KeyValueStorage;
