//! Durable key-value storage backends.
//!
//! The cart needs exactly one slot: a string value under a string key, read
//! once at load and overwritten after every mutation. Calls are synchronous
//! from the store's point of view.

pub mod file;
pub mod memory;

use crate::error::StorageResult;

/// Abstraction for durable key-value storage.
///
/// Enables multiple implementations (in-memory, file system) without
/// coupling the cart store to a specific mechanism.
pub trait KeyValueStorage {
    /// Reads the value under `key`. Returns `None` if nothing is stored.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// On `Err` the previous value must still be readable.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key`. Returns `Ok` even if the key doesn't exist.
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
