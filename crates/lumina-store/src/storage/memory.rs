//! In-memory storage with failure injection.
//!
//! Used by tests (each test constructs a fresh store against its own
//! `MemoryStorage`) and by adapters that do not need durability.

use std::collections::HashMap;

use super::KeyValueStorage;
use crate::error::{StorageError, StorageResult};

/// In-process key-value map.
///
/// ## Failure Injection
/// ```text
/// with_quota(n)      → set() fails with QuotaExceeded once keys + values > n bytes
/// fail_writes(true)  → set()/remove() fail with Unavailable
/// fail_reads(true)   → get() fails with Unavailable
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    fail_writes: bool,
    fail_reads: bool,
    writes: usize,
}

impl MemoryStorage {
    /// Creates an empty storage with no quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a storage pre-seeded with one value.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut storage = Self::new();
        storage.entries.insert(key.into(), value.into());
        storage
    }

    /// Limits the total size of keys and values, in bytes.
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota = Some(bytes);
        self
    }

    /// Makes every subsequent write fail (or succeed again).
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Makes every subsequent read fail (or succeed again).
    pub fn fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Raw stored value, bypassing failure injection.
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads {
            return Err(StorageError::Unavailable("reads disabled".into()));
        }
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("writes disabled".into()));
        }

        if let Some(quota) = self.quota {
            let used = self.used_bytes_without(key);
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(used);
            if needed > available {
                return Err(StorageError::QuotaExceeded { needed, available });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable("writes disabled".into()));
        }
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("cart").unwrap(), None);

        storage.set("cart", "[]").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[]"));
        assert_eq!(storage.write_count(), 1);

        storage.remove("cart").unwrap();
        storage.remove("cart").unwrap();
        assert_eq!(storage.get("cart").unwrap(), None);
    }

    #[test]
    fn test_quota_counts_replaced_value_once() {
        // "cart" (4) + 6 bytes = 10
        let mut storage = MemoryStorage::new().with_quota(10);
        storage.set("cart", "123456").unwrap();
        storage.set("cart", "abcdef").unwrap();

        let err = storage.set("cart", "1234567").unwrap_err();
        assert!(matches!(
            err,
            StorageError::QuotaExceeded {
                needed: 11,
                available: 10
            }
        ));
        assert_eq!(storage.raw("cart"), Some("abcdef"));
    }

    #[test]
    fn test_failure_injection() {
        let mut storage = MemoryStorage::with_entry("cart", "[]");
        storage.fail_writes(true);
        assert!(matches!(
            storage.set("cart", "x"),
            Err(StorageError::Unavailable(_))
        ));
        assert_eq!(storage.raw("cart"), Some("[]"));

        storage.fail_reads(true);
        assert!(storage.get("cart").is_err());
    }
}
