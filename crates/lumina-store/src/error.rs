//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / quota check                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StorageError (this module) ← logged at error level by CartStore       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartError::Persistence ← in-memory change already rolled back         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ErrorKind::PersistenceError → "Không thể lưu giỏ hàng..."             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Durable storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be used right now.
    ///
    /// ## When This Occurs
    /// - Storage disabled (private browsing, revoked permission)
    /// - Test double configured to fail
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// The write would exceed the backend's quota.
    #[error("Storage quota exceeded: need {needed} bytes, {available} available")]
    QuotaExceeded { needed: usize, available: usize },

    /// The key cannot be mapped onto the backend.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// File system failure.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StorageError::QuotaExceeded {
            needed: 120,
            available: 64,
        };
        assert_eq!(
            err.to_string(),
            "Storage quota exceeded: need 120 bytes, 64 available"
        );
        assert_eq!(
            StorageError::InvalidKey("../x".into()).to_string(),
            "Invalid storage key: \"../x\""
        );
    }
}
