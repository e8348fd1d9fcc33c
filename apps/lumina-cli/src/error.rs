//! # CLI Error Type
//!
//! ## Exit Codes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  0  operation succeeded (including "cart already empty")               │
//! │  1  operation refused by cart rules (not found, out of range, ...)     │
//! │  2  storage or configuration failure                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Refused cart operations are not `AppError`s: they are rendered as a
//! `CartOutcome` and mapped to exit code 1 by the caller. `AppError` covers
//! what prevents the adapter from running an operation at all.

use lumina_core::ErrorKind;
use lumina_db::DbError;
use thiserror::Error;

/// Process exit code for success.
pub const EXIT_OK: u8 = 0;

/// Process exit code for an operation refused by cart rules.
pub const EXIT_REFUSED: u8 = 1;

/// Process exit code for storage or configuration failures.
pub const EXIT_FAILURE: u8 = 2;

/// Errors that stop the adapter before or around a cart operation.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration is invalid.
    ///
    /// ## When This Occurs
    /// - Empty storage key
    /// - Unknown backend name in the environment
    /// - No platform data directory and none configured
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Config file could not be parsed.
    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// `apply` payload is not a valid cart command.
    #[error("Invalid command JSON: {0}")]
    InvalidCommand(#[source] serde_json::Error),

    /// SQLite backend could not be opened.
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    /// File system failure (config file, data directory).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::InvalidCommand(_) => EXIT_REFUSED,
            _ => EXIT_FAILURE,
        }
    }
}

/// Exit code for a cart operation's failure reason.
pub fn exit_code_for(reason: Option<ErrorKind>) -> u8 {
    match reason {
        None => EXIT_OK,
        Some(ErrorKind::PersistenceError) => EXIT_FAILURE,
        Some(_) => EXIT_REFUSED,
    }
}

/// Result type for adapter operations.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code_for(None), 0);
        assert_eq!(exit_code_for(Some(ErrorKind::NotFound)), 1);
        assert_eq!(exit_code_for(Some(ErrorKind::NotConfirmed)), 1);
        assert_eq!(exit_code_for(Some(ErrorKind::PersistenceError)), 2);

        assert_eq!(AppError::Config("x".into()).exit_code(), 2);
        let bad_json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(AppError::InvalidCommand(bad_json).exit_code(), 1);
    }
}
