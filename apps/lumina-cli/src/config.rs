//! # CLI Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Load Order (later overrides earlier)                 │
//! │                                                                         │
//! │  1. Defaults            backend = "file", storage_key = "cart"         │
//! │  2. Config file         --config PATH, or <config dir>/lumina.toml     │
//! │  3. Environment         LUMINA_BACKEND, LUMINA_DATA_DIR,               │
//! │                         LUMINA_STORAGE_KEY                             │
//! │  4. Command-line flags  --backend, --data-dir, --key                   │
//! │                                                                         │
//! │  validate() runs last                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # lumina.toml
//! backend = "sqlite"
//! data_dir = "/var/lib/lumina"
//! storage_key = "cart"
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

/// File name of the SQLite database inside the data directory.
pub const DATABASE_FILE: &str = "lumina.db";

// =============================================================================
// Backend
// =============================================================================

/// Where the cart slot is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// `<data_dir>/<key>.json`
    #[default]
    File,

    /// `kv_store` table in `<data_dir>/lumina.db`
    Sqlite,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::File => write!(f, "file"),
            Backend::Sqlite => write!(f, "sqlite"),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "file" | "json" => Ok(Backend::File),
            "sqlite" | "db" => Ok(Backend::Sqlite),
            other => Err(AppError::Config(format!(
                "Unknown backend: '{}'. Valid options: file, sqlite",
                other
            ))),
        }
    }
}

// =============================================================================
// CliConfig
// =============================================================================

/// Resolved adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Persistence backend.
    #[serde(default)]
    pub backend: Backend,

    /// Directory holding the cart files or database.
    /// Default: the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Storage key of the cart slot.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

fn default_storage_key() -> String {
    lumina_core::CART_STORAGE_KEY.to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        CliConfig {
            backend: Backend::default(),
            data_dir: None,
            storage_key: default_storage_key(),
        }
    }
}

impl CliConfig {
    /// Loads defaults, then the config file, then the process environment.
    ///
    /// An explicit `config_path` must exist; the platform default may not.
    /// Call [`validate`](Self::validate) after applying command-line flags.
    pub fn load(config_path: Option<&Path>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Applies `LUMINA_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("LUMINA_BACKEND") {
            debug!(backend = %backend, "Overriding backend from environment");
            self.backend = backend.parse()?;
        }

        if let Some(dir) = lookup("LUMINA_DATA_DIR") {
            debug!(dir = %dir, "Overriding data directory from environment");
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(key) = lookup("LUMINA_STORAGE_KEY") {
            self.storage_key = key;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(AppError::Config("storage_key must not be empty".into()));
        }

        let key_ok = self
            .storage_key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !key_ok {
            return Err(AppError::Config(format!(
                "storage_key may only contain letters, digits, '-' and '_', got: {}",
                self.storage_key
            )));
        }

        Ok(())
    }

    /// Resolved data directory.
    pub fn data_dir(&self) -> AppResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        directories::ProjectDirs::from("com", "lumina", "cart")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| AppError::Config("Could not determine app data directory".into()))
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "lumina", "cart")
            .map(|dirs| dirs.config_dir().join("lumina.toml"))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.backend, Backend::File);
        assert_eq!(config.storage_key, "cart");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("file".parse::<Backend>().unwrap(), Backend::File);
        assert_eq!("SQLite".parse::<Backend>().unwrap(), Backend::Sqlite);
        assert!("redis".parse::<Backend>().is_err());
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config: CliConfig =
            toml::from_str("backend = \"file\"\nstorage_key = \"from-file\"").unwrap();

        config
            .apply_env_overrides(env(&[
                ("LUMINA_BACKEND", "sqlite"),
                ("LUMINA_DATA_DIR", "/tmp/lumina-data"),
            ]))
            .unwrap();

        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/lumina-data")));
        assert_eq!(config.storage_key, "from-file");
    }

    #[test]
    fn test_unknown_backend_in_env_is_rejected() {
        let mut config = CliConfig::default();
        let result = config.apply_env_overrides(env(&[("LUMINA_BACKEND", "redis")]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_validation() {
        let mut config = CliConfig::default();

        config.storage_key = "  ".into();
        assert!(config.validate().is_err());

        config.storage_key = "../cart".into();
        assert!(config.validate().is_err());

        config.storage_key = "cart_v2".into();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lumina.toml");
        std::fs::write(&path, "backend = \"sqlite\"\n").unwrap();

        let config = CliConfig::from_file(&path).unwrap();
        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.storage_key, "cart");

        assert!(CliConfig::from_file(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_toml_serialization() {
        let config = CliConfig {
            backend: Backend::Sqlite,
            data_dir: Some(PathBuf::from("/data")),
            storage_key: "cart".into(),
        };
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("backend = \"sqlite\""));
        assert_eq!(toml::from_str::<CliConfig>(&toml_str).unwrap(), config);
    }
}
