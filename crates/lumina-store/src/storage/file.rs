//! File-backed storage.
//!
//! Each key is stored in `<dir>/<key>.json`. Writes go to a temp file first
//! and are renamed into place, so a crash mid-write leaves the previous value
//! intact.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tracing::debug;

use super::KeyValueStorage;
use crate::error::{StorageError, StorageResult};

/// Store for key-value slots as JSON files in one directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates a storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the file path backing `key`.
    ///
    /// Keys are restricted to `[A-Za-z0-9_-]` so they cannot escape `dir`.
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let temp_path = path.with_extension("json.tmp");
        {
            let mut file: File = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
        }

        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        debug!(path = %path.display(), bytes = value.len(), "Slot written");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("data"));

        assert_eq!(storage.get("cart").unwrap(), None);
        storage.set("cart", r#"[{"id":"p1"}]"#).unwrap();
        assert_eq!(
            storage.get("cart").unwrap().as_deref(),
            Some(r#"[{"id":"p1"}]"#)
        );
        assert!(dir.path().join("data").join("cart.json").exists());
        assert!(!dir.path().join("data").join("cart.json.tmp").exists());

        storage.remove("cart").unwrap();
        storage.remove("cart").unwrap();
        assert_eq!(storage.get("cart").unwrap(), None);
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        storage.set("cart", "[1,2,3]").unwrap();
        storage.set("cart", "[]").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());

        for key in ["", "../cart", "a/b", "cart.json", "giỏ"] {
            assert!(
                matches!(storage.set(key, "[]"), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_write_into_unwritable_location_fails() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the storage directory should be.
        let blocker = dir.path().join("blocked");
        fs::write(&blocker, "not a directory").unwrap();

        let mut storage = FileStorage::new(&blocker);
        assert!(matches!(storage.set("cart", "[]"), Err(StorageError::Io(_))));
    }
}
