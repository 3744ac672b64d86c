//! Key/value persistence for browser-local state: the assessment draft and
//! recent searches. Values are JSON strings.

use crate::error::{ReadinessError, Result};
use crate::io::{atomic_write, remove_if_exists};
use crate::paths;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

pub const ASSESSMENT_DRAFT_KEY: &str = "assessment-draft";
pub const RECENT_SEARCHES_KEY: &str = "recent-searches";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Returns true if a value was removed.
    fn remove(&self, key: &str) -> Result<bool>;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// One file per key under `.readiness/storage/`.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    fn entry(&self, key: &str) -> Result<PathBuf> {
        paths::validate_id(key).map_err(|_| ReadinessError::Storage(format!("invalid key '{key}'")))?;
        Ok(paths::storage_entry(&self.root, key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry(key)?;
        match std::fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        atomic_write(&self.entry(key)?, value.as_bytes())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        remove_if_exists(&self.entry(key)?)
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(values.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn exercise(store: &dyn KeyValueStore) {
        assert_eq!(store.get(RECENT_SEARCHES_KEY).unwrap(), None);
        store.set(RECENT_SEARCHES_KEY, "[\"gdpr\"]").unwrap();
        assert_eq!(
            store.get(RECENT_SEARCHES_KEY).unwrap().as_deref(),
            Some("[\"gdpr\"]")
        );
        store.set(RECENT_SEARCHES_KEY, "[]").unwrap();
        assert_eq!(store.get(RECENT_SEARCHES_KEY).unwrap().as_deref(), Some("[]"));
        assert!(store.remove(RECENT_SEARCHES_KEY).unwrap());
        assert!(!store.remove(RECENT_SEARCHES_KEY).unwrap());
        assert_eq!(store.get(RECENT_SEARCHES_KEY).unwrap(), None);
    }

    #[test]
    fn memory_store_roundtrip() {
        exercise(&MemoryStore::new());
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = TempDir::new().unwrap();
        exercise(&FileStore::new(dir.path()));
    }

    #[test]
    fn file_store_writes_under_storage_dir() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.set(ASSESSMENT_DRAFT_KEY, "{}").unwrap();
        assert!(dir
            .path()
            .join(".readiness/storage/assessment-draft.json")
            .exists());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.set("../escape", "x"),
            Err(ReadinessError::Storage(_))
        ));
    }
}
