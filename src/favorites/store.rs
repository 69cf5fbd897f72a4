//! Key-value stores that favorites are persisted in.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

/// A string key-value store, like browser local storage.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> EngineResult<Option<String>>;

    /// Stores `value` under `key`, replacing what was there.
    fn set(&mut self, key: &str, value: String) -> EngineResult<()>;
}

/// In-memory store for testing and short-lived sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> EngineResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> EngineResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// A store kept as a single JSON object file mapping keys to string values.
///
/// The file is read on every `get` and rewritten on every `set`. A missing
/// file is an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`. Nothing is read yet.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn storage_error(&self, action: &str, error: impl std::fmt::Display) -> EngineError {
        warn!(path = %self.path.display(), "failed to {} store: {}", action, error);
        EngineError::StorageError {
            message: format!("failed to {} {}: {}", action, self.path.display(), error),
        }
    }

    fn read_entries(&self) -> EngineResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.storage_error("read", e))?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| self.storage_error("parse", e))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> EngineResult<Option<String>> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> EngineResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(key.to_string(), value);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.storage_error("create directory for", e))?;
        }
        let content =
            serde_json::to_string_pretty(&entries).map_err(|e| self.storage_error("encode", e))?;
        fs::write(&self.path, content).map_err(|e| self.storage_error("write", e))?;

        debug!(path = %self.path.display(), key, "Store updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("salary-engine-store-{}", name));
        let _ = fs::remove_dir_all(&dir);
        dir.join("store.json")
    }

    #[test]
    fn test_memory_store_set_and_get() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        store.set("k", "v1".to_string()).unwrap();
        store.set("k", "v2".to_string()).unwrap();
        assert_eq!(store.get("k").unwrap(), Some("v2".to_string()));
    }

    #[test]
    fn test_json_file_store_missing_file_is_empty() {
        let store = JsonFileStore::new(scratch_file("missing"));
        assert_eq!(store.get("anything").unwrap(), None);
    }

    #[test]
    fn test_json_file_store_persists_between_instances() {
        let path = scratch_file("persist");

        let mut store = JsonFileStore::new(&path);
        store.set("a", "1".to_string()).unwrap();
        store.set("b", "[]".to_string()).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("a").unwrap(), Some("1".to_string()));
        assert_eq!(reopened.get("b").unwrap(), Some("[]".to_string()));

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["a"], "1");
    }

    #[test]
    fn test_json_file_store_corrupt_file() {
        let path = scratch_file("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        match store.get("a") {
            Err(EngineError::StorageError { message }) => assert!(message.contains("parse")),
            other => panic!("Expected StorageError, got {:?}", other),
        }
    }
}
