//! String key/value stores for application settings.
//!
//! Settings are tiny and read rarely, so the file-backed store keeps the
//! whole map in memory and rewrites the file on every mutation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};
use crate::io::write_atomic;

/// Persistence seam for string settings.
///
/// Unlike case deletion, removing an absent key is a no-op: settings callers
/// use `remove` to mean "back to defaults".
pub trait KeyValueStore {
    /// Stored value for `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: &str) -> Result<()>;

    /// Drop `key` if present.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory key/value store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryKv {
    entries: BTreeMap<String, String>,
}

impl MemoryKv {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Key/value store backed by a single JSON file.
///
/// The file holds one flat object of string values, sorted by key so repeated
/// saves of the same settings produce identical bytes.
#[derive(Debug)]
pub struct JsonFileKv {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileKv {
    /// Open the store at `path`, reading existing entries if the file exists.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let bytes = fs::read(&path).map_err(|e| StoreError::io("read", path.clone(), e))?;
            serde_json::from_slice(&bytes).map_err(|e| StoreError::InvalidFormat {
                path: path.clone(),
                reason: e.to_string(),
            })?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    /// File the entries are persisted to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(&self.entries)
            .map_err(|e| StoreError::Serialization { source: e })?;
        write_atomic(&self.path, &bytes)?;
        tracing::debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for JsonFileKv {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_kv_round_trips() {
        let mut kv = MemoryKv::new();
        assert_eq!(kv.get("chat.features").unwrap(), None);

        kv.put("chat.features", "{}").unwrap();
        assert_eq!(kv.get("chat.features").unwrap().as_deref(), Some("{}"));

        kv.remove("chat.features").unwrap();
        assert_eq!(kv.get("chat.features").unwrap(), None);
        // Removing again is a no-op, not an error.
        kv.remove("chat.features").unwrap();
    }
}
