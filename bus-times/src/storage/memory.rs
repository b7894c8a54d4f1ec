//! In-memory key-value store.

use std::collections::HashMap;

use super::KeyValueStore;
use super::error::StorageError;

/// Key-value store held in memory, with an optional size limit.
///
/// Usage is measured as the total byte length of all keys and values,
/// which is close enough to how browsers account local storage quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty, unlimited store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes beyond `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(bytes),
        }
    }

    /// Total bytes currently used by keys and values.
    pub fn usage(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let existing = self
                .entries
                .get(key)
                .map(|old| key.len() + old.len())
                .unwrap_or(0);
            let needed = self.usage() - existing + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { needed, quota });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("favourites").unwrap(), None);

        store.set("favourites", "{}").unwrap();
        assert_eq!(store.get("favourites").unwrap().as_deref(), Some("{}"));

        store.remove("favourites").unwrap();
        assert_eq!(store.get("favourites").unwrap(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn remove_missing_key_is_ok() {
        let mut store = MemoryStore::new();
        assert!(store.remove("nothing").is_ok());
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_old_value() {
        let mut store = MemoryStore::with_quota(10);
        store.set("k", "abc").unwrap();

        let err = store.set("k", "this is far too long").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { quota: 10, .. }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn quota_counts_replacement_not_sum() {
        let mut store = MemoryStore::with_quota(10);
        store.set("key", "1234567").unwrap();
        // Replacing the value frees the old bytes first
        store.set("key", "7654321").unwrap();
        assert_eq!(store.usage(), 10);
    }

    #[test]
    fn mutable_reference_is_a_store() {
        let mut store = MemoryStore::new();
        {
            let mut borrowed = &mut store;
            KeyValueStore::set(&mut borrowed, "theme", "dark").unwrap();
        }
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
        assert_eq!(store.len(), 1);
    }
}
