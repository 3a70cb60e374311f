//! In-memory implementation of the `KeyValueStore` trait.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use gop_core::error::StorageError;
use gop_core::storage::KeyValueStore;

/// Process-local key-value store with an optional byte quota.
///
/// The quota counts key and value bytes across all entries, the way browser
/// local storage accounts its capacity.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Creates an empty, unbounded store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty store that rejects writes beyond `limit` bytes.
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota: Some(limit),
        }
    }

    /// Number of stored keys.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the store's lock is poisoned.
    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.lock()?.len())
    }

    /// Whether the store holds no keys.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if the store's lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_owned()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.lock()?;
        if let Some(limit) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = used + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    needed,
                    limit,
                });
            }
        }
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get("gop_progress").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_returns_value() {
        // Arrange
        let store = MemoryStore::new();

        // Act
        store.set("gop_progress", "{}").unwrap();

        // Assert
        assert_eq!(store.get("gop_progress").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_remove_absent_key_succeeds() {
        let store = MemoryStore::new();
        assert!(store.remove("gop_ending_chosen").is_ok());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_quota_rejects_oversized_write() {
        // Arrange
        let store = MemoryStore::with_quota(16);

        // Act
        let result = store.set("gop_progress", "a value that does not fit");

        // Assert
        match result {
            Err(StorageError::QuotaExceeded { key, limit, .. }) => {
                assert_eq!(key, "gop_progress");
                assert_eq!(limit, 16);
            }
            other => panic!("expected QuotaExceeded, got {other:?}"),
        }
        assert_eq!(store.get("gop_progress").unwrap(), None);
    }

    #[test]
    fn test_quota_ignores_value_being_replaced() {
        // Arrange
        let store = MemoryStore::with_quota(12);
        store.set("k", "0123456789").unwrap();

        // Act
        let result = store.set("k", "abcdefghij");

        // Assert
        assert!(result.is_ok());
        assert_eq!(store.get("k").unwrap().as_deref(), Some("abcdefghij"));
    }
}
