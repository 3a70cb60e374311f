//! Key-value persistence abstraction.
//!
//! Mirrors the browser's local storage: string keys, string values, every
//! call may fail. Callers own namespacing and serialization.

use crate::error::StorageError;

/// Synchronous string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
