//! A `KeyValueStore` that refuses every call.

use gop_core::error::StorageError;
use gop_core::storage::KeyValueStore;

/// Stands in when no real backend could be opened. Every call fails with
/// `StorageError::Unavailable`, which puts a `ProgressStore` over it straight
/// into degraded mode.
#[derive(Debug, Clone)]
pub struct DisabledStore {
    reason: String,
}

impl DisabledStore {
    /// Creates a store that reports `reason` on every call.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn refuse(&self) -> StorageError {
        StorageError::Unavailable(self.reason.clone())
    }
}

impl KeyValueStore for DisabledStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(self.refuse())
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(self.refuse())
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(self.refuse())
    }
}
