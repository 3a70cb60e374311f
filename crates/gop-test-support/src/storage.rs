//! Test stores — `KeyValueStore` doubles for failure paths.

use gop_core::error::StorageError;
use gop_core::storage::KeyValueStore;

/// A store whose every call fails, like storage disabled in private
/// browsing.
#[derive(Debug)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("storage disabled".into()))
    }
}

/// A store that reads as empty and rejects every write with
/// `QuotaExceeded`.
#[derive(Debug, Default)]
pub struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Err(StorageError::QuotaExceeded {
            key: key.to_owned(),
            needed: key.len() + value.len(),
            limit: 0,
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Err(StorageError::QuotaExceeded {
            key: key.to_owned(),
            needed: 0,
            limit: 0,
        })
    }
}
