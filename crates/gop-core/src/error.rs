//! Error types shared across the workspace.

use thiserror::Error;

/// Failure reported by a `KeyValueStore` backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot be used at all (disabled, private mode, no runtime).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A write would push the backend past its capacity.
    #[error("storage quota exceeded writing {key}: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded {
        /// The key being written.
        key: String,
        /// Total bytes the store would hold after the write.
        needed: usize,
        /// Configured capacity in bytes.
        limit: usize,
    },

    /// Underlying filesystem error.
    #[error("storage i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An operation was attempted in a state that does not allow it.
    #[error("validation error: {0}")]
    Validation(String),

    /// An ending has been chosen; no further gating logic runs.
    #[error("progress is terminal: an ending has already been chosen")]
    Terminal,
}
