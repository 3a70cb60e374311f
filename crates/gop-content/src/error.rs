//! Content loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to fetch or parse a content document.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The document could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document did not parse.
    #[error("invalid JSON content: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML document did not parse.
    #[error("invalid YAML content: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// No document with a supported extension exists.
    #[error("content document not found: {0}")]
    NotFound(String),
}
