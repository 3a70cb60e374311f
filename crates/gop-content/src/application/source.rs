//! Where content documents come from.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::ContentError;
use crate::domain::config::GameConfig;
use crate::domain::scriptures::Scriptures;

/// File stem of the scriptures document.
pub const SCRIPTURES_DOCUMENT: &str = "scriptures";
/// File stem of the game config document.
pub const CONFIG_DOCUMENT: &str = "game-config";

/// A provider of the two static documents.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Fetches the scriptures document.
    async fn fetch_scriptures(&self) -> Result<Scriptures, ContentError>;

    /// Fetches the game config document.
    async fn fetch_config(&self) -> Result<GameConfig, ContentError>;
}

#[derive(Debug, Clone, Copy)]
enum Format {
    Json,
    Yaml,
}

const CANDIDATES: [(&str, Format); 3] = [
    ("json", Format::Json),
    ("yaml", Format::Yaml),
    ("yml", Format::Yaml),
];

/// Reads documents from a directory. `<stem>.json` is preferred over
/// `<stem>.yaml` / `<stem>.yml`.
#[derive(Debug, Clone)]
pub struct FileContentSource {
    dir: PathBuf,
}

impl FileContentSource {
    /// Creates a source reading from `dir`. The directory is not checked
    /// until a document is fetched.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn read_document<T: DeserializeOwned>(&self, stem: &str) -> Result<T, ContentError> {
        for (extension, format) in CANDIDATES {
            let path = self.dir.join(format!("{stem}.{extension}"));
            let text = match tokio::fs::read_to_string(&path).await {
                Ok(text) => text,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(source) => return Err(ContentError::Io { path, source }),
            };
            debug!(path = %path.display(), "read content document");
            return match format {
                Format::Json => Ok(serde_json::from_str(&text)?),
                Format::Yaml => Ok(serde_yaml::from_str(&text)?),
            };
        }
        Err(ContentError::NotFound(format!(
            "{}/{stem}.{{json,yaml,yml}}",
            self.dir.display()
        )))
    }
}

#[async_trait]
impl ContentSource for FileContentSource {
    async fn fetch_scriptures(&self) -> Result<Scriptures, ContentError> {
        self.read_document(SCRIPTURES_DOCUMENT).await
    }

    async fn fetch_config(&self) -> Result<GameConfig, ContentError> {
        self.read_document(CONFIG_DOCUMENT).await
    }
}

/// Serves documents already held in memory. A missing document reports
/// `NotFound`.
#[derive(Debug, Clone, Default)]
pub struct StaticContentSource {
    pub scriptures: Option<Scriptures>,
    pub config: Option<GameConfig>,
}

#[async_trait]
impl ContentSource for StaticContentSource {
    async fn fetch_scriptures(&self) -> Result<Scriptures, ContentError> {
        self.scriptures
            .clone()
            .ok_or_else(|| ContentError::NotFound(SCRIPTURES_DOCUMENT.to_owned()))
    }

    async fn fetch_config(&self) -> Result<GameConfig, ContentError> {
        self.config
            .clone()
            .ok_or_else(|| ContentError::NotFound(CONFIG_DOCUMENT.to_owned()))
    }
}
