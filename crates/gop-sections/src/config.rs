//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Directory holding persisted progress.
pub const DATA_DIR_VAR: &str = "GOP_DATA_DIR";
/// Directory holding the content documents.
pub const CONTENT_DIR_VAR: &str = "GOP_CONTENT_DIR";
/// `json` or `pretty`.
pub const LOG_FORMAT_VAR: &str = "GOP_LOG_FORMAT";

const DEFAULT_DATA_DIR: &str = ".gop";
const DEFAULT_CONTENT_DIR: &str = "assets/data";

/// An environment variable held a value we cannot use.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{LOG_FORMAT_VAR} must be `json` or `pretty`, got {0:?}")]
    InvalidLogFormat(String),

    #[error("{0} must not be empty")]
    EmptyPath(&'static str),
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(ConfigError::InvalidLogFormat(s.to_owned())),
        }
    }
}

/// Settings for the inspection tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub data_dir: PathBuf,
    pub content_dir: PathBuf,
    pub log_format: LogFormat,
}

impl RuntimeConfig {
    /// Reads the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from `lookup`, which maps a variable name to its
    /// value. Unset variables take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = path_var(&lookup, DATA_DIR_VAR, DEFAULT_DATA_DIR)?;
        let content_dir = path_var(&lookup, CONTENT_DIR_VAR, DEFAULT_CONTENT_DIR)?;
        let log_format = lookup(LOG_FORMAT_VAR)
            .map(|value| value.parse())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            data_dir,
            content_dir,
            log_format,
        })
    }
}

fn path_var<F>(lookup: &F, name: &'static str, default: &str) -> Result<PathBuf, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::EmptyPath(name)),
        Some(value) => Ok(PathBuf::from(value)),
        None => Ok(PathBuf::from(default)),
    }
}
