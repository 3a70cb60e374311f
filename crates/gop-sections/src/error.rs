//! Startup errors for the inspection tool.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors raised while wiring the tool together.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The tracing subscriber could not be installed.
    #[error("telemetry error: {0}")]
    Telemetry(#[from] tracing_subscriber::util::TryInitError),

    /// The report could not be serialized.
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}
