use std::path::PathBuf;
use thiserror::Error;

/// Failure to produce a usable [`HarnessConfig`](crate::HarnessConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The requested config file does not exist.
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    /// The file is not valid TOML or does not match the config schema.
    #[error("TOML parse error: {0}")]
    Parse(String),

    /// A value parsed but is unusable.
    #[error("validation error: {field}: {message}")]
    Validation {
        /// The dotted field path (e.g. `timeouts.event_ms`).
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// Reading a config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
