//! Error types shared across the crate

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating or persisting timer settings
#[derive(Error, Debug)]
pub enum SettingsError {
    /// A duration was outside its allowed range
    #[error("Invalid settings: {0}")]
    Invalid(String),

    /// The settings file could not be read or written
    #[error("Settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings payload could not be encoded
    #[error("Settings encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// No configuration directory is available on this platform
    #[error("Could not determine a configuration directory")]
    NoConfigDir,
}

/// Errors raised when talking to the session worker
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The worker task has exited and no longer accepts commands
    #[error("Session worker is no longer running")]
    Closed,
}
