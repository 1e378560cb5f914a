//! Error types for portsweep.
//!
//! Uses `thiserror` for ergonomic error definitions. Probe failures are
//! deliberately absent: a failed connect is a result, not an error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for scan setup and execution.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{0} is not an IPv4 address")]
    AddressParse(String),

    #[error("invalid range: {0}")]
    RangeValidation(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading the settings file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine the configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Result type alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
