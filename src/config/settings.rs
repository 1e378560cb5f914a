//! Application settings.
//!
//! Stored as JSON in `~/.config/portsweep/settings.json` (or wherever the
//! platform's config directory is). A missing file means defaults.

use crate::error::{ConfigError, ConfigResult};
use crate::output::OutputFormat;
use crate::scanner::{DEFAULT_THREADS, DEFAULT_TIMEOUT};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Scan defaults read from the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of probes in flight.
    pub threads: usize,
    /// Per-probe connect timeout in milliseconds.
    pub timeout_ms: u64,
    /// Output format for result lines.
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            output: OutputFormat::Plain,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or from the default location when `None`.
    ///
    /// A file that does not exist yields the defaults; a file that exists but
    /// cannot be read or parsed is an error.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => default_settings_path()?,
        };

        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load settings from a specific file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self =
            serde_json::from_str(&content).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Connect timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Platform settings file location (`<config dir>/portsweep/settings.json`).
pub fn default_settings_path() -> ConfigResult<PathBuf> {
    let project =
        ProjectDirs::from("com", "portsweep", "portsweep").ok_or(ConfigError::DirectoryNotFound)?;
    Ok(project.config_dir().join("settings.json"))
}
