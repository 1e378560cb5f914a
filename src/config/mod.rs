//! Configuration management for portsweep.
//!
//! Defaults for the scan knobs can live in an XDG-compliant settings file;
//! command-line flags always win over the file.

mod settings;

pub use settings::{default_settings_path, Settings};
