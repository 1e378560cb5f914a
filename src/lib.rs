//! # portsweep - a concurrent TCP reachability scanner
//!
//! Given an IPv4 range (or a single host) and a port range, portsweep tries
//! one timeout-bounded TCP connection per `(address, port)` pair and prints
//! every port that accepted, annotated with the service usually registered
//! for it.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::output::{OutputFormat, Reporter};
//! use portsweep::scanner::{run_scan, ScanConfig};
//! use portsweep::types::{PortRange, TargetSpec};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> portsweep::ScanResult<()> {
//!     let config = ScanConfig::new(TargetSpec::parse("192.168.0.1:192.168.0.254")?)
//!         .with_ports(PortRange::parse(Some("1:1024"))?)
//!         .with_threads(200)
//!         .with_timeout(Duration::from_millis(500));
//!
//!     let summary = run_scan(config, Reporter::stdout(OutputFormat::Plain)).await?;
//!     eprintln!("{} reachable", summary.reachable);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - validated address and port ranges, and the range walk
//! - [`scanner`] - the session, its concurrency limiter and the connect probe
//! - [`output`] - line-atomic result reporting
//! - [`services`] - well-known port descriptions
//! - [`config`] - settings file defaults
//! - [`signal`] - process-wide interrupt handling
//! - [`error`] - error types

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;
pub mod services;
pub mod signal;
pub mod types;

// Re-export commonly used types
pub use error::{ConfigError, ScanError, ScanResult};
pub use scanner::{ProbeResult, Prober, ScanConfig, ScanSession, ScanSummary};
pub use types::{AddressRange, Port, PortRange, TargetSpec};
