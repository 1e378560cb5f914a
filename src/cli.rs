//! Command-line interface definitions for portsweep.
//!
//! Uses `clap` derive macros for declarative argument parsing.

use crate::config::Settings;
use crate::error::ScanResult;
use crate::output::OutputFormat;
use crate::scanner::ScanConfig;
use crate::types::{PortRange, TargetSpec};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// A concurrent TCP reachability scanner.
///
/// Range scanning is supported for IPv4 addresses and ports. IPv6 addresses
/// and hostnames are scanned as a single host.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Find reachable TCP ports on a host or IPv4 range", long_about = None)]
pub struct Args {
    /// Target: <IP>[:<IP>], an IPv4 CIDR block, an IPv6 address or a hostname
    ///
    /// Example: 192.168.0.1:192.168.1.255
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Port or inclusive port range: <port>[:<port>] (default 1:65535)
    ///
    /// Example: 10:10000
    #[arg(value_name = "PORTS")]
    pub ports: Option<String>,

    /// Maximum number of concurrent probes [default: 100]
    #[arg(short = 'w', long = "threads")]
    pub threads: Option<usize>,

    /// Connect timeout per probe, e.g. 300ms, 0.5s or 5 (seconds) [default: 3s]
    #[arg(short = 't', long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Output format for result lines [default: plain]
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Log scan progress to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to a settings file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Validate the target and ports and merge flags over `settings`.
    pub fn scan_config(&self, settings: &Settings) -> ScanResult<ScanConfig> {
        let target = TargetSpec::parse(&self.target)?;
        let ports = PortRange::parse(self.ports.as_deref())?;

        Ok(ScanConfig::new(target)
            .with_ports(ports)
            .with_threads(self.threads.unwrap_or(settings.threads))
            .with_timeout(self.timeout.unwrap_or_else(|| settings.timeout())))
    }

    /// Output format, from the flag or else the settings file.
    pub fn output_format(&self, settings: &Settings) -> OutputFormat {
        self.output.unwrap_or(settings.output)
    }
}

/// Parse a duration such as `300ms`, `0.5s`, `1m30s` or a bare number of
/// seconds.
///
/// Units: `ns`, `us`/`µs`, `ms`, `s`, `m`, `h`.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration".to_string());
    }

    // Accumulated in nanoseconds so common values like 300ms stay exact.
    let nanos = match s.parse::<f64>() {
        Ok(secs) => secs * 1e9,
        Err(_) => {
            let mut total = 0.0;
            let mut rest = s;
            while !rest.is_empty() {
                let split = rest
                    .find(|c: char| !(c.is_ascii_digit() || c == '.'))
                    .unwrap_or(rest.len());
                let (number, tail) = rest.split_at(split);
                let value: f64 = number
                    .parse()
                    .map_err(|_| format!("invalid duration: {s}"))?;

                let split = tail
                    .find(|c: char| c.is_ascii_digit() || c == '.')
                    .unwrap_or(tail.len());
                let (unit, tail) = tail.split_at(split);
                let scale = match unit {
                    "ns" => 1.0,
                    "us" | "µs" => 1e3,
                    "ms" => 1e6,
                    "s" => 1e9,
                    "m" => 60e9,
                    "h" => 3600e9,
                    _ => return Err(format!("unknown unit {unit:?} in duration {s}")),
                };

                total += value * scale;
                rest = tail;
            }
            total
        }
    };

    if !nanos.is_finite() || nanos < 0.0 || nanos >= u64::MAX as f64 {
        return Err(format!("invalid duration: {s}"));
    }
    Ok(Duration::from_nanos(nanos.round() as u64))
}
