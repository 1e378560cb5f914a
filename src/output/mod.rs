//! Result reporting.
//!
//! Probes finish in any order, so every line is formatted up front and then
//! written and flushed while holding the reporter's lock. Lines never
//! interleave; their relative order is whatever order the probes finished in.
//!
//! Writes block. On a multi-threaded tokio runtime they run under
//! `block_in_place`, so a slow sink such as a full pipe parks one worker while
//! the runtime moves its other tasks elsewhere.

mod csv_format;
mod json_format;
mod plain;

pub use plain::{print_error, print_scan_header};

use crate::scanner::ProbeResult;
use crate::services::service_description;
use serde::{Deserialize, Serialize};
use std::io::{self, Stdout, Write};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::{Handle, RuntimeFlavor};

/// Output format for result lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Fixed-width human-readable columns
    #[default]
    Plain,
    /// One JSON object per line
    Json,
    /// CSV records with a header row
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

/// Serializes result lines from concurrent probes onto one sink.
#[derive(Debug)]
pub struct Reporter<W = Stdout> {
    sink: Mutex<W>,
    format: OutputFormat,
}

impl Reporter<Stdout> {
    /// Report to standard output.
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write + Send> Reporter<W> {
    pub fn new(sink: W, format: OutputFormat) -> Self {
        Self {
            sink: Mutex::new(sink),
            format,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write whatever precedes the first result (the CSV header row).
    pub fn begin(&self) -> io::Result<()> {
        match self.format {
            OutputFormat::Csv => self.emit(&csv_format::csv_line(csv_format::CSV_HEADER)?),
            OutputFormat::Plain | OutputFormat::Json => Ok(()),
        }
    }

    /// Report one probe. Unreachable results produce no output.
    pub fn report(&self, result: &ProbeResult) -> io::Result<()> {
        if !result.reachable {
            return Ok(());
        }

        let port = result.port.as_u16();
        let service = result
            .service
            .as_deref()
            .unwrap_or_else(|| service_description(port));

        let line = match self.format {
            OutputFormat::Plain => plain::plain_line(port, &result.host, service),
            OutputFormat::Json => json_format::json_line(port, &result.host, service)?,
            OutputFormat::Csv => {
                csv_format::csv_line([port.to_string().as_str(), result.host.as_str(), service])?
            }
        };
        self.emit(&line)
    }

    /// Write the closing line with the session's elapsed wall-clock time.
    pub fn finish(&self, elapsed: Duration) -> io::Result<()> {
        let line = match self.format {
            OutputFormat::Plain => plain::plain_elapsed_line(elapsed),
            OutputFormat::Json => json_format::json_elapsed_line(elapsed)?,
            OutputFormat::Csv => csv_format::csv_elapsed_line(elapsed),
        };
        self.emit(&line)
    }

    /// Consume the reporter and hand back its sink.
    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, line: &str) -> io::Result<()> {
        let write = || {
            let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
            sink.write_all(line.as_bytes())?;
            sink.write_all(b"\n")?;
            sink.flush()
        };

        // `block_in_place` panics on a current-thread runtime.
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(write)
            }
            _ => write(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Port;
    use std::sync::Arc;

    fn port(p: u16) -> Port {
        Port::new(p).unwrap()
    }

    fn output(reporter: Reporter<Vec<u8>>) -> String {
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_unreachable_is_silent() {
        let reporter = Reporter::new(Vec::new(), OutputFormat::Plain);
        reporter
            .report(&ProbeResult::unreachable("10.0.0.1", port(22)))
            .unwrap();
        assert!(output(reporter).is_empty());
    }

    #[test]
    fn test_reachable_uses_service_table() {
        let reporter = Reporter::new(Vec::new(), OutputFormat::Plain);
        reporter
            .report(&ProbeResult::reachable("10.0.0.1", port(22)))
            .unwrap();
        let out = output(reporter);
        assert!(out.starts_with("       22   10.0.0.1 "));
        assert!(out.trim_end().ends_with(service_description(22)));
    }

    #[test]
    fn test_explicit_service_wins() {
        let reporter = Reporter::new(Vec::new(), OutputFormat::Json);
        let result = ProbeResult::reachable("::1", port(8080)).with_service("custom");
        reporter.report(&result).unwrap();
        let value: serde_json::Value = serde_json::from_str(output(reporter).trim()).unwrap();
        assert_eq!(value["service"], "custom");
        assert_eq!(value["host"], "::1");
    }

    #[test]
    fn test_csv_session_layout() {
        let reporter = Reporter::new(Vec::new(), OutputFormat::Csv);
        reporter.begin().unwrap();
        reporter
            .report(&ProbeResult::reachable("10.0.0.1", port(40000)))
            .unwrap();
        reporter.finish(Duration::from_secs(2)).unwrap();

        let out = output(reporter);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["port,host,service", "40000,10.0.0.1,", "# completed in 2s"]);
    }

    #[test]
    fn test_finish_writes_elapsed() {
        let reporter = Reporter::new(Vec::new(), OutputFormat::Plain);
        reporter.finish(Duration::from_millis(250)).unwrap();
        assert_eq!(output(reporter), "completed in 250ms\n");
    }

    #[test]
    fn test_concurrent_lines_do_not_interleave() {
        let reporter = Arc::new(Reporter::new(Vec::new(), OutputFormat::Plain));

        let handles: Vec<_> = (1..=32u16)
            .map(|thread| {
                let reporter = Arc::clone(&reporter);
                std::thread::spawn(move || {
                    for offset in 0..50u16 {
                        let result =
                            ProbeResult::reachable("192.168.100.200", port(thread * 1000 + offset));
                        reporter.report(&result).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let reporter = Arc::try_unwrap(reporter).unwrap();
        let out = output(reporter);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 32 * 50);
        for line in lines {
            // The host is wider than its 10-column field.
            assert_eq!(line.len(), 9 + 1 + 15 + 1 + 45);
            assert_eq!(line.split_whitespace().nth(1), Some("192.168.100.200"));
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_reports_from_runtime_workers() {
        let reporter = Arc::new(Reporter::new(Vec::new(), OutputFormat::Csv));
        reporter.begin().unwrap();

        let mut tasks = tokio::task::JoinSet::new();
        for p in 1..=200u16 {
            let reporter = Arc::clone(&reporter);
            tasks.spawn(async move {
                reporter
                    .report(&ProbeResult::reachable("10.0.0.1", port(p)))
                    .unwrap();
            });
        }
        while let Some(joined) = tasks.join_next().await {
            joined.unwrap();
        }
        reporter.finish(Duration::from_secs(1)).unwrap();

        let reporter = Arc::try_unwrap(reporter).unwrap();
        let out = output(reporter);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 1 + 200 + 1);
        assert_eq!(lines[0], "port,host,service");
        assert_eq!(lines[201], "# completed in 1s");
    }

    #[tokio::test]
    async fn test_reports_from_current_thread_runtime() {
        let reporter = Reporter::new(Vec::new(), OutputFormat::Plain);
        reporter.finish(Duration::from_millis(5)).unwrap();
        assert_eq!(output(reporter), "completed in 5ms\n");
    }
}
