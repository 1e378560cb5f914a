//! Plain text output formatting.
//!
//! Result lines go to stdout with fixed-width columns; diagnostics go to
//! stderr with colors.

use console::style;
use std::time::Duration;

/// Format one reachable port as a fixed-width line.
pub fn plain_line(port: u16, host: &str, service: &str) -> String {
    format!("{:>9} {:>10} {:>45}", port, host, service)
}

/// Format the closing elapsed-time line.
pub fn plain_elapsed_line(elapsed: Duration) -> String {
    format!("completed in {elapsed:?}")
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a scan header before scanning begins.
pub fn print_scan_header(target: &str, ports: &str, hosts: u64, threads: usize) {
    eprintln!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("portsweep").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    eprintln!(
        "{} Target: {} ({} host{})",
        style("•").dim(),
        style(target).white().bold(),
        hosts,
        if hosts == 1 { "" } else { "s" }
    );
    eprintln!(
        "{} Ports: {} with {} concurrent probes",
        style("•").dim(),
        style(ports).white().bold(),
        threads
    );
}
