//! JSON output formatting, one object per line.

use serde::Serialize;
use std::io;
use std::time::Duration;

#[derive(Serialize)]
struct OpenPort<'a> {
    port: u16,
    host: &'a str,
    service: &'a str,
}

/// Format one reachable port as a JSON object.
pub fn json_line(port: u16, host: &str, service: &str) -> io::Result<String> {
    serde_json::to_string(&OpenPort {
        port,
        host,
        service,
    })
    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

/// Format the closing summary object.
pub fn json_elapsed_line(elapsed: Duration) -> io::Result<String> {
    serde_json::to_string(&serde_json::json!({ "completed_in_ms": elapsed.as_millis() as u64 }))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
