//! Interrupt handling.
//!
//! An interrupt ends the whole process at once. In-flight probes are not
//! cancelled or awaited; their sockets are reclaimed by the operating system
//! when the process exits, and results not yet written are lost.

use std::process;
use tracing::debug;

/// Exit status used when the scan is interrupted.
pub const INTERRUPTED_EXIT_CODE: i32 = 1;

/// Spawn a task that exits the process on Ctrl-C (or SIGTERM on unix).
///
/// Must be called from within a tokio runtime.
pub fn install() {
    tokio::spawn(async {
        let name = wait_for_signal().await;
        eprintln!("\n{name} received.");
        process::exit(INTERRUPTED_EXIT_CODE);
    });
    debug!("interrupt handler installed");
}

#[cfg(unix)]
async fn wait_for_signal() -> &'static str {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = match signal(SignalKind::terminate()) {
        Ok(stream) => stream,
        Err(e) => {
            debug!(error = %e, "SIGTERM handler unavailable, listening for Ctrl-C only");
            return ctrl_c().await;
        }
    };

    tokio::select! {
        name = ctrl_c() => name,
        _ = terminate.recv() => "terminated",
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() -> &'static str {
    ctrl_c().await
}

async fn ctrl_c() -> &'static str {
    match tokio::signal::ctrl_c().await {
        Ok(()) => "interrupt",
        // Without a handler the default disposition still terminates us.
        Err(_) => std::future::pending().await,
    }
}
