//! Scanner module - coordinates concurrent probing of a target.
//!
//! A session walks every host of the target and, for each host, every port
//! of the range, in ascending order. Each `(host, port)` pair becomes one
//! short-lived tokio task. Dispatch waits on the session's
//! [`ConcurrencyLimiter`] before spawning, so at most `threads` probes are
//! ever in flight. Once everything is dispatched the session joins every
//! task it spawned before writing the elapsed-time line.

pub mod limiter;
pub mod tcp;
pub mod traits;

use crate::error::{ScanError, ScanResult};
use crate::output::Reporter;
use crate::types::{PortRange, TargetSpec};
use std::io::{Stdout, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

pub use limiter::ConcurrencyLimiter;
pub use tcp::TcpConnectProbe;
pub use traits::{ProbeResult, Prober};

/// Default number of simultaneously outstanding probes.
pub const DEFAULT_THREADS: usize = 100;

/// Default per-probe connect timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Configuration for a scan.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Hosts to scan.
    pub target: TargetSpec,
    /// Ports to probe on every host.
    pub ports: PortRange,
    /// Maximum number of probes in flight.
    pub threads: usize,
    /// Connect timeout for each probe.
    pub timeout: Duration,
}

impl ScanConfig {
    /// Create a configuration scanning every port of `target` with defaults.
    pub fn new(target: TargetSpec) -> Self {
        Self {
            target,
            ports: PortRange::full(),
            threads: DEFAULT_THREADS,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the port range.
    pub fn with_ports(mut self, ports: PortRange) -> Self {
        self.ports = ports;
        self
    }

    /// Set the concurrency capacity.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the per-probe timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Totals for a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    /// Hosts walked.
    pub hosts: u64,
    /// Probes dispatched.
    pub probes: u64,
    /// Probes that connected.
    pub reachable: u64,
    /// Wall-clock time from first dispatch to last completion.
    pub elapsed: Duration,
}

/// One scan invocation: the validated ranges plus the limiter and reporter
/// shared by every probe task.
pub struct ScanSession<W = Stdout> {
    target: TargetSpec,
    ports: PortRange,
    limiter: ConcurrencyLimiter,
    reporter: Arc<Reporter<W>>,
}

impl<W: Write + Send + 'static> ScanSession<W> {
    /// Build a session, validating the concurrency capacity and timeout.
    pub fn new(config: &ScanConfig, reporter: Reporter<W>) -> ScanResult<Self> {
        if config.timeout.is_zero() {
            return Err(ScanError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            target: config.target.clone(),
            ports: config.ports,
            limiter: ConcurrencyLimiter::new(config.threads)?,
            reporter: Arc::new(reporter),
        })
    }

    pub fn limiter(&self) -> &ConcurrencyLimiter {
        &self.limiter
    }

    pub fn reporter(&self) -> &Reporter<W> {
        &self.reporter
    }

    /// Probe every `(host, port)` pair and wait for all probes to finish.
    ///
    /// Only reachable ports are reported. Probe failures never surface here;
    /// errors are limited to the reporter's sink failing at the start or end.
    pub async fn run<P: Prober>(&self, prober: Arc<P>) -> ScanResult<ScanSummary> {
        let started = Instant::now();
        self.reporter.begin()?;

        let reachable = Arc::new(AtomicU64::new(0));
        let mut tasks = JoinSet::new();
        let mut hosts = 0u64;
        let mut probes = 0u64;

        for host in self.target.hosts() {
            hosts += 1;
            debug!(%host, ports = %self.ports, "dispatching host");
            let host: Arc<str> = Arc::from(host);

            for port in self.ports.iter() {
                // Blocks dispatch while every slot is taken.
                let permit = self.limiter.acquire().await?;

                let prober = Arc::clone(&prober);
                let reporter = Arc::clone(&self.reporter);
                let reachable = Arc::clone(&reachable);
                let host = Arc::clone(&host);

                tasks.spawn(async move {
                    let _permit = permit;
                    let result = prober.probe(&host, port).await;
                    if result.reachable {
                        reachable.fetch_add(1, Ordering::Relaxed);
                        if let Err(e) = reporter.report(&result) {
                            warn!(%host, port = port.as_u16(), error = %e, "failed to write result");
                        }
                    }
                });
                probes += 1;

                while let Some(joined) = tasks.try_join_next() {
                    log_join_failure(joined);
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            log_join_failure(joined);
        }
        debug_assert_eq!(self.limiter.outstanding(), 0);

        let elapsed = started.elapsed();
        self.reporter.finish(elapsed)?;

        let summary = ScanSummary {
            hosts,
            probes,
            reachable: reachable.load(Ordering::Relaxed),
            elapsed,
        };
        info!(
            hosts = summary.hosts,
            probes = summary.probes,
            reachable = summary.reachable,
            elapsed_ms = summary.elapsed.as_millis() as u64,
            "scan complete"
        );
        Ok(summary)
    }
}

/// Execute a complete TCP connect scan.
pub async fn run_scan<W>(config: ScanConfig, reporter: Reporter<W>) -> ScanResult<ScanSummary>
where
    W: Write + Send + 'static,
{
    let session = ScanSession::new(&config, reporter)?;
    session
        .run(Arc::new(TcpConnectProbe::new(config.timeout)))
        .await
}

fn log_join_failure(joined: Result<(), JoinError>) {
    if let Err(e) = joined {
        warn!(error = %e, "probe task failed");
    }
}
