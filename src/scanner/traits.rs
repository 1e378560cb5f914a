//! Prober trait abstraction.
//!
//! The coordinator only knows how to dispatch `(host, port)` pairs; how a
//! single pair is probed lives behind [`Prober`], which keeps the dispatch
//! loop testable without a network.

use crate::types::Port;
use async_trait::async_trait;

/// Outcome of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    /// The host as it was dispatched (dotted quad, IPv6 literal or hostname).
    pub host: String,
    /// The port that was probed.
    pub port: Port,
    /// Whether a TCP connection was established.
    pub reachable: bool,
    /// Description of the service registered for the port, if any.
    pub service: Option<String>,
}

impl ProbeResult {
    /// A probe whose connection succeeded.
    pub fn reachable(host: impl Into<String>, port: Port) -> Self {
        Self {
            host: host.into(),
            port,
            reachable: true,
            service: None,
        }
    }

    /// A probe that was refused, timed out or could not be resolved.
    pub fn unreachable(host: impl Into<String>, port: Port) -> Self {
        Self {
            host: host.into(),
            port,
            reachable: false,
            service: None,
        }
    }

    /// Attach a service description.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }
}

/// Probes one `(host, port)` pair.
///
/// Implementations never fail: every error folds into `reachable = false`.
#[async_trait]
pub trait Prober: Send + Sync + 'static {
    async fn probe(&self, host: &str, port: Port) -> ProbeResult;
}
