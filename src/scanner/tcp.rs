//! TCP connect probe.
//!
//! Performs one operating-system `connect()` per probe. The connection is
//! closed as soon as it is established; nothing is read or written.
//!
//! # Limitations
//!
//! A refused connection, a silently dropped SYN and a name that does not
//! resolve all look the same: the port is reported unreachable. Closed and
//! filtered ports cannot be told apart, and nothing is retried.

use crate::scanner::traits::{ProbeResult, Prober};
use crate::types::Port;
use async_trait::async_trait;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// TCP connect probe with a per-attempt timeout.
///
/// The timeout covers name resolution and the handshake together.
#[derive(Debug, Clone, Copy)]
pub struct TcpConnectProbe {
    timeout: Duration,
}

impl TcpConnectProbe {
    /// Create a new probe that gives up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Prober for TcpConnectProbe {
    async fn probe(&self, host: &str, port: Port) -> ProbeResult {
        match timeout(self.timeout, TcpStream::connect((host, port.as_u16()))).await {
            Ok(Ok(stream)) => {
                drop(stream);
                ProbeResult::reachable(host, port)
            }
            Ok(Err(e)) => {
                trace!(host, port = port.as_u16(), error = %e, "connect failed");
                ProbeResult::unreachable(host, port)
            }
            Err(_) => {
                trace!(host, port = port.as_u16(), "connect timed out");
                ProbeResult::unreachable(host, port)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::net::{TcpListener, TcpSocket, TcpStream};

    #[tokio::test]
    async fn test_listening_port_is_reachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();

        let probe = TcpConnectProbe::new(Duration::from_secs(1));
        let result = probe.probe("127.0.0.1", port).await;

        assert!(result.reachable);
        assert_eq!(result.host, "127.0.0.1");
        assert_eq!(result.port, port);
    }

    #[tokio::test]
    async fn test_closed_port_is_unreachable_within_timeout() {
        // Bind then release to get a port nothing listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = Port::new(listener.local_addr().unwrap().port()).unwrap();
        drop(listener);

        let timeout = Duration::from_millis(300);
        let probe = TcpConnectProbe::new(timeout);
        let started = Instant::now();
        let result = probe.probe("127.0.0.1", port).await;

        assert!(!result.reachable);
        assert!(started.elapsed() < timeout + Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_unanswered_handshake_times_out() {
        // A listener that never accepts: once its backlog is full, further
        // SYNs are dropped and the handshake hangs.
        let socket = TcpSocket::new_v4().unwrap();
        socket.bind("127.0.0.1:0".parse().unwrap()).unwrap();
        let listener = socket.listen(1).unwrap();
        let addr = listener.local_addr().unwrap();

        let mut held = Vec::new();
        for _ in 0..4 {
            if let Ok(Ok(stream)) =
                tokio::time::timeout(Duration::from_millis(200), TcpStream::connect(addr)).await
            {
                held.push(stream);
            }
        }

        let timeout = Duration::from_millis(300);
        let connector = TcpConnectProbe::new(timeout);
        let started = Instant::now();
        let result = connector.probe("127.0.0.1", Port::new(addr.port()).unwrap()).await;
        let elapsed = started.elapsed();

        assert!(!result.reachable);
        assert!(elapsed >= timeout, "returned after {elapsed:?}");
        assert!(elapsed < timeout + Duration::from_secs(1));
        drop(listener);
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_unreachable() {
        let probe = TcpConnectProbe::new(Duration::from_millis(500));
        let result = probe
            .probe("no-such-host.invalid", Port::new(80).unwrap())
            .await;
        assert!(!result.reachable);
    }
}
