//! Concurrency limiting for scan sessions.
//!
//! A fixed number of slots is shared by every probe in a session. The
//! dispatch loop waits for a free slot before spawning the next probe, which
//! is the only backpressure in the scanner.

use crate::error::{ScanError, ScanResult};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Bounds the number of simultaneously outstanding probes.
///
/// Clones share the same slots.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    slots: Arc<Semaphore>,
    capacity: usize,
}

impl ConcurrencyLimiter {
    /// Create a limiter with `capacity` slots.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if `capacity` is 0 or exceeds what tokio's
    /// semaphore can hold.
    pub fn new(capacity: usize) -> ScanResult<Self> {
        if capacity == 0 || capacity > Semaphore::MAX_PERMITS {
            return Err(ScanError::InvalidConfig(format!(
                "thread count must be between 1 and {}, got {capacity}",
                Semaphore::MAX_PERMITS
            )));
        }

        Ok(Self {
            slots: Arc::new(Semaphore::new(capacity)),
            capacity,
        })
    }

    /// Wait until a slot is free and take it.
    ///
    /// The slot is released when the returned permit is dropped, whether the
    /// holder finished normally or unwound.
    pub async fn acquire(&self) -> ScanResult<OwnedSemaphorePermit> {
        Arc::clone(&self.slots)
            .acquire_owned()
            .await
            .map_err(|_| ScanError::InvalidConfig("concurrency limiter was closed".to_string()))
    }

    /// Number of slots currently held.
    pub fn outstanding(&self) -> usize {
        self.capacity - self.slots.available_permits()
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
