//! Core type definitions using newtype patterns for type safety.
//!
//! Ranges are validated on construction, so a session never walks an
//! inverted or out-of-bounds range.

mod port;
mod target;

pub use port::{Port, PortRange};
pub use target::{next_ipv4, AddressRange, AddressWalk, TargetSpec};
