//! Port types with validation and parsing.
//!
//! The `Port` newtype ensures values are always valid port numbers (1-65535).
//! `PortRange` is the inclusive, validated range a session walks.

use crate::error::{ScanError, ScanResult};
use std::fmt;

/// A validated network port number (1-65535).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Port(u16);

impl Port {
    /// Minimum valid port number.
    pub const MIN: u16 = 1;
    /// Maximum valid port number.
    pub const MAX: u16 = 65535;

    /// Create a new Port from a u16, returning None if invalid.
    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        if port >= Self::MIN {
            Some(Self(port))
        } else {
            None
        }
    }

    /// Get the raw port number.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// A range of ports (inclusive), walked in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    start: Port,
    end: Port,
}

impl PortRange {
    /// Create a new port range.
    pub fn new(start: Port, end: Port) -> ScanResult<Self> {
        if start > end {
            Err(ScanError::RangeValidation(format!(
                "port end ({end}) must be greater than port start ({start})"
            )))
        } else {
            Ok(Self { start, end })
        }
    }

    /// Every port, 1 through 65535.
    pub const fn full() -> Self {
        Self {
            start: Port(Port::MIN),
            end: Port(Port::MAX),
        }
    }

    /// Parse `"start:end"` or a single `"port"`; `None` selects the full range.
    ///
    /// An empty bound is unset. A start below 1 is raised to 1 and an end
    /// below 1 or above 65535 is lowered to 65535. Anything else out of
    /// bounds is rejected.
    pub fn parse(spec: Option<&str>) -> ScanResult<Self> {
        let Some(spec) = spec.map(str::trim).filter(|s| !s.is_empty()) else {
            return Ok(Self::full());
        };

        let (start, end) = match spec.split_once(':') {
            Some((start, end)) => (parse_bound(start)?, parse_bound(end)?),
            None => {
                let port = parse_bound(spec)?;
                (port, port)
            }
        };

        let min = i64::from(Port::MIN);
        let max = i64::from(Port::MAX);
        let start = start.max(min);
        let end = if end < min || end > max { max } else { end };

        if start > max {
            return Err(ScanError::RangeValidation(format!(
                "port range must be between {min} and {max}"
            )));
        }
        if end < start {
            return Err(ScanError::RangeValidation(format!(
                "port end ({end}) must be greater than port start ({start})"
            )));
        }

        // Both bounds are inside 1..=65535 at this point.
        Self::new(Port(start as u16), Port(end as u16))
    }

    /// First port of the range.
    pub const fn start(&self) -> Port {
        self.start
    }

    /// Last port of the range.
    pub const fn end(&self) -> Port {
        self.end
    }

    /// Get the number of ports in this range.
    pub const fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize + 1
    }

    /// A valid range always holds at least one port.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate over all ports in this range.
    pub fn iter(&self) -> impl Iterator<Item = Port> {
        (self.start.0..=self.end.0).map(Port)
    }
}

impl Default for PortRange {
    fn default() -> Self {
        Self::full()
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

/// Parse one side of a range. An empty side is unset and reads as 0, which
/// the caller clamps like any other out-of-range bound.
fn parse_bound(raw: &str) -> ScanResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse()
        .map_err(|_| ScanError::RangeValidation(format!("invalid port number: {raw}")))
}
