//! Target specification: IPv4 ranges and single hosts.
//!
//! Supports:
//! - Single IPv4 addresses (`192.168.1.1`)
//! - Inclusive IPv4 ranges (`192.168.0.1:192.168.1.255`)
//! - IPv4 CIDR blocks (`10.0.0.0/30`)
//! - IPv6 literals and hostnames, scanned as a single host
//!
//! Range walking is IPv4-only. Start and end do not have to be aligned on a
//! subnet boundary; the walk simply increments the address octet by octet.

use crate::error::{ScanError, ScanResult};
use ipnetwork::IpNetwork;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Compute the address that follows `ip`.
///
/// The rightmost octet is incremented; an octet at 255 wraps to 0 and carries
/// into the octet on its left. Returns `None` when all four octets overflow,
/// i.e. `255.255.255.255` has no successor.
pub fn next_ipv4(ip: Ipv4Addr) -> Option<Ipv4Addr> {
    let mut octets = ip.octets();
    for octet in octets.iter_mut().rev() {
        if *octet == u8::MAX {
            *octet = 0;
            continue;
        }
        *octet += 1;
        return Some(Ipv4Addr::from(octets));
    }
    None
}

/// An inclusive range of IPv4 addresses with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressRange {
    start: Ipv4Addr,
    end: Ipv4Addr,
}

impl AddressRange {
    /// Create a new range, rejecting `start > end` as 32-bit values.
    pub fn new(start: Ipv4Addr, end: Ipv4Addr) -> ScanResult<Self> {
        if u32::from(start) > u32::from(end) {
            return Err(ScanError::RangeValidation(format!(
                "address end ({end}) must not precede address start ({start})"
            )));
        }
        Ok(Self { start, end })
    }

    /// A range holding one address.
    pub const fn single(ip: Ipv4Addr) -> Self {
        Self { start: ip, end: ip }
    }

    pub const fn start(&self) -> Ipv4Addr {
        self.start
    }

    pub const fn end(&self) -> Ipv4Addr {
        self.end
    }

    /// Number of addresses in the range.
    pub fn len(&self) -> u64 {
        u64::from(u32::from(self.end) - u32::from(self.start)) + 1
    }

    /// A valid range always holds at least one address.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Lazily walk the range in ascending order.
    pub fn iter(&self) -> AddressWalk {
        AddressWalk {
            next: Some(self.start),
            end: self.end,
        }
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}:{}", self.start, self.end)
        }
    }
}

impl IntoIterator for &AddressRange {
    type Item = Ipv4Addr;
    type IntoIter = AddressWalk;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Ascending iterator over an [`AddressRange`].
#[derive(Debug, Clone)]
pub struct AddressWalk {
    next: Option<Ipv4Addr>,
    end: Ipv4Addr,
}

impl Iterator for AddressWalk {
    type Item = Ipv4Addr;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let end = u32::from(self.end);
        self.next = next_ipv4(current).filter(|ip| u32::from(*ip) <= end);
        Some(current)
    }
}

/// What a session scans: an IPv4 range, or one host that is never expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// An IPv4 range (a single IPv4 address is a one-address range).
    Range(AddressRange),
    /// An IPv6 literal or a hostname.
    Host(String),
}

impl TargetSpec {
    /// Parse a target specification from a string.
    pub fn parse(s: &str) -> ScanResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ScanError::AddressParse(String::from("<empty>")));
        }

        // Checked first so IPv6 literals never reach the `start:end` split.
        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(match ip {
                IpAddr::V4(v4) => Self::Range(AddressRange::single(v4)),
                IpAddr::V6(v6) => Self::Host(v6.to_string()),
            });
        }
        if let Some(host) = bracketed_or_scoped_ipv6(s) {
            return Ok(Self::Host(host));
        }

        if s.contains('/') {
            let network: IpNetwork = s
                .parse()
                .map_err(|_| ScanError::RangeValidation(format!("invalid CIDR notation: {s}")))?;
            return match network {
                IpNetwork::V4(net) => Ok(Self::Range(AddressRange::new(
                    net.network(),
                    net.broadcast(),
                )?)),
                IpNetwork::V6(_) => Err(ScanError::RangeValidation(format!(
                    "range scanning is limited to IPv4: {s}"
                ))),
            };
        }

        if let Some((start, end)) = s.split_once(':') {
            let start = parse_ipv4(start)?;
            let end = parse_ipv4(end)?;
            return Ok(Self::Range(AddressRange::new(start, end)?));
        }

        if looks_numeric(s) || !is_valid_hostname(s) {
            return Err(ScanError::AddressParse(s.to_string()));
        }
        Ok(Self::Host(s.to_string()))
    }

    /// Number of hosts this target expands to.
    pub fn host_count(&self) -> u64 {
        match self {
            Self::Range(range) => range.len(),
            Self::Host(_) => 1,
        }
    }

    /// The hosts to probe, in ascending order.
    pub fn hosts(&self) -> Box<dyn Iterator<Item = String> + Send + '_> {
        match self {
            Self::Range(range) => Box::new(range.iter().map(|ip| ip.to_string())),
            Self::Host(host) => Box::new(std::iter::once(host.clone())),
        }
    }
}

/// `[addr]`, `addr%zone` or `[addr%zone]` as a connectable IPv6 host.
///
/// The zone is kept verbatim; the resolver maps it to a scope id at connect
/// time.
fn bracketed_or_scoped_ipv6(s: &str) -> Option<String> {
    let inner = match s.strip_prefix('[') {
        Some(rest) => rest.strip_suffix(']')?,
        None if s.contains('%') => s,
        None => return None,
    };

    match inner.split_once('%') {
        Some((addr, zone)) if !zone.is_empty() => {
            let addr: Ipv6Addr = addr.parse().ok()?;
            Some(format!("{addr}%{zone}"))
        }
        Some(_) => None,
        None => inner.parse::<Ipv6Addr>().ok().map(|addr| addr.to_string()),
    }
}

impl FromStr for TargetSpec {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Range(range) => write!(f, "{range}"),
            Self::Host(host) => write!(f, "{host}"),
        }
    }
}

fn parse_ipv4(raw: &str) -> ScanResult<Ipv4Addr> {
    let raw = raw.trim();
    raw.parse()
        .map_err(|_| ScanError::AddressParse(raw.to_string()))
}

/// Dotted digits only, e.g. a mistyped `300.1.1.1`: never a hostname.
fn looks_numeric(s: &str) -> bool {
    s.split('.')
        .all(|label| !label.is_empty() && label.chars().all(|c| c.is_ascii_digit()))
}

/// Check if a string is a valid hostname.
fn is_valid_hostname(s: &str) -> bool {
    if s.len() > 253 {
        return false;
    }

    // Each label must be 1-63 characters, alphanumeric at both ends
    s.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.starts_with(|c: char| c.is_ascii_alphanumeric())
            && label.ends_with(|c: char| c.is_ascii_alphanumeric())
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> Ipv4Addr {
        s.parse().unwrap()
    }

    fn walk(start: &str, end: &str) -> Vec<String> {
        AddressRange::new(ip(start), ip(end))
            .unwrap()
            .iter()
            .map(|ip| ip.to_string())
            .collect()
    }

    #[test]
    fn test_next_ipv4_carries() {
        assert_eq!(next_ipv4(ip("0.0.0.254")), Some(ip("0.0.0.255")));
        assert_eq!(next_ipv4(ip("0.0.0.255")), Some(ip("0.0.1.0")));
        assert_eq!(next_ipv4(ip("0.0.255.255")), Some(ip("0.1.0.0")));
        assert_eq!(next_ipv4(ip("0.255.255.255")), Some(ip("1.0.0.0")));
    }

    #[test]
    fn test_next_ipv4_overflow() {
        assert_eq!(next_ipv4(ip("255.255.255.254")), Some(ip("255.255.255.255")));
        assert_eq!(next_ipv4(ip("255.255.255.255")), None);
    }

    #[test]
    fn test_walk_across_octet_boundary() {
        assert_eq!(
            walk("0.0.0.254", "0.0.1.1"),
            vec!["0.0.0.254", "0.0.0.255", "0.0.1.0", "0.0.1.1"]
        );
    }

    #[test]
    fn test_walk_is_gapless_and_ascending() {
        let range = AddressRange::new(ip("127.0.255.250"), ip("127.1.0.5")).unwrap();
        let addresses: Vec<u32> = range.iter().map(u32::from).collect();

        assert_eq!(addresses.len() as u64, range.len());
        assert_eq!(addresses.len(), 12);
        assert_eq!(addresses.first(), Some(&u32::from(ip("127.0.255.250"))));
        assert_eq!(addresses.last(), Some(&u32::from(ip("127.1.0.5"))));
        assert!(addresses.windows(2).all(|w| w[1] == w[0] + 1));
    }

    #[test]
    fn test_walk_stops_at_top_of_address_space() {
        assert_eq!(
            walk("255.255.255.254", "255.255.255.255"),
            vec!["255.255.255.254", "255.255.255.255"]
        );
    }

    #[test]
    fn test_single_address_range() {
        assert_eq!(walk("10.0.0.1", "10.0.0.1"), vec!["10.0.0.1"]);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = AddressRange::new(ip("10.0.0.2"), ip("10.0.0.1")).unwrap_err();
        assert!(matches!(err, ScanError::RangeValidation(_)));
    }

    #[test]
    fn test_parse_single_ipv4() {
        let spec = TargetSpec::parse("192.168.1.1").unwrap();
        assert_eq!(spec, TargetSpec::Range(AddressRange::single(ip("192.168.1.1"))));
        assert_eq!(spec.host_count(), 1);
    }

    #[test]
    fn test_parse_ipv4_range() {
        let spec = TargetSpec::parse("192.168.0.1:192.168.1.255").unwrap();
        assert_eq!(spec.host_count(), 511);
        assert_eq!(spec.hosts().next().as_deref(), Some("192.168.0.1"));
    }

    #[test]
    fn test_parse_cidr_covers_whole_block() {
        let spec = TargetSpec::parse("10.0.0.0/30").unwrap();
        let hosts: Vec<String> = spec.hosts().collect();
        assert_eq!(hosts, vec!["10.0.0.0", "10.0.0.1", "10.0.0.2", "10.0.0.3"]);
    }

    #[test]
    fn test_parse_ipv6_is_single_host() {
        let spec = TargetSpec::parse("::1").unwrap();
        assert_eq!(spec, TargetSpec::Host("::1".to_string()));
        assert_eq!(spec.hosts().count(), 1);
    }

    #[test]
    fn test_parse_bracketed_and_scoped_ipv6() {
        assert_eq!(
            TargetSpec::parse("[::1]").unwrap(),
            TargetSpec::Host("::1".to_string())
        );
        assert_eq!(
            TargetSpec::parse("fe80::1%lo").unwrap(),
            TargetSpec::Host("fe80::1%lo".to_string())
        );
        assert_eq!(
            TargetSpec::parse("[fe80::0:1%eth0]").unwrap(),
            TargetSpec::Host("fe80::1%eth0".to_string())
        );
        assert_eq!(TargetSpec::parse("fe80::1%lo").unwrap().host_count(), 1);

        assert!(TargetSpec::parse("[::1").is_err());
        assert!(TargetSpec::parse("fe80::1%").is_err());
        assert!(TargetSpec::parse("[10.0.0.1]").is_err());
    }

    #[test]
    fn test_parse_hostname_is_single_host() {
        let spec = TargetSpec::parse("localhost").unwrap();
        assert_eq!(spec, TargetSpec::Host("localhost".to_string()));
    }

    #[test]
    fn test_parse_rejects_non_ipv4_range_bounds() {
        assert!(matches!(
            TargetSpec::parse("10.0.0.1:example.com"),
            Err(ScanError::AddressParse(_))
        ));
        assert!(matches!(
            TargetSpec::parse("10.0.0.300:10.0.1.1"),
            Err(ScanError::AddressParse(_))
        ));
    }

    #[test]
    fn test_parse_rejects_malformed_literal() {
        assert!(matches!(
            TargetSpec::parse("300.1.1.1"),
            Err(ScanError::AddressParse(_))
        ));
        assert!(TargetSpec::parse("").is_err());
        assert!(TargetSpec::parse("-bad-.com").is_err());
    }

    #[test]
    fn test_parse_rejects_ipv6_cidr() {
        assert!(matches!(
            TargetSpec::parse("2001:db8::/126"),
            Err(ScanError::RangeValidation(_))
        ));
    }
}
