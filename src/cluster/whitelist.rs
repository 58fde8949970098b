//! Group replication IP whitelist
//!
//! The whitelist is the first private range, in list order, that contains
//! the member's pod IP. List order matters: this is not a narrowest-match
//! search.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use super::errors::{IdentityError, IdentityResult};

/// An IPv4 network in CIDR form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivateRange {
    network: Ipv4Addr,
    prefix_len: u8,
}

impl PrivateRange {
    /// Create a range, masking off host bits of `addr`.
    pub const fn new(addr: Ipv4Addr, prefix_len: u8) -> Self {
        let mask = Self::mask_for(prefix_len);
        let [a, b, c, d] = (u32::from_be_bytes(addr.octets()) & mask).to_be_bytes();
        Self {
            network: Ipv4Addr::new(a, b, c, d),
            prefix_len,
        }
    }

    const fn mask_for(prefix_len: u8) -> u32 {
        if prefix_len == 0 {
            0
        } else if prefix_len >= 32 {
            u32::MAX
        } else {
            u32::MAX << (32 - prefix_len)
        }
    }

    /// Network address of the range
    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    /// Prefix length of the range
    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Check whether `ip` falls inside the range. IPv6 addresses never do,
    /// except IPv4-mapped ones.
    pub fn contains(&self, ip: IpAddr) -> bool {
        let v4 = match ip {
            IpAddr::V4(v4) => v4,
            IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
                Some(v4) => v4,
                None => return false,
            },
        };
        let mask = Self::mask_for(self.prefix_len);
        (u32::from(v4) & mask) == u32::from(self.network)
    }
}

impl fmt::Display for PrivateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix_len)
    }
}

/// Ranges a pod IP is checked against, in evaluation order.
///
/// `172.0.0.0/8` is deliberately wider than the reserved `172.16.0.0/12`.
pub const PRIVATE_RANGES: [PrivateRange; 4] = [
    PrivateRange::new(Ipv4Addr::new(10, 0, 0, 0), 8),
    PrivateRange::new(Ipv4Addr::new(172, 0, 0, 0), 8),
    PrivateRange::new(Ipv4Addr::new(192, 168, 0, 0), 16),
    // IPv4 shared address space (RFC 6598), used by kops for pod networks
    PrivateRange::new(Ipv4Addr::new(100, 64, 0, 0), 10),
];

/// Return the first range in [`PRIVATE_RANGES`] that contains `ip`.
pub fn whitelist_cidr(ip: Option<IpAddr>) -> IdentityResult<String> {
    let not_private = || IdentityError::NotPrivate {
        ip: ip.map_or_else(|| "<nil>".to_string(), |ip| ip.to_string()),
    };
    let ip = ip.ok_or_else(not_private)?;
    PRIVATE_RANGES
        .iter()
        .find(|range| range.contains(ip))
        .map(|range| range.to_string())
        .ok_or_else(not_private)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> Option<IpAddr> {
        Some(s.parse().unwrap())
    }

    #[test]
    fn test_ten_block() {
        assert_eq!(whitelist_cidr(ip("10.1.2.3")).unwrap(), "10.0.0.0/8");
    }

    #[test]
    fn test_wide_172_block() {
        assert_eq!(whitelist_cidr(ip("172.17.0.4")).unwrap(), "172.0.0.0/8");
        assert_eq!(whitelist_cidr(ip("172.200.1.1")).unwrap(), "172.0.0.0/8");
    }

    #[test]
    fn test_192_and_shared_space() {
        assert_eq!(whitelist_cidr(ip("192.168.9.9")).unwrap(), "192.168.0.0/16");
        assert_eq!(whitelist_cidr(ip("100.64.0.1")).unwrap(), "100.64.0.0/10");
        assert_eq!(whitelist_cidr(ip("100.127.255.255")).unwrap(), "100.64.0.0/10");
        assert!(whitelist_cidr(ip("100.128.0.1")).is_err());
    }

    #[test]
    fn test_public_ip_rejected() {
        let err = whitelist_cidr(ip("8.8.8.8")).unwrap_err();
        assert_eq!(
            err,
            IdentityError::NotPrivate {
                ip: "8.8.8.8".to_string()
            }
        );
    }

    #[test]
    fn test_unset_ip_rejected() {
        let err = whitelist_cidr(None).unwrap_err();
        assert!(err.to_string().contains("<nil>"));
    }

    #[test]
    fn test_ipv6() {
        assert!(whitelist_cidr(ip("fd00::1")).is_err());
        assert_eq!(whitelist_cidr(ip("::ffff:10.0.0.7")).unwrap(), "10.0.0.0/8");
    }

    #[test]
    fn test_range_masks_host_bits() {
        let range = PrivateRange::new(Ipv4Addr::new(10, 9, 8, 7), 8);
        assert_eq!(range.to_string(), "10.0.0.0/8");
        assert_eq!(range.network(), Ipv4Addr::new(10, 0, 0, 0));
        assert_eq!(range.prefix_len(), 8);
    }

    #[test]
    fn test_first_match_in_list_order() {
        let first = PRIVATE_RANGES
            .iter()
            .position(|r| r.contains("172.16.0.1".parse().unwrap()))
            .unwrap();
        assert_eq!(first, 1);
    }
}
