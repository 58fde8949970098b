//! Group seed parsing
//!
//! A group seed is `<host>:<port>`. Only the host is interpreted; the port
//! is the peer's group replication port, not the port clients connect to.

use super::errors::{IdentityError, IdentityResult};

/// Split a `host:port` string into its parts.
///
/// Accepts bracketed IPv6 hosts (`[::1]:3306`). The port is not checked for
/// being numeric, only for being present.
pub fn split_host_port(seed: &str) -> IdentityResult<(&str, &str)> {
    let malformed = |reason: &'static str| IdentityError::MalformedSeed {
        seed: seed.to_string(),
        reason,
    };

    let colon = seed.rfind(':').ok_or_else(|| malformed("missing port in address"))?;

    let (host, host_start, host_end) = if seed.starts_with('[') {
        let end = seed.find(']').ok_or_else(|| malformed("missing ']' in address"))?;
        if end + 1 == seed.len() {
            return Err(malformed("missing port in address"));
        }
        if end + 1 != colon {
            if seed.as_bytes()[end + 1] == b':' {
                return Err(malformed("too many colons in address"));
            }
            return Err(malformed("missing port in address"));
        }
        (&seed[1..end], 1, end + 1)
    } else {
        let host = &seed[..colon];
        if host.contains(':') {
            return Err(malformed("too many colons in address"));
        }
        (host, 0, 0)
    };

    if seed[host_start..].contains('[') {
        return Err(malformed("unexpected '[' in address"));
    }
    if seed[host_end..].contains(']') {
        return Err(malformed("unexpected ']' in address"));
    }

    Ok((host, &seed[colon + 1..]))
}

/// Derive the peer's pod name from its group seed: the first dot-delimited
/// label of the host.
pub fn pod_name_from_seed(seed: &str) -> IdentityResult<String> {
    let (host, _port) = split_host_port(seed)?;
    let pod_name = host.split_once('.').map_or(host, |(label, _)| label);
    Ok(pod_name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fqdn_seed() {
        assert_eq!(
            pod_name_from_seed("pod-0.svc.cluster.local:3306").unwrap(),
            "pod-0"
        );
    }

    #[test]
    fn test_short_host() {
        assert_eq!(pod_name_from_seed("mysql-1:33061").unwrap(), "mysql-1");
    }

    #[test]
    fn test_missing_port() {
        let err = pod_name_from_seed("not-a-valid-seed").unwrap_err();
        assert!(matches!(err, IdentityError::MalformedSeed { .. }));
        assert!(err.to_string().contains("missing port"));
    }

    #[test]
    fn test_empty_seed() {
        assert!(pod_name_from_seed("").is_err());
    }

    #[test]
    fn test_too_many_colons() {
        let err = split_host_port("a:b:3306").unwrap_err();
        assert!(err.to_string().contains("too many colons"));
    }

    #[test]
    fn test_bracketed_ipv6() {
        assert_eq!(split_host_port("[::1]:3306").unwrap(), ("::1", "3306"));
        assert!(split_host_port("[::1]").is_err());
        assert!(split_host_port("[::1:3306").is_err());
        assert!(split_host_port("[::1]x:3306").is_err());
    }

    #[test]
    fn test_stray_brackets() {
        assert!(split_host_port("a]b:3306").is_err());
        assert!(split_host_port("a[b:3306").is_err());
    }

    #[test]
    fn test_empty_host_and_port_are_syntactically_valid() {
        assert_eq!(split_host_port(":3306").unwrap(), ("", "3306"));
        assert_eq!(split_host_port("host:").unwrap(), ("host", ""));
    }
}
