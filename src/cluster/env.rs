//! Cluster environment
//!
//! The operator injects cluster-wide configuration into every member's
//! container environment. [`ClusterEnv`] is a parsed snapshot of it; both
//! local and seed-derived identities read namespace, cluster name,
//! credentials and port from the local snapshot.

use std::fmt;
use std::net::IpAddr;

use super::errors::{IdentityError, IdentityResult};

/// Selects host-network (`true`) or overlay-network (`false`) mode. Required.
pub const ENV_USE_HOST_NETWORK: &str = "MYSQL_CLUSTER_USE_HOST_NETWORK";
/// Name of the cluster the member belongs to
pub const ENV_CLUSTER_NAME: &str = "MYSQL_CLUSTER_NAME";
/// Kubernetes namespace of the member
pub const ENV_NAMESPACE: &str = "POD_NAMESPACE";
/// Multi-master mode flag, defaults to `false` when unset
pub const ENV_MULTI_MASTER: &str = "MYSQL_CLUSTER_MULTI_MASTER";
/// Local pod IP
pub const ENV_POD_IP: &str = "MY_POD_IP";
/// Local pod name, required in host-network mode
pub const ENV_POD_NAME: &str = "MY_POD_NAME";
/// Administrative password
pub const ENV_ROOT_PASSWORD: &str = "MYSQL_ROOT_PASSWORD";
/// DR peer host; its presence enables the DR health check
pub const ENV_DR_HOST: &str = "MYSQL_CLUSTER_DR_HOST";

/// Port the database listens on for client connections.
pub const MYSQL_DB_PORT: u16 = 3306;

/// A string that must never be printed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the underlying value. Callers must not log it.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Parse a boolean the way the operator writes them.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Snapshot of the member's environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterEnv {
    pub use_host_network: bool,
    pub namespace: String,
    pub cluster_name: String,
    pub multi_master: bool,
    /// `None` when unset or not a valid IP address
    pub pod_ip: Option<IpAddr>,
    /// `None` when unset or empty
    pub pod_name: Option<String>,
    pub root_password: Secret,
    /// `None` when unset or empty
    pub dr_host: Option<String>,
    pub port: u16,
}

impl ClusterEnv {
    /// Read the process environment.
    pub fn from_process() -> IdentityResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a snapshot from an arbitrary key lookup.
    ///
    /// Fails when the network-mode flag is missing or malformed, or when the
    /// multi-master flag is set to something that is not a boolean.
    pub fn from_lookup<F>(lookup: F) -> IdentityResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let raw_mode = lookup(ENV_USE_HOST_NETWORK).unwrap_or_default();
        let use_host_network = parse_bool(&raw_mode).ok_or(IdentityError::MalformedBool {
            var: ENV_USE_HOST_NETWORK,
            value: raw_mode,
        })?;

        let multi_master = match non_empty(ENV_MULTI_MASTER) {
            None => false,
            Some(raw) => parse_bool(&raw).ok_or(IdentityError::MalformedBool {
                var: ENV_MULTI_MASTER,
                value: raw,
            })?,
        };

        Ok(Self {
            use_host_network,
            namespace: lookup(ENV_NAMESPACE).unwrap_or_default(),
            cluster_name: lookup(ENV_CLUSTER_NAME).unwrap_or_default(),
            multi_master,
            pod_ip: non_empty(ENV_POD_IP).and_then(|raw| raw.parse().ok()),
            pod_name: non_empty(ENV_POD_NAME),
            root_password: Secret::new(lookup(ENV_ROOT_PASSWORD).unwrap_or_default()),
            dr_host: non_empty(ENV_DR_HOST),
            port: MYSQL_DB_PORT,
        })
    }
}
