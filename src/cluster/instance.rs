//! Cluster member identity
//!
//! A member is addressed differently depending on how its pods are networked:
//!
//! - Overlay network: pods get cluster DNS names derived from the parent
//!   StatefulSet, `<parent>-<ordinal>.<parent>`.
//! - Host network: pods share the node's network namespace and are
//!   addressed by the node's host name.
//!
//! Identities are built once, either for the local member or for a peer
//! named by a group seed, and are never mutated afterwards.

use std::net::IpAddr;

use serde::Serialize;

use super::env::{ClusterEnv, Secret};
use super::errors::{IdentityError, IdentityResult};
use super::hostname::{HostnameSource, SystemHostname};
use super::ordinal::parent_name_and_ordinal;
use super::seed::pod_name_from_seed;
use super::whitelist::whitelist_cidr;

/// Administrative account used by the agent.
pub const ADMIN_USER: &str = "root";

/// How member pods are networked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkMode {
    Overlay,
    Host,
}

impl NetworkMode {
    pub fn from_env(env: &ClusterEnv) -> Self {
        if env.use_host_network {
            NetworkMode::Host
        } else {
            NetworkMode::Overlay
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkMode::Overlay => "overlay",
            NetworkMode::Host => "host",
        }
    }
}

fn address(host: &str, port: u16) -> String {
    format!("{host}:{port}")
}

fn shell_uri(password: &Secret, host: &str, port: u16) -> String {
    format!("{}:{}@{}:{}", ADMIN_USER, password.expose(), host, port)
}

/// A member addressed through the cluster overlay network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayNetworkMember {
    namespace: String,
    cluster_name: String,
    /// StatefulSet the pod belongs to
    parent_name: String,
    ordinal: i32,
    port: u16,
    multi_master: bool,
    ip: Option<IpAddr>,
    password: Secret,
}

impl OverlayNetworkMember {
    /// Build the local member; the pod's hostname carries parent and ordinal.
    pub fn local(env: &ClusterEnv, hostname: &dyn HostnameSource) -> IdentityResult<Self> {
        let hostname = hostname.hostname()?;
        let (parent_name, ordinal) = parent_name_and_ordinal(&hostname);
        Ok(Self {
            namespace: env.namespace.clone(),
            cluster_name: env.cluster_name.clone(),
            parent_name,
            ordinal,
            port: env.port,
            multi_master: env.multi_master,
            ip: env.pod_ip,
            password: env.root_password.clone(),
        })
    }

    /// Build a peer from its group seed. The seed's port is ignored.
    pub fn from_seed(env: &ClusterEnv, seed: &str) -> IdentityResult<Self> {
        let pod_name = pod_name_from_seed(seed)?;
        let (parent_name, ordinal) = parent_name_and_ordinal(&pod_name);
        Ok(Self {
            namespace: env.namespace.clone(),
            cluster_name: env.cluster_name.clone(),
            parent_name,
            ordinal,
            port: env.port,
            multi_master: env.multi_master,
            ip: None,
            password: env.root_password.clone(),
        })
    }

    pub fn parent_name(&self) -> &str {
        &self.parent_name
    }

    /// `<parent>-<ordinal>`
    pub fn pod_name(&self) -> String {
        format!("{}-{}", self.parent_name, self.ordinal)
    }

    /// `<parent>-<ordinal>.<parent>`
    pub fn name(&self) -> String {
        format!("{}.{}", self.pod_name(), self.parent_name)
    }

    pub fn ordinal(&self) -> i32 {
        self.ordinal
    }
}

/// A member running in the node's network namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostNetworkMember {
    namespace: String,
    cluster_name: String,
    /// Known only for the local member
    ordinal: Option<i32>,
    port: u16,
    multi_master: bool,
    ip: Option<IpAddr>,
    pod_name: String,
    host_name: String,
    password: Secret,
}

impl HostNetworkMember {
    /// Build the local member. The hostname is the node's; the ordinal comes
    /// from the pod name, which must be set.
    pub fn local(env: &ClusterEnv, hostname: &dyn HostnameSource) -> IdentityResult<Self> {
        let host_name = hostname.hostname()?;
        let pod_name = env.pod_name.clone().ok_or(IdentityError::MissingPodName)?;
        let (_, ordinal) = parent_name_and_ordinal(&pod_name);
        Ok(Self {
            namespace: env.namespace.clone(),
            cluster_name: env.cluster_name.clone(),
            ordinal: Some(ordinal),
            port: env.port,
            multi_master: env.multi_master,
            ip: env.pod_ip,
            pod_name,
            host_name,
            password: env.root_password.clone(),
        })
    }

    /// Build a peer from its group seed (`<hostname>:<port>`). A host name
    /// does not reveal the peer's ordinal, so it stays unknown.
    pub fn from_seed(env: &ClusterEnv, seed: &str) -> IdentityResult<Self> {
        let host_name = pod_name_from_seed(seed)?;
        Ok(Self {
            namespace: env.namespace.clone(),
            cluster_name: env.cluster_name.clone(),
            ordinal: None,
            port: env.port,
            multi_master: env.multi_master,
            ip: None,
            pod_name: host_name.clone(),
            host_name,
            password: env.root_password.clone(),
        })
    }

    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    pub fn pod_name(&self) -> &str {
        &self.pod_name
    }

    pub fn ordinal(&self) -> IdentityResult<i32> {
        self.ordinal.ok_or_else(|| IdentityError::OrdinalUnavailable {
            host: self.host_name.clone(),
        })
    }
}

/// Identity of one cluster member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberIdentity {
    Overlay(OverlayNetworkMember),
    Host(HostNetworkMember),
}

impl MemberIdentity {
    /// Resolve the local member from the process environment and hostname.
    pub fn from_process() -> IdentityResult<Self> {
        let env = ClusterEnv::from_process()?;
        Self::local(&env, &SystemHostname)
    }

    /// Resolve the local member.
    pub fn local(env: &ClusterEnv, hostname: &dyn HostnameSource) -> IdentityResult<Self> {
        match NetworkMode::from_env(env) {
            NetworkMode::Host => HostNetworkMember::local(env, hostname).map(Self::Host),
            NetworkMode::Overlay => OverlayNetworkMember::local(env, hostname).map(Self::Overlay),
        }
    }

    /// Resolve a peer from its group seed. Cluster-wide values come from
    /// the local environment.
    pub fn from_seed(env: &ClusterEnv, seed: &str) -> IdentityResult<Self> {
        match NetworkMode::from_env(env) {
            NetworkMode::Host => HostNetworkMember::from_seed(env, seed).map(Self::Host),
            NetworkMode::Overlay => OverlayNetworkMember::from_seed(env, seed).map(Self::Overlay),
        }
    }

    pub fn network_mode(&self) -> NetworkMode {
        match self {
            MemberIdentity::Overlay(_) => NetworkMode::Overlay,
            MemberIdentity::Host(_) => NetworkMode::Host,
        }
    }

    pub fn user(&self) -> &'static str {
        ADMIN_USER
    }

    /// Administrative password. Never log this.
    pub fn password(&self) -> &str {
        self.secret().expose()
    }

    /// `user:password@name:port`. Contains the password; never log this.
    pub fn shell_uri(&self) -> String {
        shell_uri(self.secret(), &self.name(), self.port())
    }

    /// `name:port`
    pub fn address(&self) -> String {
        address(&self.name(), self.port())
    }

    pub fn namespace(&self) -> &str {
        match self {
            MemberIdentity::Overlay(m) => &m.namespace,
            MemberIdentity::Host(m) => &m.namespace,
        }
    }

    pub fn cluster_name(&self) -> &str {
        match self {
            MemberIdentity::Overlay(m) => &m.cluster_name,
            MemberIdentity::Host(m) => &m.cluster_name,
        }
    }

    /// Name other members use to reach this one.
    pub fn name(&self) -> String {
        match self {
            MemberIdentity::Overlay(m) => m.name(),
            MemberIdentity::Host(m) => m.host_name.clone(),
        }
    }

    pub fn pod_name(&self) -> String {
        match self {
            MemberIdentity::Overlay(m) => m.pod_name(),
            MemberIdentity::Host(m) => m.pod_name.clone(),
        }
    }

    /// Position within the StatefulSet. Fails for host-network peers
    /// resolved from a seed.
    pub fn ordinal(&self) -> IdentityResult<i32> {
        match self {
            MemberIdentity::Overlay(m) => Ok(m.ordinal()),
            MemberIdentity::Host(m) => m.ordinal(),
        }
    }

    /// Database listener port, independent of any seed port.
    pub fn port(&self) -> u16 {
        match self {
            MemberIdentity::Overlay(m) => m.port,
            MemberIdentity::Host(m) => m.port,
        }
    }

    pub fn is_multi_master(&self) -> bool {
        match self {
            MemberIdentity::Overlay(m) => m.multi_master,
            MemberIdentity::Host(m) => m.multi_master,
        }
    }

    pub fn pod_ip(&self) -> Option<IpAddr> {
        match self {
            MemberIdentity::Overlay(m) => m.ip,
            MemberIdentity::Host(m) => m.ip,
        }
    }

    /// CIDR to whitelist for group replication, based on the pod IP.
    pub fn whitelist_cidr(&self) -> IdentityResult<String> {
        whitelist_cidr(self.pod_ip())
    }

    /// Credential-free view of the identity.
    pub fn summary(&self) -> IdentitySummary {
        IdentitySummary {
            network_mode: self.network_mode(),
            namespace: self.namespace().to_string(),
            cluster_name: self.cluster_name().to_string(),
            name: self.name(),
            pod_name: self.pod_name(),
            ordinal: self.ordinal().ok(),
            address: self.address(),
            port: self.port(),
            multi_master: self.is_multi_master(),
            pod_ip: self.pod_ip().map(|ip| ip.to_string()),
            whitelist_cidr: self.whitelist_cidr().ok(),
        }
    }

    fn secret(&self) -> &Secret {
        match self {
            MemberIdentity::Overlay(m) => &m.password,
            MemberIdentity::Host(m) => &m.password,
        }
    }
}

/// Serializable identity without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentitySummary {
    pub network_mode: NetworkMode,
    pub namespace: String,
    pub cluster_name: String,
    pub name: String,
    pub pod_name: String,
    pub ordinal: Option<i32>,
    pub address: String,
    pub port: u16,
    pub multi_master: bool,
    pub pod_ip: Option<String>,
    pub whitelist_cidr: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::env::MYSQL_DB_PORT;
    use crate::cluster::hostname::StaticHostname;

    fn env(use_host_network: bool) -> ClusterEnv {
        ClusterEnv {
            use_host_network,
            namespace: "prod".to_string(),
            cluster_name: "orders".to_string(),
            multi_master: false,
            pod_ip: Some("10.1.2.3".parse().unwrap()),
            pod_name: Some("orders-2".to_string()),
            root_password: Secret::new("s3cret"),
            dr_host: None,
            port: MYSQL_DB_PORT,
        }
    }

    fn host(name: &str) -> StaticHostname {
        StaticHostname(name.to_string())
    }

    #[test]
    fn test_overlay_local_naming() {
        let member = MemberIdentity::local(&env(false), &host("orders-2")).unwrap();
        assert_eq!(member.network_mode(), NetworkMode::Overlay);
        assert_eq!(member.pod_name(), "orders-2");
        assert_eq!(member.name(), "orders-2.orders");
        assert_eq!(member.address(), "orders-2.orders:3306");
        assert_eq!(member.ordinal().unwrap(), 2);
        assert_eq!(member.whitelist_cidr().unwrap(), "10.0.0.0/8");
    }

    #[test]
    fn test_overlay_seed_ignores_seed_port() {
        let member =
            MemberIdentity::from_seed(&env(false), "orders-1.orders.prod.svc:33061").unwrap();
        assert_eq!(member.name(), "orders-1.orders");
        assert_eq!(member.port(), MYSQL_DB_PORT);
        assert_eq!(member.ordinal().unwrap(), 1);
        assert_eq!(member.pod_ip(), None);
        assert!(member.whitelist_cidr().is_err());
    }

    #[test]
    fn test_host_local_uses_hostname_and_pod_ordinal() {
        let member = MemberIdentity::local(&env(true), &host("node-a")).unwrap();
        assert_eq!(member.network_mode(), NetworkMode::Host);
        assert_eq!(member.name(), "node-a");
        assert_eq!(member.pod_name(), "orders-2");
        assert_eq!(member.ordinal().unwrap(), 2);
        assert_eq!(member.address(), "node-a:3306");
    }

    #[test]
    fn test_host_local_requires_pod_name() {
        let mut env = env(true);
        env.pod_name = None;
        let err = MemberIdentity::local(&env, &host("node-a")).unwrap_err();
        assert_eq!(err, IdentityError::MissingPodName);
    }

    #[test]
    fn test_host_seed_has_no_ordinal() {
        let member = MemberIdentity::from_seed(&env(true), "node-b.dc1:3306").unwrap();
        assert_eq!(member.name(), "node-b");
        assert_eq!(member.pod_name(), "node-b");
        let err = member.ordinal().unwrap_err();
        assert_eq!(
            err,
            IdentityError::OrdinalUnavailable {
                host: "node-b".to_string()
            }
        );
    }

    #[test]
    fn test_shell_uri_carries_credentials() {
        let member = MemberIdentity::local(&env(false), &host("orders-0")).unwrap();
        assert_eq!(member.user(), "root");
        assert_eq!(member.password(), "s3cret");
        assert_eq!(member.shell_uri(), "root:s3cret@orders-0.orders:3306");
    }

    #[test]
    fn test_debug_and_summary_hide_password() {
        let member = MemberIdentity::local(&env(false), &host("orders-0")).unwrap();
        assert!(!format!("{member:?}").contains("s3cret"));
        let json = serde_json::to_string(&member.summary()).unwrap();
        assert!(!json.contains("s3cret"));
        assert!(json.contains("\"network_mode\":\"overlay\""));
    }

    #[test]
    fn test_unparseable_hostname_keeps_placeholder_ordinal() {
        let member = MemberIdentity::local(&env(false), &host("standalone")).unwrap();
        assert_eq!(member.ordinal().unwrap(), -1);
        assert_eq!(member.pod_name(), "--1");
    }
}
