//! DR replication health check
//!
//! The check only reads the status store. It reports unhealthy when DR
//! replication is expected and the controller last saw it failing; an
//! empty store is healthy since there is nothing to report yet.

use std::sync::Arc;

use thiserror::Error;

use crate::cluster::ClusterEnv;
use crate::health::{Check, CheckError, CheckResult};
use crate::observability::{Event, Logger};

use super::store::ReplicationStatusStore;

/// Name the DR check is registered under
pub const DR_CHECK_NAME: &str = "dr-replication";

/// Result type for DR check construction
pub type DrCheckResult<T> = Result<T, DrCheckError>;

/// Reasons a DR check is not built
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrCheckError {
    /// No DR peer is configured, so there is nothing to check.
    #[error("No DR-cluster, No need DR-health-check")]
    NotConfigured,
}

impl DrCheckError {
    /// The agent keeps running without the check.
    pub fn is_fatal(&self) -> bool {
        false
    }
}

/// Evaluate DR replication health from the store's current value.
pub fn check_dr_status(store: &ReplicationStatusStore) -> CheckResult {
    let Some(status) = store.get() else {
        return Ok(());
    };
    if status.is_failing() {
        let reason = status.reason.as_str();
        Logger::error(Event::DrReplicationFailed, &[("reason", reason)]);
        return Err(CheckError::new(format!("DR-replication fail: {reason:?}")));
    }
    Ok(())
}

/// Build the DR health check bound to `store`.
///
/// Fails with [`DrCheckError::NotConfigured`] when `dr_host` is absent or
/// empty.
pub fn new_dr_health_check(
    dr_host: Option<&str>,
    store: Arc<ReplicationStatusStore>,
) -> DrCheckResult<Check> {
    match dr_host {
        Some(host) if !host.is_empty() => Ok(Arc::new(move || check_dr_status(&store))),
        _ => Err(DrCheckError::NotConfigured),
    }
}

/// Build the DR health check for the DR peer named in the environment.
pub fn dr_health_check_from_env(
    env: &ClusterEnv,
    store: Arc<ReplicationStatusStore>,
) -> DrCheckResult<Check> {
    new_dr_health_check(env.dr_host.as_deref(), store)
}
