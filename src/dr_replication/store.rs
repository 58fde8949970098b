//! DR replication status store
//!
//! Holds the latest status published by the cluster controller. One writer
//! role publishes, any number of health checks read. Every access takes the
//! same lock and moves whole values in and out, so a reader never observes
//! fields from two different publications.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use super::status::DrReplicationStatus;

/// Latest DR replication status, absent until first published.
#[derive(Debug, Default)]
pub struct ReplicationStatusStore {
    current: Mutex<Option<DrReplicationStatus>>,
}

impl ReplicationStatusStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // The critical sections only copy a value, so a panicking holder cannot
    // leave a partial record behind; recover the guard instead of failing.
    fn lock(&self) -> MutexGuard<'_, Option<DrReplicationStatus>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the stored status with a copy of `status`.
    pub fn set(&self, status: &DrReplicationStatus) {
        *self.lock() = Some(*status);
    }

    /// Copy of the stored status, `None` if nothing was published yet.
    pub fn get(&self) -> Option<DrReplicationStatus> {
        *self.lock()
    }

    /// Whether a status has been published.
    pub fn is_set(&self) -> bool {
        self.lock().is_some()
    }
}

static GLOBAL_STORE: OnceLock<Arc<ReplicationStatusStore>> = OnceLock::new();

/// Process-wide store shared by the controller and the health check.
pub fn global() -> Arc<ReplicationStatusStore> {
    Arc::clone(GLOBAL_STORE.get_or_init(|| Arc::new(ReplicationStatusStore::new())))
}
