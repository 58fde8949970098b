//! DR Replication Health
//!
//! Tracks asynchronous replication toward the disaster-recovery cluster:
//! - The cluster controller publishes what it observes into the store
//! - The DR health check reads the store on every probe
//!
//! The store is the only shared mutable state in the agent. It is exposed
//! both as an injectable [`ReplicationStatusStore`] and as the process-wide
//! instance returned by [`global`].

mod health;
mod status;
mod store;

pub use health::{
    check_dr_status, dr_health_check_from_env, new_dr_health_check, DrCheckError, DrCheckResult,
    DR_CHECK_NAME,
};
pub use status::{DrReplicationStatus, ReplicationStatus};
pub use store::{global, ReplicationStatusStore};

use crate::observability::{Event, Logger};

/// Publish a status to the process-wide store. Called by the controller.
pub fn set_dr_status(status: &DrReplicationStatus) {
    global().set(status);
    Logger::trace(
        Event::DrStatusPublished,
        &[
            ("need_dr_repl", bool_str(status.need_dr_repl)),
            ("reason", status.reason.as_str()),
            ("status", bool_str(status.status)),
        ],
    );
}

/// Copy of the process-wide status, if any was published.
pub fn get_dr_status() -> Option<DrReplicationStatus> {
    global().get()
}

fn bool_str(b: bool) -> &'static str {
    if b {
        "true"
    } else {
        "false"
    }
}
