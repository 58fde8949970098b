//! DR replication status values
//!
//! The controller reports replication toward the DR cluster using a fixed
//! set of sentinel strings. Only part of the set is classified as on, off or
//! error; [`ReplicationStatus::Unknown`] is none of these.

use std::fmt;

use serde::{Serialize, Serializer};

/// Replication state toward the DR (or DC) cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReplicationStatus {
    /// Nothing reported
    #[default]
    Unset,
    /// `SHOW SLAVE STATUS` returned no rows
    EmptySlaveStatus,
    On,
    Off,
    /// The IO thread stopped with an error
    IoThreadError,
    /// The SQL thread stopped with an error
    SqlThreadError,
    Unknown,
}

impl ReplicationStatus {
    /// Every status, in declaration order.
    pub const ALL: [ReplicationStatus; 7] = [
        ReplicationStatus::Unset,
        ReplicationStatus::EmptySlaveStatus,
        ReplicationStatus::On,
        ReplicationStatus::Off,
        ReplicationStatus::IoThreadError,
        ReplicationStatus::SqlThreadError,
        ReplicationStatus::Unknown,
    ];

    /// Sentinel text as reported by the controller
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplicationStatus::Unset => "",
            ReplicationStatus::EmptySlaveStatus => "empty slave status",
            ReplicationStatus::On => "ON",
            ReplicationStatus::Off => "OFF",
            ReplicationStatus::IoThreadError => "replication IO thread Error",
            ReplicationStatus::SqlThreadError => "replication SQL thread Error",
            ReplicationStatus::Unknown => "replication unknow status",
        }
    }

    /// Map sentinel text back to a status. Unrecognized text is `Unknown`.
    pub fn from_sentinel(text: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == text)
            .unwrap_or(ReplicationStatus::Unknown)
    }

    /// Replication is running.
    pub fn is_on(&self) -> bool {
        matches!(self, ReplicationStatus::On)
    }

    /// Replication is not running and nothing failed.
    pub fn is_off(&self) -> bool {
        matches!(
            self,
            ReplicationStatus::Unset | ReplicationStatus::Off | ReplicationStatus::EmptySlaveStatus
        )
    }

    /// A replication thread stopped with an error.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            ReplicationStatus::IoThreadError | ReplicationStatus::SqlThreadError
        )
    }

    /// Neither on, off nor error.
    pub fn is_unclassified(&self) -> bool {
        !(self.is_on() || self.is_off() || self.is_error())
    }
}

impl fmt::Display for ReplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ReplicationStatus {
    fn from(text: &str) -> Self {
        Self::from_sentinel(text)
    }
}

impl Serialize for ReplicationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Latest known state of DR replication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DrReplicationStatus {
    /// Whether replication to the DR cluster is expected to be running
    pub need_dr_repl: bool,
    /// Whether it is currently healthy
    pub status: bool,
    /// Why `status` is false
    pub reason: ReplicationStatus,
}

impl DrReplicationStatus {
    pub fn new(need_dr_repl: bool, status: bool, reason: ReplicationStatus) -> Self {
        Self {
            need_dr_repl,
            status,
            reason,
        }
    }

    /// Replication is expected but not healthy.
    pub fn is_failing(&self) -> bool {
        self.need_dr_repl && !self.status
    }
}
