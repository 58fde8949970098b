//! Observable agent events
//!
//! Every log line names one of these events.

use std::fmt;

/// Observable events in the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    /// Agent startup begins
    AgentStart,
    /// Agent is shutting down
    AgentStop,

    // Identity
    /// Local member identity resolved
    IdentityResolved,
    /// Local member identity could not be resolved (FATAL)
    IdentityFailed,

    // DR replication
    /// Controller published a new DR replication status
    DrStatusPublished,
    /// No DR peer configured, DR health check not registered
    DrCheckDisabled,
    /// DR health check registered
    DrCheckRegistered,
    /// DR replication expected but not healthy
    DrReplicationFailed,

    // Health server
    /// Health endpoint listening
    HealthServerStart,
    /// Health endpoint failed
    HealthServerFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::AgentStart => "AGENT_START",
            Event::AgentStop => "AGENT_STOP",
            Event::IdentityResolved => "IDENTITY_RESOLVED",
            Event::IdentityFailed => "IDENTITY_FAILED",
            Event::DrStatusPublished => "DR_STATUS_PUBLISHED",
            Event::DrCheckDisabled => "DR_CHECK_DISABLED",
            Event::DrCheckRegistered => "DR_CHECK_REGISTERED",
            Event::DrReplicationFailed => "DR_REPLICATION_FAILED",
            Event::HealthServerStart => "HEALTH_SERVER_START",
            Event::HealthServerFailed => "HEALTH_SERVER_FAILED",
        }
    }

    /// Events that end the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::IdentityFailed | Event::HealthServerFailed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
