//! Observability for the agent
//!
//! - Structured logging (JSON, one line per event)
//! - Typed lifecycle events
//!
//! Observability is read-only: logging never changes what the agent does,
//! and a failed log write is ignored.
//!
//! # Usage
//!
//! ```ignore
//! use mysql_agent::observability::{log_event_with_fields, Event, Logger};
//!
//! Logger::info(Event::IdentityResolved, &[("name", "mysql-0.mysql")]);
//! log_event_with_fields(Event::DrCheckDisabled, &[("reason", "no DR host")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity};

/// Log a lifecycle event at its natural severity
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields at its natural severity
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event, fields);
}
