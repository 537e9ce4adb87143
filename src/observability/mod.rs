//! Observability subsystem for planfix
//!
//! - Structured logging (JSON lines)
//! - Counters for configuration updates and filtering
//!
//! Observability is read-only: nothing here changes what gets filtered.
//!
//! # Usage
//!
//! ```ignore
//! use planfix::observability::{log_event_with_fields, Event, MetricsRegistry};
//!
//! log_event_with_fields(Event::DirectivesReplaced, &[("directives", "2")]);
//!
//! let metrics = MetricsRegistry::new();
//! metrics.increment_updates_applied();
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{MetricsRegistry, MetricsSnapshot};

fn severity_of(event: Event) -> Severity {
    if event.is_warning() {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    Logger::log(severity_of(event), event.as_str(), &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_of(event), event.as_str(), fields);
}
