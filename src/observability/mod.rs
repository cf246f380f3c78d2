//! Observability for the select path
//!
//! - Structured JSON logging with typed events
//! - Atomic counters shared by a stream and its chunks
//!
//! Observability is read-only: nothing here affects decoding or error
//! propagation.
//!
//! ```ignore
//! use aerodb_xapi::observability::{log_event_with_fields, Event};
//!
//! log_event_with_fields(Event::ChunkFetched, &[("scan_id", &scan_id)]);
//! ```

mod events;
mod logger;
mod metrics;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use metrics::{ScanMetrics, ScanMetricsSnapshot};

/// Severity an event is logged at
pub fn event_severity(event: Event) -> Severity {
    if event.is_failure() {
        Severity::Error
    } else if event.is_per_chunk() {
        Severity::Trace
    } else {
        Severity::Info
    }
}

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = event_severity(event);
    if severity >= Severity::Error {
        Logger::log_stderr(severity, event.as_str(), fields);
    } else {
        Logger::log(severity, event.as_str(), fields);
    }
}
