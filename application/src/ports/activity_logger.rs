//! Port for structured activity logging.
//!
//! Defines the [`ActivityLogger`] trait for recording board activity
//! (questions created, edited, deleted; sign-in and sign-out) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port keeps a machine-readable
//! record of what changed (JSONL in the default adapter).

use serde_json::Value;

/// A structured activity event.
pub struct ActivityEvent {
    /// Event type identifier (e.g., "question_created", "signed_in").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ActivityEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging activity events.
///
/// `log` is synchronous and non-fallible; a broken log must never fail a
/// write that already reached the store.
pub trait ActivityLogger: Send + Sync {
    fn log(&self, event: ActivityEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoActivityLogger;

impl ActivityLogger for NoActivityLogger {
    fn log(&self, _event: ActivityEvent) {}
}
