//! Port for structured admin-action auditing.
//!
//! Defines the [`AuditLog`] trait for recording admin events (bill saved,
//! representative deleted, roll-call toggled, persistence failures) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures a machine-readable
//! trail of every mutation (one JSONL line per event).

use serde_json::Value;

/// A structured audit event.
pub struct AuditEvent {
    /// Event type identifier (e.g., "bill_saved", "vote_toggled").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl AuditEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording audit events.
///
/// The `record` method is intentionally synchronous and non-fallible so that
/// auditing can never disturb the main flow; logging failures are silently
/// ignored by implementations.
pub trait AuditLog: Send + Sync {
    fn record(&self, event: AuditEvent);
}

/// No-op implementation for tests and when auditing is disabled.
pub struct NoAuditLog;

impl AuditLog for NoAuditLog {
    fn record(&self, _event: AuditEvent) {}
}
