//! Port for the audit/event sink collaborator.
//!
//! Every mutating call notifies the sink with the acting user, an event
//! type, a severity, and structured detail. Sink delivery is
//! non-blocking with respect to the primary operation: failures are
//! logged and swallowed, never propagated.

use serde::Serialize;
use serde_json::Value;
use sweldo_shared::types::{EmployeeId, UserId};
use tracing::warn;

/// Severity of an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSeverity {
    /// Routine mutation.
    Info,
    /// Degraded outcome (e.g. a collected bulk-assignment failure).
    Warning,
    /// A blocked operation.
    Error,
}

/// A structured audit event.
#[derive(Debug, Clone, Serialize)]
pub struct AuditEvent {
    /// The user performing the operation.
    pub actor: UserId,
    /// Event type, e.g. `salary_profile.superseded`.
    pub action: &'static str,
    /// Event severity.
    pub severity: AuditSeverity,
    /// The employee the event concerns, when applicable.
    pub employee: Option<EmployeeId>,
    /// Identifier of the affected entity (loan id, period id, ...).
    pub entity: Option<String>,
    /// Structured detail payload.
    pub detail: Value,
}

impl AuditEvent {
    /// Creates an info-severity event.
    #[must_use]
    pub fn info(actor: UserId, action: &'static str) -> Self {
        Self {
            actor,
            action,
            severity: AuditSeverity::Info,
            employee: None,
            entity: None,
            detail: Value::Null,
        }
    }

    /// Attaches the employee this event concerns.
    #[must_use]
    pub fn employee(mut self, employee: EmployeeId) -> Self {
        self.employee = Some(employee);
        self
    }

    /// Attaches the affected entity identifier.
    #[must_use]
    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    /// Attaches the structured detail payload.
    #[must_use]
    pub fn detail(mut self, detail: Value) -> Self {
        self.detail = detail;
        self
    }

    /// Sets the severity.
    #[must_use]
    pub fn severity(mut self, severity: AuditSeverity) -> Self {
        self.severity = severity;
        self
    }
}

/// Error returned by a failing sink implementation.
#[derive(Debug, thiserror::Error)]
#[error("audit sink failure: {0}")]
pub struct AuditSinkError(pub String);

/// Port for the audit sink collaborator.
pub trait AuditSink {
    /// Records one event.
    fn record(&self, event: &AuditEvent) -> Result<(), AuditSinkError>;
}

/// Delivers an event, swallowing sink failures.
pub(crate) fn notify(sink: &dyn AuditSink, event: &AuditEvent) {
    if let Err(err) = sink.record(event) {
        warn!(action = event.action, error = %err, "audit sink rejected event");
    }
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &AuditEvent) -> Result<(), AuditSinkError> {
        Ok(())
    }
}

/// Sink that buffers events in memory, for test visibility.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: std::cell::RefCell<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.borrow().clone()
    }

    /// Actions of all recorded events, in order.
    #[must_use]
    pub fn actions(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(|e| e.action).collect()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: &AuditEvent) -> Result<(), AuditSinkError> {
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}
