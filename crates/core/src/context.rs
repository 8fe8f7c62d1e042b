//! Explicit ambient state for every mutating operation.
//!
//! Current time and acting user are passed as a value rather than read
//! from globals, so date-boundary behavior (effective dating, "active as
//! of today" queries) is deterministically testable.

use chrono::{DateTime, NaiveDate, Utc};
use sweldo_shared::types::UserId;

/// Ambient state carried through every mutating call.
#[derive(Debug, Clone, Copy)]
pub struct EngineContext {
    /// The calendar date used for effective dating and activity checks.
    pub today: NaiveDate,
    /// Timestamp stamped onto created and superseded records.
    pub now: DateTime<Utc>,
    /// The user performing the operation, recorded in audit events.
    pub actor: UserId,
}

impl EngineContext {
    /// Creates a context from the real clock.
    #[must_use]
    pub fn current(actor: UserId) -> Self {
        let now = Utc::now();
        Self {
            today: now.date_naive(),
            now,
            actor,
        }
    }

    /// Creates a context pinned to a specific date.
    ///
    /// `now` is set to midnight UTC of that date. Used by tests and by
    /// callers replaying historical runs.
    #[must_use]
    pub fn at(today: NaiveDate, actor: UserId) -> Self {
        Self {
            today,
            now: today.and_hms_opt(0, 0, 0).map_or_else(Utc::now, |dt| dt.and_utc()),
            actor,
        }
    }
}
