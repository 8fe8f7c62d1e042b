//! Port for the external attendance/timekeeping collaborator.
//!
//! Attendance capture itself is out of scope; the engine consumes
//! finalized per-day summaries and aggregates them for a period.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sweldo_shared::types::EmployeeId;
use thiserror::Error;

/// One finalized attendance day for one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySummary {
    /// The attendance date.
    pub date: NaiveDate,
    /// Whether the employee was present.
    pub is_present: bool,
    /// Total hours worked, including overtime.
    pub total_hours_worked: Decimal,
    /// Regular (non-overtime) hours.
    pub regular_hours: Decimal,
    /// Overtime hours.
    pub overtime_hours: Decimal,
    /// Minutes late.
    pub late_minutes: Decimal,
    /// Undertime minutes (left early).
    pub undertime_minutes: Decimal,
    /// Whether the row has been finalized by timekeeping.
    pub is_finalized: bool,
}

/// Errors surfaced by the attendance collaborator.
#[derive(Debug, Error)]
pub enum AttendanceError {
    /// The collaborator could not produce summaries.
    #[error("Attendance source unavailable: {0}")]
    Unavailable(String),
}

/// Port for the attendance source.
///
/// Implementations must return only finalized rows within the range;
/// the engine filters again defensively.
pub trait AttendanceProvider {
    /// Finalized daily summaries for one employee within `[start, end]`.
    fn finalized_summaries(
        &self,
        employee: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailySummary>, AttendanceError>;
}

/// Aggregated attendance for one employee over one period.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodAttendance {
    /// Days the employee was present.
    pub days_worked: Decimal,
    /// Sum of total hours.
    pub total_hours: Decimal,
    /// Sum of regular hours.
    pub regular_hours: Decimal,
    /// Sum of overtime hours.
    pub overtime_hours: Decimal,
    /// Sum of late minutes.
    pub late_minutes: Decimal,
    /// Sum of undertime minutes.
    pub undertime_minutes: Decimal,
}

impl PeriodAttendance {
    /// Aggregates finalized daily summaries.
    ///
    /// Non-finalized rows are skipped even if the provider leaks them.
    #[must_use]
    pub fn aggregate(summaries: &[DailySummary]) -> Self {
        let mut agg = Self::default();
        for day in summaries.iter().filter(|s| s.is_finalized) {
            if day.is_present {
                agg.days_worked += Decimal::ONE;
            }
            agg.total_hours += day.total_hours_worked;
            agg.regular_hours += day.regular_hours;
            agg.overtime_hours += day.overtime_hours;
            agg.late_minutes += day.late_minutes;
            agg.undertime_minutes += day.undertime_minutes;
        }
        agg
    }
}
