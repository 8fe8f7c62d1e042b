//! Payroll errors.

use sweldo_shared::error::ErrorClass;
use sweldo_shared::types::{EmployeeId, PayrollPeriodId};
use thiserror::Error;

use crate::attendance::AttendanceError;

use super::types::PeriodStatus;

/// Errors raised by the payroll engine.
#[derive(Debug, Error)]
pub enum PayrollError {
    /// The employee has no active salary profile to calculate from.
    #[error("missing payroll setup for employee {0}: no active salary profile")]
    MissingSetup(EmployeeId),

    /// No period with the given ID.
    #[error("payroll period not found: {0}")]
    PeriodNotFound(PayrollPeriodId),

    /// The period's end date precedes its start date.
    #[error("period end date precedes start date")]
    InvalidPeriodRange,

    /// The requested transition is not part of the state machine.
    #[error("cannot move period from {from} to {to}")]
    InvalidTransition {
        /// Current state.
        from: PeriodStatus,
        /// Requested state.
        to: PeriodStatus,
    },

    /// Calculation requires a started period.
    #[error("period {0} has not been started")]
    PeriodNotStarted(PayrollPeriodId),

    /// The period is finalized; recalculation is not defined past it.
    #[error("period {0} is finalized")]
    PeriodFinalized(PayrollPeriodId),

    /// Finalization requires at least one calculation row.
    #[error("period {0} has no calculations to finalize")]
    NoCalculations(PayrollPeriodId),

    /// No calculation row for the employee in the period.
    #[error("no calculation for employee {employee_id} in period {period_id}")]
    CalculationNotFound {
        /// The employee looked up.
        employee_id: EmployeeId,
        /// The period looked up.
        period_id: PayrollPeriodId,
    },

    /// The attendance collaborator failed.
    #[error(transparent)]
    Attendance(#[from] AttendanceError),
}

impl PayrollError {
    /// Stable error code for logs and API mapping.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingSetup(_) => "PAYROLL_MISSING_SETUP",
            Self::PeriodNotFound(_) => "PAYROLL_PERIOD_NOT_FOUND",
            Self::InvalidPeriodRange => "PAYROLL_INVALID_PERIOD_RANGE",
            Self::InvalidTransition { .. } => "PAYROLL_INVALID_TRANSITION",
            Self::PeriodNotStarted(_) => "PAYROLL_PERIOD_NOT_STARTED",
            Self::PeriodFinalized(_) => "PAYROLL_PERIOD_FINALIZED",
            Self::NoCalculations(_) => "PAYROLL_NO_CALCULATIONS",
            Self::CalculationNotFound { .. } => "PAYROLL_CALCULATION_NOT_FOUND",
            Self::Attendance(_) => "PAYROLL_ATTENDANCE_UNAVAILABLE",
        }
    }

    /// Coarse classification used by callers for handling policy.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::MissingSetup(_)
            | Self::PeriodNotFound(_)
            | Self::CalculationNotFound { .. } => ErrorClass::NotFound,
            Self::InvalidPeriodRange => ErrorClass::Validation,
            Self::InvalidTransition { .. }
            | Self::PeriodNotStarted(_)
            | Self::PeriodFinalized(_)
            | Self::NoCalculations(_)
            | Self::Attendance(_) => ErrorClass::State,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_classes() {
        let err = PayrollError::MissingSetup(EmployeeId::new());
        assert_eq!(err.error_code(), "PAYROLL_MISSING_SETUP");
        assert_eq!(err.class(), ErrorClass::NotFound);

        let err = PayrollError::InvalidTransition {
            from: PeriodStatus::Calculated,
            to: PeriodStatus::Calculating,
        };
        assert_eq!(err.class(), ErrorClass::State);
        assert!(err.to_string().contains("calculated"));

        let err: PayrollError =
            AttendanceError::Unavailable("timeout".to_string()).into();
        assert_eq!(err.error_code(), "PAYROLL_ATTENDANCE_UNAVAILABLE");
    }
}
