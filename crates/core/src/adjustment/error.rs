//! Recurring adjustment errors.

use sweldo_shared::error::ErrorClass;
use sweldo_shared::types::EmployeeId;
use thiserror::Error;

/// Errors raised by the recurring adjustment ledger.
#[derive(Debug, Error)]
pub enum AdjustmentError {
    /// Amount must be strictly positive.
    #[error("adjustment amount must be positive")]
    NonPositiveAmount,

    /// No active record of the given category for the employee.
    #[error("no active {kind} adjustment for employee {employee_id}")]
    NoActiveAdjustment {
        /// Owning employee.
        employee_id: EmployeeId,
        /// Category label.
        kind: &'static str,
    },

    /// The employee is not present in the directory.
    #[error("employee not found: {0}")]
    EmployeeNotFound(EmployeeId),
}

impl AdjustmentError {
    /// Stable error code for logs and API mapping.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount => "ADJUSTMENT_NON_POSITIVE_AMOUNT",
            Self::NoActiveAdjustment { .. } => "ADJUSTMENT_NOT_ACTIVE",
            Self::EmployeeNotFound(_) => "EMPLOYEE_NOT_FOUND",
        }
    }

    /// Coarse classification used by callers for handling policy.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NonPositiveAmount => ErrorClass::Validation,
            Self::NoActiveAdjustment { .. } | Self::EmployeeNotFound(_) => ErrorClass::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_and_classes() {
        assert_eq!(
            AdjustmentError::NonPositiveAmount.error_code(),
            "ADJUSTMENT_NON_POSITIVE_AMOUNT"
        );
        assert_eq!(
            AdjustmentError::NonPositiveAmount.class(),
            ErrorClass::Validation
        );

        let err = AdjustmentError::NoActiveAdjustment {
            employee_id: EmployeeId::new(),
            kind: "rice",
        };
        assert_eq!(err.class(), ErrorClass::NotFound);
        assert!(err.to_string().contains("rice"));
    }
}
