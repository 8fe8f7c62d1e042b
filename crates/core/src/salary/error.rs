//! Salary profile error types.

use sweldo_shared::types::EmployeeId;
use sweldo_shared::ErrorClass;
use thiserror::Error;

/// Errors from salary profile operations.
#[derive(Debug, Error)]
pub enum SalaryError {
    /// A government number does not match its scheme's format.
    #[error("Invalid {scheme} number: {value}")]
    InvalidGovernmentNumber {
        /// The scheme whose format was violated (SSS, PhilHealth, ...).
        scheme: &'static str,
        /// The rejected value.
        value: String,
    },

    /// Basic salary must be positive.
    #[error("Basic salary must be positive")]
    NonPositiveSalary,

    /// A supplied rate must be positive.
    #[error("{rate} must be positive when supplied")]
    NonPositiveRate {
        /// Which rate was rejected.
        rate: &'static str,
    },

    /// No active salary profile is configured for the employee.
    #[error("No active salary profile for employee {0}")]
    NoActiveProfile(EmployeeId),
}

impl SalaryError {
    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidGovernmentNumber { .. } => "INVALID_GOVERNMENT_NUMBER",
            Self::NonPositiveSalary => "NON_POSITIVE_SALARY",
            Self::NonPositiveRate { .. } => "NON_POSITIVE_RATE",
            Self::NoActiveProfile(_) => "NO_ACTIVE_PROFILE",
        }
    }

    /// Coarse classification used by callers for handling policy.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidGovernmentNumber { .. }
            | Self::NonPositiveSalary
            | Self::NonPositiveRate { .. } => ErrorClass::Validation,
            Self::NoActiveProfile(_) => ErrorClass::NotFound,
        }
    }
}
