//! Loan errors.

use rust_decimal::Decimal;
use sweldo_shared::error::ErrorClass;
use sweldo_shared::types::LoanId;
use thiserror::Error;

use super::types::LoanType;

/// Errors raised by the loan ledger.
#[derive(Debug, Error)]
pub enum LoanError {
    /// Principal must be strictly positive.
    #[error("loan principal must be positive")]
    NonPositivePrincipal,

    /// Term must be at least one month.
    #[error("loan term must be at least one month")]
    NonPositiveTerm,

    /// The annual rate cannot be negative.
    #[error("loan annual rate cannot be negative")]
    NegativeRate,

    /// The schedule would run past the supported date range.
    #[error("loan schedule runs past the supported date range")]
    ScheduleOutOfRange,

    /// A type-specific eligibility requirement is unmet.
    #[error("not eligible for a {loan_type} loan: {reason}")]
    NotEligible {
        /// The product applied for.
        loan_type: LoanType,
        /// Which requirement failed.
        reason: &'static str,
    },

    /// No loan with the given ID.
    #[error("loan not found: {0}")]
    LoanNotFound(LoanId),

    /// The operation requires an active loan.
    #[error("loan {0} is not active")]
    LoanNotActive(LoanId),

    /// Early payment amount outside (0, balance].
    #[error("payment of {amount} is invalid against balance {balance}")]
    InvalidPaymentAmount {
        /// Attempted payment.
        amount: Decimal,
        /// Outstanding balance.
        balance: Decimal,
    },
}

impl LoanError {
    /// Stable error code for logs and API mapping.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NonPositivePrincipal => "LOAN_NON_POSITIVE_PRINCIPAL",
            Self::NonPositiveTerm => "LOAN_NON_POSITIVE_TERM",
            Self::NegativeRate => "LOAN_NEGATIVE_RATE",
            Self::ScheduleOutOfRange => "LOAN_SCHEDULE_OUT_OF_RANGE",
            Self::NotEligible { .. } => "LOAN_NOT_ELIGIBLE",
            Self::LoanNotFound(_) => "LOAN_NOT_FOUND",
            Self::LoanNotActive(_) => "LOAN_NOT_ACTIVE",
            Self::InvalidPaymentAmount { .. } => "LOAN_INVALID_PAYMENT",
        }
    }

    /// Coarse classification used by callers for handling policy.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NonPositivePrincipal
            | Self::NonPositiveTerm
            | Self::NegativeRate
            | Self::ScheduleOutOfRange
            | Self::InvalidPaymentAmount { .. } => ErrorClass::Validation,
            Self::NotEligible { .. } => ErrorClass::Eligibility,
            Self::LoanNotFound(_) => ErrorClass::NotFound,
            Self::LoanNotActive(_) => ErrorClass::State,
        }
    }
}
