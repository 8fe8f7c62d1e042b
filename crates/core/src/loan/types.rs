//! Loan domain types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sweldo_shared::types::{EmployeeId, InstallmentId, LoanId};

/// Loan product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    /// SSS salary loan, requires an SSS number on file.
    Sss,
    /// Pag-IBIG multi-purpose loan, requires a Pag-IBIG number on file.
    Pagibig,
    /// Company loan.
    Company,
    /// Emergency loan.
    Emergency,
    /// Housing loan, requires a minimum basic salary.
    Housing,
}

impl LoanType {
    /// Stable label used in logs and audit detail.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sss => "sss",
            Self::Pagibig => "pagibig",
            Self::Company => "company",
            Self::Emergency => "emergency",
            Self::Housing => "housing",
        }
    }
}

impl std::fmt::Display for LoanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    /// Open, balance still being amortized.
    Active,
    /// Balance reached zero.
    Completed,
    /// Cancelled before completion.
    Cancelled,
    /// Replaced by a renegotiated loan.
    Restructured,
}

/// Processing state of one installment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallmentStatus {
    /// Not yet deducted.
    Pending,
    /// Deducted from a payroll run or covered by an early payment.
    Processed,
}

/// An employee loan.
///
/// `remaining_balance` is monotonically non-increasing while the loan
/// is active; it never goes below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Loan {
    /// Loan ID.
    pub id: LoanId,
    /// Borrowing employee.
    pub employee_id: EmployeeId,
    /// Product category.
    pub loan_type: LoanType,
    /// Amount borrowed.
    pub principal: Decimal,
    /// Annual interest rate as a fraction (0.12 = 12%).
    pub annual_rate: Decimal,
    /// Number of monthly installments.
    pub term_months: u32,
    /// Amortized payment per month.
    pub monthly_payment: Decimal,
    /// Total repayment over the full term.
    pub total_cost: Decimal,
    /// Origination date; installments fall due monthly after it.
    pub start_date: NaiveDate,
    /// Outstanding balance.
    pub remaining_balance: Decimal,
    /// Lifecycle state.
    pub status: LoanStatus,
    /// Origination timestamp.
    pub created_at: DateTime<Utc>,
}

/// One scheduled repayment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInstallment {
    /// Installment ID.
    pub id: InstallmentId,
    /// Owning loan.
    pub loan_id: LoanId,
    /// Month the installment falls due.
    pub due_date: NaiveDate,
    /// Amount due.
    pub amount: Decimal,
    /// Processing state.
    pub status: InstallmentStatus,
    /// Date the installment was processed, once it is.
    pub processed_date: Option<NaiveDate>,
}

/// Input for loan origination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLoanInput {
    /// Product category.
    pub loan_type: LoanType,
    /// Amount borrowed, must be positive.
    pub principal: Decimal,
    /// Annual interest rate as a fraction, must be non-negative.
    pub annual_rate: Decimal,
    /// Number of monthly installments, must be positive.
    pub term_months: u32,
    /// Origination date.
    pub start_date: NaiveDate,
}
