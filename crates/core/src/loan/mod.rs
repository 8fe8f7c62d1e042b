//! Employee loans: origination, amortization, and balance advancement.

pub mod amortization;
pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use amortization::{monthly_payment, total_cost};
pub use error::LoanError;
pub use service::LoanService;
pub use types::{
    CreateLoanInput, InstallmentStatus, Loan, LoanInstallment, LoanStatus, LoanType,
};
