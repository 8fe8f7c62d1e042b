//! Payroll period orchestration and per-employee calculation.

pub mod contributions;
pub mod engine;
pub mod error;
pub mod tax;
pub mod types;

#[cfg(test)]
mod props;

pub use contributions::{employee_contributions, employer_contributions, Contributions};
pub use engine::PayrollEngine;
pub use error::PayrollError;
pub use tax::monthly_withholding;
pub use types::{
    CalculationStatus, CreatePeriodInput, PayrollCalculation, PayrollPeriod, Payslip, PayslipLine,
    PeriodStatus, PeriodTotals,
};
