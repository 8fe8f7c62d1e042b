//! Payroll period and calculation types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sweldo_shared::types::{CalculationId, EmployeeId, PayrollPeriodId};

/// Lifecycle state of a payroll period.
///
/// Transitions are one-way: draft periods open for calculation, then
/// finalization closes them for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    /// Created, not yet open for calculation.
    Draft,
    /// Open for per-employee calculation.
    Calculating,
    /// Finalized; no further recalculation.
    Calculated,
}

impl PeriodStatus {
    /// Stable label used in logs and errors.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Calculating => "calculating",
            Self::Calculated => "calculated",
        }
    }
}

impl std::fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one calculation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationStatus {
    /// Computed, still replaceable by recalculation.
    Computed,
    /// Locked by period finalization.
    Finalized,
}

/// One payroll period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Period ID.
    pub id: PayrollPeriodId,
    /// Human-readable label, e.g. `2025-01 second half`.
    pub name: String,
    /// First covered date.
    pub start_date: NaiveDate,
    /// Last covered date, inclusive.
    pub end_date: NaiveDate,
    /// Date pay is disbursed.
    pub pay_date: NaiveDate,
    /// Lifecycle state.
    pub status: PeriodStatus,
    /// Aggregated totals, set by finalization.
    pub totals: Option<PeriodTotals>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Input for creating a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePeriodInput {
    /// Human-readable label.
    pub name: String,
    /// First covered date.
    pub start_date: NaiveDate,
    /// Last covered date, inclusive.
    pub end_date: NaiveDate,
    /// Date pay is disbursed.
    pub pay_date: NaiveDate,
}

/// One employee's pay calculation for one period.
///
/// Every intermediate figure is retained so the payslip math can be
/// audited without recomputing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// Row ID.
    pub id: CalculationId,
    /// Calculated employee.
    pub employee_id: EmployeeId,
    /// Owning period.
    pub period_id: PayrollPeriodId,
    /// Row state.
    pub status: CalculationStatus,

    /// Monthly basic salary on the profile at calculation time.
    pub basic_salary: Decimal,
    /// Days present within the period.
    pub days_worked: Decimal,
    /// Hours worked within the period, including overtime.
    pub total_hours: Decimal,
    /// Regular (non-overtime) hours within the period.
    pub regular_hours: Decimal,
    /// Overtime hours within the period.
    pub overtime_hours: Decimal,
    /// Minutes late within the period.
    pub late_minutes: Decimal,
    /// Undertime minutes within the period.
    pub undertime_minutes: Decimal,

    /// Pay for regular work.
    pub basic_pay: Decimal,
    /// Overtime premium.
    pub overtime_pay: Decimal,
    /// Total of assigned pay components.
    pub component_total: Decimal,
    /// Total of recurring allowances.
    pub allowance_total: Decimal,
    /// basic + overtime + components + allowances.
    pub gross_pay: Decimal,

    /// SSS employee share.
    pub sss_contribution: Decimal,
    /// PhilHealth employee share.
    pub philhealth_contribution: Decimal,
    /// Pag-IBIG employee share.
    pub pagibig_contribution: Decimal,
    /// Gross less the three contributions.
    pub taxable_income: Decimal,
    /// Withholding tax for the period.
    pub withholding_tax: Decimal,

    /// Total of recurring deductions.
    pub recurring_deductions: Decimal,
    /// Loan installments deducted this period.
    pub loan_deduction: Decimal,
    /// Deduction for minutes late.
    pub late_deduction: Decimal,
    /// Deduction for undertime.
    pub undertime_deduction: Decimal,

    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// gross − total deductions.
    pub net_pay: Decimal,

    /// When the row was computed.
    pub calculated_at: DateTime<Utc>,
}

/// One labelled figure on a payslip.
#[derive(Debug, Clone, Serialize)]
pub struct PayslipLine {
    /// Human-readable label.
    pub label: &'static str,
    /// Amount in pesos.
    pub amount: Decimal,
}

/// Payslip view of one calculation row, joined with its period.
///
/// Zero-amount lines other than basic pay are omitted.
#[derive(Debug, Clone, Serialize)]
pub struct Payslip {
    /// Paid employee.
    pub employee_id: EmployeeId,
    /// Period label.
    pub period_name: String,
    /// First covered date.
    pub period_start: NaiveDate,
    /// Last covered date, inclusive.
    pub period_end: NaiveDate,
    /// Disbursement date.
    pub pay_date: NaiveDate,
    /// Earnings lines.
    pub earnings: Vec<PayslipLine>,
    /// Deduction lines.
    pub deductions: Vec<PayslipLine>,
    /// Sum of earnings.
    pub gross_pay: Decimal,
    /// Sum of deductions.
    pub total_deductions: Decimal,
    /// Take-home amount.
    pub net_pay: Decimal,
}

/// Aggregated totals produced by finalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// Number of calculated employees.
    pub employee_count: usize,
    /// Sum of gross pay.
    pub gross_pay: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Sum of net pay.
    pub net_pay: Decimal,
    /// Sum of withholding tax.
    pub withholding_tax: Decimal,
    /// Sum of loan deductions.
    pub loan_deductions: Decimal,
    /// SSS employee shares.
    pub sss_employee: Decimal,
    /// SSS employer shares.
    pub sss_employer: Decimal,
    /// PhilHealth employee shares.
    pub philhealth_employee: Decimal,
    /// PhilHealth employer shares.
    pub philhealth_employer: Decimal,
    /// Pag-IBIG employee shares.
    pub pagibig_employee: Decimal,
    /// Pag-IBIG employer shares.
    pub pagibig_employer: Decimal,
}
