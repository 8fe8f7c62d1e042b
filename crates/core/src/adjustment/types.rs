//! Recurring adjustment domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sweldo_shared::types::{AdjustmentId, EmployeeId};

use crate::directory::EmployeeFilter;
use crate::temporal::Effective;

use super::error::AdjustmentError;

/// Recurring allowance categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowanceType {
    /// Rice subsidy.
    Rice,
    /// Clothing allowance.
    Clothing,
    /// Laundry allowance.
    Laundry,
    /// Medical cash allowance.
    Medical,
    /// Transportation allowance.
    Transportation,
    /// Meal allowance.
    Meal,
    /// Communication allowance.
    Communication,
    /// Representation allowance.
    Representation,
}

impl AllowanceType {
    /// Stable label used in payslips and audit detail.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rice => "rice",
            Self::Clothing => "clothing",
            Self::Laundry => "laundry",
            Self::Medical => "medical",
            Self::Transportation => "transportation",
            Self::Meal => "meal",
            Self::Communication => "communication",
            Self::Representation => "representation",
        }
    }
}

/// Recurring deduction categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionType {
    /// Cash advance repayment.
    CashAdvance,
    /// Union membership dues.
    UnionDues,
    /// Private insurance premium.
    Insurance,
    /// Uniform cost recovery.
    Uniform,
    /// Issued equipment cost recovery.
    Equipment,
    /// Uncategorised deduction.
    Other,
}

impl DeductionType {
    /// Stable label used in payslips and audit detail.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CashAdvance => "cash_advance",
            Self::UnionDues => "union_dues",
            Self::Insurance => "insurance",
            Self::Uniform => "uniform",
            Self::Equipment => "equipment",
            Self::Other => "other",
        }
    }
}

/// Discriminates the two adjustment families for bulk operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentKind {
    /// An allowance of the given type.
    Allowance(AllowanceType),
    /// A deduction of the given type.
    Deduction(DeductionType),
}

/// One effective-dated recurring adjustment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringAdjustment<T> {
    /// Record ID.
    pub id: AdjustmentId,
    /// Owning employee.
    pub employee_id: EmployeeId,
    /// Adjustment category.
    pub adjustment_type: T,
    /// Per-period amount.
    pub amount: Decimal,
    /// First date the record applies.
    pub effective_date: NaiveDate,
    /// Last date the record applies; `None` while open-ended.
    pub end_date: Option<NaiveDate>,
    /// False once superseded or removed.
    pub is_active: bool,
}

impl<T> Effective for RecurringAdjustment<T> {
    fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    fn set_end_date(&mut self, end: Option<NaiveDate>) {
        self.end_date = end;
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }
}

/// Amount and start date for a new adjustment record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustmentData {
    /// Per-period amount, must be positive.
    pub amount: Decimal,
    /// First date the record applies.
    pub effective_date: NaiveDate,
}

/// Targets of a bulk assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkSelector {
    /// Explicit employee list.
    Ids(Vec<EmployeeId>),
    /// Employees matching a directory filter.
    Filter(EmployeeFilter),
}

/// One employee a bulk assignment could not be applied to.
#[derive(Debug)]
pub struct BulkFailure {
    /// The employee that failed.
    pub employee_id: EmployeeId,
    /// Why the assignment was skipped.
    pub error: AdjustmentError,
}

/// Result of a best-effort bulk assignment.
#[derive(Debug, Default)]
pub struct BulkOutcome {
    /// Employees the adjustment was applied to.
    pub applied: Vec<EmployeeId>,
    /// Employees skipped, with the per-employee error.
    pub failures: Vec<BulkFailure>,
}

impl BulkOutcome {
    /// True when every targeted employee was updated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
