//! Component catalog data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sweldo_shared::types::{AssignmentId, ComponentId, EmployeeId};

use crate::temporal::Effective;

/// Classification of a pay component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    /// Adds to gross pay.
    Earning,
    /// Subtracts from gross pay.
    Deduction,
    /// Non-cash benefit.
    Benefit,
    /// Tax line.
    Tax,
    /// Government contribution line.
    Contribution,
    /// Loan repayment line.
    Loan,
    /// Recurring allowance line.
    Allowance,
}

/// How a component's amount is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    /// Flat amount.
    Fixed,
    /// Percentage of basic salary.
    PercentOfBasic,
    /// Percentage of gross pay.
    PercentOfGross,
    /// Rate per hour.
    PerHour,
    /// Rate per day.
    PerDay,
    /// Rate per unit.
    PerUnit,
    /// Percentage of another component's assigned amount.
    PercentOfComponent,
}

/// How often an assignment applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Every payroll period.
    EveryPeriod,
    /// Once per month.
    Monthly,
    /// Once per year.
    Annually,
}

/// A reusable named component definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDefinition {
    /// Definition ID.
    pub id: ComponentId,
    /// Unique short code, e.g. `BASIC`, `RICE_ALLOW`.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Component classification.
    pub component_type: ComponentType,
    /// Free-form grouping category.
    pub category: String,
    /// Amount computation method.
    pub method: CalculationMethod,
    /// Referenced component for `PercentOfComponent`; a weak reference,
    /// the target may be deleted independently.
    pub reference: Option<ComponentId>,
    /// System components are seeded, permanent, and read-only.
    pub is_system: bool,
    /// Whether the definition may be newly assigned.
    pub is_active: bool,
}

/// Input for creating a custom component definition.
#[derive(Debug, Clone)]
pub struct CreateComponentInput {
    /// Unique short code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Component classification.
    pub component_type: ComponentType,
    /// Grouping category.
    pub category: String,
    /// Amount computation method.
    pub method: CalculationMethod,
    /// Referenced component for `PercentOfComponent`.
    pub reference: Option<ComponentId>,
}

/// Editable fields of a custom component definition.
#[derive(Debug, Clone)]
pub struct UpdateComponentInput {
    /// New display name, if changing.
    pub name: Option<String>,
    /// New category, if changing.
    pub category: Option<String>,
    /// New method, if changing.
    pub method: Option<CalculationMethod>,
    /// New reference, if changing (`Some(None)` clears it).
    pub reference: Option<Option<ComponentId>>,
    /// New active flag, if changing.
    pub is_active: Option<bool>,
}

/// One effective-dated assignment of a component to an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentAssignment {
    /// Row ID.
    pub id: AssignmentId,
    /// The employee.
    pub employee: EmployeeId,
    /// The assigned component.
    pub component: ComponentId,
    /// Flat amount (or per-unit rate, depending on the method).
    pub amount: Decimal,
    /// Percentage for percentage-based methods.
    pub percentage: Option<Decimal>,
    /// How often the assignment applies.
    pub frequency: Frequency,
    /// The date the assignment takes effect.
    pub effective_date: NaiveDate,
    /// The date it stops applying, once superseded or closed.
    pub end_date: Option<NaiveDate>,
    /// Raw active flag.
    pub is_active: bool,
}

impl Effective for ComponentAssignment {
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

/// Input for assigning a component to an employee.
#[derive(Debug, Clone)]
pub struct AssignComponentInput {
    /// Flat amount (or per-unit rate).
    pub amount: Decimal,
    /// Percentage for percentage-based methods.
    pub percentage: Option<Decimal>,
    /// How often the assignment applies.
    pub frequency: Frequency,
    /// The date the assignment takes effect.
    pub effective_date: NaiveDate,
}
