//! Salary profile data types.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sweldo_shared::types::{EmployeeId, SalaryProfileId};

use crate::temporal::Effective;

/// How the employee's pay is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryType {
    /// Flat monthly salary.
    Monthly,
    /// Paid per day worked.
    Daily,
    /// Paid per hour worked.
    Hourly,
    /// Fixed-term contractual pay.
    Contractual,
    /// Project-based pay.
    Project,
}

/// How net pay is disbursed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Direct bank transfer.
    BankTransfer,
    /// Cash payout.
    Cash,
    /// Check payout.
    Check,
}

/// Withholding tax status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxStatus {
    /// Single.
    #[serde(rename = "S")]
    Single,
    /// Married.
    #[serde(rename = "M")]
    Married,
    /// Head of family.
    #[serde(rename = "H")]
    HeadOfFamily,
    /// Zero-rated: withholding short-circuits to zero.
    #[serde(rename = "Z")]
    Exempt,
}

impl TaxStatus {
    /// True if withholding tax is short-circuited to zero.
    #[must_use]
    pub const fn is_exempt(self) -> bool {
        matches!(self, Self::Exempt)
    }
}

/// Government identification numbers on file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernmentIds {
    /// SSS number, format `##-#######-#`.
    pub sss: Option<String>,
    /// PhilHealth number, format `##-#########-#`.
    pub philhealth: Option<String>,
    /// Pag-IBIG MID, format `####-####-####`.
    pub pagibig: Option<String>,
    /// TIN, format `###-###-###` with optional 3-digit branch suffix.
    pub tin: Option<String>,
}

/// Bank account details for bank-transfer disbursement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankDetails {
    /// Bank name.
    pub bank_name: String,
    /// Account number.
    pub account_number: String,
    /// Account holder name.
    pub account_name: String,
}

/// Which statutory benefits the employee is enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenefitFlags {
    /// Enrolled in SSS.
    pub sss: bool,
    /// Enrolled in PhilHealth.
    pub philhealth: bool,
    /// Enrolled in Pag-IBIG.
    pub pagibig: bool,
    /// Entitled to 13th month pay.
    pub thirteenth_month: bool,
}

impl Default for BenefitFlags {
    fn default() -> Self {
        Self {
            sss: true,
            philhealth: true,
            pagibig: true,
            thirteenth_month: true,
        }
    }
}

/// The pay-relevant fields shared by create and update inputs.
#[derive(Debug, Clone)]
pub struct ProfileData {
    /// Salary type.
    pub salary_type: SalaryType,
    /// Basic salary (monthly for `Monthly`, the base figure otherwise).
    pub basic_salary: Decimal,
    /// Daily rate; derived from `basic_salary` for monthly profiles when
    /// not supplied.
    pub daily_rate: Option<Decimal>,
    /// Hourly rate; derived from the daily rate when not supplied.
    pub hourly_rate: Option<Decimal>,
    /// Disbursement method.
    pub payment_method: PaymentMethod,
    /// Withholding tax status.
    pub tax_status: TaxStatus,
    /// Government IDs on file.
    pub government: GovernmentIds,
    /// Employee's configured Pag-IBIG rate; the engine default applies
    /// when absent.
    pub pagibig_rate: Option<Decimal>,
    /// Bank details, when paid by transfer.
    pub bank: Option<BankDetails>,
    /// Benefit enrollment flags.
    pub benefits: BenefitFlags,
}

/// Input for creating a salary profile.
#[derive(Debug, Clone)]
pub struct CreateProfileInput {
    /// The employee the profile belongs to.
    pub employee: EmployeeId,
    /// Pay-relevant fields.
    pub data: ProfileData,
    /// The date the profile takes effect.
    pub effective_date: NaiveDate,
}

/// One salary profile row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryProfile {
    /// Row ID.
    pub id: SalaryProfileId,
    /// Employee this profile belongs to.
    pub employee: EmployeeId,
    /// Salary type.
    pub salary_type: SalaryType,
    /// Basic salary.
    pub basic_salary: Decimal,
    /// Daily rate (zero when not configured).
    pub daily_rate: Decimal,
    /// Hourly rate (zero when not configured).
    pub hourly_rate: Decimal,
    /// Disbursement method.
    pub payment_method: PaymentMethod,
    /// Withholding tax status.
    pub tax_status: TaxStatus,
    /// Government IDs on file.
    pub government: GovernmentIds,
    /// SSS monthly salary credit, classified from `basic_salary`.
    pub sss_salary_credit: Decimal,
    /// Employee's configured Pag-IBIG rate, if any.
    pub pagibig_rate: Option<Decimal>,
    /// Bank details.
    pub bank: Option<BankDetails>,
    /// Benefit enrollment flags.
    pub benefits: BenefitFlags,
    /// The date this row takes effect.
    pub effective_date: NaiveDate,
    /// The date this row stops applying, once superseded or closed.
    pub end_date: Option<NaiveDate>,
    /// Raw active flag.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl SalaryProfile {
    /// True if a pay-affecting field differs from `data`, which forces a
    /// supersession instead of an in-place edit.
    #[must_use]
    pub fn pay_fields_differ(&self, salary_type: SalaryType, basic: Decimal, daily: Decimal, hourly: Decimal) -> bool {
        self.salary_type != salary_type
            || self.basic_salary != basic
            || self.daily_rate != daily
            || self.hourly_rate != hourly
    }
}

impl Effective for SalaryProfile {
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
