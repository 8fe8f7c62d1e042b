//! Property tests for the withholding brackets and the payslip
//! arithmetic identity.

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sweldo_shared::config::EngineConfig;
use sweldo_shared::types::{EmployeeId, UserId};

use crate::attendance::{AttendanceProvider, DailySummary};
use crate::audit::NoopAuditSink;
use crate::context::EngineContext;
use crate::salary::{
    BenefitFlags, CreateProfileInput, GovernmentIds, PaymentMethod, ProfileData, SalaryType,
    TaxStatus,
};

use super::engine::PayrollEngine;
use super::tax::{annual_tax, monthly_withholding};
use super::types::CreatePeriodInput;

fn monthly_incomes() -> impl Strategy<Value = Decimal> {
    (0u64..=1_000_000).prop_map(Decimal::from)
}

struct GeneratedAttendance {
    days_present: u32,
    ot_hours: Decimal,
    late_minutes: Decimal,
}

impl AttendanceProvider for GeneratedAttendance {
    fn finalized_summaries(
        &self,
        _employee: EmployeeId,
        start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<DailySummary>, crate::attendance::AttendanceError> {
        Ok((0..self.days_present)
            .map(|i| DailySummary {
                date: start + chrono::Days::new(u64::from(i)),
                is_present: true,
                total_hours_worked: dec!(8) + if i == 0 { self.ot_hours } else { Decimal::ZERO },
                regular_hours: dec!(8),
                overtime_hours: if i == 0 { self.ot_hours } else { Decimal::ZERO },
                late_minutes: if i == 0 { self.late_minutes } else { Decimal::ZERO },
                undertime_minutes: Decimal::ZERO,
                is_finalized: true,
            })
            .collect())
    }
}

fn run_single_employee(
    basic: Decimal,
    days_present: u32,
    ot_hours: Decimal,
    late_minutes: Decimal,
) -> super::types::PayrollCalculation {
    let ctx = EngineContext::at(
        NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date"),
        UserId::new(),
    );
    let mut engine = PayrollEngine::new(
        EngineConfig::default(),
        Box::new(GeneratedAttendance {
            days_present,
            ot_hours,
            late_minutes,
        }),
        Arc::new(NoopAuditSink),
    );
    let employee = EmployeeId::new();
    engine
        .salaries_mut()
        .create_profile(
            CreateProfileInput {
                employee,
                data: ProfileData {
                    salary_type: SalaryType::Monthly,
                    basic_salary: basic,
                    daily_rate: None,
                    hourly_rate: None,
                    payment_method: PaymentMethod::BankTransfer,
                    tax_status: TaxStatus::Single,
                    government: GovernmentIds {
                        sss: Some("34-1234567-8".to_string()),
                        philhealth: Some("12-123456789-0".to_string()),
                        pagibig: Some("1234-5678-9012".to_string()),
                        tin: None,
                    },
                    pagibig_rate: None,
                    bank: None,
                    benefits: BenefitFlags::default(),
                },
                effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date"),
            },
            &ctx,
        )
        .expect("profile creation");
    let period = engine
        .create_period(
            CreatePeriodInput {
                name: "generated".to_string(),
                start_date: NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid date"),
                end_date: NaiveDate::from_ymd_opt(2025, 1, 31).expect("valid date"),
                pay_date: NaiveDate::from_ymd_opt(2025, 2, 5).expect("valid date"),
            },
            &ctx,
        )
        .expect("period creation");
    engine.start_period(period.id, &ctx).expect("period start");
    engine
        .calculate_employee(employee, period.id, &ctx)
        .expect("calculation")
}

proptest! {
    #[test]
    fn tax_is_monotonic_in_income(a in monthly_incomes(), b in monthly_incomes()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            monthly_withholding(lo, TaxStatus::Single)
                <= monthly_withholding(hi, TaxStatus::Single)
        );
    }

    #[test]
    fn tax_never_exceeds_the_top_marginal_rate(income in monthly_incomes()) {
        let tax = monthly_withholding(income, TaxStatus::Single);
        prop_assert!(tax <= income * dec!(0.35));
        prop_assert!(tax >= Decimal::ZERO);
    }

    #[test]
    fn exempt_status_always_zero(income in monthly_incomes()) {
        prop_assert_eq!(
            monthly_withholding(income, TaxStatus::Exempt),
            Decimal::ZERO
        );
    }

    #[test]
    fn net_pay_equals_gross_minus_deductions(
        basic in 10_000u64..=200_000,
        days_present in 15u32..=22,
        ot_hours in 0u32..=40,
        late_minutes in 0u32..=300,
    ) {
        let calc = run_single_employee(
            Decimal::from(basic),
            days_present,
            Decimal::from(ot_hours),
            Decimal::from(late_minutes),
        );
        prop_assert_eq!(calc.net_pay, calc.gross_pay - calc.total_deductions);
        prop_assert_eq!(
            calc.total_deductions,
            calc.sss_contribution
                + calc.philhealth_contribution
                + calc.pagibig_contribution
                + calc.withholding_tax
                + calc.recurring_deductions
                + calc.loan_deduction
                + calc.late_deduction
                + calc.undertime_deduction
        );
        prop_assert_eq!(
            calc.gross_pay,
            calc.basic_pay + calc.overtime_pay + calc.component_total + calc.allowance_total
        );
    }

    #[test]
    fn annual_tax_continuous_at_bracket_floors(annual in 0u64..=10_000_000u64) {
        // Crossing a floor by one peso never jumps by more than the
        // marginal rate allows
        let at = annual_tax(Decimal::from(annual));
        let above = annual_tax(Decimal::from(annual) + Decimal::ONE);
        prop_assert!(above - at <= dec!(0.35));
        prop_assert!(above >= at);
    }
}
