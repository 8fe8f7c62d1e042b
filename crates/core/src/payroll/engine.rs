//! Payroll engine: period state machine and per-employee calculation.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use sweldo_shared::config::EngineConfig;
use sweldo_shared::types::{round_centavos, CalculationId, EmployeeId, PayrollPeriodId};
use tracing::info;

use crate::adjustment::RecurringAdjustmentService;
use crate::attendance::{AttendanceProvider, PeriodAttendance};
use crate::audit::{notify, AuditEvent, AuditSink};
use crate::catalog::ComponentCatalogService;
use crate::context::EngineContext;
use crate::loan::LoanService;
use crate::salary::{SalaryProfileService, SalaryType};

use super::contributions::{employee_contributions, employer_contributions, Contributions};
use super::error::PayrollError;
use super::tax::monthly_withholding;
use super::types::{
    CalculationStatus, CreatePeriodInput, PayrollCalculation, PayrollPeriod, Payslip, PayslipLine,
    PeriodStatus, PeriodTotals,
};

/// The payroll engine.
///
/// Owns the four ledgers, the period store, and the calculation rows.
/// Mutating operations take `&mut self`: callers serialize writes per
/// employee; in particular concurrent recalculation of the same
/// (employee, period) is outside the model.
pub struct PayrollEngine {
    salaries: SalaryProfileService,
    catalog: ComponentCatalogService,
    adjustments: RecurringAdjustmentService,
    loans: LoanService,
    attendance: Box<dyn AttendanceProvider>,
    periods: HashMap<PayrollPeriodId, PayrollPeriod>,
    calculations: HashMap<PayrollPeriodId, HashMap<EmployeeId, PayrollCalculation>>,
    config: EngineConfig,
    audit: Arc<dyn AuditSink>,
}

impl PayrollEngine {
    /// Creates an engine with empty ledgers.
    #[must_use]
    pub fn new(
        config: EngineConfig,
        attendance: Box<dyn AttendanceProvider>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            salaries: SalaryProfileService::new(config.schedule.clone(), Arc::clone(&audit)),
            catalog: ComponentCatalogService::new(Arc::clone(&audit)),
            adjustments: RecurringAdjustmentService::new(Arc::clone(&audit)),
            loans: LoanService::new(config.loans.clone(), Arc::clone(&audit)),
            attendance,
            periods: HashMap::new(),
            calculations: HashMap::new(),
            config,
            audit,
        }
    }

    /// The salary profile store.
    #[must_use]
    pub fn salaries(&self) -> &SalaryProfileService {
        &self.salaries
    }

    /// Mutable access to the salary profile store.
    pub fn salaries_mut(&mut self) -> &mut SalaryProfileService {
        &mut self.salaries
    }

    /// The component catalog.
    #[must_use]
    pub fn catalog(&self) -> &ComponentCatalogService {
        &self.catalog
    }

    /// Mutable access to the component catalog.
    pub fn catalog_mut(&mut self) -> &mut ComponentCatalogService {
        &mut self.catalog
    }

    /// The recurring adjustment ledger.
    #[must_use]
    pub fn adjustments(&self) -> &RecurringAdjustmentService {
        &self.adjustments
    }

    /// Mutable access to the recurring adjustment ledger.
    pub fn adjustments_mut(&mut self) -> &mut RecurringAdjustmentService {
        &mut self.adjustments
    }

    /// The loan ledger.
    #[must_use]
    pub fn loans(&self) -> &LoanService {
        &self.loans
    }

    /// Mutable access to the loan ledger.
    pub fn loans_mut(&mut self) -> &mut LoanService {
        &mut self.loans
    }

    /// Creates a draft payroll period.
    pub fn create_period(
        &mut self,
        input: CreatePeriodInput,
        ctx: &EngineContext,
    ) -> Result<PayrollPeriod, PayrollError> {
        if input.end_date < input.start_date {
            return Err(PayrollError::InvalidPeriodRange);
        }
        let period = PayrollPeriod {
            id: PayrollPeriodId::new(),
            name: input.name,
            start_date: input.start_date,
            end_date: input.end_date,
            pay_date: input.pay_date,
            status: PeriodStatus::Draft,
            totals: None,
            created_at: ctx.now,
        };
        self.periods.insert(period.id, period.clone());
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "payroll.period_created")
                .entity(period.id.to_string())
                .detail(json!({
                    "name": period.name,
                    "start_date": period.start_date.to_string(),
                    "end_date": period.end_date.to_string(),
                })),
        );
        Ok(period)
    }

    /// Opens a draft period for calculation.
    pub fn start_period(
        &mut self,
        period_id: PayrollPeriodId,
        ctx: &EngineContext,
    ) -> Result<(), PayrollError> {
        let period = self
            .periods
            .get_mut(&period_id)
            .ok_or(PayrollError::PeriodNotFound(period_id))?;
        if period.status != PeriodStatus::Draft {
            return Err(PayrollError::InvalidTransition {
                from: period.status,
                to: PeriodStatus::Calculating,
            });
        }
        period.status = PeriodStatus::Calculating;
        info!(period = %period_id, "payroll period started");
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "payroll.period_started").entity(period_id.to_string()),
        );
        Ok(())
    }

    /// Looks up one period.
    pub fn period(&self, period_id: PayrollPeriodId) -> Result<&PayrollPeriod, PayrollError> {
        self.periods
            .get(&period_id)
            .ok_or(PayrollError::PeriodNotFound(period_id))
    }

    /// Calculates one employee's pay for the period.
    ///
    /// Idempotent in the calculation row: any prior row for the
    /// (employee, period) pair is replaced. Loan-ledger advancement is
    /// a side effect of this call and is NOT idempotent: recalculating
    /// the same pair advances loans again, so callers must run it
    /// exactly once per pair per period.
    pub fn calculate_employee(
        &mut self,
        employee: EmployeeId,
        period_id: PayrollPeriodId,
        ctx: &EngineContext,
    ) -> Result<PayrollCalculation, PayrollError> {
        let period = self
            .periods
            .get(&period_id)
            .ok_or(PayrollError::PeriodNotFound(period_id))?;
        match period.status {
            PeriodStatus::Draft => return Err(PayrollError::PeriodNotStarted(period_id)),
            PeriodStatus::Calculated => return Err(PayrollError::PeriodFinalized(period_id)),
            PeriodStatus::Calculating => {}
        }
        let (period_start, period_end) = (period.start_date, period.end_date);

        let profile = self
            .salaries
            .get_active_profile(employee)
            .map_err(|_| PayrollError::MissingSetup(employee))?
            .clone();

        let summaries =
            self.attendance
                .finalized_summaries(employee, period_start, period_end)?;
        let attendance = PeriodAttendance::aggregate(&summaries);

        let basic_pay = match profile.salary_type {
            SalaryType::Monthly | SalaryType::Contractual | SalaryType::Project => {
                profile.basic_salary
            }
            SalaryType::Daily => round_centavos(attendance.days_worked * profile.daily_rate),
            SalaryType::Hourly => round_centavos(
                attendance.days_worked * self.config.schedule.hours_per_day * profile.hourly_rate,
            ),
        };
        let overtime_pay = round_centavos(
            attendance.overtime_hours
                * profile.hourly_rate
                * self.config.schedule.overtime_multiplier,
        );

        let component_total = self.catalog.assignment_total(employee, &profile, period_end);
        let allowance_total = self.adjustments.active_allowance_total(employee, period_end);
        let gross_pay = basic_pay + overtime_pay + component_total + allowance_total;

        let contributions = employee_contributions(&profile, &self.config.contributions);
        let taxable_income = gross_pay - contributions.total();
        let withholding_tax = monthly_withholding(taxable_income, profile.tax_status);

        let recurring_deductions = self.adjustments.active_deduction_total(employee, period_end);
        let loan_deduction = self.loans.process_deduction(employee, ctx);

        let minutes_per_hour = Decimal::from(60);
        let late_deduction =
            round_centavos(attendance.late_minutes / minutes_per_hour * profile.hourly_rate);
        let undertime_deduction =
            round_centavos(attendance.undertime_minutes / minutes_per_hour * profile.hourly_rate);

        let total_deductions = contributions.total()
            + withholding_tax
            + recurring_deductions
            + loan_deduction
            + late_deduction
            + undertime_deduction;
        let net_pay = gross_pay - total_deductions;

        let calculation = PayrollCalculation {
            id: CalculationId::new(),
            employee_id: employee,
            period_id,
            status: CalculationStatus::Computed,
            basic_salary: profile.basic_salary,
            days_worked: attendance.days_worked,
            total_hours: attendance.total_hours,
            regular_hours: attendance.regular_hours,
            overtime_hours: attendance.overtime_hours,
            late_minutes: attendance.late_minutes,
            undertime_minutes: attendance.undertime_minutes,
            basic_pay,
            overtime_pay,
            component_total,
            allowance_total,
            gross_pay,
            sss_contribution: contributions.sss,
            philhealth_contribution: contributions.philhealth,
            pagibig_contribution: contributions.pagibig,
            taxable_income,
            withholding_tax,
            recurring_deductions,
            loan_deduction,
            late_deduction,
            undertime_deduction,
            total_deductions,
            net_pay,
            calculated_at: ctx.now,
        };

        // Delete-and-replace: at most one row per (employee, period)
        let replaced = self
            .calculations
            .entry(period_id)
            .or_default()
            .insert(employee, calculation.clone())
            .is_some();

        info!(
            %employee,
            period = %period_id,
            gross = %gross_pay,
            net = %net_pay,
            replaced,
            "employee calculated"
        );
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "payroll.employee_calculated")
                .employee(employee)
                .entity(period_id.to_string())
                .detail(json!({
                    "gross_pay": gross_pay.to_string(),
                    "net_pay": net_pay.to_string(),
                    "replaced_prior": replaced,
                })),
        );
        Ok(calculation)
    }

    /// One employee's calculation row for a period.
    pub fn calculation(
        &self,
        period_id: PayrollPeriodId,
        employee: EmployeeId,
    ) -> Result<&PayrollCalculation, PayrollError> {
        self.calculations
            .get(&period_id)
            .and_then(|rows| rows.get(&employee))
            .ok_or(PayrollError::CalculationNotFound {
                employee_id: employee,
                period_id,
            })
    }

    /// Payslip view of one calculation row.
    pub fn payslip(
        &self,
        period_id: PayrollPeriodId,
        employee: EmployeeId,
    ) -> Result<Payslip, PayrollError> {
        let period = self.period(period_id)?;
        let calc = self.calculation(period_id, employee)?;

        let mut earnings = vec![PayslipLine {
            label: "basic pay",
            amount: calc.basic_pay,
        }];
        let mut deductions = Vec::new();
        let line = |lines: &mut Vec<PayslipLine>, label, amount: Decimal| {
            if amount > Decimal::ZERO {
                lines.push(PayslipLine { label, amount });
            }
        };
        line(&mut earnings, "overtime pay", calc.overtime_pay);
        line(&mut earnings, "pay components", calc.component_total);
        line(&mut earnings, "allowances", calc.allowance_total);
        line(&mut deductions, "sss", calc.sss_contribution);
        line(&mut deductions, "philhealth", calc.philhealth_contribution);
        line(&mut deductions, "pag-ibig", calc.pagibig_contribution);
        line(&mut deductions, "withholding tax", calc.withholding_tax);
        line(
            &mut deductions,
            "recurring deductions",
            calc.recurring_deductions,
        );
        line(&mut deductions, "loan payments", calc.loan_deduction);
        line(&mut deductions, "late", calc.late_deduction);
        line(&mut deductions, "undertime", calc.undertime_deduction);

        Ok(Payslip {
            employee_id: employee,
            period_name: period.name.clone(),
            period_start: period.start_date,
            period_end: period.end_date,
            pay_date: period.pay_date,
            earnings,
            deductions,
            gross_pay: calc.gross_pay,
            total_deductions: calc.total_deductions,
            net_pay: calc.net_pay,
        })
    }

    /// All calculation rows of a period, in no particular order.
    #[must_use]
    pub fn period_calculations(&self, period_id: PayrollPeriodId) -> Vec<&PayrollCalculation> {
        self.calculations
            .get(&period_id)
            .map(|rows| rows.values().collect())
            .unwrap_or_default()
    }

    /// Finalizes the period: aggregates totals, including employer
    /// contribution shares at the employer rates, and locks the period
    /// and every calculation row against further change.
    ///
    /// Employer shares mirror the employee-side gating: a scheme that
    /// contributed nothing on the employee side contributes nothing on
    /// the employer side either.
    pub fn finalize_calculation(
        &mut self,
        period_id: PayrollPeriodId,
        ctx: &EngineContext,
    ) -> Result<PeriodTotals, PayrollError> {
        let period = self
            .periods
            .get_mut(&period_id)
            .ok_or(PayrollError::PeriodNotFound(period_id))?;
        if period.status == PeriodStatus::Calculated {
            return Err(PayrollError::PeriodFinalized(period_id));
        }
        let rows = self
            .calculations
            .get_mut(&period_id)
            .filter(|rows| !rows.is_empty())
            .ok_or(PayrollError::NoCalculations(period_id))?;

        let rates = &self.config.contributions;
        let mut totals = PeriodTotals::default();
        for row in rows.values_mut() {
            totals.employee_count += 1;
            totals.gross_pay += row.gross_pay;
            totals.total_deductions += row.total_deductions;
            totals.net_pay += row.net_pay;
            totals.withholding_tax += row.withholding_tax;
            totals.loan_deductions += row.loan_deduction;
            totals.sss_employee += row.sss_contribution;
            totals.philhealth_employee += row.philhealth_contribution;
            totals.pagibig_employee += row.pagibig_contribution;
            let employee_side = Contributions {
                sss: row.sss_contribution,
                philhealth: row.philhealth_contribution,
                pagibig: row.pagibig_contribution,
            };
            let employer = employer_contributions(row.basic_salary, &employee_side, rates);
            totals.sss_employer += employer.sss;
            totals.philhealth_employer += employer.philhealth;
            totals.pagibig_employer += employer.pagibig;
            row.status = CalculationStatus::Finalized;
        }
        period.status = PeriodStatus::Calculated;
        period.totals = Some(totals.clone());

        info!(
            period = %period_id,
            employees = totals.employee_count,
            net = %totals.net_pay,
            "payroll period finalized"
        );
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "payroll.period_finalized")
                .entity(period_id.to_string())
                .detail(json!({
                    "employees": totals.employee_count,
                    "gross_pay": totals.gross_pay.to_string(),
                    "net_pay": totals.net_pay.to_string(),
                })),
        );
        Ok(totals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use sweldo_shared::types::UserId;

    use crate::attendance::DailySummary;
    use crate::audit::NoopAuditSink;
    use crate::loan::{CreateLoanInput, LoanStatus, LoanType};
    use crate::salary::{
        BenefitFlags, CreateProfileInput, GovernmentIds, PaymentMethod, ProfileData, TaxStatus,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx() -> EngineContext {
        EngineContext::at(date(2025, 1, 31), UserId::new())
    }

    /// Serves the same fixed day list to every employee.
    struct FixedAttendance(Vec<DailySummary>);

    impl AttendanceProvider for FixedAttendance {
        fn finalized_summaries(
            &self,
            _employee: EmployeeId,
            start: NaiveDate,
            end: NaiveDate,
        ) -> Result<Vec<DailySummary>, crate::attendance::AttendanceError> {
            Ok(self
                .0
                .iter()
                .filter(|d| d.date >= start && d.date <= end)
                .cloned()
                .collect())
        }
    }

    fn work_days(count: u32) -> Vec<DailySummary> {
        (0..count)
            .map(|i| DailySummary {
                date: date(2025, 1, 2) + chrono::Days::new(u64::from(i)),
                is_present: true,
                total_hours_worked: dec!(8),
                regular_hours: dec!(8),
                overtime_hours: Decimal::ZERO,
                late_minutes: Decimal::ZERO,
                undertime_minutes: Decimal::ZERO,
                is_finalized: true,
            })
            .collect()
    }

    fn engine_with(days: Vec<DailySummary>) -> PayrollEngine {
        PayrollEngine::new(
            EngineConfig::default(),
            Box::new(FixedAttendance(days)),
            Arc::new(NoopAuditSink),
        )
    }

    fn full_ids() -> GovernmentIds {
        GovernmentIds {
            sss: Some("34-1234567-8".to_string()),
            philhealth: Some("12-123456789-0".to_string()),
            pagibig: Some("1234-5678-9012".to_string()),
            tin: Some("123-456-789".to_string()),
        }
    }

    fn monthly_profile(engine: &mut PayrollEngine, basic: Decimal) -> EmployeeId {
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
                        government: full_ids(),
                        pagibig_rate: None,
                        bank: None,
                        benefits: BenefitFlags::default(),
                    },
                    effective_date: date(2024, 1, 1),
                },
                &ctx(),
            )
            .unwrap();
        employee
    }

    fn open_period(engine: &mut PayrollEngine) -> PayrollPeriodId {
        let period = engine
            .create_period(
                CreatePeriodInput {
                    name: "2025-01".to_string(),
                    start_date: date(2025, 1, 1),
                    end_date: date(2025, 1, 31),
                    pay_date: date(2025, 2, 5),
                },
                &ctx(),
            )
            .unwrap();
        engine.start_period(period.id, &ctx()).unwrap();
        period.id
    }

    #[test]
    fn test_calculate_monthly_employee_below_tax_threshold() {
        let mut engine = engine_with(work_days(22));
        let employee = monthly_profile(&mut engine, dec!(22000));
        let period = open_period(&mut engine);

        let calc = engine.calculate_employee(employee, period, &ctx()).unwrap();

        assert_eq!(calc.basic_pay, dec!(22000));
        assert_eq!(calc.overtime_pay, Decimal::ZERO);
        assert_eq!(calc.gross_pay, dec!(22000));
        assert_eq!(calc.sss_contribution, dec!(1760.00));
        assert_eq!(calc.philhealth_contribution, dec!(605.00));
        assert_eq!(calc.pagibig_contribution, dec!(220.00));
        assert_eq!(calc.taxable_income, dec!(19415.00));
        // Annualized 232,980 sits under the lowest bracket
        assert_eq!(calc.withholding_tax, Decimal::ZERO);
        assert_eq!(calc.total_deductions, dec!(2585.00));
        assert_eq!(calc.net_pay, dec!(19415.00));
    }

    #[test]
    fn test_overtime_uses_hourly_rate_and_multiplier() {
        let mut days = work_days(22);
        days[0].overtime_hours = dec!(4);
        days[0].total_hours_worked = dec!(12);
        let mut engine = engine_with(days);
        let employee = monthly_profile(&mut engine, dec!(22000));
        let period = open_period(&mut engine);

        let calc = engine.calculate_employee(employee, period, &ctx()).unwrap();
        // 4h x 125/h x 1.25
        assert_eq!(calc.overtime_pay, dec!(625.00));
        assert_eq!(calc.gross_pay, dec!(22625.00));
    }

    #[test]
    fn test_calculation_retains_hour_aggregates() {
        let mut days = work_days(22);
        days[0].overtime_hours = dec!(4);
        days[0].total_hours_worked = dec!(12);
        let mut engine = engine_with(days);
        let employee = monthly_profile(&mut engine, dec!(22000));
        let period = open_period(&mut engine);

        let calc = engine.calculate_employee(employee, period, &ctx()).unwrap();
        assert_eq!(calc.days_worked, dec!(22));
        assert_eq!(calc.regular_hours, dec!(176));
        assert_eq!(calc.overtime_hours, dec!(4));
        assert_eq!(calc.total_hours, dec!(180));
    }

    #[test]
    fn test_late_and_undertime_deductions() {
        let mut days = work_days(22);
        days[0].late_minutes = dec!(30);
        days[1].undertime_minutes = dec!(45);
        let mut engine = engine_with(days);
        let employee = monthly_profile(&mut engine, dec!(22000));
        let period = open_period(&mut engine);

        let calc = engine.calculate_employee(employee, period, &ctx()).unwrap();
        // 0.5h and 0.75h at 125/h
        assert_eq!(calc.late_deduction, dec!(62.50));
        assert_eq!(calc.undertime_deduction, dec!(93.75));
    }

    #[test]
    fn test_net_equals_gross_minus_deductions() {
        let mut days = work_days(20);
        days[2].overtime_hours = dec!(2);
        days[5].late_minutes = dec!(15);
        let mut engine = engine_with(days);
        let employee = monthly_profile(&mut engine, dec!(45000));
        let period = open_period(&mut engine);

        let calc = engine.calculate_employee(employee, period, &ctx()).unwrap();
        assert_eq!(calc.net_pay, calc.gross_pay - calc.total_deductions);
        assert_eq!(
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
    }

    #[test]
    fn test_calculation_requires_setup_and_started_period() {
        let mut engine = engine_with(work_days(22));
        let no_profile = EmployeeId::new();
        let period = open_period(&mut engine);

        assert!(matches!(
            engine.calculate_employee(no_profile, period, &ctx()),
            Err(PayrollError::MissingSetup(_))
        ));

        let employee = monthly_profile(&mut engine, dec!(22000));
        let draft = engine
            .create_period(
                CreatePeriodInput {
                    name: "draft".to_string(),
                    start_date: date(2025, 2, 1),
                    end_date: date(2025, 2, 28),
                    pay_date: date(2025, 3, 5),
                },
                &ctx(),
            )
            .unwrap();
        assert!(matches!(
            engine.calculate_employee(employee, draft.id, &ctx()),
            Err(PayrollError::PeriodNotStarted(_))
        ));
    }

    #[test]
    fn test_recalculation_replaces_the_row() {
        let mut engine = engine_with(work_days(22));
        let employee = monthly_profile(&mut engine, dec!(22000));
        let period = open_period(&mut engine);

        let first = engine.calculate_employee(employee, period, &ctx()).unwrap();
        let second = engine.calculate_employee(employee, period, &ctx()).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(engine.period_calculations(period).len(), 1);
        assert_eq!(engine.calculation(period, employee).unwrap().id, second.id);
    }

    #[test]
    fn test_recalculation_double_decrements_active_loans() {
        // Loan advancement rides along with calculation, so running the
        // same (employee, period) twice pushes the loan forward twice.
        // This pins the behavior down; see the ledger docs for the
        // required once-per-period discipline.
        let mut engine = engine_with(work_days(22));
        let employee = monthly_profile(&mut engine, dec!(22000));
        let profile = engine.salaries().get_active_profile(employee).unwrap().clone();
        let loan = engine
            .loans_mut()
            .create_loan(
                &profile,
                CreateLoanInput {
                    loan_type: LoanType::Company,
                    principal: dec!(20000),
                    annual_rate: dec!(0),
                    term_months: 10,
                    start_date: date(2025, 1, 15),
                },
                &ctx(),
            )
            .unwrap();
        let period = open_period(&mut engine);

        engine.calculate_employee(employee, period, &ctx()).unwrap();
        assert_eq!(
            engine.loans().loan(loan.id).unwrap().remaining_balance,
            dec!(18000)
        );

        engine.calculate_employee(employee, period, &ctx()).unwrap();
        // One calculation row, but the balance moved twice
        assert_eq!(engine.period_calculations(period).len(), 1);
        assert_eq!(
            engine.loans().loan(loan.id).unwrap().remaining_balance,
            dec!(16000)
        );
        assert_eq!(engine.loans().loan(loan.id).unwrap().status, LoanStatus::Active);
    }

    #[test]
    fn test_finalize_aggregates_and_locks() {
        let mut engine = engine_with(work_days(22));
        let alice = monthly_profile(&mut engine, dec!(22000));
        let bob = monthly_profile(&mut engine, dec!(30000));
        let period = open_period(&mut engine);

        let a = engine.calculate_employee(alice, period, &ctx()).unwrap();
        let b = engine.calculate_employee(bob, period, &ctx()).unwrap();

        let totals = engine.finalize_calculation(period, &ctx()).unwrap();
        assert_eq!(totals.employee_count, 2);
        assert_eq!(totals.gross_pay, a.gross_pay + b.gross_pay);
        assert_eq!(totals.net_pay, a.net_pay + b.net_pay);
        assert_eq!(
            totals.sss_employee,
            a.sss_contribution + b.sss_contribution
        );
        // Employer SSS at 9.5% of each basic salary
        assert_eq!(totals.sss_employer, dec!(2090.00) + dec!(2850.00));
        assert_eq!(totals.pagibig_employer, dec!(440.00) + dec!(600.00));

        let finalized = engine.period(period).unwrap();
        assert_eq!(finalized.status, PeriodStatus::Calculated);
        assert_eq!(
            finalized.totals.as_ref().map(|t| t.employee_count),
            Some(2)
        );
        assert_eq!(
            engine.calculation(period, alice).unwrap().status,
            CalculationStatus::Finalized
        );

        // Finalization is a hard boundary
        assert!(matches!(
            engine.calculate_employee(alice, period, &ctx()),
            Err(PayrollError::PeriodFinalized(_))
        ));
        assert!(matches!(
            engine.finalize_calculation(period, &ctx()),
            Err(PayrollError::PeriodFinalized(_))
        ));
    }

    #[test]
    fn test_finalize_requires_calculations() {
        let mut engine = engine_with(work_days(22));
        let period = open_period(&mut engine);
        assert!(matches!(
            engine.finalize_calculation(period, &ctx()),
            Err(PayrollError::NoCalculations(_))
        ));
    }

    #[test]
    fn test_period_validation_and_transitions() {
        let mut engine = engine_with(Vec::new());
        assert!(matches!(
            engine.create_period(
                CreatePeriodInput {
                    name: "backwards".to_string(),
                    start_date: date(2025, 1, 31),
                    end_date: date(2025, 1, 1),
                    pay_date: date(2025, 2, 5),
                },
                &ctx(),
            ),
            Err(PayrollError::InvalidPeriodRange)
        ));

        let period = open_period(&mut engine);
        // Starting twice is not a defined transition
        assert!(matches!(
            engine.start_period(period, &ctx()),
            Err(PayrollError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_daily_employee_paid_by_days_worked() {
        let mut engine = engine_with(work_days(10));
        let employee = EmployeeId::new();
        engine
            .salaries_mut()
            .create_profile(
                CreateProfileInput {
                    employee,
                    data: ProfileData {
                        salary_type: SalaryType::Daily,
                        basic_salary: dec!(13200),
                        daily_rate: Some(dec!(600)),
                        hourly_rate: Some(dec!(75)),
                        payment_method: PaymentMethod::Cash,
                        tax_status: TaxStatus::Single,
                        government: full_ids(),
                        pagibig_rate: None,
                        bank: None,
                        benefits: BenefitFlags::default(),
                    },
                    effective_date: date(2024, 1, 1),
                },
                &ctx(),
            )
            .unwrap();
        let period = open_period(&mut engine);

        let calc = engine.calculate_employee(employee, period, &ctx()).unwrap();
        assert_eq!(calc.days_worked, dec!(10));
        assert_eq!(calc.basic_pay, dec!(6000.00));
    }

    #[test]
    fn test_payslip_joins_period_and_skips_zero_lines() {
        let mut engine = engine_with(work_days(22));
        let employee = monthly_profile(&mut engine, dec!(22000));
        let period = open_period(&mut engine);
        engine.calculate_employee(employee, period, &ctx()).unwrap();

        let slip = engine.payslip(period, employee).unwrap();
        assert_eq!(slip.period_name, "2025-01");
        assert_eq!(slip.pay_date, date(2025, 2, 5));
        assert_eq!(slip.gross_pay, dec!(22000));
        assert_eq!(slip.net_pay, dec!(19415.00));
        // No overtime, components, allowances, tax, loans, or late
        let earning_labels: Vec<_> = slip.earnings.iter().map(|l| l.label).collect();
        assert_eq!(earning_labels, vec!["basic pay"]);
        let deduction_labels: Vec<_> = slip.deductions.iter().map(|l| l.label).collect();
        assert_eq!(deduction_labels, vec!["sss", "philhealth", "pag-ibig"]);

        let missing = engine.payslip(period, EmployeeId::new());
        assert!(matches!(
            missing,
            Err(PayrollError::CalculationNotFound { .. })
        ));
    }
}
