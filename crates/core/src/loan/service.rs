//! Loan ledger.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Months;
use rust_decimal::Decimal;
use serde_json::json;
use sweldo_shared::types::{EmployeeId, InstallmentId, LoanId};
use tracing::info;

use crate::audit::{notify, AuditEvent, AuditSink};
use crate::context::EngineContext;
use crate::salary::SalaryProfile;
use sweldo_shared::config::LoanConfig;

use super::amortization::{monthly_payment, total_cost};
use super::error::LoanError;
use super::types::{
    CreateLoanInput, InstallmentStatus, Loan, LoanInstallment, LoanStatus, LoanType,
};

/// Ledger of employee loans and their amortization schedules.
///
/// Origination is all-or-nothing: the loan row and its full schedule
/// are committed together, after every validation has passed.
pub struct LoanService {
    loans: HashMap<LoanId, Loan>,
    schedules: HashMap<LoanId, Vec<LoanInstallment>>,
    by_employee: HashMap<EmployeeId, Vec<LoanId>>,
    config: LoanConfig,
    audit: Arc<dyn AuditSink>,
}

impl LoanService {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new(config: LoanConfig, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            loans: HashMap::new(),
            schedules: HashMap::new(),
            by_employee: HashMap::new(),
            config,
            audit,
        }
    }

    /// Originates a loan for the employee behind `profile`.
    ///
    /// Validates amounts, checks the type-specific eligibility
    /// predicate, computes the amortized payment, and generates exactly
    /// `term_months` installments falling due monthly after
    /// `start_date`.
    pub fn create_loan(
        &mut self,
        profile: &SalaryProfile,
        input: CreateLoanInput,
        ctx: &EngineContext,
    ) -> Result<Loan, LoanError> {
        if input.principal <= Decimal::ZERO {
            return Err(LoanError::NonPositivePrincipal);
        }
        if input.term_months == 0 {
            return Err(LoanError::NonPositiveTerm);
        }
        if input.annual_rate < Decimal::ZERO {
            return Err(LoanError::NegativeRate);
        }
        self.check_eligibility(profile, input.loan_type)?;

        let payment = monthly_payment(input.principal, input.annual_rate, input.term_months);
        let loan = Loan {
            id: LoanId::new(),
            employee_id: profile.employee,
            loan_type: input.loan_type,
            principal: input.principal,
            annual_rate: input.annual_rate,
            term_months: input.term_months,
            monthly_payment: payment,
            total_cost: total_cost(payment, input.term_months),
            start_date: input.start_date,
            remaining_balance: input.principal,
            status: LoanStatus::Active,
            created_at: ctx.now,
        };

        // Build the whole schedule before touching ledger state, so a
        // date overflow leaves nothing behind.
        let mut schedule = Vec::with_capacity(input.term_months as usize);
        for month in 1..=input.term_months {
            let due_date = input
                .start_date
                .checked_add_months(Months::new(month))
                .ok_or(LoanError::ScheduleOutOfRange)?;
            schedule.push(LoanInstallment {
                id: InstallmentId::new(),
                loan_id: loan.id,
                due_date,
                amount: payment,
                status: InstallmentStatus::Pending,
                processed_date: None,
            });
        }

        self.by_employee
            .entry(profile.employee)
            .or_default()
            .push(loan.id);
        self.schedules.insert(loan.id, schedule);
        self.loans.insert(loan.id, loan.clone());

        info!(
            employee = %profile.employee,
            loan = %loan.id,
            loan_type = loan.loan_type.as_str(),
            principal = %loan.principal,
            payment = %payment,
            "loan originated"
        );
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "loan.created")
                .employee(profile.employee)
                .entity(loan.id.to_string())
                .detail(json!({
                    "type": loan.loan_type.as_str(),
                    "principal": loan.principal.to_string(),
                    "term_months": loan.term_months,
                    "monthly_payment": payment.to_string(),
                })),
        );
        Ok(loan)
    }

    fn check_eligibility(
        &self,
        profile: &SalaryProfile,
        loan_type: LoanType,
    ) -> Result<(), LoanError> {
        match loan_type {
            LoanType::Sss if profile.government.sss.is_none() => Err(LoanError::NotEligible {
                loan_type,
                reason: "no SSS number on file",
            }),
            LoanType::Pagibig if profile.government.pagibig.is_none() => {
                Err(LoanError::NotEligible {
                    loan_type,
                    reason: "no Pag-IBIG number on file",
                })
            }
            LoanType::Housing
                if profile.basic_salary < self.config.housing_min_basic_salary =>
            {
                Err(LoanError::NotEligible {
                    loan_type,
                    reason: "basic salary below the housing loan minimum",
                })
            }
            _ => Ok(()),
        }
    }

    /// Advances every active loan of the employee by one installment
    /// and returns the total deducted.
    ///
    /// For each active loan the earliest pending installment is marked
    /// processed and the balance is decremented by its amount, clamped
    /// at zero; a loan whose balance reaches zero completes. Loans with
    /// no pending installment are left untouched. Intended to run
    /// exactly once per employee per payroll period.
    pub fn process_deduction(&mut self, employee: EmployeeId, ctx: &EngineContext) -> Decimal {
        let Some(loan_ids) = self.by_employee.get(&employee).cloned() else {
            return Decimal::ZERO;
        };

        let mut deducted = Decimal::ZERO;
        for loan_id in loan_ids {
            let Some(loan) = self.loans.get_mut(&loan_id) else {
                continue;
            };
            if loan.status != LoanStatus::Active {
                continue;
            }
            let Some(installment) = self
                .schedules
                .get_mut(&loan_id)
                .and_then(|s| s.iter_mut().find(|i| i.status == InstallmentStatus::Pending))
            else {
                continue;
            };

            installment.status = InstallmentStatus::Processed;
            installment.processed_date = Some(ctx.today);
            let amount = installment.amount;

            loan.remaining_balance = (loan.remaining_balance - amount).max(Decimal::ZERO);
            if loan.remaining_balance.is_zero() {
                loan.status = LoanStatus::Completed;
                info!(%employee, loan = %loan_id, "loan completed");
            }
            deducted += amount;

            notify(
                self.audit.as_ref(),
                &AuditEvent::info(ctx.actor, "loan.installment_processed")
                    .employee(employee)
                    .entity(loan_id.to_string())
                    .detail(json!({
                        "amount": amount.to_string(),
                        "remaining_balance": loan.remaining_balance.to_string(),
                    })),
            );
        }
        deducted
    }

    /// Applies a lump-sum payment against an active loan.
    ///
    /// The balance is decremented by the full amount. Pending
    /// installments are then marked processed oldest-first as long as
    /// the remaining payment fully covers them; partial coverage of an
    /// installment is absorbed into the balance reduction without
    /// marking it. A balance of zero completes the loan.
    pub fn make_early_payment(
        &mut self,
        loan_id: LoanId,
        amount: Decimal,
        ctx: &EngineContext,
    ) -> Result<Loan, LoanError> {
        let loan = self
            .loans
            .get_mut(&loan_id)
            .ok_or(LoanError::LoanNotFound(loan_id))?;
        if loan.status != LoanStatus::Active {
            return Err(LoanError::LoanNotActive(loan_id));
        }
        if amount <= Decimal::ZERO || amount > loan.remaining_balance {
            return Err(LoanError::InvalidPaymentAmount {
                amount,
                balance: loan.remaining_balance,
            });
        }

        loan.remaining_balance -= amount;
        let mut remaining = amount;
        if let Some(schedule) = self.schedules.get_mut(&loan_id) {
            for installment in schedule
                .iter_mut()
                .filter(|i| i.status == InstallmentStatus::Pending)
            {
                if remaining < installment.amount {
                    break;
                }
                remaining -= installment.amount;
                installment.status = InstallmentStatus::Processed;
                installment.processed_date = Some(ctx.today);
            }
        }
        if loan.remaining_balance.is_zero() {
            loan.status = LoanStatus::Completed;
        }

        info!(loan = %loan_id, amount = %amount, balance = %loan.remaining_balance, "early payment applied");
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "loan.early_payment")
                .employee(loan.employee_id)
                .entity(loan_id.to_string())
                .detail(json!({
                    "amount": amount.to_string(),
                    "remaining_balance": loan.remaining_balance.to_string(),
                })),
        );
        Ok(loan.clone())
    }

    /// Cancels an active loan. History and schedule are retained.
    pub fn cancel_loan(&mut self, loan_id: LoanId, ctx: &EngineContext) -> Result<(), LoanError> {
        let loan = self
            .loans
            .get_mut(&loan_id)
            .ok_or(LoanError::LoanNotFound(loan_id))?;
        if loan.status != LoanStatus::Active {
            return Err(LoanError::LoanNotActive(loan_id));
        }
        loan.status = LoanStatus::Cancelled;
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "loan.cancelled")
                .employee(loan.employee_id)
                .entity(loan_id.to_string()),
        );
        Ok(())
    }

    /// Looks up one loan.
    pub fn loan(&self, loan_id: LoanId) -> Result<&Loan, LoanError> {
        self.loans
            .get(&loan_id)
            .ok_or(LoanError::LoanNotFound(loan_id))
    }

    /// The amortization schedule of one loan, due dates ascending.
    pub fn schedule(&self, loan_id: LoanId) -> Result<&[LoanInstallment], LoanError> {
        self.schedules
            .get(&loan_id)
            .map(Vec::as_slice)
            .ok_or(LoanError::LoanNotFound(loan_id))
    }

    /// Active loans of one employee.
    #[must_use]
    pub fn active_loans(&self, employee: EmployeeId) -> Vec<&Loan> {
        self.by_employee
            .get(&employee)
            .into_iter()
            .flatten()
            .filter_map(|id| self.loans.get(id))
            .filter(|loan| loan.status == LoanStatus::Active)
            .collect()
    }

    /// Per-period loan deduction currently due for the employee: the
    /// sum of monthly payments of loans that still have a pending
    /// installment. Read-only counterpart of [`Self::process_deduction`].
    #[must_use]
    pub fn pending_deduction(&self, employee: EmployeeId) -> Decimal {
        self.active_loans(employee)
            .iter()
            .filter(|loan| {
                self.schedules
                    .get(&loan.id)
                    .is_some_and(|s| s.iter().any(|i| i.status == InstallmentStatus::Pending))
            })
            .map(|loan| loan.monthly_payment)
            .sum()
    }
}
