//! Recurring adjustment ledger.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use sweldo_shared::types::{round_centavos, AdjustmentId, EmployeeId};
use tracing::info;

use crate::audit::{notify, AuditEvent, AuditSink};
use crate::context::EngineContext;
use crate::directory::EmployeeDirectory;
use crate::temporal::{is_effective_on, Timeline};

use super::error::AdjustmentError;
use super::types::{
    AdjustmentData, AdjustmentKind, AllowanceType, BulkFailure, BulkOutcome, BulkSelector,
    DeductionType, RecurringAdjustment,
};

/// Ledger of recurring allowances and deductions, keyed by employee
/// and category. At most one open active record exists per key; adding
/// another supersedes the previous one.
pub struct RecurringAdjustmentService {
    allowances: HashMap<(EmployeeId, AllowanceType), Timeline<RecurringAdjustment<AllowanceType>>>,
    deductions: HashMap<(EmployeeId, DeductionType), Timeline<RecurringAdjustment<DeductionType>>>,
    audit: Arc<dyn AuditSink>,
}

impl RecurringAdjustmentService {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new(audit: Arc<dyn AuditSink>) -> Self {
        Self {
            allowances: HashMap::new(),
            deductions: HashMap::new(),
            audit,
        }
    }

    /// Grants a recurring allowance. An existing active record of the
    /// same type is superseded, its end stamped to the new effective
    /// date.
    pub fn add_allowance(
        &mut self,
        employee: EmployeeId,
        allowance_type: AllowanceType,
        data: AdjustmentData,
        ctx: &EngineContext,
    ) -> Result<RecurringAdjustment<AllowanceType>, AdjustmentError> {
        if data.amount <= Decimal::ZERO {
            return Err(AdjustmentError::NonPositiveAmount);
        }
        let record = RecurringAdjustment {
            id: AdjustmentId::new(),
            employee_id: employee,
            adjustment_type: allowance_type,
            amount: data.amount,
            effective_date: data.effective_date,
            end_date: None,
            is_active: true,
        };
        self.allowances
            .entry((employee, allowance_type))
            .or_default()
            .supersede(record.clone());
        info!(%employee, allowance = allowance_type.as_str(), amount = %data.amount, "allowance granted");
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "adjustment.allowance_added")
                .employee(employee)
                .entity(record.id.to_string())
                .detail(json!({
                    "type": allowance_type.as_str(),
                    "amount": record.amount.to_string(),
                    "effective_date": record.effective_date.to_string(),
                })),
        );
        Ok(record)
    }

    /// Imposes a recurring deduction, superseding any active record of
    /// the same type.
    pub fn add_deduction(
        &mut self,
        employee: EmployeeId,
        deduction_type: DeductionType,
        data: AdjustmentData,
        ctx: &EngineContext,
    ) -> Result<RecurringAdjustment<DeductionType>, AdjustmentError> {
        if data.amount <= Decimal::ZERO {
            return Err(AdjustmentError::NonPositiveAmount);
        }
        let record = RecurringAdjustment {
            id: AdjustmentId::new(),
            employee_id: employee,
            adjustment_type: deduction_type,
            amount: data.amount,
            effective_date: data.effective_date,
            end_date: None,
            is_active: true,
        };
        self.deductions
            .entry((employee, deduction_type))
            .or_default()
            .supersede(record.clone());
        info!(%employee, deduction = deduction_type.as_str(), amount = %data.amount, "deduction imposed");
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "adjustment.deduction_added")
                .employee(employee)
                .entity(record.id.to_string())
                .detail(json!({
                    "type": deduction_type.as_str(),
                    "amount": record.amount.to_string(),
                    "effective_date": record.effective_date.to_string(),
                })),
        );
        Ok(record)
    }

    /// Ends the active allowance of the given type as of today. The
    /// record is kept in history with its end date stamped.
    pub fn remove_allowance(
        &mut self,
        employee: EmployeeId,
        allowance_type: AllowanceType,
        ctx: &EngineContext,
    ) -> Result<(), AdjustmentError> {
        let closed = self
            .allowances
            .get_mut(&(employee, allowance_type))
            .is_some_and(|t| t.close_current(ctx.today));
        if !closed {
            return Err(AdjustmentError::NoActiveAdjustment {
                employee_id: employee,
                kind: allowance_type.as_str(),
            });
        }
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "adjustment.allowance_removed")
                .employee(employee)
                .detail(json!({"type": allowance_type.as_str()})),
        );
        Ok(())
    }

    /// Ends the active deduction of the given type as of today.
    pub fn remove_deduction(
        &mut self,
        employee: EmployeeId,
        deduction_type: DeductionType,
        ctx: &EngineContext,
    ) -> Result<(), AdjustmentError> {
        let closed = self
            .deductions
            .get_mut(&(employee, deduction_type))
            .is_some_and(|t| t.close_current(ctx.today));
        if !closed {
            return Err(AdjustmentError::NoActiveAdjustment {
                employee_id: employee,
                kind: deduction_type.as_str(),
            });
        }
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "adjustment.deduction_removed")
                .employee(employee)
                .detail(json!({"type": deduction_type.as_str()})),
        );
        Ok(())
    }

    /// Active allowance records effective on the given date.
    #[must_use]
    pub fn active_allowances(
        &self,
        employee: EmployeeId,
        today: NaiveDate,
    ) -> Vec<&RecurringAdjustment<AllowanceType>> {
        self.allowances
            .iter()
            .filter(|((id, _), _)| *id == employee)
            .filter_map(|(_, timeline)| timeline.current())
            .filter(|record| is_effective_on(*record, today))
            .collect()
    }

    /// Active deduction records effective on the given date.
    #[must_use]
    pub fn active_deductions(
        &self,
        employee: EmployeeId,
        today: NaiveDate,
    ) -> Vec<&RecurringAdjustment<DeductionType>> {
        self.deductions
            .iter()
            .filter(|((id, _), _)| *id == employee)
            .filter_map(|(_, timeline)| timeline.current())
            .filter(|record| is_effective_on(*record, today))
            .collect()
    }

    /// Sum of active allowances effective on the given date, rounded
    /// to centavos.
    #[must_use]
    pub fn active_allowance_total(&self, employee: EmployeeId, today: NaiveDate) -> Decimal {
        round_centavos(
            self.active_allowances(employee, today)
                .iter()
                .map(|r| r.amount)
                .sum(),
        )
    }

    /// Sum of active deductions effective on the given date, rounded
    /// to centavos.
    #[must_use]
    pub fn active_deduction_total(&self, employee: EmployeeId, today: NaiveDate) -> Decimal {
        round_centavos(
            self.active_deductions(employee, today)
                .iter()
                .map(|r| r.amount)
                .sum(),
        )
    }

    /// Full history for one employee and allowance type, oldest first.
    #[must_use]
    pub fn allowance_history(
        &self,
        employee: EmployeeId,
        allowance_type: AllowanceType,
    ) -> &[RecurringAdjustment<AllowanceType>] {
        self.allowances
            .get(&(employee, allowance_type))
            .map_or(&[], Timeline::history)
    }

    /// Applies one adjustment to every selected employee, best effort.
    /// The amount is validated once up front; per-employee failures
    /// are collected rather than aborting the batch.
    pub fn bulk_assign(
        &mut self,
        kind: AdjustmentKind,
        data: AdjustmentData,
        selector: BulkSelector,
        directory: &dyn EmployeeDirectory,
        ctx: &EngineContext,
    ) -> Result<BulkOutcome, AdjustmentError> {
        if data.amount <= Decimal::ZERO {
            return Err(AdjustmentError::NonPositiveAmount);
        }

        let mut outcome = BulkOutcome::default();
        let targets: Vec<EmployeeId> = match selector {
            BulkSelector::Ids(ids) => ids,
            BulkSelector::Filter(filter) => directory.search(&filter),
        };

        for employee in targets {
            if !directory.exists(employee) {
                outcome.failures.push(BulkFailure {
                    employee_id: employee,
                    error: AdjustmentError::EmployeeNotFound(employee),
                });
                continue;
            }
            let result = match kind {
                AdjustmentKind::Allowance(t) => self
                    .add_allowance(employee, t, data.clone(), ctx)
                    .map(|_| ()),
                AdjustmentKind::Deduction(t) => self
                    .add_deduction(employee, t, data.clone(), ctx)
                    .map(|_| ()),
            };
            match result {
                Ok(()) => outcome.applied.push(employee),
                Err(error) => outcome.failures.push(BulkFailure {
                    employee_id: employee,
                    error,
                }),
            }
        }

        info!(
            applied = outcome.applied.len(),
            failed = outcome.failures.len(),
            "bulk adjustment finished"
        );
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "adjustment.bulk_assigned").detail(json!({
                "applied": outcome.applied.len(),
                "failed": outcome.failures.len(),
                "amount": data.amount.to_string(),
            })),
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use sweldo_shared::types::UserId;

    use crate::audit::NoopAuditSink;
    use crate::directory::{EmployeeFilter, EmployeeRecord, StaticDirectory};
    use crate::salary::SalaryType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ctx_on(today: NaiveDate) -> EngineContext {
        EngineContext::at(today, UserId::new())
    }

    fn service() -> RecurringAdjustmentService {
        RecurringAdjustmentService::new(Arc::new(NoopAuditSink))
    }

    fn data(amount: Decimal, effective: NaiveDate) -> AdjustmentData {
        AdjustmentData {
            amount,
            effective_date: effective,
        }
    }

    #[test]
    fn test_add_allowance_supersedes_same_type() {
        let mut svc = service();
        let employee = EmployeeId::new();
        let ctx = ctx_on(date(2025, 3, 15));

        svc.add_allowance(
            employee,
            AllowanceType::Rice,
            data(dec!(1500), date(2025, 1, 1)),
            &ctx,
        )
        .unwrap();
        svc.add_allowance(
            employee,
            AllowanceType::Rice,
            data(dec!(2000), date(2025, 4, 1)),
            &ctx,
        )
        .unwrap();

        let history = svc.allowance_history(employee, AllowanceType::Rice);
        assert_eq!(history.len(), 2);
        assert!(!history[0].is_active);
        assert_eq!(history[0].end_date, Some(date(2025, 4, 1)));
        assert!(history[1].is_active);

        // The superseded record is out; only the new one counts.
        assert_eq!(
            svc.active_allowance_total(employee, date(2025, 4, 1)),
            dec!(2000.00)
        );
    }

    #[test]
    fn test_totals_sum_across_types_only_for_the_employee() {
        let mut svc = service();
        let alice = EmployeeId::new();
        let bob = EmployeeId::new();
        let ctx = ctx_on(date(2025, 2, 1));
        let effective = date(2025, 1, 1);

        svc.add_allowance(alice, AllowanceType::Rice, data(dec!(1500), effective), &ctx)
            .unwrap();
        svc.add_allowance(
            alice,
            AllowanceType::Transportation,
            data(dec!(1000), effective),
            &ctx,
        )
        .unwrap();
        svc.add_allowance(bob, AllowanceType::Rice, data(dec!(9999), effective), &ctx)
            .unwrap();
        svc.add_deduction(
            alice,
            DeductionType::UnionDues,
            data(dec!(100), effective),
            &ctx,
        )
        .unwrap();

        assert_eq!(
            svc.active_allowance_total(alice, date(2025, 2, 1)),
            dec!(2500.00)
        );
        assert_eq!(
            svc.active_deduction_total(alice, date(2025, 2, 1)),
            dec!(100.00)
        );
    }

    #[test]
    fn test_remove_allowance_closes_but_keeps_history() {
        let mut svc = service();
        let employee = EmployeeId::new();
        let ctx = ctx_on(date(2025, 6, 30));

        svc.add_allowance(
            employee,
            AllowanceType::Meal,
            data(dec!(800), date(2025, 1, 1)),
            &ctx,
        )
        .unwrap();
        svc.remove_allowance(employee, AllowanceType::Meal, &ctx)
            .unwrap();

        let history = svc.allowance_history(employee, AllowanceType::Meal);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].end_date, Some(date(2025, 6, 30)));
        assert_eq!(
            svc.active_allowance_total(employee, date(2025, 7, 1)),
            Decimal::ZERO
        );

        // A second removal has nothing left to close.
        let err = svc
            .remove_allowance(employee, AllowanceType::Meal, &ctx)
            .unwrap_err();
        assert!(matches!(err, AdjustmentError::NoActiveAdjustment { .. }));
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let mut svc = service();
        let employee = EmployeeId::new();
        let ctx = ctx_on(date(2025, 1, 1));

        let err = svc
            .add_deduction(
                employee,
                DeductionType::CashAdvance,
                data(Decimal::ZERO, date(2025, 1, 1)),
                &ctx,
            )
            .unwrap_err();
        assert!(matches!(err, AdjustmentError::NonPositiveAmount));
        assert!(svc
            .allowance_history(employee, AllowanceType::Rice)
            .is_empty());
    }

    #[test]
    fn test_bulk_assign_by_filter_is_best_effort() {
        let engineering = EmployeeRecord {
            id: EmployeeId::new(),
            department: "Engineering".to_string(),
            position: "Developer".to_string(),
            salary_type: SalaryType::Monthly,
        };
        let sales = EmployeeRecord {
            id: EmployeeId::new(),
            department: "Sales".to_string(),
            position: "Agent".to_string(),
            salary_type: SalaryType::Monthly,
        };
        let eng_id = engineering.id;
        let directory = StaticDirectory::new(vec![engineering, sales]);

        let mut svc = service();
        let ctx = ctx_on(date(2025, 2, 1));
        let outcome = svc
            .bulk_assign(
                AdjustmentKind::Allowance(AllowanceType::Rice),
                data(dec!(1500), date(2025, 2, 1)),
                BulkSelector::Filter(EmployeeFilter {
                    department: Some("Engineering".to_string()),
                    ..EmployeeFilter::default()
                }),
                &directory,
                &ctx,
            )
            .unwrap();

        assert_eq!(outcome.applied, vec![eng_id]);
        assert!(outcome.is_complete());
        assert_eq!(
            svc.active_allowance_total(eng_id, date(2025, 2, 1)),
            dec!(1500.00)
        );
    }

    #[test]
    fn test_bulk_assign_collects_unknown_ids() {
        let known = EmployeeRecord {
            id: EmployeeId::new(),
            department: "Ops".to_string(),
            position: "Clerk".to_string(),
            salary_type: SalaryType::Daily,
        };
        let known_id = known.id;
        let unknown_id = EmployeeId::new();
        let directory = StaticDirectory::new(vec![known]);

        let mut svc = service();
        let ctx = ctx_on(date(2025, 2, 1));
        let outcome = svc
            .bulk_assign(
                AdjustmentKind::Deduction(DeductionType::Insurance),
                data(dec!(250), date(2025, 2, 1)),
                BulkSelector::Ids(vec![known_id, unknown_id]),
                &directory,
                &ctx,
            )
            .unwrap();

        assert_eq!(outcome.applied, vec![known_id]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].employee_id, unknown_id);
        assert!(matches!(
            outcome.failures[0].error,
            AdjustmentError::EmployeeNotFound(_)
        ));
    }

    #[test]
    fn test_bulk_assign_rejects_bad_amount_up_front() {
        let directory = StaticDirectory::default();
        let mut svc = service();
        let ctx = ctx_on(date(2025, 2, 1));

        let err = svc
            .bulk_assign(
                AdjustmentKind::Allowance(AllowanceType::Clothing),
                data(dec!(-5), date(2025, 2, 1)),
                BulkSelector::Ids(vec![EmployeeId::new()]),
                &directory,
                &ctx,
            )
            .unwrap_err();
        assert!(matches!(err, AdjustmentError::NonPositiveAmount));
    }
}
