//! Salary profile store and lifecycle logic.

use std::collections::HashMap;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use sweldo_shared::config::WorkScheduleConfig;
use sweldo_shared::types::{round_centavos, EmployeeId, SalaryProfileId};
use tracing::{debug, warn};

use crate::audit::{notify, AuditEvent, AuditSink};
use crate::context::EngineContext;
use crate::temporal::Timeline;

use super::error::SalaryError;
use super::types::{CreateProfileInput, ProfileData, SalaryProfile, SalaryType};
use super::validation::{sss_salary_credit, validate_government_ids};

/// Owns each employee's current and historical salary setup.
pub struct SalaryProfileService {
    profiles: HashMap<EmployeeId, Timeline<SalaryProfile>>,
    schedule: WorkScheduleConfig,
    audit: Arc<dyn AuditSink>,
}

impl SalaryProfileService {
    /// Creates an empty store.
    #[must_use]
    pub fn new(schedule: WorkScheduleConfig, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            profiles: HashMap::new(),
            schedule,
            audit,
        }
    }

    /// Creates a new salary profile for an employee.
    ///
    /// Validates government-number formats and amounts, derives the
    /// daily and hourly rates for monthly salaries when not supplied,
    /// classifies the SSS bracket, and deactivates any currently active
    /// profile before inserting the new one. Validation failures block
    /// the write entirely.
    pub fn create_profile(
        &mut self,
        input: CreateProfileInput,
        ctx: &EngineContext,
    ) -> Result<SalaryProfile, SalaryError> {
        let (daily_rate, hourly_rate) = self.validate_and_resolve_rates(&input.data)?;

        let profile = SalaryProfile {
            id: SalaryProfileId::new(),
            employee: input.employee,
            salary_type: input.data.salary_type,
            basic_salary: input.data.basic_salary,
            daily_rate,
            hourly_rate,
            payment_method: input.data.payment_method,
            tax_status: input.data.tax_status,
            sss_salary_credit: sss_salary_credit(input.data.basic_salary),
            government: input.data.government,
            pagibig_rate: input.data.pagibig_rate,
            bank: input.data.bank,
            benefits: input.data.benefits,
            effective_date: input.effective_date,
            end_date: None,
            is_active: true,
            created_at: ctx.now,
        };

        let timeline = self.profiles.entry(input.employee).or_default();
        let superseded = timeline.current().is_some();
        timeline.supersede(profile.clone());

        debug!(employee = %input.employee, superseded, "salary profile created");
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "salary_profile.created")
                .employee(input.employee)
                .entity(profile.id.to_string())
                .detail(json!({
                    "basic_salary": profile.basic_salary,
                    "salary_type": profile.salary_type,
                    "superseded_prior": superseded,
                })),
        );

        Ok(profile)
    }

    /// Updates the employee's active profile.
    ///
    /// If any of basic salary, daily rate, hourly rate, or salary type
    /// change, the update is a supersession: the current row is closed
    /// with `end_date = today` and a new row is inserted, preserving
    /// audit and back-pay history. Otherwise fields are mutated in
    /// place.
    pub fn update_profile(
        &mut self,
        employee: EmployeeId,
        data: ProfileData,
        ctx: &EngineContext,
    ) -> Result<SalaryProfile, SalaryError> {
        let (daily_rate, hourly_rate) = self.validate_and_resolve_rates(&data)?;

        let timeline = self
            .profiles
            .get_mut(&employee)
            .ok_or(SalaryError::NoActiveProfile(employee))?;
        let current = timeline
            .current()
            .ok_or(SalaryError::NoActiveProfile(employee))?;

        if current.pay_fields_differ(data.salary_type, data.basic_salary, daily_rate, hourly_rate) {
            let replacement = SalaryProfile {
                id: SalaryProfileId::new(),
                employee,
                salary_type: data.salary_type,
                basic_salary: data.basic_salary,
                daily_rate,
                hourly_rate,
                payment_method: data.payment_method,
                tax_status: data.tax_status,
                sss_salary_credit: sss_salary_credit(data.basic_salary),
                government: data.government,
                pagibig_rate: data.pagibig_rate,
                bank: data.bank,
                benefits: data.benefits,
                effective_date: ctx.today,
                end_date: None,
                is_active: true,
                created_at: ctx.now,
            };
            timeline.supersede(replacement.clone());

            debug!(employee = %employee, "salary profile superseded");
            notify(
                self.audit.as_ref(),
                &AuditEvent::info(ctx.actor, "salary_profile.superseded")
                    .employee(employee)
                    .entity(replacement.id.to_string())
                    .detail(json!({ "basic_salary": replacement.basic_salary })),
            );
            return Ok(replacement);
        }

        // Cosmetic edit: mutate in place, no new row
        let current = timeline
            .current_mut()
            .ok_or(SalaryError::NoActiveProfile(employee))?;
        current.payment_method = data.payment_method;
        current.tax_status = data.tax_status;
        current.government = data.government;
        current.pagibig_rate = data.pagibig_rate;
        current.bank = data.bank;
        current.benefits = data.benefits;
        let updated = current.clone();

        debug!(employee = %employee, "salary profile updated in place");
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "salary_profile.updated")
                .employee(employee)
                .entity(updated.id.to_string())
                .detail(json!({ "in_place": true })),
        );

        Ok(updated)
    }

    /// The employee's active profile.
    ///
    /// # Errors
    ///
    /// Returns `SalaryError::NoActiveProfile` if none is configured.
    pub fn get_active_profile(&self, employee: EmployeeId) -> Result<&SalaryProfile, SalaryError> {
        self.profiles
            .get(&employee)
            .and_then(Timeline::current)
            .ok_or_else(|| {
                warn!(employee = %employee, "no active salary profile");
                SalaryError::NoActiveProfile(employee)
            })
    }

    /// Full profile history for an employee, oldest first.
    #[must_use]
    pub fn history(&self, employee: EmployeeId) -> &[SalaryProfile] {
        self.profiles
            .get(&employee)
            .map_or(&[], |timeline| timeline.history())
    }

    /// Checks the store invariant: each employee has at most one open
    /// active profile.
    #[must_use]
    pub fn invariant_holds(&self) -> bool {
        self.profiles.values().all(Timeline::invariant_holds)
    }

    fn validate_and_resolve_rates(
        &self,
        data: &ProfileData,
    ) -> Result<(Decimal, Decimal), SalaryError> {
        if data.basic_salary <= Decimal::ZERO {
            return Err(SalaryError::NonPositiveSalary);
        }
        for (rate, name) in [(data.daily_rate, "daily_rate"), (data.hourly_rate, "hourly_rate")] {
            if rate.is_some_and(|r| r <= Decimal::ZERO) {
                return Err(SalaryError::NonPositiveRate { rate: name });
            }
        }
        validate_government_ids(&data.government)?;

        let daily = match (data.salary_type, data.daily_rate) {
            (_, Some(rate)) => rate,
            (SalaryType::Monthly, None) => {
                round_centavos(data.basic_salary / self.schedule.working_days_per_month)
            }
            _ => Decimal::ZERO,
        };
        let hourly = match (data.salary_type, data.hourly_rate) {
            (_, Some(rate)) => rate,
            (SalaryType::Monthly, None) => round_centavos(daily / self.schedule.hours_per_day),
            _ => Decimal::ZERO,
        };
        Ok((daily, hourly))
    }
}
