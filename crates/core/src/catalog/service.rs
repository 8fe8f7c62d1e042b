//! Component catalog store and assignment logic.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use sweldo_shared::types::{round_centavos, AssignmentId, ComponentId, EmployeeId};
use tracing::debug;

use crate::audit::{notify, AuditEvent, AuditSink};
use crate::context::EngineContext;
use crate::salary::SalaryProfile;
use crate::temporal::{is_effective_on, Timeline};

use super::error::CatalogError;
use super::types::{
    AssignComponentInput, CalculationMethod, ComponentAssignment, ComponentDefinition,
    ComponentType, CreateComponentInput, Frequency, UpdateComponentInput,
};

/// System components seeded at construction: (code, name, type, method).
const SYSTEM_COMPONENTS: &[(&str, &str, ComponentType, CalculationMethod)] = &[
    ("BASIC", "Basic Pay", ComponentType::Earning, CalculationMethod::Fixed),
    ("OT", "Overtime Pay", ComponentType::Earning, CalculationMethod::PerHour),
    ("SSS_EE", "SSS Contribution", ComponentType::Contribution, CalculationMethod::PercentOfBasic),
    ("PHILHEALTH_EE", "PhilHealth Contribution", ComponentType::Contribution, CalculationMethod::PercentOfBasic),
    ("PAGIBIG_EE", "Pag-IBIG Contribution", ComponentType::Contribution, CalculationMethod::PercentOfBasic),
    ("WTAX", "Withholding Tax", ComponentType::Tax, CalculationMethod::PercentOfGross),
];

/// Owns component definitions and their per-employee assignments.
pub struct ComponentCatalogService {
    components: HashMap<ComponentId, ComponentDefinition>,
    codes: HashMap<String, ComponentId>,
    assignments: HashMap<(EmployeeId, ComponentId), Timeline<ComponentAssignment>>,
    audit: Arc<dyn AuditSink>,
}

impl ComponentCatalogService {
    /// Creates a catalog pre-seeded with the system components.
    #[must_use]
    pub fn new(audit: Arc<dyn AuditSink>) -> Self {
        let mut catalog = Self {
            components: HashMap::new(),
            codes: HashMap::new(),
            assignments: HashMap::new(),
            audit,
        };
        for &(code, name, component_type, method) in SYSTEM_COMPONENTS {
            let id = ComponentId::new();
            catalog.codes.insert(code.to_string(), id);
            catalog.components.insert(
                id,
                ComponentDefinition {
                    id,
                    code: code.to_string(),
                    name: name.to_string(),
                    component_type,
                    category: "statutory".to_string(),
                    method,
                    reference: None,
                    is_system: true,
                    is_active: true,
                },
            );
        }
        catalog
    }

    /// Creates a custom component definition.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateCode` if the code is taken.
    pub fn create_component(
        &mut self,
        input: CreateComponentInput,
        ctx: &EngineContext,
    ) -> Result<ComponentDefinition, CatalogError> {
        if self.codes.contains_key(&input.code) {
            return Err(CatalogError::DuplicateCode(input.code));
        }

        let id = ComponentId::new();
        let definition = ComponentDefinition {
            id,
            code: input.code.clone(),
            name: input.name,
            component_type: input.component_type,
            category: input.category,
            method: input.method,
            reference: input.reference,
            is_system: false,
            is_active: true,
        };
        self.codes.insert(input.code, id);
        self.components.insert(id, definition.clone());

        debug!(code = %definition.code, "component created");
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "component.created")
                .entity(definition.code.clone())
                .detail(json!({ "component_type": definition.component_type })),
        );

        Ok(definition)
    }

    /// Updates a custom component definition.
    ///
    /// # Errors
    ///
    /// System components are read-only (`SystemComponentImmutable`).
    pub fn update_component(
        &mut self,
        id: ComponentId,
        input: UpdateComponentInput,
        ctx: &EngineContext,
    ) -> Result<ComponentDefinition, CatalogError> {
        let definition = self
            .components
            .get_mut(&id)
            .ok_or(CatalogError::ComponentNotFound(id))?;
        if definition.is_system {
            return Err(CatalogError::SystemComponentImmutable(definition.code.clone()));
        }

        if let Some(name) = input.name {
            definition.name = name;
        }
        if let Some(category) = input.category {
            definition.category = category;
        }
        if let Some(method) = input.method {
            definition.method = method;
        }
        if let Some(reference) = input.reference {
            definition.reference = reference;
        }
        if let Some(active) = input.is_active {
            definition.is_active = active;
        }
        let updated = definition.clone();

        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "component.updated").entity(updated.code.clone()),
        );

        Ok(updated)
    }

    /// Deletes a custom component definition.
    ///
    /// # Errors
    ///
    /// Blocked for system components and for components with at least
    /// one active assignment.
    pub fn delete_component(
        &mut self,
        id: ComponentId,
        ctx: &EngineContext,
    ) -> Result<(), CatalogError> {
        let definition = self
            .components
            .get(&id)
            .ok_or(CatalogError::ComponentNotFound(id))?;
        if definition.is_system {
            return Err(CatalogError::SystemComponentImmutable(definition.code.clone()));
        }

        let active_assignments = self
            .assignments
            .iter()
            .filter(|((_, component), timeline)| *component == id && timeline.current().is_some())
            .count();
        if active_assignments > 0 {
            return Err(CatalogError::ComponentInUse {
                code: definition.code.clone(),
                assignments: active_assignments,
            });
        }

        let code = definition.code.clone();
        self.codes.remove(&code);
        self.components.remove(&id);

        debug!(code = %code, "component deleted");
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "component.deleted").entity(code),
        );

        Ok(())
    }

    /// Assigns a component to an employee, upserting by effective date.
    ///
    /// Same effective date as the current assignment updates it in
    /// place; a new date inserts a new effective-dated row, superseding
    /// the prior one.
    pub fn assign_component(
        &mut self,
        employee: EmployeeId,
        component: ComponentId,
        input: AssignComponentInput,
        ctx: &EngineContext,
    ) -> Result<ComponentAssignment, CatalogError> {
        let definition = self
            .components
            .get(&component)
            .ok_or(CatalogError::ComponentNotFound(component))?;
        if !definition.is_active {
            return Err(CatalogError::ComponentInactive(definition.code.clone()));
        }
        if input.amount <= Decimal::ZERO && input.percentage.is_none() {
            return Err(CatalogError::NonPositiveAmount);
        }

        let timeline = self.assignments.entry((employee, component)).or_default();

        // Upsert: same effective date edits the current row in place
        if let Some(current) = timeline.current_mut() {
            if current.effective_date == input.effective_date {
                current.amount = input.amount;
                current.percentage = input.percentage;
                current.frequency = input.frequency;
                let updated = current.clone();
                notify(
                    self.audit.as_ref(),
                    &AuditEvent::info(ctx.actor, "component.assignment_updated")
                        .employee(employee)
                        .entity(updated.id.to_string()),
                );
                return Ok(updated);
            }
        }

        let assignment = ComponentAssignment {
            id: AssignmentId::new(),
            employee,
            component,
            amount: input.amount,
            percentage: input.percentage,
            frequency: input.frequency,
            effective_date: input.effective_date,
            end_date: None,
            is_active: true,
        };
        timeline.supersede(assignment.clone());

        debug!(employee = %employee, component = %component, "component assigned");
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "component.assigned")
                .employee(employee)
                .entity(assignment.id.to_string())
                .detail(json!({ "amount": assignment.amount })),
        );

        Ok(assignment)
    }

    /// Soft-closes the employee's current assignment of a component.
    pub fn unassign_component(
        &mut self,
        employee: EmployeeId,
        component: ComponentId,
        ctx: &EngineContext,
    ) -> Result<(), CatalogError> {
        let timeline = self
            .assignments
            .get_mut(&(employee, component))
            .ok_or(CatalogError::AssignmentNotFound(component))?;
        if !timeline.close_current(ctx.today) {
            return Err(CatalogError::AssignmentNotFound(component));
        }
        notify(
            self.audit.as_ref(),
            &AuditEvent::info(ctx.actor, "component.unassigned").employee(employee),
        );
        Ok(())
    }

    /// Looks up a definition by code.
    #[must_use]
    pub fn component_by_code(&self, code: &str) -> Option<&ComponentDefinition> {
        self.codes.get(code).and_then(|id| self.components.get(id))
    }

    /// Assignments effective for the employee as of `today`.
    #[must_use]
    pub fn active_assignments(
        &self,
        employee: EmployeeId,
        today: NaiveDate,
    ) -> Vec<&ComponentAssignment> {
        self.assignments
            .iter()
            .filter(|((emp, _), _)| *emp == employee)
            .flat_map(|(_, timeline)| timeline.history())
            .filter(|assignment| is_effective_on(*assignment, today))
            .collect()
    }

    /// Total of the employee's active assignment amounts, with
    /// percentage methods resolved against the salary profile.
    ///
    /// `PercentOfBasic` resolves against basic salary;
    /// `PercentOfComponent` against the referenced component's current
    /// assigned amount (falling back to the row's own amount when the
    /// reference is unassigned); all other methods contribute the row's
    /// flat amount.
    #[must_use]
    pub fn assignment_total(
        &self,
        employee: EmployeeId,
        profile: &SalaryProfile,
        today: NaiveDate,
    ) -> Decimal {
        let total = self
            .active_assignments(employee, today)
            .iter()
            .map(|assignment| self.resolve_amount(employee, assignment, profile, today))
            .sum();
        round_centavos(total)
    }

    fn resolve_amount(
        &self,
        employee: EmployeeId,
        assignment: &ComponentAssignment,
        profile: &SalaryProfile,
        today: NaiveDate,
    ) -> Decimal {
        let Some(definition) = self.components.get(&assignment.component) else {
            return assignment.amount;
        };
        let percent = assignment.percentage.unwrap_or(Decimal::ZERO) / Decimal::ONE_HUNDRED;
        match definition.method {
            CalculationMethod::PercentOfBasic => profile.basic_salary * percent,
            CalculationMethod::PercentOfComponent => definition
                .reference
                .and_then(|target| {
                    self.assignments
                        .get(&(employee, target))
                        .and_then(Timeline::current)
                        .filter(|row| is_effective_on(*row, today))
                        .map(|row| row.amount * percent)
                })
                .unwrap_or(assignment.amount),
            _ => assignment.amount,
        }
    }
}
