//! Reusable pay component definitions and per-employee assignments.
//!
//! Definitions are the named earning/deduction building blocks; system
//! definitions are permanent and read-only. Assignments attach a
//! definition to an employee with an amount or percentage, effective
//! dated like every other ledger row.

pub mod error;
pub mod service;
pub mod types;

pub use error::CatalogError;
pub use service::ComponentCatalogService;
pub use types::{
    AssignComponentInput, CalculationMethod, ComponentAssignment, ComponentDefinition,
    ComponentType, CreateComponentInput, Frequency, UpdateComponentInput,
};
