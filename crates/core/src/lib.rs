//! Core payroll business logic for Sweldo.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations
//! live here.
//!
//! # Modules
//!
//! - `salary` - Salary profiles with effective-dated history
//! - `catalog` - Reusable pay component definitions and assignments
//! - `adjustment` - Recurring allowances and deductions
//! - `loan` - Loan origination, amortization, and balance advancement
//! - `payroll` - Period orchestration and per-employee calculation
//! - `attendance` - Port for the external timekeeping collaborator
//! - `audit` - Port for the audit/event sink
//! - `directory` - Port for the read-only employee directory
//! - `temporal` - Shared append-only effective-dated record store
//! - `context` - Explicit ambient state (clock, acting user)

pub mod adjustment;
pub mod attendance;
pub mod audit;
pub mod catalog;
pub mod context;
pub mod directory;
pub mod loan;
pub mod payroll;
pub mod salary;
pub mod temporal;
