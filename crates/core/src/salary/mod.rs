//! Salary profiles with effective-dated history.
//!
//! A profile owns everything about how an employee is paid: salary type
//! and rates, tax status, government IDs, bank details, benefit flags.
//! Pay-affecting edits supersede rather than mutate, so back-pay history
//! is always reconstructable.

pub mod error;
pub mod service;
pub mod types;
pub mod validation;

pub use error::SalaryError;
pub use service::SalaryProfileService;
pub use types::{
    BankDetails, BenefitFlags, CreateProfileInput, GovernmentIds, PaymentMethod, ProfileData,
    SalaryProfile, SalaryType, TaxStatus,
};
pub use validation::{sss_salary_credit, validate_government_ids};
