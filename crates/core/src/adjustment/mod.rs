//! Recurring allowances and deductions applied every payroll period.

pub mod error;
pub mod service;
pub mod types;

pub use error::AdjustmentError;
pub use service::RecurringAdjustmentService;
pub use types::{
    AdjustmentData, AdjustmentKind, AllowanceType, BulkFailure, BulkOutcome, BulkSelector,
    DeductionType, RecurringAdjustment,
};
