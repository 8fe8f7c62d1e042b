//! Component catalog error types.

use sweldo_shared::types::ComponentId;
use sweldo_shared::ErrorClass;
use thiserror::Error;

/// Errors from component catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Component codes must be unique.
    #[error("Component code already exists: {0}")]
    DuplicateCode(String),

    /// Component not found.
    #[error("Component not found: {0}")]
    ComponentNotFound(ComponentId),

    /// System components are permanent and read-only.
    #[error("System component {0} cannot be modified or deleted")]
    SystemComponentImmutable(String),

    /// A component with active assignments cannot be deleted.
    #[error("Component {code} is assigned to {assignments} employee(s) and cannot be deleted")]
    ComponentInUse {
        /// The component's code.
        code: String,
        /// Number of active assignments blocking the delete.
        assignments: usize,
    },

    /// Assignment amount must be positive.
    #[error("Assignment amount must be positive")]
    NonPositiveAmount,

    /// An inactive component cannot be newly assigned.
    #[error("Component {0} is inactive")]
    ComponentInactive(String),

    /// No current assignment exists for the (employee, component) pair.
    #[error("No active assignment of component {0} for this employee")]
    AssignmentNotFound(ComponentId),
}

impl CatalogError {
    /// Returns the stable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::DuplicateCode(_) => "DUPLICATE_COMPONENT_CODE",
            Self::ComponentNotFound(_) => "COMPONENT_NOT_FOUND",
            Self::SystemComponentImmutable(_) => "SYSTEM_COMPONENT_IMMUTABLE",
            Self::ComponentInUse { .. } => "COMPONENT_IN_USE",
            Self::NonPositiveAmount => "NON_POSITIVE_AMOUNT",
            Self::ComponentInactive(_) => "COMPONENT_INACTIVE",
            Self::AssignmentNotFound(_) => "ASSIGNMENT_NOT_FOUND",
        }
    }

    /// Coarse classification used by callers for handling policy.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::DuplicateCode(_) | Self::NonPositiveAmount => ErrorClass::Validation,
            Self::ComponentNotFound(_) | Self::AssignmentNotFound(_) => ErrorClass::NotFound,
            Self::SystemComponentImmutable(_)
            | Self::ComponentInUse { .. }
            | Self::ComponentInactive(_) => ErrorClass::State,
        }
    }
}
