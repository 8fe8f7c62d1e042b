//! The error taxonomy shared by all domain errors.

use serde::{Deserialize, Serialize};

/// Classification of a domain error.
///
/// Every domain error enum maps its variants into exactly one class via
/// a `class()` method, so callers can react to the kind of failure without
/// matching on module-specific variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorClass {
    /// Malformed input: bad government-number formats, non-positive
    /// amounts, unknown enum values. Blocks the write before any state
    /// is touched.
    Validation,
    /// A referenced entity (profile, loan, component, employee) does not
    /// exist.
    NotFound,
    /// A loan-type requirement is unmet (e.g. SSS loan without an SSS
    /// number on file).
    Eligibility,
    /// The operation conflicts with current state: finalizing with no
    /// calculations, deleting an in-use component, editing a system
    /// component.
    State,
}

impl ErrorClass {
    /// Returns the class as a stable string code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION",
            Self::NotFound => "NOT_FOUND",
            Self::Eligibility => "ELIGIBILITY",
            Self::State => "STATE",
        }
    }
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
