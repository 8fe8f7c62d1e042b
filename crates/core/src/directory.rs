//! Port for the read-only employee directory collaborator.

use serde::{Deserialize, Serialize};
use sweldo_shared::types::EmployeeId;

use crate::salary::SalaryType;

/// Directory view of one employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Employee ID.
    pub id: EmployeeId,
    /// Department name.
    pub department: String,
    /// Position title.
    pub position: String,
    /// Salary type on record.
    pub salary_type: SalaryType,
}

/// Declarative employee filter; all present criteria must match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeFilter {
    /// Match on department, if set.
    pub department: Option<String>,
    /// Match on position, if set.
    pub position: Option<String>,
    /// Match on salary type, if set.
    pub salary_type: Option<SalaryType>,
}

impl EmployeeFilter {
    /// True if the record satisfies every present criterion.
    #[must_use]
    pub fn matches(&self, record: &EmployeeRecord) -> bool {
        self.department.as_ref().is_none_or(|d| *d == record.department)
            && self.position.as_ref().is_none_or(|p| *p == record.position)
            && self.salary_type.is_none_or(|t| t == record.salary_type)
    }
}

/// Port for the employee directory.
pub trait EmployeeDirectory {
    /// Looks up one employee.
    fn find(&self, id: EmployeeId) -> Option<EmployeeRecord>;

    /// Resolves a filter to the matching employee IDs.
    fn search(&self, filter: &EmployeeFilter) -> Vec<EmployeeId>;

    /// True if the employee exists.
    fn exists(&self, id: EmployeeId) -> bool {
        self.find(id).is_some()
    }
}

/// Directory backed by a fixed record list.
#[derive(Debug, Default, Clone)]
pub struct StaticDirectory {
    records: Vec<EmployeeRecord>,
}

impl StaticDirectory {
    /// Creates a directory over the given records.
    #[must_use]
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }
}

impl EmployeeDirectory for StaticDirectory {
    fn find(&self, id: EmployeeId) -> Option<EmployeeRecord> {
        self.records.iter().find(|r| r.id == id).cloned()
    }

    fn search(&self, filter: &EmployeeFilter) -> Vec<EmployeeId> {
        self.records
            .iter()
            .filter(|r| filter.matches(r))
            .map(|r| r.id)
            .collect()
    }
}
