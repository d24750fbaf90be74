//! Employee record consumed by review validation.
//!
//! # Invariants
//! - `name` is non-empty after trimming.
//! - Reviews only ever ask whether an employee exists; they never own one.

use crate::db::DbResult;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned employee row id.
pub type EmployeeId = i64;

/// Read model for one `employees` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub job_title: String,
}

/// Input rejected before an employee row is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmployeeValidationError {
    BlankName,
}

impl Display for EmployeeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "employee name must be a non-empty string"),
        }
    }
}

impl Error for EmployeeValidationError {}

/// Read-only existence check used to validate `Review::employee_id`.
pub trait EmployeeLookup {
    fn employee_exists(&self, employee_id: EmployeeId) -> DbResult<bool>;
}

/// Checks the name rule applied before inserting an employee.
pub fn validate_employee_name(name: &str) -> Result<(), EmployeeValidationError> {
    if name.trim().is_empty() {
        return Err(EmployeeValidationError::BlankName);
    }
    Ok(())
}
