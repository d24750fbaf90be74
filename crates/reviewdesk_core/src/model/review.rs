//! Review domain model.
//!
//! # Responsibility
//! - Define the in-memory representative of one `reviews` row.
//! - Validate `year`, `summary` and `employee_id` on every assignment.
//!
//! # Invariants
//! - `year >= MIN_REVIEW_YEAR`.
//! - `summary` is non-empty after trimming; the stored value is untrimmed.
//! - `employee_id` referenced an existing employee when it was assigned.
//! - `id` is `None` until the first insert and can only be changed by the
//!   repository.

use crate::db::DbError;
use crate::model::employee::{EmployeeId, EmployeeLookup};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned review row id.
pub type ReviewId = i64;

/// Earliest accepted review year.
pub const MIN_REVIEW_YEAR: i64 = 2000;

/// Field-level validation failure. Raised before any database write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewValidationError {
    YearTooEarly { year: i64 },
    BlankSummary,
    UnknownEmployee { employee_id: EmployeeId },
}

impl Display for ReviewValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YearTooEarly { year } => write!(
                f,
                "review year {year} is invalid; expected an integer >= {MIN_REVIEW_YEAR}"
            ),
            Self::BlankSummary => write!(f, "review summary must be a non-empty string"),
            Self::UnknownEmployee { employee_id } => write!(
                f,
                "employee id {employee_id} does not exist in the employees table"
            ),
        }
    }
}

impl Error for ReviewValidationError {}

/// Lifecycle misuse, e.g. updating a review that was never saved.
/// Raised before any database call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewStateError {
    NotPersisted { action: &'static str },
}

impl Display for ReviewStateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotPersisted { action } => {
                write!(f, "cannot {action} a review that hasn't been saved")
            }
        }
    }
}

impl Error for ReviewStateError {}

pub type ReviewResult<T> = Result<T, ReviewError>;

/// Failure while building or changing a `Review`.
///
/// `Db` only comes from the employee existence check.
#[derive(Debug)]
pub enum ReviewError {
    Validation(ReviewValidationError),
    Db(DbError),
}

impl Display for ReviewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ReviewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<ReviewValidationError> for ReviewError {
    fn from(value: ReviewValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for ReviewError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

/// One employee review, either transient (`id == None`) or persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Review {
    id: Option<ReviewId>,
    year: i64,
    summary: String,
    employee_id: EmployeeId,
}

impl Review {
    /// Builds a transient review after validating every field.
    ///
    /// # Errors
    /// - `ReviewError::Validation` for a bad year, blank summary or unknown
    ///   employee.
    /// - `ReviewError::Db` when the employee lookup itself fails.
    pub fn new<L>(
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
        employees: &L,
    ) -> ReviewResult<Self>
    where
        L: EmployeeLookup + ?Sized,
    {
        Self::build(None, year, summary.into(), employee_id, employees)
    }

    /// Builds a review that already carries a storage id.
    ///
    /// Used when reconstructing rows; runs the same validation as `new`.
    pub fn with_id<L>(
        id: ReviewId,
        year: i64,
        summary: impl Into<String>,
        employee_id: EmployeeId,
        employees: &L,
    ) -> ReviewResult<Self>
    where
        L: EmployeeLookup + ?Sized,
    {
        Self::build(Some(id), year, summary.into(), employee_id, employees)
    }

    fn build<L>(
        id: Option<ReviewId>,
        year: i64,
        summary: String,
        employee_id: EmployeeId,
        employees: &L,
    ) -> ReviewResult<Self>
    where
        L: EmployeeLookup + ?Sized,
    {
        validate_year(year)?;
        validate_summary(&summary)?;
        validate_employee_id(employee_id, employees)?;
        Ok(Self {
            id,
            year,
            summary,
            employee_id,
        })
    }

    pub fn id(&self) -> Option<ReviewId> {
        self.id
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    /// Returns whether this review has been inserted and not deleted since.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Replaces `year`; the old value is kept on failure.
    pub fn set_year(&mut self, year: i64) -> Result<(), ReviewValidationError> {
        validate_year(year)?;
        self.year = year;
        Ok(())
    }

    /// Replaces `summary`; the old value is kept on failure.
    pub fn set_summary(&mut self, summary: impl Into<String>) -> Result<(), ReviewValidationError> {
        let summary = summary.into();
        validate_summary(&summary)?;
        self.summary = summary;
        Ok(())
    }

    /// Replaces `employee_id` after checking it against `employees`.
    pub fn set_employee_id<L>(&mut self, employee_id: EmployeeId, employees: &L) -> ReviewResult<()>
    where
        L: EmployeeLookup + ?Sized,
    {
        validate_employee_id(employee_id, employees)?;
        self.employee_id = employee_id;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: ReviewId) {
        self.id = Some(id);
    }

    pub(crate) fn clear_id(&mut self) {
        self.id = None;
    }
}

impl Display for Review {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Review {id}: ")?,
            None => write!(f, "<Review None: ")?,
        }
        write!(
            f,
            "{}, {}, Employee: {}>",
            self.year, self.summary, self.employee_id
        )
    }
}

/// Checks the year rule shared by construction and `set_year`.
pub fn validate_year(year: i64) -> Result<(), ReviewValidationError> {
    if year < MIN_REVIEW_YEAR {
        return Err(ReviewValidationError::YearTooEarly { year });
    }
    Ok(())
}

/// Checks the summary rule shared by construction and `set_summary`.
pub fn validate_summary(summary: &str) -> Result<(), ReviewValidationError> {
    if summary.trim().is_empty() {
        return Err(ReviewValidationError::BlankSummary);
    }
    Ok(())
}

fn validate_employee_id<L>(employee_id: EmployeeId, employees: &L) -> ReviewResult<()>
where
    L: EmployeeLookup + ?Sized,
{
    if !employees.employee_exists(employee_id)? {
        return Err(ReviewValidationError::UnknownEmployee { employee_id }.into());
    }
    Ok(())
}
