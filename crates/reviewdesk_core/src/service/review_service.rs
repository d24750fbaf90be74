//! Review use-case service.
//!
//! # Responsibility
//! - Provide id-based entry points over the review lifecycle.
//! - Apply partial revisions through the validating setters.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::employee::{EmployeeId, EmployeeLookup};
use crate::model::review::{Review, ReviewId};
use crate::repo::review_repo::{RepoError, RepoResult, ReviewRepository};

/// Partial field changes for `ReviewService::revise_review`.
///
/// `None` leaves the current value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewRevision {
    pub year: Option<i64>,
    pub summary: Option<String>,
    pub employee_id: Option<EmployeeId>,
}

impl ReviewRevision {
    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.summary.is_none() && self.employee_id.is_none()
    }
}

/// Use-case service wrapper for review CRUD operations.
pub struct ReviewService<R: ReviewRepository, E: EmployeeLookup> {
    repo: R,
    employees: E,
}

impl<R: ReviewRepository, E: EmployeeLookup> ReviewService<R, E> {
    /// Creates a service over a review repository and an employee lookup
    /// used for revisions that move a review to another employee.
    pub fn new(repo: R, employees: E) -> Self {
        Self { repo, employees }
    }

    /// Gives access to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn create_review(
        &mut self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<Review> {
        self.repo.create(year, summary, employee_id)
    }

    pub fn get_review(&mut self, id: ReviewId) -> RepoResult<Option<Review>> {
        self.repo.find_by_id(id)
    }

    pub fn list_reviews(&mut self) -> RepoResult<Vec<Review>> {
        self.repo.get_all()
    }

    pub fn list_employee_reviews(&mut self, employee_id: EmployeeId) -> RepoResult<Vec<Review>> {
        self.repo.find_by_employee(employee_id)
    }

    /// Applies `revision` to the stored review and persists it.
    ///
    /// # Contract
    /// - Returns `NotFound` when no row has `id`.
    /// - All fields are validated before the update is issued; a single
    ///   invalid field leaves the stored row untouched.
    pub fn revise_review(&mut self, id: ReviewId, revision: &ReviewRevision) -> RepoResult<Review> {
        let mut review = self.repo.find_by_id(id)?.ok_or(RepoError::NotFound(id))?;

        if let Some(year) = revision.year {
            review.set_year(year)?;
        }
        if let Some(summary) = &revision.summary {
            review.set_summary(summary.as_str())?;
        }
        if let Some(employee_id) = revision.employee_id {
            review.set_employee_id(employee_id, &self.employees)?;
        }

        self.repo.update(&mut review)?;
        Ok(review)
    }

    /// Deletes the review stored under `id` and returns its last state.
    pub fn delete_review(&mut self, id: ReviewId) -> RepoResult<Review> {
        let mut review = self.repo.find_by_id(id)?.ok_or(RepoError::NotFound(id))?;
        self.repo.delete(&mut review)?;
        Ok(review)
    }
}
