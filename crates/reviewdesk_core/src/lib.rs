//! Core domain logic for reviewdesk.
//! This crate owns review validation, persistence and the employee lookup.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{bootstrap_schema, open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings, LoggingError};
pub use model::employee::{Employee, EmployeeId, EmployeeLookup, EmployeeValidationError};
pub use model::review::{
    Review, ReviewError, ReviewId, ReviewResult, ReviewStateError, ReviewValidationError,
    MIN_REVIEW_YEAR,
};
pub use repo::employee_repo::SqliteEmployeeRepository;
pub use repo::review_repo::{RepoError, RepoResult, ReviewRepository, SqliteReviewRepository};
pub use service::review_service::{ReviewRevision, ReviewService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
