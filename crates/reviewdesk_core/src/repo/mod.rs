//! Repository layer contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repositories borrow a caller-owned connection; none open their own.
//! - Repository APIs return semantic errors (`NotFound`, `State`) in
//!   addition to DB transport errors.

pub mod employee_repo;
pub mod review_repo;
