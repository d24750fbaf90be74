//! Domain model for employee performance reviews.
//!
//! # Responsibility
//! - Define the canonical records used by core business logic.
//! - Own the field validation shared by construction and updates.
//!
//! # Invariants
//! - A `Review` never holds an unvalidated business field.
//! - Review identity (`id`) is assigned by storage, never by callers.

pub mod employee;
pub mod review;
