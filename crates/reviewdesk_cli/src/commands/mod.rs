pub mod employee;
pub mod review;
pub mod schema;
