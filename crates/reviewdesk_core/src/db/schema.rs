//! Table definitions for the employee/review store.
//!
//! `reviews.employee_id` references `employees(id)`, so employees must be
//! created first and dropped last.

use super::DbResult;
use log::info;
use rusqlite::Connection;

pub(crate) const CREATE_EMPLOYEES_SQL: &str = "CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY,
    name TEXT,
    job_title TEXT
);";

pub(crate) const DROP_EMPLOYEES_SQL: &str = "DROP TABLE IF EXISTS employees;";

pub(crate) const CREATE_REVIEWS_SQL: &str = "CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY,
    year INTEGER,
    summary TEXT,
    employee_id INTEGER,
    FOREIGN KEY (employee_id) REFERENCES employees(id)
);";

pub(crate) const DROP_REVIEWS_SQL: &str = "DROP TABLE IF EXISTS reviews;";

/// Creates every table the core crate reads or writes.
///
/// Safe to call on every startup.
pub fn bootstrap_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(CREATE_EMPLOYEES_SQL)?;
    conn.execute_batch(CREATE_REVIEWS_SQL)?;
    info!("event=schema_bootstrap module=db status=ok");
    Ok(())
}

/// Returns whether a table with `table_name` exists in the main schema.
pub fn table_exists(conn: &Connection, table_name: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table_name],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
