//! SQLite implementation of the employee lookup.
//!
//! # Responsibility
//! - Answer "does this employee exist" for review validation.
//! - Provide minimal table administration and seeding for `employees`.
//!
//! # Invariants
//! - The review repository only ever calls `employee_exists`.

use crate::db::schema::{CREATE_EMPLOYEES_SQL, DROP_EMPLOYEES_SQL};
use crate::db::DbResult;
use crate::model::employee::{validate_employee_name, Employee, EmployeeId, EmployeeLookup};
use crate::repo::review_repo::RepoResult;
use log::info;
use rusqlite::{params, Connection, OptionalExtension};

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    pub fn create_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(CREATE_EMPLOYEES_SQL)?;
        Ok(())
    }

    /// Drops `employees`. Fails while review rows still reference it and
    /// foreign keys are enforced.
    pub fn drop_table(&self) -> RepoResult<()> {
        self.conn.execute_batch(DROP_EMPLOYEES_SQL)?;
        Ok(())
    }

    /// Inserts one employee and returns the stored record.
    pub fn insert_employee(&self, name: &str, job_title: &str) -> RepoResult<Employee> {
        validate_employee_name(name)?;

        self.conn.execute(
            "INSERT INTO employees (name, job_title) VALUES (?1, ?2);",
            params![name, job_title],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("event=employee_insert module=repo status=ok employee_id={id}");

        Ok(Employee {
            id,
            name: name.to_string(),
            job_title: job_title.to_string(),
        })
    }

    pub fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let employee = self
            .conn
            .query_row(
                "SELECT id, name, job_title FROM employees WHERE id = ?1;",
                [id],
                |row| {
                    Ok(Employee {
                        id: row.get("id")?,
                        name: row.get::<_, Option<String>>("name")?.unwrap_or_default(),
                        job_title: row
                            .get::<_, Option<String>>("job_title")?
                            .unwrap_or_default(),
                    })
                },
            )
            .optional()?;
        Ok(employee)
    }
}

impl EmployeeLookup for SqliteEmployeeRepository<'_> {
    fn employee_exists(&self, employee_id: EmployeeId) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM employees WHERE id = ?1;",
            [employee_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}
