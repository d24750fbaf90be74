//! Employee commands
//!
//! Usage: reviewdesk employee add <NAME> <JOB_TITLE> | reviewdesk employee show <ID>

use clap::{Args, Subcommand};
use reviewdesk_core::SqliteEmployeeRepository;
use rusqlite::Connection;
use std::error::Error;
use std::io::Write;

#[derive(Debug, Args)]
pub struct EmployeeArgs {
    #[command(subcommand)]
    pub command: EmployeeCommand,
}

#[derive(Debug, Subcommand)]
pub enum EmployeeCommand {
    /// Add an employee that reviews can reference
    Add(AddArgs),
    /// Show one employee
    Show(ShowArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub name: String,
    pub job_title: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub id: i64,
}

/// Execute employee command
pub fn execute(
    args: EmployeeArgs,
    conn: &Connection,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let employees = SqliteEmployeeRepository::new(conn);
    match args.command {
        EmployeeCommand::Add(add) => {
            let employee = employees.insert_employee(&add.name, &add.job_title)?;
            writeln!(
                out,
                "Added employee {}: {}, {}",
                employee.id, employee.name, employee.job_title
            )?;
        }
        EmployeeCommand::Show(show) => {
            let employee = employees
                .get_employee(show.id)?
                .ok_or_else(|| format!("employee not found: {}", show.id))?;
            writeln!(
                out,
                "Employee {}: {}, {}",
                employee.id, employee.name, employee.job_title
            )?;
        }
    }
    Ok(())
}
