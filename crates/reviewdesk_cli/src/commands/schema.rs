//! Table administration commands
//!
//! Usage: reviewdesk init | reviewdesk reset

use reviewdesk_core::db::bootstrap_schema;
use reviewdesk_core::{ReviewRepository, SqliteEmployeeRepository, SqliteReviewRepository};
use rusqlite::Connection;
use std::error::Error;
use std::io::Write;

/// Creates missing tables.
pub fn init(conn: &Connection, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    bootstrap_schema(conn)?;
    writeln!(out, "Tables ready")?;
    Ok(())
}

/// Drops reviews, then employees, then recreates both.
pub fn reset(conn: &Connection, out: &mut impl Write) -> Result<(), Box<dyn Error>> {
    SqliteReviewRepository::new(conn).drop_table()?;
    SqliteEmployeeRepository::new(conn).drop_table()?;
    bootstrap_schema(conn)?;
    writeln!(out, "Tables recreated")?;
    Ok(())
}
