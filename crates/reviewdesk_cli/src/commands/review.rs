//! Review commands
//!
//! Usage:
//!   reviewdesk review add <YEAR> <SUMMARY> <EMPLOYEE_ID>
//!   reviewdesk review show <ID>
//!   reviewdesk review list [--employee <ID>] [--json]
//!   reviewdesk review update <ID> [--year <YEAR>] [--summary <TEXT>] [--employee <ID>]
//!   reviewdesk review delete <ID>

use clap::{Args, Subcommand};
use reviewdesk_core::{
    RepoError, Review, ReviewRevision, ReviewService, SqliteEmployeeRepository,
    SqliteReviewRepository,
};
use rusqlite::Connection;
use std::error::Error;
use std::io::Write;

#[derive(Debug, Args)]
pub struct ReviewArgs {
    #[command(subcommand)]
    pub command: ReviewCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReviewCommand {
    /// Create and save a review
    Add(AddArgs),
    /// Show one review
    Show(IdArgs),
    /// List reviews ordered by id
    List(ListArgs),
    /// Change fields of a saved review
    Update(UpdateArgs),
    /// Delete a review
    Delete(IdArgs),
}

#[derive(Debug, Args)]
pub struct AddArgs {
    pub year: i64,
    pub summary: String,
    pub employee_id: i64,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    pub id: i64,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Only reviews written for this employee
    #[arg(long)]
    pub employee: Option<i64>,

    /// Print JSON instead of one line per review
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    pub id: i64,

    #[arg(long)]
    pub year: Option<i64>,

    #[arg(long)]
    pub summary: Option<String>,

    /// Move the review to another employee
    #[arg(long)]
    pub employee: Option<i64>,
}

impl UpdateArgs {
    fn revision(&self) -> ReviewRevision {
        ReviewRevision {
            year: self.year,
            summary: self.summary.clone(),
            employee_id: self.employee,
        }
    }
}

/// Execute review command
pub fn execute(
    args: ReviewArgs,
    conn: &Connection,
    out: &mut impl Write,
) -> Result<(), Box<dyn Error>> {
    let mut service = ReviewService::new(
        SqliteReviewRepository::new(conn),
        SqliteEmployeeRepository::new(conn),
    );

    match args.command {
        ReviewCommand::Add(add) => {
            let review = service.create_review(add.year, &add.summary, add.employee_id)?;
            writeln!(out, "Created {review}")?;
        }
        ReviewCommand::Show(show) => {
            let review = service
                .get_review(show.id)?
                .ok_or(RepoError::NotFound(show.id))?;
            writeln!(out, "{review}")?;
        }
        ReviewCommand::List(list) => {
            let reviews = match list.employee {
                Some(employee_id) => service.list_employee_reviews(employee_id)?,
                None => service.list_reviews()?,
            };
            print_reviews(out, &reviews, list.json)?;
        }
        ReviewCommand::Update(update) => {
            let revision = update.revision();
            if revision.is_empty() {
                return Err("nothing to update; pass --year, --summary or --employee".into());
            }
            let review = service.revise_review(update.id, &revision)?;
            writeln!(out, "Updated {review}")?;
        }
        ReviewCommand::Delete(delete) => {
            service.delete_review(delete.id)?;
            writeln!(out, "Deleted review {}", delete.id)?;
        }
    }

    Ok(())
}

fn print_reviews(
    out: &mut impl Write,
    reviews: &[Review],
    json: bool,
) -> Result<(), Box<dyn Error>> {
    if json {
        serde_json::to_writer_pretty(&mut *out, reviews)?;
        writeln!(out)?;
        return Ok(());
    }

    if reviews.is_empty() {
        writeln!(out, "No reviews")?;
    }
    for review in reviews {
        writeln!(out, "{review}")?;
    }
    Ok(())
}
