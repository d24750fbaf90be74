//! Review repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the review lifecycle (create/save/update/delete) over the
//!   `reviews` table.
//! - Keep an identity map of reviews saved or fetched through this
//!   repository instance.
//!
//! # Invariants
//! - Every statement runs in SQLite autocommit mode, so each call commits
//!   before returning.
//! - `update`/`delete` on a transient review fail before touching SQLite.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - The identity map is never refreshed from external writes.

use crate::db::schema::{CREATE_REVIEWS_SQL, DROP_REVIEWS_SQL};
use crate::db::DbError;
use crate::model::employee::{EmployeeId, EmployeeLookup, EmployeeValidationError};
use crate::model::review::{
    Review, ReviewError, ReviewId, ReviewStateError, ReviewValidationError,
};
use crate::repo::employee_repo::SqliteEmployeeRepository;
use log::info;
use rusqlite::{params, Connection, Params};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const REVIEW_SELECT_SQL: &str = "SELECT
    id,
    year,
    summary,
    employee_id
FROM reviews";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for review/employee persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ReviewValidationError),
    EmployeeValidation(EmployeeValidationError),
    State(ReviewStateError),
    Db(DbError),
    NotFound(ReviewId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::EmployeeValidation(err) => write!(f, "{err}"),
            Self::State(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "review not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::EmployeeValidation(err) => Some(err),
            Self::State(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ReviewValidationError> for RepoError {
    fn from(value: ReviewValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ReviewError> for RepoError {
    fn from(value: ReviewError) -> Self {
        match value {
            ReviewError::Validation(err) => Self::Validation(err),
            ReviewError::Db(err) => Self::Db(err),
        }
    }
}

impl From<EmployeeValidationError> for RepoError {
    fn from(value: EmployeeValidationError) -> Self {
        Self::EmployeeValidation(value)
    }
}

impl From<ReviewStateError> for RepoError {
    fn from(value: ReviewStateError) -> Self {
        Self::State(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the review lifecycle.
pub trait ReviewRepository {
    /// Creates `reviews` if missing.
    fn create_table(&mut self) -> RepoResult<()>;
    /// Drops `reviews` if present and forgets every tracked review.
    fn drop_table(&mut self) -> RepoResult<()>;
    /// Validates fields and returns a transient review. Writes nothing.
    fn new_review(&self, year: i64, summary: &str, employee_id: EmployeeId)
        -> RepoResult<Review>;
    /// Inserts a transient review or updates a persisted one.
    fn save(&mut self, review: &mut Review) -> RepoResult<ReviewId>;
    /// `new_review` followed by `save`.
    fn create(&mut self, year: i64, summary: &str, employee_id: EmployeeId)
        -> RepoResult<Review>;
    fn find_by_id(&mut self, id: ReviewId) -> RepoResult<Option<Review>>;
    /// Lists every review ordered by id.
    fn get_all(&mut self) -> RepoResult<Vec<Review>>;
    /// Lists reviews written for one employee, ordered by id.
    fn find_by_employee(&mut self, employee_id: EmployeeId) -> RepoResult<Vec<Review>>;
    /// Same as `save`, but only for reviews that were already persisted.
    fn update(&mut self, review: &mut Review) -> RepoResult<()>;
    /// Deletes the row and returns `review` to the transient state.
    fn delete(&mut self, review: &mut Review) -> RepoResult<()>;
}

/// SQLite-backed review repository with a session-scoped identity map.
pub struct SqliteReviewRepository<'conn> {
    conn: &'conn Connection,
    identity_map: HashMap<ReviewId, Review>,
}

impl<'conn> SqliteReviewRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            identity_map: HashMap::new(),
        }
    }

    /// Returns the tracked representative for `id`, if this session has
    /// saved or fetched it.
    pub fn tracked(&self, id: ReviewId) -> Option<&Review> {
        self.identity_map.get(&id)
    }

    pub fn tracked_len(&self) -> usize {
        self.identity_map.len()
    }

    fn employees(&self) -> SqliteEmployeeRepository<'conn> {
        SqliteEmployeeRepository::new(self.conn)
    }

    fn track(&mut self, review: &Review) {
        if let Some(id) = review.id() {
            self.identity_map.insert(id, review.clone());
        }
    }

    fn query_reviews<P: Params>(&mut self, sql: &str, params: P) -> RepoResult<Vec<Review>> {
        let conn = self.conn;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, |row| {
                Ok(ReviewRow {
                    id: row.get("id")?,
                    year: row.get("year")?,
                    summary: row.get("summary")?,
                    employee_id: row.get("employee_id")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let employees = self.employees();
        let mut reviews = Vec::with_capacity(rows.len());
        for row in rows {
            let review = row.into_review(&employees)?;
            self.track(&review);
            reviews.push(review);
        }
        Ok(reviews)
    }
}

impl ReviewRepository for SqliteReviewRepository<'_> {
    fn create_table(&mut self) -> RepoResult<()> {
        self.conn.execute_batch(CREATE_REVIEWS_SQL)?;
        Ok(())
    }

    fn drop_table(&mut self) -> RepoResult<()> {
        self.conn.execute_batch(DROP_REVIEWS_SQL)?;
        self.identity_map.clear();
        Ok(())
    }

    fn new_review(
        &self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<Review> {
        Ok(Review::new(year, summary, employee_id, &self.employees())?)
    }

    fn save(&mut self, review: &mut Review) -> RepoResult<ReviewId> {
        let id = match review.id() {
            None => {
                self.conn.execute(
                    "INSERT INTO reviews (year, summary, employee_id)
                     VALUES (?1, ?2, ?3);",
                    params![review.year(), review.summary(), review.employee_id()],
                )?;
                let id = self.conn.last_insert_rowid();
                review.assign_id(id);
                info!("event=review_insert module=repo status=ok review_id={id}");
                id
            }
            Some(id) => {
                let changed = self.conn.execute(
                    "UPDATE reviews
                     SET
                        year = ?1,
                        summary = ?2,
                        employee_id = ?3
                     WHERE id = ?4;",
                    params![review.year(), review.summary(), review.employee_id(), id],
                )?;
                if changed == 0 {
                    return Err(RepoError::NotFound(id));
                }
                info!("event=review_update module=repo status=ok review_id={id}");
                id
            }
        };

        self.track(review);
        Ok(id)
    }

    fn create(
        &mut self,
        year: i64,
        summary: &str,
        employee_id: EmployeeId,
    ) -> RepoResult<Review> {
        let mut review = self.new_review(year, summary, employee_id)?;
        self.save(&mut review)?;
        Ok(review)
    }

    fn find_by_id(&mut self, id: ReviewId) -> RepoResult<Option<Review>> {
        let mut found = self.query_reviews(&format!("{REVIEW_SELECT_SQL} WHERE id = ?1;"), [id])?;
        Ok(found.pop())
    }

    fn get_all(&mut self) -> RepoResult<Vec<Review>> {
        self.query_reviews(&format!("{REVIEW_SELECT_SQL} ORDER BY id ASC;"), params![])
    }

    fn find_by_employee(&mut self, employee_id: EmployeeId) -> RepoResult<Vec<Review>> {
        self.query_reviews(
            &format!("{REVIEW_SELECT_SQL} WHERE employee_id = ?1 ORDER BY id ASC;"),
            [employee_id],
        )
    }

    fn update(&mut self, review: &mut Review) -> RepoResult<()> {
        if !review.is_persisted() {
            return Err(ReviewStateError::NotPersisted { action: "update" }.into());
        }
        self.save(review)?;
        Ok(())
    }

    fn delete(&mut self, review: &mut Review) -> RepoResult<()> {
        let Some(id) = review.id() else {
            return Err(ReviewStateError::NotPersisted { action: "delete" }.into());
        };

        let changed = self
            .conn
            .execute("DELETE FROM reviews WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.identity_map.remove(&id);
        review.clear_id();
        info!("event=review_delete module=repo status=ok review_id={id}");
        Ok(())
    }
}

/// Raw column values before validation. Business columns are nullable in
/// the schema, so they are read as `Option`.
struct ReviewRow {
    id: ReviewId,
    year: Option<i64>,
    summary: Option<String>,
    employee_id: Option<EmployeeId>,
}

impl ReviewRow {
    fn into_review<L>(self, employees: &L) -> RepoResult<Review>
    where
        L: EmployeeLookup + ?Sized,
    {
        let id = self.id;
        let year = required_column(id, "year", self.year)?;
        let summary = required_column(id, "summary", self.summary)?;
        let employee_id = required_column(id, "employee_id", self.employee_id)?;

        Review::with_id(id, year, summary, employee_id, employees).map_err(|err| match err {
            ReviewError::Validation(reason) => {
                RepoError::InvalidData(format!("reviews row {id}: {reason}"))
            }
            ReviewError::Db(err) => RepoError::Db(err),
        })
    }
}

fn required_column<T>(id: ReviewId, column: &str, value: Option<T>) -> RepoResult<T> {
    value.ok_or_else(|| RepoError::InvalidData(format!("reviews row {id}: {column} is NULL")))
}
