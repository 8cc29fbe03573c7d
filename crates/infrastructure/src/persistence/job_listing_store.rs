//! SQLite job listing store
//!
//! Besides insert and lookup, listings can be searched by free text and
//! edited in place. Editing replaces every caller-editable column but keeps
//! the original `date_posted`.

use domain::{EnumeratedDomain, JobId, JobListing, NewJobListing, UserId};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, instrument};

use super::error::DatabaseError;
use super::schema::tables::JOB_LISTINGS;
use super::sql::{
    InsertRow, encode_date, encode_timestamp, read_date, read_enum, read_salary, read_timestamp,
};

const SELECT_LISTING: &str = "SELECT job_id, employer_id, job_title, job_description, location, salary, date_posted, application_deadline, job_type FROM JobListings";

/// SQLite-based job listing store
#[derive(Debug, Clone, Copy)]
pub struct JobListingStore<'c> {
    conn: &'c Connection,
}

fn row_to_listing(row: &Row<'_>) -> rusqlite::Result<JobListing> {
    Ok(JobListing {
        id: JobId::new(row.get(0)?),
        employer_id: row.get::<_, Option<i64>>(1)?.map(UserId::new),
        job_title: row.get(2)?,
        job_description: row.get(3)?,
        location: row.get(4)?,
        salary: read_salary(row, 5)?,
        date_posted: read_timestamp(row, 6)?,
        application_deadline: read_date(row, 7)?,
        job_type: read_enum(row, 8)?,
    })
}

/// Escape `LIKE` wildcards so the term matches literally
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

impl<'c> JobListingStore<'c> {
    /// Create a store over a connection or open transaction
    #[must_use]
    pub const fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Insert a listing and return it as stored
    ///
    /// `date_posted` is assigned by storage unless supplied. Salary and job
    /// type may be absent.
    #[instrument(skip(self, listing), fields(job_title = %listing.job_title))]
    pub fn insert(&self, listing: &NewJobListing) -> Result<JobListing, DatabaseError> {
        listing.check()?;

        let id = InsertRow::into_table(JOB_LISTINGS)
            .set("employer_id", listing.employer_id.map(i64::from))
            .set("job_title", listing.job_title.clone())
            .set("job_description", listing.job_description.clone())
            .set("location", listing.location.clone())
            .set("salary", listing.salary.map(|s| s.to_string()))
            .set_or_default("date_posted", listing.date_posted.map(encode_timestamp))
            .set(
                "application_deadline",
                listing.application_deadline.map(encode_date),
            )
            .set("job_type", listing.job_type.map(|t| t.as_str().to_string()))
            .execute(self.conn)?;

        debug!(job_id = id, "Inserted job listing");
        Ok(self.conn.query_row(
            &format!("{SELECT_LISTING} WHERE job_id = ?1"),
            [id],
            row_to_listing,
        )?)
    }

    /// Get a listing by id
    #[instrument(skip(self), fields(job_id = %id))]
    pub fn get(&self, id: JobId) -> Result<Option<JobListing>, DatabaseError> {
        Ok(self
            .conn
            .query_row(
                &format!("{SELECT_LISTING} WHERE job_id = ?1"),
                [id.as_i64()],
                row_to_listing,
            )
            .optional()?)
    }

    /// List every listing, oldest first
    #[instrument(skip(self))]
    pub fn list_all(&self) -> Result<Vec<JobListing>, DatabaseError> {
        let listings = self
            .conn
            .prepare(&format!("{SELECT_LISTING} ORDER BY job_id"))?
            .query_map([], row_to_listing)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(listings)
    }

    /// List the listings posted by an employer
    #[instrument(skip(self), fields(employer_id = %employer_id))]
    pub fn list_by_employer(&self, employer_id: UserId) -> Result<Vec<JobListing>, DatabaseError> {
        let listings = self
            .conn
            .prepare(&format!(
                "{SELECT_LISTING} WHERE employer_id = ?1 ORDER BY job_id"
            ))?
            .query_map([employer_id.as_i64()], row_to_listing)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(listings)
    }

    /// Find listings whose title, description or location contains `term`
    ///
    /// Matching ignores ASCII case. An empty term matches every listing.
    #[instrument(skip(self))]
    pub fn search(&self, term: &str) -> Result<Vec<JobListing>, DatabaseError> {
        let pattern = like_pattern(term.trim());
        let listings = self
            .conn
            .prepare(&format!(
                "{SELECT_LISTING}
                 WHERE job_title LIKE ?1 ESCAPE '\\'
                    OR job_description LIKE ?1 ESCAPE '\\'
                    OR location LIKE ?1 ESCAPE '\\'
                 ORDER BY job_id"
            ))?
            .query_map([pattern], row_to_listing)?
            .collect::<Result<Vec<_>, _>>()?;

        debug!(matches = listings.len(), "Searched job listings");
        Ok(listings)
    }

    /// Replace the editable fields of a listing
    ///
    /// Returns `false` when no listing has that id. `date_posted` is never
    /// changed.
    #[instrument(skip(self, listing), fields(job_id = %id))]
    pub fn update(&self, id: JobId, listing: &NewJobListing) -> Result<bool, DatabaseError> {
        listing.check()?;

        let changed = self.conn.execute(
            "UPDATE JobListings
             SET employer_id = ?1, job_title = ?2, job_description = ?3, location = ?4,
                 salary = ?5, application_deadline = ?6, job_type = ?7
             WHERE job_id = ?8",
            params![
                listing.employer_id.map(i64::from),
                listing.job_title,
                listing.job_description,
                listing.location,
                listing.salary.map(|s| s.to_string()),
                listing.application_deadline.map(encode_date),
                listing.job_type.map(|t| t.as_str()),
                id.as_i64(),
            ],
        )?;

        debug!(changed, "Updated job listing");
        Ok(changed > 0)
    }
}
