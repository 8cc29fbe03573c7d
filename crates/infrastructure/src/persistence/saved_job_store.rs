//! SQLite saved-job store

use domain::{JobId, NewSavedJob, SavedJob, SavedJobId, UserId};
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::{debug, instrument};

use super::error::DatabaseError;
use super::schema::tables::SAVED_JOBS;
use super::sql::{InsertRow, encode_timestamp, read_timestamp};

const SELECT_SAVED_JOB: &str =
    "SELECT saved_job_id, job_id, job_seeker_id, date_saved FROM SavedJobs";

/// SQLite-based saved-job store
#[derive(Debug, Clone, Copy)]
pub struct SavedJobStore<'c> {
    conn: &'c Connection,
}

fn row_to_saved_job(row: &Row<'_>) -> rusqlite::Result<SavedJob> {
    Ok(SavedJob {
        id: SavedJobId::new(row.get(0)?),
        job_id: row.get::<_, Option<i64>>(1)?.map(JobId::new),
        job_seeker_id: row.get::<_, Option<i64>>(2)?.map(UserId::new),
        date_saved: read_timestamp(row, 3)?,
    })
}

impl<'c> SavedJobStore<'c> {
    /// Create a store over a connection or open transaction
    #[must_use]
    pub const fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Bookmark a listing for a job seeker
    #[instrument(skip(self, saved), fields(job_id = ?saved.job_id, job_seeker_id = ?saved.job_seeker_id))]
    pub fn insert(&self, saved: &NewSavedJob) -> Result<SavedJob, DatabaseError> {
        let id = InsertRow::into_table(SAVED_JOBS)
            .set("job_id", saved.job_id.map(i64::from))
            .set("job_seeker_id", saved.job_seeker_id.map(i64::from))
            .set_or_default("date_saved", saved.date_saved.map(encode_timestamp))
            .execute(self.conn)?;

        debug!(saved_job_id = id, "Saved job");
        Ok(self.conn.query_row(
            &format!("{SELECT_SAVED_JOB} WHERE saved_job_id = ?1"),
            [id],
            row_to_saved_job,
        )?)
    }

    /// Get a saved job by id
    #[instrument(skip(self), fields(saved_job_id = %id))]
    pub fn get(&self, id: SavedJobId) -> Result<Option<SavedJob>, DatabaseError> {
        Ok(self
            .conn
            .query_row(
                &format!("{SELECT_SAVED_JOB} WHERE saved_job_id = ?1"),
                [id.as_i64()],
                row_to_saved_job,
            )
            .optional()?)
    }

    /// List a job seeker's saved listings, oldest first
    #[instrument(skip(self), fields(job_seeker_id = %job_seeker_id))]
    pub fn list_for_seeker(&self, job_seeker_id: UserId) -> Result<Vec<SavedJob>, DatabaseError> {
        let saved = self
            .conn
            .prepare(&format!(
                "{SELECT_SAVED_JOB} WHERE job_seeker_id = ?1 ORDER BY saved_job_id"
            ))?
            .query_map([job_seeker_id.as_i64()], row_to_saved_job)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{employer, job_seeker, listing, test_connection};

    #[test]
    fn saving_twice_keeps_both_rows() {
        let conn = test_connection();
        let job = listing(&conn, employer(&conn), "Rust Engineer");
        let seeker = job_seeker(&conn);
        let store = SavedJobStore::new(&conn);

        let first = store.insert(&NewSavedJob::new(job, seeker)).unwrap();
        let second = store.insert(&NewSavedJob::new(job, seeker)).unwrap();

        assert_ne!(first.id, second.id);
        assert!(first.date_saved.is_some());
        assert_eq!(store.list_for_seeker(seeker).unwrap().len(), 2);
    }

    #[test]
    fn missing_job_is_referential_gap() {
        let conn = test_connection();
        let seeker = job_seeker(&conn);
        let err = SavedJobStore::new(&conn)
            .insert(&NewSavedJob::new(JobId::new(5), seeker))
            .unwrap_err();
        assert!(matches!(err, DatabaseError::ReferentialGap(_)), "{err}");
    }
}
