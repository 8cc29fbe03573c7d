//! SQLite resume store

use domain::{NewResume, Resume, ResumeId, UserId};
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::{debug, instrument};

use super::error::DatabaseError;
use super::schema::tables::RESUMES;
use super::sql::{InsertRow, encode_timestamp, read_timestamp};

const SELECT_RESUME: &str =
    "SELECT resume_id, job_seeker_id, resume_file_path, date_uploaded FROM Resumes";

/// SQLite-based resume store
#[derive(Debug, Clone, Copy)]
pub struct ResumeStore<'c> {
    conn: &'c Connection,
}

fn row_to_resume(row: &Row<'_>) -> rusqlite::Result<Resume> {
    Ok(Resume {
        id: ResumeId::new(row.get(0)?),
        job_seeker_id: row.get::<_, Option<i64>>(1)?.map(UserId::new),
        resume_file_path: row.get(2)?,
        date_uploaded: read_timestamp(row, 3)?,
    })
}

impl<'c> ResumeStore<'c> {
    /// Create a store over a connection or open transaction
    #[must_use]
    pub const fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Insert a resume and return it as stored
    #[instrument(skip(self, resume), fields(job_seeker_id = ?resume.job_seeker_id))]
    pub fn insert(&self, resume: &NewResume) -> Result<Resume, DatabaseError> {
        resume.check()?;

        let id = InsertRow::into_table(RESUMES)
            .set("job_seeker_id", resume.job_seeker_id.map(i64::from))
            .set("resume_file_path", resume.resume_file_path.clone())
            .set_or_default("date_uploaded", resume.date_uploaded.map(encode_timestamp))
            .execute(self.conn)?;

        debug!(resume_id = id, "Inserted resume");
        Ok(self.conn.query_row(
            &format!("{SELECT_RESUME} WHERE resume_id = ?1"),
            [id],
            row_to_resume,
        )?)
    }

    /// Get a resume by id
    #[instrument(skip(self), fields(resume_id = %id))]
    pub fn get(&self, id: ResumeId) -> Result<Option<Resume>, DatabaseError> {
        Ok(self
            .conn
            .query_row(
                &format!("{SELECT_RESUME} WHERE resume_id = ?1"),
                [id.as_i64()],
                row_to_resume,
            )
            .optional()?)
    }

    /// List the resumes uploaded by a job seeker
    #[instrument(skip(self), fields(job_seeker_id = %job_seeker_id))]
    pub fn list_for_seeker(&self, job_seeker_id: UserId) -> Result<Vec<Resume>, DatabaseError> {
        let resumes = self
            .conn
            .prepare(&format!(
                "{SELECT_RESUME} WHERE job_seeker_id = ?1 ORDER BY resume_id"
            ))?
            .query_map([job_seeker_id.as_i64()], row_to_resume)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(resumes)
    }
}
