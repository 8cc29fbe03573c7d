//! SQLite application store
//!
//! An application left without a status is stored as `pending` by the
//! column default.

use domain::{
    Application, ApplicationId, ApplicationStatus, EnumeratedDomain, JobId, NewApplication,
    UserId,
};
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, instrument};

use super::error::DatabaseError;
use super::schema::tables::APPLICATIONS;
use super::sql::{InsertRow, encode_timestamp, read_enum, read_timestamp};

const SELECT_APPLICATION: &str =
    "SELECT application_id, job_id, job_seeker_id, application_date, status FROM Applications";

/// SQLite-based application store
#[derive(Debug, Clone, Copy)]
pub struct ApplicationStore<'c> {
    conn: &'c Connection,
}

fn row_to_application(row: &Row<'_>) -> rusqlite::Result<Application> {
    Ok(Application {
        id: ApplicationId::new(row.get(0)?),
        job_id: row.get::<_, Option<i64>>(1)?.map(JobId::new),
        job_seeker_id: row.get::<_, Option<i64>>(2)?.map(UserId::new),
        application_date: read_timestamp(row, 3)?,
        status: read_enum(row, 4)?,
    })
}

impl<'c> ApplicationStore<'c> {
    /// Create a store over a connection or open transaction
    #[must_use]
    pub const fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Insert an application and return it as stored
    #[instrument(skip(self, application), fields(job_id = ?application.job_id, job_seeker_id = ?application.job_seeker_id))]
    pub fn insert(&self, application: &NewApplication) -> Result<Application, DatabaseError> {
        let id = InsertRow::into_table(APPLICATIONS)
            .set("job_id", application.job_id.map(i64::from))
            .set("job_seeker_id", application.job_seeker_id.map(i64::from))
            .set_or_default(
                "application_date",
                application.application_date.map(encode_timestamp),
            )
            .set_or_default(
                "status",
                application.status.map(|s| s.as_str().to_string()),
            )
            .execute(self.conn)?;

        debug!(application_id = id, "Inserted application");
        Ok(self.conn.query_row(
            &format!("{SELECT_APPLICATION} WHERE application_id = ?1"),
            [id],
            row_to_application,
        )?)
    }

    /// Get an application by id
    #[instrument(skip(self), fields(application_id = %id))]
    pub fn get(&self, id: ApplicationId) -> Result<Option<Application>, DatabaseError> {
        Ok(self
            .conn
            .query_row(
                &format!("{SELECT_APPLICATION} WHERE application_id = ?1"),
                [id.as_i64()],
                row_to_application,
            )
            .optional()?)
    }

    /// List the applications received by a listing
    #[instrument(skip(self), fields(job_id = %job_id))]
    pub fn list_for_job(&self, job_id: JobId) -> Result<Vec<Application>, DatabaseError> {
        let applications = self
            .conn
            .prepare(&format!(
                "{SELECT_APPLICATION} WHERE job_id = ?1 ORDER BY application_id"
            ))?
            .query_map([job_id.as_i64()], row_to_application)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(applications)
    }

    /// List the applications submitted by a job seeker
    #[instrument(skip(self), fields(job_seeker_id = %job_seeker_id))]
    pub fn list_for_seeker(&self, job_seeker_id: UserId) -> Result<Vec<Application>, DatabaseError> {
        let applications = self
            .conn
            .prepare(&format!(
                "{SELECT_APPLICATION} WHERE job_seeker_id = ?1 ORDER BY application_id"
            ))?
            .query_map([job_seeker_id.as_i64()], row_to_application)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(applications)
    }

    /// Record a decision on an application
    ///
    /// Returns `false` when no application has that id.
    #[instrument(skip(self), fields(application_id = %id, status = %status))]
    pub fn update_status(
        &self,
        id: ApplicationId,
        status: ApplicationStatus,
    ) -> Result<bool, DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE Applications SET status = ?1 WHERE application_id = ?2",
            params![status.as_str(), id.as_i64()],
        )?;

        debug!(changed, "Updated application status");
        Ok(changed > 0)
    }
}
