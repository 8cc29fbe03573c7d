//! SQLite job category store
//!
//! Manages `JobCategories` and the `JobListingCategories` association
//! between listings and categories. The association carries no uniqueness
//! constraint; linking the same pair twice stores two rows.

use domain::{CategoryId, JobCategory, JobId, JobListingCategory, JobListingCategoryId, NewJobCategory};
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::{debug, instrument};

use super::error::DatabaseError;
use super::schema::tables::{JOB_CATEGORIES, JOB_LISTING_CATEGORIES};
use super::sql::InsertRow;

const SELECT_CATEGORY: &str = "SELECT category_id, category_name FROM JobCategories";

const SELECT_LINK: &str =
    "SELECT job_listing_category_id, job_id, category_id FROM JobListingCategories";

/// SQLite-based category store
#[derive(Debug, Clone, Copy)]
pub struct CategoryStore<'c> {
    conn: &'c Connection,
}

fn row_to_category(row: &Row<'_>) -> rusqlite::Result<JobCategory> {
    Ok(JobCategory {
        id: CategoryId::new(row.get(0)?),
        category_name: row.get(1)?,
    })
}

fn row_to_link(row: &Row<'_>) -> rusqlite::Result<JobListingCategory> {
    Ok(JobListingCategory {
        id: JobListingCategoryId::new(row.get(0)?),
        job_id: row.get::<_, Option<i64>>(1)?.map(JobId::new),
        category_id: row.get::<_, Option<i64>>(2)?.map(CategoryId::new),
    })
}

impl<'c> CategoryStore<'c> {
    /// Create a store over a connection or open transaction
    #[must_use]
    pub const fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Insert a category and return it as stored
    #[instrument(skip(self, category), fields(category_name = %category.category_name))]
    pub fn insert(&self, category: &NewJobCategory) -> Result<JobCategory, DatabaseError> {
        category.check()?;

        let id = InsertRow::into_table(JOB_CATEGORIES)
            .set("category_name", category.category_name.clone())
            .execute(self.conn)?;

        debug!(category_id = id, "Inserted job category");
        Ok(self.conn.query_row(
            &format!("{SELECT_CATEGORY} WHERE category_id = ?1"),
            [id],
            row_to_category,
        )?)
    }

    /// Get a category by id
    #[instrument(skip(self), fields(category_id = %id))]
    pub fn get(&self, id: CategoryId) -> Result<Option<JobCategory>, DatabaseError> {
        Ok(self
            .conn
            .query_row(
                &format!("{SELECT_CATEGORY} WHERE category_id = ?1"),
                [id.as_i64()],
                row_to_category,
            )
            .optional()?)
    }

    /// List every category
    #[instrument(skip(self))]
    pub fn list_all(&self) -> Result<Vec<JobCategory>, DatabaseError> {
        let categories = self
            .conn
            .prepare(&format!("{SELECT_CATEGORY} ORDER BY category_id"))?
            .query_map([], row_to_category)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    /// Tag a listing with a category
    #[instrument(skip(self), fields(job_id = %job_id, category_id = %category_id))]
    pub fn link(
        &self,
        job_id: JobId,
        category_id: CategoryId,
    ) -> Result<JobListingCategory, DatabaseError> {
        let id = InsertRow::into_table(JOB_LISTING_CATEGORIES)
            .set("job_id", job_id.as_i64())
            .set("category_id", category_id.as_i64())
            .execute(self.conn)?;

        debug!(job_listing_category_id = id, "Linked listing to category");
        Ok(self.conn.query_row(
            &format!("{SELECT_LINK} WHERE job_listing_category_id = ?1"),
            [id],
            row_to_link,
        )?)
    }

    /// Categories a listing is tagged with, one entry per link row
    #[instrument(skip(self), fields(job_id = %job_id))]
    pub fn categories_for_job(&self, job_id: JobId) -> Result<Vec<JobCategory>, DatabaseError> {
        let categories = self
            .conn
            .prepare(
                "SELECT c.category_id, c.category_name
                 FROM JobListingCategories l
                 JOIN JobCategories c ON c.category_id = l.category_id
                 WHERE l.job_id = ?1
                 ORDER BY l.job_listing_category_id",
            )?
            .query_map([job_id.as_i64()], row_to_category)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    /// Raw association rows for a listing
    #[instrument(skip(self), fields(job_id = %job_id))]
    pub fn links_for_job(&self, job_id: JobId) -> Result<Vec<JobListingCategory>, DatabaseError> {
        let links = self
            .conn
            .prepare(&format!(
                "{SELECT_LINK} WHERE job_id = ?1 ORDER BY job_listing_category_id"
            ))?
            .query_map([job_id.as_i64()], row_to_link)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(links)
    }
}
