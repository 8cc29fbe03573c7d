//! SQLite company store

use domain::{Company, CompanyId, NewCompany, UserId};
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::{debug, instrument};

use super::error::DatabaseError;
use super::schema::tables::COMPANIES;
use super::sql::InsertRow;

const SELECT_COMPANY: &str = "SELECT company_id, employer_id, company_name, industry, company_description, location FROM Companies";

/// SQLite-based company store
#[derive(Debug, Clone, Copy)]
pub struct CompanyStore<'c> {
    conn: &'c Connection,
}

fn row_to_company(row: &Row<'_>) -> rusqlite::Result<Company> {
    Ok(Company {
        id: CompanyId::new(row.get(0)?),
        employer_id: row.get::<_, Option<i64>>(1)?.map(UserId::new),
        company_name: row.get(2)?,
        industry: row.get(3)?,
        company_description: row.get(4)?,
        location: row.get(5)?,
    })
}

impl<'c> CompanyStore<'c> {
    /// Create a store over a connection or open transaction
    #[must_use]
    pub const fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Insert a company and return it as stored
    #[instrument(skip(self, company), fields(company_name = %company.company_name))]
    pub fn insert(&self, company: &NewCompany) -> Result<Company, DatabaseError> {
        company.check()?;

        let id = InsertRow::into_table(COMPANIES)
            .set("employer_id", company.employer_id.map(i64::from))
            .set("company_name", company.company_name.clone())
            .set("industry", company.industry.clone())
            .set("company_description", company.company_description.clone())
            .set("location", company.location.clone())
            .execute(self.conn)?;

        debug!(company_id = id, "Inserted company");
        Ok(self.conn.query_row(
            &format!("{SELECT_COMPANY} WHERE company_id = ?1"),
            [id],
            row_to_company,
        )?)
    }

    /// Get a company by id
    #[instrument(skip(self), fields(company_id = %id))]
    pub fn get(&self, id: CompanyId) -> Result<Option<Company>, DatabaseError> {
        Ok(self
            .conn
            .query_row(
                &format!("{SELECT_COMPANY} WHERE company_id = ?1"),
                [id.as_i64()],
                row_to_company,
            )
            .optional()?)
    }

    /// List the companies registered by an employer
    #[instrument(skip(self), fields(employer_id = %employer_id))]
    pub fn list_by_employer(&self, employer_id: UserId) -> Result<Vec<Company>, DatabaseError> {
        let companies = self
            .conn
            .prepare(&format!(
                "{SELECT_COMPANY} WHERE employer_id = ?1 ORDER BY company_id"
            ))?
            .query_map([employer_id.as_i64()], row_to_company)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(companies)
    }
}
