//! Schema declaration and idempotent creation
//!
//! The eight job-portal tables are declared once as data. The declaration
//! renders the DDL and is also the reference an existing database is
//! verified against.
//!
//! ## Creation
//!
//! [`initialize_schema`] runs `CREATE TABLE IF NOT EXISTS` for every table
//! inside one `BEGIN IMMEDIATE` transaction. Concurrent starters serialize
//! on SQLite's write lock (bounded by `busy_timeout`), so racing processes
//! neither fail nor observe a half-built schema. Existing tables and their
//! rows are never altered.
//!
//! ## Verification
//!
//! A table that already exists must carry every declared column with the
//! same declared type, NOT NULL flag, primary-key flag and DEFAULT, plus
//! every declared foreign key. Extra columns are tolerated. Anything else is
//! a [`DatabaseError::SchemaConflict`].
//!
//! Enumerated columns carry a CHECK constraint built from the domain's name
//! list, so out-of-set values are rejected by the engine for every writer.
//! Neither CHECK clauses nor AUTOINCREMENT show up in the pragmas, so both
//! are verified against the stored `CREATE TABLE` text in `sqlite_master`.

use std::sync::LazyLock;

use domain::{ApplicationStatus, EnumeratedDomain, JobType, SALARY_PRECISION, SALARY_SCALE, UserType};
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};
use tracing::{debug, info, instrument};

use super::error::DatabaseError;
use super::sql::NOW_EXPR;

/// Table names as persisted
pub mod tables {
    pub const USERS: &str = "Users";
    pub const JOB_LISTINGS: &str = "JobListings";
    pub const APPLICATIONS: &str = "Applications";
    pub const RESUMES: &str = "Resumes";
    pub const COMPANIES: &str = "Companies";
    pub const SAVED_JOBS: &str = "SavedJobs";
    pub const JOB_CATEGORIES: &str = "JobCategories";
    pub const JOB_LISTING_CATEGORIES: &str = "JobListingCategories";
}

/// A declared column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub sql_type: String,
    pub primary_key: bool,
    pub not_null: bool,
    pub default: Option<String>,
    /// Closed value set enforced with a CHECK constraint
    pub allowed_values: Vec<&'static str>,
}

impl ColumnDef {
    fn new(name: &'static str, sql_type: impl Into<String>) -> Self {
        Self {
            name,
            sql_type: sql_type.into(),
            primary_key: false,
            not_null: false,
            default: None,
            allowed_values: Vec::new(),
        }
    }

    /// Auto-incrementing integer key; ids are never reused
    pub fn id(name: &'static str) -> Self {
        Self {
            primary_key: true,
            ..Self::new(name, "INTEGER")
        }
    }

    /// Integer column, used for foreign keys
    pub fn integer(name: &'static str) -> Self {
        Self::new(name, "INTEGER")
    }

    /// Bounded string column
    pub fn varchar(name: &'static str, width: usize) -> Self {
        Self::new(name, format!("VARCHAR({width})"))
    }

    /// Unbounded text column
    pub fn text(name: &'static str) -> Self {
        Self::new(name, "TEXT")
    }

    /// Fixed-point salary column
    pub fn salary(name: &'static str) -> Self {
        Self::new(name, format!("DECIMAL({SALARY_PRECISION}, {SALARY_SCALE})"))
    }

    /// Calendar date column
    pub fn date(name: &'static str) -> Self {
        Self::new(name, "DATE")
    }

    /// Timestamp column filled by the engine at insertion time
    pub fn inserted_at(name: &'static str) -> Self {
        Self::new(name, "TIMESTAMP").default_expr(format!("({NOW_EXPR})"))
    }

    /// Column restricted to the names of an enumerated domain
    pub fn enumeration<T: EnumeratedDomain>(name: &'static str) -> Self {
        Self {
            allowed_values: T::names(),
            ..Self::varchar(name, T::max_len())
        }
    }

    /// Mark the column NOT NULL
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Set the DEFAULT expression
    #[must_use]
    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    fn render(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.sql_type);
        if self.primary_key {
            sql.push_str(" PRIMARY KEY AUTOINCREMENT");
        }
        if self.not_null {
            sql.push_str(" NOT NULL");
        }
        if let Some(default) = &self.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(default);
        }
        if !self.allowed_values.is_empty() {
            let values = self
                .allowed_values
                .iter()
                .map(|v| format!("'{v}'"))
                .collect::<Vec<_>>()
                .join(", ");
            sql.push_str(&format!(" CHECK ({} IN ({values}))", self.name));
        }
        sql
    }
}

/// A declared foreign key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references_table: &'static str,
    pub references_column: &'static str,
}

impl ForeignKey {
    const fn new(
        column: &'static str,
        references_table: &'static str,
        references_column: &'static str,
    ) -> Self {
        Self {
            column,
            references_table,
            references_column,
        }
    }
}

/// A declared table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: Vec<ColumnDef>,
    pub foreign_keys: Vec<ForeignKey>,
}

impl TableDef {
    /// Render `CREATE TABLE IF NOT EXISTS` for this table
    pub fn create_sql(&self) -> String {
        let mut parts: Vec<String> = self.columns.iter().map(ColumnDef::render).collect();
        parts.extend(self.foreign_keys.iter().map(|fk| {
            format!(
                "FOREIGN KEY ({}) REFERENCES {}({})",
                fk.column, fk.references_table, fk.references_column
            )
        }));
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    {}\n)",
            self.name,
            parts.join(",\n    ")
        )
    }

    /// Look up a declared column
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

static SCHEMA: LazyLock<Vec<TableDef>> = LazyLock::new(declare_schema);

/// Every declared table, parents before children
pub fn schema() -> &'static [TableDef] {
    &SCHEMA
}

fn declare_schema() -> Vec<TableDef> {
    use tables::{
        APPLICATIONS, COMPANIES, JOB_CATEGORIES, JOB_LISTING_CATEGORIES, JOB_LISTINGS, RESUMES,
        SAVED_JOBS, USERS,
    };

    vec![
        TableDef {
            name: USERS,
            columns: vec![
                ColumnDef::id("user_id"),
                ColumnDef::varchar("username", 50).required(),
                ColumnDef::varchar("password_hash", 255).required(),
                ColumnDef::varchar("email", 100).required(),
                ColumnDef::varchar("first_name", 50),
                ColumnDef::varchar("last_name", 50),
                ColumnDef::enumeration::<UserType>("user_type").required(),
                ColumnDef::inserted_at("date_created"),
            ],
            foreign_keys: vec![],
        },
        TableDef {
            name: JOB_LISTINGS,
            columns: vec![
                ColumnDef::id("job_id"),
                ColumnDef::integer("employer_id"),
                ColumnDef::varchar("job_title", 100).required(),
                ColumnDef::text("job_description").required(),
                ColumnDef::varchar("location", 100),
                ColumnDef::salary("salary"),
                ColumnDef::inserted_at("date_posted"),
                ColumnDef::date("application_deadline"),
                ColumnDef::enumeration::<JobType>("job_type"),
            ],
            foreign_keys: vec![ForeignKey::new("employer_id", USERS, "user_id")],
        },
        TableDef {
            name: APPLICATIONS,
            columns: vec![
                ColumnDef::id("application_id"),
                ColumnDef::integer("job_id"),
                ColumnDef::integer("job_seeker_id"),
                ColumnDef::inserted_at("application_date"),
                ColumnDef::enumeration::<ApplicationStatus>("status")
                    .default_expr(format!("'{}'", ApplicationStatus::default().as_str())),
            ],
            foreign_keys: vec![
                ForeignKey::new("job_id", JOB_LISTINGS, "job_id"),
                ForeignKey::new("job_seeker_id", USERS, "user_id"),
            ],
        },
        TableDef {
            name: RESUMES,
            columns: vec![
                ColumnDef::id("resume_id"),
                ColumnDef::integer("job_seeker_id"),
                ColumnDef::varchar("resume_file_path", 255).required(),
                ColumnDef::inserted_at("date_uploaded"),
            ],
            foreign_keys: vec![ForeignKey::new("job_seeker_id", USERS, "user_id")],
        },
        TableDef {
            name: COMPANIES,
            columns: vec![
                ColumnDef::id("company_id"),
                ColumnDef::integer("employer_id"),
                ColumnDef::varchar("company_name", 100).required(),
                ColumnDef::varchar("industry", 50),
                ColumnDef::text("company_description"),
                ColumnDef::varchar("location", 100),
            ],
            foreign_keys: vec![ForeignKey::new("employer_id", USERS, "user_id")],
        },
        TableDef {
            name: SAVED_JOBS,
            columns: vec![
                ColumnDef::id("saved_job_id"),
                ColumnDef::integer("job_id"),
                ColumnDef::integer("job_seeker_id"),
                ColumnDef::inserted_at("date_saved"),
            ],
            foreign_keys: vec![
                ForeignKey::new("job_id", JOB_LISTINGS, "job_id"),
                ForeignKey::new("job_seeker_id", USERS, "user_id"),
            ],
        },
        TableDef {
            name: JOB_CATEGORIES,
            columns: vec![
                ColumnDef::id("category_id"),
                ColumnDef::varchar("category_name", 50).required(),
            ],
            foreign_keys: vec![],
        },
        TableDef {
            name: JOB_LISTING_CATEGORIES,
            columns: vec![
                ColumnDef::id("job_listing_category_id"),
                ColumnDef::integer("job_id"),
                ColumnDef::integer("category_id"),
            ],
            foreign_keys: vec![
                ForeignKey::new("job_id", JOB_LISTINGS, "job_id"),
                ForeignKey::new("category_id", JOB_CATEGORIES, "category_id"),
            ],
        },
    ]
}

/// Outcome of verifying a database against the declaration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    /// Declared tables found and compatible
    pub present: Vec<&'static str>,
    /// Declared tables not found
    pub missing: Vec<&'static str>,
}

impl SchemaReport {
    /// Check if every declared table exists
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Create every missing table, then verify all of them
///
/// Safe to call repeatedly and from concurrent processes.
#[instrument(skip(conn))]
pub fn initialize_schema(conn: &mut Connection) -> Result<(), DatabaseError> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

    for table in schema() {
        tx.execute(&table.create_sql(), [])?;
        debug!(table = table.name, "Ensured table exists");
    }

    let report = verify_schema(&tx)?;
    if let Some(table) = report.missing.first() {
        return Err(DatabaseError::schema_conflict(
            *table,
            "table still missing after creation",
        ));
    }

    tx.commit()?;
    info!(tables = report.present.len(), "Database schema initialized");
    Ok(())
}

/// Verify existing tables against the declaration without creating any
///
/// Fails on the first incompatibility; missing tables are reported, not
/// treated as conflicts.
#[instrument(skip(conn))]
pub fn verify_schema(conn: &Connection) -> Result<SchemaReport, DatabaseError> {
    let mut report = SchemaReport::default();

    for table in schema() {
        if verify_table(conn, table)? {
            report.present.push(table.name);
        } else {
            report.missing.push(table.name);
        }
    }

    debug!(
        present = report.present.len(),
        missing = report.missing.len(),
        "Schema verified"
    );
    Ok(report)
}

/// Existing column as reported by `pragma_table_info`
struct ExistingColumn {
    name: String,
    sql_type: String,
    not_null: bool,
    primary_key: bool,
    default: Option<String>,
}

/// Compare one table; `Ok(false)` when it does not exist
fn verify_table(conn: &Connection, table: &TableDef) -> Result<bool, DatabaseError> {
    let existing: Vec<ExistingColumn> = conn
        .prepare("SELECT name, type, \"notnull\", pk, dflt_value FROM pragma_table_info(?1)")?
        .query_map([table.name], |row| {
            Ok(ExistingColumn {
                name: row.get(0)?,
                sql_type: row.get(1)?,
                not_null: row.get::<_, i64>(2)? != 0,
                primary_key: row.get::<_, i64>(3)? != 0,
                default: row.get(4)?,
            })
        })?
        .collect::<Result<_, _>>()?;

    if existing.is_empty() {
        return Ok(false);
    }

    let ddl: String = conn
        .query_row(
            "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
            [table.name],
            |row| row.get(0),
        )
        .optional()?
        .unwrap_or_default();
    let ddl = normalize_ddl(&ddl);

    for declared in &table.columns {
        let Some(found) = existing
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(declared.name))
        else {
            return Err(DatabaseError::schema_conflict(
                table.name,
                format!("missing column {}", declared.name),
            ));
        };

        if normalize_type(&found.sql_type) != normalize_type(&declared.sql_type) {
            return Err(DatabaseError::schema_conflict(
                table.name,
                format!(
                    "column {} has type {} but {} is declared",
                    declared.name, found.sql_type, declared.sql_type
                ),
            ));
        }

        if found.not_null != declared.not_null {
            return Err(DatabaseError::schema_conflict(
                table.name,
                format!(
                    "column {} is {} but {} is declared",
                    declared.name,
                    nullability(found.not_null),
                    nullability(declared.not_null)
                ),
            ));
        }

        if found.primary_key != declared.primary_key {
            return Err(DatabaseError::schema_conflict(
                table.name,
                format!("column {} primary key flag differs", declared.name),
            ));
        }

        if found.default.as_deref().map(normalize_expr)
            != declared.default.as_deref().map(normalize_expr)
        {
            return Err(DatabaseError::schema_conflict(
                table.name,
                format!(
                    "column {} has default {} but {} is declared",
                    declared.name,
                    found.default.as_deref().unwrap_or("none"),
                    declared.default.as_deref().unwrap_or("none")
                ),
            ));
        }

        if declared.primary_key && !ddl.to_ascii_uppercase().contains("AUTOINCREMENT") {
            return Err(DatabaseError::schema_conflict(
                table.name,
                format!("column {} is not AUTOINCREMENT", declared.name),
            ));
        }

        if !declared.allowed_values.is_empty() {
            let mut expected = declared.allowed_values.clone();
            expected.sort_unstable();
            match check_values(&ddl, declared.name) {
                Some(mut listed) => {
                    listed.sort_unstable();
                    if listed != expected {
                        return Err(DatabaseError::schema_conflict(
                            table.name,
                            format!(
                                "column {} CHECK allows {} but {} is declared",
                                declared.name,
                                listed.join(", "),
                                expected.join(", ")
                            ),
                        ));
                    }
                },
                None => {
                    return Err(DatabaseError::schema_conflict(
                        table.name,
                        format!("column {} has no CHECK on its value set", declared.name),
                    ));
                },
            }
        }
    }

    let foreign_keys: Vec<(String, String, Option<String>)> = conn
        .prepare("SELECT \"table\", \"from\", \"to\" FROM pragma_foreign_key_list(?1)")?
        .query_map([table.name], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<Result<_, _>>()?;

    for fk in &table.foreign_keys {
        let declared = foreign_keys.iter().any(|(target, from, to)| {
            target.eq_ignore_ascii_case(fk.references_table)
                && from.eq_ignore_ascii_case(fk.column)
                && to
                    .as_deref()
                    .is_none_or(|to| to.eq_ignore_ascii_case(fk.references_column))
        });
        if !declared {
            return Err(DatabaseError::schema_conflict(
                table.name,
                format!(
                    "missing foreign key {} -> {}({})",
                    fk.column, fk.references_table, fk.references_column
                ),
            ));
        }
    }

    Ok(true)
}

/// Declared types compare case- and whitespace-insensitively
fn normalize_type(sql_type: &str) -> String {
    sql_type
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Default expressions compare without whitespace or wrapping parentheses;
/// SQLite reports `DEFAULT (expr)` as `expr`
fn normalize_expr(expr: &str) -> String {
    let mut expr: String = expr.chars().filter(|c| !c.is_whitespace()).collect();
    while is_wrapped(&expr) {
        expr = expr[1..expr.len() - 1].to_string();
    }
    expr
}

/// Check if the opening parenthesis closes at the very end
fn is_wrapped(expr: &str) -> bool {
    if !expr.starts_with('(') || !expr.ends_with(')') {
        return false;
    }
    let mut depth = 0usize;
    for (i, c) in expr.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return i == expr.len() - 1;
                }
            },
            _ => {},
        }
    }
    false
}

/// Stored DDL without whitespace or identifier quoting
fn normalize_ddl(sql: &str) -> String {
    sql.chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '"' | '`' | '[' | ']'))
        .collect()
}

/// Values listed by `CHECK (column IN (...))` in normalized DDL
fn check_values(ddl: &str, column: &str) -> Option<Vec<String>> {
    let needle = format!("check({}in(", column.to_ascii_lowercase());
    let start = ddl.to_ascii_lowercase().find(&needle)? + needle.len();
    let rest = &ddl[start..];
    let list = &rest[..rest.find(')')?];
    Some(
        list.split(',')
            .map(|value| value.trim_matches('\'').to_string())
            .collect(),
    )
}

const fn nullability(not_null: bool) -> &'static str {
    if not_null { "NOT NULL" } else { "nullable" }
}
