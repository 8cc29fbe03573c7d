//! Storage error taxonomy
//!
//! Every failure leaving the persistence layer is classified into one of a
//! few kinds callers can act on. Nothing is retried here.

use domain::DomainError;
use rusqlite::ffi;
use thiserror::Error;

/// Database errors
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The store cannot be opened, reached or locked in time
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// An existing structure does not match its declaration
    #[error("Schema conflict in {table}: {detail}")]
    SchemaConflict { table: String, detail: String },

    /// A value falls outside its column's domain, or a required column is
    /// missing
    #[error("Domain violation: {0}")]
    DomainViolation(String),

    /// A foreign key points at a row that does not exist
    #[error("Referential gap: {0}")]
    ReferentialGap(String),

    /// The connection settings are unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A stored value cannot be decoded
    #[error("Corrupt value in column {column}: {detail}")]
    Corrupt { column: usize, detail: String },

    /// Any other SQLite failure
    #[error("SQLite error: {0}")]
    Sqlite(rusqlite::Error),
}

impl DatabaseError {
    /// Create a schema conflict error
    pub fn schema_conflict(table: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::SchemaConflict {
            table: table.into(),
            detail: detail.into(),
        }
    }
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::SqliteFailure(err, message) => {
                let detail = message.clone().unwrap_or_else(|| err.to_string());
                match err.extended_code {
                    ffi::SQLITE_CONSTRAINT_CHECK | ffi::SQLITE_CONSTRAINT_NOTNULL => {
                        Self::DomainViolation(detail)
                    },
                    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Self::ReferentialGap(detail),
                    _ => match err.code {
                        ffi::ErrorCode::CannotOpen
                        | ffi::ErrorCode::NotADatabase
                        | ffi::ErrorCode::DatabaseBusy
                        | ffi::ErrorCode::DatabaseLocked
                        | ffi::ErrorCode::PermissionDenied
                        | ffi::ErrorCode::ReadOnly
                        | ffi::ErrorCode::SystemIoFailure => Self::StorageUnavailable(detail),
                        _ => Self::Sqlite(rusqlite::Error::SqliteFailure(err, message)),
                    },
                }
            },
            rusqlite::Error::FromSqlConversionFailure(column, _, source) => {
                match source.downcast::<DomainError>() {
                    Ok(domain) => Self::DomainViolation(domain.to_string()),
                    Err(other) => Self::Corrupt {
                        column,
                        detail: other.to_string(),
                    },
                }
            },
            other => Self::Sqlite(other),
        }
    }
}

impl From<r2d2::Error> for DatabaseError {
    fn from(e: r2d2::Error) -> Self {
        Self::StorageUnavailable(e.to_string())
    }
}

impl From<DomainError> for DatabaseError {
    fn from(e: DomainError) -> Self {
        Self::DomainViolation(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;

    fn constraint_error(sql: &str) -> DatabaseError {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE parent (id INTEGER PRIMARY KEY);
             CREATE TABLE child (
                 id INTEGER PRIMARY KEY,
                 parent_id INTEGER REFERENCES parent(id),
                 kind TEXT NOT NULL CHECK (kind IN ('a', 'b'))
             );",
        )
        .unwrap();
        conn.execute(sql, []).unwrap_err().into()
    }

    #[test]
    fn check_failure_is_domain_violation() {
        let err = constraint_error("INSERT INTO child (kind) VALUES ('z')");
        assert!(matches!(err, DatabaseError::DomainViolation(_)), "{err}");
    }

    #[test]
    fn not_null_failure_is_domain_violation() {
        let err = constraint_error("INSERT INTO child (kind) VALUES (NULL)");
        assert!(matches!(err, DatabaseError::DomainViolation(_)), "{err}");
    }

    #[test]
    fn foreign_key_failure_is_referential_gap() {
        let err = constraint_error("INSERT INTO child (parent_id, kind) VALUES (99, 'a')");
        assert!(matches!(err, DatabaseError::ReferentialGap(_)), "{err}");
    }

    #[test]
    fn syntax_error_stays_sqlite() {
        let err = constraint_error("INSERT INTO nowhere VALUES (1)");
        assert!(matches!(err, DatabaseError::Sqlite(_)), "{err}");
    }

    #[test]
    fn domain_error_maps_to_domain_violation() {
        let err: DatabaseError = DomainError::InvalidEmailAddress("x".to_string()).into();
        assert!(matches!(err, DatabaseError::DomainViolation(_)));
    }

    #[test]
    fn schema_conflict_display() {
        let err = DatabaseError::schema_conflict("Users", "column email has type INTEGER");
        assert_eq!(
            err.to_string(),
            "Schema conflict in Users: column email has type INTEGER"
        );
    }
}
