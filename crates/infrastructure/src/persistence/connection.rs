//! Database connection management
//!
//! [`Database`] owns an r2d2 pool of SQLite connections. It is created
//! explicitly from a [`DatabaseConfig`] and passed around by the caller;
//! nothing is kept in global state.

use std::path::Path;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, OpenFlags, Transaction};
use tracing::{debug, info, instrument};

use super::error::DatabaseError;
use super::schema::{self, SchemaReport};
use crate::config::{DatabaseConfig, DatabaseLocation};

/// SQLite connection pool type alias
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Pooled connection type alias
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Handle to the job-portal database
#[derive(Clone)]
pub struct Database {
    pool: ConnectionPool,
    location: DatabaseLocation,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database")
            .field("location", &self.location)
            .field("connections", &self.pool.state().connections)
            .finish_non_exhaustive()
    }
}

impl Database {
    /// Open the database described by `config`
    ///
    /// Creates the parent directory of a file database and, unless
    /// disabled, initializes the schema before returning.
    #[instrument(skip(config))]
    pub fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let location = config.location()?;
        info!(
            location = %location,
            max_connections = config.max_connections,
            "Creating database connection pool"
        );

        let manager = match &location {
            DatabaseLocation::Memory => SqliteConnectionManager::memory(),
            DatabaseLocation::File(path) => {
                ensure_parent_dir(path)?;
                SqliteConnectionManager::file(path)
            },
        };

        let wal = !location.is_memory();
        let database = Self::build(config, location, manager, wal)?;
        if config.initialize_schema {
            database.initialize_schema()?;
        }

        debug!("Database connection pool created successfully");
        Ok(database)
    }

    /// Open an existing database without creating or altering anything
    ///
    /// A file database must already exist. Its journal mode is left as found
    /// and the schema is never initialized, whatever `config` says.
    #[instrument(skip(config))]
    pub fn open_existing(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let location = config.location()?;
        info!(location = %location, "Opening existing database");

        let manager = match &location {
            DatabaseLocation::Memory => SqliteConnectionManager::memory(),
            DatabaseLocation::File(path) => {
                if !path.is_file() {
                    return Err(DatabaseError::StorageUnavailable(format!(
                        "Database file {} does not exist",
                        path.display()
                    )));
                }
                SqliteConnectionManager::file(path).with_flags(
                    OpenFlags::SQLITE_OPEN_READ_WRITE
                        | OpenFlags::SQLITE_OPEN_URI
                        | OpenFlags::SQLITE_OPEN_NO_MUTEX,
                )
            },
        };

        Self::build(config, location, manager, false)
    }

    fn build(
        config: &DatabaseConfig,
        location: DatabaseLocation,
        manager: SqliteConnectionManager,
        wal: bool,
    ) -> Result<Self, DatabaseError> {
        let busy_timeout = Duration::from_millis(config.busy_timeout_ms);
        let enforce_foreign_keys = config.enforce_foreign_keys;
        let manager = manager.with_init(move |conn| {
            configure_connection(conn, busy_timeout, enforce_foreign_keys, wal)
        });

        // Every in-memory connection is a separate database, so keep exactly
        // one alive for the lifetime of the pool.
        let builder = Pool::builder()
            .min_idle(Some(1))
            .connection_timeout(Duration::from_millis(config.connect_timeout_ms));
        let builder = if location.is_memory() {
            builder.max_size(1).idle_timeout(None).max_lifetime(None)
        } else {
            builder.max_size(config.max_connections.max(1))
        };
        let pool = builder.build(manager)?;

        Ok(Self { pool, location })
    }

    /// Borrow a pooled connection; it returns to the pool when dropped
    pub fn session(&self) -> Result<PooledConn, DatabaseError> {
        Ok(self.pool.get()?)
    }

    /// Run `work` in one transaction
    ///
    /// Commits when `work` returns `Ok`; any error, or a panic unwinding
    /// through it, drops the transaction uncommitted and rolls it back.
    pub fn transaction<T, F>(&self, work: F) -> Result<T, DatabaseError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, DatabaseError>,
    {
        let mut conn = self.session()?;
        let tx = conn.transaction()?;
        let value = work(&tx)?;
        tx.commit()?;
        Ok(value)
    }

    /// Create every missing table and verify the existing ones
    pub fn initialize_schema(&self) -> Result<(), DatabaseError> {
        let mut conn = self.session()?;
        schema::initialize_schema(&mut conn)
    }

    /// Verify the database against the declared schema without changing it
    pub fn verify_schema(&self) -> Result<SchemaReport, DatabaseError> {
        let conn = self.session()?;
        schema::verify_schema(&conn)
    }

    /// Check that the database answers; returns the SQLite version
    pub fn ping(&self) -> Result<String, DatabaseError> {
        let conn = self.session()?;
        conn.query_row("SELECT 1, sqlite_version()", [], |row| row.get::<_, String>(1))
            .map_err(|e| DatabaseError::StorageUnavailable(e.to_string()))
    }

    /// Where the database lives
    pub const fn location(&self) -> &DatabaseLocation {
        &self.location
    }
}

fn ensure_parent_dir(path: &Path) -> Result<(), DatabaseError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::StorageUnavailable(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
    }
    Ok(())
}

/// Per-connection settings, applied whenever the pool opens a connection
fn configure_connection(
    conn: &mut Connection,
    busy_timeout: Duration,
    enforce_foreign_keys: bool,
    wal: bool,
) -> rusqlite::Result<()> {
    conn.busy_timeout(busy_timeout)?;
    conn.pragma_update(None, "foreign_keys", enforce_foreign_keys)?;
    if wal {
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;
    }
    Ok(())
}
