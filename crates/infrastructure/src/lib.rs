//! Infrastructure layer - SQLite storage for the job portal
//!
//! Owns configuration loading, tracing setup, the connection handle, the
//! declared schema with its idempotent initialization, and one store per
//! entity.

pub mod config;
pub mod persistence;
pub mod telemetry;
#[cfg(test)]
pub mod testing;

pub use config::{AppConfig, DatabaseConfig, DatabaseLocation, LogFormat, LoggingConfig};
pub use persistence::{
    ApplicationStore, CategoryStore, CompanyStore, ConnectionPool, Database, DatabaseError,
    JobListingStore, PooledConn, ResumeStore, SavedJobStore, SchemaReport, UserStore,
    initialize_schema, verify_schema,
};
pub use telemetry::{TelemetryError, init_tracing};
