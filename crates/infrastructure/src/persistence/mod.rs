//! Persistence module
//!
//! SQLite storage for the job portal: connection handle, schema
//! declaration and initialization, and one store per entity.

pub mod application_store;
pub mod category_store;
pub mod company_store;
pub mod connection;
pub mod error;
pub mod job_listing_store;
pub mod resume_store;
pub mod saved_job_store;
pub mod schema;
pub mod sql;
pub mod user_store;

pub use application_store::ApplicationStore;
pub use category_store::CategoryStore;
pub use company_store::CompanyStore;
pub use connection::{ConnectionPool, Database, PooledConn};
pub use error::DatabaseError;
pub use job_listing_store::JobListingStore;
pub use resume_store::ResumeStore;
pub use saved_job_store::SavedJobStore;
pub use schema::{
    ColumnDef, ForeignKey, SchemaReport, TableDef, initialize_schema, schema, tables,
    verify_schema,
};
pub use user_store::UserStore;
