//! Test fixtures for the persistence unit tests
//!
//! Provides a freshly initialized in-memory database with foreign keys
//! enforced, plus helpers that insert the parent rows most tables need.

use domain::{
    EmailAddress, JobId, NewJobListing, NewUser, UserId, UserType,
};
use rusqlite::Connection;

use crate::persistence::{JobListingStore, UserStore, initialize_schema};

/// Open an in-memory database with every table created
pub fn test_connection() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    initialize_schema(&mut conn).unwrap();
    conn
}

/// Insert a user of the given type and return its id
pub fn insert_user(conn: &Connection, username: &str, user_type: UserType) -> UserId {
    let email = EmailAddress::new(format!("{username}@example.com")).unwrap();
    UserStore::new(conn)
        .insert(&NewUser::new(username, "argon2id$hash", email, user_type))
        .unwrap()
        .id
}

/// Insert an employer and return its id
pub fn employer(conn: &Connection) -> UserId {
    insert_user(conn, "acme_hr", UserType::Employer)
}

/// Insert a job seeker and return its id
pub fn job_seeker(conn: &Connection) -> UserId {
    insert_user(conn, "alice", UserType::JobSeeker)
}

/// Insert a minimal job listing owned by `employer_id`
pub fn listing(conn: &Connection, employer_id: UserId, title: &str) -> JobId {
    JobListingStore::new(conn)
        .insert(&NewJobListing::new(employer_id, title, "Build and run things"))
        .unwrap()
        .id
}
