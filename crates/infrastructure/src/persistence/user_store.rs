//! SQLite user store
//!
//! Reads and writes rows of `Users`. Field widths are validated before the
//! write; the user type is additionally guarded by the column's CHECK
//! constraint.

use domain::{EnumeratedDomain, NewUser, User, UserId, UserType};
use rusqlite::{Connection, OptionalExtension, Row};
use tracing::{debug, instrument};

use super::error::DatabaseError;
use super::schema::tables::USERS;
use super::sql::{InsertRow, encode_timestamp, read_required_enum, read_timestamp};

const SELECT_USER: &str = "SELECT user_id, username, password_hash, email, first_name, last_name, user_type, date_created FROM Users";

/// SQLite-based user store
#[derive(Debug, Clone, Copy)]
pub struct UserStore<'c> {
    conn: &'c Connection,
}

fn row_to_user(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: UserId::new(row.get(0)?),
        username: row.get(1)?,
        password_hash: row.get(2)?,
        email: row.get(3)?,
        first_name: row.get(4)?,
        last_name: row.get(5)?,
        user_type: read_required_enum(row, 6)?,
        date_created: read_timestamp(row, 7)?,
    })
}

impl<'c> UserStore<'c> {
    /// Create a store over a connection or open transaction
    #[must_use]
    pub const fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Insert a user and return it as stored
    ///
    /// `date_created` is assigned by storage unless supplied.
    #[instrument(skip(self, user), fields(username = %user.username, user_type = %user.user_type))]
    pub fn insert(&self, user: &NewUser) -> Result<User, DatabaseError> {
        user.check()?;

        let id = InsertRow::into_table(USERS)
            .set("username", user.username.clone())
            .set("password_hash", user.password_hash.clone())
            .set("email", user.email.as_str().to_string())
            .set("first_name", user.first_name.clone())
            .set("last_name", user.last_name.clone())
            .set("user_type", user.user_type.as_str().to_string())
            .set_or_default("date_created", user.date_created.map(encode_timestamp))
            .execute(self.conn)?;

        debug!(user_id = id, "Inserted user");
        Ok(self
            .conn
            .query_row(&format!("{SELECT_USER} WHERE user_id = ?1"), [id], row_to_user)?)
    }

    /// Get a user by id
    #[instrument(skip(self), fields(user_id = %id))]
    pub fn get(&self, id: UserId) -> Result<Option<User>, DatabaseError> {
        Ok(self
            .conn
            .query_row(
                &format!("{SELECT_USER} WHERE user_id = ?1"),
                [id.as_i64()],
                row_to_user,
            )
            .optional()?)
    }

    /// Find users by username
    ///
    /// Usernames carry no uniqueness constraint, so several rows may match.
    #[instrument(skip(self))]
    pub fn find_by_username(&self, username: &str) -> Result<Vec<User>, DatabaseError> {
        let users = self
            .conn
            .prepare(&format!("{SELECT_USER} WHERE username = ?1 ORDER BY user_id"))?
            .query_map([username], row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// List every user of one type
    #[instrument(skip(self), fields(user_type = %user_type))]
    pub fn list_by_type(&self, user_type: UserType) -> Result<Vec<User>, DatabaseError> {
        let users = self
            .conn
            .prepare(&format!("{SELECT_USER} WHERE user_type = ?1 ORDER BY user_id"))?
            .query_map([user_type.as_str()], row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }
}
