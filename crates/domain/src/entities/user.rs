//! User account entity
//!
//! Job seekers and employers share one table; `user_type` tells them apart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    errors::DomainError,
    value_objects::{EmailAddress, UserId, UserType},
};

/// A persisted user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Storage-assigned identifier
    pub id: UserId,
    /// Login name (not unique at the storage level)
    pub username: String,
    /// Opaque password hash, never the plaintext
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Contact address
    pub email: String,
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Account type
    pub user_type: UserType,
    /// Set by storage at insertion time
    pub date_created: Option<DateTime<Utc>>,
}

impl User {
    /// Full name when both parts are known
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            _ => None,
        }
    }
}

/// Insert payload for a user
#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 255))]
    pub password_hash: String,
    pub email: EmailAddress,
    #[validate(length(max = 50))]
    pub first_name: Option<String>,
    #[validate(length(max = 50))]
    pub last_name: Option<String>,
    pub user_type: UserType,
    /// Explicit creation time; storage assigns one when `None`
    pub date_created: Option<DateTime<Utc>>,
}

impl NewUser {
    /// Create a payload with the required fields
    pub fn new(
        username: impl Into<String>,
        password_hash: impl Into<String>,
        email: EmailAddress,
        user_type: UserType,
    ) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            email,
            first_name: None,
            last_name: None,
            user_type,
            date_created: None,
        }
    }

    /// Set first and last name
    #[must_use]
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    /// Override the storage-assigned creation time
    #[must_use]
    pub const fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.date_created = Some(at);
        self
    }

    /// Check every field against its column before writing
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()?;
        Ok(())
    }
}
