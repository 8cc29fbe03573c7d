//! Email address value object with validation
//!
//! The `Users.email` column is `VARCHAR(100)`, so an address must be both
//! well-formed and at most 100 characters after normalization.
//!
//! # Examples
//!
//! ```
//! use domain::EmailAddress;
//!
//! let email = EmailAddress::new("Alice@Example.COM").unwrap();
//! assert_eq!(email.as_str(), "alice@example.com");
//!
//! assert!(EmailAddress::new("invalid").is_err());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::DomainError;

/// Width of the `email` column
pub const EMAIL_MAX_LEN: u64 = 100;

/// A validated email address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
#[serde(transparent)]
pub struct EmailAddress {
    #[validate(email, length(max = EMAIL_MAX_LEN))]
    value: String,
}

impl EmailAddress {
    /// Create a new email address, validating format and width
    ///
    /// # Errors
    ///
    /// Returns an error if the format is invalid or the address is wider
    /// than the column.
    pub fn new(email: impl Into<String>) -> Result<Self, DomainError> {
        let value = email.into().trim().to_lowercase();

        let candidate = Self { value };
        candidate
            .validate()
            .map_err(|e| DomainError::InvalidEmailAddress(e.to_string()))?;

        Ok(candidate)
    }

    /// Get the email address as a string slice
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<&str> for EmailAddress {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
