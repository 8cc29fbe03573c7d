//! Domain-level errors

use thiserror::Error;
use validator::ValidationErrors;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// A value lies outside its declared domain: an unknown enumeration
    /// name, an over-width string, a decimal out of precision, or a blank
    /// required field
    #[error("Domain violation: {0}")]
    DomainViolation(String),

    /// Invalid email address format
    #[error("Invalid email address: {0}")]
    InvalidEmailAddress(String),
}

impl DomainError {
    /// Create a domain violation for a value outside an enumerated domain
    pub fn not_in_domain(domain: &str, value: &str, allowed: &[&str]) -> Self {
        Self::DomainViolation(format!(
            "'{value}' is not a valid {domain} (expected one of: {})",
            allowed.join(", ")
        ))
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        Self::DomainViolation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_in_domain_lists_allowed_values() {
        let err = DomainError::not_in_domain("user_type", "admin", &["job_seeker", "employer"]);
        assert_eq!(
            err.to_string(),
            "Domain violation: 'admin' is not a valid user_type (expected one of: job_seeker, employer)"
        );
    }

    #[test]
    fn invalid_email_error_message() {
        let err = DomainError::InvalidEmailAddress("bad-email".to_string());
        assert_eq!(err.to_string(), "Invalid email address: bad-email");
    }

    #[test]
    fn validation_errors_become_domain_violations() {
        let err = DomainError::from(ValidationErrors::new());
        assert!(matches!(err, DomainError::DomainViolation(_)));
    }
}
