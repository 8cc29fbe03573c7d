//! Company entity

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    errors::DomainError,
    value_objects::{CompanyId, UserId},
};

/// A company owned by an employer account
///
/// One employer may own any number of companies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: CompanyId,
    pub employer_id: Option<UserId>,
    pub company_name: String,
    pub industry: Option<String>,
    pub company_description: Option<String>,
    pub location: Option<String>,
}

/// Insert payload for a company
#[derive(Debug, Clone, Validate)]
pub struct NewCompany {
    pub employer_id: Option<UserId>,
    #[validate(length(min = 1, max = 100))]
    pub company_name: String,
    #[validate(length(max = 50))]
    pub industry: Option<String>,
    pub company_description: Option<String>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
}

impl NewCompany {
    /// Create a payload owned by `employer_id`
    pub fn new(employer_id: UserId, company_name: impl Into<String>) -> Self {
        Self {
            employer_id: Some(employer_id),
            company_name: company_name.into(),
            industry: None,
            company_description: None,
            location: None,
        }
    }

    /// Set the industry
    #[must_use]
    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Set the free-form description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.company_description = Some(description.into());
        self
    }

    /// Set the location
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Check every field against its column before writing
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()?;
        Ok(())
    }
}
