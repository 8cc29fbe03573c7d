//! Job listing entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    errors::DomainError,
    value_objects::{JobId, JobType, Salary, UserId},
};

/// A job offered by an employer account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    /// Storage-assigned identifier
    pub id: JobId,
    /// Owning account; storage does not check that it is an employer
    pub employer_id: Option<UserId>,
    pub job_title: String,
    pub job_description: String,
    pub location: Option<String>,
    pub salary: Option<Salary>,
    /// Set by storage at insertion time
    pub date_posted: Option<DateTime<Utc>>,
    pub application_deadline: Option<NaiveDate>,
    pub job_type: Option<JobType>,
}

/// Insert and update payload for a job listing
#[derive(Debug, Clone, Validate)]
pub struct NewJobListing {
    pub employer_id: Option<UserId>,
    #[validate(length(min = 1, max = 100))]
    pub job_title: String,
    #[validate(length(min = 1))]
    pub job_description: String,
    #[validate(length(max = 100))]
    pub location: Option<String>,
    pub salary: Option<Salary>,
    pub application_deadline: Option<NaiveDate>,
    pub job_type: Option<JobType>,
    /// Explicit posting time; storage assigns one when `None`
    pub date_posted: Option<DateTime<Utc>>,
}

impl NewJobListing {
    /// Create a payload with the required fields
    pub fn new(
        employer_id: UserId,
        job_title: impl Into<String>,
        job_description: impl Into<String>,
    ) -> Self {
        Self {
            employer_id: Some(employer_id),
            job_title: job_title.into(),
            job_description: job_description.into(),
            location: None,
            salary: None,
            application_deadline: None,
            job_type: None,
            date_posted: None,
        }
    }

    /// Set the location
    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Set the salary
    #[must_use]
    pub const fn salary(mut self, salary: Salary) -> Self {
        self.salary = Some(salary);
        self
    }

    /// Set the last day applications are accepted
    #[must_use]
    pub const fn deadline(mut self, deadline: NaiveDate) -> Self {
        self.application_deadline = Some(deadline);
        self
    }

    /// Set the employment type
    #[must_use]
    pub const fn job_type(mut self, job_type: JobType) -> Self {
        self.job_type = Some(job_type);
        self
    }

    /// Check every field against its column before writing
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()?;
        Ok(())
    }
}
