//! Job application entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ApplicationId, ApplicationStatus, JobId, UserId};

/// A job seeker's application to a listing
///
/// Storage does not prevent a seeker from applying to the same listing
/// twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: Option<JobId>,
    pub job_seeker_id: Option<UserId>,
    /// Set by storage at insertion time
    pub application_date: Option<DateTime<Utc>>,
    /// `pending` unless given explicitly
    pub status: Option<ApplicationStatus>,
}

/// Insert payload for an application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApplication {
    pub job_id: Option<JobId>,
    pub job_seeker_id: Option<UserId>,
    /// Explicit status; storage defaults to `pending` when `None`
    pub status: Option<ApplicationStatus>,
    /// Explicit application time; storage assigns one when `None`
    pub application_date: Option<DateTime<Utc>>,
}

impl NewApplication {
    /// Apply `job_seeker_id` to `job_id`
    pub const fn new(job_id: JobId, job_seeker_id: UserId) -> Self {
        Self {
            job_id: Some(job_id),
            job_seeker_id: Some(job_seeker_id),
            status: None,
            application_date: None,
        }
    }

    /// Set an explicit status
    #[must_use]
    pub const fn with_status(mut self, status: ApplicationStatus) -> Self {
        self.status = Some(status);
        self
    }
}
