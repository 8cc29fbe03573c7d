//! Resume entity
//!
//! Only the file path is persisted; the document itself lives elsewhere.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    errors::DomainError,
    value_objects::{ResumeId, UserId},
};

/// A resume uploaded by a job seeker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub id: ResumeId,
    pub job_seeker_id: Option<UserId>,
    pub resume_file_path: String,
    /// Set by storage at insertion time
    pub date_uploaded: Option<DateTime<Utc>>,
}

/// Insert payload for a resume
#[derive(Debug, Clone, Validate)]
pub struct NewResume {
    pub job_seeker_id: Option<UserId>,
    #[validate(length(min = 1, max = 255))]
    pub resume_file_path: String,
    pub date_uploaded: Option<DateTime<Utc>>,
}

impl NewResume {
    /// Reference a file uploaded by `job_seeker_id`
    pub fn new(job_seeker_id: UserId, resume_file_path: impl Into<String>) -> Self {
        Self {
            job_seeker_id: Some(job_seeker_id),
            resume_file_path: resume_file_path.into(),
            date_uploaded: None,
        }
    }

    /// Check every field against its column before writing
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_path_must_fit_column() {
        assert!(NewResume::new(UserId::new(1), "resumes/alice.pdf").check().is_ok());
        assert!(NewResume::new(UserId::new(1), "p".repeat(256)).check().is_err());
        assert!(NewResume::new(UserId::new(1), "").check().is_err());
    }
}
