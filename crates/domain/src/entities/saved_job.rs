//! Saved job (bookmark) entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{JobId, SavedJobId, UserId};

/// A listing bookmarked by a job seeker
///
/// Saving the same listing twice yields two rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedJob {
    pub id: SavedJobId,
    pub job_id: Option<JobId>,
    pub job_seeker_id: Option<UserId>,
    /// Set by storage at insertion time
    pub date_saved: Option<DateTime<Utc>>,
}

/// Insert payload for a bookmark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSavedJob {
    pub job_id: Option<JobId>,
    pub job_seeker_id: Option<UserId>,
    pub date_saved: Option<DateTime<Utc>>,
}

impl NewSavedJob {
    /// Bookmark `job_id` for `job_seeker_id`
    pub const fn new(job_id: JobId, job_seeker_id: UserId) -> Self {
        Self {
            job_id: Some(job_id),
            job_seeker_id: Some(job_seeker_id),
            date_saved: None,
        }
    }
}
