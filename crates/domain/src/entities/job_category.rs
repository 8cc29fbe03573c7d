//! Job category taxonomy and its link to listings

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    errors::DomainError,
    value_objects::{CategoryId, JobId, JobListingCategoryId},
};

/// A named taxonomy entry (names are not unique)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCategory {
    pub id: CategoryId,
    pub category_name: String,
}

/// Insert payload for a category
#[derive(Debug, Clone, Validate)]
pub struct NewJobCategory {
    #[validate(length(min = 1, max = 50))]
    pub category_name: String,
}

impl NewJobCategory {
    /// Create a payload
    pub fn new(category_name: impl Into<String>) -> Self {
        Self {
            category_name: category_name.into(),
        }
    }

    /// Check the name against its column before writing
    pub fn check(&self) -> Result<(), DomainError> {
        self.validate()?;
        Ok(())
    }
}

/// Many-to-many link between a listing and a category
///
/// Linking the same pair twice yields two rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListingCategory {
    pub id: JobListingCategoryId,
    pub job_id: Option<JobId>,
    pub category_id: Option<CategoryId>,
}
