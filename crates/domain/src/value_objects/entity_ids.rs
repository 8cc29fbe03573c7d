//! Row identifiers
//!
//! Every entity is keyed by an auto-incrementing integer assigned by the
//! storage engine at insertion time. Identifiers are never reused, so a
//! typed wrapper per entity keeps a `JobId` from being passed where a
//! `UserId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a storage-assigned row id
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw row id
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

entity_id!(
    /// Identifier of a row in `Users`
    UserId
);
entity_id!(
    /// Identifier of a row in `Companies`
    CompanyId
);
entity_id!(
    /// Identifier of a row in `JobListings`
    JobId
);
entity_id!(
    /// Identifier of a row in `Applications`
    ApplicationId
);
entity_id!(
    /// Identifier of a row in `Resumes`
    ResumeId
);
entity_id!(
    /// Identifier of a row in `SavedJobs`
    SavedJobId
);
entity_id!(
    /// Identifier of a row in `JobCategories`
    CategoryId
);
entity_id!(
    /// Identifier of a row in `JobListingCategories`
    JobListingCategoryId
);
