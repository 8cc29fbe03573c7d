//! Domain entities - Rows with identity, one module per table

mod application;
mod company;
mod job_category;
mod job_listing;
mod resume;
mod saved_job;
mod user;

pub use application::{Application, NewApplication};
pub use company::{Company, NewCompany};
pub use job_category::{JobCategory, JobListingCategory, NewJobCategory};
pub use job_listing::{JobListing, NewJobListing};
pub use resume::{NewResume, Resume};
pub use saved_job::{NewSavedJob, SavedJob};
pub use user::{NewUser, User};
