//! Value Objects - Immutable, identity-less domain primitives

mod application_status;
mod email_address;
mod entity_ids;
mod enumerated;
mod job_type;
mod salary;
mod user_type;

pub use application_status::ApplicationStatus;
pub use email_address::{EMAIL_MAX_LEN, EmailAddress};
pub use entity_ids::{
    ApplicationId, CategoryId, CompanyId, JobId, JobListingCategoryId, ResumeId, SavedJobId,
    UserId,
};
pub use enumerated::EnumeratedDomain;
pub use job_type::JobType;
pub use salary::{SALARY_PRECISION, SALARY_SCALE, Salary};
pub use user_type::UserType;
