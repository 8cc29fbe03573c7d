//! Account type value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::enumerated::EnumeratedDomain;
use crate::errors::DomainError;

/// Kind of account a user registered as
///
/// Fixed at registration in intended usage; storage does not prevent a
/// later update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    /// Looks for work: applies, saves jobs, uploads resumes
    JobSeeker,
    /// Offers work: owns companies and job listings
    Employer,
}

impl EnumeratedDomain for UserType {
    const DOMAIN: &'static str = "user_type";
    const VARIANTS: &'static [Self] = &[Self::JobSeeker, Self::Employer];

    fn as_str(&self) -> &'static str {
        match self {
            Self::JobSeeker => "job_seeker",
            Self::Employer => "employer",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s)
    }
}
