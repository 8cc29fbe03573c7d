//! Employment type value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::enumerated::EnumeratedDomain;
use crate::errors::DomainError;

/// Employment arrangement offered by a job listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    /// Full-time position
    FullTime,
    /// Part-time position
    PartTime,
    /// Fixed-term contract
    Contract,
}

impl JobType {
    /// Get a human-readable label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FullTime => "full-time",
            Self::PartTime => "part-time",
            Self::Contract => "contract",
        }
    }
}

impl EnumeratedDomain for JobType {
    const DOMAIN: &'static str = "job_type";
    const VARIANTS: &'static [Self] = &[Self::FullTime, Self::PartTime, Self::Contract];

    fn as_str(&self) -> &'static str {
        match self {
            Self::FullTime => "full_time",
            Self::PartTime => "part_time",
            Self::Contract => "contract",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s)
    }
}
