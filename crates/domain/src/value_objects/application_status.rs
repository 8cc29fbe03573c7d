//! Application status value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::enumerated::EnumeratedDomain;
use crate::errors::DomainError;

/// Review outcome of a job application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Awaiting a decision from the employer
    #[default]
    Pending,
    /// Employer accepted the application
    Accepted,
    /// Employer rejected the application
    Rejected,
}

impl ApplicationStatus {
    /// Check if the employer has decided
    #[must_use]
    pub const fn is_decided(&self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }
}

impl EnumeratedDomain for ApplicationStatus {
    const DOMAIN: &'static str = "application status";
    const VARIANTS: &'static [Self] = &[Self::Pending, Self::Accepted, Self::Rejected];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_name(s)
    }
}
