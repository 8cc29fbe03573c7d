//! Closed value sets
//!
//! Enumerated columns persist the snake_case name of the variant. The same
//! name list drives both parsing here and the CHECK constraint declared at
//! the storage boundary, so the two cannot drift apart.

use crate::errors::DomainError;

/// A closed set of named values stored in a single column
pub trait EnumeratedDomain: Copy + Sized + 'static {
    /// Name of the domain, used in error messages
    const DOMAIN: &'static str;

    /// Every member of the set, in declaration order
    const VARIANTS: &'static [Self];

    /// The persisted name of this member
    fn as_str(&self) -> &'static str;

    /// Persisted names of every member
    fn names() -> Vec<&'static str> {
        Self::VARIANTS.iter().map(Self::as_str).collect()
    }

    /// Parse a persisted name, rejecting anything outside the set
    fn parse_name(value: &str) -> Result<Self, DomainError> {
        Self::VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.as_str() == value)
            .ok_or_else(|| DomainError::not_in_domain(Self::DOMAIN, value, &Self::names()))
    }

    /// Width of the longest persisted name
    fn max_len() -> usize {
        Self::VARIANTS
            .iter()
            .map(|variant| variant.as_str().len())
            .max()
            .unwrap_or(0)
    }
}
