//! Salary value object
//!
//! Mirrors the `DECIMAL(10, 2)` column: at most ten significant digits, two
//! of them after the decimal point. Values that would need rounding or that
//! overflow the integer part are rejected instead of silently truncated.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Total number of significant digits in the column
pub const SALARY_PRECISION: u32 = 10;

/// Number of fractional digits in the column
pub const SALARY_SCALE: u32 = 2;

/// A fixed-point salary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Salary(Decimal);

impl Salary {
    /// Validate an amount against the column precision
    ///
    /// # Errors
    ///
    /// Returns `DomainViolation` if the amount has more than two fractional
    /// digits or more than eight integer digits.
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount.round_dp(SALARY_SCALE) != amount {
            return Err(DomainError::DomainViolation(format!(
                "salary {amount} has more than {SALARY_SCALE} fractional digits"
            )));
        }

        let integer_limit = Decimal::from(10_i64.pow(SALARY_PRECISION - SALARY_SCALE));
        if amount.abs().trunc() >= integer_limit {
            return Err(DomainError::DomainViolation(format!(
                "salary {amount} exceeds DECIMAL({SALARY_PRECISION}, {SALARY_SCALE})"
            )));
        }

        let mut normalized = amount;
        normalized.rescale(SALARY_SCALE);
        Ok(Self(normalized))
    }

    /// Get the amount
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Salary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Salary {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::DomainViolation(format!("invalid salary '{s}': {e}")))?;
        Self::new(amount)
    }
}

impl TryFrom<Decimal> for Salary {
    type Error = DomainError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Salary> for Decimal {
    fn from(salary: Salary) -> Self {
        salary.0
    }
}
