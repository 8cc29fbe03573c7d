//! Row encoding helpers shared by the stores
//!
//! Timestamps are RFC 3339 UTC text with millisecond precision, matching the
//! storage-side default expression. Dates are `YYYY-MM-DD`. Decoding
//! failures surface as `FromSqlConversionFailure` so they classify like any
//! other read error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use domain::{DomainError, EnumeratedDomain, Salary};
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusqlite::{
    Connection, Row, params_from_iter,
    types::{Type, Value, ValueRef},
};

use super::error::DatabaseError;

/// Storage-side expression for "now", used as the column default
pub const NOW_EXPR: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";

/// Encode a timestamp the way the column default does
pub fn encode_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Encode a calendar date
pub fn encode_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn conversion_failure(
    idx: usize,
    error: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(error))
}

/// Read a nullable timestamp column
///
/// Accepts RFC 3339 and SQLite's `CURRENT_TIMESTAMP` layout so rows written
/// by other tools still decode.
pub fn read_timestamp(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let Some(raw) = row.get::<_, Option<String>>(idx)? else {
        return Ok(None);
    };

    if let Ok(at) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }

    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%d %H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(|e| conversion_failure(idx, e))
}

/// Read a nullable date column
pub fn read_date(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    row.get::<_, Option<String>>(idx)?
        .map(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d"))
        .transpose()
        .map_err(|e| conversion_failure(idx, e))
}

/// Read a nullable enumerated column, rejecting names outside the set
pub fn read_enum<T: EnumeratedDomain>(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<T>> {
    row.get::<_, Option<String>>(idx)?
        .map(|raw| T::parse_name(&raw))
        .transpose()
        .map_err(|e| conversion_failure(idx, e))
}

/// Read a required enumerated column
pub fn read_required_enum<T: EnumeratedDomain>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T> {
    read_enum(row, idx)?.ok_or_else(|| {
        conversion_failure(
            idx,
            DomainError::DomainViolation(format!("{} is NULL", T::DOMAIN)),
        )
    })
}

/// Read a nullable `DECIMAL(10, 2)` column
///
/// SQLite's NUMERIC affinity may hand back an integer, a real or text
/// depending on how the value was written.
pub fn read_salary(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<Salary>> {
    let amount = match row.get_ref(idx)? {
        ValueRef::Null => return Ok(None),
        ValueRef::Integer(i) => Decimal::from(i),
        ValueRef::Real(f) => Decimal::from_f64(f)
            .ok_or_else(|| {
                conversion_failure(
                    idx,
                    DomainError::DomainViolation(format!("salary {f} is not a finite decimal")),
                )
            })?
            .round_dp(domain::SALARY_SCALE),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map_err(|e| conversion_failure(idx, e))?
            .trim()
            .parse::<Decimal>()
            .map_err(|e| conversion_failure(idx, e))?,
        ValueRef::Blob(_) => {
            return Err(rusqlite::Error::InvalidColumnType(
                idx,
                "salary".to_string(),
                Type::Blob,
            ));
        },
    };

    Salary::new(amount)
        .map(Some)
        .map_err(|e| conversion_failure(idx, e))
}

/// A single-row `INSERT` assembled column by column
///
/// Columns left out of the statement receive their storage default, which
/// is how insertion timestamps and the default application status are
/// assigned by the engine instead of by the caller.
#[derive(Debug)]
pub struct InsertRow {
    table: &'static str,
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl InsertRow {
    /// Start an insert into `table`
    pub fn into_table(table: &'static str) -> Self {
        Self {
            table,
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Write `value` (NULL for `None`) into `column`
    #[must_use]
    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.columns.push(column);
        self.values.push(value.into());
        self
    }

    /// Write `value` into `column` only when present, otherwise let the
    /// storage default apply
    #[must_use]
    pub fn set_or_default<V: Into<Value>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(column, value),
            None => self,
        }
    }

    /// Render the statement text
    pub fn sql(&self) -> String {
        if self.columns.is_empty() {
            return format!("INSERT INTO {} DEFAULT VALUES", self.table);
        }

        let placeholders = (1..=self.columns.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            self.table,
            self.columns.join(", ")
        )
    }

    /// Execute the insert and return the new row id
    pub fn execute(self, conn: &Connection) -> Result<i64, DatabaseError> {
        conn.execute(&self.sql(), params_from_iter(self.values.iter()))?;
        Ok(conn.last_insert_rowid())
    }
}
