//! Canonical trade-date parsing and formatting.

use chrono::NaiveDate;
use thiserror::Error;

/// Canonical date format used at every service and file boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Compact date format used by the provider API (e.g. `20250106`).
pub const PROVIDER_DATE_FORMAT: &str = "%Y%m%d";

/// Error for date strings that do not parse in the expected format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid trade date '{input}': expected {expected}")]
pub struct DateParseError {
    /// The rejected input string.
    pub input: String,
    /// Human-readable description of the expected format.
    pub expected: &'static str,
}

/// Parses a canonical `YYYY-MM-DD` date string.
///
/// # Errors
///
/// Returns an error if the string is not a valid date in canonical form.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| DateParseError {
        input: s.to_string(),
        expected: "YYYY-MM-DD",
    })
}

/// Parses a compact `YYYYMMDD` date string as used by the provider API.
///
/// # Errors
///
/// Returns an error if the string is not a valid date in compact form.
pub fn parse_provider_date(s: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(s, PROVIDER_DATE_FORMAT).map_err(|_| DateParseError {
        input: s.to_string(),
        expected: "YYYYMMDD",
    })
}

/// Formats a date in canonical `YYYY-MM-DD` form.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats a date in the provider's compact `YYYYMMDD` form.
#[must_use]
pub fn provider_date(date: NaiveDate) -> String {
    date.format(PROVIDER_DATE_FORMAT).to_string()
}
