//! Calendar date helpers.
//!
//! Every check-in comparison works on `NaiveDate` (year, month, day with no
//! time or timezone component). Strings enter the domain only through the
//! parsers below, which reject anything that is not a real calendar date.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::shared::DomainError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const MONTH_FORMAT: &str = "%Y-%m";

/// Parse a strict `YYYY-MM-DD` date.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, DomainError> {
    let trimmed = value.trim();
    if !has_date_shape(trimmed) {
        return Err(DomainError::InvalidDate(format!(
            "expected YYYY-MM-DD, got '{}'",
            value
        )));
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|e| DomainError::InvalidDate(format!("'{}': {}", value, e)))
}

/// Reduce an ISO 8601 date or datetime to its calendar date.
///
/// Offsets are not converted: `2024-03-10T23:30:00-05:00` is 2024-03-10, the
/// date as written by the service that produced it.
pub fn date_from_iso_datetime(value: &str) -> Result<NaiveDate, DomainError> {
    let trimmed = value.trim();
    if trimmed.len() == 10 {
        return parse_calendar_date(trimmed);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt.date());
        }
    }

    Err(DomainError::InvalidDate(format!(
        "expected ISO 8601 date or datetime, got '{}'",
        value
    )))
}

pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `YYYY-MM` bucket used by the monthly summaries
pub fn month_key(date: NaiveDate) -> String {
    date.format(MONTH_FORMAT).to_string()
}

// chrono accepts unpadded fields, the storage keys do not
fn has_date_shape(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
