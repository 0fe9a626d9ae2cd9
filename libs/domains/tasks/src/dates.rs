//! Calendar-date handling for due dates.
//!
//! The task service stores due dates as ISO-like strings that may or may not
//! carry a time of day and an offset. Filtering and display only ever look at
//! the calendar date, taken in the offset the value was written with.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Display and input format for due dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Read the calendar date out of a stored due-date string.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps
/// and plain `YYYY-MM-DD` dates. Anything else yields `None`.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    if let Ok(timestamp) = raw.parse::<NaiveDateTime>() {
        return Some(timestamp.date());
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// Parse a user-entered date, which must be exactly `YYYY-MM-DD`
pub fn parse_input_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Render a stored due date as `YYYY-MM-DD`; empty when absent or unreadable
pub fn format_due_date(raw: Option<&str>) -> String {
    raw.and_then(parse_calendar_date)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
