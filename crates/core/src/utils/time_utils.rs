use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::constants::DISPLAY_DATE_FORMAT;
use crate::errors::Result;

/// Formats an instant as a calendar date (no time-of-day).
pub fn format_date(instant: DateTime<Utc>) -> String {
    instant.date_naive().format(DISPLAY_DATE_FORMAT).to_string()
}

/// Parses a `YYYY-MM-DD` string into the instant at midday UTC of that date.
///
/// Midday keeps the instant safely inside the calendar day it names.
pub fn parse_reference_date(raw: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(raw.trim(), DISPLAY_DATE_FORMAT)?;
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
    Ok(date.and_time(noon).and_utc())
}
