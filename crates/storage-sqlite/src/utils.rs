//! Text column codecs.
//!
//! Amounts and timestamps are stored as TEXT so that neither goes through a
//! float and both compare correctly as strings.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;

use crate::errors::StorageError;

/// Fixed-width RFC 3339 with nanoseconds, so lexical order is chronological.
pub fn timestamp_to_text(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn timestamp_from_text(raw: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::SerializationError(format!("bad timestamp {raw:?}: {e}")))
}

pub fn amount_to_text(value: Decimal) -> String {
    value.normalize().to_string()
}

pub fn amount_from_text(raw: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(raw)
        .map_err(|e| StorageError::SerializationError(format!("bad amount {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn timestamps_sort_as_text() {
        let earlier = Utc.with_ymd_and_hms(2024, 5, 13, 0, 0, 0).unwrap();
        let later = earlier + chrono::Duration::nanoseconds(1);
        assert!(timestamp_to_text(earlier) < timestamp_to_text(later));
        assert_eq!(timestamp_from_text(&timestamp_to_text(later)).unwrap(), later);
    }

    #[test]
    fn amounts_keep_exact_value() {
        let text = amount_to_text(dec!(15.50));
        assert_eq!(text, "15.5");
        assert_eq!(amount_from_text(&text).unwrap(), dec!(15.50));
    }

    #[test]
    fn corrupt_values_are_errors() {
        assert!(timestamp_from_text("yesterday").is_err());
        assert!(amount_from_text("twelve").is_err());
    }
}
