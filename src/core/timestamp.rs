//! Timestamp formats used by window labels and diagnostics output.

use crate::error::TallyError;
use chrono::NaiveDateTime;

/// Window labels: `YYYY-MM-DD HH:MM:SS` with an optional fractional part.
pub const WINDOW_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Diagnostics records: whole seconds only.
pub const RECORD_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a window endpoint.
pub fn parse_window_timestamp(value: &str) -> Result<NaiveDateTime, TallyError> {
    parse(value, WINDOW_FORMAT)
}

/// Parse a diagnostics record timestamp.
pub fn parse_record_timestamp(value: &str) -> Result<NaiveDateTime, TallyError> {
    parse(value, RECORD_FORMAT)
}

fn parse(value: &str, format: &str) -> Result<NaiveDateTime, TallyError> {
    NaiveDateTime::parse_from_str(value, format).map_err(|e| TallyError::Timestamp {
        value: value.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_window_timestamp_fractional() {
        let ts = parse_window_timestamp("2020-01-01 00:30:00.500000").unwrap();
        assert_eq!(ts.nanosecond(), 500_000_000);
        assert_eq!(ts.minute(), 30);
    }

    #[test]
    fn test_window_timestamp_whole_seconds() {
        let ts = parse_window_timestamp("2020-01-01 01:00:00").unwrap();
        let expected = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(1, 0, 0)
            .unwrap();
        assert_eq!(ts, expected);
    }

    #[test]
    fn test_record_timestamp_rejects_fraction() {
        assert!(parse_record_timestamp("2020-01-01 00:30:00").is_ok());
        assert!(parse_record_timestamp("2020-01-01 00:30:00.000000").is_err());
    }

    #[test]
    fn test_malformed_timestamp() {
        let err = parse_record_timestamp("2020-01-01T00:30:00Z").unwrap_err();
        assert!(matches!(err, TallyError::Timestamp { ref value, .. } if value == "2020-01-01T00:30:00Z"));
    }
}
