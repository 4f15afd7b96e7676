//! Conversion of store date offsets into display strings.
//!
//! Dates in the store count seconds from the first second of 1 Jan 2001,
//! the reference date used by Apple's frameworks, not the Unix epoch.

use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDateTime};

use crate::error::{ExportError, Result};

/// Output layout, e.g. `2001-01-01 00:00:00`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 2001-01-01T00:00:00 expressed in Unix seconds.
pub const APPLE_EPOCH_UNIX_SECS: i64 = 978_307_200;

/// Years that fit the four-digit output layout.
pub const YEAR_RANGE: RangeInclusive<i32> = 1..=9999;

/// Resolve an offset to a naive local datetime.
pub fn to_datetime(offset_secs: i64) -> Result<NaiveDateTime> {
    offset_secs
        .checked_add(APPLE_EPOCH_UNIX_SECS)
        .and_then(|unix| DateTime::from_timestamp(unix, 0))
        .map(|dt| dt.naive_utc())
        .filter(|dt| YEAR_RANGE.contains(&dt.year()))
        .ok_or(ExportError::TimestampOutOfRange { offset: offset_secs })
}

/// Format an offset as `YYYY-MM-DD HH:MM:SS`.
///
/// Offsets that land outside years 1 to 9999 are an error rather than being
/// clamped.
pub fn normalize(offset_secs: i64) -> Result<String> {
    to_datetime(offset_secs).map(|dt| dt.format(DATE_FORMAT).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_reference_date() {
        assert_eq!(normalize(0).unwrap(), "2001-01-01 00:00:00");
    }

    #[test]
    fn test_positive_offset() {
        // 2025-01-01 00:00:00
        assert_eq!(normalize(757_382_400).unwrap(), "2025-01-01 00:00:00");
        assert_eq!(normalize(86_399).unwrap(), "2001-01-01 23:59:59");
    }

    #[test]
    fn test_negative_offset() {
        assert_eq!(normalize(-1).unwrap(), "2000-12-31 23:59:59");
        // Unix epoch
        assert_eq!(normalize(-978_307_200).unwrap(), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_out_of_range_is_error() {
        assert!(matches!(
            normalize(i64::MAX),
            Err(ExportError::TimestampOutOfRange { offset: i64::MAX })
        ));
        // nanosecond-scale values overflow the calendar
        assert!(normalize(757_382_400_000_000_000).is_err());
    }

    #[test]
    fn test_year_bounds() {
        assert_eq!(normalize(252_423_993_599).unwrap(), "9999-12-31 23:59:59");
        assert!(normalize(252_423_993_600).is_err());

        assert_eq!(normalize(-63_113_904_000).unwrap(), "0001-01-01 00:00:00");
        assert!(normalize(-63_113_904_001).is_err());
        assert!(normalize(-63_200_000_000).is_err());
    }
}
