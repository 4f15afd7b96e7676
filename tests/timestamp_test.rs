use chrono::NaiveDateTime;
use proptest::prelude::*;

use chat_thread_export::ExportError;
use chat_thread_export::timestamp::{normalize, to_datetime, APPLE_EPOCH_UNIX_SECS, DATE_FORMAT};

#[test]
fn test_known_dates() {
    assert_eq!(normalize(0).unwrap(), "2001-01-01 00:00:00");
    assert_eq!(normalize(31_536_000).unwrap(), "2002-01-01 00:00:00");
    assert_eq!(normalize(-APPLE_EPOCH_UNIX_SECS).unwrap(), "1970-01-01 00:00:00");
}

#[test]
fn test_out_of_range_is_not_clamped() {
    assert!(normalize(i64::MIN).is_err());
    assert!(normalize(i64::MAX - 1).is_err());
}

#[test]
fn test_five_digit_years_are_rejected() {
    assert_eq!(normalize(252_423_993_599).unwrap(), "9999-12-31 23:59:59");
    assert!(matches!(
        normalize(252_423_993_600),
        Err(ExportError::TimestampOutOfRange { offset: 252_423_993_600 })
    ));
}

#[test]
fn test_years_before_one_are_rejected() {
    assert_eq!(normalize(-63_113_904_000).unwrap(), "0001-01-01 00:00:00");
    assert!(matches!(
        normalize(-63_113_904_001),
        Err(ExportError::TimestampOutOfRange { .. })
    ));
}

proptest! {
    #[test]
    fn normalized_string_parses_back(offset in -4_000_000_000_i64..4_000_000_000_i64) {
        let text = normalize(offset).unwrap();
        let parsed = NaiveDateTime::parse_from_str(&text, DATE_FORMAT).unwrap();
        prop_assert_eq!(parsed, to_datetime(offset).unwrap());
        prop_assert_eq!(parsed.and_utc().timestamp(), offset + APPLE_EPOCH_UNIX_SECS);
    }

    #[test]
    fn later_offsets_sort_later(a in 0_i64..3_000_000_000, b in 0_i64..3_000_000_000) {
        let (sa, sb) = (normalize(a).unwrap(), normalize(b).unwrap());
        prop_assert_eq!(a.cmp(&b), sa.cmp(&sb));
    }
}
