//! Time Normalizer Integration Tests

use casper_studio::core::{format_range, to_absolute_time, TimeConfig, TimeUnit};
use chrono::{TimeZone, Utc};

fn config(unit: TimeUnit) -> TimeConfig {
    TimeConfig::new(Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap(), unit)
}

#[test]
fn test_seconds_offset() {
    let absolute = to_absolute_time(3600, &config(TimeUnit::Seconds));
    assert_eq!(absolute, Utc.with_ymd_and_hms(2001, 1, 1, 1, 0, 0).unwrap());
}

#[test]
fn test_unit_multipliers() {
    assert_eq!(
        to_absolute_time(90, &config(TimeUnit::Minutes)),
        Utc.with_ymd_and_hms(2001, 1, 1, 1, 30, 0).unwrap()
    );
    assert_eq!(
        to_absolute_time(36, &config(TimeUnit::Hours)),
        Utc.with_ymd_and_hms(2001, 1, 2, 12, 0, 0).unwrap()
    );
    assert_eq!(
        to_absolute_time(59, &config(TimeUnit::Days)),
        Utc.with_ymd_and_hms(2001, 3, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn test_negative_values_go_before_base() {
    assert_eq!(
        to_absolute_time(-1, &config(TimeUnit::Days)),
        Utc.with_ymd_and_hms(2000, 12, 31, 0, 0, 0).unwrap()
    );
}

#[test]
fn test_unknown_unit_string_uses_seconds() {
    let parsed = TimeConfig::parse("2001-01-01T00:00:00Z", "eons").unwrap();
    assert_eq!(parsed, config(TimeUnit::Seconds));
    assert_eq!(TimeUnit::parse_lossy("hours"), TimeUnit::Hours);
}

#[test]
fn test_format_range_uses_iso_timestamps() {
    assert_eq!(
        format_range(0, 3600, &TimeConfig::default()),
        "2001-01-01T00:00:00.000Z → 2001-01-01T01:00:00.000Z"
    );
}

#[test]
fn test_base_date_with_offset_is_normalized_to_utc() {
    let parsed = TimeConfig::parse("2001-01-01T02:00:00+02:00", "seconds").unwrap();
    assert_eq!(parsed.base_date, Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap());
}
