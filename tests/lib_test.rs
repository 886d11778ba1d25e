use casper_studio::{Error, Mode, TimeConfig, TimeUnit};
use std::path::PathBuf;

#[test]
fn test_error_display() {
    let err = Error::InvalidRequest("Missing required query params: app, mode".to_string());
    assert_eq!(format!("{}", err), "Missing required query params: app, mode");

    let err = Error::DirectoryNotFound(PathBuf::from("/opt/casper/app"));
    assert_eq!(format!("{}", err), "Directory not found: /opt/casper/app");
}

#[test]
fn test_error_from_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_error_from_json() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn test_result_type() {
    fn returns_result() -> casper_studio::Result<i32> {
        Ok(42)
    }

    assert_eq!(returns_result().unwrap(), 42);
}

#[test]
fn test_modes_round_trip_through_strings() {
    for mode in Mode::ALL {
        assert_eq!(mode.as_str().parse::<Mode>().unwrap(), mode);
    }
    assert!("optimistic".parse::<Mode>().is_err());
}

#[test]
fn test_default_time_config() {
    let config = TimeConfig::default();
    assert_eq!(config.unit, TimeUnit::Seconds);
    assert_eq!(config.base_date.to_rfc3339(), "2001-01-01T00:00:00+00:00");
}
