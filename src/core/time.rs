//! Projection of abstract solver time onto calendar time.
//!
//! The solver reasons over integer time points with no epoch. For display, a
//! [`TimeConfig`] anchors time `0` at a base date and gives each unit a length.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length of one solver time unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        }
    }

    pub fn milliseconds(self) -> i64 {
        match self {
            TimeUnit::Seconds => 1_000,
            TimeUnit::Minutes => 60 * 1_000,
            TimeUnit::Hours => 60 * 60 * 1_000,
            TimeUnit::Days => 24 * 60 * 60 * 1_000,
        }
    }

    /// Like [`FromStr`], but an unrecognized unit falls back to seconds.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or(TimeUnit::Seconds)
    }
}

impl Default for TimeUnit {
    fn default() -> Self {
        TimeUnit::Seconds
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "seconds" => Ok(TimeUnit::Seconds),
            "minutes" => Ok(TimeUnit::Minutes),
            "hours" => Ok(TimeUnit::Hours),
            "days" => Ok(TimeUnit::Days),
            other => Err(format!(
                "Unknown time unit: {}. Use 'seconds', 'minutes', 'hours', or 'days'",
                other
            )),
        }
    }
}

/// Display-time anchoring of solver time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeConfig {
    pub base_date: DateTime<Utc>,
    pub unit: TimeUnit,
}

impl Default for TimeConfig {
    fn default() -> Self {
        // 2001-01-01T00:00:00Z
        let base_date = DateTime::<Utc>::UNIX_EPOCH + TimeDelta::days(11_323);
        Self { base_date, unit: TimeUnit::Seconds }
    }
}

impl TimeConfig {
    pub fn new(base_date: DateTime<Utc>, unit: TimeUnit) -> Self {
        Self { base_date, unit }
    }

    /// Build a config from textual settings.
    ///
    /// `base_date` is an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (midnight UTC).
    /// An unrecognized `unit` falls back to seconds.
    pub fn parse(base_date: &str, unit: &str) -> Result<Self> {
        Ok(Self { base_date: parse_base_date(base_date)?, unit: TimeUnit::parse_lossy(unit) })
    }
}

fn parse_base_date(text: &str) -> Result<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| Error::InvalidTimeConfig(format!("unparseable base date '{}'", text)))
}

/// Convert a solver time value to an absolute timestamp.
///
/// Results beyond chrono's representable range saturate at its bounds.
pub fn to_absolute_time(value: i64, config: &TimeConfig) -> DateTime<Utc> {
    let offset_ms = value.saturating_mul(config.unit.milliseconds());
    TimeDelta::try_milliseconds(offset_ms)
        .and_then(|delta| config.base_date.checked_add_signed(delta))
        .unwrap_or(if offset_ms < 0 { DateTime::<Utc>::MIN_UTC } else { DateTime::<Utc>::MAX_UTC })
}

/// Render both ends of a solver time range as ISO 8601 timestamps.
pub fn format_range(start: i64, end: i64, config: &TimeConfig) -> String {
    format!("{} → {}", iso_millis(to_absolute_time(start, config)), iso_millis(to_absolute_time(end, config)))
}

fn iso_millis(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
