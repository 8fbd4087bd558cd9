//! Clock time source.
//!
//! The clock reads a single [`ClockTime`] per frame, either from a frozen
//! override or from the wall clock converted into the selected timezone.

use std::fmt;

use chrono::{NaiveTime, Timelike, Utc};
use chrono_tz::Tz;

/// Field of a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Hour,
    Minute,
    Second,
}

impl TimeField {
    /// Exclusive upper bound of the field.
    pub fn limit(self) -> u32 {
        match self {
            TimeField::Hour => 24,
            TimeField::Minute | TimeField::Second => 60,
        }
    }
}

impl fmt::Display for TimeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeField::Hour => "hour",
            TimeField::Minute => "minute",
            TimeField::Second => "second",
        };
        f.write_str(name)
    }
}

/// Error returned by time override and timezone operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    OutOfRange { field: TimeField, value: u32 },
    UnknownTimezone(String),
}

impl fmt::Display for TimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeError::OutOfRange { field, value } => {
                write!(f, "{field} {value} out of range (expected 0..{})", field.limit())
            }
            TimeError::UnknownTimezone(name) => write!(f, "unknown timezone '{name}'"),
        }
    }
}

impl std::error::Error for TimeError {}

/// Time of day shown by the readout and the hands (24h).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32, second: u32) -> Result<Self, TimeError> {
        for (field, value) in [
            (TimeField::Hour, hour),
            (TimeField::Minute, minute),
            (TimeField::Second, second),
        ] {
            if value >= field.limit() {
                return Err(TimeError::OutOfRange { field, value });
            }
        }
        Ok(Self { hour, minute, second })
    }

    /// Current wall-clock time in `tz`.
    pub fn now_in(tz: Tz) -> Self {
        Self::from(now_naive(tz))
    }
}

impl From<NaiveTime> for ClockTime {
    fn from(t: NaiveTime) -> Self {
        // Leap seconds live in the nanosecond field, so `second()` stays below 60.
        Self { hour: t.hour(), minute: t.minute(), second: t.second() }
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// Wall-clock time of day in `tz`.
pub fn now_naive(tz: Tz) -> NaiveTime {
    Utc::now().with_timezone(&tz).time()
}

/// Returns `time` with `field` replaced by `value`.
pub fn with_field(time: NaiveTime, field: TimeField, value: u32) -> Result<NaiveTime, TimeError> {
    let replaced = match field {
        TimeField::Hour => time.with_hour(value),
        TimeField::Minute => time.with_minute(value),
        TimeField::Second => time.with_second(value),
    };
    replaced.ok_or(TimeError::OutOfRange { field, value })
}

/// Parses an IANA timezone name such as `Europe/Paris`.
pub fn parse_timezone(name: &str) -> Result<Tz, TimeError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimezone(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).expect("valid time")
    }

    // ── ClockTime ─────────────────────────────────────────────────────────

    #[test]
    fn display_is_zero_padded() {
        assert_eq!(ClockTime::new(7, 5, 9).unwrap().to_string(), "07:05:09");
        assert_eq!(ClockTime::new(23, 59, 59).unwrap().to_string(), "23:59:59");
    }

    #[test]
    fn new_rejects_out_of_range() {
        assert_eq!(
            ClockTime::new(24, 0, 0),
            Err(TimeError::OutOfRange { field: TimeField::Hour, value: 24 })
        );
        assert_eq!(
            ClockTime::new(0, 0, 60),
            Err(TimeError::OutOfRange { field: TimeField::Second, value: 60 })
        );
    }

    #[test]
    fn from_naive_time() {
        assert_eq!(ClockTime::from(hms(13, 4, 55)), ClockTime { hour: 13, minute: 4, second: 55 });
    }

    // ── with_field ────────────────────────────────────────────────────────

    #[test]
    fn with_field_replaces_only_that_field() {
        let t = with_field(hms(10, 20, 30), TimeField::Minute, 45).unwrap();
        assert_eq!(t, hms(10, 45, 30));
    }

    #[test]
    fn with_field_rejects_out_of_range() {
        let err = with_field(hms(10, 20, 30), TimeField::Hour, 24).unwrap_err();
        assert_eq!(err, TimeError::OutOfRange { field: TimeField::Hour, value: 24 });
        assert!(with_field(hms(10, 20, 30), TimeField::Second, 60).is_err());
    }

    // ── timezones ─────────────────────────────────────────────────────────

    #[test]
    fn parses_known_timezones() {
        assert_eq!(parse_timezone("Europe/Paris").unwrap(), Tz::Europe__Paris);
        assert_eq!(parse_timezone("UTC").unwrap(), Tz::UTC);
    }

    #[test]
    fn unknown_timezone_is_error() {
        let err = parse_timezone("Mars/Olympus").unwrap_err();
        assert_eq!(err, TimeError::UnknownTimezone("Mars/Olympus".to_string()));
        assert_eq!(err.to_string(), "unknown timezone 'Mars/Olympus'");
    }

    #[test]
    fn fixed_offset_zone_differs_from_utc() {
        // Asia/Tokyo has no DST: always UTC+9.
        let utc = ClockTime::now_in(Tz::UTC);
        let tokyo = ClockTime::now_in(Tz::Asia__Tokyo);
        let diff = (tokyo.hour + 24 - utc.hour) % 24;
        // Allow the hour to roll over between the two reads.
        assert!(diff == 9 || diff == 10 || diff == 8, "diff = {diff}");
    }
}
