//! ISO 8601 timestamps as sent by Discord.
//!
//! Discord emits two ISO 8601 formats, with microseconds
//! (`2021-01-01T01:01:01.010000+00:00`) and without
//! (`2021-01-01T01:01:01+00:00`). A [`Timestamp`] keeps the exact string it
//! was parsed from, so re-serializing an entity reproduces the payload byte
//! for byte, and carries the chrono value alongside for arithmetic.

mod error;

pub use self::error::{TimestampParseError, TimestampParseErrorType};

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};
use serde::{
    de::{Deserialize, Deserializer, Error as DeError, Visitor},
    ser::{Serialize, Serializer},
};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    hash::{Hash, Hasher},
    str::FromStr,
};

/// Minimum length of an ISO 8601 datetime without microseconds.
///
/// Example: `2021-01-01T01:01:01+00:00` (25 characters).
const MIN_TIMESTAMP_LENGTH: usize = 25;

/// A Discord timestamp.
#[derive(Clone, Debug)]
pub struct Timestamp {
    raw: String,
    datetime: DateTime<FixedOffset>,
}

impl Timestamp {
    /// Parse a timestamp from an ISO 8601 datetime string.
    ///
    /// # Errors
    ///
    /// Returns [`TimestampParseErrorType::Format`] if the string is too short
    /// to be a datetime, and [`TimestampParseErrorType::Parsing`] if chrono
    /// rejects it.
    pub fn parse(datetime: &str) -> Result<Self, TimestampParseError> {
        if datetime.len() < MIN_TIMESTAMP_LENGTH || !datetime.contains('T') {
            return Err(TimestampParseError::FORMAT);
        }

        let parsed =
            DateTime::parse_from_rfc3339(datetime).map_err(TimestampParseError::parsing)?;

        Ok(Self {
            raw: datetime.to_owned(),
            datetime: parsed,
        })
    }

    /// Build a timestamp from a UTC datetime, formatted the way Discord
    /// formats it.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        let fixed = datetime.fixed_offset();
        Self {
            raw: fixed.to_rfc3339_opts(SecondsFormat::Micros, false),
            datetime: fixed,
        }
    }

    /// Create a timestamp from a Unix timestamp with seconds precision.
    ///
    /// Returns `None` if the value is outside chrono's supported range.
    pub fn from_secs(unix_seconds: i64) -> Option<Self> {
        DateTime::from_timestamp(unix_seconds, 0).map(Self::from_datetime)
    }

    /// Total number of seconds since the Unix epoch.
    pub fn as_secs(&self) -> i64 {
        self.datetime.timestamp()
    }

    /// Total number of microseconds since the Unix epoch.
    pub fn as_micros(&self) -> i64 {
        self.datetime.timestamp_micros()
    }

    /// The parsed datetime.
    pub const fn datetime(&self) -> DateTime<FixedOffset> {
        self.datetime
    }

    /// The timestamp exactly as it appeared on the wire.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.datetime == other.datetime
    }
}

impl Eq for Timestamp {}

impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.datetime.hash(state);
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.raw)
    }
}

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TimestampVisitor;

        impl Visitor<'_> for TimestampVisitor {
            type Value = Timestamp;

            fn expecting(&self, f: &mut Formatter<'_>) -> FmtResult {
                f.write_str("an ISO 8601 datetime string")
            }

            fn visit_str<E: DeError>(self, v: &str) -> Result<Self::Value, E> {
                Timestamp::parse(v).map_err(DeError::custom)
            }
        }

        deserializer.deserialize_str(TimestampVisitor)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::{Timestamp, TimestampParseErrorType};
    use std::str::FromStr;

    #[test]
    fn parse_with_microseconds() {
        let ts = Timestamp::from_str("2020-02-02T02:02:02.020000+00:00").unwrap();
        assert_eq!(ts.as_str(), "2020-02-02T02:02:02.020000+00:00");
        assert_eq!(ts.as_micros(), 1_580_608_922_020_000);
    }

    #[test]
    fn parse_without_microseconds() {
        let ts = Timestamp::from_str("2021-01-01T01:01:01+00:00").unwrap();
        assert_eq!(ts.as_secs(), 1_609_462_861);
    }

    #[test]
    fn parse_too_short() {
        let error = Timestamp::from_str("2021-01-01").unwrap_err();
        assert_eq!(error.kind(), &TimestampParseErrorType::Format);
    }

    #[test]
    fn parse_bad_component() {
        let error = Timestamp::from_str("2021-13-01T01:01:01+00:00").unwrap_err();
        assert_eq!(error.kind(), &TimestampParseErrorType::Parsing);
    }

    #[test]
    fn serde_round_trip_keeps_the_raw_string() {
        let original = "2021-08-10T11:16:37.020000+00:00";
        let ts = Timestamp::from_str(original).unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, format!("\"{original}\""));

        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ts);
    }

    #[test]
    fn from_secs_formats_like_discord() {
        let ts = Timestamp::from_secs(1_580_608_922).unwrap();
        assert_eq!(ts.as_str(), "2020-02-02T02:02:02.000000+00:00");
        assert_eq!(ts.as_secs(), 1_580_608_922);
    }
}
