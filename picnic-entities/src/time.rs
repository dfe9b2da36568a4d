use std::{fmt, str::FromStr};

use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// A point in time with sub-second precision, always in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

#[derive(Debug, Error)]
#[error("Invalid timestamp: {0}")]
pub struct TimestampParseError(String);

impl Timestamp {
    pub const UNIX_EPOCH: Self = Self(OffsetDateTime::UNIX_EPOCH);

    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn try_from_secs(secs: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp(secs).ok().map(Self)
    }

    pub fn try_from_millis(millis: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
            .ok()
            .map(Self)
    }

    pub fn as_secs(&self) -> i64 {
        self.0.unix_timestamp()
    }

    pub fn as_millis(&self) -> i64 {
        (self.0.unix_timestamp_nanos() / 1_000_000) as i64
    }

    pub fn to_rfc3339(&self) -> String {
        // Formatting only fails for years beyond 9999.
        self.0
            .format(&Rfc3339)
            .unwrap_or_else(|_| self.as_secs().to_string())
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::UNIX_EPOCH
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(from: OffsetDateTime) -> Self {
        Self(from.to_offset(time::UtcOffset::UTC))
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(from: Timestamp) -> Self {
        from.0
    }
}

impl FromStr for Timestamp {
    type Err = TimestampParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OffsetDateTime::parse(s.trim(), &Rfc3339)
            .map(Into::into)
            .map_err(|_| TimestampParseError(s.to_owned()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_from_into_millis() {
        let t1 = Timestamp::now();
        let t2 = Timestamp::try_from_millis(t1.as_millis()).unwrap();
        assert_eq!(t1.as_millis(), t2.as_millis());
    }

    #[test]
    fn parse_store_timestamps() {
        let t: Timestamp = "2024-05-01T12:34:56.123456+00:00".parse().unwrap();
        assert_eq!(t.as_secs(), 1_714_566_896);
        let t: Timestamp = "2024-05-01T14:34:56+02:00".parse().unwrap();
        assert_eq!(t.as_secs(), 1_714_566_896);
        assert!("yesterday".parse::<Timestamp>().is_err());
    }

    #[test]
    fn format_and_parse_again() {
        let t = Timestamp::try_from_secs(1_700_000_000).unwrap();
        let s = t.to_string();
        assert_eq!(s, "2023-11-14T22:13:20Z");
        assert_eq!(s.parse::<Timestamp>().unwrap(), t);
    }
}
