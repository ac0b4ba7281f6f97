//! Aggregation inputs and outputs.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a caller-supplied date or date-time.
///
/// Accepts RFC 3339, naive date-times (read as UTC) and bare `YYYY-MM-DD`
/// dates (midnight UTC).
pub fn parse_instant(input: &str) -> Result<DateTime<Utc>, DomainError> {
    let input = input.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::default())))
        .map_err(|_| DomainError::InvalidDate(input.to_string()))
}

/// Closed time range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Parse both ends; fails if either is not a valid instant.
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        Ok(Self::new(parse_instant(start)?, parse_instant(end)?))
    }

    /// An inverted range can never match any event.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}

/// One row of an aggregation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucketCount {
    pub bucket_start: DateTime<Utc>,
    pub count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 5, 0, 0).unwrap();

        assert_eq!(parse_instant("2024-01-01T05:00:00Z").unwrap(), expected);
        assert_eq!(parse_instant("2024-01-01T07:00:00+02:00").unwrap(), expected);
        assert_eq!(parse_instant("2024-01-01T05:00:00").unwrap(), expected);
        assert_eq!(parse_instant("2024-01-01 05:00:00").unwrap(), expected);
        assert_eq!(parse_instant("2024-01-01T05:00").unwrap(), expected);
        assert_eq!(
            parse_instant("2024-01-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        assert!(matches!(
            parse_instant("yesterday"),
            Err(DomainError::InvalidDate(_))
        ));
        assert!(parse_instant("2024-13-01").is_err());
    }

    #[test]
    fn test_range_contains_both_ends() {
        let range = DateRange::parse("2024-01-01", "2024-01-02").unwrap();
        assert!(range.contains(range.start));
        assert!(range.contains(range.end));
        assert!(!range.is_inverted());

        let inverted = DateRange::new(range.end, range.start);
        assert!(inverted.is_inverted());
    }
}
