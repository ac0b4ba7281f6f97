//! Aggregation interval units.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Bucket width used when aggregating taps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Hour,
    Day,
    Week,
    Month,
    Quarter,
}

impl Interval {
    pub const ALL: [Interval; 5] = [
        Interval::Hour,
        Interval::Day,
        Interval::Week,
        Interval::Month,
        Interval::Quarter,
    ];

    /// Unit name as understood by Postgres `DATE_TRUNC`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Hour => "hour",
            Interval::Day => "day",
            Interval::Week => "week",
            Interval::Month => "month",
            Interval::Quarter => "quarter",
        }
    }

    /// Truncate a timestamp to the start of its bucket.
    ///
    /// Mirrors `DATE_TRUNC` evaluated in UTC: weeks start on Monday and
    /// quarters start in January, April, July and October.
    pub fn truncate(&self, ts: DateTime<Utc>) -> DateTime<Utc> {
        let date = ts.date_naive();
        let start = match self {
            Interval::Hour => {
                date.and_time(NaiveTime::default()) + TimeDelta::hours(i64::from(ts.hour()))
            }
            Interval::Day => date.and_time(NaiveTime::default()),
            Interval::Week => {
                let offset = u64::from(date.weekday().num_days_from_monday());
                (date - Days::new(offset)).and_time(NaiveTime::default())
            }
            Interval::Month => month_start(date).and_time(NaiveTime::default()),
            Interval::Quarter => {
                let first_month = date.month0() / 3 * 3 + 1;
                NaiveDate::from_ymd_opt(date.year(), first_month, 1)
                    .unwrap_or_else(|| month_start(date))
                    .and_time(NaiveTime::default())
            }
        };
        Utc.from_utc_datetime(&start)
    }
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interval {
    type Err = DomainError;

    /// Case-insensitive parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Interval::ALL
            .into_iter()
            .find(|interval| interval.as_str() == lower)
            .ok_or_else(|| DomainError::InvalidInterval(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("HOUR".parse::<Interval>().unwrap(), Interval::Hour);
        assert_eq!("hour".parse::<Interval>().unwrap(), Interval::Hour);
        assert_eq!("Quarter".parse::<Interval>().unwrap(), Interval::Quarter);
    }

    #[test]
    fn test_parse_rejects_unknown_unit() {
        let err = "minute".parse::<Interval>().unwrap_err();
        assert_eq!(err, DomainError::InvalidInterval("minute".to_string()));
        assert!("".parse::<Interval>().is_err());
    }

    #[test]
    fn test_truncate_hour_and_day() {
        let ts = at("2024-01-01T23:45:12.500Z");
        assert_eq!(Interval::Hour.truncate(ts), at("2024-01-01T23:00:00Z"));
        assert_eq!(Interval::Day.truncate(ts), at("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn test_truncate_week_starts_monday() {
        // 2024-01-07 is a Sunday
        assert_eq!(
            Interval::Week.truncate(at("2024-01-07T10:00:00Z")),
            at("2024-01-01T00:00:00Z")
        );
        assert_eq!(
            Interval::Week.truncate(at("2024-01-08T00:00:00Z")),
            at("2024-01-08T00:00:00Z")
        );
    }

    #[test]
    fn test_truncate_month_and_quarter() {
        let ts = at("2024-08-19T06:30:00Z");
        assert_eq!(Interval::Month.truncate(ts), at("2024-08-01T00:00:00Z"));
        assert_eq!(Interval::Quarter.truncate(ts), at("2024-07-01T00:00:00Z"));
        assert_eq!(
            Interval::Quarter.truncate(at("2024-03-31T23:59:59Z")),
            at("2024-01-01T00:00:00Z")
        );
    }
}
