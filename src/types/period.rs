//! Calendar value types used to key resampled aggregates.

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Year(pub i32);
impl Year {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl Display for Year {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Month(pub i32, pub u32);
impl Month {
    pub fn year(self) -> i32 {
        self.0
    }
    pub fn month(self) -> u32 {
        self.1
    }
    pub fn new(month: u32, year: i32) -> Self {
        Self(year, month)
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.0, self.1)
    }
}

/// Granularity used to group observations when resampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bucket {
    /// Calendar month.
    Month,
    /// Calendar year.
    Year,
}

impl Bucket {
    /// Truncates `datetime` to midnight on the first day of its bucket.
    ///
    /// # Examples
    ///
    /// ```
    /// use air_quality::Bucket;
    /// use chrono::NaiveDate;
    ///
    /// let dt = NaiveDate::from_ymd_opt(2014, 7, 19).unwrap().and_hms_opt(13, 0, 0).unwrap();
    /// let midnight = |m, d| {
    ///     NaiveDate::from_ymd_opt(2014, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    /// };
    /// let month_start = midnight(7, 1);
    /// let year_start = midnight(1, 1);
    /// assert_eq!(Bucket::Month.truncate(dt), month_start);
    /// assert_eq!(Bucket::Year.truncate(dt), year_start);
    /// ```
    pub fn truncate(&self, datetime: NaiveDateTime) -> NaiveDateTime {
        let date = datetime.date();
        let days_into_bucket = match self {
            Bucket::Month => date.day0(),
            Bucket::Year => date.ordinal0(),
        };
        (date - Days::new(u64::from(days_into_bucket))).and_time(NaiveTime::MIN)
    }

    /// The calendar period `datetime` falls into.
    pub fn period(&self, datetime: NaiveDateTime) -> Period {
        match self {
            Bucket::Month => Period::Month(Month::new(datetime.month(), datetime.year())),
            Bucket::Year => Period::Year(Year(datetime.year())),
        }
    }
}

impl Display for Bucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Bucket::Month => f.write_str("monthly"),
            Bucket::Year => f.write_str("annual"),
        }
    }
}

/// A single month or year, the key of a resampled value.
///
/// Periods of the same granularity order chronologically.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub enum Period {
    Month(Month),
    Year(Year),
}

impl Period {
    /// Midnight on the first day of the period.
    pub fn start(&self) -> NaiveDateTime {
        let date = match self {
            Period::Month(month) => NaiveDate::from_ymd_opt(month.year(), month.month(), 1),
            Period::Year(year) => NaiveDate::from_ymd_opt(year.get(), 1, 1),
        };
        date.unwrap_or(NaiveDate::MIN).and_time(NaiveTime::MIN)
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Period::Month(month) => write!(f, "{}", month),
            Period::Year(year) => write!(f, "{}", year),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_truncate_first_hour_is_unchanged() {
        assert_eq!(Bucket::Month.truncate(at(2013, 3, 1, 0)), at(2013, 3, 1, 0));
        assert_eq!(Bucket::Year.truncate(at(2013, 1, 1, 0)), at(2013, 1, 1, 0));
    }

    #[test]
    fn test_truncate_leap_year_end() {
        assert_eq!(Bucket::Month.truncate(at(2016, 2, 29, 23)), at(2016, 2, 1, 0));
        assert_eq!(Bucket::Year.truncate(at(2016, 12, 31, 23)), at(2016, 1, 1, 0));
    }

    #[test]
    fn test_period_start_matches_truncate() {
        let dt = at(2015, 11, 17, 6);
        assert_eq!(Bucket::Month.period(dt).start(), Bucket::Month.truncate(dt));
        assert_eq!(Bucket::Year.period(dt).start(), Bucket::Year.truncate(dt));
    }

    #[test]
    fn test_period_labels() {
        assert_eq!(Bucket::Month.period(at(2013, 3, 9, 4)).to_string(), "2013-03");
        assert_eq!(Bucket::Year.period(at(2013, 3, 9, 4)).to_string(), "2013");
    }

    #[test]
    fn test_month_periods_order_chronologically() {
        let dec = Bucket::Month.period(at(2013, 12, 1, 0));
        let jan = Bucket::Month.period(at(2014, 1, 1, 0));
        assert!(dec < jan);
    }
}
