//! Monthly and annual means.

use crate::types::field::Field;
use crate::types::observation::Observation;
use crate::types::period::{Bucket, Period};
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

/// The mean of one field over one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResampledPoint {
    pub period: Period,
    /// Midnight on the first day of the bucket.
    pub start: NaiveDateTime,
    pub mean: f64,
    /// Number of values the mean was computed from. Always at least 1.
    pub count: usize,
}

/// Averages the known values of `field` per month or per year.
///
/// Each observation's timestamp is truncated to the start of its bucket and the
/// known values in each bucket are averaged. A bucket without any known value
/// produces no point at all, so the output length depends on the data, not on
/// the calendar span. Points are in strictly increasing order of `start`.
///
/// # Examples
///
/// ```
/// use air_quality::{ingest, resample, Bucket, Field, RawRecord, Readings};
///
/// # fn main() -> Result<(), air_quality::IngestError> {
/// let rows = vec![
///     RawRecord::new(2013, 3, 10, 0, Readings::default().with(Field::Pm25, Some(42.0))),
///     RawRecord::new(2013, 4, 2, 0, Readings::default()),
///     RawRecord::new(2013, 5, 2, 0, Readings::default().with(Field::Pm25, Some(7.0))),
/// ];
/// let monthly = resample(&ingest(rows)?, Field::Pm25, Bucket::Month);
///
/// let labels: Vec<_> = monthly.iter().map(|p| p.period.to_string()).collect();
/// assert_eq!(labels, ["2013-03", "2013-05"]);
/// assert_eq!(monthly[0].mean, 42.0);
/// # Ok(())
/// # }
/// ```
pub fn resample(observations: &[Observation], field: Field, bucket: Bucket) -> Vec<ResampledPoint> {
    let mut buckets: BTreeMap<NaiveDateTime, (Period, f64, usize)> = BTreeMap::new();
    for observation in observations {
        let Some(value) = observation.value(field) else {
            continue;
        };
        let start = bucket.truncate(observation.datetime);
        let entry = buckets
            .entry(start)
            .or_insert_with(|| (bucket.period(observation.datetime), 0.0, 0));
        entry.1 += value;
        entry.2 += 1;
    }

    buckets
        .into_iter()
        .map(|(start, (period, sum, count))| ResampledPoint {
            period,
            start,
            mean: sum / count as f64,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::observation::Readings;
    use crate::types::period::{Month, Year};
    use chrono::NaiveDate;

    fn observation(y: i32, m: u32, d: u32, h: u32, pm25: Option<f64>) -> Observation {
        Observation {
            datetime: NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, 0, 0)
                .unwrap(),
            readings: Readings::default().with(Field::Pm25, pm25),
            wind_direction: None,
            station: None,
        }
    }

    #[test]
    fn test_month_without_values_has_no_entry() {
        let obs = vec![
            observation(2013, 3, 15, 12, Some(42.0)),
            observation(2013, 4, 1, 0, None),
            observation(2013, 4, 30, 23, None),
        ];
        let monthly = resample(&obs, Field::Pm25, Bucket::Month);
        assert_eq!(monthly.len(), 1);
        assert_eq!(monthly[0].period, Period::Month(Month::new(3, 2013)));
        assert_eq!(monthly[0].start, observation(2013, 3, 1, 0, None).datetime);
        assert_eq!(monthly[0].mean, 42.0);
        assert_eq!(monthly[0].count, 1);
    }

    #[test]
    fn test_monthly_means_ignore_missing_values() {
        let obs = vec![
            observation(2013, 3, 1, 0, Some(10.0)),
            observation(2013, 3, 1, 1, None),
            observation(2013, 3, 31, 23, Some(20.0)),
            observation(2013, 4, 1, 0, Some(5.0)),
        ];
        let monthly = resample(&obs, Field::Pm25, Bucket::Month);
        let means: Vec<_> = monthly.iter().map(|p| (p.period.to_string(), p.mean)).collect();
        assert_eq!(
            means,
            [("2013-03".to_string(), 15.0), ("2013-04".to_string(), 5.0)]
        );
    }

    #[test]
    fn test_annual_buckets_are_strictly_increasing() {
        let obs = vec![
            observation(2016, 12, 31, 23, Some(1.0)),
            observation(2013, 3, 1, 0, Some(2.0)),
            observation(2017, 2, 28, 23, Some(3.0)),
            observation(2013, 12, 31, 0, Some(4.0)),
        ];
        let annual = resample(&obs, Field::Pm25, Bucket::Year);
        let periods: Vec<_> = annual.iter().map(|p| p.period).collect();
        assert_eq!(
            periods,
            [
                Period::Year(Year(2013)),
                Period::Year(Year(2016)),
                Period::Year(Year(2017))
            ]
        );
        assert!(annual.windows(2).all(|w| w[0].start < w[1].start));
        assert_eq!(annual[0].mean, 3.0);
        assert_eq!(annual[0].count, 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(resample(&[], Field::Pm25, Bucket::Month).is_empty());
    }
}
