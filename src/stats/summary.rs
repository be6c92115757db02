//! Descriptive statistics, matching the usual `describe()` table.

use crate::stats::{field_values, mean};
use crate::types::field::Field;
use crate::types::observation::Observation;
use ordered_float::OrderedFloat;
use serde::Serialize;

/// Descriptive statistics of one field.
///
/// With no values, `count` is 0 and every other statistic is NaN. With a single
/// value, `std` is NaN. NaN serializes to JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (`n - 1` denominator).
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub q25: f64,
    #[serde(rename = "50%")]
    pub median: f64,
    #[serde(rename = "75%")]
    pub q75: f64,
    pub max: f64,
}

impl Summary {
    /// The summary of a field with no values.
    pub fn empty() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Statistic labels in table order, matching [`Summary::values`].
    pub const LABELS: [&'static str; 8] =
        ["count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// The statistics in table order, with `count` as a float.
    pub fn values(&self) -> [f64; 8] {
        [
            self.count as f64,
            self.mean,
            self.std,
            self.min,
            self.q25,
            self.median,
            self.q75,
            self.max,
        ]
    }
}

/// Quantile of sorted, non-empty `sorted` by linear interpolation between the
/// two closest ranks.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Summarizes the known values of `field`.
///
/// # Examples
///
/// ```
/// use air_quality::{ingest, summarize, Field, RawRecord, Readings};
///
/// # fn main() -> Result<(), air_quality::IngestError> {
/// let rows = [Some(1.0), None, Some(3.0), Some(2.0)]
///     .into_iter()
///     .enumerate()
///     .map(|(hour, v)| {
///         RawRecord::new(2013, 3, 1, hour as i64, Readings::default().with(Field::So2, v))
///     });
/// let series = ingest(rows)?;
///
/// let summary = summarize(&series, Field::So2);
/// assert_eq!(summary.count, 3);
/// assert_eq!(summary.mean, 2.0);
/// assert_eq!(summary.median, 2.0);
/// assert!(summarize(&series, Field::O3).mean.is_nan());
/// # Ok(())
/// # }
/// ```
pub fn summarize(observations: &[Observation], field: Field) -> Summary {
    let mut values = field_values(observations, field);
    if values.is_empty() {
        return Summary::empty();
    }
    values.sort_unstable_by_key(|value| OrderedFloat(*value));

    let count = values.len();
    let mean = mean(&values);
    let std = if count > 1 {
        let squares = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        (squares / (count - 1) as f64).sqrt()
    } else {
        f64::NAN
    };

    Summary {
        count,
        mean,
        std,
        min: values[0],
        q25: quantile(&values, 0.25),
        median: quantile(&values, 0.5),
        q75: quantile(&values, 0.75),
        max: values[count - 1],
    }
}

/// Summaries of several fields, one row per field in the requested order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub rows: Vec<(Field, Summary)>,
}

impl SummaryTable {
    pub fn get(&self, field: Field) -> Option<&Summary> {
        self.rows
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, summary)| summary)
    }
}

/// Summarizes every field in `fields`.
pub fn describe(observations: &[Observation], fields: &[Field]) -> SummaryTable {
    SummaryTable {
        rows: fields
            .iter()
            .map(|field| (*field, summarize(observations, *field)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::types::observation::Readings;

    fn series(field: Field, values: &[Option<f64>]) -> Vec<Observation> {
        let start = NaiveDate::from_ymd_opt(2013, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Observation {
                datetime: start + chrono::Duration::hours(i as i64),
                readings: Readings::default().with(field, *v),
                wind_direction: None,
                station: None,
            })
            .collect()
    }

    #[test]
    fn test_summary_statistics() {
        let obs = series(
            Field::Pm25,
            &[Some(4.0), Some(8.0), None, Some(15.0), Some(16.0), Some(23.0), Some(42.0)],
        );
        let summary = summarize(&obs, Field::Pm25);
        assert_eq!(summary.count, 6);
        assert!((summary.mean - 18.0).abs() < 1e-12);
        // Sample variance: (196 + 100 + 9 + 4 + 25 + 576) / 5 = 182
        assert!((summary.std - 182f64.sqrt()).abs() < 1e-12);
        assert_eq!(summary.min, 4.0);
        assert_eq!(summary.max, 42.0);
        // Positions 1.25, 2.5 and 3.75 in the sorted values.
        assert!((summary.q25 - 9.75).abs() < 1e-12);
        assert!((summary.median - 15.5).abs() < 1e-12);
        assert!((summary.q75 - 21.25).abs() < 1e-12);
    }

    #[test]
    fn test_single_value_has_nan_std() {
        let summary = summarize(&series(Field::Co, &[None, Some(300.0)]), Field::Co);
        assert_eq!(summary.count, 1);
        assert_eq!(summary.mean, 300.0);
        assert!(summary.std.is_nan());
        assert_eq!(summary.q25, 300.0);
        assert_eq!(summary.q75, 300.0);
    }

    #[test]
    fn test_empty_field_is_nan_not_zero() {
        let summary = summarize(&series(Field::Co, &[None, None]), Field::Co);
        assert!(summary.is_empty());
        assert!(summary.values()[1..].iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_describe_keeps_field_order() {
        let obs = series(Field::Temperature, &[Some(1.0), Some(2.0)]);
        let table = describe(&obs, &[Field::Temperature, Field::Pm25]);
        let fields: Vec<_> = table.rows.iter().map(|(f, _)| *f).collect();
        assert_eq!(fields, [Field::Temperature, Field::Pm25]);
        assert_eq!(table.get(Field::Temperature).map(|s| s.count), Some(2));
        assert!(table.get(Field::Pm25).is_some_and(Summary::is_empty));
        assert!(table.get(Field::Rain).is_none());
    }

    #[test]
    fn test_nan_serializes_as_null() -> Result<(), serde_json::Error> {
        let json = serde_json::to_value(Summary::empty())?;
        assert_eq!(json["count"], 0);
        assert!(json["mean"].is_null());
        assert!(json["25%"].is_null());
        Ok(())
    }
}
