//! Conversions of pipeline outputs into Polars `DataFrame`s for a presentation layer.
//!
//! Values without a result (NaN statistics, `NotComputable` cells) become nulls.

use crate::report::TimeSeries;
use crate::stats::correlation::CorrelationMatrix;
use crate::stats::histogram::Histogram;
use crate::stats::resample::ResampledPoint;
use crate::stats::summary::{Summary, SummaryTable};
use crate::types::field::Field;
use crate::types::observation::Observation;
use chrono::NaiveDateTime;
use polars::prelude::*;

/// Materializes a value as a `DataFrame`.
pub trait IntoDataFrame {
    fn to_frame(&self) -> PolarsResult<DataFrame>;
}

fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// One row per observation: `datetime`, every field column, `wd` and `station`.
impl IntoDataFrame for [Observation] {
    fn to_frame(&self) -> PolarsResult<DataFrame> {
        let datetimes: Vec<NaiveDateTime> = self.iter().map(|o| o.datetime).collect();
        let mut columns = vec![Column::new("datetime".into(), datetimes)];
        for field in Field::ALL {
            let values: Vec<Option<f64>> = self.iter().map(|o| o.value(field)).collect();
            columns.push(Column::new(field.column_name().into(), values));
        }
        let wind_directions: Vec<Option<String>> =
            self.iter().map(|o| o.wind_direction.clone()).collect();
        let stations: Vec<Option<String>> = self.iter().map(|o| o.station.clone()).collect();
        columns.push(Column::new("wd".into(), wind_directions));
        columns.push(Column::new("station".into(), stations));
        DataFrame::new(columns)
    }
}

/// `datetime` plus one column per field of the time series.
impl IntoDataFrame for TimeSeries {
    fn to_frame(&self) -> PolarsResult<DataFrame> {
        let mut columns = vec![Column::new("datetime".into(), self.datetimes.clone())];
        for (field, values) in self.fields.iter().zip(&self.values) {
            columns.push(Column::new(field.column_name().into(), values.clone()));
        }
        DataFrame::new(columns)
    }
}

/// A `statistic` label column followed by one column per field.
impl IntoDataFrame for SummaryTable {
    fn to_frame(&self) -> PolarsResult<DataFrame> {
        let mut columns = vec![Column::new("statistic".into(), Summary::LABELS.to_vec())];
        for (field, summary) in &self.rows {
            let values: Vec<Option<f64>> = summary.values().into_iter().map(finite).collect();
            columns.push(Column::new(field.column_name().into(), values));
        }
        DataFrame::new(columns)
    }
}

/// Columns `period`, `start`, `mean` and `count`.
impl IntoDataFrame for [ResampledPoint] {
    fn to_frame(&self) -> PolarsResult<DataFrame> {
        let periods: Vec<String> = self.iter().map(|p| p.period.to_string()).collect();
        let starts: Vec<NaiveDateTime> = self.iter().map(|p| p.start).collect();
        let means: Vec<f64> = self.iter().map(|p| p.mean).collect();
        let counts: Vec<u64> = self.iter().map(|p| p.count as u64).collect();
        DataFrame::new(vec![
            Column::new("period".into(), periods),
            Column::new("start".into(), starts),
            Column::new("mean".into(), means),
            Column::new("count".into(), counts),
        ])
    }
}

/// A `field` label column followed by one column per field; missing cells are null.
impl IntoDataFrame for CorrelationMatrix {
    fn to_frame(&self) -> PolarsResult<DataFrame> {
        let labels: Vec<&str> = self.fields.iter().map(|f| f.column_name()).collect();
        let mut columns = vec![Column::new("field".into(), labels)];
        for (j, field) in self.fields.iter().enumerate() {
            let values: Vec<Option<f64>> = self.rows().iter().map(|row| row[j].ok()).collect();
            columns.push(Column::new(field.column_name().into(), values));
        }
        DataFrame::new(columns)
    }
}

/// Columns `lower`, `upper` and `count`, one row per bin.
impl IntoDataFrame for Histogram {
    fn to_frame(&self) -> PolarsResult<DataFrame> {
        let (lower, upper, counts): (Vec<f64>, Vec<f64>, Vec<u64>) = self.bins().fold(
            (Vec::new(), Vec::new(), Vec::new()),
            |(mut lower, mut upper, mut counts), (lo, hi, count)| {
                lower.push(lo);
                upper.push(hi);
                counts.push(count as u64);
                (lower, upper, counts)
            },
        );
        DataFrame::new(vec![
            Column::new("lower".into(), lower),
            Column::new("upper".into(), upper),
            Column::new("count".into(), counts),
        ])
    }
}
