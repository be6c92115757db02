//! Assembles every section of the air-quality report from one cleaned series.

use crate::error::AirQualityError;
use crate::frames::IntoDataFrame;
use crate::ingest::csv_loader::load_csv;
use crate::series::{repair_missing, CleanedSeries};
use crate::stats::correlation::{correlation_matrix, CorrelationMatrix};
use crate::stats::error::NotComputable;
use crate::stats::histogram::{histogram, Histogram};
use crate::stats::resample::{resample, ResampledPoint};
use crate::stats::summary::{describe, SummaryTable};
use crate::types::field::Field;
use crate::types::observation::Observation;
use crate::types::period::Bucket;
use bon::bon;
use chrono::NaiveDateTime;
use log::{info, warn};
use polars::prelude::DataFrame;
use serde::Serialize;
use std::path::Path;

const DEFAULT_HEAD_ROWS: usize = 5;
const DEFAULT_HISTOGRAM_BINS: usize = 50;
const DEFAULT_DISTRIBUTION_FIELDS: [Field; 6] = [
    Field::Pm25,
    Field::Pm10,
    Field::No2,
    Field::Co,
    Field::Temperature,
    Field::WindSpeed,
];
const DEFAULT_CORRELATION_FIELDS: [Field; 10] = [
    Field::Pm25,
    Field::Pm10,
    Field::So2,
    Field::No2,
    Field::Co,
    Field::O3,
    Field::Temperature,
    Field::Pressure,
    Field::DewPoint,
    Field::WindSpeed,
];
const DEFAULT_TIME_SERIES_FIELDS: [Field; 3] = [Field::Pm25, Field::Pm10, Field::No2];
const DEFAULT_FOCUS_PAIR: (Field, Field) = (Field::Pm25, Field::Temperature);

/// The value distribution of one field, or why it has none.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub field: Field,
    pub histogram: Result<Histogram, NotComputable>,
}

/// Monthly means of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    pub field: Field,
    pub bucket: Bucket,
    pub points: Vec<ResampledPoint>,
}

/// Hourly values of a few fields, column by column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub fields: Vec<Field>,
    pub datetimes: Vec<NaiveDateTime>,
    /// One column per entry of `fields`, each as long as `datetimes`.
    pub values: Vec<Vec<Option<f64>>>,
}

impl TimeSeries {
    fn from_observations(observations: &[Observation], fields: &[Field]) -> Self {
        Self {
            fields: fields.to_vec(),
            datetimes: observations.iter().map(|o| o.datetime).collect(),
            values: fields
                .iter()
                .map(|field| observations.iter().map(|o| o.value(*field)).collect())
                .collect(),
        }
    }
}

/// Every section of the report, fully materialized.
///
/// Sections, in report order:
/// 1. `overview`: the first rows of the cleaned series.
/// 2. `summary`: descriptive statistics of every field.
/// 3. `distributions`: histograms of the main pollutants and weather readings.
/// 4. `monthly_trend`: monthly mean of PM2.5.
/// 5. `correlations`: correlation matrix of pollutants and weather readings.
/// 6. `time_series`: hourly PM2.5, PM10 and NO2.
/// 7. `focus_correlations`: correlation matrix of PM2.5 and temperature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AirQualityReport {
    pub overview: Vec<Observation>,
    pub summary: SummaryTable,
    pub distributions: Vec<Distribution>,
    pub monthly_trend: Trend,
    pub correlations: CorrelationMatrix,
    pub time_series: TimeSeries,
    pub focus_correlations: CorrelationMatrix,
}

#[bon]
impl AirQualityReport {
    /// Computes every report section from a cleaned series.
    ///
    /// This method uses a builder pattern. Only `.series()` is required.
    ///
    /// # Arguments
    ///
    /// * `.series(&CleanedSeries)`: **Required.** The repaired observations.
    /// * `.head_rows(usize)`: Rows in the overview. Defaults to `5`.
    /// * `.histogram_bins(usize)`: Bins per distribution. Defaults to `50`.
    /// * `.distribution_fields(Vec<Field>)`: Defaults to PM2.5, PM10, NO2, CO, TEMP, WSPM.
    /// * `.trend_field(Field)`: Field of the monthly trend. Defaults to PM2.5.
    /// * `.correlation_fields(Vec<Field>)`: Defaults to every field except RAIN.
    /// * `.time_series_fields(Vec<Field>)`: Defaults to PM2.5, PM10, NO2.
    /// * `.focus_pair((Field, Field))`: Defaults to PM2.5 and TEMP.
    ///
    /// # Examples
    ///
    /// ```
    /// use air_quality::{ingest, repair_missing, AirQualityReport, Field, RawRecord, Readings};
    ///
    /// # fn main() -> Result<(), air_quality::IngestError> {
    /// let rows = (0..48).map(|hour| {
    ///     let readings = Readings::default()
    ///         .with(Field::Pm25, Some(10.0 + hour as f64))
    ///         .with(Field::Temperature, Some(-(hour as f64) / 4.0));
    ///     RawRecord::new(2013, 3, 1 + hour / 24, hour % 24, readings)
    /// });
    /// let cleaned = repair_missing(&ingest(rows)?);
    ///
    /// let report = AirQualityReport::generate()
    ///     .series(&cleaned)
    ///     .head_rows(3)
    ///     .histogram_bins(10)
    ///     .call();
    ///
    /// assert_eq!(report.overview.len(), 3);
    /// assert_eq!(report.monthly_trend.points.len(), 1);
    /// assert_eq!(report.focus_correlations.get(Field::Pm25, Field::Temperature), Some(Ok(-1.0)));
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn generate(
        series: &CleanedSeries,
        head_rows: Option<usize>,
        histogram_bins: Option<usize>,
        distribution_fields: Option<Vec<Field>>,
        trend_field: Option<Field>,
        correlation_fields: Option<Vec<Field>>,
        time_series_fields: Option<Vec<Field>>,
        focus_pair: Option<(Field, Field)>,
    ) -> Self {
        // Note: defaults are applied here when the builder method was not called.
        let head_rows = head_rows.unwrap_or(DEFAULT_HEAD_ROWS);
        let histogram_bins = histogram_bins.unwrap_or(DEFAULT_HISTOGRAM_BINS);
        let distribution_fields =
            distribution_fields.unwrap_or_else(|| DEFAULT_DISTRIBUTION_FIELDS.to_vec());
        let trend_field = trend_field.unwrap_or(Field::Pm25);
        let correlation_fields =
            correlation_fields.unwrap_or_else(|| DEFAULT_CORRELATION_FIELDS.to_vec());
        let time_series_fields =
            time_series_fields.unwrap_or_else(|| DEFAULT_TIME_SERIES_FIELDS.to_vec());
        let (focus_a, focus_b) = focus_pair.unwrap_or(DEFAULT_FOCUS_PAIR);

        let distributions = distribution_fields
            .iter()
            .map(|field| {
                let histogram = histogram(series, *field, histogram_bins);
                if let Err(reason) = &histogram {
                    warn!("No distribution for {}: {}", field, reason);
                }
                Distribution {
                    field: *field,
                    histogram,
                }
            })
            .collect();

        let report = Self {
            overview: series.head(head_rows).to_vec(),
            summary: describe(series, &Field::ALL),
            distributions,
            monthly_trend: Trend {
                field: trend_field,
                bucket: Bucket::Month,
                points: resample(series, trend_field, Bucket::Month),
            },
            correlations: correlation_matrix(series, &correlation_fields),
            time_series: TimeSeries::from_observations(series, &time_series_fields),
            focus_correlations: correlation_matrix(series, &[focus_a, focus_b]),
        };
        info!(
            "Report built from {} observations ({} monthly points)",
            series.len(),
            report.monthly_trend.points.len()
        );
        report
    }
}

impl AirQualityReport {
    /// Loads a station file, repairs it and builds the report with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::Ingest`] if the file cannot be loaded.
    pub fn from_csv(path: &Path) -> Result<Self, AirQualityError> {
        let series = load_csv(path)?;
        let cleaned = repair_missing(&series);
        Ok(Self::generate().series(&cleaned).call())
    }

    /// Each section as a titled table, in report order.
    ///
    /// Distributions without a value are left out.
    pub fn frames(&self) -> Result<Vec<(String, DataFrame)>, AirQualityError> {
        let mut frames = vec![
            ("Data Overview".to_string(), self.overview.to_frame()?),
            ("Summary Statistics".to_string(), self.summary.to_frame()?),
        ];
        for distribution in &self.distributions {
            if let Ok(histogram) = &distribution.histogram {
                frames.push((
                    format!("{} Distribution", distribution.field),
                    histogram.to_frame()?,
                ));
            }
        }
        frames.push((
            format!("Monthly Average {}", self.monthly_trend.field),
            self.monthly_trend.points.to_frame()?,
        ));
        frames.push((
            "Correlation Matrix of Air Quality and Meteorological Variables".to_string(),
            self.correlations.to_frame()?,
        ));
        frames.push((
            format!("Time Series of {}", join_fields(&self.time_series.fields)),
            self.time_series.to_frame()?,
        ));
        frames.push((
            format!(
                "Correlation Matrix for {}",
                join_fields(&self.focus_correlations.fields)
            ),
            self.focus_correlations.to_frame()?,
        ));
        Ok(frames)
    }

    pub fn to_json(&self) -> Result<String, AirQualityError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
