//! Turns raw station rows into a validated, timestamp-ordered [`ObservationSeries`].

pub mod csv_loader;
pub mod error;
mod extractor;

pub use extractor::required_columns;

use crate::ingest::error::IngestError;
use crate::series::ObservationSeries;
use crate::types::observation::{Observation, RawRecord};
use chrono::{NaiveDate, NaiveDateTime};
use log::debug;

/// Builds the composite timestamp of a row, or `None` if any component is out of
/// its calendar range.
///
/// # Examples
///
/// ```
/// use air_quality::timestamp_from_components;
///
/// assert!(timestamp_from_components(2016, 2, 29, 23).is_some());
/// assert!(timestamp_from_components(2015, 2, 29, 0).is_none());
/// assert!(timestamp_from_components(2015, 1, 1, 24).is_none());
/// ```
pub fn timestamp_from_components(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
) -> Option<NaiveDateTime> {
    let year = i32::try_from(year).ok()?;
    let month = u32::try_from(month).ok()?;
    let day = u32::try_from(day).ok()?;
    let hour = u32::try_from(hour).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, 0, 0)
}

/// Validates the timestamp of every row and orders the rows by it.
///
/// Sorting is stable: rows sharing a timestamp keep their input order and are all
/// kept. No other cleaning happens here.
///
/// # Errors
///
/// Returns [`IngestError::MalformedTimestamp`] for the first row (zero-based input
/// position) whose year, month, day or hour is out of range.
pub fn ingest<I>(rows: I) -> Result<ObservationSeries, IngestError>
where
    I: IntoIterator<Item = RawRecord>,
{
    let observations = rows
        .into_iter()
        .enumerate()
        .map(|(row, record)| {
            let datetime =
                timestamp_from_components(record.year, record.month, record.day, record.hour)
                    .ok_or(IngestError::MalformedTimestamp {
                        row,
                        year: record.year,
                        month: record.month,
                        day: record.day,
                        hour: record.hour,
                    })?;
            Ok(Observation {
                datetime,
                readings: record.readings,
                wind_direction: record.wind_direction,
                station: record.station,
            })
        })
        .collect::<Result<Vec<_>, IngestError>>()?;
    debug!("Ingested {} rows", observations.len());
    Ok(ObservationSeries::from_unsorted(observations))
}
