//! Pulls typed column vectors out of a loaded `DataFrame` and zips them into raw records.

use crate::ingest::error::IngestError;
use crate::types::field::Field;
use crate::types::observation::{RawRecord, Readings};
use polars::prelude::*;
use std::path::Path;

pub(crate) const TIME_COLUMNS: [&str; 4] = ["year", "month", "day", "hour"];
pub(crate) const WIND_DIRECTION_COLUMN: &str = "wd";
pub(crate) const STATION_COLUMN: &str = "station";

/// Every column a station file must carry.
pub fn required_columns() -> Vec<&'static str> {
    TIME_COLUMNS
        .into_iter()
        .chain(Field::ALL.iter().map(|field| field.column_name()))
        .collect()
}

fn get_column<'a>(df: &'a DataFrame, path: &Path, name: &str) -> Result<&'a Column, IngestError> {
    df.column(name).map_err(|_| IngestError::MissingColumn {
        path: path.to_path_buf(),
        column: name.to_string(),
    })
}

/// Reads a column of whole numbers. Text that does not parse, and decimals with a
/// fractional part, are rejected rather than read as missing.
fn get_int_column(
    df: &DataFrame,
    path: &Path,
    name: &str,
) -> Result<Vec<Option<i64>>, IngestError> {
    let to_type_error = |source| IngestError::ColumnType {
        column: name.to_string(),
        expected: "integers",
        source: Some(source),
    };
    let column = get_column(df, path, name)?
        .strict_cast(&DataType::Float64)
        .map_err(to_type_error)?;
    let values = column.f64().map_err(to_type_error)?;
    values
        .into_iter()
        .map(|value| match value {
            None => Ok(None),
            Some(v) if v.is_finite() && v.fract() == 0.0 => Ok(Some(v as i64)),
            Some(_) => Err(IngestError::ColumnType {
                column: name.to_string(),
                expected: "integers",
                source: None,
            }),
        })
        .collect()
}

fn get_float_column(
    df: &DataFrame,
    path: &Path,
    name: &str,
) -> Result<Vec<Option<f64>>, IngestError> {
    let to_type_error = |source| IngestError::ColumnType {
        column: name.to_string(),
        expected: "floats",
        source: Some(source),
    };
    let column = get_column(df, path, name)?
        .strict_cast(&DataType::Float64)
        .map_err(to_type_error)?;
    let values = column.f64().map_err(to_type_error)?;
    // Treat NaN cells the same as empty ones.
    Ok(values
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect())
}

/// Reads an optional text column. Returns `None` when the column does not exist.
fn get_opt_text_column(
    df: &DataFrame,
    name: &str,
) -> Result<Option<Vec<Option<String>>>, IngestError> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };
    let to_type_error = |source| IngestError::ColumnType {
        column: name.to_string(),
        expected: "text",
        source: Some(source),
    };
    let column = column.strict_cast(&DataType::String).map_err(to_type_error)?;
    let values = column.str().map_err(to_type_error)?;
    Ok(Some(
        values
            .into_iter()
            .map(|value| value.map(str::to_string))
            .collect(),
    ))
}

/// Converts a station-file `DataFrame` into one [`RawRecord`] per row.
///
/// The four time columns and every [`Field`] column are required; `wd` and
/// `station` are read when present. All other columns are ignored.
///
/// # Errors
///
/// * [`IngestError::MissingColumn`] if a required column is absent.
/// * [`IngestError::ColumnType`] if a non-empty cell does not parse as its column's
///   type, or a time cell is not a whole number.
/// * [`IngestError::MissingTimestampComponent`] if a time cell is empty.
pub(crate) fn extract_records(
    df: &DataFrame,
    path: &Path,
) -> Result<Vec<RawRecord>, IngestError> {
    // Check presence of every required column up front so the error names the first one missing.
    for name in required_columns() {
        get_column(df, path, name)?;
    }

    let time_columns = TIME_COLUMNS
        .into_iter()
        .map(|name| get_int_column(df, path, name))
        .collect::<Result<Vec<_>, _>>()?;
    let field_columns = Field::ALL
        .into_iter()
        .map(|field| Ok((field, get_float_column(df, path, field.column_name())?)))
        .collect::<Result<Vec<_>, IngestError>>()?;
    let wind_directions = get_opt_text_column(df, WIND_DIRECTION_COLUMN)?;
    let stations = get_opt_text_column(df, STATION_COLUMN)?;

    let mut records = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let mut components = [0i64; 4];
        for (slot, (name, column)) in components
            .iter_mut()
            .zip(TIME_COLUMNS.into_iter().zip(&time_columns))
        {
            *slot = column[row]
                .ok_or(IngestError::MissingTimestampComponent { row, column: name })?;
        }
        let [year, month, day, hour] = components;

        let mut readings = Readings::default();
        for (field, values) in &field_columns {
            *readings.value_mut(*field) = values[row];
        }

        records.push(RawRecord {
            year,
            month,
            day,
            hour,
            readings,
            wind_direction: wind_directions.as_ref().and_then(|v| v[row].clone()),
            station: stations.as_ref().and_then(|v| v[row].clone()),
        });
    }
    Ok(records)
}
