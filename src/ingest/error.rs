use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems with the input data. Any of these aborts a run.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to read CSV file '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Required column '{column}' not found in '{path}'")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Column '{column}' could not be read as {expected}")]
    ColumnType {
        column: String,
        expected: &'static str,
        #[source]
        source: Option<PolarsError>,
    },

    #[error("Row {row}: missing value in timestamp column '{column}'")]
    MissingTimestampComponent { row: usize, column: &'static str },

    #[error(
        "Row {row}: malformed timestamp (year {year}, month {month}, day {day}, hour {hour})"
    )]
    MalformedTimestamp {
        row: usize,
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
    },
}
