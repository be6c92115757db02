//! Reads a station CSV file into an [`ObservationSeries`].

use crate::ingest::error::IngestError;
use crate::ingest::extractor::extract_records;
use crate::ingest::ingest;
use crate::series::ObservationSeries;
use log::{debug, info};
use polars::prelude::*;
use std::path::Path;

/// The station file read when no other path is given.
pub const DEFAULT_INPUT_PATH: &str = "./data/PRSA_Data_Nongzhanguan_20130301-20170228.csv";

/// Cell contents treated as missing, in addition to empty cells.
const NULL_MARKER: &str = "NA";

/// Reads a station CSV file into a `DataFrame`.
///
/// The file must have a header row. Empty cells and `NA` are read as null. The whole
/// file is scanned for schema inference, so a column that starts with integers and
/// later holds decimals is read as floats.
///
/// # Errors
///
/// Returns [`IngestError::CsvRead`] if the file cannot be opened or parsed.
pub fn read_frame(path: &Path) -> Result<DataFrame, IngestError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .map_parse_options(|options| {
            options.with_null_values(Some(NullValues::AllColumnsSingle(NULL_MARKER.into())))
        })
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvRead(path.to_path_buf(), e))?
        .finish()
        .map_err(|e| IngestError::CsvRead(path.to_path_buf(), e))?;
    debug!(
        "Read {} rows and {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Loads a station file and ingests its rows into a timestamp-ordered series.
///
/// # Examples
///
/// ```no_run
/// use air_quality::{load_csv, repair_missing, DEFAULT_INPUT_PATH};
/// use std::path::Path;
///
/// # fn main() -> Result<(), air_quality::AirQualityError> {
/// let series = load_csv(Path::new(DEFAULT_INPUT_PATH))?;
/// let cleaned = repair_missing(&series);
/// println!("{} observations", cleaned.len());
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Any [`IngestError`]: unreadable file, missing required columns, untypable
/// columns, empty time cells or out-of-range timestamps.
pub fn load_csv(path: &Path) -> Result<ObservationSeries, IngestError> {
    let df = read_frame(path)?;
    let records = extract_records(&df, path)?;
    let series = ingest(records)?;
    info!("Loaded {} observations from {}", series.len(), path.display());
    Ok(series)
}
