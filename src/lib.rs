//! Loads hourly air-quality station data, repairs missing values and computes the
//! aggregates behind an air-quality report: descriptive statistics, monthly and
//! annual means, pairwise-complete correlations and value distributions.
//!
//! ```no_run
//! use air_quality::{load_csv, repair_missing, resample, Bucket, Field, DEFAULT_INPUT_PATH};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), air_quality::AirQualityError> {
//! let series = load_csv(Path::new(DEFAULT_INPUT_PATH))?;
//! let cleaned = repair_missing(&series);
//! for point in resample(&cleaned, Field::Pm25, Bucket::Month) {
//!     println!("{}: {:.1}", point.period, point.mean);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod frames;
mod ingest;
mod report;
mod series;
pub mod stats;
mod types;

pub use error::AirQualityError;
pub use frames::IntoDataFrame;
pub use report::*;

pub use ingest::csv_loader::{load_csv, read_frame, DEFAULT_INPUT_PATH};
pub use ingest::error::IngestError;
pub use ingest::{ingest, required_columns, timestamp_from_components};

pub use series::{repair_missing, CleanedSeries, ObservationSeries};

pub use stats::correlation::{correlate, correlation_matrix, CorrelationMatrix};
pub use stats::error::NotComputable;
pub use stats::field_values;
pub use stats::histogram::{histogram, Histogram};
pub use stats::resample::{resample, ResampledPoint};
pub use stats::summary::{describe, summarize, Summary, SummaryTable};

pub use types::field::{Field, UnknownFieldError};
pub use types::observation::{Observation, RawRecord, Readings};
pub use types::period::{Bucket, Month, Period, Year};
