//! Ordered observation sequences and the forward-fill repair that cleans them.

mod cleaned_series;
mod observation_series;

pub use cleaned_series::{repair_missing, CleanedSeries};
pub use observation_series::ObservationSeries;
