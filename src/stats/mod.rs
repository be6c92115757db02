//! Aggregates over a series: descriptive statistics, resampled means,
//! pairwise-complete correlations and histograms.
//!
//! Every function takes a slice of observations, so it works on an
//! [`crate::ObservationSeries`] as well as on a [`crate::CleanedSeries`].

pub mod correlation;
pub mod error;
pub mod histogram;
pub mod resample;
pub mod summary;

use crate::types::field::Field;
use crate::types::observation::Observation;

/// The known values of `field`, in series order.
pub fn field_values(observations: &[Observation], field: Field) -> Vec<f64> {
    observations
        .iter()
        .filter_map(|observation| observation.value(field))
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
