use crate::series::observation_series::ObservationSeries;
use crate::types::field::Field;
use crate::types::observation::Observation;
use log::{debug, info, warn};
use std::ops::Deref;

/// An [`ObservationSeries`] after missing-value repair.
///
/// Every field holds a value at every position, except for a leading run of
/// positions before that field's first known value in the source series.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CleanedSeries {
    observations: Vec<Observation>,
}

/// Repairs missing values by forward-fill.
///
/// Each field is scanned independently in timestamp order. A missing value takes
/// the value of the nearest preceding position where that field is known; a
/// field with no earlier known value (a leading gap) stays missing. The textual
/// wind direction and station columns are filled the same way. Nothing is
/// interpolated, back-filled or rejected as an outlier.
///
/// Forward-fill depends on order; taking an [`ObservationSeries`] guarantees the
/// input is already sorted by timestamp.
///
/// # Examples
///
/// ```
/// use air_quality::{ingest, repair_missing, Field, RawRecord, Readings};
///
/// # fn main() -> Result<(), air_quality::IngestError> {
/// let rows = [Some(10.0), None, None, Some(20.0)]
///     .into_iter()
///     .enumerate()
///     .map(|(hour, pm25)| {
///         RawRecord::new(2013, 3, 1, hour as i64, Readings::default().with(Field::Pm25, pm25))
///     });
/// let cleaned = repair_missing(&ingest(rows)?);
///
/// let values: Vec<_> = cleaned.iter().map(|o| o.value(Field::Pm25)).collect();
/// assert_eq!(values, [Some(10.0), Some(10.0), Some(10.0), Some(20.0)]);
/// # Ok(())
/// # }
/// ```
pub fn repair_missing(series: &ObservationSeries) -> CleanedSeries {
    let cleaned = forward_fill(series.observations());
    let filled = Field::ALL
        .iter()
        .map(|field| count_present(&cleaned, *field) - count_present(series, *field))
        .sum::<usize>();
    info!(
        "Forward-filled {} missing values across {} observations",
        filled,
        cleaned.len()
    );
    for field in Field::ALL {
        let leading = leading_gap(&cleaned, field);
        if leading == cleaned.len() && !cleaned.is_empty() {
            warn!("Field {} has no values at all", field);
        } else if leading > 0 {
            debug!("Field {} starts with {} missing values", field, leading);
        }
    }
    CleanedSeries {
        observations: cleaned,
    }
}

fn forward_fill(observations: &[Observation]) -> Vec<Observation> {
    let mut filled: Vec<Observation> = Vec::with_capacity(observations.len());
    for observation in observations {
        let mut current = observation.clone();
        // The previous filled row holds, per field, the latest value known so far.
        if let Some(previous) = filled.last() {
            current.fill_from(previous);
        }
        filled.push(current);
    }
    filled
}

fn count_present(observations: &[Observation], field: Field) -> usize {
    observations
        .iter()
        .filter(|observation| observation.value(field).is_some())
        .count()
}

fn leading_gap(observations: &[Observation], field: Field) -> usize {
    observations
        .iter()
        .take_while(|observation| observation.value(field).is_none())
        .count()
}

impl CleanedSeries {
    /// Applies the forward-fill again. The result equals `self`; repair is idempotent.
    pub fn repair(&self) -> CleanedSeries {
        CleanedSeries {
            observations: forward_fill(&self.observations),
        }
    }

    /// The first `n` observations (fewer if the series is shorter).
    pub fn head(&self, n: usize) -> &[Observation] {
        &self.observations[..n.min(self.observations.len())]
    }

    /// Number of positions before `field`'s first value. These are the only
    /// positions where the field can still be missing.
    pub fn leading_gap(&self, field: Field) -> usize {
        leading_gap(&self.observations, field)
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }
}

impl Deref for CleanedSeries {
    type Target = [Observation];

    fn deref(&self) -> &Self::Target {
        &self.observations
    }
}
