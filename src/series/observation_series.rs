use crate::types::observation::Observation;
use std::ops::Deref;

/// Observations ordered by timestamp, ascending.
///
/// Gaps and duplicate timestamps are allowed; rows sharing a timestamp keep the
/// order in which they were ingested. The only way to build one is
/// [`crate::ingest()`] (or [`crate::load_csv`]), which guarantees the ordering.
///
/// Dereferences to `[Observation]`, so every slice method and every statistic in
/// [`crate::stats`] is available on it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObservationSeries {
    observations: Vec<Observation>,
}

impl ObservationSeries {
    pub(crate) fn from_unsorted(mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|observation| observation.datetime);
        Self { observations }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }
}

impl Deref for ObservationSeries {
    type Target = [Observation];

    fn deref(&self) -> &Self::Target {
        &self.observations
    }
}
