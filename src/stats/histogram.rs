//! Equal-width value distributions.

use crate::stats::error::NotComputable;
use crate::stats::field_values;
use crate::types::field::Field;
use crate::types::observation::Observation;
use serde::Serialize;

/// Counts of a field's values in equal-width bins.
///
/// `edges` has one more element than `counts`. Bin `i` covers
/// `[edges[i], edges[i + 1])`, except the last bin, which also includes its upper edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub field: Field,
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Total number of values counted.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(lower edge, upper edge, count)` for every bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, count)| (edge[0], edge[1], *count))
    }
}

/// Bins the known values of `field` into `bins` equal-width bins spanning their range.
///
/// When every value is the same the range is widened to half a unit on either side.
///
/// # Errors
///
/// * [`NotComputable::NoBins`] if `bins` is 0.
/// * [`NotComputable::NoValues`] if the field has no known values.
pub fn histogram(
    observations: &[Observation],
    field: Field,
    bins: usize,
) -> Result<Histogram, NotComputable> {
    if bins == 0 {
        return Err(NotComputable::NoBins);
    }
    let values = field_values(observations, field);
    if values.is_empty() {
        return Err(NotComputable::NoValues);
    }

    let (mut low, mut high) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(*v), hi.max(*v))
        });
    if low == high {
        low -= 0.5;
        high += 0.5;
    }

    let width = high - low;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| low + width * i as f64 / bins as f64)
        .collect();
    let mut counts = vec![0usize; bins];
    for value in values {
        let index = (((value - low) / width) * bins as f64) as usize;
        counts[index.min(bins - 1)] += 1;
    }

    Ok(Histogram {
        field,
        edges,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::observation::Readings;
    use chrono::{Duration, NaiveDate};

    fn observations(values: &[Option<f64>]) -> Vec<Observation> {
        let start = NaiveDate::from_ymd_opt(2015, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Observation {
                datetime: start + Duration::hours(i as i64),
                readings: Readings::default().with(Field::WindSpeed, *v),
                wind_direction: None,
                station: None,
            })
            .collect()
    }

    #[test]
    fn test_counts_cover_every_value() -> Result<(), NotComputable> {
        let obs = observations(&[Some(0.0), Some(1.0), None, Some(2.5), Some(4.0), Some(3.9)]);
        let hist = histogram(&obs, Field::WindSpeed, 4)?;
        assert_eq!(hist.edges, [0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(hist.counts, [1, 1, 1, 2]);
        assert_eq!(hist.total(), 5);
        Ok(())
    }

    #[test]
    fn test_bins_iterator() -> Result<(), NotComputable> {
        let hist = histogram(&observations(&[Some(0.0), Some(2.0)]), Field::WindSpeed, 2)?;
        let bins: Vec<_> = hist.bins().collect();
        assert_eq!(bins, [(0.0, 1.0, 1), (1.0, 2.0, 1)]);
        Ok(())
    }

    #[test]
    fn test_constant_values_widen_the_range() -> Result<(), NotComputable> {
        let hist = histogram(&observations(&[Some(2.0), Some(2.0)]), Field::WindSpeed, 2)?;
        assert_eq!(hist.edges, [1.5, 2.0, 2.5]);
        assert_eq!(hist.counts, [0, 2]);
        Ok(())
    }

    #[test]
    fn test_not_computable() {
        let obs = observations(&[None, None]);
        assert_eq!(
            histogram(&obs, Field::WindSpeed, 50),
            Err(NotComputable::NoValues)
        );
        assert_eq!(
            histogram(&obs, Field::WindSpeed, 0),
            Err(NotComputable::NoBins)
        );
    }
}
