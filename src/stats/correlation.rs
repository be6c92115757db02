//! Pearson correlation under the pairwise-complete policy.

use crate::stats::error::NotComputable;
use crate::stats::mean;
use crate::types::field::Field;
use crate::types::observation::Observation;
use serde::{Serialize, Serializer};

/// Pearson correlation of two fields over the positions where both are known.
///
/// Each call picks its own rows: a position missing `a` or `b` is skipped for this
/// pair only (pairwise-complete, not listwise across a field set). The result is
/// clamped to `[-1, 1]` and is symmetric in `a` and `b`.
///
/// # Examples
///
/// ```
/// use air_quality::{correlate, ingest, Field, RawRecord, Readings};
///
/// # fn main() -> Result<(), air_quality::IngestError> {
/// let rows = [(1.0, Some(1.0)), (2.0, None), (3.0, Some(3.0))]
///     .into_iter()
///     .enumerate()
///     .map(|(hour, (a, b))| {
///         let readings = Readings::default()
///             .with(Field::No2, Some(a))
///             .with(Field::Co, b);
///         RawRecord::new(2013, 3, 1, hour as i64, readings)
///     });
/// let series = ingest(rows)?;
///
/// assert_eq!(correlate(&series, Field::No2, Field::Co), Ok(1.0));
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// * [`NotComputable::InsufficientData`] with fewer than 2 qualifying positions.
/// * [`NotComputable::ZeroVariance`] if either field is constant over them.
pub fn correlate(observations: &[Observation], a: Field, b: Field) -> Result<f64, NotComputable> {
    let pairs: Vec<(f64, f64)> = observations
        .iter()
        .filter_map(|observation| Some((observation.value(a)?, observation.value(b)?)))
        .collect();
    if pairs.len() < 2 {
        return Err(NotComputable::InsufficientData {
            found: pairs.len(),
            required: 2,
        });
    }
    let (first_x, first_y) = pairs[0];
    if pairs.iter().all(|(x, _)| *x == first_x) || pairs.iter().all(|(_, y)| *y == first_y) {
        return Err(NotComputable::ZeroVariance);
    }

    let (xs, ys): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
    let (Some(dx), Some(dy)) = (scaled_deviations(&xs), scaled_deviations(&ys)) else {
        return Err(NotComputable::ZeroVariance);
    };
    let (sxy, sxx, syy) = dx
        .iter()
        .zip(&dy)
        .fold((0.0, 0.0, 0.0), |(sxy, sxx, syy), (x, y)| {
            (sxy + x * y, sxx + x * x, syy + y * y)
        });
    Ok((sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0))
}

/// Deviations from the mean divided by the largest absolute deviation, so every
/// element lies in `[-1, 1]` and squares neither overflow nor underflow.
/// `None` when all values are equal.
fn scaled_deviations(values: &[f64]) -> Option<Vec<f64>> {
    let mean = mean(values);
    let deviations: Vec<f64> = values.iter().map(|v| v - mean).collect();
    let scale = deviations.iter().fold(0.0_f64, |max, d| max.max(d.abs()));
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }
    Some(deviations.into_iter().map(|d| d / scale).collect())
}

/// Correlations between every pair of a field set.
///
/// Every cell is computed on its own by [`correlate`], so different cells may be
/// based on different rows. Cells without a value serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub fields: Vec<Field>,
    #[serde(serialize_with = "serialize_cells")]
    cells: Vec<Vec<Result<f64, NotComputable>>>,
}

fn serialize_cells<S>(
    cells: &[Vec<Result<f64, NotComputable>>],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let values: Vec<Vec<Option<f64>>> = cells
        .iter()
        .map(|row| row.iter().map(|cell| cell.ok()).collect())
        .collect();
    values.serialize(serializer)
}

impl CorrelationMatrix {
    /// The cell for the pair `(a, b)`, or `None` if either field is not part of the matrix.
    pub fn get(&self, a: Field, b: Field) -> Option<Result<f64, NotComputable>> {
        let i = self.fields.iter().position(|f| *f == a)?;
        let j = self.fields.iter().position(|f| *f == b)?;
        Some(self.cells[i][j])
    }

    /// Rows of the matrix, in field order.
    pub fn rows(&self) -> &[Vec<Result<f64, NotComputable>>] {
        &self.cells
    }
}

/// Builds the correlation matrix of `fields`.
pub fn correlation_matrix(observations: &[Observation], fields: &[Field]) -> CorrelationMatrix {
    let size = fields.len();
    let mut cells = vec![vec![Err(NotComputable::NoValues); size]; size];
    for i in 0..size {
        for j in i..size {
            let cell = correlate(observations, fields[i], fields[j]);
            cells[i][j] = cell;
            cells[j][i] = cell;
        }
    }
    CorrelationMatrix {
        fields: fields.to_vec(),
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::observation::Readings;
    use chrono::{Duration, NaiveDate};

    fn observations(rows: &[[Option<f64>; 3]]) -> Vec<Observation> {
        let start = NaiveDate::from_ymd_opt(2014, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        rows.iter()
            .enumerate()
            .map(|(i, [pm25, temp, wspm])| Observation {
                datetime: start + Duration::hours(i as i64),
                readings: Readings::default()
                    .with(Field::Pm25, *pm25)
                    .with(Field::Temperature, *temp)
                    .with(Field::WindSpeed, *wspm),
                wind_direction: None,
                station: None,
            })
            .collect()
    }

    #[test]
    fn test_pairwise_complete_example() {
        let obs = observations(&[
            [Some(1.0), Some(1.0), None],
            [Some(2.0), None, None],
            [Some(3.0), Some(3.0), None],
        ]);
        assert_eq!(correlate(&obs, Field::Pm25, Field::Temperature), Ok(1.0));
    }

    #[test]
    fn test_negative_and_symmetric() {
        let obs = observations(&[
            [Some(80.0), Some(-2.5), Some(1.2)],
            [Some(35.5), Some(4.0), Some(3.3)],
            [Some(12.0), Some(9.5), None],
            [Some(150.25), Some(-7.0), Some(0.4)],
            [None, Some(1.0), Some(2.8)],
        ]);
        let ab = correlate(&obs, Field::Pm25, Field::Temperature);
        let ba = correlate(&obs, Field::Temperature, Field::Pm25);
        assert_eq!(ab, ba);
        let r = ab.unwrap();
        assert!(r < -0.9 && r >= -1.0, "r = {r}");
    }

    #[test]
    fn test_self_correlation_is_one() {
        let obs = observations(&[
            [Some(1.3), None, None],
            [Some(2.7), None, None],
            [None, None, None],
            [Some(0.4), None, None],
            [Some(8.9), None, None],
        ]);
        assert_eq!(correlate(&obs, Field::Pm25, Field::Pm25), Ok(1.0));
    }

    #[test]
    fn test_not_computable_cases() {
        let obs = observations(&[
            [Some(1.0), Some(5.0), None],
            [Some(2.0), Some(5.0), Some(1.0)],
            [Some(3.0), Some(5.0), None],
        ]);
        assert_eq!(
            correlate(&obs, Field::Pm25, Field::Temperature),
            Err(NotComputable::ZeroVariance)
        );
        assert_eq!(
            correlate(&obs, Field::Pm25, Field::WindSpeed),
            Err(NotComputable::InsufficientData {
                found: 1,
                required: 2
            })
        );
        assert_eq!(
            correlate(&obs, Field::Pm25, Field::Co),
            Err(NotComputable::InsufficientData {
                found: 0,
                required: 2
            })
        );
    }

    #[test]
    fn test_extreme_magnitudes_still_correlate() {
        for scale in [1e160, 1e-320] {
            let obs = observations(&[
                [Some(1.0 * scale), Some(-1.0 * scale), None],
                [Some(2.0 * scale), Some(-2.0 * scale), None],
                [Some(3.0 * scale), Some(-3.0 * scale), None],
            ]);
            let r = correlate(&obs, Field::Pm25, Field::Temperature);
            assert!(
                matches!(r, Ok(r) if (r + 1.0).abs() < 1e-6),
                "scale {scale}: {r:?}"
            );
        }
    }

    #[test]
    fn test_matrix_cells_use_their_own_rows() {
        // PM2.5/TEMP share rows 0..=2, PM2.5/WSPM share rows 2..=4. A listwise
        // policy would only keep row 2 and could not compute anything.
        let obs = observations(&[
            [Some(1.0), Some(2.0), None],
            [Some(2.0), Some(4.0), None],
            [Some(3.0), Some(6.0), Some(9.0)],
            [Some(4.0), None, Some(6.0)],
            [Some(5.0), None, Some(3.0)],
        ]);
        let fields = [Field::Pm25, Field::Temperature, Field::WindSpeed];
        let matrix = correlation_matrix(&obs, &fields);

        assert_eq!(matrix.get(Field::Pm25, Field::Temperature), Some(Ok(1.0)));
        assert_eq!(matrix.get(Field::Pm25, Field::WindSpeed), Some(Ok(-1.0)));
        assert_eq!(
            matrix.get(Field::Temperature, Field::WindSpeed),
            Some(Err(NotComputable::InsufficientData {
                found: 1,
                required: 2
            }))
        );
        for field in fields {
            assert_eq!(matrix.get(field, field), Some(Ok(1.0)));
        }
        for a in fields {
            for b in fields {
                assert_eq!(matrix.get(a, b), matrix.get(b, a));
            }
        }
        assert_eq!(matrix.get(Field::Pm25, Field::Co), None);
    }

    #[test]
    fn test_matrix_serializes_missing_cells_as_null() -> Result<(), serde_json::Error> {
        let obs = observations(&[[Some(1.0), None, None], [Some(2.0), None, None]]);
        let matrix = correlation_matrix(&obs, &[Field::Pm25, Field::Temperature]);
        let json = serde_json::to_value(&matrix)?;
        assert_eq!(json["fields"][0], "PM2.5");
        assert_eq!(json["cells"][0][0], 1.0);
        assert!(json["cells"][0][1].is_null());
        Ok(())
    }
}
