/// Pairwise comparison matrices and the reciprocal normalizer.
///
/// A `PairwiseMatrix` only exists in normalized form: diagonal of ones and
/// `m[j][i] == 1 / m[i][j]`. Every constructor builds a fresh matrix; inputs
/// are never modified.
use std::collections::HashSet;

use crate::constants::TOLERANCE;
use crate::error::{AhpError, Result};
use crate::types::Comparison;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawMatrix"))]
pub struct PairwiseMatrix {
    dimension: usize,
    /// Row-major, `dimension * dimension` entries.
    entries: Vec<f64>,
}

/// Wire form of a `PairwiseMatrix`, checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMatrix {
    dimension: usize,
    entries: Vec<f64>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawMatrix> for PairwiseMatrix {
    type Error = AhpError;

    fn try_from(raw: RawMatrix) -> Result<Self> {
        let n = raw.dimension;
        if raw.entries.len() != n * n {
            return Err(AhpError::mismatch(n * n, raw.entries.len(), "serialized matrix entries"));
        }
        let rows: Vec<Vec<f64>> = raw.entries.chunks(n.max(1)).map(<[f64]>::to_vec).collect();
        let matrix = Self::from_upper_triangle(&rows)?;

        // The lower triangle must already be the reciprocal of the upper one.
        for (i, (&given, &expected)) in raw.entries.iter().zip(&matrix.entries).enumerate() {
            let close = (given - expected).abs() <= TOLERANCE * expected.max(1.0);
            if !close {
                let (row, col) = (i / n, i % n);
                return Err(AhpError::domain(format!(
                    "entry ({row}, {col}) is {given}, expected reciprocal {expected}"
                )));
            }
        }
        Ok(matrix)
    }
}

impl PairwiseMatrix {
    /// Normalize a judgment matrix whose diagonal and strict upper triangle are
    /// filled in. The lower triangle of `rows` is ignored and rebuilt from
    /// reciprocals.
    pub fn from_upper_triangle(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(AhpError::mismatch(1, 0, "pairwise matrix needs at least one row"));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(AhpError::mismatch(n, row.len(), format!("length of row {i}")));
            }
        }

        let mut entries = vec![1.0; n * n];
        for i in 0..n {
            let diagonal = rows[i][i];
            if (diagonal - 1.0).abs() > TOLERANCE {
                return Err(AhpError::domain(format!(
                    "diagonal entry ({i}, {i}) is {diagonal}, expected 1"
                )));
            }
            for j in (i + 1)..n {
                let value = rows[i][j];
                if !value.is_finite() || value <= 0.0 {
                    return Err(AhpError::domain(format!(
                        "judgment ({i}, {j}) is {value}; judgments must be positive and finite"
                    )));
                }
                entries[i * n + j] = value;
                entries[j * n + i] = 1.0 / value;
            }
        }

        Ok(PairwiseMatrix { dimension: n, entries })
    }

    /// Build a matrix for `n` items from pairwise answers. Pairs left
    /// unanswered count as equally important.
    pub fn from_comparisons(n: usize, comparisons: &[Comparison]) -> Result<Self> {
        if n == 0 {
            return Err(AhpError::mismatch(1, 0, "pairwise matrix needs at least one item"));
        }

        let mut rows = vec![vec![1.0; n]; n];
        let mut answered = HashSet::with_capacity(comparisons.len());

        for c in comparisons {
            for idx in [c.preferred, c.other] {
                if idx >= n {
                    let context = format!("comparison index {idx} out of range");
                    return Err(AhpError::mismatch(n, idx + 1, context));
                }
            }
            if c.preferred == c.other {
                return Err(AhpError::domain(format!("item {} compared with itself", c.preferred)));
            }
            c.validate_intensity()?;

            let (lo, hi) = (c.preferred.min(c.other), c.preferred.max(c.other));
            if !answered.insert((lo, hi)) {
                return Err(AhpError::domain(format!("pair ({lo}, {hi}) answered more than once")));
            }

            let intensity = f64::from(c.intensity);
            rows[lo][hi] = if c.preferred == lo { intensity } else { 1.0 / intensity };
        }

        Self::from_upper_triangle(&rows)
    }

    /// Matrix with every judgment equal to 1.
    pub fn uniform(n: usize) -> Result<Self> {
        Self::from_comparisons(n, &[])
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.entries[row * self.dimension + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.dimension;
        &self.entries[start..start + self.dimension]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.entries.chunks(self.dimension)
    }

    /// Row-major entries.
    pub fn as_slice(&self) -> &[f64] {
        &self.entries
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|r| r.to_vec()).collect()
    }
}
