/// Priority weights from the dominant eigenvector, plus Saaty's consistency test.
///
/// Pure functions: each call reads its matrix and returns new values. The only
/// side effect is a `tracing` event per evaluated matrix.
use nalgebra::{DMatrix, Schur, SVD};
use tracing::{debug, warn};

use crate::constants::{random_index, MAX_DIMENSION, MAX_SOLVER_ITERATIONS};
use crate::error::{AhpError, Result};
use crate::matrix::PairwiseMatrix;
use crate::types::{ConsistencyResult, InconsistencyWarning, WeightVector};

/// Everything derived from one pairwise matrix.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Priorities {
    pub weights: WeightVector,
    /// Dominant (largest real part) eigenvalue.
    pub lambda_max: f64,
    pub consistency_index: f64,
    pub consistency: ConsistencyResult,
}

/// `Priorities` for a labelled matrix, with the warning raised if it failed
/// the consistency check.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixEvaluation {
    pub label: String,
    pub priorities: Priorities,
    pub warning: Option<InconsistencyWarning>,
}

/// Derive priority weights and the consistency ratio of a normalized matrix.
pub fn solve(matrix: &PairwiseMatrix) -> Result<Priorities> {
    let n = matrix.dimension();
    if n > MAX_DIMENSION {
        return Err(AhpError::DimensionUnsupported(n));
    }

    let (lambda_max, eigenvector) = dominant_eigenpair(matrix)?;

    let sum: f64 = eigenvector.iter().sum();
    if !sum.is_finite() || sum.abs() < f64::EPSILON {
        return Err(AhpError::Decomposition(n));
    }
    let weights: Vec<f64> = eigenvector.iter().map(|v| v / sum).collect();

    let (consistency_index, ratio) = consistency_ratio(lambda_max, n)?;

    Ok(Priorities {
        weights: WeightVector::from_solver(weights),
        lambda_max,
        consistency_index,
        consistency: ConsistencyResult::from_ratio(ratio),
    })
}

/// Solve a matrix and attach an `InconsistencyWarning` naming `label` when
/// CR >= 0.1. Inconsistent matrices still return their weights.
pub fn evaluate(matrix: &PairwiseMatrix, label: &str) -> Result<MatrixEvaluation> {
    let priorities = solve(matrix)?;

    debug!(
        label,
        n = matrix.dimension(),
        lambda_max = priorities.lambda_max,
        ci = priorities.consistency_index,
        cr = priorities.consistency.ratio,
        "solved pairwise matrix"
    );

    let warning = if priorities.consistency.consistent {
        None
    } else {
        let warning = InconsistencyWarning {
            label: label.to_string(),
            ratio: priorities.consistency.ratio,
        };
        warn!("{warning}");
        Some(warning)
    };

    Ok(MatrixEvaluation {
        label: label.to_string(),
        priorities,
        warning,
    })
}

/// Consistency index and ratio for an n x n matrix with dominant eigenvalue
/// `lambda_max`. Returns `(CI, CR)`.
///
/// Sizes 1 and 2 are consistent by construction, so CR is 0 there rather than
/// CI / 0. Rounding can push lambda_max a hair below n; CI is clamped at 0.
pub fn consistency_ratio(lambda_max: f64, n: usize) -> Result<(f64, f64)> {
    let ri = random_index(n).ok_or(AhpError::DimensionUnsupported(n))?;
    if n == 1 {
        return Ok((0.0, 0.0));
    }

    let ci = ((lambda_max - n as f64) / (n as f64 - 1.0)).max(0.0);
    if ri == 0.0 {
        return Ok((ci, 0.0));
    }
    Ok((ci, ci / ri))
}

/// Eigenvalue with the largest real part and its eigenvector (real parts).
///
/// Eigenvalues come from a real Schur decomposition, which handles the
/// non-symmetric case and yields complex conjugate pairs. For a positive
/// reciprocal matrix the dominant one is real (Perron-Frobenius), so its
/// eigenvector spans the null space of `A - lambda_max * I`: the right singular
/// vector belonging to the smallest singular value.
fn dominant_eigenpair(matrix: &PairwiseMatrix) -> Result<(f64, Vec<f64>)> {
    let n = matrix.dimension();
    if n == 1 {
        return Ok((1.0, vec![1.0]));
    }

    let a = DMatrix::from_row_slice(n, n, matrix.as_slice());

    let schur = Schur::try_new(a.clone(), f64::EPSILON, MAX_SOLVER_ITERATIONS)
        .ok_or(AhpError::Decomposition(n))?;
    let lambda_max = schur
        .complex_eigenvalues()
        .iter()
        .map(|z| z.re)
        .fold(f64::NEG_INFINITY, f64::max);

    let shifted = a - DMatrix::<f64>::identity(n, n) * lambda_max;
    let svd = SVD::try_new(shifted, false, true, f64::EPSILON, MAX_SOLVER_ITERATIONS)
        .ok_or(AhpError::Decomposition(n))?;
    let v_t = svd.v_t.as_ref().ok_or(AhpError::Decomposition(n))?;

    let (null_idx, _) = svd
        .singular_values
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .ok_or(AhpError::Decomposition(n))?;

    let eigenvector = v_t.row(null_idx).iter().copied().collect();
    Ok((lambda_max, eigenvector))
}
