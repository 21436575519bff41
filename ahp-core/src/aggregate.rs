/// Weighted-sum synthesis of criteria and alternative priorities.
use crate::error::{AhpError, Result};
use crate::types::{ScoreVector, WeightVector};

/// Combine criteria weights with per-criterion alternative weights:
/// `score[a] = sum_k criteria[k] * alternatives[k][a]`.
///
/// `alternatives` holds one row per criterion, in criteria order. The result
/// is not renormalized; simplex inputs already give a simplex output.
pub fn aggregate(criteria: &WeightVector, alternatives: &[WeightVector]) -> Result<ScoreVector> {
    if criteria.len() != alternatives.len() {
        return Err(AhpError::mismatch(
            criteria.len(),
            alternatives.len(),
            "alternative weight rows vs criteria weights",
        ));
    }

    let m = alternatives.first().map_or(0, WeightVector::len);
    if let Some((k, row)) = alternatives.iter().enumerate().find(|(_, row)| row.len() != m) {
        let context = format!("alternative weights for criterion {k}");
        return Err(AhpError::mismatch(m, row.len(), context));
    }

    let mut scores = vec![0.0; m];
    for (&weight, row) in criteria.iter().zip(alternatives) {
        for (score, &w) in scores.iter_mut().zip(row.iter()) {
            *score += weight * w;
        }
    }

    Ok(ScoreVector::new(scores))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wv(weights: &[f64]) -> WeightVector {
        WeightVector::from_normalized(weights.to_vec()).unwrap()
    }

    #[test]
    fn test_weighted_sum() {
        let criteria = wv(&[0.75, 0.25]);
        let alternatives = vec![wv(&[0.6, 0.4]), wv(&[0.2, 0.8])];

        let scores = aggregate(&criteria, &alternatives).unwrap();
        assert!((scores[0] - 0.5).abs() < 1e-12);
        assert!((scores[1] - 0.5).abs() < 1e-12);
        let total: f64 = scores.as_slice().iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_criterion_passes_weights_through() {
        let alt = wv(&[0.5, 0.3, 0.2]);
        let scores = aggregate(&wv(&[1.0]), &[alt.clone()]).unwrap();
        assert_eq!(scores.as_slice(), alt.as_slice());
    }

    #[test]
    fn test_repeat_calls_identical() {
        let criteria = wv(&[0.2, 0.3, 0.5]);
        let alternatives = vec![wv(&[0.1, 0.9]), wv(&[0.4, 0.6]), wv(&[0.7, 0.3])];
        let first = aggregate(&criteria, &alternatives).unwrap();
        let second = aggregate(&criteria, &alternatives).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_row_count_mismatch() {
        let criteria = wv(&[0.2, 0.3, 0.5]);
        let alternatives = vec![wv(&[0.5, 0.5]), wv(&[0.5, 0.5])];
        let err = aggregate(&criteria, &alternatives).unwrap_err();
        assert!(matches!(err, AhpError::DimensionMismatch { expected: 3, actual: 2, .. }));
    }

    #[test]
    fn test_ragged_rows_mismatch() {
        let criteria = wv(&[0.5, 0.5]);
        let alternatives = vec![wv(&[0.5, 0.5]), wv(&[0.2, 0.3, 0.5])];
        assert!(matches!(
            aggregate(&criteria, &alternatives),
            Err(AhpError::DimensionMismatch { .. })
        ));
    }
}
