use std::collections::HashMap;
use std::ops::Index;

use crate::constants::{CONSISTENCY_THRESHOLD, MAX_INTENSITY, MIN_INTENSITY, TOLERANCE};
use crate::error::{AhpError, Result};

/// One pairwise answer: `preferred` is `intensity` times more important than `other`.
///
/// Items are indices into the matrix being built. Intensity 1 means the two
/// are equally important, whichever side was picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comparison {
    pub preferred: usize,
    pub other: usize,
    /// Saaty scale, 1..=9.
    pub intensity: u8,
}

impl Comparison {
    pub fn new(preferred: usize, other: usize, intensity: u8) -> Self {
        Comparison { preferred, other, intensity }
    }

    pub(crate) fn validate_intensity(&self) -> Result<()> {
        if !(MIN_INTENSITY..=MAX_INTENSITY).contains(&self.intensity) {
            return Err(AhpError::domain(format!(
                "intensity {} for pair ({}, {}) is outside the {}-{} scale",
                self.intensity, self.preferred, self.other, MIN_INTENSITY, MAX_INTENSITY,
            )));
        }
        Ok(())
    }
}

/// Priority weights: non-negative, summing to 1, one per matrix row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<f64>"))]
pub struct WeightVector(Vec<f64>);

impl TryFrom<Vec<f64>> for WeightVector {
    type Error = AhpError;

    fn try_from(weights: Vec<f64>) -> Result<Self> {
        Self::from_normalized(weights)
    }
}

impl WeightVector {
    /// Wrap weights computed elsewhere, checking they lie on the simplex.
    pub fn from_normalized(weights: Vec<f64>) -> Result<Self> {
        if weights.is_empty() {
            return Err(AhpError::domain("weight vector is empty"));
        }
        if let Some(w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(AhpError::domain(format!("weight {w} is negative or not finite")));
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > TOLERANCE {
            return Err(AhpError::domain(format!("weights sum to {sum}, expected 1")));
        }
        Ok(WeightVector(weights))
    }

    /// Solver output; the caller has already normalized.
    pub(crate) fn from_solver(weights: Vec<f64>) -> Self {
        WeightVector(weights)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl Index<usize> for WeightVector {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.0[idx]
    }
}

/// Composite score per alternative, in alternative order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ScoreVector(Vec<f64>);

impl ScoreVector {
    pub(crate) fn new(scores: Vec<f64>) -> Self {
        ScoreVector(scores)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Alternatives sorted by score, best first. Ties keep input order.
    pub fn ranked(&self) -> Vec<RankedAlternative> {
        let mut ranked: Vec<RankedAlternative> = self
            .0
            .iter()
            .enumerate()
            .map(|(index, &score)| RankedAlternative { index, score })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }
}

impl Index<usize> for ScoreVector {
    type Output = f64;

    fn index(&self, idx: usize) -> &f64 {
        &self.0[idx]
    }
}

/// An alternative's position in the final ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedAlternative {
    /// Index into the alternative set.
    pub index: usize,
    pub score: f64,
}

/// Outcome of the consistency ratio test for one matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsistencyResult {
    pub ratio: f64,
    pub consistent: bool,
}

impl ConsistencyResult {
    pub fn from_ratio(ratio: f64) -> Self {
        ConsistencyResult {
            ratio,
            consistent: ratio < CONSISTENCY_THRESHOLD,
        }
    }
}

/// Raised alongside results when a matrix fails the consistency check.
/// Never aborts a computation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InconsistencyWarning {
    /// Which matrix failed: "criteria table" or a criterion name.
    pub label: String,
    pub ratio: f64,
}

impl std::fmt::Display for InconsistencyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Consistency check failed for {} (CR = {:.4}, threshold {})",
            self.label, self.ratio, CONSISTENCY_THRESHOLD,
        )
    }
}

/// Ordered, unique labels for one level of the hierarchy. Order defines the
/// index used by every matrix and vector at that level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    kind: String,
    labels: Vec<String>,
    label_to_idx: HashMap<String, usize>,
}

impl LabelSet {
    /// Build a set, trimming labels and rejecting empty or repeated ones.
    /// `kind` ("criterion", "alternative") only feeds error messages.
    pub fn new<I, S>(kind: &str, labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .collect();
        let mut label_to_idx = HashMap::with_capacity(labels.len());
        for (index, label) in labels.iter().enumerate() {
            if label.is_empty() {
                return Err(AhpError::EmptyLabel { kind: kind.to_string(), index });
            }
            if label_to_idx.insert(label.clone(), index).is_some() {
                return Err(AhpError::DuplicateLabel {
                    kind: kind.to_string(),
                    label: label.clone(),
                });
            }
        }
        Ok(LabelSet {
            kind: kind.to_string(),
            labels,
            label_to_idx,
        })
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.label_to_idx.get(label.trim()).copied()
    }

    pub fn label(&self, idx: usize) -> &str {
        &self.labels[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_set_maps_both_ways() {
        let set = LabelSet::new("criterion", ["Price", " Comfort ", "Safety"]).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.index_of("Comfort"), Some(1));
        assert_eq!(set.label(2), "Safety");
        assert_eq!(set.index_of("Speed"), None);
    }

    #[test]
    fn test_label_set_rejects_duplicates() {
        let err = LabelSet::new("alternative", ["Car", "Bus", "Car"]).unwrap_err();
        assert_eq!(
            err,
            AhpError::DuplicateLabel { kind: "alternative".into(), label: "Car".into() }
        );
    }

    #[test]
    fn test_label_set_rejects_blank_labels() {
        let err = LabelSet::new("criterion", ["Price", "  "]).unwrap_err();
        assert!(matches!(err, AhpError::EmptyLabel { index: 1, .. }));
    }

    #[test]
    fn test_weight_vector_checks_simplex() {
        assert!(WeightVector::from_normalized(vec![0.5, 0.5]).is_ok());
        assert!(WeightVector::from_normalized(vec![0.6, 0.6]).is_err());
        assert!(WeightVector::from_normalized(vec![1.5, -0.5]).is_err());
        assert!(WeightVector::from_normalized(vec![]).is_err());
    }

    #[test]
    fn test_ranked_sorts_descending() {
        let scores = ScoreVector::new(vec![0.2, 0.5, 0.3]);
        let order: Vec<usize> = scores.ranked().iter().map(|r| r.index).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_consistency_threshold_is_inclusive() {
        assert!(ConsistencyResult::from_ratio(0.099).consistent);
        assert!(!ConsistencyResult::from_ratio(0.1).consistent);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_weight_vector_deserialize_checks_simplex() {
        let w: WeightVector = serde_json::from_str("[0.25, 0.75]").unwrap();
        assert_eq!(w.as_slice(), &[0.25, 0.75]);
        assert_eq!(serde_json::to_string(&w).unwrap(), "[0.25,0.75]");

        assert!(serde_json::from_str::<WeightVector>("[0.5, 0.7]").is_err());
        assert!(serde_json::from_str::<WeightVector>("[1.5, -0.5]").is_err());
        assert!(serde_json::from_str::<WeightVector>("[]").is_err());
    }
}
