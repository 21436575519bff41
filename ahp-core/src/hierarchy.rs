/// One decision: criteria, alternatives and their judgment matrices.
///
/// Evaluating a hierarchy runs the solver on the criteria matrix and on every
/// per-criterion alternative matrix, then aggregates. Inconsistent matrices are
/// collected as warnings; they never stop the evaluation.
use crate::aggregate::aggregate;
use crate::cache::WeightCache;
use crate::constants::CRITERIA_TABLE_LABEL;
use crate::error::{AhpError, Result};
use crate::matrix::PairwiseMatrix;
use crate::solver::{self, MatrixEvaluation};
use crate::types::{
    Comparison, InconsistencyWarning, LabelSet, RankedAlternative, ScoreVector, WeightVector,
};

#[derive(Debug, Clone)]
pub struct Hierarchy {
    criteria: LabelSet,
    alternatives: LabelSet,
    criteria_matrix: PairwiseMatrix,
    /// One m x m matrix per criterion, in criteria order.
    alternative_matrices: Vec<PairwiseMatrix>,
}

impl Hierarchy {
    pub fn new(
        criteria: LabelSet,
        alternatives: LabelSet,
        criteria_matrix: PairwiseMatrix,
        alternative_matrices: Vec<PairwiseMatrix>,
    ) -> Result<Self> {
        let n = criteria.len();
        let m = alternatives.len();

        if criteria_matrix.dimension() != n {
            return Err(AhpError::mismatch(
                n,
                criteria_matrix.dimension(),
                "criteria matrix vs criteria",
            ));
        }
        if alternative_matrices.len() != n {
            return Err(AhpError::mismatch(
                n,
                alternative_matrices.len(),
                "alternative matrices vs criteria",
            ));
        }
        for (k, matrix) in alternative_matrices.iter().enumerate() {
            if matrix.dimension() != m {
                return Err(AhpError::mismatch(
                    m,
                    matrix.dimension(),
                    format!("alternative matrix for criterion \"{}\"", criteria.label(k)),
                ));
            }
        }

        Ok(Hierarchy {
            criteria,
            alternatives,
            criteria_matrix,
            alternative_matrices,
        })
    }

    /// Build every matrix from pairwise answers. `alternative_comparisons[k]`
    /// holds the answers for criterion k; unanswered pairs count as equal.
    pub fn from_comparisons(
        criteria: LabelSet,
        alternatives: LabelSet,
        criteria_comparisons: &[Comparison],
        alternative_comparisons: &[Vec<Comparison>],
    ) -> Result<Self> {
        if alternative_comparisons.len() != criteria.len() {
            return Err(AhpError::mismatch(
                criteria.len(),
                alternative_comparisons.len(),
                "alternative judgment sets vs criteria",
            ));
        }

        let criteria_matrix =
            PairwiseMatrix::from_comparisons(criteria.len(), criteria_comparisons)?;
        let alternative_matrices = alternative_comparisons
            .iter()
            .map(|comparisons| PairwiseMatrix::from_comparisons(alternatives.len(), comparisons))
            .collect::<Result<Vec<_>>>()?;

        Self::new(criteria, alternatives, criteria_matrix, alternative_matrices)
    }

    pub fn criteria(&self) -> &LabelSet {
        &self.criteria
    }

    pub fn alternatives(&self) -> &LabelSet {
        &self.alternatives
    }

    pub fn criteria_matrix(&self) -> &PairwiseMatrix {
        &self.criteria_matrix
    }

    pub fn alternative_matrices(&self) -> &[PairwiseMatrix] {
        &self.alternative_matrices
    }

    pub fn evaluate(&self) -> Result<HierarchyResult> {
        self.evaluate_with(solver::evaluate)
    }

    /// Same as `evaluate`, reusing results for matrices already in `cache`.
    pub fn evaluate_cached(&self, cache: &mut WeightCache) -> Result<HierarchyResult> {
        self.evaluate_with(|matrix, label| cache.evaluate(matrix, label))
    }

    fn evaluate_with<F>(&self, mut evaluate: F) -> Result<HierarchyResult>
    where
        F: FnMut(&PairwiseMatrix, &str) -> Result<MatrixEvaluation>,
    {
        let criteria = evaluate(&self.criteria_matrix, CRITERIA_TABLE_LABEL)?;

        let alternatives = self
            .alternative_matrices
            .iter()
            .zip(self.criteria.labels())
            .map(|(matrix, label)| evaluate(matrix, label.as_str()))
            .collect::<Result<Vec<_>>>()?;

        let rows: Vec<WeightVector> = alternatives
            .iter()
            .map(|e| e.priorities.weights.clone())
            .collect();
        let scores = aggregate(&criteria.priorities.weights, &rows)?;

        Ok(HierarchyResult {
            criteria,
            alternatives,
            scores,
        })
    }
}

/// Output of `Hierarchy::evaluate`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchyResult {
    /// Evaluation of the criteria matrix, labelled "criteria table".
    pub criteria: MatrixEvaluation,
    /// One evaluation per criterion, labelled with the criterion name.
    pub alternatives: Vec<MatrixEvaluation>,
    pub scores: ScoreVector,
}

impl HierarchyResult {
    pub fn criteria_weights(&self) -> &WeightVector {
        &self.criteria.priorities.weights
    }

    /// All matrix evaluations, criteria table first.
    pub fn evaluations(&self) -> impl Iterator<Item = &MatrixEvaluation> + '_ {
        std::iter::once(&self.criteria).chain(self.alternatives.iter())
    }

    pub fn warnings(&self) -> Vec<&InconsistencyWarning> {
        self.evaluations().filter_map(|e| e.warning.as_ref()).collect()
    }

    pub fn is_consistent(&self) -> bool {
        self.evaluations().all(|e| e.warning.is_none())
    }

    pub fn ranking(&self) -> Vec<RankedAlternative> {
        self.scores.ranked()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(kind: &str, names: &[&str]) -> LabelSet {
        LabelSet::new(kind, names).unwrap()
    }

    #[test]
    fn test_single_criterion_scores_equal_alternative_weights() {
        let hierarchy = Hierarchy::from_comparisons(
            labels("criterion", &["Price"]),
            labels("alternative", &["Car", "Bus", "Truck"]),
            &[],
            &[vec![]],
        )
        .unwrap();

        let result = hierarchy.evaluate().unwrap();
        assert_eq!(result.alternatives.len(), 1);
        assert_eq!(result.scores.as_slice(), result.alternatives[0].priorities.weights.as_slice());
        for &s in result.scores.as_slice() {
            assert!((s - 1.0 / 3.0).abs() < 1e-9);
        }
        assert!(result.is_consistent());
    }

    #[test]
    fn test_two_criteria_ranking() {
        // Price three times as important as Comfort.
        // Price: Bus strongly preferred. Comfort: Car strongly preferred.
        let hierarchy = Hierarchy::from_comparisons(
            labels("criterion", &["Price", "Comfort"]),
            labels("alternative", &["Car", "Bus"]),
            &[Comparison::new(0, 1, 3)],
            &[vec![Comparison::new(1, 0, 4)], vec![Comparison::new(0, 1, 9)]],
        )
        .unwrap();

        let result = hierarchy.evaluate().unwrap();
        let w = result.criteria_weights();
        assert!((w[0] - 0.75).abs() < 1e-9);

        // Car: 0.75 * 0.2 + 0.25 * 0.9 = 0.375; Bus: 0.75 * 0.8 + 0.25 * 0.1 = 0.625
        assert!((result.scores[0] - 0.375).abs() < 1e-9);
        assert!((result.scores[1] - 0.625).abs() < 1e-9);

        let ranking = result.ranking();
        assert_eq!(hierarchy.alternatives().label(ranking[0].index), "Bus");
        let total: f64 = result.scores.as_slice().iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_inconsistent_criteria_warn_but_complete() {
        let hierarchy = Hierarchy::from_comparisons(
            labels("criterion", &["A", "B", "C"]),
            labels("alternative", &["X", "Y"]),
            &[Comparison::new(0, 1, 9), Comparison::new(1, 2, 9)],
            &[vec![], vec![], vec![]],
        )
        .unwrap();

        let result = hierarchy.evaluate().unwrap();
        assert!(!result.is_consistent());
        let warnings = result.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].label, "criteria table");
        assert_eq!(result.scores.len(), 2);
    }

    #[test]
    fn test_inconsistent_alternatives_labelled_by_criterion() {
        let hierarchy = Hierarchy::from_comparisons(
            labels("criterion", &["Price", "Safety"]),
            labels("alternative", &["X", "Y", "Z"]),
            &[],
            &[vec![], vec![Comparison::new(0, 1, 9), Comparison::new(1, 2, 9)]],
        )
        .unwrap();

        let result = hierarchy.evaluate().unwrap();
        let labels: Vec<&str> = result.warnings().iter().map(|w| w.label.as_str()).collect();
        assert_eq!(labels, vec!["Safety"]);
        assert_eq!(result.evaluations().count(), 3);
    }

    #[test]
    fn test_dimension_checks() {
        let criteria = labels("criterion", &["Price", "Comfort"]);
        let alternatives = labels("alternative", &["Car", "Bus"]);

        let err = Hierarchy::new(
            criteria.clone(),
            alternatives.clone(),
            PairwiseMatrix::uniform(3).unwrap(),
            vec![PairwiseMatrix::uniform(2).unwrap(); 2],
        )
        .unwrap_err();
        assert!(matches!(err, AhpError::DimensionMismatch { expected: 2, actual: 3, .. }));

        let err = Hierarchy::new(
            criteria.clone(),
            alternatives.clone(),
            PairwiseMatrix::uniform(2).unwrap(),
            vec![PairwiseMatrix::uniform(2).unwrap()],
        )
        .unwrap_err();
        assert!(matches!(err, AhpError::DimensionMismatch { expected: 2, actual: 1, .. }));

        let err = Hierarchy::new(
            criteria,
            alternatives,
            PairwiseMatrix::uniform(2).unwrap(),
            vec![PairwiseMatrix::uniform(2).unwrap(), PairwiseMatrix::uniform(3).unwrap()],
        )
        .unwrap_err();
        assert!(matches!(err, AhpError::DimensionMismatch { expected: 2, actual: 3, .. }));
    }

    #[test]
    fn test_empty_alternatives_rejected() {
        let err = Hierarchy::from_comparisons(
            labels("criterion", &["Price"]),
            labels("alternative", &[]),
            &[],
            &[vec![]],
        )
        .unwrap_err();
        assert!(matches!(err, AhpError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_cached_evaluation_matches_uncached() {
        let hierarchy = Hierarchy::from_comparisons(
            labels("criterion", &["Price", "Comfort"]),
            labels("alternative", &["Car", "Bus", "Bike"]),
            &[Comparison::new(1, 0, 2)],
            &[vec![Comparison::new(2, 0, 5)], vec![Comparison::new(0, 1, 3)]],
        )
        .unwrap();

        let mut cache = WeightCache::new();
        let cached = hierarchy.evaluate_cached(&mut cache).unwrap();
        let again = hierarchy.evaluate_cached(&mut cache).unwrap();

        assert_eq!(cached, hierarchy.evaluate().unwrap());
        assert_eq!(cached, again);
        assert_eq!(cache.misses(), 3);
        assert_eq!(cache.hits(), 3);
    }
}
