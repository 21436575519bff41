/// ahp-core: Analytic Hierarchy Process engine.
///
/// Pairwise judgments → reciprocal matrices → dominant-eigenvector priorities
/// with consistency ratios → weighted-sum ranking of alternatives.
/// No IO, no shared state. Just math. Bring your own front end.
///
/// Labels are validated once in a `LabelSet`; every matrix and vector uses the
/// set's order as its index.
///
/// # Quick start
///
/// ```rust
/// use ahp_core::{Comparison, Hierarchy, LabelSet};
///
/// let criteria = LabelSet::new("criterion", ["Price", "Comfort"]).unwrap();
/// let alternatives = LabelSet::new("alternative", ["Car", "Bus"]).unwrap();
///
/// let hierarchy = Hierarchy::from_comparisons(
///     criteria,
///     alternatives,
///     &[Comparison::new(0, 1, 3)],        // Price 3x as important as Comfort
///     &[
///         vec![Comparison::new(1, 0, 5)], // on Price, Bus beats Car 5x
///         vec![Comparison::new(0, 1, 7)], // on Comfort, Car beats Bus 7x
///     ],
/// ).unwrap();
///
/// let result = hierarchy.evaluate().unwrap();
/// for r in result.ranking() {
///     println!("{}: {:.4}", hierarchy.alternatives().label(r.index), r.score);
/// }
/// for warning in result.warnings() {
///     eprintln!("{warning}");
/// }
/// ```

pub mod aggregate;
pub mod cache;
pub mod constants;
pub mod error;
pub mod hierarchy;
pub mod matrix;
pub mod solver;
pub mod types;

// Re-export primary public API at crate root.
pub use aggregate::aggregate;
pub use cache::WeightCache;
pub use error::{AhpError, Result};
pub use hierarchy::{Hierarchy, HierarchyResult};
pub use matrix::PairwiseMatrix;
pub use solver::{consistency_ratio, evaluate, solve, MatrixEvaluation, Priorities};
pub use types::{
    Comparison, ConsistencyResult, InconsistencyWarning, LabelSet, RankedAlternative, ScoreVector,
    WeightVector,
};
