/// Saaty's Random Index, indexed by matrix dimension minus one (n = 1..=11).
///
/// RI is the mean consistency index of randomly generated reciprocal matrices
/// of size n. Sizes 1 and 2 are always consistent, hence 0.
pub const RANDOM_INDEX: [f64; 11] = [
    0.0, 0.0, 0.58, 0.90, 1.12, 1.24, 1.32, 1.41, 1.45, 1.49, 1.51,
];

/// Largest matrix dimension with a tabulated Random Index.
pub const MAX_DIMENSION: usize = RANDOM_INDEX.len();

/// A matrix fails the consistency check when CR >= this value.
pub const CONSISTENCY_THRESHOLD: f64 = 0.1;

/// Bounds of the fundamental 1-9 judgment scale.
pub const MIN_INTENSITY: u8 = 1;
pub const MAX_INTENSITY: u8 = 9;

/// Label attached to the criteria matrix in consistency reports.
pub const CRITERIA_TABLE_LABEL: &str = "criteria table";

/// Tolerance for "sums to one" and "diagonal is one" checks.
pub const TOLERANCE: f64 = 1e-9;

/// Iteration cap for the Schur and SVD routines. Both converge in a handful of
/// sweeps for matrices this small; hitting the cap means the input is degenerate.
pub const MAX_SOLVER_ITERATIONS: usize = 10_000;

/// Random Index for an n x n matrix, or `None` past the tabulated range.
pub fn random_index(n: usize) -> Option<f64> {
    if n == 0 {
        return None;
    }
    RANDOM_INDEX.get(n - 1).copied()
}
