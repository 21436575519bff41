/// Optional memo table for matrix evaluations.
///
/// Lives outside the solver: callers that re-evaluate the same hierarchy
/// repeatedly (an interactive front end re-running after every edit) own one
/// and pass it in. Keys are the exact matrix contents plus the label, so a hit
/// always returns what `solver::evaluate` would have computed.
use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::matrix::PairwiseMatrix;
use crate::solver::{self, MatrixEvaluation};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    dimension: usize,
    /// Bit patterns of the row-major entries.
    entries: Vec<u64>,
    label: String,
}

impl CacheKey {
    fn new(matrix: &PairwiseMatrix, label: &str) -> Self {
        CacheKey {
            dimension: matrix.dimension(),
            entries: matrix.as_slice().iter().map(|v| v.to_bits()).collect(),
            label: label.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct WeightCache {
    entries: HashMap<CacheKey, MatrixEvaluation>,
    hits: usize,
    misses: usize,
}

impl WeightCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached `solver::evaluate`. Failures are returned, not stored.
    pub fn evaluate(&mut self, matrix: &PairwiseMatrix, label: &str) -> Result<MatrixEvaluation> {
        let key = CacheKey::new(matrix, label);
        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            debug!(label, "weight cache hit");
            return Ok(hit.clone());
        }

        self.misses += 1;
        let evaluation = solver::evaluate(matrix, label)?;
        self.entries.insert(key, evaluation.clone());
        Ok(evaluation)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
