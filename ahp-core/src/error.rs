/// Error types for the AHP core.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AhpError>;

/// Failures that abort a computation. Inconsistent judgments are not errors;
/// see `InconsistencyWarning`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AhpError {
    /// A value outside its domain: non-positive judgment, bad intensity,
    /// diagonal other than 1, weights off the simplex.
    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Dimension mismatch: expected {expected}, got {actual} ({context})")]
    DimensionMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// No Random Index is tabulated for this matrix size.
    #[error("Unsupported dimension {0}: no Random Index is tabulated beyond 11x11")]
    DimensionUnsupported(usize),

    #[error("Duplicate {kind} label \"{label}\"")]
    DuplicateLabel { kind: String, label: String },

    #[error("Empty {kind} label at position {index}")]
    EmptyLabel { kind: String, index: usize },

    #[error("Eigen decomposition failed to converge for a {0}x{0} matrix")]
    Decomposition(usize),
}

impl AhpError {
    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        AhpError::Domain(msg.into())
    }

    pub(crate) fn mismatch(expected: usize, actual: usize, context: impl Into<String>) -> Self {
        AhpError::DimensionMismatch {
            expected,
            actual,
            context: context.into(),
        }
    }
}
