use thiserror::Error;

/// Everything that can go wrong when constructing or combining matrices.
///
/// All failures are immediate and synchronous; there are no retries and no
/// partial results. The operator impls on [`crate::Mat`] panic with these
/// same messages, the checked methods return them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatError {
    #[error("{op}: dimension mismatch, lhs: {lhs:?}, rhs: {rhs:?}")]
    DimensionMismatch {
        op: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    #[error("index {index:?} out of bounds for shape {shape:?}")]
    OutOfBounds {
        index: (usize, usize),
        shape: (usize, usize),
    },

    #[error("invalid construction: {0}")]
    InvalidConstruction(String),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),
}
