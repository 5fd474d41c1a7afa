//! Error taxonomy shared by the matrix engine and the network
//!
//! Every fallible operation in the crate returns [`Result`]. Errors are raised
//! before any element is touched, so a failed call never leaves a matrix or a
//! network partially updated.

/// Errors produced by matrix and network operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A matrix or topology was requested with a zero extent.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// Two operands of a matrix operation have incompatible shapes.
    #[error("dimension mismatch in {operation}: lhs is {}x{}, rhs is {}x{}", lhs.0, lhs.1, rhs.0, rhs.1)]
    DimensionMismatch {
        operation: &'static str,
        lhs: (usize, usize),
        rhs: (usize, usize),
    },

    /// A dataset does not fit the network topology.
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    /// An element, row, column or layer index fell outside its extent.
    #[error("{axis} index {index} out of range (bound {bound})")]
    IndexOutOfRange {
        axis: &'static str,
        index: usize,
        bound: usize,
    },

    /// A scalar argument such as a range bound or learning rate was rejected.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A configuration file parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
