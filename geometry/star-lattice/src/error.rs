//! Error types for lattice generation.

use thiserror::Error;

/// Result type for lattice generation.
pub type LatticeResult<T> = Result<T, LatticeError>;

/// Errors that can occur during lattice generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum LatticeError {
    /// Fewer directions were requested than the lattice formula supports.
    ///
    /// The latitude step divides by `n - 1`, so at least two directions are needed.
    #[error("a Fibonacci lattice needs at least {required} directions, got {actual}")]
    TooFewDirections {
        /// Minimum number of directions.
        required: usize,
        /// Requested number of directions.
        actual: usize,
    },
}
