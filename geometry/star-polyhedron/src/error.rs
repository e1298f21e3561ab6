//! Error types for polyhedron construction and queries.

use star_index::IndexError;
use star_lattice::LatticeError;
use thiserror::Error;

/// Result type for polyhedron operations.
pub type PolyhedronResult<T> = Result<T, PolyhedronError>;

/// Errors that can occur when building or querying a polyhedron.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum PolyhedronError {
    /// Not enough distances (or vertices) to span a solid.
    #[error("at least {required} distances are required, got {actual}")]
    TooFewDistances {
        /// Minimum number of distances.
        required: usize,
        /// Number of distances provided.
        actual: usize,
    },

    /// A nullable distance entry was absent.
    #[error("distance {index} is missing")]
    MissingDistance {
        /// Position of the missing entry.
        index: usize,
    },

    /// A distance is negative, NaN or infinite.
    #[error("distance {index} must be finite and non-negative, got {value}")]
    InvalidDistance {
        /// Position of the offending entry.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// The center has a NaN or infinite coordinate.
    #[error("center must be finite, got {0:?}")]
    InvalidCenter([f64; 3]),

    /// Vertices and lattice directions do not pair up.
    #[error("{vertices} vertices do not match {directions} lattice directions")]
    LengthMismatch {
        /// Number of vertices.
        vertices: usize,
        /// Number of lattice directions.
        directions: usize,
    },

    /// Lattice generation failed.
    #[error(transparent)]
    Lattice(#[from] LatticeError),

    /// The direction index could not be built.
    #[error("failed to build direction index: {0}")]
    Index(#[from] IndexError),

    /// No usable facet exists for a query.
    #[error("degenerate geometry: {reason}")]
    DegenerateGeometry {
        /// What made the geometry unusable.
        reason: &'static str,
    },

    /// The linear part of a frame change is singular.
    #[error("transform is not invertible")]
    NonInvertibleTransform,
}
