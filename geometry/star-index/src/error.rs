//! Error types for index construction.

/// Result type for index construction.
pub type IndexResult<T> = Result<T, IndexError>;

/// Errors that can occur while building a spatial index.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum IndexError {
    /// No points were given.
    #[error("cannot build an index over an empty point set")]
    Empty,

    /// A point has a NaN or infinite coordinate.
    #[error("point {index} has a non-finite coordinate: {point:?}")]
    NonFinitePoint {
        /// Position of the point in the input.
        index: usize,
        /// The offending coordinates.
        point: [f64; 3],
    },

    /// Too many points share one coordinate value on an axis for the k-d tree
    /// to split them into buckets.
    #[error("{count} points share one coordinate on axis {axis}; the k-d tree allows at most {limit}")]
    SharedCoordinate {
        /// Axis (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// Number of points sharing the value.
        count: usize,
        /// Largest supported count.
        limit: usize,
    },
}
