//! Exact nearest-neighbor indices over fixed 3D point sets.
//!
//! A star-convex polyhedron looks up the lattice directions closest to a query
//! direction on every containment test. This crate provides that lookup behind the
//! [`SpatialIndex`] trait so the structure can be swapped without touching the
//! polyhedron:
//!
//! - [`KdTreeIndex`] - k-d tree backed by `kiddo`, `O(log n)` queries
//! - [`LinearIndex`] - brute-force scan, the exactness reference
//!
//! Both are build-once and read-only afterwards.
//!
//! # Ordering Contract
//!
//! Results are ordered by ascending Euclidean distance to the query; equal
//! distances are ordered by the position of the point in the input. Results are
//! exact: approximate neighbors would change containment outcomes.
//!
//! # Example
//!
//! ```
//! use star_index::{KdTreeIndex, SpatialIndex};
//! use nalgebra::Vector3;
//!
//! let points = [
//!     Vector3::new(1.0, 0.0, 0.0),
//!     Vector3::new(0.0, 1.0, 0.0),
//!     Vector3::new(0.0, 0.0, 1.0),
//!     Vector3::new(-1.0, 0.0, 0.0),
//! ];
//! let index = KdTreeIndex::build(&points).unwrap();
//!
//! let nearest = index.k_nearest(2, &Vector3::new(0.9, 0.1, 0.0));
//! assert_eq!(nearest, vec![0, 1]);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::cmp::Ordering;

mod error;
mod kdtree;
mod linear;

pub use error::{IndexError, IndexResult};
pub use kdtree::{KdTreeIndex, MAX_SHARED_COORDINATE};
pub use linear::LinearIndex;

/// A point returned by a nearest-neighbor query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Position of the point in the input the index was built from.
    pub index: usize,
    /// Squared Euclidean distance from the query.
    pub distance_squared: f64,
}

impl Neighbor {
    /// Euclidean distance from the query.
    #[inline]
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance_squared.sqrt()
    }
}

/// A static nearest-neighbor index over a fixed set of 3D points.
pub trait SpatialIndex: Sized {
    /// Build an index over `points`.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Empty`] for an empty slice and
    /// [`IndexError::NonFinitePoint`] if any coordinate is NaN or infinite.
    /// Implementations may reject point sets they cannot hold, as
    /// [`KdTreeIndex`] does with [`IndexError::SharedCoordinate`].
    fn build(points: &[Vector3<f64>]) -> IndexResult<Self>;

    /// The `k` points nearest to `query`, closest first, ties by input order.
    ///
    /// Returns every point when `k` exceeds [`len`](Self::len), and nothing when
    /// `query` has a non-finite coordinate.
    fn nearest(&self, k: usize, query: &Vector3<f64>) -> Vec<Neighbor>;

    /// Number of indexed points.
    fn len(&self) -> usize;

    /// Indices of the `k` points nearest to `query`.
    fn k_nearest(&self, k: usize, query: &Vector3<f64>) -> Vec<usize> {
        self.nearest(k, query).into_iter().map(|n| n.index).collect()
    }

    /// Whether the index holds no points.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub(crate) fn validate(points: &[Vector3<f64>]) -> IndexResult<()> {
    if points.is_empty() {
        return Err(IndexError::Empty);
    }
    if let Some((index, p)) = points
        .iter()
        .enumerate()
        .find(|(_, p)| !p.iter().all(|c| c.is_finite()))
    {
        return Err(IndexError::NonFinitePoint {
            index,
            point: [p.x, p.y, p.z],
        });
    }
    Ok(())
}

pub(crate) fn is_finite(query: &Vector3<f64>) -> bool {
    query.iter().all(|c| c.is_finite())
}

pub(crate) fn by_distance_then_index(a: &Neighbor, b: &Neighbor) -> Ordering {
    a.distance_squared
        .total_cmp(&b.distance_squared)
        .then(a.index.cmp(&b.index))
}

// Re-export nalgebra types for convenience
pub use nalgebra::Vector3;
