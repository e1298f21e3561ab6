//! Containment query parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest candidate set a containment query can use: one triangle.
pub const MIN_CANDIDATE_NEIGHBORS: usize = 3;

/// Nearest directions searched for a replacement when the three nearest
/// vertices do not span a plane.
pub const DEFAULT_FALLBACK_NEIGHBORS: usize = 4;

/// Configuration for containment queries.
///
/// By default a query is decided by the facet through the vertices of the three
/// lattice directions nearest to the query direction. Only when those three
/// vertices are collinear does the query look further, taking the first usable
/// triangle among the `fallback_neighbors` nearest directions.
///
/// Thin, sliver-shaped triangles between neighboring Fibonacci directions can
/// miss the query ray. Raising `candidate_neighbors` above three opts in to a
/// search of that many nearest directions for a triangle the ray pierces.
///
/// # Examples
///
/// ```
/// use star_polyhedron::ContainmentParams;
///
/// let params = ContainmentParams::default();
/// assert_eq!(params.candidate_neighbors, 3);
/// assert_eq!(params.fallback_neighbors, 4);
/// assert_eq!(params, ContainmentParams::nearest_facet());
///
/// // Search the eight nearest directions for a pierced triangle.
/// let wide = ContainmentParams::new().with_candidate_neighbors(8);
/// assert_eq!(wide.candidate_neighbors, 8);
/// assert!(wide.searches_pierced_triangles());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContainmentParams {
    /// Number of nearest lattice directions searched for a pierced triangle.
    ///
    /// Never less than [`MIN_CANDIDATE_NEIGHBORS`]; at that value no search
    /// happens and the three nearest directions decide.
    pub candidate_neighbors: usize,

    /// Number of nearest lattice directions searched for a usable triangle when
    /// the chosen one is degenerate. Three or less disables the fallback.
    pub fallback_neighbors: usize,

    /// Slack on the barycentric weights of the piercing test.
    ///
    /// Rays that graze a shared edge count as piercing both triangles.
    pub pierce_tolerance: f64,
}

impl Default for ContainmentParams {
    fn default() -> Self {
        Self {
            candidate_neighbors: MIN_CANDIDATE_NEIGHBORS,
            fallback_neighbors: DEFAULT_FALLBACK_NEIGHBORS,
            pierce_tolerance: 1e-12,
        }
    }
}

impl ContainmentParams {
    /// Creates parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters that decide every query from the three nearest directions.
    ///
    /// Same as the default.
    #[must_use]
    pub fn nearest_facet() -> Self {
        Self {
            candidate_neighbors: MIN_CANDIDATE_NEIGHBORS,
            ..Self::default()
        }
    }

    /// Parameters that search the `candidate_neighbors` nearest directions for
    /// a triangle pierced by the query ray.
    #[must_use]
    pub fn pierced_facet(candidate_neighbors: usize) -> Self {
        Self::default().with_candidate_neighbors(candidate_neighbors)
    }

    /// Sets the number of candidate directions, clamped to at least three.
    #[must_use]
    pub fn with_candidate_neighbors(mut self, candidate_neighbors: usize) -> Self {
        self.candidate_neighbors = candidate_neighbors.max(MIN_CANDIDATE_NEIGHBORS);
        self
    }

    /// Sets the number of directions searched past a degenerate facet.
    #[must_use]
    pub fn with_fallback_neighbors(mut self, fallback_neighbors: usize) -> Self {
        self.fallback_neighbors = fallback_neighbors;
        self
    }

    /// Sets the piercing tolerance. Negative values are treated as zero.
    #[must_use]
    pub fn with_pierce_tolerance(mut self, tolerance: f64) -> Self {
        self.pierce_tolerance = tolerance.max(0.0);
        self
    }

    /// The candidate count actually used by queries.
    #[must_use]
    pub fn effective_candidates(&self) -> usize {
        self.candidate_neighbors.max(MIN_CANDIDATE_NEIGHBORS)
    }

    /// Whether queries look past the three nearest directions for a pierced
    /// triangle.
    #[must_use]
    pub fn searches_pierced_triangles(&self) -> bool {
        self.effective_candidates() > MIN_CANDIDATE_NEIGHBORS
    }
}
