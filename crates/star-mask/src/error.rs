//! Error types for voxel mask construction.

use star_polyhedron::PolyhedronError;
use thiserror::Error;

/// Result type for mask operations.
pub type MaskResult<T> = Result<T, MaskError>;

/// Errors that can occur when building a voxel mask.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum MaskError {
    /// The region covered by the polyhedron holds more voxels than allowed.
    #[error("mask region of {voxels} voxels exceeds the limit of {limit}")]
    RegionTooLarge {
        /// Voxels in the region.
        voxels: u64,
        /// Configured limit.
        limit: u64,
    },

    /// The polyhedron's bounding box has a NaN or infinite corner.
    #[error("bounding box has non-finite corners")]
    NonFiniteBounds,

    /// Re-expressing the polyhedron in voxel coordinates failed.
    #[error("frame change failed: {0}")]
    Polyhedron(#[from] PolyhedronError),
}
