//! Voxel masks of star-convex polyhedra.
//!
//! Segmentation pipelines detect objects as star-convex polyhedra and then need
//! the voxels each object covers in an image. This crate rasterizes a
//! [`Polyhedron`](star_polyhedron::Polyhedron) onto an integer grid:
//!
//! - [`VoxelCoord`] - integer voxel coordinates
//! - [`GridBounds`] - inclusive voxel regions
//! - [`VoxelMask`] - one containment flag per voxel of a region
//! - [`MaskParams`] - image extent, size limit, progress logging
//!
//! Only the voxels inside the polyhedron's bounding box (snapped outward to whole
//! voxels and clipped to the image) are tested, one
//! [`contains`](star_polyhedron::Polyhedron::contains) call each.
//!
//! # Example
//!
//! ```
//! use star_mask::{MaskParams, VoxelMask};
//! use star_polyhedron::{Point3, Polyhedron};
//!
//! let nucleus = Polyhedron::new(Point3::new(20.0, 20.0, 8.0), &[4.0; 96]).unwrap();
//! let params = MaskParams::new().with_image_size(64, 64, 16);
//!
//! let mask = VoxelMask::build(&nucleus, &params).unwrap();
//! assert!(mask.count() > 0);
//! assert!(mask.iter_inside().all(|v| v.z >= 0 && v.z < 16));
//! ```
//!
//! # Coordinate Frames
//!
//! [`VoxelMask::build`] expects the polyhedron in voxel coordinates already. When
//! it was detected in another frame (physical units, a different resolution
//! level), use [`VoxelMask::build_in_frame`] with the world-to-voxel transform.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod grid;
mod mask;
mod params;
mod voxel;

pub use error::{MaskError, MaskResult};
pub use grid::{GridBounds, GridBoundsIter};
pub use mask::{VoxelMask, mask_region};
pub use params::{DEFAULT_MAX_VOXELS, MaskParams};
pub use voxel::VoxelCoord;
