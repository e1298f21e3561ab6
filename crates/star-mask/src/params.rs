//! Mask construction parameters.

use crate::voxel::VoxelCoord;

/// Default cap on the number of voxels a single mask may test (256³).
pub const DEFAULT_MAX_VOXELS: u64 = 16_777_216;

/// Configuration for building a [`VoxelMask`](crate::VoxelMask).
///
/// # Examples
///
/// ```
/// use star_mask::{MaskParams, VoxelCoord};
///
/// // A 512 x 512 x 64 image.
/// let params = MaskParams::new().with_image_size(512, 512, 64);
/// assert_eq!(params.extent, Some(VoxelCoord::new(511, 511, 63)));
///
/// let unbounded = MaskParams::default();
/// assert_eq!(unbounded.extent, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MaskParams {
    /// Largest valid voxel coordinate of the image, if the mask should be clipped
    /// to `[0, extent]` on every axis.
    pub extent: Option<VoxelCoord>,

    /// Refuse regions with more voxels than this.
    pub max_voxels: u64,

    /// Emit a progress event after this many voxel tests. Zero disables progress
    /// events.
    pub log_every: u64,
}

impl Default for MaskParams {
    fn default() -> Self {
        Self {
            extent: None,
            max_voxels: DEFAULT_MAX_VOXELS,
            log_every: 100_000,
        }
    }
}

impl MaskParams {
    /// Creates parameters with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clip to `[0, extent]` on every axis.
    #[must_use]
    pub const fn with_extent(mut self, extent: VoxelCoord) -> Self {
        self.extent = Some(extent);
        self
    }

    /// Clip to an image of `width x height x depth` voxels.
    ///
    /// An axis of size zero leaves no valid voxels, so every mask collapses to the
    /// single fallback voxel.
    #[must_use]
    pub fn with_image_size(self, width: u32, height: u32, depth: u32) -> Self {
        let last = |n: u32| i32::try_from(n).unwrap_or(i32::MAX).saturating_sub(1);
        self.with_extent(VoxelCoord::new(last(width), last(height), last(depth)))
    }

    /// Sets the voxel limit.
    #[must_use]
    pub const fn with_max_voxels(mut self, max_voxels: u64) -> Self {
        self.max_voxels = max_voxels;
        self
    }

    /// Sets the progress interval.
    #[must_use]
    pub const fn with_log_every(mut self, log_every: u64) -> Self {
        self.log_every = log_every;
        self
    }
}
