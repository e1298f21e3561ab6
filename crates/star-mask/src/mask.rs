//! Dense per-voxel containment masks.

use star_polyhedron::{BoundingBox, Polyhedron, PolyhedronError, SpatialIndex, Transform3D};
use tracing::{debug, info};

use crate::error::{MaskError, MaskResult};
use crate::grid::GridBounds;
use crate::params::MaskParams;
use crate::voxel::VoxelCoord;

/// The voxel region a mask covers for a bounding box.
///
/// The box is snapped outward to whole voxels (`floor` of the minimum corner,
/// `ceil` of the maximum corner) and, with an extent, clipped to `[0, extent]`.
/// A box that misses the image entirely yields the single voxel `(0, 0, 0)`.
///
/// # Errors
///
/// Returns [`MaskError::NonFiniteBounds`] if a corner is NaN or infinite.
///
/// # Example
///
/// ```
/// use star_mask::{mask_region, VoxelCoord};
/// use star_polyhedron::{BoundingBox, Point3};
///
/// let bbox = BoundingBox::new(
///     Point3::new(-1.5, 2.2, 3.0),
///     Point3::new(4.1, 6.0, 7.9),
///     Point3::new(1.0, 4.0, 5.0),
/// );
///
/// let region = mask_region(&bbox, Some(VoxelCoord::new(3, 99, 99))).unwrap();
/// assert_eq!(region.min, VoxelCoord::new(0, 2, 3));
/// assert_eq!(region.max, VoxelCoord::new(3, 6, 8));
/// ```
pub fn mask_region(bbox: &BoundingBox, extent: Option<VoxelCoord>) -> MaskResult<GridBounds> {
    let (Some(min), Some(max)) = (
        VoxelCoord::floor(&bbox.min()),
        VoxelCoord::ceil(&bbox.max()),
    ) else {
        return Err(MaskError::NonFiniteBounds);
    };
    let region = GridBounds::new(min, max);

    let Some(extent) = extent else {
        return Ok(region);
    };
    let image = GridBounds {
        min: VoxelCoord::origin(),
        max: extent,
    };
    Ok(region
        .intersection(&image)
        .unwrap_or_else(|| GridBounds::from_point(VoxelCoord::origin())))
}

/// Which voxels of a region lie inside a polyhedron.
///
/// # Example
///
/// ```
/// use star_mask::{MaskParams, VoxelCoord, VoxelMask};
/// use star_polyhedron::{Point3, Polyhedron};
///
/// let cell = Polyhedron::new(Point3::new(10.0, 10.0, 10.0), &[5.0; 96]).unwrap();
/// let mask = VoxelMask::build(&cell, &MaskParams::default()).unwrap();
///
/// assert_eq!(mask.get(VoxelCoord::new(10, 10, 10)), Some(true));
/// assert_eq!(mask.get(VoxelCoord::new(5, 5, 5)), Some(false));
/// assert_eq!(mask.get(VoxelCoord::new(40, 0, 0)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelMask {
    bounds: GridBounds,
    inside: Vec<bool>,
    count: usize,
}

impl VoxelMask {
    /// Test every voxel of the polyhedron's region with
    /// [`Polyhedron::contains`].
    ///
    /// The polyhedron must already be expressed in voxel coordinates; see
    /// [`VoxelMask::build_in_frame`] otherwise.
    ///
    /// # Errors
    ///
    /// - [`MaskError::NonFiniteBounds`] if the bounding box is not finite
    /// - [`MaskError::RegionTooLarge`] if the region exceeds
    ///   [`MaskParams::max_voxels`]
    pub fn build<I: SpatialIndex>(
        polyhedron: &Polyhedron<I>,
        params: &MaskParams,
    ) -> MaskResult<Self> {
        let bounds = mask_region(polyhedron.bounding_box(), params.extent)?;
        let total = bounds.volume();
        let capacity = usize::try_from(total)
            .ok()
            .filter(|_| total <= params.max_voxels)
            .ok_or(MaskError::RegionTooLarge {
                voxels: total,
                limit: params.max_voxels,
            })?;

        debug!(
            min = ?bounds.min.as_array(),
            max = ?bounds.max.as_array(),
            voxels = total,
            "building voxel mask"
        );

        let mut inside = Vec::with_capacity(capacity);
        let mut count = 0;
        let mut tested: u64 = 0;
        for coord in &bounds {
            let hit = polyhedron.contains(&coord.to_point());
            count += usize::from(hit);
            inside.push(hit);

            tested += 1;
            if params.log_every > 0 && tested % params.log_every == 0 {
                debug!(tested, total, inside = count, "voxel mask progress");
            }
        }

        info!(voxels = total, inside = count, "built voxel mask");

        Ok(Self {
            bounds,
            inside,
            count,
        })
    }

    /// Re-express the polyhedron with `world_to_voxel`, then build its mask.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::Polyhedron`] if the frame change fails (for example a
    /// singular transform), plus every error of [`VoxelMask::build`].
    ///
    /// # Example
    ///
    /// ```
    /// use star_mask::{MaskParams, VoxelCoord, VoxelMask};
    /// use star_polyhedron::{Point3, Polyhedron, Transform3D};
    ///
    /// // Detected in micrometers; voxels are 0.5 um wide.
    /// let cell = Polyhedron::new(Point3::new(5.0, 5.0, 5.0), &[2.0; 96]).unwrap();
    /// let to_voxels = Transform3D::uniform_scale(2.0);
    ///
    /// let mask = VoxelMask::build_in_frame(&cell, &to_voxels, &MaskParams::default()).unwrap();
    /// assert_eq!(mask.get(VoxelCoord::new(10, 10, 10)), Some(true));
    /// ```
    pub fn build_in_frame<I: SpatialIndex>(
        polyhedron: &Polyhedron<I>,
        world_to_voxel: &Transform3D,
        params: &MaskParams,
    ) -> MaskResult<Self> {
        let local = polyhedron.transformed(world_to_voxel)?;
        Self::build(&local, params)
    }

    /// Like [`VoxelMask::build_in_frame`], given the image's voxel-to-world
    /// transform (as image sources usually report it) instead of its inverse.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::Polyhedron`] with
    /// [`PolyhedronError::NonInvertibleTransform`] if `voxel_to_world` cannot be
    /// inverted, plus every error of [`VoxelMask::build_in_frame`].
    pub fn build_in_source_frame<I: SpatialIndex>(
        polyhedron: &Polyhedron<I>,
        voxel_to_world: &Transform3D,
        params: &MaskParams,
    ) -> MaskResult<Self> {
        let world_to_voxel = voxel_to_world
            .inverse()
            .ok_or(PolyhedronError::NonInvertibleTransform)?;
        Self::build_in_frame(polyhedron, &world_to_voxel, params)
    }

    /// The voxel region the mask covers.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Whether `coord` is inside, or `None` outside the mask region.
    #[must_use]
    pub fn get(&self, coord: VoxelCoord) -> Option<bool> {
        self.bounds
            .linear_index(coord)
            .and_then(|i| self.inside.get(i).copied())
    }

    /// Number of inside voxels.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Number of voxels tested.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inside.len()
    }

    /// Always false: a mask covers at least one voxel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inside.is_empty()
    }

    /// Per-voxel flags in x-fastest order over [`bounds`](Self::bounds).
    #[must_use]
    pub fn as_slice(&self) -> &[bool] {
        &self.inside
    }

    /// Coordinates of the inside voxels, x varying fastest.
    pub fn iter_inside(&self) -> impl Iterator<Item = VoxelCoord> + '_ {
        self.bounds
            .iter()
            .zip(&self.inside)
            .filter_map(|(coord, &hit)| hit.then_some(coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use star_polyhedron::Point3;

    fn sphere(center: Point3<f64>, radius: f64) -> Polyhedron {
        Polyhedron::new(center, &[radius; 96]).unwrap()
    }

    #[test]
    fn region_snaps_outward() {
        let bbox = BoundingBox::new(
            Point3::new(0.5, 1.0, -2.5),
            Point3::new(3.5, 1.0, 0.2),
            Point3::origin(),
        );
        let region = mask_region(&bbox, None).unwrap();
        assert_eq!(region.min, VoxelCoord::new(0, 1, -3));
        assert_eq!(region.max, VoxelCoord::new(4, 1, 1));
    }

    #[test]
    fn region_outside_image_collapses_to_origin() {
        let bbox = BoundingBox::new(
            Point3::new(-20.0, -20.0, -20.0),
            Point3::new(-10.0, -10.0, -10.0),
            Point3::new(-15.0, -15.0, -15.0),
        );
        let region = mask_region(&bbox, Some(VoxelCoord::new(99, 99, 99))).unwrap();
        assert_eq!(region, GridBounds::from_point(VoxelCoord::origin()));
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        let bbox = BoundingBox::new(
            Point3::new(f64::NAN, 0.0, 0.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::origin(),
        );
        // NaN is dropped by min/max; only a NaN surviving in both corners is seen.
        let both = BoundingBox::new(
            Point3::new(f64::NAN, 0.0, 0.0),
            Point3::new(f64::NAN, 1.0, 1.0),
            Point3::origin(),
        );
        assert!(mask_region(&bbox, None).is_ok());
        assert_eq!(mask_region(&both, None), Err(MaskError::NonFiniteBounds));
    }

    #[test]
    fn region_limit_is_enforced() {
        let poly = sphere(Point3::new(10.0, 10.0, 10.0), 5.0);
        let params = MaskParams::new().with_max_voxels(100);
        assert_eq!(
            VoxelMask::build(&poly, &params),
            Err(MaskError::RegionTooLarge {
                voxels: 1331,
                limit: 100
            })
        );
    }

    #[test]
    fn get_and_iter_inside_agree() {
        let poly = sphere(Point3::new(3.0, 3.0, 3.0), 2.0);
        let mask = VoxelMask::build(&poly, &MaskParams::default()).unwrap();

        let inside: Vec<_> = mask.iter_inside().collect();
        assert_eq!(inside.len(), mask.count());
        assert!(inside.iter().all(|c| mask.get(*c) == Some(true)));
        assert_eq!(mask.len() as u64, mask.bounds().volume());
        assert!(!mask.is_empty());
        assert_eq!(mask.as_slice().iter().filter(|b| **b).count(), mask.count());
    }

    #[test]
    fn progress_logging_does_not_change_the_result() {
        let poly = sphere(Point3::new(3.0, 3.0, 3.0), 2.0);
        let quiet = VoxelMask::build(&poly, &MaskParams::new().with_log_every(0)).unwrap();
        let chatty = VoxelMask::build(&poly, &MaskParams::new().with_log_every(7)).unwrap();
        assert_eq!(quiet, chatty);
    }
}
