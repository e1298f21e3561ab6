//! Integer voxel coordinates.

use nalgebra::Point3;

/// A voxel position in image space.
///
/// Voxel `(x, y, z)` is sampled at the point `(x, y, z)`; there is no half-voxel
/// offset.
///
/// # Example
///
/// ```
/// use star_mask::VoxelCoord;
/// use nalgebra::Point3;
///
/// let coord = VoxelCoord::new(1, 2, 3);
/// assert_eq!(coord.to_point(), Point3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoxelCoord {
    /// X coordinate (image width axis).
    pub x: i32,
    /// Y coordinate (image height axis).
    pub y: i32,
    /// Z coordinate (slice axis).
    pub z: i32,
}

impl VoxelCoord {
    /// Creates a new voxel coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The voxel `(0, 0, 0)`.
    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0, 0)
    }

    /// The coordinate as `[x, y, z]`.
    #[must_use]
    pub const fn as_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    /// The sample point of this voxel.
    #[must_use]
    pub fn to_point(self) -> Point3<f64> {
        Point3::new(f64::from(self.x), f64::from(self.y), f64::from(self.z))
    }

    /// Largest voxel at or below `point` on every axis.
    ///
    /// Returns `None` for a non-finite point. Coordinates beyond the `i32` range
    /// saturate.
    ///
    /// # Example
    ///
    /// ```
    /// use star_mask::VoxelCoord;
    /// use nalgebra::Point3;
    ///
    /// let coord = VoxelCoord::floor(&Point3::new(1.7, -0.2, 3.0)).unwrap();
    /// assert_eq!(coord, VoxelCoord::new(1, -1, 3));
    /// ```
    #[must_use]
    pub fn floor(point: &Point3<f64>) -> Option<Self> {
        Self::snap(point, f64::floor)
    }

    /// Smallest voxel at or above `point` on every axis.
    ///
    /// Returns `None` for a non-finite point. Coordinates beyond the `i32` range
    /// saturate.
    #[must_use]
    pub fn ceil(point: &Point3<f64>) -> Option<Self> {
        Self::snap(point, f64::ceil)
    }

    /// Combines two coordinates axis by axis.
    #[must_use]
    pub(crate) fn per_axis(self, other: Self, combine: fn(i32, i32) -> i32) -> Self {
        Self::new(
            combine(self.x, other.x),
            combine(self.y, other.y),
            combine(self.z, other.z),
        )
    }

    /// Whether every coordinate is at most the matching one of `other`.
    #[must_use]
    pub(crate) const fn all_le(self, other: Self) -> bool {
        self.x <= other.x && self.y <= other.y && self.z <= other.z
    }

    fn snap(point: &Point3<f64>, round: fn(f64) -> f64) -> Option<Self> {
        if !point.coords.iter().all(|c| c.is_finite()) {
            return None;
        }
        Some(Self::new(
            saturate(round(point.x)),
            saturate(round(point.y)),
            saturate(round(point.z)),
        ))
    }
}

#[allow(clippy::cast_possible_truncation)]
// Truncation: the value is integral and clamped to the i32 range first
fn saturate(value: f64) -> i32 {
    value.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}
