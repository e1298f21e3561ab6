//! Inclusive integer regions of voxels.

use crate::voxel::VoxelCoord;

/// An axis-aligned box of voxels. Both corners are inclusive.
///
/// # Example
///
/// ```
/// use star_mask::{GridBounds, VoxelCoord};
///
/// let bounds = GridBounds::new(VoxelCoord::new(0, 0, 0), VoxelCoord::new(9, 19, 29));
/// assert_eq!(bounds.size(), (10, 20, 30));
/// assert_eq!(bounds.volume(), 6000);
/// assert!(bounds.contains(VoxelCoord::new(9, 19, 29)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridBounds {
    /// Minimum corner (inclusive).
    pub min: VoxelCoord,
    /// Maximum corner (inclusive).
    pub max: VoxelCoord,
}

impl GridBounds {
    /// Bounds spanning two corners, reordered per axis so that `min <= max`.
    #[must_use]
    pub fn new(a: VoxelCoord, b: VoxelCoord) -> Self {
        Self {
            min: a.per_axis(b, i32::min),
            max: a.per_axis(b, i32::max),
        }
    }

    /// Bounds holding a single voxel.
    #[must_use]
    pub const fn from_point(coord: VoxelCoord) -> Self {
        Self {
            min: coord,
            max: coord,
        }
    }

    /// Number of voxels along x, y and z; at least 1 each.
    #[must_use]
    pub const fn size(&self) -> (u32, u32, u32) {
        (
            self.max.x.abs_diff(self.min.x).saturating_add(1),
            self.max.y.abs_diff(self.min.y).saturating_add(1),
            self.max.z.abs_diff(self.min.z).saturating_add(1),
        )
    }

    /// Total number of voxels.
    #[must_use]
    pub fn volume(&self) -> u64 {
        let (w, h, d) = self.size();
        u64::from(w)
            .saturating_mul(u64::from(h))
            .saturating_mul(u64::from(d))
    }

    /// Whether `coord` lies inside the bounds.
    #[must_use]
    pub const fn contains(&self, coord: VoxelCoord) -> bool {
        self.min.all_le(coord) && coord.all_le(self.max)
    }

    /// The overlap of two bounds, or `None` if they are disjoint.
    ///
    /// # Example
    ///
    /// ```
    /// use star_mask::{GridBounds, VoxelCoord};
    ///
    /// let a = GridBounds::new(VoxelCoord::new(0, 0, 0), VoxelCoord::new(10, 10, 10));
    /// let b = GridBounds::new(VoxelCoord::new(5, -5, 5), VoxelCoord::new(15, 5, 15));
    ///
    /// let overlap = a.intersection(&b).unwrap();
    /// assert_eq!(overlap.min, VoxelCoord::new(5, 0, 5));
    /// assert_eq!(overlap.max, VoxelCoord::new(10, 5, 10));
    /// ```
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = self.min.per_axis(other.min, i32::max);
        let max = self.max.per_axis(other.max, i32::min);
        min.all_le(max).then_some(Self { min, max })
    }

    /// Linear position of `coord` in x-fastest order, or `None` outside the bounds.
    #[must_use]
    pub fn linear_index(&self, coord: VoxelCoord) -> Option<usize> {
        if !self.contains(coord) {
            return None;
        }
        let (w, h, _) = self.size();
        let dx = u64::from(coord.x.abs_diff(self.min.x));
        let dy = u64::from(coord.y.abs_diff(self.min.y));
        let dz = u64::from(coord.z.abs_diff(self.min.z));
        let index = dz
            .checked_mul(u64::from(h))?
            .checked_add(dy)?
            .checked_mul(u64::from(w))?
            .checked_add(dx)?;
        usize::try_from(index).ok()
    }

    /// Iterate every voxel, x varying fastest, then y, then z.
    ///
    /// # Example
    ///
    /// ```
    /// use star_mask::{GridBounds, VoxelCoord};
    ///
    /// let bounds = GridBounds::new(VoxelCoord::new(0, 0, 0), VoxelCoord::new(1, 1, 0));
    /// let coords: Vec<_> = bounds.iter().collect();
    /// assert_eq!(coords, vec![
    ///     VoxelCoord::new(0, 0, 0),
    ///     VoxelCoord::new(1, 0, 0),
    ///     VoxelCoord::new(0, 1, 0),
    ///     VoxelCoord::new(1, 1, 0),
    /// ]);
    /// ```
    #[must_use]
    pub const fn iter(&self) -> GridBoundsIter {
        GridBoundsIter {
            bounds: *self,
            current: Some(self.min),
        }
    }
}

impl IntoIterator for &GridBounds {
    type Item = VoxelCoord;
    type IntoIter = GridBoundsIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the voxels of a [`GridBounds`].
#[derive(Debug, Clone)]
pub struct GridBoundsIter {
    bounds: GridBounds,
    current: Option<VoxelCoord>,
}

impl Iterator for GridBoundsIter {
    type Item = VoxelCoord;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        let mut next = current;
        if next.x < self.bounds.max.x {
            next.x += 1;
        } else if next.y < self.bounds.max.y {
            next.x = self.bounds.min.x;
            next.y += 1;
        } else if next.z < self.bounds.max.z {
            next.x = self.bounds.min.x;
            next.y = self.bounds.min.y;
            next.z += 1;
        } else {
            self.current = None;
            return Some(current);
        }
        self.current = Some(next);

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.current.map_or(0, |current| {
            let done = self
                .bounds
                .linear_index(current)
                .and_then(|i| u64::try_from(i).ok())
                .unwrap_or(0);
            self.bounds.volume().saturating_sub(done)
        });
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridBoundsIter {}
