//! Axis-aligned bounding box of a polyhedron.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The axis-aligned bounding box of a polyhedron's vertices.
///
/// Besides its corners the box remembers the polyhedron center as an anchor:
/// the corners and the anchor are always contained, even when floating-point
/// round-off from a frame change would push them a hair outside the closed
/// interval test.
///
/// # Example
///
/// ```
/// use star_polyhedron::BoundingBox;
/// use nalgebra::Point3;
///
/// let bbox = BoundingBox::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 10.0, 10.0),
///     Point3::new(5.0, 5.0, 5.0),
/// );
///
/// assert!(bbox.contains(&Point3::new(2.0, 8.0, 5.0)));
/// assert!(bbox.contains(&bbox.min()));
/// assert!(!bbox.contains(&Point3::new(-1.0, 5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    min: Point3<f64>,
    max: Point3<f64>,
    anchor: Point3<f64>,
}

impl BoundingBox {
    /// Create a bounding box from two corners and an anchor point.
    ///
    /// The corners are reordered per axis so that `min <= max`.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>, anchor: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
            anchor,
        }
    }

    /// Create the bounding box of a point set.
    ///
    /// An empty point set yields the zero-volume box at `anchor`.
    ///
    /// # Example
    ///
    /// ```
    /// use star_polyhedron::BoundingBox;
    /// use nalgebra::Point3;
    ///
    /// let points = [
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(10.0, 5.0, 3.0),
    ///     Point3::new(-2.0, 8.0, 1.0),
    /// ];
    ///
    /// let bbox = BoundingBox::from_points(&points, Point3::origin());
    /// assert_eq!(bbox.min(), Point3::new(-2.0, 0.0, 0.0));
    /// assert_eq!(bbox.max(), Point3::new(10.0, 8.0, 3.0));
    /// ```
    #[must_use]
    pub fn from_points<'a>(
        points: impl IntoIterator<Item = &'a Point3<f64>>,
        anchor: Point3<f64>,
    ) -> Self {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::new(anchor, anchor, anchor);
        };

        let (min, max) = points.fold((*first, *first), |(mut min, mut max), p| {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
            (min, max)
        });

        Self { min, max, anchor }
    }

    /// Minimum corner (smallest x, y, z values).
    #[inline]
    #[must_use]
    pub const fn min(&self) -> Point3<f64> {
        self.min
    }

    /// Maximum corner (largest x, y, z values).
    #[inline]
    #[must_use]
    pub const fn max(&self) -> Point3<f64> {
        self.max
    }

    /// The polyhedron center this box was derived around.
    #[inline]
    #[must_use]
    pub const fn anchor(&self) -> Point3<f64> {
        self.anchor
    }

    /// Check if the box contains a point.
    ///
    /// The corners and the anchor match exactly; everything else uses a closed
    /// per-axis interval test, so points on the boundary are inside.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        if *point == self.min || *point == self.max || *point == self.anchor {
            return true;
        }
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Width, depth and height of the box.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Geometric center of the box (not the anchor).
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        Point3::new(
            f64::midpoint(self.min.x, self.max.x),
            f64::midpoint(self.min.y, self.max.y),
            f64::midpoint(self.min.z, self.max.z),
        )
    }

    /// Volume of the box.
    #[inline]
    #[must_use]
    pub fn volume(&self) -> f64 {
        let s = self.size();
        s.x * s.y * s.z
    }

    /// The eight corner points of the box.
    #[must_use]
    pub fn corners(&self) -> [Point3<f64>; 8] {
        [
            Point3::new(self.min.x, self.min.y, self.min.z),
            Point3::new(self.max.x, self.min.y, self.min.z),
            Point3::new(self.min.x, self.max.y, self.min.z),
            Point3::new(self.max.x, self.max.y, self.min.z),
            Point3::new(self.min.x, self.min.y, self.max.z),
            Point3::new(self.max.x, self.min.y, self.max.z),
            Point3::new(self.min.x, self.max.y, self.max.z),
            Point3::new(self.max.x, self.max.y, self.max.z),
        ]
    }
}
