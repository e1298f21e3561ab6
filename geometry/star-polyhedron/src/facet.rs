//! Local facets and the sidedness test.

use std::cmp::Ordering;

use nalgebra::{Point3, Vector3};

use crate::error::{PolyhedronError, PolyhedronResult};

/// Which half-space of a facet plane a point lies in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Opposite to the facet normal.
    Below,
    /// Exactly on the plane.
    On,
    /// Along the facet normal.
    Above,
}

impl Side {
    /// Side for a signed plane distance. NaN counts as [`Side::On`].
    #[must_use]
    pub fn of(signed_distance: f64) -> Self {
        match signed_distance.partial_cmp(&0.0) {
            Some(Ordering::Less) => Self::Below,
            Some(Ordering::Greater) => Self::Above,
            Some(Ordering::Equal) | None => Self::On,
        }
    }
}

/// Outcome of a containment query.
///
/// Only [`Containment::Center`] and [`Containment::Inside`] count as contained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Containment {
    /// The query point is the polyhedron center.
    Center,
    /// Same side of the local facet as the center.
    Inside,
    /// Opposite side of the local facet from the center.
    Outside,
    /// Exactly on the local facet plane.
    OnFacet,
    /// No usable direction or facet for this query.
    Degenerate,
}

impl Containment {
    /// Whether the classification means the point is contained.
    #[inline]
    #[must_use]
    pub const fn is_inside(self) -> bool {
        matches!(self, Self::Center | Self::Inside)
    }
}

/// A triangle of three vertices, used as the local surface patch for a query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    indices: [usize; 3],
    origin: Point3<f64>,
    normal: Vector3<f64>,
}

impl Facet {
    /// Build the facet through `vertices[indices[0..3]]`.
    ///
    /// The normal is `normalize((v2 - v1) × (v3 - v1))`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyhedronError::DegenerateGeometry`] if an index is out of range
    /// or the three vertices are collinear (zero or non-finite normal).
    pub fn from_vertices(indices: [usize; 3], vertices: &[Point3<f64>]) -> PolyhedronResult<Self> {
        let [Some(v1), Some(v2), Some(v3)] = indices.map(|i| vertices.get(i)) else {
            return Err(PolyhedronError::DegenerateGeometry {
                reason: "facet vertex index out of range",
            });
        };

        let cross = (v2 - v1).cross(&(v3 - v1));
        let length = cross.norm();
        if !length.is_finite() || length <= 0.0 {
            return Err(PolyhedronError::DegenerateGeometry {
                reason: "facet vertices are collinear",
            });
        }

        Ok(Self {
            indices,
            origin: *v1,
            normal: cross / length,
        })
    }

    /// Vertex indices in the order used for the normal.
    #[must_use]
    pub const fn indices(&self) -> [usize; 3] {
        self.indices
    }

    /// The first vertex, a point on the plane.
    #[must_use]
    pub const fn origin(&self) -> Point3<f64> {
        self.origin
    }

    /// Unit normal.
    #[must_use]
    pub const fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Signed distance from the plane, positive along the normal.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&(point - self.origin))
    }

    /// Which side of the plane `point` lies on.
    #[must_use]
    pub fn side(&self, point: &Point3<f64>) -> Side {
        Side::of(self.signed_distance(point))
    }
}

/// Triples of positions `0..k` in lexicographic order: `[0,1,2], [0,1,3], ...`.
pub(crate) fn triangles(k: usize) -> impl Iterator<Item = [usize; 3]> {
    (0..k).flat_map(move |a| (a + 1..k).flat_map(move |b| (b + 1..k).map(move |c| [a, b, c])))
}

/// Whether the ray from `center` along `direction` passes through the cone spanned
/// by the three vertices, i.e. the ray hits their triangle.
///
/// The direction is written in the basis of the three spokes `v - center`; the
/// ray pierces when every weight is at least `-tolerance`. Spokes that do not
/// span space never pierce.
pub(crate) fn is_pierced(
    center: &Point3<f64>,
    vertices: [&Point3<f64>; 3],
    direction: &Vector3<f64>,
    tolerance: f64,
) -> bool {
    let [a, b, c] = vertices.map(|v| v - center);
    let volume = triple(&a, &b, &c);
    if !volume.is_finite() || volume == 0.0 {
        return false;
    }

    let weights = [
        triple(&a, &b, direction) / volume,
        triple(&b, &c, direction) / volume,
        triple(&c, &a, direction) / volume,
    ];
    weights.iter().all(|w| *w >= -tolerance)
}

fn triple(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> f64 {
    a.dot(&b.cross(c))
}
