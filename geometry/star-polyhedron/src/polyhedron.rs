//! The star-convex polyhedron and its containment query.

use std::borrow::Cow;
use std::fmt;

use nalgebra::{Point3, Vector3};
use star_index::{KdTreeIndex, SpatialIndex};
use tracing::{debug, trace, warn};

use crate::bounds::BoundingBox;
use crate::error::{PolyhedronError, PolyhedronResult};
use crate::facet::{Containment, Facet, Side, is_pierced, triangles};
use crate::params::ContainmentParams;
use crate::transform::Transform3D;

/// Fewest vertices that can enclose a volume.
pub const MIN_DISTANCES: usize = 4;

/// A star-convex polyhedron: one vertex per lattice direction, at the measured
/// distance from a shared center.
///
/// Containment is decided locally. A query looks up the lattice directions
/// nearest to the direction from the center to the point, picks the triangle of
/// vertices the ray passes through, and compares the side of that triangle's
/// plane the point is on with the side the center is on.
///
/// The direction index is pluggable through [`SpatialIndex`]; the default is a
/// k-d tree.
///
/// # Example
///
/// ```
/// use star_polyhedron::{Polyhedron, Point3};
///
/// let sphere = Polyhedron::new(Point3::origin(), &[1.0; 96]).unwrap();
///
/// assert!(sphere.contains(&Point3::origin()));
/// assert!(sphere.contains(&Point3::new(0.5, 0.0, 0.0)));
/// assert!(!sphere.contains(&Point3::new(10.0, 20.0, 15.0)));
/// ```
#[derive(Clone)]
pub struct Polyhedron<I: SpatialIndex = KdTreeIndex> {
    center: Point3<f64>,
    lattice: Cow<'static, [Vector3<f64>]>,
    vertices: Vec<Point3<f64>>,
    index: I,
    bounds: BoundingBox,
    params: ContainmentParams,
}

impl Polyhedron {
    /// Build a polyhedron from a center and one distance per lattice direction.
    ///
    /// The lattice has `distances.len()` directions; 96 distances share the cached
    /// default lattice. Vertex `i` is `center + distances[i] * lattice[i]`.
    ///
    /// # Errors
    ///
    /// - [`PolyhedronError::InvalidCenter`] if the center is not finite
    /// - [`PolyhedronError::TooFewDistances`] for fewer than [`MIN_DISTANCES`] entries
    /// - [`PolyhedronError::InvalidDistance`] for a negative or non-finite entry
    pub fn new(center: Point3<f64>, distances: &[f64]) -> PolyhedronResult<Self> {
        Self::build(center, distances)
    }

    /// Like [`Polyhedron::new`], for distance sources with gaps.
    ///
    /// # Errors
    ///
    /// Returns [`PolyhedronError::MissingDistance`] with the position of the first
    /// `None`, plus every error of [`Polyhedron::new`].
    ///
    /// # Example
    ///
    /// ```
    /// use star_polyhedron::{Polyhedron, PolyhedronError, Point3};
    ///
    /// let mut distances = vec![Some(2.0); 32];
    /// distances[7] = None;
    ///
    /// let err = Polyhedron::from_optional_distances(Point3::origin(), &distances).unwrap_err();
    /// assert_eq!(err, PolyhedronError::MissingDistance { index: 7 });
    /// ```
    pub fn from_optional_distances(
        center: Point3<f64>,
        distances: &[Option<f64>],
    ) -> PolyhedronResult<Self> {
        if distances.len() < MIN_DISTANCES {
            return Err(PolyhedronError::TooFewDistances {
                required: MIN_DISTANCES,
                actual: distances.len(),
            });
        }
        let distances = distances
            .iter()
            .enumerate()
            .map(|(index, d)| d.ok_or(PolyhedronError::MissingDistance { index }))
            .collect::<PolyhedronResult<Vec<f64>>>()?;
        Self::build(center, &distances)
    }

    /// Reassemble a polyhedron from parts already expressed in another frame.
    ///
    /// Nothing is recomputed from distances: the vertices, bounding box corners and
    /// lattice are taken as given. Only the direction index is rebuilt.
    ///
    /// # Errors
    ///
    /// - [`PolyhedronError::InvalidCenter`] if the center is not finite
    /// - [`PolyhedronError::LengthMismatch`] if vertices and lattice differ in length
    /// - [`PolyhedronError::TooFewDistances`] for fewer than [`MIN_DISTANCES`] vertices
    /// - [`PolyhedronError::Index`] if the lattice cannot be indexed
    pub fn from_transformed_parts(
        center: Point3<f64>,
        vertices: Vec<Point3<f64>>,
        bbox_min: Point3<f64>,
        bbox_max: Point3<f64>,
        lattice: Vec<Vector3<f64>>,
    ) -> PolyhedronResult<Self> {
        Self::build_from_transformed_parts(center, vertices, bbox_min, bbox_max, lattice)
    }
}

impl<I: SpatialIndex> Polyhedron<I> {
    /// [`Polyhedron::new`] with an explicit direction index type.
    ///
    /// # Errors
    ///
    /// Same as [`Polyhedron::new`].
    ///
    /// # Example
    ///
    /// ```
    /// use star_polyhedron::{LinearIndex, Polyhedron, Point3};
    ///
    /// let brute: Polyhedron<LinearIndex> = Polyhedron::build(Point3::origin(), &[1.0; 64]).unwrap();
    /// assert!(brute.contains(&Point3::new(0.0, 0.0, 0.5)));
    /// ```
    pub fn build(center: Point3<f64>, distances: &[f64]) -> PolyhedronResult<Self> {
        validate_center(&center)?;
        if distances.len() < MIN_DISTANCES {
            return Err(PolyhedronError::TooFewDistances {
                required: MIN_DISTANCES,
                actual: distances.len(),
            });
        }
        if let Some((index, &value)) = distances
            .iter()
            .enumerate()
            .find(|(_, d)| !d.is_finite() || **d < 0.0)
        {
            return Err(PolyhedronError::InvalidDistance { index, value });
        }

        let lattice = star_lattice::lattice_for(distances.len())?;
        let vertices: Vec<Point3<f64>> = lattice
            .iter()
            .zip(distances)
            .map(|(direction, distance)| center + direction * *distance)
            .collect();
        let index = I::build(&lattice)?;
        let bounds = BoundingBox::from_points(&vertices, center);

        debug!(
            directions = vertices.len(),
            center = ?[center.x, center.y, center.z],
            "built star-convex polyhedron"
        );

        Ok(Self {
            center,
            lattice,
            vertices,
            index,
            bounds,
            params: ContainmentParams::default(),
        })
    }

    /// [`Polyhedron::from_transformed_parts`] with an explicit direction index type.
    ///
    /// # Errors
    ///
    /// Same as [`Polyhedron::from_transformed_parts`].
    pub fn build_from_transformed_parts(
        center: Point3<f64>,
        vertices: Vec<Point3<f64>>,
        bbox_min: Point3<f64>,
        bbox_max: Point3<f64>,
        lattice: Vec<Vector3<f64>>,
    ) -> PolyhedronResult<Self> {
        validate_center(&center)?;
        if vertices.len() != lattice.len() {
            return Err(PolyhedronError::LengthMismatch {
                vertices: vertices.len(),
                directions: lattice.len(),
            });
        }
        if vertices.len() < MIN_DISTANCES {
            return Err(PolyhedronError::TooFewDistances {
                required: MIN_DISTANCES,
                actual: vertices.len(),
            });
        }

        let index = I::build(&lattice)?;
        let bounds = BoundingBox::new(bbox_min, bbox_max, center);

        debug!(
            directions = vertices.len(),
            center = ?[center.x, center.y, center.z],
            "reassembled star-convex polyhedron from transformed parts"
        );

        Ok(Self {
            center,
            lattice: Cow::Owned(lattice),
            vertices,
            index,
            bounds,
            params: ContainmentParams::default(),
        })
    }

    /// Re-express this polyhedron in another frame.
    ///
    /// Center, vertices and bounding box corners are mapped as points. Lattice
    /// directions are mapped by the linear part only and renormalized. The new
    /// bounding box spans all eight mapped corners, so it stays a superset of the
    /// mapped vertices under rotation. Containment parameters carry over.
    ///
    /// # Errors
    ///
    /// Returns [`PolyhedronError::NonInvertibleTransform`] if the linear part is
    /// singular, and any error of
    /// [`from_transformed_parts`](Polyhedron::from_transformed_parts).
    ///
    /// # Example
    ///
    /// ```
    /// use star_polyhedron::{Polyhedron, Point3, Transform3D};
    ///
    /// let sphere = Polyhedron::new(Point3::origin(), &[1.0; 96]).unwrap();
    /// let moved = sphere.transformed(&Transform3D::translation(5.0, 0.0, 0.0)).unwrap();
    ///
    /// assert!(moved.contains(&Point3::new(5.5, 0.0, 0.0)));
    /// assert!(!moved.contains(&Point3::new(0.5, 0.0, 0.0)));
    /// ```
    pub fn transformed(&self, transform: &Transform3D) -> PolyhedronResult<Self> {
        if !transform.is_invertible() {
            return Err(PolyhedronError::NonInvertibleTransform);
        }

        let center = transform.transform_point(&self.center);
        let vertices = self
            .vertices
            .iter()
            .map(|v| transform.transform_point(v))
            .collect();
        let corners = self.bounds.corners().map(|c| transform.transform_point(&c));
        let bounds = BoundingBox::from_points(&corners, center);
        let lattice = self
            .lattice
            .iter()
            .map(|d| {
                transform
                    .transform_vector(d)
                    .try_normalize(0.0)
                    .ok_or(PolyhedronError::DegenerateGeometry {
                        reason: "lattice direction vanished under transform",
                    })
            })
            .collect::<PolyhedronResult<Vec<_>>>()?;

        Self::build_from_transformed_parts(center, vertices, bounds.min(), bounds.max(), lattice)
            .map(|p| p.with_params(self.params))
    }

    /// Replace the containment parameters.
    #[must_use]
    pub fn with_params(mut self, params: ContainmentParams) -> Self {
        self.params = params;
        self
    }

    /// Whether `point` lies inside the polyhedron.
    ///
    /// The center is always inside. Points exactly on the deciding facet plane and
    /// queries without a usable facet are outside.
    #[must_use]
    pub fn contains(&self, point: &Point3<f64>) -> bool {
        self.classify(point).is_inside()
    }

    /// Classify `point` against the polyhedron.
    #[must_use]
    pub fn classify(&self, point: &Point3<f64>) -> Containment {
        if *point == self.center {
            return Containment::Center;
        }
        let Some(direction) = self.direction_to(point) else {
            trace!(point = ?[point.x, point.y, point.z], "query direction cannot be normalized");
            return Containment::Degenerate;
        };

        let facet = match self.select_facet(&direction) {
            Ok(facet) => facet,
            Err(err) => {
                warn!(point = ?[point.x, point.y, point.z], %err, "no usable facet for query");
                return Containment::Degenerate;
            }
        };

        match (facet.side(point), facet.side(&self.center)) {
            (Side::On, _) => Containment::OnFacet,
            (_, Side::On) => {
                trace!(facet = ?facet.indices(), "center lies on the deciding facet plane");
                Containment::Degenerate
            }
            (point_side, center_side) if point_side == center_side => Containment::Inside,
            _ => Containment::Outside,
        }
    }

    /// The facet that decides the query for `point`.
    ///
    /// # Errors
    ///
    /// Returns [`PolyhedronError::DegenerateGeometry`] when `point` is the center,
    /// the direction to it cannot be normalized, or no triangle of candidate
    /// vertices has a usable plane.
    pub fn facet(&self, point: &Point3<f64>) -> PolyhedronResult<Facet> {
        if *point == self.center {
            return Err(PolyhedronError::DegenerateGeometry {
                reason: "query point is the center",
            });
        }
        let direction = self
            .direction_to(point)
            .ok_or(PolyhedronError::DegenerateGeometry {
                reason: "query direction cannot be normalized",
            })?;
        self.select_facet(&direction)
    }

    /// The center every vertex is measured from.
    #[must_use]
    pub const fn center(&self) -> Point3<f64> {
        self.center
    }

    /// Vertices, one per lattice direction, in lattice order.
    #[must_use]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Unit lattice directions, in vertex order.
    #[must_use]
    pub fn lattice(&self) -> &[Vector3<f64>] {
        &self.lattice
    }

    /// Axis-aligned bounding box of the vertices.
    #[must_use]
    pub const fn bounding_box(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false: a polyhedron has at least [`MIN_DISTANCES`] vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Containment parameters in use.
    #[must_use]
    pub const fn params(&self) -> &ContainmentParams {
        &self.params
    }

    fn direction_to(&self, point: &Point3<f64>) -> Option<Vector3<f64>> {
        let offset = point - self.center;
        let length = offset.norm();
        if !length.is_finite() || length <= 0.0 {
            return None;
        }
        Some(offset / length)
    }

    /// The facet of the three nearest directions, or with pierced-triangle search
    /// enabled the first pierced candidate triangle. A degenerate choice is
    /// replaced by the first usable triangle among the fallback neighbors.
    fn select_facet(&self, direction: &Vector3<f64>) -> PolyhedronResult<Facet> {
        let candidates = self.params.effective_candidates();
        let nearest = self
            .index
            .k_nearest(candidates.max(self.params.fallback_neighbors), direction);
        if nearest.len() < 3 {
            return Err(PolyhedronError::DegenerateGeometry {
                reason: "fewer than three lattice directions near the query",
            });
        }
        let facet_of = |[a, b, c]: [usize; 3]| {
            Facet::from_vertices([nearest[a], nearest[b], nearest[c]], &self.vertices)
        };

        if self.params.searches_pierced_triangles() {
            let pierced = triangles(candidates.min(nearest.len()))
                .filter(|&[a, b, c]| {
                    is_pierced(
                        &self.center,
                        [
                            &self.vertices[nearest[a]],
                            &self.vertices[nearest[b]],
                            &self.vertices[nearest[c]],
                        ],
                        direction,
                        self.params.pierce_tolerance,
                    )
                })
                .find_map(|ranks| facet_of(ranks).ok());
            if let Some(facet) = pierced {
                return Ok(facet);
            }
        }

        let err = match facet_of([0, 1, 2]) {
            Ok(facet) => return Ok(facet),
            Err(err) => err,
        };
        let fallback = triangles(self.params.fallback_neighbors.min(nearest.len()))
            .skip(1)
            .find_map(|ranks| facet_of(ranks).ok());
        match fallback {
            Some(facet) => {
                trace!(facet = ?facet.indices(), "nearest facet is degenerate, using fallback");
                Ok(facet)
            }
            None => Err(err),
        }
    }
}

impl<I: SpatialIndex> fmt::Debug for Polyhedron<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polyhedron")
            .field("center", &self.center)
            .field("vertices", &self.vertices.len())
            .field("bounds", &self.bounds)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

fn validate_center(center: &Point3<f64>) -> PolyhedronResult<()> {
    if center.coords.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(PolyhedronError::InvalidCenter([center.x, center.y, center.z]))
    }
}
