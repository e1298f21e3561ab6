//! Star-convex polyhedra built from radial distance measurements.
//!
//! A star-convex region is one where every boundary point is visible from a single
//! interior center. Detection models such as StarDist-3D describe an object this
//! way: one distance from the center to the boundary per sampled direction. This
//! crate turns those distances into a solid and answers spatial queries on it.
//!
//! # Components
//!
//! - [`Polyhedron`] - center, one vertex per lattice direction, containment query
//! - [`BoundingBox`] - axis-aligned box of the vertices
//! - [`ContainmentParams`] - how many neighboring directions a query searches
//! - [`Transform3D`] - re-express a polyhedron in another coordinate frame
//!
//! Directions come from `star-lattice` and are looked up through a
//! [`SpatialIndex`] from `star-index`.
//!
//! # Quick Start
//!
//! ```
//! use star_polyhedron::{Polyhedron, Point3};
//!
//! // 96 distances from a detector, here a sphere of radius 3.
//! let center = Point3::new(50.0, 50.0, 50.0);
//! let poly = Polyhedron::new(center, &[3.0; 96]).unwrap();
//!
//! assert!(poly.contains(&Point3::new(51.0, 50.5, 49.0)));
//! assert!(!poly.contains(&Point3::new(60.0, 50.0, 50.0)));
//!
//! let bbox = poly.bounding_box();
//! assert!(bbox.contains(&bbox.min()));
//! ```
//!
//! # Containment Rule
//!
//! For a query point `p`, the direction `p - center` is normalized and its nearest
//! lattice directions are looked up. The first triangle of their vertices that the
//! ray from the center passes through becomes the deciding facet (falling back to
//! the three nearest). `p` is inside when it is on the same side of the facet plane
//! as the center. Points on the plane, and queries whose facet is degenerate, are
//! outside; the center itself is always inside.
//!
//! The rule is local: far from the surface it is exact, close to the surface it
//! follows the triangle patch near the query direction.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod bounds;
mod error;
mod facet;
mod params;
mod polyhedron;
mod transform;

pub use bounds::BoundingBox;
pub use error::{PolyhedronError, PolyhedronResult};
pub use facet::{Containment, Facet, Side};
pub use params::{ContainmentParams, DEFAULT_FALLBACK_NEIGHBORS, MIN_CANDIDATE_NEIGHBORS};
pub use polyhedron::{MIN_DISTANCES, Polyhedron};
pub use transform::Transform3D;

pub use star_index::{IndexError, KdTreeIndex, LinearIndex, SpatialIndex};
pub use star_lattice::{DEFAULT_LATTICE_SIZE, LatticeError};

// Re-export nalgebra types for convenience
pub use nalgebra::{Matrix4, Point3, Vector3};
