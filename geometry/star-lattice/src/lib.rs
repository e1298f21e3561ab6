//! Spherical Fibonacci lattices.
//!
//! This crate generates deterministic, near-uniform sets of unit directions on the
//! sphere. A star-convex polyhedron pairs direction `i` of such a lattice with a
//! measured distance `i`, so the order of the sequence is part of its meaning.
//!
//! - [`generate`] - `n` directions climbing from the south to the north pole
//! - [`default_lattice`] - cached lattice of [`DEFAULT_LATTICE_SIZE`] directions
//! - [`lattice_for`] - borrows the cached lattice when the size matches
//!
//! # Example
//!
//! ```
//! use star_lattice::generate;
//!
//! let lattice = generate(32).unwrap();
//! for direction in &lattice {
//!     assert!((direction.norm() - 1.0).abs() < 1e-9);
//! }
//! ```
//!
//! # Coordinate Order
//!
//! Directions are `(x, y, z)` with `z` as the latitude axis:
//! `z = -1 + 2k/(n-1)`, `x = r cos(kθ)`, `y = r sin(kθ)` where `θ` is the
//! [golden angle](golden_angle) and `r = sqrt(1 - z²)`.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod fibonacci;

pub use error::{LatticeError, LatticeResult};
pub use fibonacci::{
    DEFAULT_LATTICE_SIZE, MIN_DIRECTIONS, default_lattice, generate, golden_angle, lattice_for,
};

// Re-export nalgebra types for convenience
pub use nalgebra::Vector3;
