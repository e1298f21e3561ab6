//! Spherical Fibonacci lattice generation.

use std::borrow::Cow;
use std::f64::consts::PI;
use std::sync::OnceLock;

use nalgebra::Vector3;

use crate::error::{LatticeError, LatticeResult};

/// Number of directions in the shared default lattice.
///
/// This is the ray count used by StarDist-3D style detectors, so most polyhedra
/// are built against it.
pub const DEFAULT_LATTICE_SIZE: usize = 96;

/// Smallest lattice [`generate`] accepts.
pub const MIN_DIRECTIONS: usize = 2;

static DEFAULT_LATTICE: OnceLock<Vec<Vector3<f64>>> = OnceLock::new();

/// The golden angle `2π(1 - 1/φ)` in radians.
///
/// # Example
///
/// ```
/// let angle = star_lattice::golden_angle();
/// assert!((angle - 2.399_963_229_728_653).abs() < 1e-12);
/// ```
#[inline]
#[must_use]
pub fn golden_angle() -> f64 {
    let phi = f64::midpoint(1.0, 5.0_f64.sqrt());
    2.0 * PI * (1.0 - 1.0 / phi)
}

/// Generate a spherical Fibonacci lattice with `n` directions.
///
/// Direction `k` sits at height `z = -1 + 2k/(n-1)` and is rotated by `k`
/// golden-angle steps around the z axis, so the sequence climbs from the south
/// pole to the north pole. The same `n` always yields the same sequence.
///
/// # Errors
///
/// Returns [`LatticeError::TooFewDirections`] if `n < 2`.
///
/// # Example
///
/// ```
/// use star_lattice::generate;
///
/// let lattice = generate(96).unwrap();
/// assert_eq!(lattice.len(), 96);
/// assert!((lattice[0].z + 1.0).abs() < 1e-12);
/// assert!((lattice[95].z - 1.0).abs() < 1e-12);
/// ```
pub fn generate(n: usize) -> LatticeResult<Vec<Vector3<f64>>> {
    if n < MIN_DIRECTIONS {
        return Err(LatticeError::TooFewDirections {
            required: MIN_DIRECTIONS,
            actual: n,
        });
    }
    Ok(directions(n))
}

/// The shared lattice of [`DEFAULT_LATTICE_SIZE`] directions.
///
/// Computed on first use and read-only afterwards.
#[must_use]
pub fn default_lattice() -> &'static [Vector3<f64>] {
    DEFAULT_LATTICE.get_or_init(|| directions(DEFAULT_LATTICE_SIZE))
}

/// A lattice with `n` directions, borrowing the shared default lattice when
/// `n == DEFAULT_LATTICE_SIZE`.
///
/// # Errors
///
/// Returns [`LatticeError::TooFewDirections`] if `n < 2`.
///
/// # Example
///
/// ```
/// use std::borrow::Cow;
/// use star_lattice::{lattice_for, DEFAULT_LATTICE_SIZE};
///
/// assert!(matches!(lattice_for(DEFAULT_LATTICE_SIZE).unwrap(), Cow::Borrowed(_)));
/// assert!(matches!(lattice_for(32).unwrap(), Cow::Owned(_)));
/// ```
pub fn lattice_for(n: usize) -> LatticeResult<Cow<'static, [Vector3<f64>]>> {
    if n == DEFAULT_LATTICE_SIZE {
        return Ok(Cow::Borrowed(default_lattice()));
    }
    generate(n).map(Cow::Owned)
}

fn directions(n: usize) -> Vec<Vector3<f64>> {
    let step = golden_angle();
    #[allow(clippy::cast_precision_loss)]
    let last = (n - 1) as f64;
    (0..n)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let k = k as f64;
            let z = -1.0 + 2.0 * k / last;
            let r = (1.0 - z * z).max(0.0).sqrt();
            let (sin, cos) = (step * k).sin_cos();
            Vector3::new(r * cos, r * sin, z)
        })
        .collect()
}
