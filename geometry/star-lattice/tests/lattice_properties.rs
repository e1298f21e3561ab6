//! Property-based tests for Fibonacci lattice generation.
//!
//! Run with: cargo test -p star-lattice -- proptest

use approx::assert_relative_eq;
use proptest::prelude::*;
use star_lattice::{DEFAULT_LATTICE_SIZE, default_lattice, generate};

proptest! {
    #[test]
    fn proptest_lattice_has_n_unit_directions(n in 4usize..2000) {
        let lattice = generate(n).unwrap();
        prop_assert_eq!(lattice.len(), n);
        for direction in &lattice {
            prop_assert!((direction.norm() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn proptest_latitude_spans_poles_monotonically(n in 4usize..2000) {
        let lattice = generate(n).unwrap();
        prop_assert!((lattice[0].z + 1.0).abs() < 1e-12);
        prop_assert!((lattice[n - 1].z - 1.0).abs() < 1e-12);
        for pair in lattice.windows(2) {
            prop_assert!(pair[1].z > pair[0].z);
        }
    }

    #[test]
    fn proptest_generation_is_deterministic(n in 2usize..500) {
        prop_assert_eq!(generate(n).unwrap(), generate(n).unwrap());
    }
}

#[test]
fn default_lattice_is_balanced() {
    let lattice = default_lattice();
    assert_eq!(lattice.len(), DEFAULT_LATTICE_SIZE);

    // A near-uniform sampling has its centroid close to the sphere center.
    let centroid = lattice.iter().sum::<nalgebra::Vector3<f64>>() / lattice.len() as f64;
    assert!(centroid.norm() < 0.05, "centroid drifted: {centroid:?}");
}

#[test]
fn default_lattice_has_no_duplicate_directions() {
    let lattice = default_lattice();
    for (i, a) in lattice.iter().enumerate() {
        for b in &lattice[i + 1..] {
            assert!((a - b).norm() > 0.1);
        }
    }
}

#[test]
fn nearest_spacing_is_roughly_uniform() {
    let lattice = generate(400).unwrap();
    let spacing: Vec<f64> = lattice
        .iter()
        .enumerate()
        .map(|(i, a)| {
            lattice
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, b)| (a - b).norm())
                .fold(f64::INFINITY, f64::min)
        })
        .collect();

    let min = spacing.iter().copied().fold(f64::INFINITY, f64::min);
    let max = spacing.iter().copied().fold(0.0, f64::max);
    assert!(max / min < 3.0, "spacing ratio too large: {min} .. {max}");
    assert_relative_eq!(lattice[0].z, -1.0, epsilon = 1e-12);
}
