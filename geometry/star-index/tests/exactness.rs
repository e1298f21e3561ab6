//! The k-d tree must agree with the brute-force scan on every query.
//!
//! Run with: cargo test -p star-index -- proptest

use nalgebra::Vector3;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use star_index::{KdTreeIndex, LinearIndex, SpatialIndex};

// =============================================================================
// Strategies
// =============================================================================

fn arb_direction() -> impl Strategy<Value = Vector3<f64>> {
    prop::array::uniform3(-1.0..1.0f64)
        .prop_filter("non-zero", |[x, y, z]| x * x + y * y + z * z > 1e-6)
        .prop_map(|[x, y, z]| Vector3::new(x, y, z).normalize())
}

fn arb_cloud() -> impl Strategy<Value = Vec<Vector3<f64>>> {
    prop::collection::vec(
        prop::array::uniform3(-50.0..50.0f64).prop_map(|[x, y, z]| Vector3::new(x, y, z)),
        1..300,
    )
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_kdtree_matches_linear_on_lattices(
        n in 4usize..600,
        k in 1usize..8,
        query in arb_direction(),
    ) {
        let lattice = star_lattice::generate(n).unwrap();
        let tree = KdTreeIndex::build(&lattice).unwrap();
        let scan = LinearIndex::build(&lattice).unwrap();

        prop_assert_eq!(tree.k_nearest(k, &query), scan.k_nearest(k, &query));
    }

    #[test]
    fn proptest_kdtree_matches_linear_on_clouds(
        cloud in arb_cloud(),
        k in 1usize..12,
        query in prop::array::uniform3(-60.0..60.0f64),
    ) {
        let query = Vector3::new(query[0], query[1], query[2]);
        let tree = KdTreeIndex::build(&cloud).unwrap();
        let scan = LinearIndex::build(&cloud).unwrap();

        prop_assert_eq!(tree.k_nearest(k, &query), scan.k_nearest(k, &query));
    }

    #[test]
    fn proptest_results_are_sorted(
        n in 4usize..300,
        query in arb_direction(),
    ) {
        let lattice = star_lattice::generate(n).unwrap();
        let tree = KdTreeIndex::build(&lattice).unwrap();
        let neighbors = tree.nearest(6, &query);

        for pair in neighbors.windows(2) {
            prop_assert!(pair[0].distance_squared <= pair[1].distance_squared);
        }
    }
}

#[test]
fn tied_grid_points_resolve_identically() {
    // Integer grid: lots of exactly equal distances from grid-aligned queries.
    let mut points = Vec::new();
    for x in -2..=2 {
        for y in -2..=2 {
            for z in -2..=2 {
                points.push(Vector3::new(f64::from(x), f64::from(y), f64::from(z)));
            }
        }
    }
    let tree = KdTreeIndex::build(&points).unwrap();
    let scan = LinearIndex::build(&points).unwrap();

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let query = Vector3::new(
            f64::from(rng.gen_range(-5..=5)) * 0.5,
            f64::from(rng.gen_range(-5..=5)) * 0.5,
            f64::from(rng.gen_range(-5..=5)) * 0.5,
        );
        for k in [1, 3, 6, 13] {
            assert_eq!(tree.k_nearest(k, &query), scan.k_nearest(k, &query));
        }
    }
}

#[test]
fn three_nearest_on_default_lattice() {
    let lattice = star_lattice::default_lattice();
    let tree = KdTreeIndex::build(lattice).unwrap();

    // Querying a lattice direction returns it first.
    for (i, direction) in lattice.iter().enumerate() {
        let nearest = tree.k_nearest(3, direction);
        assert_eq!(nearest.len(), 3);
        assert_eq!(nearest[0], i);
    }
}
