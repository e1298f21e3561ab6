//! Property-based tests for polyhedron construction and queries.
//!
//! Run with: cargo test -p star-polyhedron -- proptest

use proptest::prelude::*;
use star_polyhedron::{Point3, Polyhedron, Transform3D};

// =============================================================================
// Strategies
// =============================================================================

fn arb_point(range: f64) -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-range..range).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

/// Distances for lattices of 4 to 160 directions.
fn arb_distances() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.1..50.0f64, 4..160)
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_center_is_contained(center in arb_point(1000.0), distances in arb_distances()) {
        let poly = Polyhedron::new(center, &distances).unwrap();
        prop_assert!(poly.contains(&center));
        prop_assert!(poly.contains(&poly.center()));
    }

    #[test]
    fn proptest_vertices_lie_in_bounding_box(
        center in arb_point(1000.0),
        distances in arb_distances(),
    ) {
        let poly = Polyhedron::new(center, &distances).unwrap();
        let bbox = poly.bounding_box();
        prop_assert!(bbox.contains(&bbox.min()));
        prop_assert!(bbox.contains(&bbox.max()));
        prop_assert!(bbox.contains(&center));
        for v in poly.vertices() {
            prop_assert!(bbox.contains(v));
        }
    }

    #[test]
    fn proptest_vertex_count_matches_distances(distances in arb_distances()) {
        let poly = Polyhedron::new(Point3::origin(), &distances).unwrap();
        prop_assert_eq!(poly.len(), distances.len());
        prop_assert_eq!(poly.lattice().len(), distances.len());
    }

    #[test]
    fn proptest_transformed_parts_answer_identically(
        distances in arb_distances(),
        queries in prop::collection::vec(arb_point(60.0), 1..40),
    ) {
        let poly = Polyhedron::new(Point3::new(3.0, -1.0, 2.0), &distances).unwrap();
        let bbox = poly.bounding_box();
        let copy = Polyhedron::from_transformed_parts(
            poly.center(),
            poly.vertices().to_vec(),
            bbox.min(),
            bbox.max(),
            poly.lattice().to_vec(),
        )
        .unwrap();

        for q in &queries {
            prop_assert_eq!(copy.classify(q), poly.classify(q));
        }
    }

    #[test]
    fn proptest_translated_center_stays_inside(
        distances in arb_distances(),
        offset in arb_point(500.0),
    ) {
        let poly = Polyhedron::new(Point3::origin(), &distances).unwrap();
        let moved = poly
            .transformed(&Transform3D::from_translation(offset.coords))
            .unwrap();
        prop_assert!(moved.contains(&moved.center()));
        prop_assert!(moved.bounding_box().contains(&moved.center()));
    }
}
