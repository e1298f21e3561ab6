//! Benchmarks for polyhedron construction and containment queries.
//!
//! Run with: cargo bench -p star-polyhedron
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p star-polyhedron -- --save-baseline main
//! 2. After changes: cargo bench -p star-polyhedron -- --baseline main

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use star_polyhedron::{ContainmentParams, LinearIndex, Point3, Polyhedron};

// =============================================================================
// Test Data
// =============================================================================

fn distances(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(5.0..40.0)).collect()
}

fn query_points(count: usize, seed: u64) -> Vec<Point3<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Point3::new(
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
                rng.gen_range(0.0..100.0),
            )
        })
        .collect()
}

// =============================================================================
// Construction Benchmarks
// =============================================================================

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Construction");
    let center = Point3::new(50.0, 50.0, 50.0);

    for n in [32, 96, 384, 1536] {
        let d = distances(n, 1);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::new("new", n), &d, |b, d| {
            b.iter(|| Polyhedron::new(black_box(center), black_box(d)));
        });
    }

    group.finish();
}

// =============================================================================
// Containment Benchmarks
// =============================================================================

fn bench_containment(c: &mut Criterion) {
    let mut group = c.benchmark_group("Containment");
    let center = Point3::new(50.0, 50.0, 50.0);
    let queries = query_points(1000, 2);
    group.throughput(Throughput::Elements(queries.len() as u64));

    for n in [96, 384, 1536] {
        let d = distances(n, 1);
        let tree = Polyhedron::new(center, &d).unwrap();
        let pierced = tree.clone().with_params(ContainmentParams::pierced_facet(5));
        let scan: Polyhedron<LinearIndex> = Polyhedron::build(center, &d).unwrap();

        group.bench_with_input(BenchmarkId::new("kdtree", n), &queries, |b, q| {
            b.iter(|| q.iter().filter(|p| tree.contains(black_box(p))).count());
        });
        group.bench_with_input(BenchmarkId::new("kdtree_pierced_facet", n), &queries, |b, q| {
            b.iter(|| q.iter().filter(|p| pierced.contains(black_box(p))).count());
        });
        group.bench_with_input(BenchmarkId::new("linear", n), &queries, |b, q| {
            b.iter(|| q.iter().filter(|p| scan.contains(black_box(p))).count());
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(benches, bench_construction, bench_containment);
criterion_main!(benches);
