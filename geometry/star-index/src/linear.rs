//! Brute-force index.

use nalgebra::Vector3;

use crate::error::IndexResult;
use crate::{Neighbor, SpatialIndex, by_distance_then_index, is_finite, validate};

/// Exact index that scans every point on each query.
///
/// `O(n)` per query. Useful as a reference for [`KdTreeIndex`](crate::KdTreeIndex)
/// and for very small point sets.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearIndex {
    points: Vec<[f64; 3]>,
}

impl SpatialIndex for LinearIndex {
    fn build(points: &[Vector3<f64>]) -> IndexResult<Self> {
        validate(points)?;
        Ok(Self {
            points: points.iter().map(|p| [p.x, p.y, p.z]).collect(),
        })
    }

    fn nearest(&self, k: usize, query: &Vector3<f64>) -> Vec<Neighbor> {
        let k = k.min(self.points.len());
        if k == 0 || !is_finite(query) {
            return Vec::new();
        }

        let query = [query.x, query.y, query.z];
        let mut neighbors: Vec<Neighbor> = self
            .points
            .iter()
            .enumerate()
            .map(|(index, p)| Neighbor {
                index,
                distance_squared: squared_distance(&query, p),
            })
            .collect();

        if k < neighbors.len() {
            neighbors.select_nth_unstable_by(k - 1, by_distance_then_index);
            neighbors.truncate(k);
        }
        neighbors.sort_by(by_distance_then_index);
        neighbors
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

/// Same accumulation order as `kiddo::SquaredEuclidean`, so both indices see
/// bit-identical distances.
fn squared_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .fold(0.0, |acc, d| acc + d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_point() {
        let index = LinearIndex::build(&[Vector3::new(0.0, 0.0, 1.0)]).unwrap();
        assert_eq!(index.len(), 1);
        assert_eq!(index.k_nearest(3, &Vector3::x()), vec![0]);
    }

    #[test]
    fn orders_by_distance() {
        let points = [
            Vector3::new(3.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
        ];
        let index = LinearIndex::build(&points).unwrap();
        assert_eq!(index.k_nearest(3, &Vector3::zeros()), vec![1, 2, 0]);
        assert_eq!(index.k_nearest(2, &Vector3::zeros()), vec![1, 2]);
    }

    #[test]
    fn equal_distances_keep_input_order() {
        let points = [
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
        ];
        let index = LinearIndex::build(&points).unwrap();
        assert_eq!(index.k_nearest(2, &Vector3::zeros()), vec![0, 1]);
    }

    #[test]
    fn rejects_empty_input() {
        assert!(LinearIndex::build(&[]).is_err());
    }
}
