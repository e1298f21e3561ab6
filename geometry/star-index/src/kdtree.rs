//! k-d tree index backed by `kiddo`.

use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::Vector3;

use crate::error::{IndexError, IndexResult};
use crate::{Neighbor, SpatialIndex, by_distance_then_index, is_finite, validate};

/// Points per leaf bucket of the tree.
const BUCKET_SIZE: usize = 32;

/// Most points that may share one coordinate value on an axis once the tree has
/// to split buckets.
pub const MAX_SHARED_COORDINATE: usize = BUCKET_SIZE - 1;

/// Exact k-nearest-neighbor index over a k-d tree.
///
/// Items stored in the tree are the input positions of the points, so query
/// results refer back to the slice the index was built from.
///
/// Like any `kiddo` tree, more than [`MAX_SHARED_COORDINATE`] points sharing one
/// coordinate value on an axis cannot be split into buckets. `build` rejects such
/// point sets with [`IndexError::SharedCoordinate`]; lattices never come close.
///
/// # Example
///
/// ```
/// use star_index::{KdTreeIndex, SpatialIndex};
/// use nalgebra::Vector3;
///
/// let lattice = star_lattice::generate(96).unwrap();
/// let index = KdTreeIndex::build(&lattice).unwrap();
///
/// // The south pole is the first lattice direction.
/// assert_eq!(index.k_nearest(1, &Vector3::new(0.0, 0.0, -1.0)), vec![0]);
/// ```
#[derive(Debug, Clone)]
pub struct KdTreeIndex {
    tree: KdTree<f64, 3>,
    len: usize,
}

impl SpatialIndex for KdTreeIndex {
    fn build(points: &[Vector3<f64>]) -> IndexResult<Self> {
        validate(points)?;
        check_shared_coordinates(points)?;

        let mut tree: KdTree<f64, 3> = KdTree::new();
        for (i, p) in points.iter().enumerate() {
            tree.add(&[p.x, p.y, p.z], i as u64);
        }

        Ok(Self {
            tree,
            len: points.len(),
        })
    }

    fn nearest(&self, k: usize, query: &Vector3<f64>) -> Vec<Neighbor> {
        let k = k.min(self.len);
        if k == 0 || !is_finite(query) {
            return Vec::new();
        }

        let query = [query.x, query.y, query.z];

        // The tree breaks distance ties arbitrarily. Keep widening the query until
        // the first result past the k-th is strictly farther, so every point tied
        // with the k-th is a candidate, then order the candidates ourselves.
        let mut want = (k + 1).min(self.len);
        loop {
            let found = self.tree.nearest_n::<SquaredEuclidean>(&query, want);
            let complete = want >= self.len
                || match (found.get(k - 1), found.last()) {
                    (Some(kth), Some(last)) => last.distance > kth.distance,
                    _ => true,
                };

            if complete {
                let cutoff = found.get(k - 1).map_or(f64::INFINITY, |n| n.distance);
                let mut neighbors: Vec<Neighbor> = found
                    .iter()
                    .filter(|n| n.distance <= cutoff)
                    .map(|n| {
                        #[allow(clippy::cast_possible_truncation)]
                        let index = n.item as usize;
                        Neighbor {
                            index,
                            distance_squared: n.distance,
                        }
                    })
                    .collect();
                neighbors.sort_by(by_distance_then_index);
                neighbors.truncate(k);
                return neighbors;
            }

            want = want.saturating_mul(2).min(self.len);
        }
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// Rejects point sets that would make `kiddo` panic while splitting a bucket:
/// a full bucket whose points all share the split coordinate.
#[allow(clippy::float_cmp)]
fn check_shared_coordinates(points: &[Vector3<f64>]) -> IndexResult<()> {
    if points.len() <= BUCKET_SIZE {
        return Ok(());
    }
    for axis in 0..3 {
        // `+ 0.0` folds -0.0 into 0.0, which the tree treats as equal.
        let mut values: Vec<f64> = points.iter().map(|p| p[axis] + 0.0).collect();
        values.sort_by(f64::total_cmp);

        let longest = values
            .chunk_by(|a, b| a == b)
            .map(<[f64]>::len)
            .max()
            .unwrap_or(0);
        if longest > MAX_SHARED_COORDINATE {
            return Err(IndexError::SharedCoordinate {
                axis,
                count: longest,
                limit: MAX_SHARED_COORDINATE,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axes() -> Vec<Vector3<f64>> {
        vec![
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
        ]
    }

    #[test]
    fn finds_nearest_axis() {
        let index = KdTreeIndex::build(&axes()).unwrap();
        assert_eq!(index.k_nearest(1, &Vector3::new(0.1, 0.2, 0.9)), vec![2]);
        assert_eq!(index.k_nearest(1, &Vector3::new(0.0, -0.7, 0.1)), vec![4]);
    }

    #[test]
    fn ties_resolve_by_input_order() {
        let index = KdTreeIndex::build(&axes()).unwrap();
        // Equidistant from all six axes.
        let nearest = index.k_nearest(3, &Vector3::zeros());
        assert_eq!(nearest, vec![0, 1, 2]);
    }

    #[test]
    fn ties_across_many_equal_points() {
        // Stays under the tree's bucket size: kiddo cannot split a bucket whose
        // points all share one coordinate.
        let points = vec![Vector3::new(1.0, 2.0, 3.0); 8];
        let index = KdTreeIndex::build(&points).unwrap();
        let nearest = index.k_nearest(4, &Vector3::new(1.0, 2.0, 3.5));
        assert_eq!(nearest, vec![0, 1, 2, 3]);
    }

    #[test]
    fn too_many_shared_coordinates_are_rejected() {
        let stacked = vec![Vector3::new(0.0, 0.0, 1.0); 40];
        assert_eq!(
            KdTreeIndex::build(&stacked).unwrap_err(),
            IndexError::SharedCoordinate {
                axis: 0,
                count: 40,
                limit: MAX_SHARED_COORDINATE
            }
        );

        // Signed zeros count as the same value.
        let mut plane: Vec<_> = (0..33)
            .map(|i| Vector3::new(f64::from(i), 0.0, f64::from(i) * 0.5))
            .collect();
        plane[5].y = -0.0;
        assert!(matches!(
            KdTreeIndex::build(&plane),
            Err(IndexError::SharedCoordinate { axis: 1, count: 33, .. })
        ));

        // One bucket never splits.
        let single_bucket = vec![Vector3::new(1.0, 2.0, 3.0); 32];
        assert!(KdTreeIndex::build(&single_bucket).is_ok());

        let at_limit: Vec<_> = (0..40)
            .map(|i| {
                // 31 points share x = 0.
                let x = if i < 31 { 0.0 } else { f64::from(i) };
                Vector3::new(x, f64::from(i), f64::from(i) * 0.5)
            })
            .collect();
        let index = KdTreeIndex::build(&at_limit).unwrap();
        assert_eq!(index.k_nearest(1, &Vector3::new(0.0, 7.1, 3.5)), vec![7]);
    }

    #[test]
    fn k_larger_than_len_returns_all() {
        let index = KdTreeIndex::build(&axes()).unwrap();
        let nearest = index.k_nearest(100, &Vector3::new(0.9, 0.1, 0.0));
        assert_eq!(nearest.len(), 6);
        assert_eq!(nearest[0], 0);
    }

    #[test]
    fn zero_k_and_non_finite_queries_return_nothing() {
        let index = KdTreeIndex::build(&axes()).unwrap();
        assert!(index.k_nearest(0, &Vector3::x()).is_empty());
        assert!(index.k_nearest(3, &Vector3::new(f64::NAN, 0.0, 0.0)).is_empty());
    }

    #[test]
    fn distances_are_squared_euclidean() {
        let index = KdTreeIndex::build(&axes()).unwrap();
        let nearest = index.nearest(1, &Vector3::new(2.0, 0.0, 0.0));
        assert_eq!(nearest[0].index, 0);
        assert!((nearest[0].distance_squared - 1.0).abs() < 1e-12);
        assert!((nearest[0].distance() - 1.0).abs() < 1e-12);
    }
}
