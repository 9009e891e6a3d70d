//! # KdTree Index Adapter
//!
//! Bucketed kd-tree for radius queries.
//!
//! Inner nodes split at the median along an axis that cycles with depth;
//! leaves hold up to `leaf_size` entries. The tree doesn't own point data
//! beyond a copy of the positions, and reports hits by source id.

use nalgebra::Point;

use crate::core::config::DEFAULT_LEAF_SIZE;
use crate::core::Coordinate;
use crate::ports::Neighborhood;

#[derive(Debug)]
enum KdNode<T> {
    Leaf(Vec<usize>),
    Split {
        axis: usize,
        midpoint: T,
        /// Entries with `component <= midpoint`
        low: Box<KdNode<T>>,
        /// Entries with `component >= midpoint`
        high: Box<KdNode<T>>,
    },
}

/// Kd-tree index over a fixed set of entries
#[derive(Debug)]
pub struct KdTree<T: Coordinate, const D: usize> {
    positions: Vec<Point<T, D>>,
    sources: Vec<usize>,
    root: KdNode<T>,
}

impl<T: Coordinate, const D: usize> KdTree<T, D> {
    /// Index `points`, each entry's source id being its position in the slice
    pub fn from_points(points: &[Point<T, D>]) -> Self {
        Self::from_entries(points.to_vec(), (0..points.len()).collect(), DEFAULT_LEAF_SIZE)
    }

    /// Index explicit entries (positions with their source ids)
    pub(crate) fn from_entries(positions: Vec<Point<T, D>>, sources: Vec<usize>, leaf_size: usize) -> Self {
        debug_assert_eq!(positions.len(), sources.len());

        let items: Vec<usize> = (0..positions.len()).collect();
        let root = construct(&positions, items, 0, leaf_size.max(1));

        Self {
            positions,
            sources,
            root,
        }
    }

    /// Depth of the deepest leaf (a lone leaf has depth 0)
    #[cfg(test)]
    fn depth(&self) -> usize {
        fn walk<T>(node: &KdNode<T>) -> usize {
            match node {
                KdNode::Leaf(_) => 0,
                KdNode::Split { low, high, .. } => 1 + walk(low).max(walk(high)),
            }
        }
        walk(&self.root)
    }

    fn visit_node(
        &self,
        node: &KdNode<T>,
        origin: &Point<T, D>,
        radius: T,
        r2: T,
        visit: &mut dyn FnMut(usize, T),
    ) {
        match node {
            KdNode::Leaf(items) => {
                for &item in items {
                    let d2 = nalgebra::distance_squared(origin, &self.positions[item]);
                    if d2 <= r2 {
                        visit(self.sources[item], d2);
                    }
                }
            }
            KdNode::Split {
                axis,
                midpoint,
                low,
                high,
            } => {
                let component = origin[*axis];

                if component - radius <= *midpoint {
                    self.visit_node(low, origin, radius, r2, visit);
                }

                if component + radius >= *midpoint {
                    self.visit_node(high, origin, radius, r2, visit);
                }
            }
        }
    }
}

fn construct<T: Coordinate, const D: usize>(
    positions: &[Point<T, D>],
    mut items: Vec<usize>,
    depth: usize,
    leaf_size: usize,
) -> KdNode<T> {
    if items.len() <= leaf_size {
        return KdNode::Leaf(items);
    }

    let axis = depth % D;
    let mid = items.len() / 2;

    items.select_nth_unstable_by(mid, |&a, &b| {
        positions[a][axis]
            .partial_cmp(&positions[b][axis])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let midpoint = positions[items[mid]][axis];

    let high = items.split_off(mid);
    let low = items;

    KdNode::Split {
        axis,
        midpoint,
        low: Box::new(construct(positions, low, depth + 1, leaf_size)),
        high: Box::new(construct(positions, high, depth + 1, leaf_size)),
    }
}

impl<T: Coordinate, const D: usize> Neighborhood<T, D> for KdTree<T, D> {
    fn for_each_within(&self, origin: &Point<T, D>, radius: T, visit: &mut dyn FnMut(usize, T)) {
        self.visit_node(&self.root, origin, radius, radius * radius, visit);
    }

    fn len(&self) -> usize {
        self.positions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::index::FlatIndex;
    use nalgebra::{Point2, Point3};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sorted_ids<N: Neighborhood<f64, 3>>(index: &N, origin: &Point3<f64>, radius: f64) -> Vec<usize> {
        let mut ids: Vec<usize> = index.within(origin, radius).into_iter().map(|n| n.id).collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_kd_tree_matches_flat_index() {
        let mut rng = StdRng::seed_from_u64(42);
        let points: Vec<Point3<f64>> = (0..2000)
            .map(|_| Point3::new(rng.gen(), rng.gen(), rng.gen()))
            .collect();

        let tree = KdTree::from_entries(points.clone(), (0..points.len()).collect(), 8);
        let flat = FlatIndex::from_points(&points);

        for _ in 0..50 {
            let origin = Point3::new(rng.gen(), rng.gen(), rng.gen());
            let radius = rng.gen_range(0.01..0.3);
            assert_eq!(
                sorted_ids(&tree, &origin, radius),
                sorted_ids(&flat, &origin, radius)
            );
        }
    }

    #[test]
    fn test_kd_tree_is_balanced() {
        let points: Vec<Point2<f64>> = (0..1024).map(|i| Point2::new(i as f64, 0.0)).collect();
        let tree = KdTree::from_entries(points, (0..1024).collect(), 16);

        // 1024 / 16 = 64 leaves, 6 levels of splits
        assert_eq!(tree.depth(), 6);
        assert_eq!(tree.len(), 1024);
    }

    #[test]
    fn test_kd_tree_duplicates() {
        let points = vec![Point2::new(0.5, 0.5); 100];
        let tree = KdTree::from_entries(points, (0..100).collect(), 4);

        assert_eq!(tree.within(&Point2::new(0.5, 0.5), 0.0).len(), 100);
        assert!(tree.within(&Point2::new(0.0, 0.0), 0.1).is_empty());
    }

    #[test]
    fn test_kd_tree_radius_is_inclusive() {
        let tree = KdTree::from_points(&[Point2::new(0.0, 0.0), Point2::new(3.0, 4.0)]);
        let found = tree.within(&Point2::new(0.0, 0.0), 5.0);

        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_kd_tree_empty() {
        let tree = KdTree::<f32, 3>::from_points(&[]);
        assert!(tree.is_empty());
        assert!(tree.within(&Point3::new(0.0, 0.0, 0.0), 1.0).is_empty());
    }
}
