//! Proximity graph construction

use crate::config::validate_threshold;
use crate::data::PointSet;
use crate::error::AnalysisResult;
use crate::graph::ProximityGraph;
use itertools::Itertools;

/// Builds the range graph of a point set.
///
/// Every unordered pair of points is compared once, so construction is
/// O(n²) in the number of satellites. There is no spatial index, which
/// limits it to swarm-sized inputs.
#[derive(Debug, Clone, Copy)]
pub struct ProximityGraphBuilder {
    threshold: f64,
    weighted: bool,
}

impl ProximityGraphBuilder {
    /// Fails with a configuration error when `threshold` is negative or not finite
    pub fn new(threshold: f64, weighted: bool) -> AnalysisResult<Self> {
        validate_threshold(threshold)?;
        Ok(Self { threshold, weighted })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn weighted(&self) -> bool {
        self.weighted
    }

    /// Connect every pair of points at distance `<= threshold`.
    ///
    /// All points become nodes, isolated or not. Weighted graphs carry the
    /// squared distance on each edge.
    pub fn build(&self, points: &PointSet) -> ProximityGraph {
        let node_count = points.len();
        let mut adjacency = AdjacencyLists::with_capacity(node_count, self.weighted);

        let all = points.points();
        for (i, j) in (0..node_count).tuple_combinations::<(usize, usize)>() {
            let distance = all[i].distance_to(&all[j]);
            if distance <= self.threshold {
                adjacency.add_edge(i as u32, j as u32, distance * distance);
            }
        }

        let graph = adjacency.finish(points);
        log::debug!(
            "Built range graph (range {}, weighted {}) with {} nodes and {} edges",
            self.threshold,
            self.weighted,
            graph.node_count(),
            graph.edge_count()
        );
        graph
    }
}

/// Build a proximity graph in one call
pub fn build(points: &PointSet, threshold: f64, weighted: bool) -> AnalysisResult<ProximityGraph> {
    Ok(ProximityGraphBuilder::new(threshold, weighted)?.build(points))
}

/// Per-node adjacency collected before compression
struct AdjacencyLists {
    lists: Vec<Vec<(u32, f64)>>,
    weighted: bool,
}

impl AdjacencyLists {
    fn with_capacity(node_count: usize, weighted: bool) -> Self {
        Self {
            lists: vec![Vec::new(); node_count],
            weighted,
        }
    }

    /// Record an undirected edge under both endpoints
    fn add_edge(&mut self, a: u32, b: u32, weight: f64) {
        self.lists[a as usize].push((b, weight));
        self.lists[b as usize].push((a, weight));
    }

    fn finish(mut self, points: &PointSet) -> ProximityGraph {
        let edge_entries: usize = self.lists.iter().map(|list| list.len()).sum();

        let mut offsets = Vec::with_capacity(self.lists.len() + 1);
        offsets.push(0);
        let mut offset = 0;
        for list in &self.lists {
            offset += list.len() as u32;
            offsets.push(offset);
        }

        let mut edges = Vec::with_capacity(edge_entries);
        let mut weights = Vec::with_capacity(if self.weighted { edge_entries } else { 0 });
        for list in &mut self.lists {
            // Sort for binary search efficiency
            list.sort_unstable_by_key(|&(dst, _)| dst);
            for &(dst, weight) in list.iter() {
                edges.push(dst);
                if self.weighted {
                    weights.push(weight);
                }
            }
        }

        ProximityGraph {
            node_ids: points.ids(),
            offsets,
            edges,
            weights: self.weighted.then_some(weights),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Point;
    use crate::error::AnalysisError;

    fn square() -> PointSet {
        PointSet::new(vec![
            Point::new(0, 0.0, 0.0, 0.0),
            Point::new(1, 10.0, 0.0, 0.0),
            Point::new(2, 10.0, 10.0, 0.0),
            Point::new(3, 0.0, 10.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn square_at_fifteen_includes_diagonals() {
        let g = build(&square(), 15.0, false).unwrap();
        assert_eq!(
            g.edge_list(),
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
    }

    #[test]
    fn square_at_ten_is_a_four_cycle() {
        // Sides are exactly 10: the comparison is inclusive
        let g = build(&square(), 10.0, false).unwrap();
        assert_eq!(g.edge_list(), vec![(0, 1), (0, 3), (1, 2), (2, 3)]);
        assert!((0..4).all(|n| g.degree(n) == 2));
    }

    #[test]
    fn isolated_points_are_still_nodes() {
        let points = PointSet::new(vec![
            Point::new(0, 0.0, 0.0, 0.0),
            Point::new(1, 100.0, 0.0, 0.0),
            Point::new(2, 251.0, 0.0, 0.0),
        ])
        .unwrap();
        let g = build(&points, 150.0, false).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_list(), vec![(0, 1)]);
        assert_eq!(g.degree(2), 0);
    }

    #[test]
    fn gap_equal_to_range_connects() {
        let points = PointSet::new(vec![
            Point::new(0, 0.0, 0.0, 0.0),
            Point::new(1, 100.0, 0.0, 0.0),
            Point::new(2, 250.0, 0.0, 0.0),
        ])
        .unwrap();
        let g = build(&points, 150.0, false).unwrap();
        assert_eq!(g.edge_list(), vec![(0, 1), (1, 2)]);
        assert!(!g.has_edge(0, 2));

        let components = crate::component::find_connected_components(&g);
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].members, vec![0, 1, 2]);
    }

    #[test]
    fn weights_are_squared_distances() {
        let g = build(&square(), 15.0, true).unwrap();
        assert_eq!(g.edge_weight(0, 1), Some(100.0));
        let diagonal = g.edge_weight(0, 2).unwrap();
        assert!((diagonal - 200.0).abs() < 1e-9);
    }

    #[test]
    fn empty_point_set_gives_empty_graph() {
        let g = build(&PointSet::empty(), 10.0, true).unwrap();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.offsets, vec![0]);
    }

    #[test]
    fn negative_threshold_is_a_configuration_error() {
        assert!(matches!(
            build(&square(), -1.0, false),
            Err(AnalysisError::Configuration(_))
        ));
    }

    #[test]
    fn edge_sets_grow_with_range() {
        let points = square();
        let ranges = [0.0, 5.0, 10.0, 14.0, 14.2, 20.0];
        for pair in ranges.windows(2) {
            let smaller = build(&points, pair[0], false).unwrap().edge_list();
            let larger = build(&points, pair[1], false).unwrap().edge_list();
            assert!(smaller.iter().all(|e| larger.contains(e)));
        }
    }

    #[test]
    fn no_self_loops_or_duplicates() {
        let g = build(&square(), 100.0, false).unwrap();
        for node in 0..g.node_count() {
            let neighbors = g.neighbors(node);
            assert!(!neighbors.contains(&(node as u32)));
            assert!(neighbors.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
