//! Structural metrics of a proximity graph

pub mod distribution;

use crate::component::{find_connected_components, Component};
use crate::data::PointId;
use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::algorithms::{
    bfs_hop_distances, clustering_coefficients, degree_histogram, degrees, dijkstra_over,
    maximal_cliques,
};
use crate::graph::ProximityGraph;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

pub use distribution::{auto_range_histogram, fixed_width_histogram, value_counts, Bin};

/// Bins used for the clustering coefficient distribution
pub const CLUSTERING_BINS: usize = 10;

/// Bins used for the weighted path length distribution
pub const WEIGHTED_PATH_BINS: usize = 30;

/// Everything measured on one graph.
///
/// Path lengths cover each pair `(src, dst)` of the same component with
/// `src < dst` by identifier, so self pairs and mirrored pairs never appear.
/// Pairs split across components are excluded rather than counted as infinite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsResult {
    pub node_ids: Vec<PointId>,
    pub edge_count: usize,

    /// Degree of each node, in node order
    pub degrees: Vec<usize>,

    /// Number of nodes per degree value, from 0 to the maximum degree
    pub degree_histogram: Vec<usize>,

    /// Local clustering coefficient of each node, in node order
    pub clustering: Vec<f64>,

    pub components: Vec<Component>,

    /// Maximal cliques as sorted node indices, largest first
    pub cliques: Vec<Vec<u32>>,

    /// Hop counts of same-component pairs
    pub path_lengths: Vec<u32>,

    /// Dijkstra distances of same-component pairs, only for weighted graphs
    pub weighted_path_lengths: Option<Vec<f64>>,
}

/// Compute every metric of `graph`.
///
/// Pure: the graph is only read, and analyzing the same graph twice yields
/// equal results.
pub fn analyze(graph: &ProximityGraph) -> MetricsResult {
    let components = find_connected_components(graph);
    let path_lengths = hop_lengths_in(graph, &components);
    let weighted_path_lengths = graph
        .weights
        .as_deref()
        .map(|weights| weighted_lengths_in(graph, weights, &components));

    let result = MetricsResult {
        node_ids: graph.node_ids.clone(),
        edge_count: graph.edge_count(),
        degrees: degrees(graph),
        degree_histogram: degree_histogram(graph),
        clustering: clustering_coefficients(graph),
        cliques: maximal_cliques(graph),
        components,
        path_lengths,
        weighted_path_lengths,
    };

    log::debug!(
        "Analyzed graph: {} nodes, {} edges, {} components, {} cliques, {} path pairs",
        result.node_ids.len(),
        result.edge_count,
        result.components.len(),
        result.cliques.len(),
        result.path_lengths.len()
    );

    result
}

/// Hop count of every same-component pair
pub fn path_lengths(graph: &ProximityGraph) -> Vec<u32> {
    hop_lengths_in(graph, &find_connected_components(graph))
}

/// Weighted distance of every same-component pair.
///
/// Fails with a configuration error on an unweighted graph.
pub fn weighted_path_lengths(graph: &ProximityGraph) -> AnalysisResult<Vec<f64>> {
    let weights = graph.weights.as_deref().ok_or_else(|| {
        AnalysisError::Configuration(
            "weighted path lengths requested on an unweighted graph".to_string(),
        )
    })?;
    Ok(weighted_lengths_in(
        graph,
        weights,
        &find_connected_components(graph),
    ))
}

fn hop_lengths_in(graph: &ProximityGraph, components: &[Component]) -> Vec<u32> {
    let mut lengths = Vec::new();
    for component in components {
        for &src in &component.members {
            let distances = bfs_hop_distances(graph, src as usize);
            for dst in ordered_partners(graph, component, src) {
                if let Some(hops) = distances[dst as usize] {
                    lengths.push(hops);
                }
            }
        }
    }
    lengths
}

fn weighted_lengths_in(graph: &ProximityGraph, weights: &[f64], components: &[Component]) -> Vec<f64> {
    let mut lengths = Vec::new();
    for component in components {
        for &src in &component.members {
            let distances = dijkstra_over(graph, weights, src as usize);
            for dst in ordered_partners(graph, component, src) {
                if let Some(distance) = distances[dst as usize] {
                    lengths.push(distance);
                }
            }
        }
    }
    lengths
}

/// Members of `component` whose identifier sorts after `src`'s
fn ordered_partners<'a>(
    graph: &'a ProximityGraph,
    component: &'a Component,
    src: u32,
) -> impl Iterator<Item = u32> + 'a {
    let src_id = graph.node_id(src as usize);
    component
        .members
        .iter()
        .copied()
        .filter(move |&dst| src_id < graph.node_id(dst as usize))
}

impl MetricsResult {
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Mean degree, 0 for an empty graph
    pub fn mean_degree(&self) -> f64 {
        if self.degrees.is_empty() {
            return 0.0;
        }
        self.degrees.iter().map(|&d| d as f64).mean()
    }

    /// Mean clustering coefficient, 0 for an empty graph
    pub fn mean_clustering(&self) -> f64 {
        if self.clustering.is_empty() {
            return 0.0;
        }
        self.clustering.iter().mean()
    }

    /// Mean hop count, `None` when no same-component pair exists
    pub fn mean_path_length(&self) -> Option<f64> {
        if self.path_lengths.is_empty() {
            return None;
        }
        Some(self.path_lengths.iter().map(|&l| l as f64).mean())
    }

    /// Mean weighted distance, `None` for unweighted graphs or when no pair exists
    pub fn mean_weighted_path_length(&self) -> Option<f64> {
        match &self.weighted_path_lengths {
            Some(lengths) if !lengths.is_empty() => Some(lengths.iter().mean()),
            _ => None,
        }
    }

    /// (size, number of components of that size), ascending by size
    pub fn component_size_counts(&self) -> Vec<(usize, usize)> {
        value_counts(self.components.iter().map(|c| c.size))
    }

    /// (size, number of maximal cliques of that size), ascending by size
    pub fn clique_size_counts(&self) -> Vec<(usize, usize)> {
        value_counts(self.cliques.iter().map(|c| c.len()))
    }

    /// Number of pairs per hop count; index 0 holds length 1
    pub fn path_length_histogram(&self) -> Vec<usize> {
        let Some(&longest) = self.path_lengths.iter().max() else {
            return Vec::new();
        };

        let mut histogram = vec![0; longest as usize];
        for &length in &self.path_lengths {
            histogram[length as usize - 1] += 1;
        }
        histogram
    }

    /// Clustering coefficients binned over [0, 1]
    pub fn clustering_histogram(&self, bins: usize) -> Vec<Bin> {
        fixed_width_histogram(&self.clustering, 0.0, 1.0, bins)
    }

    /// Weighted distances binned over their observed range
    pub fn weighted_path_histogram(&self, bins: usize) -> Vec<Bin> {
        self.weighted_path_lengths
            .as_deref()
            .map(|lengths| auto_range_histogram(lengths, bins))
            .unwrap_or_default()
    }

    /// Scalar digest used by the report tables
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            node_count: self.node_count(),
            edge_count: self.edge_count,
            mean_degree: self.mean_degree(),
            mean_clustering: self.mean_clustering(),
            component_count: self.components.len(),
            clique_count: self.cliques.len(),
            mean_path_length: self.mean_path_length(),
            path_pair_count: self.path_lengths.len(),
            mean_weighted_path_length: self.mean_weighted_path_length(),
            weighted: self.weighted_path_lengths.is_some(),
        }
    }
}

/// Scalar statistics of one graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub mean_degree: f64,
    pub mean_clustering: f64,
    pub component_count: usize,
    pub clique_count: usize,
    pub mean_path_length: Option<f64>,
    pub path_pair_count: usize,
    pub mean_weighted_path_length: Option<f64>,

    /// Whether the graph carried weights, even if no pair was reachable
    #[serde(default)]
    pub weighted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Point, PointSet};
    use crate::error::AnalysisError;
    use crate::graph::build;

    fn collinear(weighted: bool) -> ProximityGraph {
        let points = PointSet::new(vec![
            Point::new(0, 0.0, 0.0, 0.0),
            Point::new(1, 100.0, 0.0, 0.0),
            Point::new(2, 251.0, 0.0, 0.0),
        ])
        .unwrap();
        build(&points, 150.0, weighted).unwrap()
    }

    fn square(range: f64) -> ProximityGraph {
        let points = PointSet::new(vec![
            Point::new(0, 0.0, 0.0, 0.0),
            Point::new(1, 10.0, 0.0, 0.0),
            Point::new(2, 10.0, 10.0, 0.0),
            Point::new(3, 0.0, 10.0, 0.0),
        ])
        .unwrap();
        build(&points, range, true).unwrap()
    }

    #[test]
    fn collinear_scenario() {
        let result = analyze(&collinear(false));
        assert_eq!(result.edge_count, 1);
        let sizes: Vec<usize> = result.components.iter().map(|c| c.size).collect();
        assert_eq!(sizes, vec![2, 1]);
        assert_eq!(result.path_lengths, vec![1]);
        assert_eq!(result.degree_histogram, vec![1, 2]);
        assert_eq!(result.weighted_path_lengths, None);
        assert_eq!(result.component_size_counts(), vec![(1, 1), (2, 1)]);
    }

    #[test]
    fn four_cycle_scenario() {
        let result = analyze(&square(10.0));
        assert_eq!(result.components.len(), 1);
        assert!(result.clustering.iter().all(|&c| c == 0.0));
        assert!(result.cliques.iter().all(|c| c.len() == 2));
        // 4 adjacent pairs at 1 hop, 2 opposite corners at 2 hops
        let mut lengths = result.path_lengths.clone();
        lengths.sort_unstable();
        assert_eq!(lengths, vec![1, 1, 1, 1, 2, 2]);
        assert_eq!(result.path_length_histogram(), vec![4, 2]);
    }

    #[test]
    fn weighted_paths_take_cheapest_route() {
        let result = analyze(&square(15.0));
        let mut weighted = result.weighted_path_lengths.clone().unwrap();
        weighted.sort_by(|a, b| a.total_cmp(b));
        // Four sides at 100; diagonals 200 directly or via a corner
        assert_eq!(weighted.len(), 6);
        assert!(weighted[..4].iter().all(|&w| (w - 100.0).abs() < 1e-9));
        assert!(weighted[4..].iter().all(|&w| (w - 200.0).abs() < 1e-9));
    }

    #[test]
    fn pairs_follow_identifier_order() {
        // Ids deliberately out of insertion order
        let points = PointSet::new(vec![
            Point::new(30, 0.0, 0.0, 0.0),
            Point::new(10, 1.0, 0.0, 0.0),
            Point::new(20, 2.0, 0.0, 0.0),
        ])
        .unwrap();
        let g = build(&points, 1.0, false).unwrap();
        let mut lengths = path_lengths(&g);
        lengths.sort_unstable();
        assert_eq!(lengths, vec![1, 1, 2]);
    }

    #[test]
    fn path_lengths_obey_triangle_inequality() {
        let points = PointSet::new(
            (0..6)
                .map(|i| Point::new(i, (i * 7 % 5) as f64, (i * 3 % 4) as f64, 0.0))
                .collect(),
        )
        .unwrap();
        let g = build(&points, 2.5, false).unwrap();
        let hops: Vec<Vec<Option<u32>>> =
            (0..6).map(|s| bfs_hop_distances(&g, s)).collect();
        for a in 0..6 {
            for b in 0..6 {
                for c in 0..6 {
                    if let (Some(ab), Some(bc), Some(ac)) = (hops[a][b], hops[b][c], hops[a][c]) {
                        assert!(ac <= ab + bc);
                    }
                }
            }
        }
        assert!(path_lengths(&g).iter().all(|&l| l >= 1));
    }

    fn scattered(reverse: bool) -> PointSet {
        let mut points: Vec<Point> = (0..8)
            .map(|i| {
                Point::new(
                    i,
                    (i * 7 % 5) as f64,
                    (i * 3 % 4) as f64,
                    (i % 2) as f64,
                )
            })
            .collect();
        if reverse {
            points.reverse();
        }
        PointSet::new(points).unwrap()
    }

    #[test]
    fn weighted_distances_are_bounded_by_cheapest_edges() {
        let g = build(&scattered(false), 2.5, true).unwrap();
        let weights = g.weights.as_deref().unwrap();
        let cheapest = weights.iter().copied().fold(f64::INFINITY, f64::min);
        assert!(cheapest.is_finite());

        for src in 0..g.node_count() {
            let incident = g
                .neighbor_weights(src)
                .unwrap()
                .iter()
                .copied()
                .fold(f64::INFINITY, f64::min);
            let distances = crate::graph::algorithms::dijkstra_distances(&g, src).unwrap();
            for (dst, distance) in distances.iter().enumerate() {
                let Some(d) = *distance else { continue };
                assert!(d >= 0.0);
                if dst != src {
                    assert!(d >= cheapest);
                    assert!(d >= incident);
                }
            }
        }

        let result = analyze(&g);
        let weighted = result.weighted_path_lengths.as_ref().unwrap();
        assert!(!weighted.is_empty());
        assert_eq!(weighted.len(), result.path_lengths.len());
    }

    #[test]
    fn components_do_not_depend_on_point_order() {
        let member_ids = |points: PointSet| {
            let g = build(&points, 1.8, false).unwrap();
            let mut groups: Vec<Vec<PointId>> = analyze(&g)
                .components
                .iter()
                .map(|c| {
                    let mut ids: Vec<PointId> =
                        c.members.iter().map(|&m| g.node_id(m as usize).clone()).collect();
                    ids.sort();
                    ids
                })
                .collect();
            groups.sort();
            groups
        };
        let forward = member_ids(scattered(false));
        assert!(forward.len() > 1);
        assert_eq!(forward, member_ids(scattered(true)));
    }

    #[test]
    fn weighted_lengths_follow_graph_weights() {
        assert_eq!(analyze(&collinear(false)).weighted_path_lengths, None);
        assert_eq!(
            analyze(&collinear(true)).weighted_path_lengths,
            Some(vec![10_000.0])
        );
    }

    #[test]
    fn edgeless_weighted_graph_still_reports_weighting() {
        let points = PointSet::new(vec![
            Point::new(0, 0.0, 0.0, 0.0),
            Point::new(1, 1000.0, 0.0, 0.0),
            Point::new(2, 2000.0, 0.0, 0.0),
        ])
        .unwrap();
        let result = analyze(&build(&points, 10.0, true).unwrap());
        assert_eq!(result.weighted_path_lengths, Some(Vec::new()));

        let summary = result.summary();
        assert!(summary.weighted);
        assert_eq!(summary.mean_weighted_path_length, None);
        assert!(!analyze(&collinear(false)).summary().weighted);
    }

    #[test]
    fn weighted_request_on_unweighted_graph_fails() {
        assert!(matches!(
            weighted_path_lengths(&collinear(false)),
            Err(AnalysisError::Configuration(_))
        ));
        assert_eq!(weighted_path_lengths(&collinear(true)).unwrap(), vec![10_000.0]);
    }

    #[test]
    fn empty_graph_gives_empty_result() {
        let result = analyze(&ProximityGraph::empty());
        assert_eq!(result.node_count(), 0);
        assert!(result.degree_histogram.is_empty());
        assert!(result.clustering.is_empty());
        assert!(result.components.is_empty());
        assert!(result.cliques.is_empty());
        assert!(result.path_lengths.is_empty());
        assert!(result.path_length_histogram().is_empty());
        assert!(result.clustering_histogram(CLUSTERING_BINS).is_empty());

        let summary = result.summary();
        assert_eq!(summary.mean_degree, 0.0);
        assert_eq!(summary.mean_clustering, 0.0);
        assert_eq!(summary.mean_path_length, None);
        assert_eq!(summary.path_pair_count, 0);
    }

    #[test]
    fn analyze_is_idempotent() {
        let g = square(15.0);
        assert_eq!(analyze(&g), analyze(&g));
    }

    #[test]
    fn summary_scalars() {
        let summary = analyze(&collinear(true)).summary();
        assert_eq!(summary.node_count, 3);
        assert!((summary.mean_degree - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(summary.component_count, 2);
        assert_eq!(summary.clique_count, 2);
        assert_eq!(summary.mean_path_length, Some(1.0));
        assert_eq!(summary.mean_weighted_path_length, Some(10_000.0));
    }
}
