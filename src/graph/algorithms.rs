//! Graph algorithms for analysis

use crate::error::{AnalysisError, AnalysisResult};
use crate::graph::ProximityGraph;
use itertools::Itertools;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// Degree of every node, in node order
pub fn degrees(graph: &ProximityGraph) -> Vec<usize> {
    (0..graph.node_count()).map(|node| graph.degree(node)).collect()
}

/// Histogram of node degrees: bucket `d` holds the number of nodes of degree `d`.
///
/// Buckets run from 0 to the maximum observed degree; an empty graph yields
/// an empty histogram.
pub fn degree_histogram(graph: &ProximityGraph) -> Vec<usize> {
    let degrees = degrees(graph);
    let Some(&max_degree) = degrees.iter().max() else {
        return Vec::new();
    };

    let mut histogram = vec![0; max_degree + 1];
    for degree in degrees {
        histogram[degree] += 1;
    }
    histogram
}

/// Local clustering coefficient of one node.
///
/// Fraction of neighbor pairs that are adjacent; 0 below degree 2.
pub fn clustering_coefficient(graph: &ProximityGraph, node: usize) -> f64 {
    let neighbors = graph.neighbors(node);
    let degree = neighbors.len();
    if degree < 2 {
        return 0.0;
    }

    let linked = neighbors
        .iter()
        .tuple_combinations::<(&u32, &u32)>()
        .filter(|&(&u, &w)| graph.has_edge(u as usize, w))
        .count();
    let possible = degree * (degree - 1) / 2;

    linked as f64 / possible as f64
}

/// Clustering coefficient of every node, in node order
pub fn clustering_coefficients(graph: &ProximityGraph) -> Vec<f64> {
    (0..graph.node_count())
        .map(|node| clustering_coefficient(graph, node))
        .collect()
}

/// Hop distance from `source` to every node; `None` for nodes in other components
pub fn bfs_hop_distances(graph: &ProximityGraph, source: usize) -> Vec<Option<u32>> {
    let mut distances = vec![None; graph.node_count()];
    let mut queue = VecDeque::new();

    distances[source] = Some(0);
    queue.push_back(source);

    while let Some(node) = queue.pop_front() {
        let next = distances[node].unwrap_or(0) + 1;
        for &neighbor in graph.neighbors(node) {
            let neighbor = neighbor as usize;
            if distances[neighbor].is_none() {
                distances[neighbor] = Some(next);
                queue.push_back(neighbor);
            }
        }
    }

    distances
}

/// Priority queue entry for Dijkstra's algorithm, ordered as a min-heap on cost
#[derive(Debug, Clone, Copy, PartialEq)]
struct State {
    cost: f64,
    node: usize,
}

impl Eq for State {}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Weighted distance from `source` to every node; `None` for nodes in other components.
///
/// Requires a weighted graph; squared-distance weights are never negative.
pub fn dijkstra_distances(graph: &ProximityGraph, source: usize) -> AnalysisResult<Vec<Option<f64>>> {
    let Some(weights) = graph.weights.as_deref() else {
        return Err(AnalysisError::Configuration(
            "weighted path lengths requested on an unweighted graph".to_string(),
        ));
    };
    Ok(dijkstra_over(graph, weights, source))
}

/// Dijkstra with `weights` aligned to the graph's edge array
pub(crate) fn dijkstra_over(graph: &ProximityGraph, weights: &[f64], source: usize) -> Vec<Option<f64>> {
    let mut distances = vec![f64::INFINITY; graph.node_count()];
    let mut heap = BinaryHeap::new();

    distances[source] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: source,
    });

    while let Some(State { cost, node }) = heap.pop() {
        // Skip if we've already found a better path
        if cost > distances[node] {
            continue;
        }

        let start = graph.offsets[node] as usize;
        let end = graph.offsets[node + 1] as usize;
        for (&neighbor, &weight) in graph.edges[start..end].iter().zip(&weights[start..end]) {
            let neighbor = neighbor as usize;
            let next_cost = cost + weight;
            if next_cost < distances[neighbor] {
                distances[neighbor] = next_cost;
                heap.push(State {
                    cost: next_cost,
                    node: neighbor,
                });
            }
        }
    }

    distances
        .into_iter()
        .map(|d| d.is_finite().then_some(d))
        .collect()
}

/// Enumerate all maximal cliques (Bron–Kerbosch with Tomita pivoting).
///
/// Isolated nodes come out as cliques of size 1. Each clique is sorted by
/// node index and the list is ordered by size (largest first), then
/// lexicographically.
pub fn maximal_cliques(graph: &ProximityGraph) -> Vec<Vec<u32>> {
    let mut cliques = Vec::new();
    if graph.node_count() == 0 {
        return cliques;
    }

    let candidates: Vec<u32> = (0..graph.node_count() as u32).collect();
    let mut current = Vec::new();
    expand_clique(graph, &mut current, candidates, Vec::new(), &mut cliques);

    for clique in &mut cliques {
        clique.sort_unstable();
    }
    cliques.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    cliques
}

fn expand_clique(
    graph: &ProximityGraph,
    current: &mut Vec<u32>,
    mut candidates: Vec<u32>,
    mut excluded: Vec<u32>,
    cliques: &mut Vec<Vec<u32>>,
) {
    if candidates.is_empty() {
        if excluded.is_empty() {
            cliques.push(current.clone());
        }
        return;
    }

    // Pivot on the node covering the most candidates
    let pivot = candidates
        .iter()
        .chain(excluded.iter())
        .copied()
        .max_by_key(|&u| {
            candidates
                .iter()
                .filter(|&&v| graph.has_edge(u as usize, v))
                .count()
        })
        .unwrap_or(candidates[0]);

    let branches: Vec<u32> = candidates
        .iter()
        .copied()
        .filter(|&v| !graph.has_edge(pivot as usize, v))
        .collect();

    for v in branches {
        let next_candidates = candidates
            .iter()
            .copied()
            .filter(|&w| graph.has_edge(v as usize, w))
            .collect();
        let next_excluded = excluded
            .iter()
            .copied()
            .filter(|&w| graph.has_edge(v as usize, w))
            .collect();

        current.push(v);
        expand_clique(graph, current, next_candidates, next_excluded, cliques);
        current.pop();

        candidates.retain(|&w| w != v);
        excluded.push(v);
    }
}
