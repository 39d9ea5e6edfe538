//! Compressed undirected graph over a point set

use crate::data::PointId;
use serde::{Deserialize, Serialize};
use std::mem;

/// Compressed sparse representation of an undirected proximity graph.
///
/// Every edge is stored once per endpoint, so adjacency is symmetric and each
/// node's neighbor list is sorted ascending. Node `i` is the `i`-th point of
/// the point set the graph was built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityGraph {
    /// Identifier of each node, in point set order
    pub node_ids: Vec<PointId>,

    /// Offset array: offsets[i] to offsets[i+1] defines the neighbor range for node i
    pub offsets: Vec<u32>,

    /// Concatenated neighbor lists
    pub edges: Vec<u32>,

    /// Squared distance of each entry in `edges`, present only for weighted graphs
    pub weights: Option<Vec<f64>>,
}

impl ProximityGraph {
    /// Graph with no nodes and no edges
    pub fn empty() -> Self {
        Self {
            node_ids: Vec::new(),
            offsets: vec![0],
            edges: Vec::new(),
            weights: None,
        }
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    pub fn node_id(&self, node: usize) -> &PointId {
        &self.node_ids[node]
    }

    /// Neighbors of a node, sorted ascending
    pub fn neighbors(&self, node: usize) -> &[u32] {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        &self.edges[start..end]
    }

    /// Edge weights aligned with `neighbors(node)`
    pub fn neighbor_weights(&self, node: usize) -> Option<&[f64]> {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        self.weights.as_ref().map(|w| &w[start..end])
    }

    pub fn degree(&self, node: usize) -> usize {
        let start = self.offsets[node] as usize;
        let end = self.offsets[node + 1] as usize;
        end - start
    }

    /// Check if `src` and `dst` are adjacent
    pub fn has_edge(&self, src: usize, dst: u32) -> bool {
        self.neighbors(src).binary_search(&dst).is_ok()
    }

    /// Weight of the edge between `src` and `dst`, if both the edge and weights exist
    pub fn edge_weight(&self, src: usize, dst: u32) -> Option<f64> {
        let pos = self.neighbors(src).binary_search(&dst).ok()?;
        self.neighbor_weights(src).map(|w| w[pos])
    }

    /// Each undirected edge once, as `(low, high)` node indices
    pub fn edge_list(&self) -> Vec<(u32, u32)> {
        let mut list = Vec::with_capacity(self.edge_count());
        for src in 0..self.node_count() {
            for &dst in self.neighbors(src) {
                if (src as u32) < dst {
                    list.push((src as u32, dst));
                }
            }
        }
        list
    }

    /// Estimate memory usage in bytes
    pub fn memory_usage(&self) -> usize {
        let base = mem::size_of::<Self>();
        let offsets = self.offsets.capacity() * mem::size_of::<u32>();
        let edges = self.edges.capacity() * mem::size_of::<u32>();
        let ids = self.node_ids.capacity() * mem::size_of::<PointId>();
        let weights = self
            .weights
            .as_ref()
            .map(|w| w.capacity() * mem::size_of::<f64>())
            .unwrap_or(0);

        base + offsets + edges + ids + weights
    }
}
