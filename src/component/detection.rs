//! Connected component detection

use crate::component::Component;
use crate::graph::ProximityGraph;
use std::collections::HashMap;

/// Union-Find data structure for connected component analysis
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of node i)
    parent: Vec<u32>,

    /// Size of each set, valid at roots (for union by size)
    size: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure with every node in its own set
    pub fn new(node_count: usize) -> Self {
        Self {
            parent: (0..node_count as u32).collect(),
            size: vec![1; node_count],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        // Path compression: point every node on the way at the root
        let mut node = x;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        root
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return; // Already in the same set
        }

        // Attach smaller tree under root of larger tree
        let (big, small) = if self.size[root_x as usize] >= self.size[root_y as usize] {
            (root_x, root_y)
        } else {
            (root_y, root_x)
        };
        self.parent[small as usize] = big;
        self.size[big as usize] += self.size[small as usize];
    }

    /// Get the size of the set containing x
    pub fn size(&mut self, x: u32) -> u32 {
        let root = self.find(x);
        self.size[root as usize]
    }
}

/// Count the edges with both endpoints in `members`, over the number of member pairs
fn calculate_component_density(graph: &ProximityGraph, members: &[u32]) -> f64 {
    let n = members.len();
    if n <= 1 {
        return 1.0; // By convention, singleton components have density 1
    }

    let possible_edges = n * (n - 1) / 2;

    // Components are closed under adjacency, so every neighbor is a member
    let edge_entries: usize = members
        .iter()
        .map(|&node| graph.degree(node as usize))
        .sum();

    (edge_entries / 2) as f64 / possible_edges as f64
}

/// Partition the graph's nodes into connected components.
///
/// The partition does not depend on edge order. Members are listed in
/// ascending node order and components are ordered by their smallest member,
/// so the result is fully deterministic.
pub fn find_connected_components(graph: &ProximityGraph) -> Vec<Component> {
    let node_count = graph.node_count();
    let mut sets = DisjointSets::new(node_count);

    for (src, dst) in graph.edge_list() {
        sets.union(src, dst);
    }

    // Nodes are visited in ascending order, so the first time a root is seen
    // fixes that component's position
    let mut slot_of_root: HashMap<u32, usize> = HashMap::new();
    let mut groups: Vec<Vec<u32>> = Vec::new();
    for node in 0..node_count as u32 {
        let root = sets.find(node);
        let slot = *slot_of_root.entry(root).or_insert_with(|| {
            groups.push(Vec::with_capacity(sets.size(root) as usize));
            groups.len() - 1
        });
        groups[slot].push(node);
    }

    let components: Vec<Component> = groups
        .into_iter()
        .enumerate()
        .map(|(id, members)| Component {
            id: id as u32,
            size: members.len(),
            density: calculate_component_density(graph, &members),
            members,
        })
        .collect();

    log::debug!(
        "Found {} connected components over {} nodes",
        components.len(),
        node_count
    );

    components
}
