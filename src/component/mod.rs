//! Connected component analysis module

pub mod detection;

use serde::{Deserialize, Serialize};

pub use detection::{find_connected_components, DisjointSets};

/// A maximal connected set of nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Position of this component in the partition (ordered by smallest member)
    pub id: u32,

    /// Members of this component (node indices, ascending)
    pub members: Vec<u32>,

    /// Size of the component
    pub size: usize,

    /// Density: internal edges / possible node pairs
    pub density: f64,
}
