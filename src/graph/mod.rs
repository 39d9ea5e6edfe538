//! Proximity graph representation and algorithms module

pub mod algorithms;
pub mod builder;
pub mod proximity;

pub use builder::{build, ProximityGraphBuilder};
pub use proximity::ProximityGraph;
