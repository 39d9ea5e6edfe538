//! Point data and topology loading

pub mod loader;
pub mod points;

pub use loader::load_point_set;
pub use points::{DistanceExtremes, Point, PointId, PointSet};
