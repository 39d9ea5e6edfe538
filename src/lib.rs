//! Proximity graph construction and structural analysis of satellite swarms

pub mod component;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod report;
pub mod storage;
pub mod sweep;
pub mod viz;

pub use anyhow::{anyhow, Result};
pub use config::Config;
pub use data::{Point, PointId, PointSet};
pub use error::{AnalysisError, AnalysisResult};
pub use graph::{ProximityGraph, ProximityGraphBuilder};
pub use metrics::{analyze, MetricsResult, MetricsSummary};
pub use report::{Report, ReportAssembler};
