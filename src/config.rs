//! Configuration management for the swarm graph analyzer

use crate::error::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};

/// Nominal communication ranges, in metres
pub const DEFAULT_RANGES: [f64; 3] = [20_000.0, 40_000.0, 60_000.0];

/// Settings shared by every (density, range) combination of a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Communication ranges to evaluate
    pub ranges: Vec<f64>,

    /// Weight edges by squared distance and compute weighted path lengths
    pub weighted: bool,

    /// Worker threads (0 = use all available cores)
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ranges: DEFAULT_RANGES.to_vec(),
            weighted: false,
            threads: 0,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(ranges: Vec<f64>, weighted: bool, threads: usize) -> Self {
        Self {
            ranges,
            weighted,
            threads,
        }
    }

    /// Reject range lists that no graph can be built from
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.ranges.is_empty() {
            return Err(AnalysisError::Configuration(
                "at least one communication range is required".to_string(),
            ));
        }

        for &range in &self.ranges {
            validate_threshold(range)?;
        }

        Ok(())
    }

    /// Number of worker threads to start
    pub fn worker_threads(&self) -> usize {
        if self.threads > 0 {
            self.threads
        } else {
            num_cpus::get()
        }
    }
}

/// A distance threshold must be a finite, non-negative number
pub fn validate_threshold(threshold: f64) -> AnalysisResult<()> {
    if !threshold.is_finite() {
        return Err(AnalysisError::Configuration(format!(
            "range {} is not a finite number",
            threshold
        )));
    }
    if threshold < 0.0 {
        return Err(AnalysisError::Configuration(format!(
            "range {} is negative",
            threshold
        )));
    }
    Ok(())
}
