//! Analysis of every (density, range) combination

use crate::config::Config;
use crate::data::PointSet;
use crate::error::AnalysisResult;
use crate::graph::{ProximityGraph, ProximityGraphBuilder};
use crate::metrics::{analyze, MetricsResult};
use crate::report::{Report, ReportAssembler};
use rayon::prelude::*;

/// A labeled swarm topology (e.g. low, avg, high density)
#[derive(Debug, Clone)]
pub struct Dataset {
    pub label: String,
    pub points: PointSet,
}

impl Dataset {
    pub fn new(label: impl Into<String>, points: PointSet) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }
}

/// Graph and metrics of one combination, owned by the caller
#[derive(Debug, Clone)]
pub struct SweepEntry {
    pub density: String,
    pub range: f64,
    pub graph: ProximityGraph,
    pub metrics: MetricsResult,
}

/// Build and analyze one graph per (dataset, range) pair.
///
/// Combinations share nothing but the read-only point sets, so they are
/// evaluated on the rayon pool. Entries come back grouped by dataset in input
/// order, ranges in configuration order.
pub fn run_sweep(datasets: &[Dataset], config: &Config) -> AnalysisResult<Vec<SweepEntry>> {
    config.validate()?;

    let builders = config
        .ranges
        .iter()
        .map(|&range| ProximityGraphBuilder::new(range, config.weighted))
        .collect::<AnalysisResult<Vec<_>>>()?;

    for dataset in datasets {
        match dataset.points.distance_extremes() {
            Some(ext) => log::info!(
                "Density {}: {} satellites, pair distances {:.1} m to {:.1} m",
                dataset.label,
                dataset.points.len(),
                ext.min,
                ext.max
            ),
            None => log::info!(
                "Density {}: {} satellites",
                dataset.label,
                dataset.points.len()
            ),
        }
    }

    let combinations: Vec<(&Dataset, &ProximityGraphBuilder)> = datasets
        .iter()
        .flat_map(|dataset| builders.iter().map(move |builder| (dataset, builder)))
        .collect();

    log::info!(
        "Analyzing {} combinations ({} densities x {} ranges)",
        combinations.len(),
        datasets.len(),
        builders.len()
    );

    let entries = combinations
        .into_par_iter()
        .map(|(dataset, builder)| {
            let graph = builder.build(&dataset.points);
            log::debug!(
                "Graph {} @ {} m uses about {} bytes",
                dataset.label,
                builder.threshold(),
                graph.memory_usage()
            );
            let metrics = analyze(&graph);
            SweepEntry {
                density: dataset.label.clone(),
                range: builder.threshold(),
                graph,
                metrics,
            }
        })
        .collect();

    Ok(entries)
}

/// Tabulate sweep entries
pub fn assemble_report(entries: &[SweepEntry]) -> Report {
    let mut assembler = ReportAssembler::new();
    for entry in entries {
        assembler.add(&entry.density, entry.range, &entry.metrics);
    }
    assembler.build()
}
