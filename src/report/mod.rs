//! Summary tables across densities and communication ranges

use crate::metrics::{MetricsResult, MetricsSummary};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar tabulated for every (density, range) combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measure {
    MeanDegree,
    MeanClustering,
    ComponentCount,
    CliqueCount,
    MeanPathLength,
    PathPairCount,
    MeanWeightedPathLength,
}

impl Measure {
    /// Measures reported for every sweep
    pub const STANDARD: [Measure; 6] = [
        Measure::MeanDegree,
        Measure::MeanClustering,
        Measure::ComponentCount,
        Measure::CliqueCount,
        Measure::MeanPathLength,
        Measure::PathPairCount,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Measure::MeanDegree => "Mean degree",
            Measure::MeanClustering => "Mean clustering coefficient",
            Measure::ComponentCount => "Connected components",
            Measure::CliqueCount => "Maximal cliques",
            Measure::MeanPathLength => "Mean shortest path length",
            Measure::PathPairCount => "Shortest path pairs",
            Measure::MeanWeightedPathLength => "Mean weighted shortest path length",
        }
    }

    fn cell(&self, summary: &MetricsSummary) -> Cell {
        match self {
            Measure::MeanDegree => Cell::Value(summary.mean_degree),
            Measure::MeanClustering => Cell::Value(summary.mean_clustering),
            Measure::ComponentCount => Cell::Count(summary.component_count),
            Measure::CliqueCount => Cell::Count(summary.clique_count),
            Measure::MeanPathLength => summary.mean_path_length.into(),
            Measure::PathPairCount => Cell::Count(summary.path_pair_count),
            Measure::MeanWeightedPathLength => summary.mean_weighted_path_length.into(),
        }
    }
}

/// One table entry; `NotApplicable` marks an empty distribution or a missing combination.
///
/// Serialized with its variant name so counts and values stay distinct on read-back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Value(f64),
    Count(usize),
    NotApplicable,
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Cell::NotApplicable, Cell::Value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Value(v) => write!(f, "{:.4}", v),
            Cell::Count(c) => write!(f, "{}", c),
            Cell::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// One measure laid out with a row per density and a column per range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    pub measure: Measure,
    pub rows: Vec<String>,
    pub ranges: Vec<f64>,
    pub cells: Vec<Vec<Cell>>,
}

impl SummaryTable {
    pub fn get(&self, row: &str, range: f64) -> Option<Cell> {
        let r = self.rows.iter().position(|label| label == row)?;
        let c = self.ranges.iter().position(|&x| x == range)?;
        Some(self.cells[r][c])
    }
}

impl fmt::Display for SummaryTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} :", self.measure.title())?;

        let headers: Vec<String> = self.ranges.iter().map(|r| format!("{}", r)).collect();
        let rendered: Vec<Vec<String>> = self
            .cells
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();

        let label_width = self.rows.iter().map(|l| l.len()).max().unwrap_or(0);
        let column_width = headers
            .iter()
            .chain(rendered.iter().flatten())
            .map(|s| s.len())
            .max()
            .unwrap_or(0);

        write!(f, "{:label_width$}", "")?;
        for header in &headers {
            write!(f, "  {:>column_width$}", header)?;
        }
        writeln!(f)?;

        for (label, row) in self.rows.iter().zip(&rendered) {
            write!(f, "{:<label_width$}", label)?;
            for cell in row {
                write!(f, "  {:>column_width$}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// All summary tables of a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub tables: Vec<SummaryTable>,
}

impl Report {
    pub fn table(&self, measure: Measure) -> Option<&SummaryTable> {
        self.tables.iter().find(|t| t.measure == measure)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, table) in self.tables.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", table)?;
        }
        Ok(())
    }
}

/// Collects per-combination metrics and lays them out as tables.
///
/// Rows and columns appear in first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct ReportAssembler {
    entries: Vec<(String, f64, MetricsSummary)>,
}

impl ReportAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the metrics of one (density, range) combination; a repeated combination replaces the earlier one
    pub fn add(&mut self, density: &str, range: f64, metrics: &MetricsResult) {
        self.add_summary(density, range, metrics.summary());
    }

    pub fn add_summary(&mut self, density: &str, range: f64, summary: MetricsSummary) {
        match self
            .entries
            .iter_mut()
            .find(|(label, r, _)| label == density && *r == range)
        {
            Some(entry) => entry.2 = summary,
            None => self.entries.push((density.to_string(), range, summary)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(&self) -> Report {
        let mut rows: Vec<String> = Vec::new();
        let mut ranges: Vec<f64> = Vec::new();
        for (label, range, _) in &self.entries {
            if !rows.contains(label) {
                rows.push(label.clone());
            }
            if !ranges.contains(range) {
                ranges.push(*range);
            }
        }

        let mut measures = Measure::STANDARD.to_vec();
        if self.entries.iter().any(|(_, _, s)| s.weighted) {
            measures.push(Measure::MeanWeightedPathLength);
        }

        let tables = measures
            .into_iter()
            .map(|measure| SummaryTable {
                measure,
                cells: rows
                    .iter()
                    .map(|row| {
                        ranges
                            .iter()
                            .map(|&range| {
                                self.lookup(row, range)
                                    .map_or(Cell::NotApplicable, |s| measure.cell(s))
                            })
                            .collect()
                    })
                    .collect(),
                rows: rows.clone(),
                ranges: ranges.clone(),
            })
            .collect();

        Report { tables }
    }

    fn lookup(&self, density: &str, range: f64) -> Option<&MetricsSummary> {
        self.entries
            .iter()
            .find(|(label, r, _)| label == density && *r == range)
            .map(|(_, _, summary)| summary)
    }
}
