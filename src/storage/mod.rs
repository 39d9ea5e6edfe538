//! Results persistence module

use crate::report::Report;
use crate::sweep::SweepEntry;
use anyhow::Result;
use serde_json::{json, to_string_pretty};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Save analysis results to the specified directory
pub fn save_results(entries: &[SweepEntry], report: &Report, output_dir: &str) -> Result<()> {
    log::info!("Saving {} analyses to {}", entries.len(), output_dir);

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(entries, report, output_dir)?;
    save_metrics(entries, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

/// File stem shared by every artifact of one combination
pub fn entry_stem(entry: &SweepEntry) -> String {
    let label: String = entry
        .density
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_{}", label, entry.range)
}

/// Save report tables and per-combination scalars
fn save_summary(entries: &[SweepEntry], report: &Report, output_dir: &str) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let summary = json!({
        "tables": report.tables,
        "analyses": entries.iter().map(|e| {
            json!({
                "density": e.density,
                "range": e.range,
                "weighted": e.graph.is_weighted(),
                "summary": e.metrics.summary(),
            })
        }).collect::<Vec<_>>(),
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save the full metrics record of each combination
fn save_metrics(entries: &[SweepEntry], output_dir: &str) -> Result<()> {
    log::info!("Saving per-combination metrics");

    let metrics_dir = Path::new(output_dir).join("metrics");
    fs::create_dir_all(&metrics_dir)?;

    for entry in entries {
        let path = metrics_dir.join(format!("metrics_{}.json", entry_stem(entry)));
        let mut file = File::create(path)?;

        let record = json!({
            "density": entry.density,
            "range": entry.range,
            "metrics": entry.metrics,
            "component_size_counts": entry.metrics.component_size_counts(),
            "clique_size_counts": entry.metrics.clique_size_counts(),
        });

        file.write_all(to_string_pretty(&record)?.as_bytes())?;
    }

    Ok(())
}
