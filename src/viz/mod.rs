//! Visualization data generation module
//!
//! Writes plot-ready series and GraphML files; rendering them is left to an
//! external plotting tool.

use crate::metrics::{Bin, CLUSTERING_BINS, WEIGHTED_PATH_BINS};
use crate::storage::entry_stem;
use crate::sweep::{Dataset, SweepEntry};
use anyhow::{anyhow, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Generate visualization inputs from analysis results
pub fn generate_visualizations(
    entries: &[SweepEntry],
    datasets: &[Dataset],
    output_dir: &str,
) -> Result<()> {
    log::info!("Generating visualization data for {} analyses", entries.len());

    let viz_dir = Path::new(output_dir).join("visualizations");
    fs::create_dir_all(&viz_dir)?;

    generate_network_data(entries, datasets, &viz_dir)?;
    generate_distribution_series(entries, &viz_dir)?;
    generate_distance_table(datasets, &viz_dir)?;

    log::info!("Visualization data generated successfully");

    Ok(())
}

/// One GraphML file per graph, with satellite positions and edge weights
fn generate_network_data(entries: &[SweepEntry], datasets: &[Dataset], viz_dir: &Path) -> Result<()> {
    log::info!("Generating network data files");

    let data_dir = viz_dir.join("networks");
    fs::create_dir_all(&data_dir)?;

    for entry in entries {
        let dataset = datasets
            .iter()
            .find(|d| d.label == entry.density)
            .ok_or_else(|| anyhow!("No point set for density {}", entry.density))?;
        let graph = &entry.graph;

        let file_path = data_dir.join(format!("{}.graphml", entry_stem(entry)));
        let mut file = File::create(file_path)?;

        writeln!(file, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>")?;
        writeln!(file, "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\">")?;
        for axis in ["x", "y", "z"] {
            writeln!(
                file,
                "  <key id=\"{0}\" for=\"node\" attr.name=\"{0}\" attr.type=\"double\"/>",
                axis
            )?;
        }
        writeln!(file, "  <key id=\"label\" for=\"node\" attr.name=\"label\" attr.type=\"string\"/>")?;
        writeln!(file, "  <key id=\"weight\" for=\"edge\" attr.name=\"weight\" attr.type=\"double\"/>")?;
        writeln!(file, "  <graph id=\"G\" edgedefault=\"undirected\">")?;

        for (node, point) in dataset.points.iter().enumerate() {
            let [x, y, z] = point.position;
            writeln!(
                file,
                "    <node id=\"n{}\">\n      <data key=\"label\">{}</data>\n      <data key=\"x\">{}</data>\n      <data key=\"y\">{}</data>\n      <data key=\"z\">{}</data>\n    </node>",
                node, point.id, x, y, z
            )?;
        }

        for (edge_id, (src, dst)) in graph.edge_list().into_iter().enumerate() {
            match graph.edge_weight(src as usize, dst) {
                Some(weight) => writeln!(
                    file,
                    "    <edge id=\"e{}\" source=\"n{}\" target=\"n{}\">\n      <data key=\"weight\">{}</data>\n    </edge>",
                    edge_id, src, dst, weight
                )?,
                None => writeln!(
                    file,
                    "    <edge id=\"e{}\" source=\"n{}\" target=\"n{}\"/>",
                    edge_id, src, dst
                )?,
            }
        }

        writeln!(file, "  </graph>")?;
        writeln!(file, "</graphml>")?;
    }

    Ok(())
}

/// CSV series behind the degree, clustering, component, clique and path plots
fn generate_distribution_series(entries: &[SweepEntry], viz_dir: &Path) -> Result<()> {
    log::info!("Generating distribution series");

    let series_dir = viz_dir.join("series");
    fs::create_dir_all(&series_dir)?;

    for entry in entries {
        let stem = entry_stem(entry);
        let metrics = &entry.metrics;

        let mut degree_file = File::create(series_dir.join(format!("{}_degree.csv", stem)))?;
        writeln!(degree_file, "degree,count")?;
        for (degree, count) in metrics.degree_histogram.iter().enumerate() {
            writeln!(degree_file, "{},{}", degree, count)?;
        }

        write_bins(
            &series_dir.join(format!("{}_clustering.csv", stem)),
            &metrics.clustering_histogram(CLUSTERING_BINS),
        )?;

        let mut component_file = File::create(series_dir.join(format!("{}_components.csv", stem)))?;
        writeln!(component_file, "size,count")?;
        for (size, count) in metrics.component_size_counts() {
            writeln!(component_file, "{},{}", size, count)?;
        }

        let mut clique_file = File::create(series_dir.join(format!("{}_cliques.csv", stem)))?;
        writeln!(clique_file, "size,count")?;
        for (size, count) in metrics.clique_size_counts() {
            writeln!(clique_file, "{},{}", size, count)?;
        }

        let mut path_file = File::create(series_dir.join(format!("{}_paths.csv", stem)))?;
        writeln!(path_file, "length,count")?;
        for (i, count) in metrics.path_length_histogram().iter().enumerate() {
            writeln!(path_file, "{},{}", i + 1, count)?;
        }

        if metrics.weighted_path_lengths.is_some() {
            write_bins(
                &series_dir.join(format!("{}_weighted_paths.csv", stem)),
                &metrics.weighted_path_histogram(WEIGHTED_PATH_BINS),
            )?;
        }

        if metrics.path_lengths.is_empty() {
            log::warn!("No same-component pairs for {} @ {} m", entry.density, entry.range);
        }
    }

    Ok(())
}

fn write_bins(path: &Path, bins: &[Bin]) -> Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "bin_start,bin_end,count")?;
    for bin in bins {
        writeln!(file, "{:.6},{:.6},{}", bin.start, bin.end, bin.count)?;
    }
    Ok(())
}

/// Closest and farthest pair per density, to guide the choice of ranges
fn generate_distance_table(datasets: &[Dataset], viz_dir: &Path) -> Result<()> {
    let mut file = File::create(viz_dir.join("distances.csv"))?;
    writeln!(file, "density,satellites,min_distance,max_distance")?;

    for dataset in datasets {
        match dataset.points.distance_extremes() {
            Some(ext) => writeln!(
                file,
                "{},{},{:.3},{:.3}",
                dataset.label,
                dataset.points.len(),
                ext.min,
                ext.max
            )?,
            None => writeln!(file, "{},{},,", dataset.label, dataset.points.len())?,
        }
    }

    Ok(())
}
