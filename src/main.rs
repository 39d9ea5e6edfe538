use anyhow::{anyhow, Result};
use clap::Parser;
use swarm_graph_analyzer::{
    config::{Config, DEFAULT_RANGES},
    data::load_point_set,
    storage,
    sweep::{self, Dataset},
    viz,
};

/// Topology files analyzed when no `--input` is given
const DEFAULT_INPUTS: [(&str, &str); 3] = [
    ("low", "topology_low.csv"),
    ("avg", "topology_avg.csv"),
    ("high", "topology_high.csv"),
];

#[derive(Parser, Debug)]
#[clap(
    name = "swarm-graph-analyzer",
    about = "Proximity graph analysis of nano-satellite swarms"
)]
struct Cli {
    /// Labeled topology CSV (sat_id,x,y,z) as LABEL=PATH; repeat for each density
    #[clap(long = "input", value_parser = parse_input)]
    inputs: Vec<(String, String)>,

    /// Communication range in metres; repeat for each range (default 20000, 40000, 60000)
    #[clap(long = "range")]
    ranges: Vec<f64>,

    /// Weight edges by squared distance and report weighted path lengths
    #[clap(long)]
    weighted: bool,

    /// Output directory for results
    #[clap(long, default_value = "swarm_results")]
    output_dir: String,

    /// Skip visualization data
    #[clap(long)]
    skip_viz: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn parse_input(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((label, path)) if !label.is_empty() && !path.is_empty() => {
            Ok((label.to_string(), path.to_string()))
        }
        _ => Err(format!("expected LABEL=PATH, got '{}'", raw)),
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let ranges = if args.ranges.is_empty() {
        DEFAULT_RANGES.to_vec()
    } else {
        args.ranges.clone()
    };
    let config = Config::new(ranges, args.weighted, args.threads);
    config.validate()?;

    let num_threads = config.worker_threads();
    log::info!("Using {} worker threads", num_threads);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()?;

    let inputs: Vec<(String, String)> = if args.inputs.is_empty() {
        DEFAULT_INPUTS
            .iter()
            .map(|&(label, path)| (label.to_string(), path.to_string()))
            .collect()
    } else {
        args.inputs.clone()
    };

    log::info!("Starting swarm graph analysis");
    log::info!("Ranges: {:?} (weighted: {})", config.ranges, config.weighted);
    log::info!("Output: {}", args.output_dir);

    std::fs::create_dir_all(&args.output_dir)?;

    // 1. Load topologies
    let mut datasets = Vec::with_capacity(inputs.len());
    for (label, path) in &inputs {
        if datasets.iter().any(|d: &Dataset| &d.label == label) {
            return Err(anyhow!("Density label {} given more than once", label));
        }
        let points = load_point_set(path)?;
        datasets.push(Dataset::new(label.clone(), points));
    }

    // 2. Build and analyze every graph
    let entries = sweep::run_sweep(&datasets, &config)?;

    // 3. Tabulate
    let report = sweep::assemble_report(&entries);
    println!("{}", report);

    // 4. Save results
    storage::save_results(&entries, &report, &args.output_dir)?;

    // 5. Generate visualization data if requested
    if !args.skip_viz {
        viz::generate_visualizations(&entries, &datasets, &args.output_dir)?;
    }

    log::info!("Analysis complete. Results saved to {}", args.output_dir);

    Ok(())
}
