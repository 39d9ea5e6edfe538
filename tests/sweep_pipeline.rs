use std::fs;
use std::io::Write;
use swarm_graph_analyzer::{
    config::Config,
    data::load_point_set,
    report::{Cell, Measure},
    storage,
    sweep::{assemble_report, run_sweep, Dataset},
    viz,
};

fn write_topology(dir: &tempfile::TempDir, name: &str, rows: &[(i64, f64, f64, f64)]) -> String {
    let path = dir.path().join(name);
    let mut file = fs::File::create(&path).expect("failed to create topology file");
    writeln!(file, "sat_id,x,y,z").unwrap();
    for (id, x, y, z) in rows {
        writeln!(file, "{},{},{},{}", id, x, y, z).unwrap();
    }
    path.to_str().unwrap().to_string()
}

#[test]
fn csv_to_report_and_artifacts() {
    let dir = tempfile::tempdir().unwrap();

    // Square of side 10 km: a 4-cycle below the diagonal, complete at and above it
    let square = write_topology(
        &dir,
        "topology_square.csv",
        &[
            (0, 0.0, 0.0, 0.0),
            (1, 10_000.0, 0.0, 0.0),
            (2, 10_000.0, 10_000.0, 0.0),
            (3, 0.0, 10_000.0, 0.0),
        ],
    );
    // Collinear satellites at 0, 100 and 251 km
    let line = write_topology(
        &dir,
        "topology_line.csv",
        &[
            (0, 0.0, 0.0, 0.0),
            (1, 100_000.0, 0.0, 0.0),
            (2, 251_000.0, 0.0, 0.0),
        ],
    );

    let datasets = vec![
        Dataset::new("square", load_point_set(&square).expect("square loads")),
        Dataset::new("line", load_point_set(&line).expect("line loads")),
    ];

    let config = Config::new(vec![10_000.0, 15_000.0, 150_000.0], true, 2);
    let entries = run_sweep(&datasets, &config).expect("sweep succeeds");
    assert_eq!(entries.len(), 6);

    let report = assemble_report(&entries);

    let cliques = report.table(Measure::CliqueCount).unwrap();
    assert_eq!(cliques.get("square", 10_000.0), Some(Cell::Count(4)));
    assert_eq!(cliques.get("square", 15_000.0), Some(Cell::Count(1)));

    let clustering = report.table(Measure::MeanClustering).unwrap();
    assert_eq!(clustering.get("square", 10_000.0), Some(Cell::Value(0.0)));
    assert_eq!(clustering.get("square", 15_000.0), Some(Cell::Value(1.0)));

    let components = report.table(Measure::ComponentCount).unwrap();
    assert_eq!(components.get("line", 10_000.0), Some(Cell::Count(3)));
    assert_eq!(components.get("line", 150_000.0), Some(Cell::Count(2)));

    let mean_path = report.table(Measure::MeanPathLength).unwrap();
    assert_eq!(mean_path.get("line", 10_000.0), Some(Cell::NotApplicable));
    assert_eq!(mean_path.get("line", 150_000.0), Some(Cell::Value(1.0)));

    let weighted = report.table(Measure::MeanWeightedPathLength).unwrap();
    assert_eq!(weighted.get("line", 150_000.0), Some(Cell::Value(1.0e10)));

    let output = dir.path().join("results");
    let output = output.to_str().unwrap();
    storage::save_results(&entries, &report, output).expect("results saved");
    viz::generate_visualizations(&entries, &datasets, output).expect("viz saved");

    assert!(dir.path().join("results/summary.json").exists());
    assert!(dir.path().join("results/metrics/metrics_line_150000.json").exists());
    assert!(dir
        .path()
        .join("results/visualizations/networks/square_15000.graphml")
        .exists());

    let printed = report.to_string();
    assert!(printed.contains("Maximal cliques :"));
}

#[test]
fn empty_topology_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let empty = write_topology(&dir, "topology_empty.csv", &[]);

    let points = load_point_set(&empty).expect("header-only file loads");
    assert!(points.is_empty());

    let entries = run_sweep(&[Dataset::new("empty", points)], &Config::default()).unwrap();
    for entry in &entries {
        assert_eq!(entry.metrics.node_count(), 0);
        assert!(entry.metrics.degree_histogram.is_empty());
        assert!(entry.metrics.path_lengths.is_empty());
    }

    let report = assemble_report(&entries);
    let mean_path = report.table(Measure::MeanPathLength).unwrap();
    assert_eq!(mean_path.get("empty", 20_000.0), Some(Cell::NotApplicable));
}

#[test]
fn sparse_weighted_sweep_keeps_weighted_table() {
    let dir = tempfile::tempdir().unwrap();
    let sparse = write_topology(
        &dir,
        "topology_sparse.csv",
        &[(0, 0.0, 0.0, 0.0), (1, 1000.0, 0.0, 0.0), (2, 2000.0, 0.0, 0.0)],
    );

    let points = load_point_set(&sparse).unwrap();
    let entries = run_sweep(&[Dataset::new("sparse", points)], &Config::new(vec![10.0], true, 1)).unwrap();
    let report = assemble_report(&entries);

    assert_eq!(report.tables.len(), Measure::STANDARD.len() + 1);
    let weighted = report.table(Measure::MeanWeightedPathLength).unwrap();
    assert_eq!(weighted.get("sparse", 10.0), Some(Cell::NotApplicable));
}
