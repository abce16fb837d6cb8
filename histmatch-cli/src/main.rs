use clap::Parser;
use histmatch::io::FsImageSource;
use histmatch::{
    compare_distances, DistanceComparison, DistanceKind, HistogramKind, MatchConfig, Matcher,
    ObjectIdLabel, RpcConfig,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "HistMatch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum HistTypeConfig {
    Grayvalue,
    Rgb,
    Rg,
    Dxdy,
}

impl From<HistTypeConfig> for HistogramKind {
    fn from(value: HistTypeConfig) -> Self {
        match value {
            HistTypeConfig::Grayvalue => HistogramKind::GrayValue,
            HistTypeConfig::Rgb => HistogramKind::Rgb,
            HistTypeConfig::Rg => HistogramKind::Rg,
            HistTypeConfig::Dxdy => HistogramKind::DxDy,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum DistTypeConfig {
    Chi2,
    Intersect,
    L2,
}

impl From<DistTypeConfig> for DistanceKind {
    fn from(value: DistTypeConfig) -> Self {
        match value {
            DistTypeConfig::Chi2 => DistanceKind::Chi2,
            DistTypeConfig::Intersect => DistanceKind::Intersect,
            DistTypeConfig::L2 => DistanceKind::L2,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    model_list: String,
    query_list: String,
    image_root: Option<String>,
    hist_type: HistTypeConfig,
    num_bins: usize,
    dist_types: Vec<DistTypeConfig>,
    neighbors: usize,
    num_thresholds: usize,
    parallel: bool,
    output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = MatchConfig::default();
        Self {
            model_list: String::new(),
            query_list: String::new(),
            image_root: None,
            hist_type: HistTypeConfig::Rgb,
            num_bins: cfg.num_bins,
            dist_types: vec![
                DistTypeConfig::Chi2,
                DistTypeConfig::Intersect,
                DistTypeConfig::L2,
            ],
            neighbors: 5,
            num_thresholds: RpcConfig::default().num_thresholds,
            parallel: cfg.parallel,
            output_path: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct NeighborRecord {
    model: String,
    distance: f32,
}

#[derive(Debug, Serialize)]
struct QueryRecord {
    query: String,
    best_model: String,
    label: u32,
    neighbors: Vec<NeighborRecord>,
}

#[derive(Debug, Serialize)]
struct CurveRecord {
    one_minus_precision: Vec<f32>,
    recall: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct DistanceRecord {
    dist_type: &'static str,
    correct: usize,
    recognition_rate: f32,
    queries: Vec<QueryRecord>,
    curve: CurveRecord,
}

#[derive(Debug, Serialize)]
struct Output {
    hist_type: &'static str,
    num_bins: usize,
    num_models: usize,
    num_queries: usize,
    results: Vec<DistanceRecord>,
}

/// Reads one image path per non-empty line.
fn read_list(path: &str) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path).map_err(|err| format!("{path}: {err}"))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn distance_record(
    cmp: &DistanceComparison,
    models: &[PathBuf],
    queries: &[PathBuf],
    neighbors: usize,
) -> Result<DistanceRecord, Box<dyn std::error::Error>> {
    let outcome = &cmp.outcome;
    let mut records = Vec::with_capacity(queries.len());
    for (query, path) in queries.iter().enumerate() {
        let nearest = outcome
            .neighbors(query, neighbors)?
            .into_iter()
            .map(|n| NeighborRecord {
                model: display(&models[n.model]),
                distance: n.distance,
            })
            .collect();
        records.push(QueryRecord {
            query: display(path),
            best_model: display(&models[outcome.best_index()[query]]),
            label: outcome.labels()[query],
            neighbors: nearest,
        });
    }
    let (one_minus_precision, recall) = cmp.curve.plot_series();
    Ok(DistanceRecord {
        dist_type: cmp.dist.name(),
        correct: outcome.correct_count(),
        recognition_rate: outcome.recognition_rate(),
        queries: records,
        curve: CurveRecord {
            one_minus_precision,
            recall,
        },
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("histmatch=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.model_list.is_empty() || config.query_list.is_empty() {
        return Err("model_list and query_list must be set in the config".into());
    }
    if config.dist_types.is_empty() {
        return Err("dist_types must name at least one distance".into());
    }

    let models = read_list(&config.model_list)?;
    let queries = read_list(&config.query_list)?;
    let source = match &config.image_root {
        Some(root) => FsImageSource::with_root(root),
        None => FsImageSource::new(),
    };

    let matcher = Matcher::new(MatchConfig {
        hist: config.hist_type.into(),
        num_bins: config.num_bins,
        parallel: config.parallel,
        ..MatchConfig::default()
    })?;
    let dists: Vec<DistanceKind> = config.dist_types.iter().map(|&d| d.into()).collect();
    let rpc = RpcConfig {
        num_thresholds: config.num_thresholds,
    };
    let comparisons = compare_distances(
        &matcher,
        &source,
        &models,
        &queries,
        &dists,
        &rpc,
        &ObjectIdLabel,
    )?;

    let results = comparisons
        .iter()
        .map(|cmp| distance_record(cmp, &models, &queries, config.neighbors))
        .collect::<Result<Vec<_>, _>>()?;
    let output = Output {
        hist_type: matcher.config().hist.name(),
        num_bins: config.num_bins,
        num_models: models.len(),
        num_queries: queries.len(),
        results,
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
