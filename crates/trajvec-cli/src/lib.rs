//! trajvec Command Line Driver
//!
//! Loads trajectory records from a JSON source, builds one feature vector per
//! record and writes the batch as JSON or CSV.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use config::{Config, Environment, File};
use feature_engine::{build_batch, feature_names, FeatureConfig, FeatureVector};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;
use trajectory::{DataSource, RowLayout};

/// Prefix of environment variables overriding config keys (`TRAJVEC_THRESHOLD`)
pub const ENV_PREFIX: &str = "TRAJVEC";

/// Output encoding of the feature vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

/// Command line arguments structure.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Compute fixed-layout feature vectors from trajectory records.")]
pub struct Args {
    /// Records file: a JSON array or JSON Lines, each record with a `traj_data` field
    #[arg()]
    pub input: PathBuf,

    /// Config file (toml, yaml or json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Velocity threshold for stop rate and velocity change rate
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Row layout of `traj_data`: xy, xyt, xyz or xyzt
    #[arg(long)]
    pub layout: Option<RowLayout>,

    /// Skip records that fail instead of aborting the batch
    #[arg(long)]
    pub skip_invalid: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Maximum log level written to stderr
    #[arg(long, default_value = "info")]
    pub log_level: Level,
}

/// Initialize logging to stderr
pub fn init_logging(level: Level) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Resolve the feature config: defaults, config file, environment, then flags
pub fn load_config(args: &Args) -> anyhow::Result<FeatureConfig> {
    let mut builder = Config::builder();
    if let Some(path) = &args.config {
        builder = builder.add_source(File::from(path.as_path()));
    }

    builder = builder
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .set_override_option("threshold", args.threshold)?
        .set_override_option("layout", args.layout.map(RowLayout::as_str))?;
    if args.skip_invalid {
        builder = builder.set_override("failure_policy", "skip")?;
    }

    let config: FeatureConfig = builder
        .build()
        .context("Failed to load configuration")?
        .try_deserialize()
        .context("Invalid configuration")?;
    config.validate()?;

    debug!("Feature config: {:?}", config);
    Ok(config)
}

/// Build the feature vectors of every record the source selects
pub fn run<S: DataSource + ?Sized>(
    source: &S,
    config: &FeatureConfig,
) -> anyhow::Result<Vec<FeatureVector>> {
    let records = source
        .get_selected_data()
        .context("Failed to load trajectory records")?;
    let vectors = build_batch(&records, config)?;
    Ok(vectors)
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    feature_names: Vec<String>,
    vectors: &'a [FeatureVector],
}

/// Write vectors in the requested format
pub fn write_output<W: Write>(
    out: &mut W,
    vectors: &[FeatureVector],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => write_json(out, vectors),
        OutputFormat::Csv => write_csv(out, vectors),
    }
}

/// JSON object with the field names and one entry per vector; NaN becomes null
pub fn write_json<W: Write>(out: &mut W, vectors: &[FeatureVector]) -> anyhow::Result<()> {
    let output = JsonOutput {
        feature_names: feature_names(),
        vectors,
    };
    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)?;
    Ok(())
}

/// Header row then one row per vector, `record_index` first
pub fn write_csv<W: Write>(out: &mut W, vectors: &[FeatureVector]) -> anyhow::Result<()> {
    writeln!(out, "record_index,{}", feature_names().join(","))?;
    for vector in vectors {
        let index = vector
            .record_index
            .map(|i| i.to_string())
            .unwrap_or_default();
        let values: Vec<String> = vector.values.iter().map(f64::to_string).collect();
        writeln!(out, "{},{}", index, values.join(","))?;
    }
    Ok(())
}
