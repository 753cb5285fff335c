//! `pairsplit`: split an activity CSV into train/val/C1/C2/C3.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use pairsplit::binarize::{binarize_column, ActivityLevels};
use pairsplit::table::Table;
use pairsplit::{DuplicatePolicy, SplitConfig, Splitter};

#[derive(Parser)]
#[command(name = "pairsplit")]
#[command(about = "Leakage-free protein–substrate dataset splits", long_about = None)]
struct Cli {
    /// Input CSV with one row per observed protein–substrate pair
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV: the input plus a split column
    #[arg(short, long)]
    output: PathBuf,

    /// JSON config file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Derive the label column from this multi-level activity column first
    #[arg(long, value_name = "COLUMN")]
    binarize_from: Option<String>,

    /// Write split statistics as JSON
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Name of the split column in the output
    #[arg(long, default_value = "split")]
    split_col: String,

    #[arg(long)]
    protein_col: Option<String>,

    #[arg(long)]
    substrate_col: Option<String>,

    #[arg(long)]
    label_col: Option<String>,

    #[arg(long)]
    train_frac: Option<f64>,

    #[arg(long)]
    test_frac: Option<f64>,

    /// Seed for the single RNG used by the whole split
    #[arg(long, env = "PAIRSPLIT_SEED")]
    seed: Option<u64>,

    /// Minimum number of C2 edges
    #[arg(long)]
    min_c2: Option<usize>,

    /// Rebalancing iteration budget (default: number of nodes)
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Fail on duplicated pairs with conflicting labels instead of keeping the last one
    #[arg(long)]
    reject_duplicates: bool,
}

impl Cli {
    fn config(&self) -> Result<SplitConfig> {
        let mut cfg = match &self.config {
            Some(path) => SplitConfig::from_json_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => SplitConfig::default(),
        };
        if let Some(v) = &self.protein_col { cfg.protein_col = v.clone(); }
        if let Some(v) = &self.substrate_col { cfg.substrate_col = v.clone(); }
        if let Some(v) = &self.label_col { cfg.label_col = v.clone(); }
        if let Some(v) = self.train_frac { cfg.train_frac = v; }
        if let Some(v) = self.test_frac { cfg.test_frac = v; }
        if let Some(v) = self.seed { cfg.random_state = v; }
        if let Some(v) = self.min_c2 { cfg.min_c2_size = v; }
        if self.max_iterations.is_some() { cfg.max_rebalance_iterations = self.max_iterations; }
        if self.reject_duplicates { cfg.duplicate_policy = DuplicatePolicy::Reject; }
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.config()?;
    let splitter = Splitter::new(config.clone())?;

    let mut table = Table::from_csv_path(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    if let Some(source) = &cli.binarize_from {
        binarize_column(&mut table, source, &config.label_col, &ActivityLevels::default())?;
    }

    let interactions = table.interactions(&config.protein_col, &config.substrate_col, &config.label_col)?;
    tracing::info!(rows = interactions.len(), input = %cli.input.display(), "interactions loaded");

    let outcome = splitter.split(&interactions)?;

    let report = outcome.report(&interactions);
    report.log();
    if let Some(path) = &cli.report {
        std::fs::write(path, report.to_json_pretty()?)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    table
        .with_split_column(&cli.split_col, &outcome.rows)?
        .to_csv_path(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    tracing::info!(output = %cli.output.display(), "split written");

    Ok(())
}
