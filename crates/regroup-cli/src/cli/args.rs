use std::path::PathBuf;

use clap::Args;

use super::parsers::parse_min_one_usize;

#[derive(Debug, Args)]
pub struct InputArgs {
    /// Model response files, processed in order as chunks of one run.
    #[arg(value_name = "FILE")]
    pub inputs: Vec<PathBuf>,
    /// Read one more response chunk from stdin after the files.
    #[arg(long, default_value_t = false)]
    pub stdin: bool,
    /// Drop member ids that are not hyphenated UUIDs.
    #[arg(long, default_value_t = false)]
    pub strict_ids: bool,
}

#[derive(Debug, Args)]
pub struct SizeArgs {
    #[arg(long, value_parser = parse_min_one_usize)]
    pub min_size: Option<usize>,
    #[arg(long, value_parser = parse_min_one_usize)]
    pub max_size: Option<usize>,
}

#[derive(Debug, Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Write the merged-group summary here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct RebalanceArgs {
    #[command(flatten)]
    pub input: InputArgs,
    #[command(flatten)]
    pub sizes: SizeArgs,
    /// Write the theme document here; stdout then receives the run report.
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Write a single placeholder theme when no theme survives.
    #[arg(long, default_value_t = false)]
    pub placeholder_on_empty: bool,
    /// Seed the shuffle for a reproducible grouping.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Theme document previously written by `rebalance`.
    pub document: PathBuf,
    #[command(flatten)]
    pub sizes: SizeArgs,
    /// Exit non-zero when the document violates the bounds.
    #[arg(long, default_value_t = false)]
    pub enforce: bool,
}
