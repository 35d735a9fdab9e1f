use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod args;
mod parsers;


pub use args::{CheckArgs, ExtractArgs, InputArgs, RebalanceArgs, SizeArgs};

#[derive(Debug, Parser)]
#[command(name = "regroup")]
#[command(about = "Regroup LLM theme clustering output into size-bounded sub-groups", version)]
pub struct Cli {
    /// TOML file with `min_size`, `max_size`, `strict_ids` and `[markers]`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Merge response chunks into one grouping summary.
    Extract(ExtractArgs),
    /// Extract, then split every theme into bounded sub-groups.
    Rebalance(RebalanceArgs),
    /// Count a theme document and verify its sub-group sizes.
    Check(CheckArgs),
}
