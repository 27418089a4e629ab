//! Command-line interface for branchbench.

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "branchbench")]
#[command(about = "Benchmark a command across two git branches")]
#[command(version)]
pub struct Cli {
    /// Branch with changes to benchmark
    pub dev: String,

    /// Branch to compare against, typically "develop"
    pub base: String,

    /// Number of runs for each branch (0 fabricates placeholder timings)
    #[arg(long)]
    pub runs: Option<u32>,

    /// Skip git clone and install steps, reusing the existing workspace
    #[arg(short, long)]
    pub cached: bool,

    /// Remove the cloned workspace after reporting
    #[arg(long, conflicts_with = "cached")]
    pub clean: bool,

    /// Path to config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Disable colored report output
    #[arg(long)]
    pub no_color: bool,

    /// Print a JSON summary instead of the table
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply CLI overrides to the configuration.
    ///
    /// CLI arguments take precedence over config file values.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(runs) = self.runs {
            config.benchmark.runs = runs;
        }

        if self.no_color {
            config.report.colors = false;
        }
    }
}
