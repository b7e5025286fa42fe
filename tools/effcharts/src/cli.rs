//! Command-line interface definitions for effcharts.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Browser efficiency chart generator.
#[derive(Parser)]
#[command(name = "effcharts", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Suppress sample warnings; show only errors and the final summary.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose output with per-chart lines and timings.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Extract measures from a run directory and draw comparison charts.
    Report(ReportArgs),
    /// Place same-named charts from two report directories side by side.
    Compare(CompareArgs),
}

/// Arguments for the `report` subcommand.
#[derive(Parser)]
pub struct ReportArgs {
    /// Directory holding the exported measurement files.
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Directory for charts (defaults to the input directory).
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Engine configuration file (defaults to `<input>/effcharts.toml`).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Also write a JSON sidecar with the bars of every chart.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `compare` subcommand.
#[derive(Parser)]
pub struct CompareArgs {
    /// Report directory drawn on the left.
    #[arg(long)]
    pub left: PathBuf,

    /// Report directory drawn on the right.
    #[arg(long)]
    pub right: PathBuf,

    /// Directory for the merged charts.
    #[arg(long, short = 'o')]
    pub output: PathBuf,
}
