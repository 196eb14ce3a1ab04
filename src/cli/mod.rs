//! Command-line parsing for the sales report.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline; `app` turns the parsed arguments into a `ReportConfig`.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::{ChartStyle, DEFAULT_INPUT};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sales", version, about = "Sales CSV cleaner, summary report and charts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the report and render the charts (default).
    Report(ReportArgs),
    /// Print the report only.
    Summary(ReportArgs),
    /// Render the charts only.
    Charts(ReportArgs),
}

/// Options shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    /// Sales CSV to load.
    #[arg(short, long, value_name = "CSV", default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Chart styling variant.
    #[arg(long, value_enum, default_value_t = ChartStyle::Chocolate)]
    pub style: ChartStyle,

    /// Number of products in the top list.
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..))]
    pub top: u16,

    /// Histogram bins for the amount distribution.
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    pub bins: u16,

    /// Directory for the SVG charts.
    #[arg(long, value_name = "DIR", default_value = "charts")]
    pub out_dir: PathBuf,

    /// Skip chart rendering.
    #[arg(long)]
    pub no_charts: bool,

    /// Show each chart in the terminal, waiting for a key press between charts.
    #[arg(long)]
    pub view: bool,

    /// Export the monthly series to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_monthly: Option<PathBuf>,

    /// Export the summary to JSON.
    #[arg(long, value_name = "JSON")]
    pub export_summary: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug); also prints cleaning stats.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
