//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and sets up logging
//! - runs the load/clean/aggregate pipeline
//! - prints the report
//! - renders charts (SVG files, optionally the terminal viewer)
//! - writes optional exports

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Command, ReportArgs};
use crate::domain::ReportConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `sales` binary.
pub fn run() -> Result<(), AppError> {
    // `sales` and `sales -i file.csv` behave like `sales report ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let (args, mode) = match cli.command {
        Command::Report(args) => (args, OutputMode::Full),
        Command::Summary(args) => (args, OutputMode::TextOnly),
        Command::Charts(args) => (args, OutputMode::ChartsOnly),
    };

    init_logging(args.verbose);
    let config = report_config_from_args(&args, mode);
    execute(&config, mode)
}

/// Which outputs a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Full,
    TextOnly,
    ChartsOnly,
}

/// Run the pipeline and emit every configured output.
pub fn execute(config: &ReportConfig, mode: OutputMode) -> Result<(), AppError> {
    let run = pipeline::run_report(config)?;

    if mode != OutputMode::ChartsOnly {
        print!("{}", crate::report::format_report(&run.summary, config.style));
        if config.show_clean_stats {
            print!("{}", crate::report::format_clean_stats(&run.summary.clean_stats));
        }
    }

    if config.render_charts {
        let figures = crate::plot::build_figures(&run.summary, config.style, config.bins);
        let theme = crate::plot::Theme::file(config.style);
        let written = crate::plot::write_figures(&config.out_dir, &figures, &theme)?;
        info!(count = written.len(), dir = %config.out_dir.display(), "charts written");

        if config.view {
            crate::tui::show_figures(&figures, config.style)?;
        }
    }

    if let Some(path) = &config.export_monthly {
        crate::io::export::write_monthly_csv(path, &run.summary.monthly)?;
    }
    if let Some(path) = &config.export_summary {
        crate::io::export::write_summary_json(path, &run.summary)?;
    }

    Ok(())
}

pub fn report_config_from_args(args: &ReportArgs, mode: OutputMode) -> ReportConfig {
    ReportConfig {
        input: args.input.clone(),
        style: args.style,
        top_n: usize::from(args.top),
        bins: usize::from(args.bins),
        out_dir: args.out_dir.clone(),
        render_charts: mode != OutputMode::TextOnly && !args.no_charts,
        view: args.view,
        export_monthly: args.export_monthly.clone(),
        export_summary: args.export_summary.clone(),
        show_clean_stats: args.verbose > 0,
    }
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // A subscriber may already be installed (tests); keep it.
    let _ = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Rewrite argv so `sales` defaults to `sales report`.
///
/// Rules:
/// - `sales`                      -> `sales report`
/// - `sales -i data.csv ...`      -> `sales report -i data.csv ...`
/// - `sales --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("report".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "report" | "summary" | "charts");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "report".to_string());
        return argv;
    }

    argv
}
