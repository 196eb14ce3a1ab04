//! The load → clean → aggregate workflow shared by every subcommand.
//!
//! Presentation (printing, charts, exports) stays in `app`; this module only
//! produces data.

use crate::clean::{CleanedData, clean_table};
use crate::domain::ReportConfig;
use crate::error::AppError;
use crate::io::ingest::{RawTable, load_table};
use crate::report::{SalesSummary, summarize};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub cleaned: CleanedData,
    pub summary: SalesSummary,
}

/// Load the configured CSV and compute the summary.
pub fn run_report(config: &ReportConfig) -> Result<RunOutput, AppError> {
    let table = load_table(&config.input)?;
    run_report_on_table(table, config)
}

/// Compute the summary for an already loaded table.
pub fn run_report_on_table(table: RawTable, config: &ReportConfig) -> Result<RunOutput, AppError> {
    let cleaned = clean_table(table)?;
    let summary = summarize(&cleaned, config.top_n)?;
    tracing::info!(
        months = summary.monthly.len(),
        peak = %summary.peak.month,
        "aggregated sales"
    );
    Ok(RunOutput { cleaned, summary })
}
