//! Export the monthly series (CSV) and the full summary (JSON).
//!
//! Both are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::aggregate::{MonthlyTotal, ValueCount};
use crate::clean::CleanStats;
use crate::error::AppError;
use crate::report::SalesSummary;

#[derive(Debug, Serialize)]
struct MonthlyRow {
    month: String,
    total_amount: f64,
    rows: usize,
    amount_rows: usize,
}

impl From<&MonthlyTotal> for MonthlyRow {
    fn from(m: &MonthlyTotal) -> Self {
        Self {
            month: m.month.to_string(),
            total_amount: m.total,
            rows: m.rows,
            amount_rows: m.amount_rows,
        }
    }
}

#[derive(Debug, Serialize)]
struct PeakMonth {
    month: String,
    name: String,
    total_amount: f64,
}

/// JSON shape of `SalesSummary`.
#[derive(Debug, Serialize)]
struct SummaryFile<'a> {
    tool: &'static str,
    total_boxes_shipped: i64,
    top_sales_person: &'a str,
    top_products: &'a [ValueCount],
    peak_month: PeakMonth,
    monthly: Vec<MonthlyRow>,
    cleaning: CleanStats,
}

/// Write the chronological monthly series to a CSV file.
pub fn write_monthly_csv(path: &Path, monthly: &[MonthlyTotal]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::input(format!("Failed to create monthly CSV '{}': {e}", path.display())))?;

    for m in monthly {
        writer
            .serialize(MonthlyRow::from(m))
            .map_err(|e| AppError::input(format!("Failed to write monthly CSV row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::input(format!("Failed to flush monthly CSV: {e}")))?;

    info!(path = %path.display(), months = monthly.len(), "exported monthly series");
    Ok(())
}

/// Write the summary as pretty-printed JSON.
pub fn write_summary_json(path: &Path, summary: &SalesSummary) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::input(format!("Failed to create summary JSON '{}': {e}", path.display())))?;

    let doc = SummaryFile {
        tool: "sales",
        total_boxes_shipped: summary.total_boxes_shipped,
        top_sales_person: &summary.top_sales_person,
        top_products: &summary.top_products,
        peak_month: PeakMonth {
            month: summary.peak.month.to_string(),
            name: summary.peak.month.long_name(),
            total_amount: summary.peak.total,
        },
        monthly: summary.monthly.iter().map(MonthlyRow::from).collect(),
        cleaning: summary.clean_stats,
    };

    serde_json::to_writer_pretty(file, &doc)
        .map_err(|e| AppError::input(format!("Failed to write summary JSON: {e}")))?;

    info!(path = %path.display(), "exported summary");
    Ok(())
}
