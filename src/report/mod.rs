//! Reporting: assemble the summary figures and format them for the terminal.
//!
//! Computation lives in `aggregate`; this module only decides what goes into
//! the report and (in `format`) how it reads.

use crate::aggregate::{self, MonthlyTotal, ValueCount};
use crate::clean::{CleanStats, CleanedData};
use crate::error::AppError;

pub mod format;

pub use format::{format_clean_stats, format_report};

/// Everything the text report, charts and exports need.
#[derive(Debug, Clone)]
pub struct SalesSummary {
    pub total_boxes_shipped: i64,
    pub top_sales_person: String,
    pub top_products: Vec<ValueCount>,
    /// Requested length of the top-products list (the list may be shorter).
    pub top_n: usize,
    pub peak: MonthlyTotal,
    /// Chronological monthly totals.
    pub monthly: Vec<MonthlyTotal>,
    /// Non-missing amounts in record order (histogram input).
    pub amounts: Vec<f64>,
    pub clean_stats: CleanStats,
}

/// Compute the report figures for a cleaned dataset.
pub fn summarize(cleaned: &CleanedData, top_n: usize) -> Result<SalesSummary, AppError> {
    let records = &cleaned.records;

    let monthly = aggregate::monthly_totals(records);
    let peak = *aggregate::peak_month(&monthly).ok_or_else(|| AppError::data("No months to aggregate."))?;

    let top_sales_person = aggregate::mode(records.iter().map(|r| r.sales_person.as_str()))
        .ok_or_else(|| AppError::data("No sales persons to rank."))?
        .to_string();

    let top_products = aggregate::top_counts(records.iter().map(|r| r.product.as_str()), top_n);

    Ok(SalesSummary {
        total_boxes_shipped: aggregate::total_boxes_shipped(records),
        top_sales_person,
        top_products,
        top_n,
        peak,
        monthly,
        amounts: records.iter().filter_map(|r| r.amount).collect(),
        clean_stats: cleaned.stats,
    })
}
