//! Terminal text for the sales report.
//!
//! Keeping all formatting here means output changes stay localized and the
//! exact text can be asserted in tests.

use crate::aggregate::ValueCount;
use crate::clean::CleanStats;
use crate::domain::ChartStyle;
use crate::report::SalesSummary;

/// Format the report in its fixed order: boxes, top sales person, top products, peak month.
///
/// `style` only picks the noun of the product block (`products` or `chocolate brands`).
pub fn format_report(summary: &SalesSummary, style: ChartStyle) -> String {
    let mut out = String::new();

    out.push_str(&format!("Total boxes shipped: {}\n", summary.total_boxes_shipped));
    out.push_str(&format!("Top sales person: {}\n", summary.top_sales_person));
    out.push_str(&format!(
        "Top {} {}:\n",
        summary.top_n,
        style.product_noun().to_lowercase()
    ));
    out.push_str(&format_counts(&summary.top_products));
    out.push_str(&format!(
        "Most profitable month: {} - Total profit: {:.2}\n",
        summary.peak.month.long_name(),
        summary.peak.total
    ));

    out
}

/// Format the cleaning counters (shown with `--verbose`).
pub fn format_clean_stats(stats: &CleanStats) -> String {
    let mut out = String::new();
    out.push_str("\nCleaning:\n");
    out.push_str(&format!("- rows read:          {}\n", stats.rows_read));
    out.push_str(&format!("- incomplete dropped: {}\n", stats.incomplete_dropped));
    out.push_str(&format!("- duplicates removed: {}\n", stats.duplicates_removed));
    out.push_str(&format!("- missing amounts:    {}\n", stats.amount_coercion_failures));
    out.push_str(&format!("- missing box counts: {}\n", stats.boxes_coercion_failures));
    out.push_str(&format!("- rows kept:          {}\n", stats.rows_kept));
    out
}

fn format_counts(rows: &[ValueCount]) -> String {
    let name_width = rows.iter().map(|r| r.value.chars().count()).max().unwrap_or(0);
    let count_width = rows.iter().map(|r| r.count.to_string().len()).max().unwrap_or(0);

    let mut out = String::new();
    for r in rows {
        out.push_str(&format!(
            "{:<name_width$}    {:>count_width$}\n",
            r.value, r.count
        ));
    }
    out
}
