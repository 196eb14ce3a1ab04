//! Cleaning: from a `RawTable` to typed `SaleRecord`s.
//!
//! Steps, in order:
//! 1. drop rows with any missing cell (before any coercion)
//! 2. drop exact duplicate rows, keeping the first occurrence
//! 3. parse `Date` with the fixed `DD-Mon-YY` pattern (fatal on mismatch)
//! 4. coerce `Amount` after stripping the currency symbol (missing on failure)
//! 5. coerce `BoxesShipped` to a whole number (missing on failure)
//! 6. derive the month key from the parsed date
//!
//! A bad date aborts the run while a bad amount or box count only drops that
//! row out of the corresponding sum. The asymmetry is kept for compatibility
//! with existing reports.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{DATE_FORMAT, SaleRecord, YearMonth};
use crate::error::AppError;
use crate::io::ingest::{ColumnIndex, RawRow, RawTable};

pub mod amount;

pub use amount::parse_amount;

/// Counters describing what cleaning did to the input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub rows_read: usize,
    pub incomplete_dropped: usize,
    pub duplicates_removed: usize,
    /// Rows kept with a missing amount.
    pub amount_coercion_failures: usize,
    /// Rows kept with a missing box count.
    pub boxes_coercion_failures: usize,
    pub rows_kept: usize,
}

/// Cleaning output: records in input order + counters.
#[derive(Debug, Clone)]
pub struct CleanedData {
    pub records: Vec<SaleRecord>,
    pub stats: CleanStats,
}

/// Run every cleaning step over the loaded table.
pub fn clean_table(table: RawTable) -> Result<CleanedData, AppError> {
    let rows_read = table.rows.len();
    let columns = table.columns;

    let (rows, incomplete_dropped) = drop_incomplete(table.rows);
    let (rows, duplicates_removed) = deduplicate(rows);

    let mut records = Vec::with_capacity(rows.len());
    let mut amount_coercion_failures = 0usize;
    let mut boxes_coercion_failures = 0usize;
    for row in &rows {
        let record = to_record(row, &columns)?;
        if record.amount.is_none() {
            amount_coercion_failures += 1;
            debug!(line = row.line, raw = ?row.cell(columns.amount), "amount coerced to missing");
        }
        if record.boxes_shipped.is_none() {
            boxes_coercion_failures += 1;
            debug!(line = row.line, raw = ?row.cell(columns.boxes_shipped), "box count coerced to missing");
        }
        records.push(record);
    }

    let stats = CleanStats {
        rows_read,
        incomplete_dropped,
        duplicates_removed,
        amount_coercion_failures,
        boxes_coercion_failures,
        rows_kept: records.len(),
    };
    info!(
        rows_read,
        incomplete_dropped,
        duplicates_removed,
        rows_kept = stats.rows_kept,
        "cleaned sales table"
    );
    if amount_coercion_failures > 0 {
        warn!(count = amount_coercion_failures, "some amounts could not be parsed and are treated as missing");
    }
    if boxes_coercion_failures > 0 {
        warn!(count = boxes_coercion_failures, "some box counts could not be parsed and are treated as missing");
    }

    if records.is_empty() {
        return Err(AppError::data("No rows remain after cleaning."));
    }

    Ok(CleanedData { records, stats })
}

/// Remove rows containing any missing cell. Returns the kept rows and the drop count.
pub fn drop_incomplete(rows: Vec<RawRow>) -> (Vec<RawRow>, usize) {
    let before = rows.len();
    let kept: Vec<RawRow> = rows.into_iter().filter(RawRow::is_complete).collect();
    let dropped = before - kept.len();
    (kept, dropped)
}

/// Remove rows whose cells all equal an earlier row's. Returns the kept rows and the removal count.
pub fn deduplicate(rows: Vec<RawRow>) -> (Vec<RawRow>, usize) {
    let before = rows.len();
    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(before);
    let kept: Vec<RawRow> = rows
        .into_iter()
        .filter(|row| seen.insert(row.cells.clone()))
        .collect();
    let removed = before - kept.len();
    (kept, removed)
}

/// Parse a `Date` cell, e.g. `04-Jan-22`.
pub fn parse_sale_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| format!("Invalid date '{raw}'. Expected DD-Mon-YY (e.g. 04-Jan-22)."))
}

/// Parse a `BoxesShipped` cell as a whole number.
///
/// Signed values are accepted as-is, and so are integral decimals like `5.0`
/// (spreadsheet exports). Anything else is `None`.
pub fn parse_boxes(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(n);
    }
    let v = s.parse::<f64>().ok().filter(|v| v.is_finite() && v.fract() == 0.0)?;
    // Outside this range the cast would saturate.
    (v >= i64::MIN as f64 && v < i64::MAX as f64).then_some(v as i64)
}

fn to_record(row: &RawRow, columns: &ColumnIndex) -> Result<SaleRecord, AppError> {
    let row_error = |msg: String| AppError::data(format!("Line {}: {msg}", row.line));
    let cell = |idx: usize| row.cell(idx).unwrap_or_default();

    let date = parse_sale_date(cell(columns.date)).map_err(row_error)?;

    Ok(SaleRecord {
        sales_person: cell(columns.sales_person).to_string(),
        country: cell(columns.country).to_string(),
        product: cell(columns.product).to_string(),
        date,
        amount: parse_amount(cell(columns.amount)),
        boxes_shipped: parse_boxes(cell(columns.boxes_shipped)),
        month: YearMonth::from_date(date),
    })
}
