//! CSV ingest and header normalization.
//!
//! This module turns the sales CSV into a `RawTable`: normalized headers plus
//! one row of optional string cells per record. No type coercion happens
//! here; a cell is either present text or missing.
//!
//! Fatal conditions (exit code 2):
//! - the file cannot be opened or read
//! - a record is malformed (bad quoting, more cells than headers)
//! - a required column is absent after normalization

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info};

use crate::domain::{
    COL_AMOUNT, COL_BOXES_SHIPPED, COL_COUNTRY, COL_DATE, COL_PRODUCT, COL_SALES_PERSON, REQUIRED_COLUMNS,
};
use crate::error::AppError;

/// Cell values treated as missing, in addition to empty/whitespace cells.
///
/// This is the usual NA vocabulary of spreadsheet and dataframe exports.
pub const NA_TOKENS: [&str; 18] = [
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A", "#N/A N/A", "#NA",
    "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

/// Positions of the required columns within each row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub sales_person: usize,
    pub country: usize,
    pub product: usize,
    pub date: usize,
    pub amount: usize,
    pub boxes_shipped: usize,
}

/// One input record before cleaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line in the source file (header is line 1).
    pub line: usize,
    /// One entry per header; `None` marks a missing value.
    pub cells: Vec<Option<String>>,
}

impl RawRow {
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn cell(&self, idx: usize) -> Option<&str> {
        self.cells.get(idx).and_then(|c| c.as_deref())
    }
}

/// Whole dataset as loaded from disk.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Header names with spaces removed.
    pub headers: Vec<String>,
    pub columns: ColumnIndex,
    pub rows: Vec<RawRow>,
}

/// Load the CSV at `path` into memory.
pub fn load_table(path: &Path) -> Result<RawTable, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    let table = read_table(file)?;
    info!(
        path = %path.display(),
        rows = table.rows.len(),
        columns = table.headers.len(),
        "loaded sales table"
    );
    Ok(table)
}

/// Parse a CSV stream into a `RawTable`.
pub fn read_table<R: Read>(input: R) -> Result<RawTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        // Cells keep their padding: `Ann` and `Ann ` are distinct values.
        .trim(csv::Trim::Headers)
        .from_reader(input);

    let raw_headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let headers: Vec<String> = raw_headers.iter().map(normalize_header_name).collect();
    let header_map = build_header_map(&headers)?;
    let columns = resolve_columns(&header_map)?;
    debug!(?headers, "normalized headers");

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(|e| AppError::input(format!("Malformed CSV record: {e}")))?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(idx + 2);

        if record.len() > headers.len() {
            return Err(AppError::input(format!(
                "Malformed CSV at line {line}: expected {} fields, found {}",
                headers.len(),
                record.len()
            )));
        }

        rows.push(RawRow {
            line,
            cells: to_cells(&record, headers.len()),
        });
    }

    Ok(RawTable { headers, columns, rows })
}

/// Remove every space from a header so it can be used as a plain identifier.
pub fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    name.trim_start_matches('\u{feff}').replace(' ', "")
}

/// Whether a (trimmed) cell counts as a missing value.
pub fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    cell.is_empty() || NA_TOKENS.contains(&cell)
}

fn build_header_map(headers: &[String]) -> Result<HashMap<&str, usize>, AppError> {
    let mut map = HashMap::with_capacity(headers.len());
    for (idx, name) in headers.iter().enumerate() {
        if map.insert(name.as_str(), idx).is_some() {
            return Err(AppError::input(format!(
                "Duplicate column after header normalization: `{name}`"
            )));
        }
    }
    Ok(map)
}

fn resolve_columns(header_map: &HashMap<&str, usize>) -> Result<ColumnIndex, AppError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !header_map.contains_key(c))
        .collect();
    if !missing.is_empty() {
        return Err(AppError::input(format!(
            "Missing required column(s): {}",
            missing
                .iter()
                .map(|c| format!("`{c}`"))
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    let col = |name: &str| header_map[name];
    Ok(ColumnIndex {
        sales_person: col(COL_SALES_PERSON),
        country: col(COL_COUNTRY),
        product: col(COL_PRODUCT),
        date: col(COL_DATE),
        amount: col(COL_AMOUNT),
        boxes_shipped: col(COL_BOXES_SHIPPED),
    })
}

fn to_cells(record: &StringRecord, width: usize) -> Vec<Option<String>> {
    // Short records are padded with missing cells.
    (0..width)
        .map(|i| record.get(i).filter(|s| !is_missing(s)).map(str::to_string))
        .collect()
}
