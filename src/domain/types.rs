//! Shared domain types.
//!
//! Records are produced once by the cleaning stage and then only read by the
//! aggregation, reporting and plotting stages.

use std::fmt;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Column names after header normalization (spaces removed).
pub const COL_SALES_PERSON: &str = "SalesPerson";
pub const COL_COUNTRY: &str = "Country";
pub const COL_PRODUCT: &str = "Product";
pub const COL_DATE: &str = "Date";
pub const COL_AMOUNT: &str = "Amount";
pub const COL_BOXES_SHIPPED: &str = "BoxesShipped";

/// Columns that must be present in the input; any other columns are carried along.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    COL_SALES_PERSON,
    COL_COUNTRY,
    COL_PRODUCT,
    COL_DATE,
    COL_AMOUNT,
    COL_BOXES_SHIPPED,
];

/// Fixed date pattern of the `Date` column, e.g. `04-Jan-22`.
pub const DATE_FORMAT: &str = "%d-%b-%y";

/// Default dataset location, relative to the working directory.
pub const DEFAULT_INPUT: &str = "./data/Chocolate Sales.csv";

/// A calendar month bucket used as the grouping key for monthly totals.
///
/// Ordering is chronological (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Build a month key; `month` is 1-based and must be in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Truncate a date to its month.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(self) -> NaiveDate {
        // `month` is validated on construction, so day 1 always exists.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Human-readable form used in the report, e.g. `January 2024`.
    pub fn long_name(self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

/// Sortable key form, e.g. `2024-03`.
impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One cleaned sale.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub sales_person: String,
    pub country: String,
    pub product: String,
    pub date: NaiveDate,
    /// `None` when the amount could not be coerced to a number.
    pub amount: Option<f64>,
    /// `None` when the cell is not a whole number.
    pub boxes_shipped: Option<i64>,
    pub month: YearMonth,
}

/// Chart styling variant.
///
/// The two variants only differ cosmetically (palette, product noun in titles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    /// Neutral palette; products are called "Products".
    Standard,
    /// Chocolate palette; products are called "Chocolate Brands".
    Chocolate,
}

impl ChartStyle {
    pub fn product_noun(self) -> &'static str {
        match self {
            ChartStyle::Standard => "Products",
            ChartStyle::Chocolate => "Chocolate Brands",
        }
    }
}

/// Resolved run configuration.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub style: ChartStyle,
    /// Length of the top-products list.
    pub top_n: usize,
    /// Histogram bin count for the amount distribution.
    pub bins: usize,
    /// Directory receiving the SVG chart files.
    pub out_dir: PathBuf,
    pub render_charts: bool,
    /// Show charts in the blocking terminal viewer as well as writing them.
    pub view: bool,
    pub export_monthly: Option<PathBuf>,
    pub export_summary: Option<PathBuf>,
    /// Append cleaning statistics to the text report.
    pub show_clean_stats: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            style: ChartStyle::Chocolate,
            top_n: 5,
            bins: 20,
            out_dir: PathBuf::from("charts"),
            render_charts: true,
            view: false,
            export_monthly: None,
            export_summary: None,
            show_clean_stats: false,
        }
    }
}
