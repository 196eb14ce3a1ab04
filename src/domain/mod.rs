//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the cleaned sale record (`SaleRecord`) and its month key (`YearMonth`)
//! - the required input column names
//! - run configuration (`ReportConfig`, `ChartStyle`)

pub mod types;

pub use types::*;
