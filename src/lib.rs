//! `sales-report` library crate.
//!
//! The binary (`sales`) is a thin wrapper around this library so that:
//!
//! - the cleaning and aggregation steps are testable without spawning processes
//! - the pipeline can be driven from other front-ends (the terminal viewer, tests)

pub mod aggregate;
pub mod app;
pub mod clean;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod tui;
