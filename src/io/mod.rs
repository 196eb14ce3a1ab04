//! Input/output helpers.
//!
//! - CSV ingest + header normalization (`ingest`)
//! - monthly CSV / summary JSON exports (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
