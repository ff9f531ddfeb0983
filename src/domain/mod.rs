//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - cleaned input rows (`CleanedRecord`)
//! - analyzer outputs (`AnnualMean`, `TrendModel`, `AnalysisReport`, `Analysis`)
//! - the saved analysis file (`AnalysisFile`)

pub mod types;

pub use types::*;
