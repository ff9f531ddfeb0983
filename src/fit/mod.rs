//! Trend analysis: annual aggregation, linear fit, derived report.
//!
//! - `annual`: group cleaned records by year and average them
//! - `linear`: degree-1 least squares over the annual series

pub mod annual;
pub mod linear;

pub use annual::annual_means;
pub use linear::{fit_linear, trend_line};

use crate::domain::{Analysis, CleanedRecord};
use crate::error::TrendError;
use crate::report::build_report;

/// Run the whole analyzer over a cleaned record set.
///
/// Fails with `InsufficientData` when fewer than two distinct years are
/// present (checked by `fit_linear`); no partial or default analysis is ever
/// returned.
pub fn analyze(records: &[CleanedRecord]) -> Result<Analysis, TrendError> {
    let annual = annual_means(records);
    let (model, quality) = fit_linear(&annual)?;
    let trend_line = trend_line(&model, &annual);
    let report = build_report(&annual, &model)?;

    Ok(Analysis {
        annual_means: annual,
        trend_line,
        model,
        quality,
        report,
    })
}
