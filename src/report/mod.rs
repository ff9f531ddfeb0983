//! Reporting utilities: derived summary figures and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{AnalysisReport, AnnualMean, Direction, TrendModel};
use crate::error::TrendError;

/// Derive the summary figures from the annual series and the fitted model.
///
/// `annual` is ascending by year (as built by `fit::annual_means`), so the
/// period is its first and last entry. An empty series only reaches this
/// function when called directly, not through `fit::analyze`.
pub fn build_report(annual: &[AnnualMean], model: &TrendModel) -> Result<AnalysisReport, TrendError> {
    let (Some(first), Some(last)) = (annual.first(), annual.last()) else {
        return Err(TrendError::InsufficientData { distinct_years: 0 });
    };
    let (start_year, end_year) = (first.year, last.year);

    Ok(AnalysisReport {
        start_year,
        end_year,
        predicted_change: model.predict(end_year) - model.predict(start_year),
        slope: model.slope,
        direction: Direction::from_slope(model.slope),
    })
}
