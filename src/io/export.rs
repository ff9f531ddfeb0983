//! Export chart data and saved analyses.
//!
//! - chart CSV: one row per year (annual mean + trend value), easy to open in
//!   a spreadsheet or feed to another plotting tool
//! - analysis JSON: the complete pipeline output, reloadable for `plot`

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{Analysis, AnalysisFile};
use crate::error::AppError;

/// Write the annual series and the parallel trend line to a CSV file.
pub fn write_chart_csv(path: &Path, analysis: &Analysis) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create chart CSV '{}': {e}", path.display())))?;
    write_chart_rows(&mut file, analysis)
        .map_err(|e| AppError::new(2, format!("Failed to write chart CSV: {e}")))
}

fn write_chart_rows(out: &mut impl Write, analysis: &Analysis) -> std::io::Result<()> {
    writeln!(out, "year,annual_mean,trend,count")?;
    for (mean, trend) in analysis.annual_means.iter().zip(&analysis.trend_line) {
        writeln!(
            out,
            "{},{:.4},{:.4},{}",
            mean.year, mean.mean, trend.value, mean.count
        )?;
    }
    Ok(())
}

/// Write a saved analysis as pretty JSON.
pub fn write_analysis_json(path: &Path, saved: &AnalysisFile) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create analysis JSON '{}': {e}", path.display())))?;
    serde_json::to_writer_pretty(file, saved)
        .map_err(|e| AppError::new(2, format!("Failed to write analysis JSON: {e}")))?;
    Ok(())
}

/// Read a saved analysis JSON file.
pub fn read_analysis_json(path: &Path) -> Result<AnalysisFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open analysis JSON '{}': {e}", path.display())))?;
    let saved: AnalysisFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid analysis JSON: {e}")))?;
    Ok(saved)
}
