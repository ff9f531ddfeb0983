//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory between the loader and the analyzer
//! - exported to JSON/CSV
//! - reloaded later for plotting

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A row that survived cleaning.
///
/// Every record has a parsed date and a finite temperature; `year` is always
/// `date.year()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CleanedRecord {
    pub date: NaiveDate,
    pub temperature: f64,
    pub year: i32,
}

/// Mean temperature of one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualMean {
    pub year: i32,
    pub mean: f64,
    /// Number of cleaned records averaged into `mean`.
    pub count: usize,
}

/// One sample of the fitted trend line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub value: f64,
}

/// First-degree polynomial `temperature ≈ slope × year + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendModel {
    pub fn predict(&self, year: i32) -> f64 {
        self.slope * f64::from(year) + self.intercept
    }
}

/// Residual diagnostics of the linear fit over the annual means.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    pub n: usize,
    pub sse: f64,
    pub rmse: f64,
}

/// Sign classification of the fitted slope.
///
/// A perfectly flat trend is `NotRising`; there is no separate "flat" class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Rising,
    NotRising,
}

impl Direction {
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Direction::Rising
        } else {
            Direction::NotRising
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Direction::Rising => "rising",
            Direction::NotRising => "not rising",
        }
    }
}

/// Summary figures derived from the annual series and the fitted model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub start_year: i32,
    pub end_year: i32,
    /// `trend(end_year) - trend(start_year)`.
    pub predicted_change: f64,
    pub slope: f64,
    pub direction: Direction,
}

/// Complete output of one analyzer run.
///
/// `trend_line` is parallel to `annual_means` (same years, same order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub annual_means: Vec<AnnualMean>,
    pub trend_line: Vec<TrendPoint>,
    pub model: TrendModel,
    pub quality: FitQuality,
    pub report: AnalysisReport,
}

/// A saved analysis (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFile {
    pub tool: String,
    pub input: String,
    pub encoding: String,
    pub rows_read: usize,
    pub rows_dropped: usize,
    pub analysis: Analysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_slope_is_not_rising() {
        assert_eq!(Direction::from_slope(0.0), Direction::NotRising);
        assert_eq!(Direction::from_slope(-0.1), Direction::NotRising);
        assert_eq!(Direction::from_slope(f64::NAN), Direction::NotRising);
        assert_eq!(Direction::from_slope(1e-9), Direction::Rising);
    }

    #[test]
    fn predict_is_linear_in_year() {
        let model = TrendModel {
            slope: 0.5,
            intercept: -990.0,
        };
        assert!((model.predict(2000) - 10.0).abs() < 1e-12);
        assert!((model.predict(2010) - model.predict(2000) - 5.0).abs() < 1e-12);
    }
}
