//! Degree-1 least-squares fit over the annual series.
//!
//! The fit itself is `math::fit_line`; this module adapts the annual series to
//! it and computes residual diagnostics.

use std::collections::BTreeSet;

use nalgebra::DVector;

use crate::domain::{AnnualMean, FitQuality, TrendModel, TrendPoint};
use crate::error::TrendError;
use crate::math::fit_line;

/// Fit `mean = slope * year + intercept` by ordinary least squares.
///
/// Requires at least two distinct years.
pub fn fit_linear(points: &[AnnualMean]) -> Result<(TrendModel, FitQuality), TrendError> {
    let distinct_years = points.iter().map(|p| p.year).collect::<BTreeSet<_>>().len();
    if distinct_years < 2 {
        return Err(TrendError::InsufficientData { distinct_years });
    }

    let n = points.len();
    let x = DVector::from_iterator(n, points.iter().map(|p| f64::from(p.year)));
    let y = DVector::from_iterator(n, points.iter().map(|p| p.mean));

    let line = fit_line(&x, &y).ok_or_else(|| {
        TrendError::DegenerateFit("no finite least-squares solution for the annual series".to_string())
    })?;
    let model = TrendModel {
        slope: line.slope,
        intercept: line.intercept,
    };

    let sse: f64 = points
        .iter()
        .map(|p| {
            let r = p.mean - model.predict(p.year);
            r * r
        })
        .sum();
    let quality = FitQuality {
        n,
        sse,
        rmse: (sse / n as f64).sqrt(),
    };

    Ok((model, quality))
}

/// Fitted value at every year of the annual series, in the same order.
pub fn trend_line(model: &TrendModel, annual: &[AnnualMean]) -> Vec<TrendPoint> {
    annual
        .iter()
        .map(|a| TrendPoint {
            year: a.year,
            value: model.predict(a.year),
        })
        .collect()
}
