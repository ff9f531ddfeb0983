//! Ordinary least squares for a straight line.
//!
//! The trend fit is a tiny regression problem of the form:
//!
//! ```text
//! minimize Σ (y_i - (slope * x_i + intercept))^2
//! ```
//!
//! solved with the closed form on centred data:
//!
//! ```text
//! slope     = Σ (x_i - x̄)(y_i - ȳ) / Σ (x_i - x̄)^2
//! intercept = ȳ - slope * x̄
//! ```
//!
//! Centering keeps the sums small when `x` is a calendar year, and a series
//! with constant `y` gets an exact zero slope.

use nalgebra::DVector;

/// Fitted line coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

/// Fit `y = slope * x + intercept`.
///
/// Returns `None` when fewer than two points are given, the lengths differ,
/// `x` has no spread, or the coefficients are not finite.
pub fn fit_line(x: &DVector<f64>, y: &DVector<f64>) -> Option<LineFit> {
    let n = x.len();
    if n < 2 || y.len() != n {
        return None;
    }

    let x_mean = x.mean();
    let y_mean = y.mean();
    let dx = x.add_scalar(-x_mean);
    let dy = y.add_scalar(-y_mean);

    let sxx = dx.dot(&dx);
    if !(sxx > 0.0) {
        return None;
    }

    let slope = dx.dot(&dy) / sxx;
    let intercept = y_mean - slope * x_mean;
    if slope.is_finite() && intercept.is_finite() {
        Some(LineFit { slope, intercept })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_line_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DVector::from_row_slice(&[0.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let fit = fit_line(&x, &y).unwrap();
        assert!((fit.intercept - 2.0).abs() < 1e-10);
        assert!((fit.slope - 3.0).abs() < 1e-10);
    }

    #[test]
    fn constant_series_has_exact_zero_slope() {
        let x = DVector::from_row_slice(&[2000.0, 2001.0, 2002.0, 2003.0]);
        let y = DVector::from_row_slice(&[10.0, 10.0, 10.0, 10.0]);
        let fit = fit_line(&x, &y).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 10.0);
    }

    #[test]
    fn degenerate_inputs_have_no_fit() {
        let one = DVector::from_row_slice(&[1.0]);
        assert!(fit_line(&one, &one).is_none());

        let same_x = DVector::from_row_slice(&[5.0, 5.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0]);
        assert!(fit_line(&same_x, &y).is_none());

        let x = DVector::from_row_slice(&[0.0, 1.0]);
        let nan = DVector::from_row_slice(&[f64::NAN, 1.0]);
        assert!(fit_line(&x, &nan).is_none());
    }
}
