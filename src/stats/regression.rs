//! Ordinary least squares line fit

use serde::Serialize;

use super::error::{StatsError, StatsResult};

/// Fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Regression {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination, `1 - SS_res / SS_tot`
    pub r_squared: f64,
}

impl Regression {
    /// Value of the fitted line at `x`
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit `y` against `x` by least squares.
///
/// Fails when the series are empty, differ in length, or all `x` are equal.
/// A constant `y` is fitted exactly by a horizontal line and reports
/// `r_squared = 1.0`.
pub fn linear_regression(x: &[f64], y: &[f64]) -> StatsResult<Regression> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.is_empty() {
        return Err(StatsError::Empty);
    }
    if x.iter().all(|&v| v == x[0]) {
        return Err(StatsError::ZeroVarianceX);
    }
    if y.iter().all(|&v| v == y[0]) {
        return Ok(Regression {
            slope: 0.0,
            intercept: y[0],
            r_squared: 1.0,
        });
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (sxx, sxy) = x
        .iter()
        .zip(y.iter())
        .fold((0.0, 0.0), |(sxx, sxy), (&xi, &yi)| {
            let dx = xi - mean_x;
            (sxx + dx * dx, sxy + dx * (yi - mean_y))
        });

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let ss_total: f64 = y.iter().map(|yi| (yi - mean_y).powi(2)).sum();
    let ss_residual: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(xi, yi)| (yi - (slope * xi + intercept)).powi(2))
        .sum();

    Ok(Regression {
        slope,
        intercept,
        r_squared: 1.0 - ss_residual / ss_total,
    })
}
