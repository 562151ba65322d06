//! Statistics Routes
//!
//! - POST /api/v1/stats - Describe a posted series
//! - POST /api/v1/regression - Least squares fit of y against x

use axum::Json;

use crate::api::dto::{RegressionRequest, StatsRequest, StatsResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::stats::{
    calculate_stats, detect_outliers, linear_regression, moving_average, normalize, Regression,
};

/// POST /api/v1/stats
///
/// An empty series yields null stats and outliers rather than an error.
pub async fn describe(Json(req): Json<StatsRequest>) -> ApiResult<Json<StatsResponse>> {
    validate_series("data", &req.data)?;
    if req.window == Some(0) {
        return Err(ApiError::Validation("window must be at least 1".to_string()));
    }

    Ok(Json(StatsResponse {
        stats: calculate_stats(&req.data),
        outliers: detect_outliers(&req.data),
        moving_average: req.window.map(|w| moving_average(&req.data, w)),
        normalized: req.normalize.then(|| normalize(&req.data)),
    }))
}

/// POST /api/v1/regression
pub async fn regression(Json(req): Json<RegressionRequest>) -> ApiResult<Json<Regression>> {
    validate_series("x", &req.x)?;
    validate_series("y", &req.y)?;

    let fit = linear_regression(&req.x, &req.y)?;
    Ok(Json(fit))
}

fn validate_series(name: &str, data: &[f64]) -> ApiResult<()> {
    match data.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ApiError::Validation(format!(
            "{}[{}] is not a finite number",
            name, index
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_series() {
        assert!(validate_series("data", &[1.0, 2.0]).is_ok());
        assert!(validate_series("data", &[]).is_ok());
        assert!(matches!(
            validate_series("data", &[1.0, f64::INFINITY]),
            Err(ApiError::Validation(msg)) if msg == "data[1] is not a finite number"
        ));
    }
}
