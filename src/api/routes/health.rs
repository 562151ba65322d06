//! Health Routes
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health - Status with dashboard readiness

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// Degraded while the dashboard shows an error banner; the server still
/// answers every route in that case.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let dashboard = state.dashboard.state();

    let dashboard_status = if dashboard.loading {
        "loading"
    } else if dashboard.error.is_some() {
        "error"
    } else if dashboard.data.github.is_some() {
        "ready"
    } else {
        "empty"
    };

    let status = if dashboard.error.is_some() {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        dashboard: dashboard_status.to_string(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
