//! Chart Routes
//!
//! - POST /api/v1/charts/:kind - Build a chart configuration from option
//!   records. `kind` is one of line, bar, pie or scatter.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::chart::ChartConfig;

/// POST /api/v1/charts/:kind
pub async fn build_chart(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> ApiResult<Json<ChartConfig>> {
    let builder = &state.charts;

    let config = match kind.as_str() {
        "line" => builder.line_chart(options(body)?),
        "bar" => builder.bar_chart(options(body)?),
        "pie" => builder.pie_chart(options(body)?),
        "scatter" => builder.scatter_plot(options(body)?),
        other => {
            return Err(ApiError::NotFound(format!("Unknown chart kind '{}'", other)));
        }
    };

    tracing::debug!(kind = %kind, datasets = config.data.datasets.len(), "Built chart");
    Ok(Json(config))
}

fn options<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    serde_json::from_value(body)
        .map_err(|e| ApiError::Validation(format!("Invalid chart options: {}", e)))
}
