//! Streamflow Routes
//!
//! - GET /api/v1/streamflow/:site?days=7&window=24 - Discharge summary for a
//!   USGS gauge over the last `days` days

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::StreamflowParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::integrations::usgs::{extract_readings, extract_site_name, lookback, summarize, MAX_DAYS};
use crate::integrations::StreamflowSummary;

/// GET /api/v1/streamflow/:site
pub async fn site_summary(
    State(state): State<Arc<AppState>>,
    Path(site): Path<String>,
    Query(params): Query<StreamflowParams>,
) -> ApiResult<Json<StreamflowSummary>> {
    validate_site(&site)?;
    let Some((start, end)) = lookback(Utc::now().date_naive(), params.days) else {
        return Err(ApiError::Validation(format!(
            "days must be between 1 and {}",
            MAX_DAYS
        )));
    };
    if params.window == 0 {
        return Err(ApiError::Validation("window must be at least 1".to_string()));
    }

    let body = state.client.usgs_streamflow(&site, start, end).await?;
    let readings = extract_readings(&body);

    tracing::info!(site = %site, readings = readings.len(), "Fetched streamflow");
    Ok(Json(summarize(
        &site,
        extract_site_name(&body),
        &readings,
        params.window,
    )))
}

/// USGS site numbers are 8 to 15 digits
fn validate_site(site: &str) -> ApiResult<()> {
    let valid = (8..=15).contains(&site.len()) && site.bytes().all(|b| b.is_ascii_digit());
    if valid {
        Ok(())
    } else {
        Err(ApiError::Validation(format!("Invalid USGS site number '{}'", site)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_site() {
        assert!(validate_site("01646500").is_ok());
        assert!(validate_site("014").is_err());
        assert!(validate_site("0164650A").is_err());
    }
}
