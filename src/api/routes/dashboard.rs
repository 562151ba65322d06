//! Dashboard Routes
//!
//! - GET /dashboard - Dashboard page
//! - GET /api/v1/dashboard - Current state and summary
//! - POST /api/v1/dashboard/refresh - Reload repository data
//! - POST /api/v1/dashboard/theme - Toggle dark/light
//! - PUT /api/v1/dashboard/filters - Replace the filters

use axum::{extract::State, http::StatusCode, response::Html, Json};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::dto::{DashboardResponse, ThemeResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::dashboard::{RefreshOutcome, RepoSummary};
use crate::render::{containers, page};

/// Wires the header buttons to the API and draws the embedded chart configs
const DASHBOARD_SCRIPT: &str = r#"<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
<script>
document.querySelectorAll('[data-action]').forEach(function (button) {
  button.addEventListener('click', function () {
    var path = button.dataset.action === 'refresh' ? 'refresh' : 'theme';
    fetch('/api/v1/dashboard/' + path, { method: 'POST' }).then(function () { location.reload(); });
  });
});
document.querySelectorAll('script[data-chart]').forEach(function (node) {
  var canvas = document.getElementById(node.dataset.chart);
  if (canvas && window.Chart) { new Chart(canvas, JSON.parse(node.textContent)); }
});
</script>"#;

/// GET /dashboard
pub async fn dashboard_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let current = state.dashboard.state();
    if current.data.github.is_none() && !current.loading && current.error.is_none() {
        state.dashboard.init().await;
    }
    let markup = state.dashboard.render();

    let body = format!(
        r#"<div id="{dashboard_id}">{view}</div>
<section class="card"><h3>Statistics</h3><div id="{stats_id}">{stats}</div></section>
{script}"#,
        dashboard_id = containers::HYDRO_DASHBOARD,
        stats_id = containers::STATS_CONTENT,
        view = markup.dashboard,
        stats = markup.stats.unwrap_or_default(),
        script = DASHBOARD_SCRIPT,
    );

    let tokens = state.config.theme.tokens(markup.theme);
    Html(page("Hydrology Dashboard", tokens, &body))
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardResponse> {
    Json(DashboardResponse {
        state: state.dashboard.state(),
        summary: state.dashboard.summary(),
    })
}

/// POST /api/v1/dashboard/refresh
///
/// 200 when loaded, 502 with the outcome when the fetch failed, 409 when
/// another load is running.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, Json<RefreshOutcome>)> {
    let outcome = state.dashboard.refresh().await;

    match outcome {
        RefreshOutcome::Loaded { .. } => Ok((StatusCode::OK, Json(outcome))),
        RefreshOutcome::Failed { .. } => Ok((StatusCode::BAD_GATEWAY, Json(outcome))),
        RefreshOutcome::Skipped => Err(ApiError::Conflict(
            "Dashboard refresh already in progress".to_string(),
        )),
    }
}

/// POST /api/v1/dashboard/theme
pub async fn toggle_theme(State(state): State<Arc<AppState>>) -> Json<ThemeResponse> {
    let theme = state.dashboard.toggle_theme();
    Json(ThemeResponse { theme })
}

/// PUT /api/v1/dashboard/filters
pub async fn set_filters(
    State(state): State<Arc<AppState>>,
    Json(filters): Json<BTreeMap<String, String>>,
) -> ApiResult<Json<RepoSummary>> {
    if let Some(key) = filters.keys().find(|k| k.trim().is_empty()) {
        return Err(ApiError::Validation(format!("Invalid filter key '{}'", key)));
    }

    tracing::info!(filters = ?filters, "Dashboard filters updated");
    Ok(Json(state.dashboard.set_filters(filters)))
}
