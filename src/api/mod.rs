//! Hydrofolio HTTP API
//!
//! Pages and JSON endpoints built with Axum.
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /` - Portfolio with the featured project grid
//! - `GET /dashboard` - Hydrology dashboard
//!
//! ## Portfolio
//! - `GET /api/v1/repos` - Featured repositories
//! - `GET /api/v1/profile` - GitHub profile
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard` - State and summary
//! - `POST /api/v1/dashboard/refresh` - Reload data
//! - `POST /api/v1/dashboard/theme` - Toggle theme
//! - `PUT /api/v1/dashboard/filters` - Replace filters
//!
//! ## Analysis
//! - `POST /api/v1/stats` - Describe a series
//! - `POST /api/v1/regression` - Linear regression
//! - `POST /api/v1/charts/:kind` - Chart configuration
//! - `GET /api/v1/streamflow/:site` - USGS discharge summary
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health` - Full health status

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/repos", get(routes::portfolio::list_repos))
        .route("/profile", get(routes::portfolio::profile))
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route("/dashboard/refresh", post(routes::dashboard::refresh))
        .route("/dashboard/theme", post(routes::dashboard::toggle_theme))
        .route("/dashboard/filters", put(routes::dashboard::set_filters))
        .route("/stats", post(routes::stats::describe))
        .route("/regression", post(routes::stats::regression))
        .route("/charts/:kind", post(routes::charts::build_chart))
        .route("/streamflow/:site", get(routes::streamflow::site_summary));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.server.cors_origins);
    let shared_state = Arc::new(state);

    Router::new()
        .route("/", get(routes::portfolio::portfolio_page))
        .route("/dashboard", get(routes::dashboard::dashboard_page))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

/// `*` or an empty list allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the HTTP server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Hydrofolio listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Hydrofolio shut down gracefully");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
