//! Hydrofolio Server
//!
//! Run with: cargo run --bin hydrofolio
//!
//! Configuration is read from the first config file found
//! (`~/.config/hydrofolio/config.toml`, `/etc/hydrofolio/config.toml`,
//! `./config.toml`) with `HYDROFOLIO_*` environment overrides. `RUST_LOG`
//! overrides the configured log level.

use hydrofolio::api::{serve, AppState};
use hydrofolio::config::Config;
use hydrofolio::dashboard::RefreshOutcome;
use hydrofolio::integrations::ApiClient;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    config.logging.init();

    tracing::info!("Starting Hydrofolio v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        username = %config.github.username,
        featured = config.github.featured_repos.len(),
        "Portfolio configured"
    );

    let client = Arc::new(ApiClient::from_config(&config)?);
    let server = config.server.clone();
    let state = AppState::new(config, Arc::clone(&client), client);

    // A failed first load leaves the error banner up; the server still starts
    match state.dashboard.init().await {
        RefreshOutcome::Loaded { repositories } => {
            tracing::info!(repositories, "Dashboard ready");
        }
        RefreshOutcome::Failed { error } => {
            tracing::warn!(error = %error, "Dashboard starting without data");
        }
        RefreshOutcome::Skipped => {}
    }

    serve(state, &server).await?;

    tracing::info!("Hydrofolio shutdown complete");
    Ok(())
}
