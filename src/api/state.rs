//! Application State
//!
//! Shared by all handlers behind an `Arc`.

use std::sync::Arc;
use std::time::Instant;

use crate::chart::ChartBuilder;
use crate::config::Config;
use crate::dashboard::HydroDashboard;
use crate::integrations::{ApiClient, RepositorySource};
use crate::portfolio::Portfolio;
use crate::render::MemorySurface;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// GitHub profile and USGS lookups
    pub client: Arc<ApiClient>,
    pub portfolio: Arc<Portfolio>,
    pub dashboard: Arc<HydroDashboard>,
    /// Containers the portfolio and dashboard paint into
    pub surface: Arc<MemorySurface>,
    pub charts: ChartBuilder,
    pub start_time: Instant,
}

impl AppState {
    /// Wire the portfolio and dashboard to `source` and a fresh surface
    pub fn new(
        config: Config,
        client: Arc<ApiClient>,
        source: Arc<dyn RepositorySource>,
    ) -> Self {
        let surface = Arc::new(MemorySurface::new());

        let portfolio = Portfolio::new(Arc::clone(&source), config.github.clone());
        let dashboard = HydroDashboard::new(
            source,
            surface.clone(),
            config.github.username.clone(),
            config.theme.clone(),
        );

        Self {
            charts: ChartBuilder::new(config.theme.palette.clone()),
            config: Arc::new(config),
            client,
            portfolio: Arc::new(portfolio),
            dashboard: Arc::new(dashboard),
            surface,
            start_time: Instant::now(),
        }
    }

    /// Server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
