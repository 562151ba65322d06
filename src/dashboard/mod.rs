//! Hydrology Dashboard
//!
//! Owns a [`Store`] of [`DashboardState`] and repaints the dashboard and
//! statistics containers after every state change. Data loads go through
//! a [`RepositorySource`], so the dashboard can be driven by the live
//! GitHub client or by a fixture.
//!
//! Only one load runs at a time. A refresh requested while another is in
//! flight is skipped rather than interleaved. Updates that depend on the
//! current state (theme toggle, filters) go through [`Store::update`], so
//! concurrent callers never overwrite each other.

mod summary;
mod view;

pub use summary::{
    apply_filters, build_charts, language_counts, summarize, RepoSummary, LANGUAGE_FILTER,
};
pub use view::{render_dashboard, render_error, render_loading, render_stats};

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::chart::ChartBuilder;
use crate::config::ThemeConfig;
use crate::integrations::RepositorySource;
use crate::render::{containers, Surface};
use crate::state::{DashboardData, DashboardState, StateUpdate, Store, Subscription, Theme};

/// Result of [`HydroDashboard::init`] and [`HydroDashboard::refresh`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RefreshOutcome {
    Loaded { repositories: usize },
    Failed { error: String },
    /// Another load was already running
    Skipped,
}

/// Markup for both dashboard containers, rendered from one state snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardMarkup {
    pub theme: Theme,
    pub dashboard: String,
    /// Absent while loading or when the load failed
    pub stats: Option<String>,
}

impl DashboardMarkup {
    fn from_state(themes: &ThemeConfig, state: &DashboardState) -> Self {
        let summary = summarize(&apply_filters(state.repositories(), &state.filters));
        let tokens = themes.tokens(state.theme);

        Self {
            theme: state.theme,
            dashboard: render_dashboard(state, &summary, tokens),
            stats: (!state.loading && state.error.is_none()).then(|| render_stats(&summary)),
        }
    }
}

/// Clears the in-flight flag when the load ends, however it ends
struct RefreshGuard<'a>(&'a AtomicBool);

impl<'a> RefreshGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for RefreshGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct HydroDashboard {
    store: Arc<Store<DashboardState>>,
    source: Arc<dyn RepositorySource>,
    surface: Arc<dyn Surface>,
    charts: ChartBuilder,
    username: String,
    themes: ThemeConfig,
    painter: Mutex<Option<Subscription>>,
    refreshing: AtomicBool,
}

impl HydroDashboard {
    /// Create the dashboard and subscribe its painter to the store
    pub fn new(
        source: Arc<dyn RepositorySource>,
        surface: Arc<dyn Surface>,
        username: impl Into<String>,
        themes: ThemeConfig,
    ) -> Self {
        let store = Arc::new(Store::new(DashboardState::new(themes.default)));

        let painter = {
            let surface = Arc::clone(&surface);
            let themes = themes.clone();
            store.subscribe(move |state: &DashboardState| paint(surface.as_ref(), &themes, state))
        };

        Self {
            store,
            source,
            surface,
            charts: ChartBuilder::new(themes.palette.clone()),
            username: username.into(),
            themes,
            painter: Mutex::new(Some(painter)),
            refreshing: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &Arc<Store<DashboardState>> {
        &self.store
    }

    /// Owned copy of the current state
    pub fn state(&self) -> DashboardState {
        self.store.get()
    }

    /// First load: loading banner, fetch, then the full view or the error
    pub async fn init(&self) -> RefreshOutcome {
        let Some(_guard) = RefreshGuard::acquire(&self.refreshing) else {
            tracing::warn!("Dashboard load already in progress, skipping");
            return RefreshOutcome::Skipped;
        };

        self.store.set(StateUpdate::new().loading(true).clear_error());

        match self.source.fetch_repositories(&self.username).await {
            Ok(repos) => {
                let count = repos.len();
                self.store.update(|state| {
                    let charts = build_charts(&self.charts, &apply_filters(&repos, &state.filters));
                    StateUpdate::new()
                        .data(DashboardData { github: Some(repos) })
                        .charts(charts)
                        .clear_error()
                        .loading(false)
                });
                tracing::info!(repositories = count, "Dashboard data loaded");
                RefreshOutcome::Loaded { repositories: count }
            }
            Err(e) => {
                tracing::error!(error = %e, "Dashboard init error");
                let message = e.to_string();
                self.store
                    .set(StateUpdate::new().error(message.clone()).loading(false));
                RefreshOutcome::Failed { error: message }
            }
        }
    }

    /// Reload the data; same sequence as [`init`](Self::init)
    pub async fn refresh(&self) -> RefreshOutcome {
        tracing::debug!("Dashboard refresh requested");
        self.init().await
    }

    /// Swap between dark and light, returning the new theme
    pub fn toggle_theme(&self) -> Theme {
        let mut theme = Theme::default();
        self.store.update(|state| {
            theme = state.theme.toggled();
            StateUpdate::new().theme(theme)
        });
        tracing::debug!(theme = %theme, "Dashboard theme toggled");
        theme
    }

    /// Replace the filters and rebuild the charts for the filtered set
    pub fn set_filters(&self, filters: BTreeMap<String, String>) -> RepoSummary {
        let mut summary = RepoSummary::default();
        self.store.update(|state| {
            let filtered = apply_filters(state.repositories(), &filters);
            summary = summarize(&filtered);
            let charts = build_charts(&self.charts, &filtered);
            StateUpdate::new().filters(filters).charts(charts)
        });
        summary
    }

    /// Summary of the repositories passing the current filters
    pub fn summary(&self) -> RepoSummary {
        let state = self.store.get();
        summarize(&apply_filters(state.repositories(), &state.filters))
    }

    /// Repaint both containers from the current state and return what was
    /// painted. The returned markup stays consistent even if another
    /// update repaints the surface right after.
    pub fn render(&self) -> DashboardMarkup {
        let markup = DashboardMarkup::from_state(&self.themes, &self.store.get());
        paint_markup(self.surface.as_ref(), &markup);
        markup
    }

    /// Drop the charts, stop repainting and empty the containers
    pub fn destroy(&self) {
        let painter = self
            .painter
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(subscription) = painter {
            subscription.cancel(&self.store);
        }

        self.store.set(StateUpdate::new().charts(Vec::new()));
        self.surface.clear(containers::HYDRO_DASHBOARD);
        self.surface.clear(containers::STATS_CONTENT);
        tracing::debug!("Dashboard destroyed");
    }
}

fn paint(surface: &dyn Surface, themes: &ThemeConfig, state: &DashboardState) {
    paint_markup(surface, &DashboardMarkup::from_state(themes, state));
}

fn paint_markup(surface: &dyn Surface, markup: &DashboardMarkup) {
    surface.paint(containers::HYDRO_DASHBOARD, markup.dashboard.clone());
    if let Some(stats) = &markup.stats {
        surface.paint(containers::STATS_CONTENT, stats.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::{ClientError, ClientResult, Repository};
    use crate::render::MemorySurface;
    use async_trait::async_trait;
    use tokio::sync::Notify;

    fn repo(name: &str, language: &str, stars: u64) -> Repository {
        Repository {
            name: name.into(),
            language: Some(language.into()),
            stargazers_count: stars,
            ..Default::default()
        }
    }

    struct FixedSource(Vec<Repository>);

    #[async_trait]
    impl RepositorySource for FixedSource {
        async fn fetch_repositories(&self, _username: &str) -> ClientResult<Vec<Repository>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl RepositorySource for FailingSource {
        async fn fetch_repositories(&self, _username: &str) -> ClientResult<Vec<Repository>> {
            Err(ClientError::Status { status: 403 })
        }
    }

    /// Blocks until released
    struct GatedSource(Arc<Notify>);

    #[async_trait]
    impl RepositorySource for GatedSource {
        async fn fetch_repositories(&self, _username: &str) -> ClientResult<Vec<Repository>> {
            self.0.notified().await;
            Ok(vec![repo("gated", "Rust", 1)])
        }
    }

    fn dashboard(source: Arc<dyn RepositorySource>) -> (HydroDashboard, Arc<MemorySurface>) {
        let surface = Arc::new(MemorySurface::new());
        let dashboard = HydroDashboard::new(
            source,
            surface.clone(),
            "ductran27",
            ThemeConfig::default(),
        );
        (dashboard, surface)
    }

    fn fixture() -> Arc<FixedSource> {
        Arc::new(FixedSource(vec![
            repo("PySWATCal", "Python", 12),
            repo("LIS-tools", "Fortran", 3),
            repo("NOAA_FIM", "Python", 5),
        ]))
    }

    #[tokio::test]
    async fn test_init_loads_and_paints() {
        let (dashboard, surface) = dashboard(fixture());

        let outcome = dashboard.init().await;
        assert_eq!(outcome, RefreshOutcome::Loaded { repositories: 3 });

        let state = dashboard.state();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.repositories().len(), 3);
        assert_eq!(state.charts.len(), 2);

        let html = surface.content(containers::HYDRO_DASHBOARD).unwrap();
        assert!(html.contains("Hydrology Research Dashboard"));
        assert!(!html.contains("Loading dashboard"));

        let stats = surface.content(containers::STATS_CONTENT).unwrap();
        assert!(stats.contains("Stars: 20"));
    }

    #[tokio::test]
    async fn test_init_failure_shows_error() {
        let (dashboard, surface) = dashboard(Arc::new(FailingSource));

        let outcome = dashboard.init().await;
        assert_eq!(
            outcome,
            RefreshOutcome::Failed {
                error: "HTTP error! status: 403".into()
            }
        );

        let state = dashboard.state();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("HTTP error! status: 403"));
        assert_eq!(
            surface.content(containers::HYDRO_DASHBOARD).unwrap(),
            render_error("HTTP error! status: 403")
        );
        assert!(surface.content(containers::STATS_CONTENT).is_none());
    }

    #[tokio::test]
    async fn test_loading_painted_before_data() {
        let (dashboard, surface) = dashboard(fixture());
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = Arc::clone(&seen);
            dashboard.store().subscribe(move |s: &DashboardState| {
                seen.lock().unwrap().push(s.loading);
            });
        }

        dashboard.init().await;
        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
        assert!(surface.content(containers::HYDRO_DASHBOARD).is_some());
    }

    #[tokio::test]
    async fn test_overlapping_refresh_is_skipped() {
        let gate = Arc::new(Notify::new());
        let surface = Arc::new(MemorySurface::new());
        let dashboard = Arc::new(HydroDashboard::new(
            Arc::new(GatedSource(Arc::clone(&gate))),
            surface,
            "ductran27",
            ThemeConfig::default(),
        ));

        let first = {
            let dashboard = Arc::clone(&dashboard);
            tokio::spawn(async move { dashboard.init().await })
        };

        while !dashboard.state().loading {
            tokio::task::yield_now().await;
        }

        assert_eq!(dashboard.refresh().await, RefreshOutcome::Skipped);

        gate.notify_one();
        assert_eq!(
            first.await.unwrap(),
            RefreshOutcome::Loaded { repositories: 1 }
        );

        // The flag is released once the first load finishes
        gate.notify_one();
        assert_eq!(
            dashboard.refresh().await,
            RefreshOutcome::Loaded { repositories: 1 }
        );
    }

    #[tokio::test]
    async fn test_toggle_theme_repaints() {
        let (dashboard, surface) = dashboard(fixture());
        dashboard.init().await;

        assert_eq!(dashboard.toggle_theme(), Theme::Light);
        let html = surface.content(containers::HYDRO_DASHBOARD).unwrap();
        assert!(html.contains(r#"data-theme="light""#));

        assert_eq!(dashboard.toggle_theme(), Theme::Dark);
        assert_eq!(dashboard.state().theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_are_not_lost() {
        let (dashboard, _surface) = dashboard(fixture());
        dashboard.init().await;
        let dashboard = Arc::new(dashboard);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let dashboard = Arc::clone(&dashboard);
                std::thread::spawn(move || {
                    for _ in 0..25 {
                        dashboard.toggle_theme();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // 200 toggles is an even count, so the theme ends where it started
        assert_eq!(dashboard.state().theme, Theme::Dark);
    }

    #[tokio::test]
    async fn test_render_returns_painted_markup() {
        let (dashboard, surface) = dashboard(fixture());
        dashboard.init().await;

        let markup = dashboard.render();
        assert_eq!(markup.theme, Theme::Dark);
        assert_eq!(
            surface.content(containers::HYDRO_DASHBOARD).as_deref(),
            Some(markup.dashboard.as_str())
        );
        assert_eq!(surface.content(containers::STATS_CONTENT), markup.stats);

        // Later repaints do not change markup already returned
        dashboard.toggle_theme();
        assert!(markup.dashboard.contains(r#"data-theme="dark""#));
        assert_ne!(
            surface.content(containers::HYDRO_DASHBOARD).as_deref(),
            Some(markup.dashboard.as_str())
        );
    }

    #[tokio::test]
    async fn test_render_without_stats_while_failed() {
        let (dashboard, _surface) = dashboard(Arc::new(FailingSource));
        dashboard.init().await;

        let markup = dashboard.render();
        assert!(markup.stats.is_none());
        assert_eq!(markup.dashboard, render_error("HTTP error! status: 403"));
    }

    #[tokio::test]
    async fn test_filters_narrow_summary_and_charts() {
        let (dashboard, _surface) = dashboard(fixture());
        dashboard.init().await;

        let mut filters = BTreeMap::new();
        filters.insert(LANGUAGE_FILTER.to_string(), "Python".to_string());
        let summary = dashboard.set_filters(filters);

        assert_eq!(summary.total_repos, 2);
        assert_eq!(summary.total_stars, 17);
        assert_eq!(dashboard.summary(), summary);

        let state = dashboard.state();
        assert_eq!(state.charts[1].data.labels.as_ref().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_destroy_clears_and_stops_painting() {
        let (dashboard, surface) = dashboard(fixture());
        dashboard.init().await;
        let listeners = dashboard.store().listener_count();

        dashboard.destroy();
        assert_eq!(dashboard.store().listener_count(), listeners - 1);
        assert!(dashboard.state().charts.is_empty());
        assert_eq!(surface.content(containers::HYDRO_DASHBOARD).as_deref(), Some(""));
        assert_eq!(surface.content(containers::STATS_CONTENT).as_deref(), Some(""));

        dashboard.toggle_theme();
        assert_eq!(surface.content(containers::HYDRO_DASHBOARD).as_deref(), Some(""));
    }
}
