//! # Hydrofolio
//!
//! Research portfolio and hydroinformatics dashboard: a curated grid of
//! GitHub projects, a repository statistics dashboard with Chart.js
//! configurations, and small numeric tools for hydrologic series.
//!
//! ## Modules
//!
//! - [`stats`]: Descriptive statistics, outliers, moving averages, regression
//! - [`chart`]: Chart configuration builder
//! - [`state`]: Observable store and the dashboard state record
//! - [`portfolio`]: Featured repository selection and project cards
//! - [`dashboard`]: Dashboard lifecycle, summary and view
//! - [`integrations`]: GitHub and USGS clients
//! - [`badges`]: README citation badge updater
//! - [`api`]: HTTP server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hydrofolio::stats::{calculate_stats, detect_outliers};
//!
//! let discharge = [1200.0, 1250.0, 1190.0, 5400.0, 1230.0];
//! if let Some(stats) = calculate_stats(&discharge) {
//!     println!("mean {:.1} cfs, median {:.1} cfs", stats.mean, stats.median);
//! }
//! if let Some(report) = detect_outliers(&discharge) {
//!     println!("{} outliers above {:.1}", report.outliers.len(), report.upper_bound);
//! }
//! ```

pub mod api;
pub mod badges;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod integrations;
pub mod portfolio;
pub mod render;
pub mod state;
pub mod stats;
pub mod utils;

pub use api::{build_router, serve, ApiError, AppState};

pub use badges::{update_badges, update_readme, BadgeError, ScholarMetrics};

pub use chart::{ChartBuilder, ChartConfig, ChartType};

pub use config::{Config, ConfigError, LoggingConfig, Palette, ThemeConfig, ThemeTokens};

pub use dashboard::{DashboardMarkup, HydroDashboard, RefreshOutcome, RepoSummary};

pub use integrations::{
    ApiClient, ClientError, ClientResult, Endpoints, GitHubUser, Repository, RepositorySource,
    StreamflowReading, StreamflowSummary,
};

pub use portfolio::{select_featured, Portfolio, ProjectCard};

pub use render::{MemorySurface, Surface};

pub use state::{DashboardState, Merge, StateUpdate, Store, Subscription, Theme};

pub use stats::{
    calculate_stats, detect_outliers, linear_regression, moving_average, normalize,
    OutlierReport, Regression, Stats, StatsError,
};
