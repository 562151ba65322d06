//! Data Transfer Objects
//!
//! Request and response bodies of the JSON endpoints.

use serde::{Deserialize, Serialize};

use crate::dashboard::RepoSummary;
use crate::portfolio::ProjectCard;
use crate::state::{DashboardState, Theme};
use crate::stats::{OutlierReport, Stats};

// ============================================
// PORTFOLIO DTOs
// ============================================

/// Featured repositories as cards
#[derive(Debug, Serialize)]
pub struct ReposResponse {
    pub username: String,
    pub total: usize,
    pub repositories: Vec<ProjectCard>,
}

// ============================================
// DASHBOARD DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub state: DashboardState,
    pub summary: RepoSummary,
}

#[derive(Debug, Serialize)]
pub struct ThemeResponse {
    pub theme: Theme,
}

// ============================================
// STATS DTOs
// ============================================

/// Series to describe
#[derive(Debug, Deserialize)]
pub struct StatsRequest {
    pub data: Vec<f64>,
    /// Moving average window; omitted means no moving average
    #[serde(default)]
    pub window: Option<usize>,
    /// Include the min-max normalised series
    #[serde(default)]
    pub normalize: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub stats: Option<Stats>,
    pub outliers: Option<OutlierReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moving_average: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct RegressionRequest {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

// ============================================
// STREAMFLOW DTOs
// ============================================

/// Query parameters of the streamflow endpoint
#[derive(Debug, Deserialize)]
pub struct StreamflowParams {
    /// Days back from today, 1 to 120
    #[serde(default = "default_days")]
    pub days: u32,
    /// Moving average window
    #[serde(default = "default_window")]
    pub window: usize,
}

fn default_days() -> u32 {
    7
}

fn default_window() -> usize {
    24
}

// ============================================
// HEALTH DTOs
// ============================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// healthy or degraded
    pub status: String,
    /// ready, loading, error or empty
    pub dashboard: String,
    pub uptime_seconds: u64,
    pub version: String,
}
