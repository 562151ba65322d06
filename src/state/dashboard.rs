//! Dashboard State
//!
//! The record driven through the [`Store`](super::Store) by the dashboard:
//! theme, fetched data, filters, chart configurations and the
//! loading/error flags.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::store::Merge;
use crate::chart::ChartConfig;
use crate::integrations::Repository;

/// Colour scheme of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// The other theme
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data loaded from external sources
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardData {
    /// Repositories of the configured user, `None` until loaded
    pub github: Option<Vec<Repository>>,
}

/// Full dashboard state
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardState {
    pub theme: Theme,
    pub data: DashboardData,
    pub filters: BTreeMap<String, String>,
    pub charts: Vec<ChartConfig>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DashboardState {
    /// Fresh state with the given theme
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Default::default()
        }
    }

    /// Repositories loaded so far, empty before the first load
    pub fn repositories(&self) -> &[Repository] {
        self.data.github.as_deref().unwrap_or(&[])
    }
}

/// Partial update for [`DashboardState`]
///
/// Only the fields that are set replace the current values.
#[derive(Debug, Clone, Default)]
pub struct StateUpdate {
    pub theme: Option<Theme>,
    pub data: Option<DashboardData>,
    pub filters: Option<BTreeMap<String, String>>,
    pub charts: Option<Vec<ChartConfig>>,
    pub loading: Option<bool>,
    /// `Some(None)` clears the error
    pub error: Option<Option<String>>,
}

impl StateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn data(mut self, data: DashboardData) -> Self {
        self.data = Some(data);
        self
    }

    pub fn filters(mut self, filters: BTreeMap<String, String>) -> Self {
        self.filters = Some(filters);
        self
    }

    pub fn charts(mut self, charts: Vec<ChartConfig>) -> Self {
        self.charts = Some(charts);
        self
    }

    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = Some(loading);
        self
    }

    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(Some(message.into()));
        self
    }

    pub fn clear_error(mut self) -> Self {
        self.error = Some(None);
        self
    }
}

impl Merge for DashboardState {
    type Patch = StateUpdate;

    fn merge(&mut self, patch: StateUpdate) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(data) = patch.data {
            self.data = data;
        }
        if let Some(filters) = patch.filters {
            self.filters = filters;
        }
        if let Some(charts) = patch.charts {
            self.charts = charts;
        }
        if let Some(loading) = patch.loading {
            self.loading = loading;
        }
        if let Some(error) = patch.error {
            self.error = error;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Store;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_theme_toggle() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::default(), Theme::Dark);
        assert_eq!(Theme::Light.to_string(), "light");
    }

    #[test]
    fn test_theme_serde() {
        assert_eq!(serde_json::to_string(&Theme::Dark).unwrap(), "\"dark\"");
        let theme: Theme = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(theme, Theme::Light);
    }

    #[test]
    fn test_shallow_merge() {
        let mut state = DashboardState::new(Theme::Light);
        state.filters.insert("language".into(), "Python".into());

        state.merge(StateUpdate::new().loading(true).error("boom"));

        assert!(state.loading);
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(state.filters.get("language").map(String::as_str), Some("Python"));

        state.merge(StateUpdate::new().clear_error());
        assert!(state.error.is_none());
        assert!(state.loading);
    }

    #[test]
    fn test_two_listeners_see_merged_state_once() {
        let store = Store::new(DashboardState::default());
        let calls = Arc::new(Mutex::new(Vec::new()));

        for name in ["first", "second"] {
            let calls = Arc::clone(&calls);
            store.subscribe(move |s: &DashboardState| {
                calls.lock().unwrap().push((name, s.loading, s.theme));
            });
        }

        store.set(StateUpdate::new().loading(true));

        assert_eq!(
            *calls.lock().unwrap(),
            vec![("first", true, Theme::Dark), ("second", true, Theme::Dark)]
        );
    }

    #[test]
    fn test_repositories_default_empty() {
        let state = DashboardState::default();
        assert!(state.repositories().is_empty());
    }
}
