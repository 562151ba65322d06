//! Portfolio
//!
//! Fetches the user's repositories, keeps the featured ones in their
//! configured order, and paints them as cards into the project grid.
//!
//! Fetch failures never reach the caller: they are logged and the grid
//! shows the empty state with a link to the GitHub profile.

mod cards;

pub use cards::{
    display_title, loading_placeholder, render_grid, ProjectCard, NO_DESCRIPTION, NO_LANGUAGE,
};

use std::sync::Arc;

use crate::config::GitHubConfig;
use crate::integrations::{Repository, RepositorySource};
use crate::render::{containers, Surface};

/// Featured repositories from `repos`, ordered like `allow_list`.
///
/// The first repository matching each name wins; names with no match are
/// dropped.
pub fn select_featured(repos: &[Repository], allow_list: &[String]) -> Vec<Repository> {
    let mut selected: Vec<Repository> = Vec::with_capacity(allow_list.len());

    for name in allow_list {
        if selected.iter().any(|r| &r.name == name) {
            continue;
        }
        if let Some(repo) = repos.iter().find(|r| &r.name == name) {
            selected.push(repo.clone());
        }
    }

    selected
}

/// Loads and paints the featured repositories
pub struct Portfolio {
    source: Arc<dyn RepositorySource>,
    github: GitHubConfig,
}

impl Portfolio {
    pub fn new(source: Arc<dyn RepositorySource>, github: GitHubConfig) -> Self {
        Self { source, github }
    }

    /// Featured repositories, or an empty list if the fetch failed
    pub async fn load(&self) -> Vec<Repository> {
        match self.source.fetch_repositories(&self.github.username).await {
            Ok(repos) => {
                let featured = select_featured(&repos, &self.github.featured_repos);
                tracing::info!(
                    fetched = repos.len(),
                    featured = featured.len(),
                    "Loaded portfolio repositories"
                );
                featured
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching repositories");
                Vec::new()
            }
        }
    }

    /// Grid markup for the featured repositories, or the empty state
    pub async fn render(&self) -> String {
        let cards: Vec<ProjectCard> = self
            .load()
            .await
            .iter()
            .map(ProjectCard::from_repository)
            .collect();
        render_grid(&cards, &self.github.profile_url())
    }

    /// Paint the loading placeholder, fetch, then paint the grid.
    ///
    /// Returns the grid markup painted by this call; the surface may be
    /// repainted by someone else before the caller reads it.
    pub async fn render_into(&self, surface: &dyn Surface) -> String {
        surface.paint(containers::PROJECT_GRID, loading_placeholder());

        let grid = self.render().await;
        surface.paint(containers::PROJECT_GRID, grid.clone());
        grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::{ClientError, ClientResult};
    use crate::render::MemorySurface;
    use async_trait::async_trait;

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
            Err(ClientError::Status { status: 500 })
        }
    }

    fn names(repos: &[Repository]) -> Vec<&str> {
        repos.iter().map(|r| r.name.as_str()).collect()
    }

    fn allow(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_select_featured_follows_allow_list_order() {
        let repos = vec![Repository::named("A"), Repository::named("B")];
        let featured = select_featured(&repos, &allow(&["B", "A"]));
        assert_eq!(names(&featured), vec!["B", "A"]);
    }

    #[test]
    fn test_select_featured_filters_and_collapses() {
        let mut first = Repository::named("A");
        first.stargazers_count = 1;
        let mut second = Repository::named("A");
        second.stargazers_count = 2;

        let repos = vec![Repository::named("other"), first, second, Repository::named("C")];
        let featured = select_featured(&repos, &allow(&["C", "missing", "A", "A"]));

        assert_eq!(names(&featured), vec!["C", "A"]);
        assert_eq!(featured[1].stargazers_count, 1);
    }

    #[tokio::test]
    async fn test_render_into_paints_cards() {
        let source = Arc::new(FixedSource(vec![
            Repository::named("PySWATCal"),
            Repository::named("NASA_SWOT-hydrology"),
            Repository::named("unrelated"),
        ]));
        let portfolio = Portfolio::new(source, GitHubConfig::default());
        let surface = MemorySurface::new();

        let html = portfolio.render_into(&surface).await;
        assert_eq!(surface.content(containers::PROJECT_GRID), Some(html.clone()));

        let swot = html.find("NASA SWOT hydrology").unwrap();
        let swat = html.find("PySWATCal").unwrap();
        assert!(swot < swat);
        assert!(!html.contains("unrelated"));
    }

    #[tokio::test]
    async fn test_render_ignores_later_repaints() {
        let source = Arc::new(FixedSource(vec![Repository::named("PySWATCal")]));
        let portfolio = Portfolio::new(source, GitHubConfig::default());
        let surface = MemorySurface::new();

        let html = portfolio.render_into(&surface).await;
        surface.paint(containers::PROJECT_GRID, loading_placeholder());

        assert!(html.contains("PySWATCal"));
        assert_eq!(html, portfolio.render().await);
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_to_empty_state() {
        let portfolio = Portfolio::new(Arc::new(FailingSource), GitHubConfig::default());
        let surface = MemorySurface::new();

        let html = portfolio.render_into(&surface).await;
        assert_eq!(surface.content(containers::PROJECT_GRID), Some(html.clone()));
        assert!(html.contains("Unable to load projects"));
        assert!(html.contains("https://github.com/ductran27"));
    }
}
