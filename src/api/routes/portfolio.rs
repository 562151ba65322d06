//! Portfolio Routes
//!
//! - GET / - Portfolio page with the featured project grid
//! - GET /api/v1/repos - Featured repositories as JSON cards
//! - GET /api/v1/profile - GitHub profile of the configured user

use axum::{extract::State, response::Html, Json};
use std::sync::Arc;

use crate::api::dto::ReposResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::integrations::GitHubUser;
use crate::portfolio::ProjectCard;
use crate::render::{containers, escape_html, page};

/// GET /
pub async fn portfolio_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let grid = state.portfolio.render_into(state.surface.as_ref()).await;
    let github = &state.config.github;

    let body = format!(
        r#"<header><h1>{name}</h1><p>Hydrology and water resources research</p><nav><a href="/dashboard">Dashboard</a> · <a href="{profile}">GitHub</a></nav></header>
<section id="projects"><h2>Featured Projects</h2><div id="{id}" class="project-grid">{grid}</div></section>"#,
        name = escape_html(&github.username),
        profile = escape_html(&github.profile_url()),
        id = containers::PROJECT_GRID,
        grid = grid,
    );

    let tokens = state.config.theme.tokens(state.config.theme.default);
    Html(page("Projects", tokens, &body))
}

/// GET /api/v1/repos
pub async fn list_repos(State(state): State<Arc<AppState>>) -> Json<ReposResponse> {
    let repos = state.portfolio.load().await;
    let repositories: Vec<ProjectCard> = repos.iter().map(ProjectCard::from_repository).collect();

    Json(ReposResponse {
        username: state.config.github.username.clone(),
        total: repositories.len(),
        repositories,
    })
}

/// GET /api/v1/profile
pub async fn profile(State(state): State<Arc<AppState>>) -> ApiResult<Json<GitHubUser>> {
    let user = state
        .client
        .github_user(&state.config.github.username)
        .await?;
    Ok(Json(user))
}
