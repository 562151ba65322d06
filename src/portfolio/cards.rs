//! Project card display model and markup

use serde::Serialize;

use crate::integrations::Repository;
use crate::render::escape_html;
use crate::utils::{format_date, parse_date};

/// Text shown when a repository has no description
pub const NO_DESCRIPTION: &str = "No description available";

/// Text shown when GitHub reports no primary language
pub const NO_LANGUAGE: &str = "N/A";

/// Everything a project card shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectCard {
    pub title: String,
    pub description: String,
    pub url: String,
    pub stars: u64,
    pub forks: u64,
    pub language: String,
    pub updated: Option<String>,
}

impl ProjectCard {
    pub fn from_repository(repo: &Repository) -> Self {
        Self {
            title: display_title(&repo.name),
            description: repo
                .description
                .as_deref()
                .filter(|d| !d.is_empty())
                .unwrap_or(NO_DESCRIPTION)
                .to_string(),
            url: repo.html_url.clone(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            language: repo
                .language
                .as_deref()
                .filter(|l| !l.is_empty())
                .unwrap_or(NO_LANGUAGE)
                .to_string(),
            updated: repo
                .updated_at
                .as_deref()
                .and_then(parse_date)
                .map(|d| format_date(&d, "YYYY-MM-DD")),
        }
    }

    pub fn to_html(&self) -> String {
        let updated = self
            .updated
            .as_deref()
            .map(|d| format!(r#"<span title="Updated">🕒 {}</span>"#, escape_html(d)))
            .unwrap_or_default();

        format!(
            r#"<div class="project-card"><h3>{title}</h3><p>{description}</p><div class="project-meta"><span title="Stars">⭐ {stars}</span><span title="Forks">🍴 {forks}</span><span title="Language">💻 {language}</span>{updated}</div><a href="{url}" target="_blank" rel="noopener noreferrer">View on GitHub →</a></div>"#,
            title = escape_html(&self.title),
            description = escape_html(&self.description),
            stars = self.stars,
            forks = self.forks,
            language = escape_html(&self.language),
            updated = updated,
            url = escape_html(&self.url),
        )
    }
}

/// Repository name with `_` and `-` turned into spaces
pub fn display_title(name: &str) -> String {
    name.replace(['_', '-'], " ")
}

/// Markup for the project grid: cards, or the fallback when there are none
pub fn render_grid(cards: &[ProjectCard], fallback_url: &str) -> String {
    if cards.is_empty() {
        return format!(
            r#"<p class="empty-state">Unable to load projects. Please visit <a href="{}">GitHub</a> directly.</p>"#,
            escape_html(fallback_url)
        );
    }

    cards.iter().map(ProjectCard::to_html).collect()
}

/// Placeholder painted while repositories load
pub fn loading_placeholder() -> String {
    r#"<div class="loading"></div>"#.to_string()
}
