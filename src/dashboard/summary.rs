//! Repository statistics and the charts derived from them

use serde::Serialize;
use std::collections::BTreeMap;

use crate::chart::{BarChartOptions, BarSeries, ChartBuilder, ChartConfig, PieChartOptions};
use crate::integrations::Repository;
use crate::stats::{calculate_stats, Stats};

/// Filter key matching a repository's primary language
pub const LANGUAGE_FILTER: &str = "language";

/// Totals shown in the statistics card
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoSummary {
    pub total_repos: usize,
    pub total_stars: u64,
    pub total_forks: u64,
    /// Distinct languages in first-seen order
    pub languages: Vec<String>,
    pub star_stats: Option<Stats>,
}

pub fn summarize(repos: &[Repository]) -> RepoSummary {
    let mut languages: Vec<String> = Vec::new();
    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        if !language.is_empty() && !languages.iter().any(|l| l == language) {
            languages.push(language.to_string());
        }
    }

    let stars: Vec<f64> = repos.iter().map(|r| r.stargazers_count as f64).collect();

    RepoSummary {
        total_repos: repos.len(),
        total_stars: repos.iter().map(|r| r.stargazers_count).sum(),
        total_forks: repos.iter().map(|r| r.forks_count).sum(),
        languages,
        star_stats: calculate_stats(&stars),
    }
}

/// Repositories passing every known filter.
///
/// The `language` filter matches case-insensitively; unknown keys are
/// ignored.
pub fn apply_filters(repos: &[Repository], filters: &BTreeMap<String, String>) -> Vec<Repository> {
    let language = filters
        .get(LANGUAGE_FILTER)
        .map(|l| l.trim())
        .filter(|l| !l.is_empty());

    repos
        .iter()
        .filter(|repo| match language {
            Some(wanted) => repo
                .language
                .as_deref()
                .is_some_and(|l| l.eq_ignore_ascii_case(wanted)),
            None => true,
        })
        .cloned()
        .collect()
}

/// Repository count per language, most common first
pub fn language_counts(repos: &[Repository]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for language in repos.iter().filter_map(|r| r.language.as_deref()) {
        if !language.is_empty() {
            *counts.entry(language).or_default() += 1;
        }
    }

    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(language, count)| (language.to_string(), count))
        .collect();
    // Stable sort keeps alphabetical order among equal counts
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    sorted
}

/// Languages doughnut and per-repository stars bar chart
pub fn build_charts(builder: &ChartBuilder, repos: &[Repository]) -> Vec<ChartConfig> {
    let counts = language_counts(repos);

    let languages = builder.pie_chart(PieChartOptions {
        labels: counts.iter().map(|(l, _)| l.clone()).collect(),
        data: counts.iter().map(|(_, c)| *c as f64).collect(),
        title: Some("Languages".to_string()),
        doughnut: true,
    });

    let mut by_stars: Vec<&Repository> = repos.iter().collect();
    by_stars.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));

    let stars = builder.bar_chart(BarChartOptions {
        labels: by_stars.iter().map(|r| r.name.clone()).collect(),
        datasets: vec![BarSeries {
            label: "Stars".to_string(),
            data: by_stars.iter().map(|r| r.stargazers_count as f64).collect(),
            colors: None,
        }],
        title: Some("Stars by repository".to_string()),
        horizontal: true,
    });

    vec![languages, stars]
}
