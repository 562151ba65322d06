//! Dashboard markup

use crate::chart::ChartConfig;
use crate::config::ThemeTokens;
use crate::render::escape_html;
use crate::state::DashboardState;
use crate::utils::format_number;

use super::summary::RepoSummary;

pub fn render_loading() -> String {
    r#"<div class="loading">Loading dashboard...</div>"#.to_string()
}

pub fn render_error(message: &str) -> String {
    format!(r#"<div class="error">Error: {}</div>"#, escape_html(message))
}

/// Dashboard body for `state`: loading banner, error banner or full view
pub fn render_dashboard(
    state: &DashboardState,
    summary: &RepoSummary,
    tokens: &ThemeTokens,
) -> String {
    if state.loading {
        return render_loading();
    }
    if let Some(message) = &state.error {
        return render_error(message);
    }

    let filter = state
        .filters
        .iter()
        .map(|(k, v)| format!("{}: {}", escape_html(k), escape_html(v)))
        .collect::<Vec<_>>()
        .join(", ");
    let filter_line = if filter.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="filters">Filtered by {}</p>"#, filter)
    };

    format!(
        r#"<div class="dashboard" data-theme="{theme}" style="background: {background}; color: {text};">
<header class="dashboard-header">
<h2>Hydrology Research Dashboard</h2>
<div class="dashboard-actions">
<button type="button" data-action="refresh">Refresh</button>
<button type="button" data-action="toggle-theme">Toggle Theme</button>
</div>
</header>
{filter_line}<div class="dashboard-grid">
<div class="card"><h3>Repositories</h3><p class="metric">{repos}</p></div>
<div class="card"><h3>Total Stars</h3><p class="metric">{stars}</p></div>
<div class="card"><h3>Total Forks</h3><p class="metric">{forks}</p></div>
<div class="card"><h3>Languages</h3><p class="metric">{languages}</p></div>
</div>
<div class="dashboard-charts">
{charts}
</div>
</div>"#,
        theme = state.theme,
        background = tokens.background,
        text = tokens.text,
        filter_line = filter_line,
        repos = format_number(summary.total_repos as f64),
        stars = format_number(summary.total_stars as f64),
        forks = format_number(summary.total_forks as f64),
        languages = summary.languages.len(),
        charts = render_charts(&state.charts),
    )
}

/// Statistics card content
pub fn render_stats(summary: &RepoSummary) -> String {
    let mut out = format!(
        r#"<ul class="stats-list"><li>Public repositories: {}</li><li>Stars: {}</li><li>Forks: {}</li>"#,
        format_number(summary.total_repos as f64),
        format_number(summary.total_stars as f64),
        format_number(summary.total_forks as f64),
    );

    if let Some(stats) = &summary.star_stats {
        out.push_str(&format!(
            "<li>Stars per repository: mean {:.1}, median {:.1}, max {}</li>",
            stats.mean,
            stats.median,
            format_number(stats.max),
        ));
    }
    if !summary.languages.is_empty() {
        let languages: Vec<String> = summary.languages.iter().map(|l| escape_html(l)).collect();
        out.push_str(&format!("<li>Languages: {}</li>", languages.join(", ")));
    }

    out.push_str("</ul>");
    out
}

/// One canvas plus its JSON configuration per chart
fn render_charts(charts: &[ChartConfig]) -> String {
    charts
        .iter()
        .enumerate()
        .map(|(i, chart)| {
            // Serializing plain data records cannot fail
            let json = serde_json::to_string(chart).unwrap_or_else(|_| "{}".to_string());
            format!(
                r#"<div class="chart-container"><canvas id="chart-{i}"></canvas><script type="application/json" data-chart="chart-{i}">{json}</script></div>"#,
                i = i,
                json = json.replace("</", "<\\/"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
