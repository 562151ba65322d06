//! Render Boundary
//!
//! Components paint HTML fragments into named containers on a [`Surface`].
//! [`MemorySurface`] keeps the latest fragment per container so the HTTP
//! layer can serve it.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::ThemeTokens;

/// Container ids used by the pages
pub mod containers {
    pub const PROJECT_GRID: &str = "projectGrid";
    pub const HYDRO_DASHBOARD: &str = "hydroDashboard";
    pub const STATS_CONTENT: &str = "statsContent";
}

/// Something fragments can be painted into
pub trait Surface: Send + Sync {
    /// Replace the content of `container`
    fn paint(&self, container: &str, html: String);

    /// Empty `container`
    fn clear(&self, container: &str);
}

/// Surface that keeps painted fragments in memory
#[derive(Debug, Default)]
pub struct MemorySurface {
    containers: Mutex<HashMap<String, String>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content of `container`, if it was ever painted
    pub fn content(&self, container: &str) -> Option<String> {
        self.lock().get(container).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.containers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Surface for MemorySurface {
    fn paint(&self, container: &str, html: String) {
        tracing::trace!(container = %container, bytes = html.len(), "Painted container");
        self.lock().insert(container.to_string(), html);
    }

    fn clear(&self, container: &str) {
        self.lock().insert(container.to_string(), String::new());
    }
}

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a body fragment into a standalone HTML document
pub fn page(title: &str, tokens: &ThemeTokens, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ background: {background}; color: {text}; font-family: system-ui, sans-serif; margin: 0; padding: 2rem; }}
.project-grid, .dashboard-grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1rem; }}
.project-card, .card {{ background: {card_bg}; border: 1px solid {border}; border-radius: 8px; padding: 1rem; }}
.project-meta {{ margin-top: 0.5rem; color: #8b949e; font-size: 0.85rem; display: flex; gap: 1rem; }}
a {{ color: #0366d6; }}
</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        background = tokens.background,
        text = tokens.text,
        card_bg = tokens.card_bg,
        border = tokens.border,
        body = body,
    )
}
