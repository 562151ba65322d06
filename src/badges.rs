//! README Metric Badges
//!
//! Rewrites the numbers inside shields.io badge URLs for citation metrics.
//! Only metrics that are present are touched, and the README is written
//! back only when its content actually changed.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::group_thousands;

#[derive(Debug, thiserror::Error)]
pub enum BadgeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid badge pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Citation metrics; `None` leaves the matching badge alone
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScholarMetrics {
    pub h_index: Option<u64>,
    pub citations: Option<u64>,
    pub publications: Option<u64>,
    pub i10_index: Option<u64>,
}

impl ScholarMetrics {
    pub fn is_empty(&self) -> bool {
        self.h_index.is_none()
            && self.citations.is_none()
            && self.publications.is_none()
            && self.i10_index.is_none()
    }
}

/// Badge text with every present metric substituted
pub fn update_badges(content: &str, metrics: &ScholarMetrics) -> Result<String, BadgeError> {
    let mut content = content.to_string();

    if let Some(h) = metrics.h_index {
        content = replace(&content, r"(H--Index-)\d+(-blue)", &h.to_string())?;
    }
    if let Some(citations) = metrics.citations {
        content = replace(
            &content,
            r"(Citations-)[0-9,]+\+?(-green)",
            &group_thousands(citations),
        )?;
    }
    if let Some(publications) = metrics.publications {
        content = replace(
            &content,
            r"(Publications-)\d+\+?(-orange)",
            &format!("{}+", publications),
        )?;
    }
    if let Some(i10) = metrics.i10_index {
        content = replace(&content, r"(i10--Index-)\d+(-a855f7)", &i10.to_string())?;
    }

    Ok(content)
}

/// Update the badges in the file at `path`. Returns true if it was rewritten.
pub fn update_readme(path: &Path, metrics: &ScholarMetrics) -> Result<bool, BadgeError> {
    if metrics.is_empty() {
        tracing::info!("No metrics to update");
        return Ok(false);
    }

    let original = std::fs::read_to_string(path)?;
    let updated = update_badges(&original, metrics)?;

    if updated == original {
        tracing::info!(path = %path.display(), "Badges already up to date");
        return Ok(false);
    }

    std::fs::write(path, updated)?;
    tracing::info!(path = %path.display(), ?metrics, "Badges updated");
    Ok(true)
}

fn replace(content: &str, pattern: &str, value: &str) -> Result<String, BadgeError> {
    let re = Regex::new(pattern)?;
    let replacement = format!("${{1}}{}${{2}}", value);
    Ok(re.replace_all(content, replacement.as_str()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const README: &str = "\
![H-Index](https://img.shields.io/badge/H--Index-7-blue)
![Citations](https://img.shields.io/badge/Citations-512+-green)
![Publications](https://img.shields.io/badge/Publications-25-orange)
![i10](https://img.shields.io/badge/i10--Index-5-a855f7)
";

    fn metrics() -> ScholarMetrics {
        ScholarMetrics {
            h_index: Some(9),
            citations: Some(1234),
            publications: Some(30),
            i10_index: Some(8),
        }
    }

    #[test]
    fn test_update_badges() {
        let updated = update_badges(README, &metrics()).unwrap();
        assert!(updated.contains("H--Index-9-blue"));
        assert!(updated.contains("Citations-1,234-green"));
        assert!(updated.contains("Publications-30+-orange"));
        assert!(updated.contains("i10--Index-8-a855f7"));
    }

    #[test]
    fn test_missing_metrics_leave_badges() {
        let partial = ScholarMetrics {
            h_index: Some(10),
            ..Default::default()
        };
        let updated = update_badges(README, &partial).unwrap();
        assert!(updated.contains("H--Index-10-blue"));
        assert!(updated.contains("Citations-512+-green"));
        assert!(updated.contains("Publications-25-orange"));
    }

    #[test]
    fn test_grouped_citations_are_replaced() {
        let content = "Citations-1,001+-green";
        let updated = update_badges(
            content,
            &ScholarMetrics {
                citations: Some(2000),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(updated, "Citations-2,000-green");
    }

    #[test]
    fn test_update_readme_writes_only_on_change() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, README).unwrap();

        assert!(update_readme(&path, &metrics()).unwrap());
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("H--Index-9-blue"));

        assert!(!update_readme(&path, &metrics()).unwrap());
        assert!(!update_readme(&path, &ScholarMetrics::default()).unwrap());
    }

    #[test]
    fn test_update_readme_missing_file() {
        let dir = tempdir().unwrap();
        let result = update_readme(&dir.path().join("missing.md"), &metrics());
        assert!(matches!(result, Err(BadgeError::Io(_))));
    }
}
