//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and `HYDROFOLIO_*` environment overrides.
//!
//! Endpoints, the chart palette and theme tokens all live here and are
//! handed to the components that need them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::state::Theme;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,

    #[serde(default)]
    pub usgs: UsgsConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub http: HttpConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// GitHub source configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubConfig {
    #[serde(default = "default_github_api")]
    pub api_url: String,

    #[serde(default = "default_github_username")]
    pub username: String,

    /// Allow-list of repositories, in display order
    #[serde(default = "default_featured_repos")]
    pub featured_repos: Vec<String>,
}

fn default_github_api() -> String {
    "https://api.github.com".to_string()
}

fn default_github_username() -> String {
    "ductran27".to_string()
}

fn default_featured_repos() -> Vec<String> {
    [
        "LIS-landsurface-toolkit",
        "NOAA_FIM_flood-risk-mapping",
        "NASA_SWOT-hydrology",
        "MODIS-LULC-analysis",
        "USGS_Streamflow-analysis",
        "PySWATCal",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl GitHubConfig {
    /// Public profile page, used as the fallback link when nothing loads
    pub fn profile_url(&self) -> String {
        format!("https://github.com/{}", self.username)
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: default_github_api(),
            username: default_github_username(),
            featured_repos: default_featured_repos(),
        }
    }
}

/// USGS water services configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UsgsConfig {
    #[serde(default = "default_usgs_api")]
    pub api_url: String,

    /// Site queried when none is given explicitly
    #[serde(default = "default_usgs_site")]
    pub default_site: String,
}

fn default_usgs_api() -> String {
    "https://waterservices.usgs.gov/nwis".to_string()
}

fn default_usgs_site() -> String {
    "01646500".to_string()
}

impl Default for UsgsConfig {
    fn default() -> Self {
        Self {
            api_url: default_usgs_api(),
            default_site: default_usgs_site(),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8086
}

impl ServerConfig {
    /// Socket address string for binding
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

/// Outbound HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("Hydrofolio/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Chart colours, cycled by dataset position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub colors: Vec<String>,
}

impl Palette {
    /// Colour for the dataset at `index`, wrapping around the palette
    pub fn color(&self, index: usize) -> &str {
        if self.colors.is_empty() {
            return "#000000";
        }
        &self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: vec![
                "#0366d6".to_string(), // primary
                "#c5a059".to_string(), // secondary
                "#28a745".to_string(), // success
                "#ffc107".to_string(), // warning
                "#dc3545".to_string(), // danger
                "#17a2b8".to_string(), // info
            ],
        }
    }
}

/// Colour tokens for one theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeTokens {
    pub background: String,
    pub card_bg: String,
    pub text: String,
    pub border: String,
}

impl ThemeTokens {
    pub fn dark() -> Self {
        Self {
            background: "#1a1b27".to_string(),
            card_bg: "#24283b".to_string(),
            text: "#c9d1d9".to_string(),
            border: "#30363d".to_string(),
        }
    }

    pub fn light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            card_bg: "#f6f8fa".to_string(),
            text: "#24292f".to_string(),
            border: "#d0d7de".to_string(),
        }
    }
}

/// Theme and palette configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub default: Theme,

    #[serde(default)]
    pub palette: Palette,

    #[serde(default = "ThemeTokens::dark")]
    pub dark: ThemeTokens,

    #[serde(default = "ThemeTokens::light")]
    pub light: ThemeTokens,
}

impl ThemeConfig {
    /// Tokens for the given theme
    pub fn tokens(&self, theme: Theme) -> &ThemeTokens {
        match theme {
            Theme::Dark => &self.dark,
            Theme::Light => &self.light,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default: Theme::default(),
            palette: Palette::default(),
            dark: ThemeTokens::dark(),
            light: ThemeTokens::light(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` wins over the configured level. Calling this twice is
    /// harmless; the second install is ignored.
    pub fn init(&self) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "hydrofolio={0},hydrofolio_cli={0},tower_http=info",
                self.level
            ))
        });

        let registry = tracing_subscriber::registry().with(filter);

        let result = if self.format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
        } else {
            registry.with(tracing_subscriber::fmt::layer()).try_init()
        };

        if let Err(e) = result {
            eprintln!("tracing already initialised: {}", e);
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| match e {
            ConfigError::Parse { error, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                error,
            },
            other => other,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("hydrofolio").join("config.toml")),
            Some(PathBuf::from("/etc/hydrofolio/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("HYDROFOLIO_GITHUB_API") {
            self.github.api_url = url;
        }
        if let Some(user) = lookup("HYDROFOLIO_GITHUB_USER") {
            self.github.username = user;
        }
        if let Some(list) = lookup("HYDROFOLIO_FEATURED_REPOS") {
            self.github.featured_repos = list
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        if let Some(url) = lookup("HYDROFOLIO_USGS_API") {
            self.usgs.api_url = url;
        }

        if let Some(host) = lookup("HYDROFOLIO_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("HYDROFOLIO_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!(value = %port, "Ignoring invalid HYDROFOLIO_PORT"),
            }
        }

        if let Some(timeout) = lookup("HYDROFOLIO_HTTP_TIMEOUT") {
            if let Ok(secs) = timeout.parse() {
                self.http.timeout_secs = secs;
            }
        }

        if let Some(level) = lookup("HYDROFOLIO_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("HYDROFOLIO_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r##"# Hydrofolio Configuration
#
# Environment variables override these settings:
# - HYDROFOLIO_GITHUB_API
# - HYDROFOLIO_GITHUB_USER
# - HYDROFOLIO_FEATURED_REPOS (comma-separated)
# - HYDROFOLIO_USGS_API
# - HYDROFOLIO_HOST
# - HYDROFOLIO_PORT
# - HYDROFOLIO_HTTP_TIMEOUT
# - HYDROFOLIO_LOG_LEVEL
# - HYDROFOLIO_LOG_FORMAT

[github]
api_url = "https://api.github.com"
username = "ductran27"

# Repositories shown on the portfolio, in display order
featured_repos = [
    "LIS-landsurface-toolkit",
    "NOAA_FIM_flood-risk-mapping",
    "NASA_SWOT-hydrology",
    "MODIS-LULC-analysis",
    "USGS_Streamflow-analysis",
    "PySWATCal",
]

[usgs]
api_url = "https://waterservices.usgs.gov/nwis"

# Site used by `hydrofolio-cli streamflow` when no site is given
default_site = "01646500"

[server]
host = "0.0.0.0"
port = 8086
cors_origins = []

[http]
# Timeout for GitHub and USGS requests (seconds)
timeout_secs = 10

[theme]
# dark or light
default = "dark"

[theme.palette]
colors = ["#0366d6", "#c5a059", "#28a745", "#ffc107", "#dc3545", "#17a2b8"]

[theme.dark]
background = "#1a1b27"
card_bg = "#24283b"
text = "#c9d1d9"
border = "#30363d"

[theme.light]
background = "#ffffff"
card_bg = "#f6f8fa"
text = "#24292f"
border = "#d0d7de"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.github.username, "ductran27");
        assert_eq!(config.github.featured_repos.len(), 6);
        assert_eq!(config.server.port, 8086);
        assert_eq!(config.theme.default, Theme::Dark);
        assert_eq!(config.theme.palette.len(), 6);
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        let defaults = Config::default();
        assert_eq!(config.github.featured_repos, defaults.github.featured_repos);
        assert_eq!(config.theme.palette, defaults.theme.palette);
        assert_eq!(config.theme.light, ThemeTokens::light());
        assert_eq!(config.usgs.default_site, "01646500");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = Config::parse(
            r#"
            [github]
            username = "someone"

            [theme]
            default = "light"
            "#,
        )
        .unwrap();

        assert_eq!(config.github.username, "someone");
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.theme.default, Theme::Light);
        assert_eq!(config.http.timeout_secs, 10);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_toml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        match Config::load(&path).unwrap_err() {
            ConfigError::Parse { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("HYDROFOLIO_GITHUB_USER", "octocat"),
            ("HYDROFOLIO_FEATURED_REPOS", "b, a,,c"),
            ("HYDROFOLIO_PORT", "not-a-port"),
            ("HYDROFOLIO_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.github.username, "octocat");
        assert_eq!(config.github.featured_repos, vec!["b", "a", "c"]);
        assert_eq!(config.server.port, 8086);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.github.profile_url(), "https://github.com/octocat");
    }

    #[test]
    fn test_palette_wraps() {
        let palette = Palette::default();
        assert_eq!(palette.color(0), "#0366d6");
        assert_eq!(palette.color(6), "#0366d6");
        assert_eq!(palette.color(7), "#c5a059");

        let empty = Palette { colors: vec![] };
        assert!(empty.is_empty());
        assert_eq!(empty.color(3), "#000000");
    }
}
