//! HTTP API Client
//!
//! Thin JSON client shared by the GitHub and USGS integrations.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::config::{Config, HttpConfig};

/// Base URLs of the external services
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// GitHub REST API root (e.g. "https://api.github.com")
    pub github: String,
    /// USGS water services root (e.g. "https://waterservices.usgs.gov/nwis")
    pub usgs: String,
}

impl Endpoints {
    pub fn from_config(config: &Config) -> Self {
        Self {
            github: config.github.api_url.trim_end_matches('/').to_string(),
            usgs: config.usgs.api_url.trim_end_matches('/').to_string(),
        }
    }
}

/// JSON-over-HTTP client for GitHub and USGS
pub struct ApiClient {
    client: Client,
    endpoints: Endpoints,
}

impl ApiClient {
    /// Create a client with the configured timeout and user agent
    pub fn new(http: &HttpConfig, endpoints: Endpoints) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .user_agent(http.user_agent.as_str())
            .build()
            .map_err(|e| ClientError::Build(e.to_string()))?;

        Ok(Self { client, endpoints })
    }

    /// Build a client straight from the full configuration
    pub fn from_config(config: &Config) -> ClientResult<Self> {
        Self::new(&config.http, Endpoints::from_config(config))
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// GET `url` and decode the JSON body.
    ///
    /// Non-success statuses and undecodable bodies are errors; failures are
    /// logged here and returned to the caller.
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        let result = self.try_fetch_json(url).await;

        if let Err(e) = &result {
            tracing::error!(url = %url, error = %e, "API fetch error");
        }
        result
    }

    async fn try_fetch_json<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(ClientError::from_request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(ClientError::from_request)?;
        let value = serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))?;

        tracing::debug!(url = %url, bytes = body.len(), "Fetched JSON");
        Ok(value)
    }
}

/// Errors from external API calls
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Request timeout")]
    Timeout,

    #[error("HTTP error! status: {status}")]
    Status { status: u16 },

    #[error("Malformed response: {0}")]
    Parse(String),
}

impl ClientError {
    fn from_request(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Request(e)
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
