//! GitHub Integration
//!
//! Fetches the public repositories and profile of a GitHub user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::client::{ApiClient, ClientResult};

/// A repository as returned by the GitHub REST API.
///
/// Missing fields fall back to defaults so a sparse record still renders.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Repository {
    /// Minimal record, mostly for tests and fixtures
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Public profile of a GitHub user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
}

/// Anything that can list a user's repositories
#[async_trait]
pub trait RepositorySource: Send + Sync {
    async fn fetch_repositories(&self, username: &str) -> ClientResult<Vec<Repository>>;
}

impl ApiClient {
    /// `GET /users/{username}`
    pub async fn github_user(&self, username: &str) -> ClientResult<GitHubUser> {
        let url = format!(
            "{}/users/{}",
            self.endpoints().github,
            urlencoding::encode(username)
        );
        self.fetch_json(&url).await
    }

    /// `GET /users/{username}/repos`, most recently updated first
    pub async fn github_repos(&self, username: &str) -> ClientResult<Vec<Repository>> {
        let url = format!(
            "{}/users/{}/repos?sort=updated&per_page=100",
            self.endpoints().github,
            urlencoding::encode(username)
        );
        let repos: Vec<Repository> = self.fetch_json(&url).await?;

        tracing::debug!(username = %username, count = repos.len(), "Fetched GitHub repositories");
        Ok(repos)
    }
}

#[async_trait]
impl RepositorySource for ApiClient {
    async fn fetch_repositories(&self, username: &str) -> ClientResult<Vec<Repository>> {
        self.github_repos(username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::integrations::{ClientError, Endpoints};
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(
            &HttpConfig::default(),
            Endpoints {
                github: server.uri(),
                usgs: server.uri(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_repository_sparse_record() {
        let repo: Repository = serde_json::from_str(r#"{"name": "PySWATCal"}"#).unwrap();
        assert_eq!(repo.name, "PySWATCal");
        assert_eq!(repo.description, None);
        assert_eq!(repo.stargazers_count, 0);
        assert_eq!(repo.language, None);
    }

    #[test]
    fn test_repository_null_fields() {
        let repo: Repository = serde_json::from_str(
            r#"{"name": "x", "description": null, "language": null, "stargazers_count": 4}"#,
        )
        .unwrap();
        assert_eq!(repo.description, None);
        assert_eq!(repo.stargazers_count, 4);
    }

    #[tokio::test]
    async fn test_github_repos_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/ductran27/repos"))
            .and(query_param("sort", "updated"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[
                    {"name": "PySWATCal", "html_url": "https://github.com/ductran27/PySWATCal",
                     "stargazers_count": 12, "forks_count": 3, "language": "Python"},
                    {"name": "dotfiles", "description": "misc"}
                ]"#,
            ))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let repos = client.fetch_repositories("ductran27").await.unwrap();

        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "PySWATCal");
        assert_eq!(repos[0].forks_count, 3);
        assert_eq!(repos[1].description.as_deref(), Some("misc"));
    }

    #[tokio::test]
    async fn test_github_repos_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/nobody/repos"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.github_repos("nobody").await.unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 404 }));
    }

    #[tokio::test]
    async fn test_github_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/ductran27"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"login": "ductran27", "name": "Duc Tran", "public_repos": 40, "followers": 10}"#,
            ))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let user = client.github_user("ductran27").await.unwrap();
        assert_eq!(user.login, "ductran27");
        assert_eq!(user.public_repos, 40);
    }
}
