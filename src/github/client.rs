use crate::github::config::GitHubConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

/// One decoded API response: the JSON body plus the raw `Link` header, if any.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub data: Value,
    pub link: Option<String>,
}

impl ApiResponse {
    pub fn new(data: Value) -> Self {
        Self { data, link: None }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

/// Read-only access to the GitHub REST API.
///
/// The orchestrator only depends on this trait so tests can substitute an
/// in-memory double for the HTTP client.
#[async_trait]
pub trait GitHubApi: Send + Sync {
    /// GET `path` with the given query parameters.
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse>;
}

/// GitHub API client
#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubConfig,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );

        let auth_value = format!("Bearer {}", config.token);
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_value)
                .map_err(|e| Error::Config(format!("Invalid GitHub token: {e}")))?,
        );

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn url_for(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.config.api_base_url(), path))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl GitHubApi for GitHubClient {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse> {
        let url = self.url_for(path, query)?;
        debug!("GitHub API request: GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            error!("GitHub API error: {} - {}", status, error_body);

            let message = match status {
                StatusCode::NOT_FOUND => "GitHub resource not found".to_string(),
                StatusCode::UNAUTHORIZED => "GitHub authentication failed".to_string(),
                StatusCode::FORBIDDEN => "GitHub API access forbidden or rate limited".to_string(),
                _ => error_body,
            };
            return Err(Error::Transport {
                status: Some(status.as_u16()),
                message,
            });
        }

        let link = response
            .headers()
            .get(header::LINK)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        let data = response.json::<Value>().await?;

        Ok(ApiResponse { data, link })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = GitHubClient::new(GitHubConfig::new("ghp_test"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_unprintable_token() {
        let client = GitHubClient::new(GitHubConfig::new("bad\ntoken"));
        assert!(matches!(client, Err(Error::Config(_))));
    }

    #[test]
    fn test_url_encodes_query() {
        let client = GitHubClient::new(GitHubConfig::new("t")).unwrap();
        let url = client
            .url_for(
                "/search/users",
                &[("q", "rust lang".to_string()), ("page", "2".to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/search/users?q=rust+lang&page=2"
        );
    }
}
