use crate::{Error, Result};
use std::env;

const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub API client configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Personal access token, required for every request
    pub token: String,

    /// Base URL of the REST API (overridable for GitHub Enterprise and tests)
    pub api_base_url: String,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl GitHubConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            api_base_url: DEFAULT_API_URL.to_string(),
            user_agent: format!("gh-explorer/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }

    /// Create a new GitHubConfig from environment variables.
    ///
    /// A missing or empty `GITHUB_TOKEN` is fatal.
    pub fn from_env() -> Result<Self> {
        let token = env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::Config("GITHUB_TOKEN is not set".to_string()))?;

        let mut config = Self::new(token);

        if let Ok(url) = env::var("GITHUB_API_URL") {
            config.api_base_url = url;
        }

        config.timeout_secs = env::var("GITHUB_TIMEOUT")
            .ok()
            .map(|s| {
                s.parse()
                    .map_err(|_| Error::Config("Invalid GITHUB_TIMEOUT value".to_string()))
            })
            .transpose()?
            .unwrap_or(config.timeout_secs);

        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Get the base API URL without a trailing slash
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = GitHubConfig::new("t").with_api_base_url("http://127.0.0.1:1234/");
        assert_eq!(config.api_base_url(), "http://127.0.0.1:1234");
    }

    #[test]
    fn test_defaults() {
        let config = GitHubConfig::new("t");
        assert_eq!(config.api_base_url(), "https://api.github.com");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.user_agent.starts_with("gh-explorer/"));
    }
}
