use crate::error::{Error, Result};
use crate::github::GitHubConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Settings {
    pub github: GitHubConfig,
    pub explorer: ExplorerConfig,
}

/// Sizes and limits used by the query orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Accounts per search page
    pub search_page_size: u32,
    /// Repositories previewed under each search hit
    pub repo_preview_limit: u32,
    /// Minimum trimmed search term length before a search runs
    pub min_search_length: usize,
    /// Quiet window after the last keystroke
    pub search_debounce_ms: u64,
    /// Page size when materializing whole collections (branches, commits, repos)
    pub collection_page_size: u32,
    /// How many of the latest commits are fetched individually for stats
    pub detailed_commit_limit: usize,
    /// Branches shown before "show more", and the increment
    pub branch_display_limit: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            search_page_size: 10,
            repo_preview_limit: 2,
            min_search_length: 3,
            search_debounce_ms: 300,
            collection_page_size: 100,
            detailed_commit_limit: 5,
            branch_display_limit: 5,
        }
    }
}

impl ExplorerConfig {
    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    /// Load limits from environment variables, keeping defaults for unset ones
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            search_page_size: env_or("SEARCH_PAGE_SIZE", defaults.search_page_size)?,
            repo_preview_limit: env_or("REPO_PREVIEW_LIMIT", defaults.repo_preview_limit)?,
            min_search_length: env_or("MIN_SEARCH_LENGTH", defaults.min_search_length)?,
            search_debounce_ms: env_or("SEARCH_DEBOUNCE_MS", defaults.search_debounce_ms)?,
            collection_page_size: env_or("COLLECTION_PAGE_SIZE", defaults.collection_page_size)?,
            detailed_commit_limit: env_or(
                "DETAILED_COMMIT_LIMIT",
                defaults.detailed_commit_limit,
            )?,
            branch_display_limit: env_or("BRANCH_DISPLAY_LIMIT", defaults.branch_display_limit)?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.search_page_size == 0 || self.collection_page_size == 0 {
            return Err(Error::Config("Page sizes must be non-zero".to_string()));
        }

        if self.collection_page_size > 100 {
            return Err(Error::Config(
                "COLLECTION_PAGE_SIZE cannot exceed GitHub's maximum of 100".to_string(),
            ));
        }

        if self.repo_preview_limit == 0 || self.branch_display_limit == 0 {
            return Err(Error::Config(
                "Preview and display limits must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| Error::Config(format!("Invalid {name} value"))),
        Err(_) => Ok(default),
    }
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// Fails when `GITHUB_TOKEN` is missing; there is no anonymous mode.
    pub fn from_env() -> Result<Self> {
        Ok(Settings {
            github: GitHubConfig::from_env()?,
            explorer: ExplorerConfig::from_env()?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.github.token.trim().is_empty() {
            return Err(Error::Config("GITHUB_TOKEN is not set".to_string()));
        }
        self.explorer.validate()
    }
}
