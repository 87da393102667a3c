//! Derived views over normalized data. Everything here is pure.

pub mod activity;
pub mod colors;
pub mod contributors;
pub mod languages;

pub use activity::{monthly_activity, MonthlyActivity};
pub use colors::{display_colors, language_color};
pub use contributors::{top_contributors, Contributor, TOP_CONTRIBUTORS};
pub use languages::{
    bucket_languages, language_extremes, merge_language_usage, sort_by_bytes_desc,
    LanguageExtremes, LanguageShare, OTHER_LANGUAGE,
};

use crate::normalize::{DetailedRepo, Repository};
use serde::Serialize;

/// Stars needed before the issue ratio is considered meaningful.
pub const LOW_ISSUE_MIN_STARS: u64 = 150;

/// True when open issues are under 5% of stars on a repository with at
/// least 150 stars. Zero stars never qualifies.
pub fn is_low_issue_count(open_issues: u64, stars: u64) -> bool {
    if stars < LOW_ISSUE_MIN_STARS {
        return false;
    }
    // issues / stars < 0.05
    u128::from(open_issues) * 20 < u128::from(stars)
}

/// Badges shown next to a repository name.
pub fn repository_tags(repo: &Repository) -> Vec<String> {
    let mut tags = vec![repo.default_branch.clone()];
    if repo.archived {
        tags.push("Archived".to_string());
    }
    if repo.forked {
        tags.push("Forked".to_string());
    }
    if is_low_issue_count(repo.open_issues_count, repo.stargazers_count) {
        tags.push("Low Issue Count".to_string());
    }
    tags
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccountTotals {
    pub repos: usize,
    pub stars: u64,
    pub forks: u64,
}

impl AccountTotals {
    pub fn from_repos(repos: &[DetailedRepo]) -> Self {
        Self {
            repos: repos.len(),
            stars: repos.iter().map(|r| r.repo.stargazers_count).sum(),
            forks: repos.iter().map(|r| r.repo.forks_count).sum(),
        }
    }
}
