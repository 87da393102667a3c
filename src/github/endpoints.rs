//! Request builders for the three resource families the explorer reads:
//! accounts, repository search, and per-repository sub-resources.

use crate::github::client::{ApiResponse, GitHubApi};
use crate::github::parser::{encode_path, RepoCoordinate};
use crate::Result;

pub async fn search_users(
    api: &dyn GitHubApi,
    term: &str,
    per_page: u32,
    page: u32,
) -> Result<ApiResponse> {
    api.get(
        "/search/users",
        &[
            ("q", term.to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ],
    )
    .await
}

pub async fn get_user(api: &dyn GitHubApi, login: &str) -> Result<ApiResponse> {
    api.get(&encode_path(&["users", login])?, &[]).await
}

/// List an account's repositories, most recently updated first.
pub async fn list_user_repos(
    api: &dyn GitHubApi,
    login: &str,
    per_page: u32,
    page: u32,
) -> Result<ApiResponse> {
    api.get(
        &encode_path(&["users", login, "repos"])?,
        &[
            ("sort", "updated".to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ],
    )
    .await
}

pub async fn get_repository(api: &dyn GitHubApi, repo: &RepoCoordinate) -> Result<ApiResponse> {
    api.get(&repo.api_path(&[])?, &[]).await
}

pub async fn get_languages(api: &dyn GitHubApi, repo: &RepoCoordinate) -> Result<ApiResponse> {
    api.get(&repo.api_path(&["languages"])?, &[]).await
}

pub async fn list_branches(
    api: &dyn GitHubApi,
    repo: &RepoCoordinate,
    per_page: u32,
    page: u32,
) -> Result<ApiResponse> {
    api.get(
        &repo.api_path(&["branches"])?,
        &[
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ],
    )
    .await
}

pub async fn list_commits(
    api: &dyn GitHubApi,
    repo: &RepoCoordinate,
    branch: &str,
    per_page: u32,
    page: u32,
) -> Result<ApiResponse> {
    api.get(
        &repo.api_path(&["commits"])?,
        &[
            ("sha", branch.to_string()),
            ("per_page", per_page.to_string()),
            ("page", page.to_string()),
        ],
    )
    .await
}

pub async fn get_commit(
    api: &dyn GitHubApi,
    repo: &RepoCoordinate,
    sha: &str,
) -> Result<ApiResponse> {
    api.get(&repo.api_path(&["commits", sha])?, &[]).await
}
