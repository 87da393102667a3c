use super::cache::{QueryCache, QueryKey};
use super::fetch_all_pages;
use super::search::SearchSession;
use crate::config::ExplorerConfig;
use crate::github::{endpoints, GitHubApi, RepoCoordinate};
use crate::normalize::{
    normalize_account_details, normalize_branch, normalize_commit, normalize_detailed_commit,
    normalize_languages, normalize_list, normalize_repository, AccountDetails, Commit,
    DetailedCommit, DetailedRepo, LanguageUsage, Repository,
};
use crate::stats::{
    bucket_languages, language_extremes, merge_language_usage, monthly_activity,
    sort_by_bytes_desc, top_contributors, AccountTotals, Contributor, LanguageExtremes,
    LanguageShare, MonthlyActivity, TOP_CONTRIBUTORS,
};
use crate::Result;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

/// Repository with its languages and every branch name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoDetails {
    pub repo: Repository,
    pub languages: LanguageUsage,
    pub branches: Vec<String>,
}

/// Everything the account view shows.
#[derive(Debug, Clone, Serialize)]
pub struct AccountOverview {
    pub details: Arc<AccountDetails>,
    pub repos: Arc<Vec<DetailedRepo>>,
    pub totals: AccountTotals,
    /// Bucketed, largest first
    pub languages: Vec<LanguageShare>,
    pub extremes: Option<LanguageExtremes>,
}

/// Everything the repository view shows for one branch.
#[derive(Debug, Clone, Serialize)]
pub struct RepositoryOverview {
    pub details: Arc<RepoDetails>,
    pub branch: String,
    pub languages: Vec<LanguageShare>,
    pub commits: Arc<Vec<Commit>>,
    pub detailed_commits: Arc<Vec<DetailedCommit>>,
    pub activity: Vec<MonthlyActivity>,
    pub contributors: Vec<Contributor>,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Runs the explorer's queries against one injected API client.
///
/// Results are cached per [`QueryKey`] for the lifetime of the explorer.
pub struct Explorer {
    api: Arc<dyn GitHubApi>,
    config: ExplorerConfig,
    accounts: QueryCache<AccountDetails>,
    account_repos: QueryCache<Vec<DetailedRepo>>,
    repositories: QueryCache<RepoDetails>,
    commits: QueryCache<Vec<Commit>>,
    detailed_commits: QueryCache<Vec<DetailedCommit>>,
}

fn flatten_pages<T>(
    pages: &[crate::github::ApiResponse],
    normalize: fn(&Value) -> Result<T>,
) -> Result<Vec<T>> {
    let mut items = Vec::new();
    for page in pages {
        items.extend(normalize_list(&page.data, normalize)?);
    }
    Ok(items)
}

impl Explorer {
    pub fn new(api: Arc<dyn GitHubApi>, config: ExplorerConfig) -> Self {
        Self {
            api,
            config,
            accounts: QueryCache::new(),
            account_repos: QueryCache::new(),
            repositories: QueryCache::new(),
            commits: QueryCache::new(),
            detailed_commits: QueryCache::new(),
        }
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// A fresh account search session sharing this explorer's client.
    pub fn search_session(&self) -> SearchSession {
        SearchSession::new(Arc::clone(&self.api), self.config.clone())
    }

    pub async fn account(&self, login: &str) -> Result<Arc<AccountDetails>> {
        let key = QueryKey::Account {
            login: login.to_string(),
        };
        self.accounts
            .get_or_fetch(&key, || async {
                let response = endpoints::get_user(self.api.as_ref(), login).await?;
                normalize_account_details(&response.data)
            })
            .await
    }

    /// All of an account's repositories, most recently updated first, each
    /// with its language breakdown.
    pub async fn account_repositories(&self, login: &str) -> Result<Arc<Vec<DetailedRepo>>> {
        let key = QueryKey::AccountRepos {
            login: login.to_string(),
        };
        self.account_repos
            .get_or_fetch(&key, || async {
                let api = self.api.as_ref();
                let per_page = self.config.collection_page_size;

                let pages = fetch_all_pages(move |page| {
                    endpoints::list_user_repos(api, login, per_page, page)
                })
                .await?;
                let repos = flatten_pages(&pages, normalize_repository)?;
                debug!("Account {} has {} repositories", login, repos.len());

                let languages = try_join_all(repos.iter().map(|repo| {
                    let coordinate = RepoCoordinate::new(login, repo.name.as_str());
                    async move {
                        let response = endpoints::get_languages(api, &coordinate).await?;
                        normalize_languages(&response.data)
                    }
                }))
                .await?;

                Ok(repos
                    .into_iter()
                    .zip(languages)
                    .map(|(repo, languages)| DetailedRepo { repo, languages })
                    .collect())
            })
            .await
    }

    pub async fn account_overview(&self, login: &str) -> Result<AccountOverview> {
        info!("Loading account {}", login);
        let (details, repos) =
            futures::try_join!(self.account(login), self.account_repositories(login))?;

        let merged = merge_language_usage(&repos);
        Ok(AccountOverview {
            totals: AccountTotals::from_repos(&repos),
            languages: sort_by_bytes_desc(bucket_languages(&merged)),
            extremes: language_extremes(&merged),
            details,
            repos,
        })
    }

    /// Repository, languages and all branches, fetched concurrently.
    pub async fn repository(&self, repo: &RepoCoordinate) -> Result<Arc<RepoDetails>> {
        let key = QueryKey::Repository(repo.clone());
        self.repositories
            .get_or_fetch(&key, || async {
                let api = self.api.as_ref();
                let per_page = self.config.collection_page_size;

                let (info, languages, branch_pages) = futures::try_join!(
                    endpoints::get_repository(api, repo),
                    endpoints::get_languages(api, repo),
                    fetch_all_pages(move |page| endpoints::list_branches(api, repo, per_page, page))
                )?;

                Ok(RepoDetails {
                    repo: normalize_repository(&info.data)?,
                    languages: normalize_languages(&languages.data)?,
                    branches: flatten_pages(&branch_pages, normalize_branch)?
                        .into_iter()
                        .map(|b| b.name)
                        .collect(),
                })
            })
            .await
    }

    /// Full commit history of `branch`, newest first.
    pub async fn commits(&self, repo: &RepoCoordinate, branch: &str) -> Result<Arc<Vec<Commit>>> {
        let key = QueryKey::Commits {
            repo: repo.clone(),
            branch: branch.to_string(),
        };
        self.commits
            .get_or_fetch(&key, || async {
                let api = self.api.as_ref();
                let per_page = self.config.collection_page_size;
                let pages = fetch_all_pages(move |page| {
                    endpoints::list_commits(api, repo, branch, per_page, page)
                })
                .await?;
                flatten_pages(&pages, normalize_commit)
            })
            .await
    }

    /// Detail records for the first few of `commits` only.
    pub async fn latest_detailed_commits(
        &self,
        repo: &RepoCoordinate,
        branch: &str,
        commits: &[Commit],
    ) -> Result<Arc<Vec<DetailedCommit>>> {
        let key = QueryKey::DetailedCommits {
            repo: repo.clone(),
            branch: branch.to_string(),
        };
        let limit = self.config.detailed_commit_limit;
        self.detailed_commits
            .get_or_fetch(&key, || async {
                let api = self.api.as_ref();
                try_join_all(commits.iter().take(limit).map(|commit| async move {
                    let response = endpoints::get_commit(api, repo, &commit.sha).await?;
                    normalize_detailed_commit(&response.data)
                }))
                .await
            })
            .await
    }

    /// Load the repository view for `branch`, or the default branch.
    pub async fn repository_overview(
        &self,
        repo: &RepoCoordinate,
        branch: Option<&str>,
    ) -> Result<RepositoryOverview> {
        info!("Loading repository {}", repo);
        let details = self.repository(repo).await?;
        let branch = branch
            .map(str::to_string)
            .unwrap_or_else(|| details.repo.default_branch.clone());

        let commits = self.commits(repo, &branch).await?;
        let detailed_commits = self
            .latest_detailed_commits(repo, &branch, &commits)
            .await?;

        Ok(RepositoryOverview {
            languages: sort_by_bytes_desc(bucket_languages(&details.languages)),
            activity: monthly_activity(&commits),
            contributors: top_contributors(&commits, TOP_CONTRIBUTORS),
            last_updated: commits.iter().filter_map(|c| c.committed_at).max(),
            details,
            branch,
            commits,
            detailed_commits,
        })
    }

    /// Forget one cached result so the next request refetches it.
    pub async fn invalidate(&self, key: &QueryKey) -> bool {
        match key {
            QueryKey::AccountSearch { .. } => false,
            QueryKey::Account { .. } => self.accounts.invalidate(key).await,
            QueryKey::AccountRepos { .. } => self.account_repos.invalidate(key).await,
            QueryKey::Repository(_) => self.repositories.invalidate(key).await,
            QueryKey::Commits { .. } => self.commits.invalidate(key).await,
            QueryKey::DetailedCommits { .. } => self.detailed_commits.invalidate(key).await,
        }
    }
}
