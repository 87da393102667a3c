use super::cache::QueryKey;
use super::QueryStatus;
use crate::config::ExplorerConfig;
use crate::github::{endpoints, GitHubApi};
use crate::normalize::{
    normalize_account_search, normalize_list, normalize_repository, Account, Repository,
};
use crate::pagination::{self, require_page_number};
use crate::{Error, Result};
use futures::future::try_join_all;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One loaded page of a paginated query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page: u32,
    /// Declared size of the whole collection
    pub total_count: u64,
}

/// An account search hit with a preview of its repositories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub account: Account,
    pub repos: Vec<Repository>,
    /// Estimated from the preview's page count; 0 when there is no preview
    pub total_repo_count: u64,
    /// Repositories not included in the preview
    pub repos_left: u64,
}

pub type SearchPage = Page<SearchHit>;

/// Pages loaded so far for one key, with "load more" bookkeeping.
#[derive(Debug, Clone)]
pub struct InfiniteQuery<T> {
    key: QueryKey,
    generation: u64,
    page_size: u32,
    pages: Vec<Page<T>>,
}

impl<T> InfiniteQuery<T> {
    pub fn new(key: QueryKey, page_size: u32) -> Self {
        Self {
            key,
            generation: 0,
            page_size,
            pages: Vec::new(),
        }
    }

    pub fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Which activation of the key this is. Requests made for an earlier
    /// generation do not apply here even when the key matches.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pages(&self) -> &[Page<T>] {
        &self.pages
    }

    pub fn items(&self) -> impl Iterator<Item = &T> {
        self.pages.iter().flat_map(|p| p.items.iter())
    }

    /// Page to request next: 1 before anything loaded, then `page + 1`
    /// while the declared total exceeds what has been covered.
    pub fn next_page_param(&self) -> Option<u32> {
        match self.pages.last() {
            None => Some(1),
            Some(last) => pagination::next_page_param(last.total_count, self.page_size, last.page),
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.pages
            .last()
            .is_some_and(|last| pagination::has_next_page(last.total_count, self.page_size, last.page))
    }

    /// Append `page` if it is the one [`Self::next_page_param`] asked for.
    pub fn push_page(&mut self, page: Page<T>) -> bool {
        if self.next_page_param() != Some(page.page) {
            return false;
        }
        self.pages.push(page);
        true
    }

    /// A successful first page came back with nothing in it.
    pub fn is_empty_result(&self) -> bool {
        self.pages.first().is_some_and(|p| p.items.is_empty())
    }
}

/// Whether `term` is long enough to search for.
pub fn is_search_enabled(term: &str, min_length: usize) -> bool {
    term.trim().chars().count() >= min_length
}

/// Fetch one page of account search results.
///
/// Each hit's repository preview is fetched concurrently; any failure
/// fails the whole page. Previews are matched to hits by position.
pub async fn fetch_search_page(
    api: &dyn GitHubApi,
    config: &ExplorerConfig,
    term: &str,
    page_param: &Value,
) -> Result<SearchPage> {
    let page = require_page_number(page_param)?;
    let term = term.trim();
    debug!("Searching accounts for {:?}, page {}", term, page);

    let response = endpoints::search_users(api, term, config.search_page_size, page).await?;
    let results = normalize_account_search(&response.data)?;

    let previews = try_join_all(
        results
            .items
            .iter()
            .map(|account| endpoints::list_user_repos(api, &account.login, config.repo_preview_limit, 1)),
    )
    .await?;

    let preview_limit = u64::from(config.repo_preview_limit);
    let items = results
        .items
        .into_iter()
        .zip(previews)
        .map(|(account, preview)| {
            let repos = normalize_list(&preview.data, normalize_repository)?;
            let total_repo_count = if repos.is_empty() {
                0
            } else {
                u64::from(pagination::total_pages(preview.link.as_deref())) * preview_limit
            };
            Ok(SearchHit {
                account,
                repos,
                total_repo_count,
                repos_left: total_repo_count.saturating_sub(preview_limit),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SearchPage {
        items,
        page,
        total_count: results.total_count,
    })
}

/// One page request issued by a [`SearchSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub key: QueryKey,
    pub generation: u64,
    pub page: u32,
}

impl fmt::Display for SearchRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} page {} (#{})", self.key, self.page, self.generation)
    }
}

/// Outcome of [`SearchSession::set_term`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermChange {
    /// Same term after trimming; nothing changed
    Unchanged,
    /// Too short to search
    Disabled,
    /// Pages loaded earlier for this term are current again
    Restored(QueryKey),
    /// Nothing loaded yet; the first page should be requested
    Started(QueryKey),
}

/// State behind the account search view: the current term and the pages
/// loaded for it.
///
/// Pages loaded for earlier terms are kept, so returning to a term shows
/// them again without refetching. Every term change starts a new
/// generation, and a result is only applied if it was requested for the
/// current generation and is the page the query expects next.
pub struct SearchSession {
    api: Arc<dyn GitHubApi>,
    config: ExplorerConfig,
    term: String,
    query: Option<InfiniteQuery<SearchHit>>,
    loaded: HashMap<QueryKey, InfiniteQuery<SearchHit>>,
    generation: u64,
    status: QueryStatus,
}

impl SearchSession {
    pub fn new(api: Arc<dyn GitHubApi>, config: ExplorerConfig) -> Self {
        Self {
            api,
            config,
            term: String::new(),
            query: None,
            loaded: HashMap::new(),
            generation: 0,
            status: QueryStatus::Disabled,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn status(&self) -> &QueryStatus {
        &self.status
    }

    pub fn query(&self) -> Option<&InfiniteQuery<SearchHit>> {
        self.query.as_ref()
    }

    pub fn is_enabled(&self) -> bool {
        is_search_enabled(&self.term, self.config.min_search_length)
    }

    pub fn has_next_page(&self) -> bool {
        self.query.as_ref().is_some_and(|q| q.has_next_page())
    }

    /// Replace the search term.
    ///
    /// The outgoing query is kept if it loaded anything. An unchanged term
    /// keeps the current pages; a too-short term disables the search.
    pub fn set_term(&mut self, term: &str) -> TermChange {
        let term = term.trim();
        if term == self.term {
            return TermChange::Unchanged;
        }
        self.term = term.to_string();
        self.generation += 1;

        if let Some(previous) = self.query.take() {
            if !previous.pages().is_empty() {
                self.loaded.insert(previous.key().clone(), previous);
            }
        }

        if !self.is_enabled() {
            debug!("Search disabled for {:?}", term);
            self.status = QueryStatus::Disabled;
            return TermChange::Disabled;
        }

        let key = QueryKey::AccountSearch {
            term: self.term.clone(),
        };

        if let Some(query) = self.loaded.remove(&key) {
            debug!("Showing {} loaded pages for {}", query.pages().len(), key);
            self.status = Self::loaded_status(&query);
            self.query = Some(query.with_generation(self.generation));
            return TermChange::Restored(key);
        }

        info!("Starting account search {}", key);
        self.query = Some(
            InfiniteQuery::new(key.clone(), self.config.search_page_size)
                .with_generation(self.generation),
        );
        self.status = QueryStatus::Loading;
        TermChange::Started(key)
    }

    fn loaded_status(query: &InfiniteQuery<SearchHit>) -> QueryStatus {
        if query.is_empty_result() {
            QueryStatus::Empty
        } else {
            QueryStatus::Ready
        }
    }

    /// The next page request for the current term, if there is one.
    pub fn next_request(&self) -> Option<SearchRequest> {
        let query = self.query.as_ref()?;
        Some(SearchRequest {
            key: query.key().clone(),
            generation: query.generation(),
            page: query.next_page_param()?,
        })
    }

    /// A `'static` future fetching the page `request` names, for callers
    /// that run requests on their own tasks.
    pub fn request(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<SearchPage>> + Send + 'static {
        let api = Arc::clone(&self.api);
        let config = self.config.clone();
        let term = self.term.clone();
        let page_param = json!(request.page);
        async move { fetch_search_page(api.as_ref(), &config, &term, &page_param).await }
    }

    fn current(&mut self, request: &SearchRequest) -> Option<&mut InfiniteQuery<SearchHit>> {
        match self.query.as_mut() {
            Some(query)
                if query.key() == &request.key && query.generation() == request.generation =>
            {
                Some(query)
            }
            _ => {
                warn!("Discarding stale result for {}", request);
                None
            }
        }
    }

    /// Record a loaded page. Returns false if `request` is stale or the
    /// page is not the one the query expects next.
    pub fn apply_page(&mut self, request: &SearchRequest, page: SearchPage) -> bool {
        let Some(query) = self.current(request) else {
            return false;
        };
        if page.page != request.page || !query.push_page(page) {
            warn!("Discarding out-of-order result for {}", request);
            return false;
        }
        let status = Self::loaded_status(query);
        self.status = status;
        true
    }

    /// Record a failed request. Pages already loaded are kept.
    pub fn apply_error(&mut self, request: &SearchRequest, err: &Error) -> bool {
        if self.current(request).is_none() {
            return false;
        }
        warn!("Account search failed: {}", err.log_safe());
        self.status = QueryStatus::Failed(err.log_safe());
        true
    }

    /// Fetch the next page in place. Returns `Ok(false)` when there is
    /// nothing more to load.
    pub async fn fetch_next_page(&mut self) -> Result<bool> {
        let Some(request) = self.next_request() else {
            return Ok(false);
        };
        self.status = QueryStatus::Loading;

        match self.request(&request).await {
            Ok(page) => Ok(self.apply_page(&request, page)),
            Err(err) => {
                self.apply_error(&request, &err);
                Err(err)
            }
        }
    }
}
