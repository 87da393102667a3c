//! Query orchestration: caching, pagination fan-out and search sessions.

pub mod branches;
pub mod cache;
pub mod debounce;
pub mod explorer;
pub mod search;

pub use branches::BranchSelector;
pub use cache::{QueryCache, QueryKey};
pub use debounce::Debouncer;
pub use explorer::{AccountOverview, Explorer, RepoDetails, RepositoryOverview};
pub use search::{
    fetch_search_page, is_search_enabled, InfiniteQuery, Page, SearchHit, SearchPage,
    SearchRequest, SearchSession, TermChange,
};

use crate::github::ApiResponse;
use crate::pagination::remaining_pages;
use crate::Result;
use futures::future::try_join_all;
use std::fmt;
use std::future::Future;
use tracing::debug;

/// What a view should show for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus {
    /// Preconditions not met, nothing was requested
    Disabled,
    Loading,
    /// Succeeded with no results
    Empty,
    Failed(String),
    Ready,
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryStatus::Disabled => write!(f, "disabled"),
            QueryStatus::Loading => write!(f, "loading"),
            QueryStatus::Empty => write!(f, "no results"),
            QueryStatus::Failed(message) => write!(f, "failed: {message}"),
            QueryStatus::Ready => write!(f, "ready"),
        }
    }
}

/// Materialize a Link-paginated collection.
///
/// Page 1 is fetched first to learn the page count from its Link header;
/// pages 2..=N are then fetched concurrently. Responses come back in page
/// order. Any failed page fails the whole collection.
pub async fn fetch_all_pages<F, Fut>(fetch_page: F) -> Result<Vec<ApiResponse>>
where
    F: Fn(u32) -> Fut,
    Fut: Future<Output = Result<ApiResponse>>,
{
    let first = fetch_page(1).await?;
    let remaining = remaining_pages(first.link.as_deref());
    if !remaining.is_empty() {
        debug!("Fetching {} more pages", remaining.len());
    }

    let rest = try_join_all(remaining.into_iter().map(&fetch_page)).await?;

    let mut pages = Vec::with_capacity(rest.len() + 1);
    pages.push(first);
    pages.extend(rest);
    Ok(pages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;
    use std::sync::Mutex;

    const LINK: &str = r#"<https://api.github.com/repos/o/r/branches?page=2>; rel="next", <https://api.github.com/repos/o/r/branches?page=3>; rel="last""#;

    #[tokio::test]
    async fn test_fetch_all_pages_in_order() {
        let requested = Mutex::new(Vec::new());
        let pages = fetch_all_pages(|page| {
            requested.lock().unwrap().push(page);
            async move {
                let response = ApiResponse::new(json!([page]));
                Ok(if page == 1 {
                    response.with_link(LINK)
                } else {
                    response
                })
            }
        })
        .await
        .unwrap();

        let data: Vec<_> = pages.iter().map(|p| p.data.clone()).collect();
        assert_eq!(data, vec![json!([1]), json!([2]), json!([3])]);
        assert_eq!(*requested.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_single_page_without_link() {
        let pages = fetch_all_pages(|_| async { Ok(ApiResponse::new(json!([]))) })
            .await
            .unwrap();
        assert_eq!(pages.len(), 1);
    }

    #[tokio::test]
    async fn test_one_failed_page_fails_collection() {
        let result = fetch_all_pages(|page| async move {
            match page {
                1 => Ok(ApiResponse::new(json!([])).with_link(LINK)),
                3 => Err(Error::Transport {
                    status: Some(502),
                    message: "bad gateway".to_string(),
                }),
                _ => Ok(ApiResponse::new(json!([]))),
            }
        })
        .await;
        assert!(result.is_err());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(QueryStatus::Empty.to_string(), "no results");
        assert_eq!(
            QueryStatus::Failed("Resource not found".to_string()).to_string(),
            "failed: Resource not found"
        );
    }
}
