use crate::github::RepoCoordinate;
use crate::Result;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

/// Identity of one query. Two requests with equal keys share a result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    AccountSearch { term: String },
    Account { login: String },
    AccountRepos { login: String },
    Repository(RepoCoordinate),
    Commits { repo: RepoCoordinate, branch: String },
    DetailedCommits { repo: RepoCoordinate, branch: String },
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryKey::AccountSearch { term } => write!(f, "accounts/search/{term}"),
            QueryKey::Account { login } => write!(f, "accounts/{login}"),
            QueryKey::AccountRepos { login } => write!(f, "accounts/{login}/repos"),
            QueryKey::Repository(repo) => write!(f, "repos/{repo}"),
            QueryKey::Commits { repo, branch } => write!(f, "repos/{repo}/{branch}/commits"),
            QueryKey::DetailedCommits { repo, branch } => {
                write!(f, "repos/{repo}/{branch}/detailed-commits")
            }
        }
    }
}

type Slot<V> = Arc<OnceCell<Arc<V>>>;

/// In-memory results keyed by [`QueryKey`].
///
/// At most one fetch per key runs at a time: concurrent callers for the
/// same key wait on the first one. Failed fetches leave the slot empty so
/// the next caller retries.
pub struct QueryCache<V> {
    entries: Mutex<HashMap<QueryKey, Slot<V>>>,
}

impl<V> Default for QueryCache<V> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<V> QueryCache<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_fetch<F, Fut>(&self, key: &QueryKey, fetch: F) -> Result<Arc<V>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let slot = {
            let mut entries = self.entries.lock().await;
            entries.entry(key.clone()).or_default().clone()
        };

        let value = slot
            .get_or_try_init(|| async {
                debug!("Query cache miss: {}", key);
                fetch().await.map(Arc::new)
            })
            .await?;

        Ok(Arc::clone(value))
    }

    /// Cached value for `key`, without fetching.
    pub async fn get(&self, key: &QueryKey) -> Option<Arc<V>> {
        let entries = self.entries.lock().await;
        entries.get(key).and_then(|slot| slot.get().cloned())
    }

    /// Drop the entry for `key`. A fetch still in flight completes into the
    /// detached slot and is never observed.
    pub async fn invalidate(&self, key: &QueryKey) -> bool {
        self.entries.lock().await.remove(key).is_some()
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.values().filter(|slot| slot.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
