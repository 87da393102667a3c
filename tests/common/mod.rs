#![allow(dead_code)]

use async_trait::async_trait;
use gh_explorer::github::{ApiResponse, GitHubApi};
use gh_explorer::{Error, Result};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

/// A request seen by [`FakeGitHub`].
#[derive(Debug, Clone)]
pub struct Request {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Request {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn page(&self) -> u32 {
        self.param("page").and_then(|p| p.parse().ok()).unwrap_or(1)
    }
}

/// In-memory GitHub API keyed by path and `page` parameter.
#[derive(Default)]
pub struct FakeGitHub {
    responses: HashMap<(String, u32), ApiResponse>,
    failures: HashSet<String>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<Request>>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `data` for `path` (page 1, or an unpaginated resource).
    pub fn with(self, path: &str, data: Value) -> Self {
        self.with_page(path, 1, data, None)
    }

    pub fn with_page(mut self, path: &str, page: u32, data: Value, link: Option<String>) -> Self {
        let mut response = ApiResponse::new(data);
        response.link = link;
        self.responses.insert((path.to_string(), page), response);
        self
    }

    /// Every request to `path` fails with a 500.
    pub fn failing(mut self, path: &str) -> Self {
        self.failures.insert(path.to_string());
        self
    }

    /// Requests to `path` complete only after `delay`.
    pub fn delayed(mut self, path: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<Request> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<Request> {
        self.calls()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }
}

#[async_trait]
impl GitHubApi for FakeGitHub {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse> {
        let request = Request {
            path: path.to_string(),
            query: query
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        };
        let page = request.page();
        self.calls.lock().unwrap().push(request);

        if let Some(delay) = self.delays.get(path) {
            tokio::time::sleep(*delay).await;
        }

        if self.failures.contains(path) {
            return Err(Error::Transport {
                status: Some(500),
                message: format!("{path} failed"),
            });
        }

        self.responses
            .get(&(path.to_string(), page))
            .cloned()
            .ok_or_else(|| Error::Transport {
                status: Some(404),
                message: format!("no route for {path} page {page}"),
            })
    }
}

/// Link header pointing at the given `(rel, page)` pairs of `path`.
pub fn link_header(path: &str, rels: &[(&str, u32)]) -> String {
    rels.iter()
        .map(|(rel, page)| {
            format!(r#"<https://api.github.com{path}?per_page=100&page={page}>; rel="{rel}""#)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn user_json(id: u64, login: &str) -> Value {
    json!({
        "id": id,
        "login": login,
        "avatar_url": format!("https://avatars.githubusercontent.com/u/{id}"),
        "type": "User"
    })
}

pub fn repo_json(id: u64, name: &str, stars: u64, forks: u64) -> Value {
    json!({
        "id": id,
        "name": name,
        "stargazers_count": stars,
        "forks_count": forks,
        "fork": false,
        "archived": false,
        "description": null,
        "default_branch": "main",
        "open_issues_count": 0,
        "language": null
    })
}

pub fn commit_json(sha: &str, author: &str, date: &str) -> Value {
    json!({
        "sha": sha,
        "commit": {
            "message": format!("Commit {sha}\n\nDetails"),
            "author": {
                "name": author,
                "email": format!("{}@example.com", author.to_lowercase()),
                "date": date
            }
        }
    })
}

pub fn search_json(total_count: u64, logins: &[&str]) -> Value {
    let items: Vec<Value> = logins
        .iter()
        .enumerate()
        .map(|(idx, login)| user_json(idx as u64 + 1, login))
        .collect();
    json!({
        "total_count": total_count,
        "incomplete_results": false,
        "items": items
    })
}
