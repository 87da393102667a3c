use super::{decode, null_as_default};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Placeholder used for missing author names and emails.
pub const UNKNOWN_AUTHOR: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Commit {
    pub sha: String,
    pub message: String,
    pub author: CommitAuthor,
    /// Author date. `None` when upstream omitted it or sent something that
    /// does not parse as RFC 3339; never replaced by a fallback instant.
    pub committed_at: Option<DateTime<Utc>>,
}

impl Commit {
    /// First line of the message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CommitStats {
    pub total: u64,
    pub additions: u64,
    pub deletions: u64,
}

/// A commit fetched individually, with change statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedCommit {
    pub commit: Commit,
    pub stats: CommitStats,
}

#[derive(Deserialize)]
struct RawCommit {
    sha: String,
    commit: Option<RawCommitBody>,
}

#[derive(Deserialize)]
struct RawCommitBody {
    message: Option<String>,
    author: Option<RawCommitAuthor>,
}

#[derive(Deserialize)]
struct RawCommitAuthor {
    name: Option<String>,
    email: Option<String>,
    date: Option<String>,
}

#[derive(Deserialize)]
struct RawDetailedCommit {
    stats: Option<RawCommitStats>,
}

#[derive(Deserialize)]
struct RawCommitStats {
    #[serde(default, deserialize_with = "null_as_default")]
    total: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    additions: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    deletions: u64,
}

pub fn normalize_commit(value: &Value) -> Result<Commit> {
    let raw: RawCommit = decode(value, "commit")?;
    let body = raw.commit;
    let (message, author) = match body {
        Some(body) => (body.message, body.author),
        None => (None, None),
    };
    let (name, email, date) = match author {
        Some(a) => (a.name, a.email, a.date),
        None => (None, None, None),
    };

    Ok(Commit {
        sha: raw.sha,
        message: message.unwrap_or_default(),
        author: CommitAuthor {
            name: name.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            email: email.unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        },
        committed_at: date.as_deref().and_then(parse_timestamp),
    })
}

pub fn normalize_detailed_commit(value: &Value) -> Result<DetailedCommit> {
    let commit = normalize_commit(value)?;
    let raw: RawDetailedCommit = decode(value, "commit")?;
    let stats = raw
        .stats
        .map(|s| CommitStats {
            total: s.total,
            additions: s.additions,
            deletions: s.deletions,
        })
        .unwrap_or_default();

    Ok(DetailedCommit { commit, stats })
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
