use crate::{Error, Result};
use std::fmt;
use url::Url;

/// Join `segments` into an absolute API path, percent-encoding each one.
///
/// Empty, `.` and `..` segments are rejected: they would change which
/// resource the path names.
pub fn encode_path(segments: &[&str]) -> Result<String> {
    if let Some(bad) = segments
        .iter()
        .find(|s| s.is_empty() || **s == "." || **s == "..")
    {
        return Err(Error::Validation(format!("Invalid path segment {bad:?}")));
    }

    let mut url = Url::parse("https://api.github.com/")?;
    url.path_segments_mut()
        .map_err(|_| Error::Internal("API base cannot carry a path".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.path().to_string())
}

/// Owner/name pair identifying one repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoCoordinate {
    pub owner: String,
    pub repo: String,
}

impl RepoCoordinate {
    pub fn new(owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
        }
    }

    /// API path of the repository, followed by `rest`.
    pub fn api_path(&self, rest: &[&str]) -> Result<String> {
        let mut segments = vec!["repos", self.owner.as_str(), self.repo.as_str()];
        segments.extend_from_slice(rest);
        encode_path(&segments)
    }

    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

impl fmt::Display for RepoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// Parse a repository coordinate
/// Accepts formats:
/// - https://github.com/owner/repo
/// - https://github.com/owner/repo/
/// - https://github.com/owner/repo.git
/// - github.com/owner/repo
/// - owner/repo
pub fn parse_repository_coordinate(input: &str) -> Result<RepoCoordinate> {
    let input = input.trim();
    let input = input.trim_end_matches('/').trim_end_matches(".git");

    let input = input
        .strip_prefix("https://")
        .or_else(|| input.strip_prefix("http://"))
        .unwrap_or(input);
    let input = input.strip_prefix("github.com/").unwrap_or(input);

    let mut parts = input.split('/');
    let (Some(owner), Some(repo)) = (parts.next(), parts.next()) else {
        return Err(Error::Validation(
            "Invalid repository coordinate. Expected: owner/repo".to_string(),
        ));
    };

    let owner = owner.trim();
    let repo = repo.trim();
    if owner.is_empty() || repo.is_empty() {
        return Err(Error::Validation(
            "Repository owner and name cannot be empty".to_string(),
        ));
    }
    if [owner, repo].iter().any(|s| *s == "." || *s == "..") {
        return Err(Error::Validation(format!(
            "Invalid repository coordinate: {owner}/{repo}"
        )));
    }

    Ok(RepoCoordinate::new(owner, repo))
}
