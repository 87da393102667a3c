use super::{decode, json_type, null_as_default};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A repository as shown by the explorer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub forked: bool,
    pub archived: bool,
    pub description: Option<String>,
    pub default_branch: String,
    pub open_issues_count: u64,
    /// Primary language as detected by GitHub
    pub language: Option<String>,
}

#[derive(Deserialize)]
struct RawRepository {
    id: u64,
    name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    stargazers_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    forks_count: u64,
    fork: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    archived: bool,
    description: Option<String>,
    default_branch: String,
    #[serde(default, deserialize_with = "null_as_default")]
    open_issues_count: u64,
    language: Option<String>,
}

pub fn normalize_repository(value: &Value) -> Result<Repository> {
    let raw: RawRepository = decode(value, "repository")?;
    if raw.default_branch.is_empty() {
        return Err(Error::MalformedResponse(format!(
            "repository {}: empty default_branch",
            raw.name
        )));
    }

    Ok(Repository {
        id: raw.id,
        name: raw.name,
        stargazers_count: raw.stargazers_count,
        forks_count: raw.forks_count,
        forked: raw.fork,
        archived: raw.archived,
        description: raw.description,
        default_branch: raw.default_branch,
        open_issues_count: raw.open_issues_count,
        language: raw.language,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub name: String,
}

#[derive(Deserialize)]
struct RawBranch {
    name: String,
}

pub fn normalize_branch(value: &Value) -> Result<Branch> {
    let raw: RawBranch = decode(value, "branch")?;
    Ok(Branch { name: raw.name })
}

/// Language name to byte count, in the order GitHub reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageUsage(Vec<(String, u64)>);

impl LanguageUsage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `bytes` to `name`, appending it if unseen.
    pub fn add(&mut self, name: &str, bytes: u64) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some((_, total)) => *total += bytes,
            None => self.0.push((name.to_string(), bytes)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(name, bytes)| (name.as_str(), *bytes))
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.iter().find(|(n, _)| *n == name).map(|(_, b)| b)
    }

    pub fn total_bytes(&self) -> u64 {
        self.0.iter().map(|(_, bytes)| bytes).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for LanguageUsage {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut usage = LanguageUsage::new();
        for (name, bytes) in iter {
            usage.add(&name.into(), bytes);
        }
        usage
    }
}

pub fn normalize_languages(value: &Value) -> Result<LanguageUsage> {
    let map = value.as_object().ok_or_else(|| {
        Error::MalformedResponse(format!(
            "languages: expected an object, got {}",
            json_type(value)
        ))
    })?;

    map.iter()
        .map(|(name, bytes)| {
            let bytes = bytes.as_u64().ok_or_else(|| {
                Error::MalformedResponse(format!(
                    "languages: byte count for {name} is not a non-negative integer"
                ))
            })?;
            Ok((name.clone(), bytes))
        })
        .collect()
}

/// A repository together with its language breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailedRepo {
    pub repo: Repository,
    pub languages: LanguageUsage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_repo() -> Value {
        json!({
            "id": 1296269,
            "name": "Hello-World",
            "stargazers_count": 80,
            "forks_count": 9,
            "fork": false,
            "archived": true,
            "description": "My first repo",
            "default_branch": "master",
            "open_issues_count": 3,
            "language": "Rust"
        })
    }

    #[test]
    fn test_repository_full() {
        let repo = normalize_repository(&full_repo()).unwrap();
        assert_eq!(repo.id, 1296269);
        assert_eq!(repo.name, "Hello-World");
        assert_eq!(repo.stargazers_count, 80);
        assert_eq!(repo.forks_count, 9);
        assert!(!repo.forked);
        assert!(repo.archived);
        assert_eq!(repo.description.as_deref(), Some("My first repo"));
        assert_eq!(repo.default_branch, "master");
        assert_eq!(repo.open_issues_count, 3);
        assert_eq!(repo.language.as_deref(), Some("Rust"));
    }

    #[test]
    fn test_repository_defaults() {
        let value = json!({
            "id": 1,
            "name": "bare",
            "fork": true,
            "default_branch": "main",
            "stargazers_count": null,
            "description": null
        });
        let repo = normalize_repository(&value).unwrap();
        assert_eq!(repo.stargazers_count, 0);
        assert_eq!(repo.forks_count, 0);
        assert_eq!(repo.open_issues_count, 0);
        assert!(!repo.archived);
        assert!(repo.forked);
        assert_eq!(repo.description, None);
    }

    #[test]
    fn test_repository_requires_fork_flag() {
        let mut value = full_repo();
        value.as_object_mut().unwrap().remove("fork");
        let err = normalize_repository(&value).unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(msg) if msg.contains("fork")));
    }

    #[test]
    fn test_repository_requires_name_and_branch() {
        let mut value = full_repo();
        value.as_object_mut().unwrap().remove("name");
        assert!(normalize_repository(&value).is_err());

        let mut value = full_repo();
        value["default_branch"] = json!("");
        assert!(normalize_repository(&value).is_err());
    }

    #[test]
    fn test_repository_rejects_non_object() {
        for value in [Value::Null, json!(42), json!("repo"), json!([full_repo()])] {
            let err = normalize_repository(&value).unwrap_err();
            assert!(matches!(err, Error::MalformedResponse(_)));
        }
    }

    #[test]
    fn test_languages_keep_order() {
        let value = json!({ "Rust": 5000, "Shell": 20, "C": 700 });
        let usage = normalize_languages(&value).unwrap();
        let names: Vec<_> = usage.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Rust", "Shell", "C"]);
        assert_eq!(usage.total_bytes(), 5720);
        assert_eq!(usage.get("C"), Some(700));
    }

    #[test]
    fn test_languages_reject_bad_counts() {
        assert!(normalize_languages(&json!({ "Rust": -1 })).is_err());
        assert!(normalize_languages(&json!({ "Rust": "12" })).is_err());
        assert!(normalize_languages(&json!(null)).is_err());
    }

    #[test]
    fn test_language_usage_add_merges() {
        let mut usage: LanguageUsage = [("Go", 10), ("Rust", 5)].into_iter().collect();
        usage.add("Go", 7);
        usage.add("Zig", 1);
        assert_eq!(usage.get("Go"), Some(17));
        assert_eq!(usage.len(), 3);
    }

    #[test]
    fn test_branch() {
        let branch = normalize_branch(&json!({ "name": "main", "protected": true })).unwrap();
        assert_eq!(branch.name, "main");
        assert!(normalize_branch(&json!({ "protected": true })).is_err());
    }
}
