use crate::normalize::Commit;
use serde::Serialize;
use std::collections::HashMap;

/// How many contributors the repository view ranks.
pub const TOP_CONTRIBUTORS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contributor {
    pub name: String,
    pub commit_count: usize,
}

/// Rank commit authors by commit count.
///
/// Authors are identified by display name only: the same name under two
/// emails counts as one contributor. Ties keep first-seen order.
pub fn top_contributors(commits: &[Commit], limit: usize) -> Vec<Contributor> {
    let mut ranking: Vec<Contributor> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for commit in commits {
        let name = commit.author.name.as_str();
        match index.get(name) {
            Some(&i) => ranking[i].commit_count += 1,
            None => {
                index.insert(name, ranking.len());
                ranking.push(Contributor {
                    name: name.to_string(),
                    commit_count: 1,
                });
            }
        }
    }

    ranking.sort_by(|a, b| b.commit_count.cmp(&a.commit_count));
    ranking.truncate(limit);
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::CommitAuthor;

    fn by(name: &str, email: &str) -> Commit {
        Commit {
            sha: String::new(),
            message: String::new(),
            author: CommitAuthor {
                name: name.to_string(),
                email: email.to_string(),
            },
            committed_at: None,
        }
    }

    fn ranking(contributors: &[Contributor]) -> Vec<(&str, usize)> {
        contributors
            .iter()
            .map(|c| (c.name.as_str(), c.commit_count))
            .collect()
    }

    #[test]
    fn test_ranking() {
        let mut commits = Vec::new();
        commits.extend((0..3).map(|_| by("A", "a@x")));
        commits.extend((0..5).map(|_| by("B", "b@x")));
        commits.push(by("C", "c@x"));
        commits.push(by("A", "a@x"));

        let top = top_contributors(&commits, TOP_CONTRIBUTORS);
        assert_eq!(ranking(&top), vec![("B", 5), ("A", 4), ("C", 1)]);
    }

    #[test]
    fn test_same_name_different_email_is_merged() {
        let commits = vec![by("Sam", "sam@work"), by("Sam", "sam@home")];
        assert_eq!(ranking(&top_contributors(&commits, 3)), vec![("Sam", 2)]);
    }

    #[test]
    fn test_ties_keep_first_seen_and_limit_applies() {
        let commits = vec![by("D", ""), by("C", ""), by("B", ""), by("A", "")];
        assert_eq!(
            ranking(&top_contributors(&commits, 3)),
            vec![("D", 1), ("C", 1), ("B", 1)]
        );
        assert!(top_contributors(&[], 3).is_empty());
    }
}
