use crate::normalize::Commit;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyActivity {
    /// `YYYY-MM`, UTC
    pub month: String,
    pub commit_count: usize,
}

/// Commits per calendar month, newest month first.
///
/// Commits are ordered by timestamp here, so the caller's ordering does not
/// matter. Commits without a valid timestamp cannot be placed in a month
/// and are left out.
pub fn monthly_activity(commits: &[Commit]) -> Vec<MonthlyActivity> {
    let mut dated: Vec<_> = commits.iter().filter_map(|c| c.committed_at).collect();

    let skipped = commits.len() - dated.len();
    if skipped > 0 {
        warn!("Skipping {} commits without a valid timestamp", skipped);
    }

    dated.sort_by(|a, b| b.cmp(a));

    let mut buckets: Vec<MonthlyActivity> = Vec::new();
    for timestamp in dated {
        let month = timestamp.format("%Y-%m").to_string();
        match buckets.last_mut() {
            Some(last) if last.month == month => last.commit_count += 1,
            _ => buckets.push(MonthlyActivity {
                month,
                commit_count: 1,
            }),
        }
    }

    buckets
}
