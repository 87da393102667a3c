use crate::github::RepoCoordinate;
use crate::normalize::DetailedCommit;
use crate::query::{
    AccountOverview, BranchSelector, QueryStatus, RepositoryOverview, SearchHit, SearchPage,
};
use crate::stats::{display_colors, repository_tags, LanguageShare};
use crate::utils::{format_big_number, format_date, truncate};
use crate::{Error, Result};
use serde::Serialize;

pub const LOADING_BANNER: &str = "Loading...";
pub const EMPTY_BANNER: &str = "No results found";

pub fn error_banner(err: &Error) -> String {
    format!("\x1b[31m\u{2717}\x1b[0m Something went wrong: {}", err.log_safe())
}

pub fn disabled_banner(min_length: usize) -> String {
    format!("Type at least {min_length} characters to search")
}

/// Banner for a status that has no results to show.
pub fn status_banner(status: &QueryStatus, min_length: usize) -> Option<String> {
    match status {
        QueryStatus::Disabled => Some(disabled_banner(min_length)),
        QueryStatus::Loading => Some(LOADING_BANNER.to_string()),
        QueryStatus::Empty => Some(EMPTY_BANNER.to_string()),
        QueryStatus::Failed(message) => Some(format!(
            "\x1b[31m\u{2717}\x1b[0m Something went wrong: {message}"
        )),
        QueryStatus::Ready => None,
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn search_hit_line(index: usize, hit: &SearchHit) -> String {
    let repos: Vec<&str> = hit.repos.iter().map(|r| r.name.as_str()).collect();
    let mut line = format!(
        "{:>3}. {:<30} {}",
        index,
        truncate(&hit.account.login, 30),
        if repos.is_empty() {
            "(no repositories)".to_string()
        } else {
            repos.join(", ")
        }
    );
    if hit.repos_left > 0 {
        line.push_str(&format!(" +{} more", format_big_number(hit.repos_left)));
    }
    line
}

/// Print one page of search results. `offset` is the number of hits
/// printed before this page.
pub fn print_search_page(page: &SearchPage, offset: usize) {
    if page.page == 1 {
        println!(
            "\nFound {} accounts:\n",
            format_big_number(page.total_count)
        );
    }
    for (idx, hit) in page.items.iter().enumerate() {
        println!("{}", search_hit_line(offset + idx + 1, hit));
    }
}

pub fn language_lines(shares: &[LanguageShare]) -> Vec<String> {
    shares
        .iter()
        .zip(display_colors(shares))
        .map(|(share, color)| {
            format!(
                "  {:<20} {:>5.1}%  {:>8} bytes  {}",
                share.name,
                share.percent,
                format_big_number(share.bytes),
                color
            )
        })
        .collect()
}

fn print_languages(shares: &[LanguageShare]) {
    if shares.is_empty() {
        println!("  No language data");
        return;
    }
    for line in language_lines(shares) {
        println!("{line}");
    }
}

pub fn print_account_overview(overview: &AccountOverview) {
    let account = &overview.details.account;
    println!("\n{} ({})", account.login, account.avatar_url);
    println!(
        "Followers: {}  Following: {}",
        format_big_number(overview.details.followers),
        format_big_number(overview.details.following)
    );
    println!(
        "Repositories: {}  Stars: {}  Forks: {}",
        overview.totals.repos,
        format_big_number(overview.totals.stars),
        format_big_number(overview.totals.forks)
    );

    if let Some(extremes) = &overview.extremes {
        println!(
            "Most used: {}  Least used: {}",
            extremes.most_used.0, extremes.least_used.0
        );
    }

    println!("\nLanguages:");
    print_languages(&overview.languages);

    if overview.repos.is_empty() {
        println!("\n{EMPTY_BANNER}");
        return;
    }

    println!("\n{:<40} {:>8} {:>8}  Tags", "Repository", "Stars", "Forks");
    println!("{}", "-".repeat(75));
    for detailed in overview.repos.iter() {
        let repo = &detailed.repo;
        println!(
            "{:<40} {:>8} {:>8}  {}",
            truncate(&repo.name, 38),
            format_big_number(repo.stargazers_count),
            format_big_number(repo.forks_count),
            repository_tags(repo).join(", ")
        );
    }
}

fn commit_stats_line(detailed: &DetailedCommit) -> String {
    let commit = &detailed.commit;
    format!(
        "  {} {:<50} +{} -{} (Total: {})",
        &commit.sha.chars().take(7).collect::<String>(),
        truncate(commit.summary(), 50),
        format_big_number(detailed.stats.additions),
        format_big_number(detailed.stats.deletions),
        format_big_number(detailed.stats.total)
    )
}

pub fn print_repository_overview(
    coordinate: &RepoCoordinate,
    overview: &RepositoryOverview,
    branches: &BranchSelector,
) {
    let repo = &overview.details.repo;
    println!("\n{} ({})", repo.name, coordinate.html_url());
    if let Some(description) = &repo.description {
        println!("{description}");
    }
    println!(
        "Stars: {}  Forks: {}  Open issues: {}",
        format_big_number(repo.stargazers_count),
        format_big_number(repo.forks_count),
        format_big_number(repo.open_issues_count)
    );
    println!("Tags: {}", repository_tags(repo).join(", "));
    if let Some(updated) = &overview.last_updated {
        println!("Last commit: {}", format_date(updated));
    }

    let mut visible = branches.visible().join(", ");
    if branches.has_more() {
        visible.push_str(&format!(" (+{} more)", branches.len() - branches.visible().len()));
    }
    println!("\nBranches: {visible}");
    println!("Selected: {}", overview.branch);

    println!("\nLanguages:");
    print_languages(&overview.languages);

    println!("\nLatest commits:");
    if overview.detailed_commits.is_empty() {
        println!("  {EMPTY_BANNER}");
    }
    for detailed in overview.detailed_commits.iter() {
        println!("{}", commit_stats_line(detailed));
    }

    println!("\nActivity ({} commits):", overview.commits.len());
    for month in &overview.activity {
        println!("  {}  {}", month.month, month.commit_count);
    }

    println!("\nTop contributors:");
    for contributor in &overview.contributors {
        println!(
            "  {:<30} {} commits",
            truncate(&contributor.name, 30),
            format_big_number(contributor.commit_count as u64)
        );
    }
}
