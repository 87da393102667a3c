// Terminal front end for the explorer

pub mod commands;
pub mod render;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "gh-explorer")]
#[command(about = "Explore GitHub accounts and repositories", long_about = None)]
pub struct Cli {
    /// Print results as JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for accounts
    Search {
        /// Search term (at least MIN_SEARCH_LENGTH characters)
        term: String,

        /// Number of result pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,
    },

    /// Show an account with its repositories and language totals
    Account {
        /// Account login
        login: String,
    },

    /// Show a repository's branches, commits and languages
    Repo {
        /// `owner/repo` or a github.com URL
        repo: String,

        /// Branch to inspect (defaults to the repository's default branch)
        #[arg(short, long, env = "GH_EXPLORER_BRANCH")]
        branch: Option<String>,
    },

    /// Search as you type: each input line replaces the search term
    Interactive,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from(["gh-explorer", "search", "octo", "--pages", "2"]).unwrap();
        assert!(!cli.json);
        match cli.command {
            Commands::Search { term, pages } => {
                assert_eq!(term, "octo");
                assert_eq!(pages, 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_repo_with_global_json() {
        let cli =
            Cli::try_parse_from(["gh-explorer", "repo", "rust-lang/rust", "-b", "beta", "--json"])
                .unwrap();
        assert!(cli.json);
        assert!(matches!(
            cli.command,
            Commands::Repo { ref repo, branch: Some(ref b) } if repo == "rust-lang/rust" && b == "beta"
        ));
    }
}
