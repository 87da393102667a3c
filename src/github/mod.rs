pub mod client;
pub mod config;
pub mod endpoints;
pub mod parser;

pub use client::{ApiResponse, GitHubApi, GitHubClient};
pub use config::GitHubConfig;
pub use parser::{parse_repository_coordinate, RepoCoordinate};
