use clap::Parser;
use gh_explorer::{
    cli::{commands, Cli, Commands},
    config::Settings,
    github::GitHubClient,
    query::Explorer,
    Result,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    let _ = dotenvy::dotenv();

    // Logs go to stderr so they never mix with printed results
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,gh_explorer=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // A missing token stops here, before any request is made
    let settings = Settings::from_env()?;
    settings.validate()?;

    info!("Using GitHub API at {}", settings.github.api_base_url());
    let client = GitHubClient::new(settings.github.clone())?;
    let explorer = Explorer::new(Arc::new(client), settings.explorer.clone());

    match cli.command {
        Commands::Search { term, pages } => {
            commands::search(&explorer, &term, pages, cli.json).await?;
        }
        Commands::Account { login } => {
            commands::account(&explorer, &login, cli.json).await?;
        }
        Commands::Repo { repo, branch } => {
            commands::repository(&explorer, &repo, branch.as_deref(), cli.json).await?;
        }
        Commands::Interactive => {
            commands::interactive(&explorer).await?;
        }
    }

    Ok(())
}
