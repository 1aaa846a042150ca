//! Pajelingo - Unified CLI
//!
//! Serves the game API and runs maintenance commands against the database.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use pajelingo::{
    AppConfig, AppState, ContentPack, GameKind, GameRepository, GameService, Identity,
    ScoreService, build_router,
};
use strum::IntoEnumIterator;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,pajelingo=debug")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve { port, host } => run_server(config, host, port).await,
        Command::Migrate => run_migrate(&config),
        Command::Seed { path } => run_seed(&config, path),
        Command::Rankings { language } => run_rankings(&config, language),
        Command::Badges { user } => run_badges(&config, user),
        Command::Languages => run_languages(&config),
        Command::Pending { user } => run_pending(&config, user),
    }
}

/// Opens the repository and brings the schema up to date.
#[instrument(skip(config))]
fn open_repository(config: &AppConfig) -> Result<GameRepository> {
    let repository = GameRepository::new(config.database_url().clone())?;
    repository.run_migrations()?;
    Ok(repository)
}

/// Run the HTTP game server
#[instrument(skip(config))]
async fn run_server(config: AppConfig, host: Option<String>, port: Option<u16>) -> Result<()> {
    let repository = open_repository(&config)?;
    let state = AppState::new(
        GameService::new(repository.clone(), config.rules()),
        ScoreService::new(repository, *config.ranking_limit()),
    );
    let app = build_router(state);

    let address = format!(
        "{}:{}",
        host.unwrap_or_else(|| config.host().clone()),
        port.unwrap_or(*config.port())
    );
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!(%address, "Pajelingo server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Apply pending migrations
#[instrument(skip(config))]
fn run_migrate(config: &AppConfig) -> Result<()> {
    let repository = GameRepository::new(config.database_url().clone())?;
    let applied = repository.run_migrations()?;
    println!("Applied {} migration(s) to {}", applied, repository.db_path());
    Ok(())
}

/// Load a content pack
#[instrument(skip(config))]
fn run_seed(config: &AppConfig, path: std::path::PathBuf) -> Result<()> {
    let repository = open_repository(config)?;
    let pack = ContentPack::from_file(&path)?;
    let report = pack.load_into(&repository)?;
    println!(
        "Loaded {}: {} languages, {} articles, {} words, {} synonym links, {} conjugations",
        path.display(),
        report.languages,
        report.articles,
        report.words,
        report.synonyms,
        report.conjugations
    );
    Ok(())
}

/// Print the leaderboard
#[instrument(skip(config))]
fn run_rankings(config: &AppConfig, language: Option<String>) -> Result<()> {
    let service = ScoreService::new(open_repository(config)?, *config.ranking_limit());
    let rankings = service.rankings(Identity::Anonymous, language.as_deref())?;
    if rankings.entries.is_empty() {
        println!("No scores yet");
    }
    for entry in rankings.entries {
        println!("{:>3}. {:<24} {}", entry.position, entry.user, entry.score);
    }
    Ok(())
}

/// Print a user's badges
#[instrument(skip(config))]
fn run_badges(config: &AppConfig, user: String) -> Result<()> {
    let repository = open_repository(config)?;
    let found = repository
        .get_user_by_name(&user)?
        .with_context(|| format!("Unknown user '{}'", user))?;
    let service = ScoreService::new(repository, *config.ranking_limit());
    for badge in service.badges_for(*found.id())? {
        println!("#{} {:<20} {}", badge.color, badge.name, badge.description);
    }
    Ok(())
}

/// List languages
#[instrument(skip(config))]
fn run_languages(config: &AppConfig) -> Result<()> {
    let repository = open_repository(config)?;
    for language in repository.list_languages()? {
        println!("{:>3} {}", language.id(), language.language_name());
    }
    Ok(())
}

/// Print a user's unanswered rounds
#[instrument(skip(config))]
fn run_pending(config: &AppConfig, user: String) -> Result<()> {
    let repository = open_repository(config)?;
    let found = repository
        .get_user_by_name(&user)?
        .with_context(|| format!("Unknown user '{}'", user))?;

    let mut any = false;
    for game in GameKind::iter() {
        if let Some(round) = repository.pending_round(game, *found.id())? {
            println!("{:<12} word {}", game, round.word_id());
            any = true;
        }
    }
    if !any {
        println!("No pending rounds for {}", user);
    }
    Ok(())
}
