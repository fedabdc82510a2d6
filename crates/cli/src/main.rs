//! Terminal shell over the marquee data layer.
//!
//! Stands in for the mobile screens: every subcommand maps to a screen
//! of the original application (home rows, lists, search, movie and
//! person detail, favorites) and drives the exact same query and
//! storage paths.

mod cli;
mod commands;
mod config;
mod state;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee_query::QueryError;
use marquee_tmdb::TmdbError;

use cli::{Cli, Command, FavCommand};
use config::AppConfig;
use state::AppContext;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    let ctx = match AppContext::init(&config, cli.offline).await {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Failed to start: {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&ctx, &cli).await {
        report_error(&e);
        std::process::exit(1);
    }
}

async fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    if ctx.connectivity.handle().is_offline() {
        tracing::warn!("starting in offline mode; serving cached data only");
    }

    match &cli.command {
        Command::Home { refresh } => commands::home(ctx, *refresh, cli.json).await,
        Command::List { kind, pages } => commands::list(ctx, (*kind).into(), *pages, cli.json).await,
        Command::Trending { window, pages } => {
            commands::trending(ctx, (*window).into(), *pages, cli.json).await
        }
        Command::Search { query, pages } => commands::search(ctx, query, *pages, cli.json).await,
        Command::Movie { id } => commands::movie(ctx, *id, cli.json).await,
        Command::Person { id } => commands::person(ctx, *id, cli.json).await,
        Command::Fav(FavCommand::Add { id }) => commands::fav_add(ctx, *id).await,
        Command::Fav(FavCommand::Remove { id }) => commands::fav_remove(ctx, *id).await,
        Command::Fav(FavCommand::List) => commands::fav_list(ctx, cli.json).await,
    }
}

/// Map error classes to the user-facing states the screens show:
/// offline gets its own retry affordance, remote failures a status
/// line, everything else a generic failure.
fn report_error(e: &anyhow::Error) {
    match e.downcast_ref::<QueryError>() {
        Some(QueryError::Offline) | Some(QueryError::Tmdb(TmdbError::Network(_))) => {
            eprintln!("No internet connection. Check your network settings and try again.");
        }
        Some(QueryError::Tmdb(TmdbError::Remote { status, .. })) => {
            eprintln!("The catalog service returned an error (HTTP {status}). Try again later.");
        }
        _ => eprintln!("Error: {e:#}"),
    }
}
