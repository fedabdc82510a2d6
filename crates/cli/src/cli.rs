use clap::{Parser, Subcommand, ValueEnum};

use marquee_core::types::{MovieId, PersonId};
use marquee_tmdb::models::{MovieListKind, TrendingWindow};

/// Browse the TMDB catalog and manage local favorites.
#[derive(Debug, Parser)]
#[command(name = "marquee", version, about)]
pub struct Cli {
    /// Treat the network as unreachable (cached data only).
    #[arg(long, global = true)]
    pub offline: bool,

    /// Print raw JSON instead of formatted text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Home screen rows: trending, now playing, popular, top rated.
    Home {
        /// Invalidate and refetch every movie query first
        /// (pull-to-refresh).
        #[arg(long)]
        refresh: bool,
    },
    /// Pages of one fixed movie list.
    List {
        #[arg(value_enum)]
        kind: ListKindArg,
        /// How many pages to fetch.
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Pages of trending movies.
    Trending {
        #[arg(value_enum, default_value_t = WindowArg::Week)]
        window: WindowArg,
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Debounced full-text movie search.
    Search {
        query: String,
        #[arg(long, default_value_t = 1)]
        pages: u32,
    },
    /// Movie detail: record, credits, videos, similar titles.
    Movie { id: MovieId },
    /// Person detail and movie credits.
    Person { id: PersonId },
    /// Locally persisted favorites.
    #[command(subcommand)]
    Fav(FavCommand),
}

#[derive(Debug, Subcommand)]
pub enum FavCommand {
    /// Fetch the movie and store it as a favorite.
    Add { id: MovieId },
    /// Remove a favorite (no-op if absent).
    Remove { id: MovieId },
    /// List stored favorites.
    List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ListKindArg {
    Popular,
    NowPlaying,
    TopRated,
    Upcoming,
}

impl From<ListKindArg> for MovieListKind {
    fn from(value: ListKindArg) -> Self {
        match value {
            ListKindArg::Popular => MovieListKind::Popular,
            ListKindArg::NowPlaying => MovieListKind::NowPlaying,
            ListKindArg::TopRated => MovieListKind::TopRated,
            ListKindArg::Upcoming => MovieListKind::Upcoming,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum WindowArg {
    Day,
    Week,
}

impl From<WindowArg> for TrendingWindow {
    fn from(value: WindowArg) -> Self {
        match value {
            WindowArg::Day => TrendingWindow::Day,
            WindowArg::Week => TrendingWindow::Week,
        }
    }
}
