//! Debounced search sessions.
//!
//! A [`SearchSession`] sits between a text input and the query layer:
//! keystrokes go in via [`input`](SearchSession::input), and
//! [`next_results`](SearchSession::next_results) yields results only
//! for queries that survived the quiet period and are still what the
//! user wants by the time the fetch settles.

use std::time::Duration;

use tokio::sync::Mutex;

use marquee_tmdb::models::Movie;

use crate::client::QueryClient;
use crate::debounce::Debouncer;
use crate::error::QueryError;

/// Default quiet period between keystrokes before a search is issued.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Results for one settled search query.
#[derive(Debug, Clone)]
pub struct SearchResults {
    /// The query these results belong to.
    pub query: String,
    /// Concatenated results of all fetched pages.
    pub movies: Vec<Movie>,
}

/// A debounced search flow over a [`QueryClient`].
pub struct SearchSession {
    client: QueryClient,
    debouncer: Debouncer<String>,
    /// Latest raw input, updated on every keystroke. Compared against
    /// a settled query when its fetch completes; a mismatch means the
    /// response is stale and gets discarded.
    latest_input: Mutex<String>,
}

impl SearchSession {
    pub fn new(client: QueryClient) -> Self {
        Self::with_quiet_period(client, DEFAULT_QUIET_PERIOD)
    }

    pub fn with_quiet_period(client: QueryClient, quiet_period: Duration) -> Self {
        Self {
            client,
            debouncer: Debouncer::new(quiet_period),
            latest_input: Mutex::new(String::new()),
        }
    }

    /// Feed a keystroke's worth of input into the session.
    pub async fn input(&self, text: &str) {
        *self.latest_input.lock().await = text.to_string();
        self.debouncer.submit(text.to_string()).await;
    }

    /// Wait for the next settled query and fetch its first page.
    ///
    /// Returns `Ok(None)` when the settled query was superseded while
    /// its fetch was in flight -- the stale response is discarded, never
    /// attributed to the newer query. Blank queries resolve immediately
    /// to an empty result set without touching the network.
    pub async fn next_results(&self) -> Result<Option<SearchResults>, QueryError> {
        let Some(query) = self.debouncer.settled().await else {
            return Ok(None);
        };

        if query.trim().is_empty() {
            return Ok(Some(SearchResults {
                query,
                movies: Vec::new(),
            }));
        }

        let movies = self.client.search(&query).items().await?;

        if *self.latest_input.lock().await != query {
            tracing::debug!(query, "discarding results for superseded search");
            return Ok(None);
        }

        Ok(Some(SearchResults { query, movies }))
    }
}
