//! Request descriptors stored alongside cache entries.
//!
//! Every cache entry remembers the request that produced it so that
//! invalidation can refetch without the original caller's involvement.

use marquee_core::types::{MovieId, PersonId};
use marquee_tmdb::models::{MovieListKind, TrendingWindow};

use crate::key::{movie_keys, QueryKey};

/// A paginated movie-list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRequest {
    /// A fixed category list (popular, now playing, ...).
    Movies(MovieListKind),
    /// Trending movies for a day/week window.
    Trending(TrendingWindow),
    /// Full-text search keyed by the literal query string.
    Search(String),
    /// Movies similar to a given title.
    Similar(MovieId),
}

impl ListRequest {
    /// Cache key for this list.
    ///
    /// Trending windows are distinct list kinds (`trending_day`,
    /// `trending_week`), so switching windows never mixes pages.
    pub fn key(&self) -> QueryKey {
        match self {
            ListRequest::Movies(kind) => movie_keys::list(kind.as_str()),
            ListRequest::Trending(window) => {
                movie_keys::list(&format!("trending_{}", window.as_str()))
            }
            ListRequest::Search(query) => movie_keys::search(query),
            ListRequest::Similar(id) => movie_keys::similar(*id),
        }
    }
}

/// The full set of refetchable requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestSpec {
    List(ListRequest),
    MovieDetails(MovieId),
    MovieCredits(MovieId),
    MovieVideos(MovieId),
    PersonDetail(PersonId),
    PersonCredits(PersonId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_keys_are_hierarchical() {
        let popular = ListRequest::Movies(MovieListKind::Popular).key();
        assert_eq!(popular.to_string(), "movies/list/popular");
        assert!(popular.starts_with(&movie_keys::all()));

        let trending = ListRequest::Trending(TrendingWindow::Day).key();
        assert_eq!(trending.to_string(), "movies/list/trending_day");
    }

    #[test]
    fn search_key_carries_the_literal_query() {
        let key = ListRequest::Search("blade runner".into()).key();
        assert_eq!(key.to_string(), "movies/search/blade runner");
        assert_ne!(key, ListRequest::Search("blade".into()).key());
    }
}
