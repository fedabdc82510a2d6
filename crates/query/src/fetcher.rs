//! The fetch seam between the cache and the TMDB client.
//!
//! [`QueryClient`](crate::QueryClient) talks to the network only
//! through [`CatalogFetcher`], so tests can substitute a scripted
//! fetcher and count or fail individual calls.

use async_trait::async_trait;

use marquee_core::types::{MovieId, PersonId};
use marquee_tmdb::models::{Credits, Movie, MovieDetails, Page, PersonCredits, PersonDetail, Video};
use marquee_tmdb::{TmdbClient, TmdbError};

use crate::request::ListRequest;

/// Read operations the query layer needs from the catalog API.
#[async_trait]
pub trait CatalogFetcher: Send + Sync {
    /// Fetch one page of a paginated movie list.
    async fn fetch_list(
        &self,
        request: &ListRequest,
        page: u32,
    ) -> Result<Page<Movie>, TmdbError>;

    async fn fetch_movie_details(&self, id: MovieId) -> Result<MovieDetails, TmdbError>;

    async fn fetch_movie_credits(&self, id: MovieId) -> Result<Credits, TmdbError>;

    async fn fetch_movie_videos(&self, id: MovieId) -> Result<Vec<Video>, TmdbError>;

    async fn fetch_person_detail(&self, id: PersonId) -> Result<PersonDetail, TmdbError>;

    async fn fetch_person_movie_credits(&self, id: PersonId) -> Result<PersonCredits, TmdbError>;
}

#[async_trait]
impl CatalogFetcher for TmdbClient {
    async fn fetch_list(
        &self,
        request: &ListRequest,
        page: u32,
    ) -> Result<Page<Movie>, TmdbError> {
        match request {
            ListRequest::Movies(kind) => self.movie_list(*kind, page).await,
            ListRequest::Trending(window) => self.trending(*window, page).await,
            ListRequest::Search(query) => self.search_movies(query, page).await,
            ListRequest::Similar(id) => self.similar_movies(*id, page).await,
        }
    }

    async fn fetch_movie_details(&self, id: MovieId) -> Result<MovieDetails, TmdbError> {
        self.movie_details(id).await
    }

    async fn fetch_movie_credits(&self, id: MovieId) -> Result<Credits, TmdbError> {
        self.movie_credits(id).await
    }

    async fn fetch_movie_videos(&self, id: MovieId) -> Result<Vec<Video>, TmdbError> {
        Ok(self.movie_videos(id).await?.results)
    }

    async fn fetch_person_detail(&self, id: PersonId) -> Result<PersonDetail, TmdbError> {
        self.person_detail(id).await
    }

    async fn fetch_person_movie_credits(&self, id: PersonId) -> Result<PersonCredits, TmdbError> {
        self.person_movie_credits(id).await
    }
}
