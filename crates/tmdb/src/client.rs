//! HTTP client for the TMDB REST API.
//!
//! [`TmdbClient`] owns a connection-pooled [`reqwest::Client`] plus the
//! API configuration. Every request is a GET carrying the `api_key`
//! query parameter; responses are decoded into the types in
//! [`crate::models`].

use marquee_core::TmdbConfig;
use serde::de::DeserializeOwned;

use crate::error::TmdbError;
use crate::models::{
    Credits, Movie, MovieDetails, MovieListKind, Page, PersonCredits, PersonDetail,
    TrendingWindow, VideosResponse,
};
use marquee_core::types::{MovieId, PersonId};

/// Typed client for a single TMDB API endpoint set.
pub struct TmdbClient {
    client: reqwest::Client,
    config: TmdbConfig,
}

impl TmdbClient {
    /// Create a client with its own connection pool.
    pub fn new(config: TmdbConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across components).
    pub fn with_client(client: reqwest::Client, config: TmdbConfig) -> Self {
        Self { client, config }
    }

    /// One page of a fixed movie list category.
    pub async fn movie_list(
        &self,
        kind: MovieListKind,
        page: u32,
    ) -> Result<Page<Movie>, TmdbError> {
        self.get(kind.path(), &[("page", page.to_string())]).await
    }

    /// One page of trending movies for a day/week window.
    pub async fn trending(
        &self,
        window: TrendingWindow,
        page: u32,
    ) -> Result<Page<Movie>, TmdbError> {
        self.get(window.path(), &[("page", page.to_string())]).await
    }

    /// One page of full-text movie search results.
    pub async fn search_movies(&self, query: &str, page: u32) -> Result<Page<Movie>, TmdbError> {
        self.get(
            "/search/movie",
            &[("query", query.to_string()), ("page", page.to_string())],
        )
        .await
    }

    /// Full detail record for a movie.
    pub async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, TmdbError> {
        self.get(&format!("/movie/{id}"), &[]).await
    }

    /// Cast and crew for a movie.
    pub async fn movie_credits(&self, id: MovieId) -> Result<Credits, TmdbError> {
        self.get(&format!("/movie/{id}/credits"), &[]).await
    }

    /// Trailers and clips for a movie.
    pub async fn movie_videos(&self, id: MovieId) -> Result<VideosResponse, TmdbError> {
        self.get(&format!("/movie/{id}/videos"), &[]).await
    }

    /// One page of movies similar to the given one.
    pub async fn similar_movies(&self, id: MovieId, page: u32) -> Result<Page<Movie>, TmdbError> {
        self.get(
            &format!("/movie/{id}/similar"),
            &[("page", page.to_string())],
        )
        .await
    }

    /// Detail record for a person.
    pub async fn person_detail(&self, id: PersonId) -> Result<PersonDetail, TmdbError> {
        self.get(&format!("/person/{id}"), &[]).await
    }

    /// Movie credits of a person.
    pub async fn person_movie_credits(&self, id: PersonId) -> Result<PersonCredits, TmdbError> {
        self.get(&format!("/person/{id}/movie_credits"), &[]).await
    }

    // ---- private helpers ----

    /// Issue a GET against `path`, appending the API credential and the
    /// given query parameters, and decode the JSON body.
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        let url = format!("{}{}", self.config.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(TmdbError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TmdbError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await.map_err(TmdbError::Network)?;
        serde_json::from_str(&body).map_err(|e| {
            // Shape mismatches are bugs, not runtime conditions.
            tracing::error!(path, error = %e, "TMDB response did not match the expected shape");
            TmdbError::Decode(e)
        })
    }
}
