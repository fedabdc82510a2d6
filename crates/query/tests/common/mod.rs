//! Shared test support: a scripted catalog fetcher with call counting,
//! injectable delays and switchable failures.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use marquee_core::ConnectivityMonitor;
use marquee_query::{CatalogFetcher, ListRequest, QueryClient};
use marquee_tmdb::models::{
    Credits, Movie, MovieDetails, Page, PersonCredits, PersonDetail, Video,
};
use marquee_tmdb::TmdbError;

/// Deterministic in-memory stand-in for the TMDB client.
pub struct ScriptedFetcher {
    total_pages: u32,
    delay: Duration,
    list_calls: AtomicU32,
    detail_calls: AtomicU32,
    person_calls: AtomicU32,
    fail: AtomicBool,
}

impl ScriptedFetcher {
    pub fn new(total_pages: u32) -> Self {
        Self::with_delay(total_pages, Duration::ZERO)
    }

    /// A fetcher whose every call takes `delay` of (paused) time.
    pub fn with_delay(total_pages: u32, delay: Duration) -> Self {
        Self {
            total_pages,
            delay,
            list_calls: AtomicU32::new(0),
            detail_calls: AtomicU32::new(0),
            person_calls: AtomicU32::new(0),
            fail: AtomicBool::new(false),
        }
    }

    pub fn list_calls(&self) -> u32 {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> u32 {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn person_calls(&self) -> u32 {
        self.person_calls.load(Ordering::SeqCst)
    }

    /// Make subsequent calls fail with a remote error.
    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    async fn simulate(&self) -> Result<(), TmdbError> {
        if self.delay > Duration::ZERO {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail.load(Ordering::SeqCst) {
            return Err(TmdbError::Remote {
                status: 500,
                message: "scripted failure".to_string(),
            });
        }
        Ok(())
    }

    /// Three movies per page, with ids disjoint across pages.
    fn page(&self, number: u32) -> Page<Movie> {
        let base = number as i64 * 100;
        Page {
            page: number,
            results: (0..3).map(|i| movie(base + i)).collect(),
            total_pages: self.total_pages,
            total_results: self.total_pages * 3,
        }
    }
}

#[async_trait]
impl CatalogFetcher for ScriptedFetcher {
    async fn fetch_list(
        &self,
        _request: &ListRequest,
        page: u32,
    ) -> Result<Page<Movie>, TmdbError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;
        Ok(self.page(page))
    }

    async fn fetch_movie_details(&self, id: i64) -> Result<MovieDetails, TmdbError> {
        let version = self.detail_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.simulate().await?;
        Ok(MovieDetails {
            id,
            title: format!("Movie {id} v{version}"),
            vote_average: Some(8.0),
            ..Default::default()
        })
    }

    async fn fetch_movie_credits(&self, id: i64) -> Result<Credits, TmdbError> {
        self.simulate().await?;
        Ok(Credits {
            id,
            ..Default::default()
        })
    }

    async fn fetch_movie_videos(&self, _id: i64) -> Result<Vec<Video>, TmdbError> {
        self.simulate().await?;
        Ok(Vec::new())
    }

    async fn fetch_person_detail(&self, id: i64) -> Result<PersonDetail, TmdbError> {
        self.person_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate().await?;
        Ok(PersonDetail {
            id,
            name: format!("Person {id}"),
            ..Default::default()
        })
    }

    async fn fetch_person_movie_credits(&self, id: i64) -> Result<PersonCredits, TmdbError> {
        self.simulate().await?;
        Ok(PersonCredits {
            id,
            ..Default::default()
        })
    }
}

pub fn movie(id: i64) -> Movie {
    Movie {
        id,
        title: format!("Movie {id}"),
        ..Default::default()
    }
}

/// A client over the scripted fetcher, plus the connectivity monitor
/// feeding it.
pub fn client_with(fetcher: Arc<ScriptedFetcher>) -> (QueryClient, ConnectivityMonitor) {
    let monitor = ConnectivityMonitor::new();
    let client = QueryClient::new(fetcher, monitor.handle());
    (client, monitor)
}
