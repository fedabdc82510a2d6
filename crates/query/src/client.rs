//! The query-layer context object.
//!
//! [`QueryClient`] owns the key-indexed cache and the policy driving
//! it. It is created once at startup and cheaply cloned into whatever
//! needs it; there are no module-level singletons. Reads go through a
//! stale-while-revalidate path: a stale entry is served immediately
//! while a spawned task refetches it, and only [`refresh`]
//! (pull-to-refresh) blocks until new data is committed.
//!
//! [`refresh`]: QueryClient::refresh

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::time::Instant;

use marquee_core::types::{MovieId, PersonId};
use marquee_core::ConnectivityHandle;
use marquee_tmdb::models::{Credits, Movie, MovieDetails, PersonCredits, PersonDetail, Video};
use marquee_tmdb::TmdbError;

use crate::entry::{CacheEntry, CachePolicy, CachedValue, Freshness};
use crate::error::QueryError;
use crate::fetcher::CatalogFetcher;
use crate::infinite::InfiniteQuery;
use crate::key::{movie_keys, person_keys, QueryKey};
use crate::request::{ListRequest, RequestSpec};

/// Cheaply cloneable handle over the shared query-layer state.
#[derive(Clone)]
pub struct QueryClient {
    pub(crate) inner: Arc<Inner>,
}

pub(crate) struct Inner {
    pub(crate) fetcher: Arc<dyn CatalogFetcher>,
    pub(crate) connectivity: ConnectivityHandle,
    pub(crate) policy: CachePolicy,
    pub(crate) cache: Mutex<HashMap<QueryKey, CacheEntry>>,
    /// Keys with a pagination fetch currently in flight.
    pub(crate) in_flight: Mutex<HashSet<QueryKey>>,
    /// Per-key deviations from the default cache policy.
    pub(crate) policy_overrides: Mutex<HashMap<QueryKey, CachePolicy>>,
}

impl QueryClient {
    /// Create a client with the default cache policy
    /// (stale after 5 minutes, evict after 30 minutes unused).
    pub fn new(fetcher: Arc<dyn CatalogFetcher>, connectivity: ConnectivityHandle) -> Self {
        Self::with_policy(fetcher, connectivity, CachePolicy::default())
    }

    /// Create a client with an explicit cache policy.
    pub fn with_policy(
        fetcher: Arc<dyn CatalogFetcher>,
        connectivity: ConnectivityHandle,
        policy: CachePolicy,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                fetcher,
                connectivity,
                policy,
                cache: Mutex::new(HashMap::new()),
                in_flight: Mutex::new(HashSet::new()),
                policy_overrides: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Override the freshness windows for one key.
    ///
    /// Applies from the entry's next (re)creation; all other keys keep
    /// the client default.
    pub async fn override_policy(&self, key: QueryKey, policy: CachePolicy) {
        self.inner.policy_overrides.lock().await.insert(key, policy);
    }

    /// The policy in force for `key`.
    pub(crate) async fn policy_for(&self, key: &QueryKey) -> CachePolicy {
        self.inner
            .policy_overrides
            .lock()
            .await
            .get(key)
            .copied()
            .unwrap_or(self.inner.policy)
    }

    /// Paginated access to a movie list.
    pub fn infinite(&self, request: ListRequest) -> InfiniteQuery {
        InfiniteQuery::new(self.clone(), request)
    }

    /// Paginated full-text search keyed by the literal query string.
    ///
    /// A blank query never touches the network and reads as an empty
    /// result set.
    pub fn search(&self, query: &str) -> InfiniteQuery {
        self.infinite(ListRequest::Search(query.to_string()))
    }

    /// Cached detail record for a movie.
    pub async fn movie_details(&self, id: MovieId) -> Result<MovieDetails, QueryError> {
        let value = self
            .read_through(movie_keys::detail(id), RequestSpec::MovieDetails(id))
            .await?;
        match value {
            CachedValue::MovieDetails(details) => Ok(*details),
            _ => Err(QueryError::Cache("detail slot held a non-detail value")),
        }
    }

    /// Cached cast and crew for a movie.
    pub async fn movie_credits(&self, id: MovieId) -> Result<Credits, QueryError> {
        let value = self
            .read_through(movie_keys::credits(id), RequestSpec::MovieCredits(id))
            .await?;
        match value {
            CachedValue::MovieCredits(credits) => Ok(credits),
            _ => Err(QueryError::Cache("credits slot held a non-credits value")),
        }
    }

    /// Cached trailers and clips for a movie.
    pub async fn movie_videos(&self, id: MovieId) -> Result<Vec<Video>, QueryError> {
        let value = self
            .read_through(movie_keys::videos(id), RequestSpec::MovieVideos(id))
            .await?;
        match value {
            CachedValue::MovieVideos(videos) => Ok(videos),
            _ => Err(QueryError::Cache("videos slot held a non-videos value")),
        }
    }

    /// Cached first page of movies similar to the given one.
    pub async fn similar_movies(&self, id: MovieId) -> Result<Vec<Movie>, QueryError> {
        let request = ListRequest::Similar(id);
        let value = self
            .read_through(request.key(), RequestSpec::List(request.clone()))
            .await?;
        match value {
            CachedValue::MoviePages(pages) => {
                Ok(pages.into_iter().flat_map(|page| page.results).collect())
            }
            _ => Err(QueryError::Cache("similar slot held a non-list value")),
        }
    }

    /// Cached detail record for a person.
    pub async fn person_detail(&self, id: PersonId) -> Result<PersonDetail, QueryError> {
        let value = self
            .read_through(person_keys::detail(id), RequestSpec::PersonDetail(id))
            .await?;
        match value {
            CachedValue::PersonDetail(person) => Ok(*person),
            _ => Err(QueryError::Cache("person slot held a non-person value")),
        }
    }

    /// Cached movie credits of a person.
    pub async fn person_movie_credits(&self, id: PersonId) -> Result<PersonCredits, QueryError> {
        let value = self
            .read_through(person_keys::credits(id), RequestSpec::PersonCredits(id))
            .await?;
        match value {
            CachedValue::PersonCredits(credits) => Ok(credits),
            _ => Err(QueryError::Cache(
                "person credits slot held a different value",
            )),
        }
    }

    /// Mark every entry whose key starts with `prefix` stale.
    ///
    /// The next read of each marked entry serves the old value and
    /// refetches in the background.
    pub async fn invalidate(&self, prefix: &QueryKey) {
        let mut cache = self.inner.cache.lock().await;
        let mut marked = 0usize;
        for (key, entry) in cache.iter_mut() {
            if key.starts_with(prefix) {
                entry.mark_stale();
                marked += 1;
            }
        }
        tracing::debug!(prefix = %prefix, marked, "invalidated cache entries");
    }

    /// Invalidate and refetch every entry under `prefix`, blocking
    /// until all of them settle (pull-to-refresh).
    ///
    /// Stops at the first failure; entries not yet refetched stay
    /// stale and will revalidate on their next read.
    pub async fn refresh(&self, prefix: &QueryKey) -> Result<(), QueryError> {
        if self.inner.connectivity.is_offline() {
            return Err(QueryError::Offline);
        }

        let targets: Vec<(QueryKey, RequestSpec, usize)> = {
            let mut cache = self.inner.cache.lock().await;
            cache
                .iter_mut()
                .filter(|(key, _)| key.starts_with(prefix))
                .map(|(key, entry)| {
                    entry.mark_refreshing();
                    (key.clone(), entry.request.clone(), entry.value.page_count())
                })
                .collect()
        };

        for (key, spec, page_count) in targets {
            match execute(self.inner.fetcher.as_ref(), &spec, page_count).await {
                Ok(value) => {
                    let mut cache = self.inner.cache.lock().await;
                    if let Some(entry) = cache.get_mut(&key) {
                        entry.commit(value, Instant::now());
                    }
                }
                Err(e) => {
                    let mut cache = self.inner.cache.lock().await;
                    if let Some(entry) = cache.get_mut(&key) {
                        entry.refresh_failed();
                    }
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }

    /// Purge entries that have gone unused past their eviction window.
    ///
    /// Also runs opportunistically on every cached read.
    pub async fn gc(&self) {
        let mut cache = self.inner.cache.lock().await;
        sweep(&mut cache, Instant::now());
    }

    /// Current freshness of a cache entry, if one exists for `key`.
    pub async fn freshness(&self, key: &QueryKey) -> Option<Freshness> {
        let cache = self.inner.cache.lock().await;
        cache.get(key).map(|entry| entry.freshness(Instant::now()))
    }

    // ---- internal read path ----

    /// Stale-while-revalidate read.
    ///
    /// Cache hit: fresh values return directly; stale values return
    /// immediately after spawning a background refetch. Cache miss:
    /// fetch inline (or fail with [`QueryError::Offline`]).
    pub(crate) async fn read_through(
        &self,
        key: QueryKey,
        spec: RequestSpec,
    ) -> Result<CachedValue, QueryError> {
        let offline = self.inner.connectivity.is_offline();

        {
            let now = Instant::now();
            let mut cache = self.inner.cache.lock().await;
            sweep(&mut cache, now);

            if let Some(entry) = cache.get_mut(&key) {
                entry.touch(now);
                match entry.freshness(now) {
                    Freshness::Fresh | Freshness::Refreshing => return Ok(entry.value.clone()),
                    // Offline: the stale value is the best we have, and
                    // a refetch could not succeed anyway.
                    Freshness::Stale if offline => return Ok(entry.value.clone()),
                    Freshness::Stale => {
                        entry.mark_refreshing();
                        let value = entry.value.clone();
                        let spec = entry.request.clone();
                        let page_count = entry.value.page_count();
                        drop(cache);
                        self.spawn_refresh(key, spec, page_count);
                        return Ok(value);
                    }
                }
            }
        }

        if offline {
            return Err(QueryError::Offline);
        }

        let value = execute(self.inner.fetcher.as_ref(), &spec, 1).await?;
        let policy = self.policy_for(&key).await;
        let mut cache = self.inner.cache.lock().await;
        cache.insert(
            key,
            CacheEntry::new(value.clone(), spec, policy, Instant::now()),
        );
        Ok(value)
    }

    /// Refetch `spec` in a background task and settle the entry.
    fn spawn_refresh(&self, key: QueryKey, spec: RequestSpec, page_count: usize) {
        let client = self.clone();
        tokio::spawn(async move {
            let result = execute(client.inner.fetcher.as_ref(), &spec, page_count).await;
            let mut cache = client.inner.cache.lock().await;
            match (cache.get_mut(&key), result) {
                (Some(entry), Ok(value)) => entry.commit(value, Instant::now()),
                (Some(entry), Err(e)) => {
                    entry.refresh_failed();
                    tracing::warn!(key = %key, error = %e, "background refresh failed; keeping stale value");
                }
                // Evicted while the refetch was in flight.
                (None, _) => {}
            }
        });
    }
}

/// Remove entries whose eviction window has elapsed.
fn sweep(cache: &mut HashMap<QueryKey, CacheEntry>, now: Instant) {
    cache.retain(|_, entry| !entry.is_expired(now));
}

/// Run the network side of a request.
///
/// List requests refetch pages `1..=page_count` sequentially (stopping
/// early if the source shrank); everything else is a single fetch.
pub(crate) async fn execute(
    fetcher: &dyn CatalogFetcher,
    spec: &RequestSpec,
    page_count: usize,
) -> Result<CachedValue, TmdbError> {
    match spec {
        RequestSpec::List(request) => {
            let target = page_count.max(1);
            let mut pages = Vec::with_capacity(target);
            for number in 1..=target as u32 {
                let page = fetcher.fetch_list(request, number).await?;
                let exhausted = !page.has_next();
                pages.push(page);
                if exhausted {
                    break;
                }
            }
            Ok(CachedValue::MoviePages(pages))
        }
        RequestSpec::MovieDetails(id) => Ok(CachedValue::MovieDetails(Box::new(
            fetcher.fetch_movie_details(*id).await?,
        ))),
        RequestSpec::MovieCredits(id) => Ok(CachedValue::MovieCredits(
            fetcher.fetch_movie_credits(*id).await?,
        )),
        RequestSpec::MovieVideos(id) => Ok(CachedValue::MovieVideos(
            fetcher.fetch_movie_videos(*id).await?,
        )),
        RequestSpec::PersonDetail(id) => Ok(CachedValue::PersonDetail(Box::new(
            fetcher.fetch_person_detail(*id).await?,
        ))),
        RequestSpec::PersonCredits(id) => Ok(CachedValue::PersonCredits(
            fetcher.fetch_person_movie_credits(*id).await?,
        )),
    }
}
