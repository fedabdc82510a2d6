//! Cursor pagination over a cached movie list.
//!
//! An [`InfiniteQuery`] is a lightweight handle onto one list's cache
//! slot. Any number of handles may exist for the same key; the
//! per-key in-flight set in the client guarantees that at most one
//! page fetch runs per key, so rapid repeated calls coalesce instead
//! of duplicating network traffic.

use tokio::time::Instant;

use marquee_tmdb::models::{Movie, Page};

use crate::client::QueryClient;
use crate::entry::{CacheEntry, CachedValue};
use crate::error::QueryError;
use crate::key::QueryKey;
use crate::request::{ListRequest, RequestSpec};

/// What a [`fetch_next_page`](InfiniteQuery::fetch_next_page) call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A page was fetched; carries its page number.
    Fetched(u32),
    /// Another fetch for this key was already in flight; nothing sent.
    AlreadyInFlight,
    /// The last fetched page was the final one; nothing sent.
    NoMorePages,
}

/// Handle for paginated access to one list's cache slot.
pub struct InfiniteQuery {
    client: QueryClient,
    request: ListRequest,
    key: QueryKey,
}

impl InfiniteQuery {
    pub(crate) fn new(client: QueryClient, request: ListRequest) -> Self {
        let key = request.key();
        Self {
            client,
            request,
            key,
        }
    }

    /// The cache key this handle reads and writes.
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Blank searches are never executed; they read as an empty,
    /// exhausted result set while the user is still typing.
    fn is_blank_search(&self) -> bool {
        matches!(&self.request, ListRequest::Search(query) if query.trim().is_empty())
    }

    /// All pages fetched so far, in fetch order.
    ///
    /// Fetches page 1 on first use; afterwards this is a cached read
    /// under the normal stale-while-revalidate policy.
    pub async fn pages(&self) -> Result<Vec<Page<Movie>>, QueryError> {
        if self.is_blank_search() {
            return Ok(Vec::new());
        }
        let value = self
            .client
            .read_through(self.key.clone(), RequestSpec::List(self.request.clone()))
            .await?;
        match value {
            CachedValue::MoviePages(pages) => Ok(pages),
            _ => Err(QueryError::Cache("list slot held a non-list value")),
        }
    }

    /// Concatenation of all fetched pages' results, in fetch order.
    pub async fn items(&self) -> Result<Vec<Movie>, QueryError> {
        Ok(self
            .pages()
            .await?
            .into_iter()
            .flat_map(|page| page.results)
            .collect())
    }

    /// Whether another page follows the most recently fetched one.
    ///
    /// True before anything was fetched: page 1 is still ahead.
    pub async fn has_next_page(&self) -> bool {
        if self.is_blank_search() {
            return false;
        }
        let cache = self.client.inner.cache.lock().await;
        match cache.get(&self.key).map(|entry| &entry.value) {
            Some(CachedValue::MoviePages(pages)) => {
                pages.last().map_or(true, |page| page.has_next())
            }
            _ => true,
        }
    }

    /// Fetch the next page of this list, if there is one.
    ///
    /// No-op when the sequence is exhausted ([`FetchOutcome::NoMorePages`])
    /// or when a fetch for this key is already in flight
    /// ([`FetchOutcome::AlreadyInFlight`]). Pages for one key are
    /// fetched strictly sequentially; a fetch that settles after the
    /// slot changed underneath it (invalidation, refresh) is discarded
    /// instead of inserted out of order.
    pub async fn fetch_next_page(&self) -> Result<FetchOutcome, QueryError> {
        if self.is_blank_search() {
            return Ok(FetchOutcome::NoMorePages);
        }

        // Decide which page comes next from the slot's current state.
        let (next_page, prior_len) = {
            let cache = self.client.inner.cache.lock().await;
            match cache.get(&self.key).map(|entry| &entry.value) {
                Some(CachedValue::MoviePages(pages)) => match pages.last() {
                    Some(last) if !last.has_next() => return Ok(FetchOutcome::NoMorePages),
                    Some(last) => (last.page + 1, pages.len()),
                    None => (1, 0),
                },
                _ => (1, 0),
            }
        };

        // At most one page fetch per key.
        {
            let mut in_flight = self.client.inner.in_flight.lock().await;
            if !in_flight.insert(self.key.clone()) {
                return Ok(FetchOutcome::AlreadyInFlight);
            }
        }

        if self.client.inner.connectivity.is_offline() {
            self.clear_in_flight().await;
            return Err(QueryError::Offline);
        }

        let result = self
            .client
            .inner
            .fetcher
            .fetch_list(&self.request, next_page)
            .await;
        self.clear_in_flight().await;

        let page = match result {
            Ok(page) => page,
            Err(e) => return Err(e.into()),
        };

        let now = Instant::now();
        let policy = self.client.policy_for(&self.key).await;
        let mut cache = self.client.inner.cache.lock().await;
        let entry = cache.entry(self.key.clone()).or_insert_with(|| {
            CacheEntry::new(
                CachedValue::MoviePages(Vec::new()),
                RequestSpec::List(self.request.clone()),
                policy,
                now,
            )
        });

        if let CachedValue::MoviePages(pages) = &mut entry.value {
            let still_expected =
                pages.len() == prior_len && pages.last().map_or(1, |last| last.page + 1) == next_page;
            if still_expected {
                pages.push(page);
                entry.touch_fetched(now);
            } else {
                tracing::debug!(key = %self.key, page = next_page, "discarding out-of-sequence page");
            }
        }

        Ok(FetchOutcome::Fetched(next_page))
    }

    async fn clear_in_flight(&self) {
        let mut in_flight = self.client.inner.in_flight.lock().await;
        in_flight.remove(&self.key);
    }
}
