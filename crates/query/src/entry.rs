//! Cache entries and their freshness lifecycle.
//!
//! Each entry moves through {Fresh, Stale, Refreshing}; eviction is
//! removal from the map. Fresh→Stale happens by elapsed time or
//! explicit invalidation; Stale→Refreshing when a background refetch
//! starts; Refreshing settles back to Fresh on success or Stale on
//! failure, keeping the old value servable throughout.

use std::time::Duration;

use tokio::time::Instant;

use marquee_tmdb::models::{Credits, Movie, MovieDetails, Page, PersonCredits, PersonDetail, Video};

use crate::request::RequestSpec;

/// Freshness of a cache entry at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Within the stale-after window; servable as-is.
    Fresh,
    /// Past the window or invalidated; servable while a refetch is due.
    Stale,
    /// A background refetch is underway; the old value is servable.
    Refreshing,
}

/// Per-entry freshness windows.
#[derive(Debug, Clone, Copy)]
pub struct CachePolicy {
    /// Time after fetch before the entry is considered stale.
    pub stale_after: Duration,
    /// Time after last access before an unused entry is purged.
    pub evict_after: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            stale_after: Duration::from_secs(5 * 60),
            evict_after: Duration::from_secs(30 * 60),
        }
    }
}

/// The decoded result held by a cache entry.
///
/// One cache maps keys of every query kind, so the value side is a
/// closed enum rather than a generic parameter; the typed accessors on
/// [`QueryClient`](crate::QueryClient) recover the concrete type.
#[derive(Debug, Clone)]
pub enum CachedValue {
    MoviePages(Vec<Page<Movie>>),
    MovieDetails(Box<MovieDetails>),
    MovieCredits(Credits),
    MovieVideos(Vec<Video>),
    PersonDetail(Box<PersonDetail>),
    PersonCredits(PersonCredits),
}

impl CachedValue {
    /// Number of fetched pages, for refetching a pagination sequence.
    /// Non-list values refetch as a single unit.
    pub(crate) fn page_count(&self) -> usize {
        match self {
            CachedValue::MoviePages(pages) => pages.len(),
            _ => 1,
        }
    }
}

/// A cached result plus the metadata driving its lifecycle.
#[derive(Debug)]
pub(crate) struct CacheEntry {
    pub value: CachedValue,
    pub request: RequestSpec,
    pub fetched_at: Instant,
    pub last_access: Instant,
    pub policy: CachePolicy,
    state: Freshness,
}

impl CacheEntry {
    pub fn new(value: CachedValue, request: RequestSpec, policy: CachePolicy, now: Instant) -> Self {
        Self {
            value,
            request,
            fetched_at: now,
            last_access: now,
            policy,
            state: Freshness::Fresh,
        }
    }

    /// Freshness at `now`, folding elapsed time into the explicit state.
    pub fn freshness(&self, now: Instant) -> Freshness {
        match self.state {
            Freshness::Fresh
                if now.duration_since(self.fetched_at) >= self.policy.stale_after =>
            {
                Freshness::Stale
            }
            state => state,
        }
    }

    /// Whether the entry has gone unused past its eviction window.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.last_access) >= self.policy.evict_after
    }

    /// Record an access (defers eviction).
    pub fn touch(&mut self, now: Instant) {
        self.last_access = now;
    }

    /// Explicit invalidation. An entry already refreshing stays in
    /// Refreshing; the in-flight refetch will supersede the value anyway.
    pub fn mark_stale(&mut self) {
        if self.state != Freshness::Refreshing {
            self.state = Freshness::Stale;
        }
    }

    /// A refetch for this entry has started.
    pub fn mark_refreshing(&mut self) {
        self.state = Freshness::Refreshing;
    }

    /// A refetch settled successfully: swap the value, restart the clock.
    pub fn commit(&mut self, value: CachedValue, now: Instant) {
        self.value = value;
        self.fetched_at = now;
        self.last_access = now;
        self.state = Freshness::Fresh;
    }

    /// A refetch failed: the old value stays servable, still stale.
    pub fn refresh_failed(&mut self) {
        self.state = Freshness::Stale;
    }

    /// A pagination fetch appended a page in place; the whole sequence
    /// counts as freshly fetched.
    pub fn touch_fetched(&mut self, now: Instant) {
        self.fetched_at = now;
        self.last_access = now;
        self.state = Freshness::Fresh;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(now: Instant) -> CacheEntry {
        CacheEntry::new(
            CachedValue::MovieDetails(Box::new(MovieDetails {
                id: 1,
                title: "T".into(),
                ..Default::default()
            })),
            RequestSpec::MovieDetails(1),
            CachePolicy::default(),
            now,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_entry_goes_stale_by_elapsed_time() {
        let now = Instant::now();
        let entry = entry(now);
        assert_eq!(entry.freshness(now), Freshness::Fresh);

        tokio::time::advance(Duration::from_secs(5 * 60)).await;
        assert_eq!(entry.freshness(Instant::now()), Freshness::Stale);
    }

    #[tokio::test(start_paused = true)]
    async fn invalidation_overrides_remaining_freshness() {
        let now = Instant::now();
        let mut entry = entry(now);
        entry.mark_stale();
        assert_eq!(entry.freshness(now), Freshness::Stale);
    }

    #[tokio::test(start_paused = true)]
    async fn commit_restarts_the_freshness_clock() {
        let now = Instant::now();
        let mut entry = entry(now);
        entry.mark_stale();
        entry.mark_refreshing();
        assert_eq!(entry.freshness(now), Freshness::Refreshing);

        let value = entry.value.clone();
        entry.commit(value, now);
        assert_eq!(entry.freshness(now), Freshness::Fresh);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_refresh_settles_back_to_stale() {
        let now = Instant::now();
        let mut entry = entry(now);
        entry.mark_refreshing();
        entry.refresh_failed();
        assert_eq!(entry.freshness(now), Freshness::Stale);
    }

    #[tokio::test(start_paused = true)]
    async fn invalidating_a_refreshing_entry_keeps_it_refreshing() {
        let now = Instant::now();
        let mut entry = entry(now);
        entry.mark_refreshing();
        entry.mark_stale();
        assert_eq!(entry.freshness(now), Freshness::Refreshing);
    }

    #[tokio::test(start_paused = true)]
    async fn unused_entry_expires_after_the_eviction_window() {
        let now = Instant::now();
        let mut entry = entry(now);

        tokio::time::advance(Duration::from_secs(29 * 60)).await;
        entry.touch(Instant::now());
        assert!(!entry.is_expired(Instant::now()));

        tokio::time::advance(Duration::from_secs(30 * 60)).await;
        assert!(entry.is_expired(Instant::now()));
    }
}
