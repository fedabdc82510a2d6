//! Cache policy behavior: stale-while-revalidate, hierarchical
//! invalidation, blocking refresh, eviction, offline gating.

mod common;

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use common::{client_with, ScriptedFetcher};
use marquee_query::{movie_keys, person_keys, Freshness, ListRequest, QueryError};
use marquee_tmdb::models::MovieListKind;
use tokio::time::advance;

/// Drive any spawned background refresh to completion.
async fn settle() {
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn detail_reads_hit_the_cache_until_stale() {
    let fetcher = Arc::new(ScriptedFetcher::new(1));
    let (client, _monitor) = client_with(Arc::clone(&fetcher));

    let first = client.movie_details(42).await.unwrap();
    let second = client.movie_details(42).await.unwrap();
    assert_eq!(fetcher.detail_calls(), 1);
    assert_eq!(second.title, first.title);

    // Past stale-after: the old value is served immediately while a
    // background refetch runs.
    advance(Duration::from_secs(5 * 60 + 1)).await;
    let stale = client.movie_details(42).await.unwrap();
    assert_eq!(stale.title, "Movie 42 v1");

    settle().await;
    assert_eq!(fetcher.detail_calls(), 2);
    assert_eq!(
        client.freshness(&movie_keys::detail(42)).await,
        Some(Freshness::Fresh)
    );

    let refreshed = client.movie_details(42).await.unwrap();
    assert_eq!(refreshed.title, "Movie 42 v2");
}

#[tokio::test(start_paused = true)]
async fn invalidation_matches_prefixes_hierarchically() {
    let fetcher = Arc::new(ScriptedFetcher::new(3));
    let (client, _monitor) = client_with(Arc::clone(&fetcher));

    client
        .infinite(ListRequest::Movies(MovieListKind::Popular))
        .pages()
        .await
        .unwrap();
    client.movie_details(42).await.unwrap();
    client.person_detail(7).await.unwrap();
    assert_eq!(fetcher.person_calls(), 1);

    client.invalidate(&movie_keys::all()).await;

    assert_eq!(
        client.freshness(&movie_keys::list("popular")).await,
        Some(Freshness::Stale)
    );
    assert_eq!(
        client.freshness(&movie_keys::detail(42)).await,
        Some(Freshness::Stale)
    );
    // Unrelated keys stay fresh.
    assert_eq!(
        client.freshness(&person_keys::detail(7)).await,
        Some(Freshness::Fresh)
    );
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_keeps_the_stale_value_servable() {
    let fetcher = Arc::new(ScriptedFetcher::new(1));
    let (client, _monitor) = client_with(Arc::clone(&fetcher));

    client.movie_details(42).await.unwrap();
    advance(Duration::from_secs(6 * 60)).await;

    fetcher.set_fail(true);
    let served = client.movie_details(42).await.unwrap();
    assert_eq!(served.title, "Movie 42 v1");

    settle().await;
    assert_eq!(
        client.freshness(&movie_keys::detail(42)).await,
        Some(Freshness::Stale)
    );

    // Once the network recovers, a blocking refresh commits new data.
    fetcher.set_fail(false);
    client.refresh(&movie_keys::detail(42)).await.unwrap();
    let refreshed = client.movie_details(42).await.unwrap();
    assert_eq!(refreshed.title, "Movie 42 v3");
}

#[tokio::test(start_paused = true)]
async fn blocking_refresh_refetches_all_fetched_pages() {
    let fetcher = Arc::new(ScriptedFetcher::new(5));
    let (client, _monitor) = client_with(Arc::clone(&fetcher));

    let list = client.infinite(ListRequest::Movies(MovieListKind::Popular));
    list.pages().await.unwrap();
    list.fetch_next_page().await.unwrap();
    assert_eq!(fetcher.list_calls(), 2);

    // Pull-to-refresh: block until every movie entry is re-fetched.
    client.refresh(&movie_keys::all()).await.unwrap();

    assert_eq!(fetcher.list_calls(), 4, "both pages re-fetched");
    assert_eq!(list.pages().await.unwrap().len(), 2);
    assert_eq!(
        client.freshness(&movie_keys::list("popular")).await,
        Some(Freshness::Fresh)
    );
}

#[tokio::test(start_paused = true)]
async fn unused_entries_are_evicted_after_the_gc_window() {
    let fetcher = Arc::new(ScriptedFetcher::new(1));
    let (client, _monitor) = client_with(Arc::clone(&fetcher));

    client.movie_details(42).await.unwrap();
    advance(Duration::from_secs(31 * 60)).await;
    client.gc().await;

    assert_eq!(client.freshness(&movie_keys::detail(42)).await, None);
}

#[tokio::test(start_paused = true)]
async fn per_key_policy_override_shortens_staleness() {
    let fetcher = Arc::new(ScriptedFetcher::new(1));
    let (client, _monitor) = client_with(Arc::clone(&fetcher));

    client
        .override_policy(
            movie_keys::detail(42),
            marquee_query::CachePolicy {
                stale_after: Duration::from_secs(1),
                evict_after: Duration::from_secs(30 * 60),
            },
        )
        .await;

    client.movie_details(42).await.unwrap();
    client.movie_details(7).await.unwrap();

    // Well inside the default window, but past the override's.
    advance(Duration::from_secs(2)).await;
    client.movie_details(42).await.unwrap();
    client.movie_details(7).await.unwrap();
    settle().await;

    assert_eq!(fetcher.detail_calls(), 3, "only the overridden key refetched");
    assert_eq!(
        client.freshness(&movie_keys::detail(7)).await,
        Some(Freshness::Fresh)
    );
}

#[tokio::test(start_paused = true)]
async fn offline_miss_fails_without_touching_the_network() {
    let fetcher = Arc::new(ScriptedFetcher::new(1));
    let (client, monitor) = client_with(Arc::clone(&fetcher));

    monitor.set_online(false);
    let err = client.movie_details(42).await.unwrap_err();
    assert_matches!(err, QueryError::Offline);
    assert_eq!(fetcher.detail_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn offline_serves_stale_cache_without_revalidating() {
    let fetcher = Arc::new(ScriptedFetcher::new(1));
    let (client, monitor) = client_with(Arc::clone(&fetcher));

    client.movie_details(42).await.unwrap();
    advance(Duration::from_secs(6 * 60)).await;
    monitor.set_online(false);

    let served = client.movie_details(42).await.unwrap();
    assert_eq!(served.title, "Movie 42 v1");

    settle().await;
    assert_eq!(fetcher.detail_calls(), 1, "no refetch while offline");
    assert_eq!(
        client.freshness(&movie_keys::detail(42)).await,
        Some(Freshness::Stale)
    );
}

#[tokio::test(start_paused = true)]
async fn offline_pagination_errors_and_recovers() {
    let fetcher = Arc::new(ScriptedFetcher::new(5));
    let (client, monitor) = client_with(Arc::clone(&fetcher));

    let list = client.infinite(ListRequest::Movies(MovieListKind::Popular));
    list.pages().await.unwrap();

    monitor.set_online(false);
    let err = list.fetch_next_page().await.unwrap_err();
    assert_matches!(err, QueryError::Offline);

    // The in-flight slot was released; reconnecting resumes cleanly.
    monitor.set_online(true);
    assert_eq!(
        list.fetch_next_page().await.unwrap(),
        marquee_query::FetchOutcome::Fetched(2)
    );
}

#[tokio::test(start_paused = true)]
async fn refresh_while_offline_is_rejected() {
    let fetcher = Arc::new(ScriptedFetcher::new(1));
    let (client, monitor) = client_with(Arc::clone(&fetcher));

    client.movie_details(42).await.unwrap();
    monitor.set_online(false);

    let err = client.refresh(&movie_keys::all()).await.unwrap_err();
    assert_matches!(err, QueryError::Offline);
}
