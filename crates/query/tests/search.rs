//! Debounced search flow: keystroke coalescing, stale-response
//! rejection, blank-query short-circuit.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{client_with, ScriptedFetcher};
use marquee_query::{movie_keys, Freshness, SearchSession};
use tokio::time::advance;

const QUIET: Duration = Duration::from_millis(500);

#[tokio::test(start_paused = true)]
async fn rapid_typing_issues_exactly_one_query() {
    let fetcher = Arc::new(ScriptedFetcher::new(1));
    let (client, _monitor) = client_with(Arc::clone(&fetcher));
    let session = SearchSession::with_quiet_period(client, QUIET);

    session.input("b").await;
    advance(Duration::from_millis(100)).await;
    session.input("ba").await;
    advance(Duration::from_millis(100)).await;
    session.input("bat").await;
    advance(QUIET).await;

    let results = session.next_results().await.unwrap().expect("settled query");
    assert_eq!(results.query, "bat");
    assert!(!results.movies.is_empty());
    assert_eq!(fetcher.list_calls(), 1, "only the final input hits the network");
}

#[tokio::test(start_paused = true)]
async fn superseded_response_is_discarded_not_misfiled() {
    let fetcher = Arc::new(ScriptedFetcher::with_delay(1, Duration::from_millis(100)));
    let (client, _monitor) = client_with(Arc::clone(&fetcher));
    let session = Arc::new(SearchSession::with_quiet_period(client.clone(), QUIET));

    session.input("bat").await;
    advance(QUIET).await;

    // Start resolving "bat"; its fetch suspends in the fetcher.
    let resolving = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.next_results().await })
    };
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    // The user keeps typing while the fetch is in flight.
    session.input("batman").await;
    advance(Duration::from_millis(100)).await;

    let outcome = resolving.await.unwrap().unwrap();
    assert!(outcome.is_none(), "stale response must be discarded");

    // The response landed in its own key's slot, never in "batman"'s.
    assert_eq!(
        client.freshness(&movie_keys::search("bat")).await,
        Some(Freshness::Fresh)
    );
    assert_eq!(client.freshness(&movie_keys::search("batman")).await, None);
}

#[tokio::test(start_paused = true)]
async fn blank_query_resolves_empty_without_network() {
    let fetcher = Arc::new(ScriptedFetcher::new(1));
    let (client, _monitor) = client_with(Arc::clone(&fetcher));
    let session = SearchSession::with_quiet_period(client, QUIET);

    session.input("   ").await;
    advance(QUIET).await;

    let results = session.next_results().await.unwrap().expect("settled query");
    assert!(results.movies.is_empty());
    assert_eq!(fetcher.list_calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn distinct_queries_get_distinct_cache_slots() {
    let fetcher = Arc::new(ScriptedFetcher::new(1));
    let (client, _monitor) = client_with(Arc::clone(&fetcher));

    client.search("alien").items().await.unwrap();
    client.search("aliens").items().await.unwrap();

    assert_eq!(fetcher.list_calls(), 2);
    assert_eq!(
        client.freshness(&movie_keys::search("alien")).await,
        Some(Freshness::Fresh)
    );
    assert_eq!(
        client.freshness(&movie_keys::search("aliens")).await,
        Some(Freshness::Fresh)
    );
}
