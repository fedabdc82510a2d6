use marquee_tmdb::TmdbError;

/// Errors surfaced by the query layer.
///
/// Failures are per query, never global: one failed fetch leaves every
/// other cache entry servable.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The underlying TMDB request failed (transport, remote status,
    /// or decode).
    #[error(transparent)]
    Tmdb(#[from] TmdbError),

    /// The host reports no connectivity and nothing cached could
    /// satisfy the read; no network call was attempted.
    #[error("offline: network requests are disabled")]
    Offline,

    /// A cache slot held a value of a kind its key can never produce.
    #[error("internal cache inconsistency: {0}")]
    Cache(&'static str),
}
