/// Errors from the TMDB REST layer.
///
/// The three variants are deliberately distinct: transport failures are
/// retryable and rendered as an offline state, remote failures carry the
/// HTTP status for status-specific messaging (e.g. rate limiting), and
/// decode failures are bug-class and logged before surfacing.
#[derive(Debug, thiserror::Error)]
pub enum TmdbError {
    /// The HTTP request never completed (no connectivity, DNS, TLS).
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// TMDB responded with a non-2xx status. The body carries no
    /// guaranteed schema and is kept only as an opaque message.
    #[error("TMDB API error ({status}): {message}")]
    Remote {
        /// HTTP status code.
        status: u16,
        /// Raw response body text, for diagnostics.
        message: String,
    },

    /// A 2xx response body did not match the expected shape.
    #[error("failed to decode TMDB response: {0}")]
    Decode(#[source] serde_json::Error),
}
