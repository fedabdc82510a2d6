/// TMDB API configuration loaded from environment variables.
///
/// The API key has no default and must be provided. The URLs default to
/// the public TMDB endpoints and only need overriding in tests.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// REST API base URL (default: `https://api.themoviedb.org/3`).
    pub base_url: String,
    /// Image CDN base URL (default: `https://image.tmdb.org/t/p`).
    pub image_base_url: String,
    /// API credential sent as the `api_key` query parameter.
    pub api_key: String,
}

impl TmdbConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var               | Default                         |
    /// |-----------------------|---------------------------------|
    /// | `TMDB_API_KEY`        | (required)                      |
    /// | `TMDB_BASE_URL`       | `https://api.themoviedb.org/3`  |
    /// | `TMDB_IMAGE_BASE_URL` | `https://image.tmdb.org/t/p`    |
    pub fn from_env() -> Self {
        let api_key = std::env::var("TMDB_API_KEY").expect("TMDB_API_KEY must be set");

        let base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".into());

        let image_base_url = std::env::var("TMDB_IMAGE_BASE_URL")
            .unwrap_or_else(|_| "https://image.tmdb.org/t/p".into());

        Self {
            base_url,
            image_base_url,
            api_key,
        }
    }

    /// Build a configuration with explicit values (tests, embedding).
    pub fn new(
        base_url: impl Into<String>,
        image_base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            image_base_url: image_base_url.into(),
            api_key: api_key.into(),
        }
    }
}
