use std::path::PathBuf;

use marquee_core::TmdbConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TMDB API endpoints and credential.
    pub tmdb: TmdbConfig,
    /// Path of the local SQLite database holding favorites.
    pub db_path: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var           | Default       |
    /// |-------------------|---------------|
    /// | `MARQUEE_DB_PATH` | `marquee.db`  |
    ///
    /// TMDB variables are documented on [`TmdbConfig::from_env`].
    pub fn from_env() -> Self {
        let db_path = std::env::var("MARQUEE_DB_PATH")
            .unwrap_or_else(|_| "marquee.db".into())
            .into();

        Self {
            tmdb: TmdbConfig::from_env(),
            db_path,
        }
    }
}
