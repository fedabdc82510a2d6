use std::sync::Arc;

use marquee_core::ConnectivityMonitor;
use marquee_favorites::{FavoritesStore, SqliteKv};
use marquee_query::QueryClient;
use marquee_tmdb::TmdbClient;

use crate::config::AppConfig;

/// Everything the commands need, built once at startup and torn down
/// at exit. Components receive handles from here instead of reaching
/// for globals.
pub struct AppContext {
    pub config: AppConfig,
    pub query: QueryClient,
    pub favorites: FavoritesStore,
    pub connectivity: ConnectivityMonitor,
}

impl AppContext {
    pub async fn init(config: &AppConfig, offline: bool) -> anyhow::Result<Self> {
        let connectivity = ConnectivityMonitor::new();
        connectivity.set_online(!offline);

        let tmdb = Arc::new(TmdbClient::new(config.tmdb.clone()));
        let query = QueryClient::new(tmdb, connectivity.handle());

        let storage = Arc::new(SqliteKv::connect(&config.db_path).await?);
        let favorites = FavoritesStore::new(storage);
        favorites.reload().await?;
        tracing::debug!(db_path = %config.db_path.display(), "favorites store ready");

        Ok(Self {
            config: config.clone(),
            query,
            favorites,
            connectivity,
        })
    }
}
