//! Durable key-value slots.
//!
//! The store persists everything under one well-known key, so the
//! storage interface is a minimal get/put of text blobs. [`SqliteKv`]
//! is the durable implementation; [`MemoryKv`] backs tests and
//! ephemeral runs.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::sync::Mutex;

use crate::error::StorageError;

/// Well-known slot holding the serialized favorites map.
pub const FAVOURITES_KEY: &str = "favourite_movies";

/// A durable slot of text blobs addressed by key.
#[async_trait]
pub trait KvStorage: Send + Sync {
    /// Read the blob at `key`, or `None` if the slot was never written.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` at `key`, replacing any previous blob atomically.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// SQLite-backed key-value storage.
pub struct SqliteKv {
    pool: SqlitePool,
}

impl SqliteKv {
    /// Open (creating if missing) the database at `path` and apply
    /// pending migrations.
    pub async fn connect(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool (the schema must already be migrated).
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KvStorage for SqliteKv {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM app_kv WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            "INSERT INTO app_kv (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// In-memory key-value storage for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryKv {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStorage for MemoryKv {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_kv_roundtrip() {
        let kv = MemoryKv::new();
        assert_eq!(kv.get("missing").await.unwrap(), None);

        kv.put("slot", "first").await.unwrap();
        kv.put("slot", "second").await.unwrap();
        assert_eq!(kv.get("slot").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn sqlite_kv_survives_reconnection() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("kv.db");

        {
            let kv = SqliteKv::connect(&path).await.expect("first connect");
            kv.put("slot", "persisted").await.unwrap();
        }

        let kv = SqliteKv::connect(&path).await.expect("second connect");
        assert_eq!(kv.get("slot").await.unwrap().as_deref(), Some("persisted"));
    }

    #[tokio::test]
    async fn sqlite_kv_upsert_replaces_value() {
        let dir = tempfile::tempdir().expect("tempdir");
        let kv = SqliteKv::connect(dir.path().join("kv.db")).await.unwrap();

        kv.put("slot", "old").await.unwrap();
        kv.put("slot", "new").await.unwrap();
        assert_eq!(kv.get("slot").await.unwrap().as_deref(), Some("new"));
    }
}
