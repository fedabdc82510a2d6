//! The favorites store.
//!
//! All mutations are read-modify-write cycles over one persisted blob,
//! serialized by a mutex so concurrent calls cannot lose updates.
//! After every committed write the store re-reads the blob and replaces
//! the in-memory snapshot -- persistence and memory are different tiers,
//! and observers must only ever see durable state.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, RwLock};

use marquee_core::types::MovieId;

use crate::error::StorageError;
use crate::models::{ChangeKind, FavoriteRecord, FavoritesChange, FavoritesMap};
use crate::storage::{KvStorage, FAVOURITES_KEY};

/// Buffer capacity for the change broadcast channel.
const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Durable mapping from movie id to [`FavoriteRecord`].
pub struct FavoritesStore {
    storage: Arc<dyn KvStorage>,
    /// Last reconciled view of the persisted blob.
    snapshot: RwLock<FavoritesMap>,
    /// Serializes read-modify-write cycles on the blob.
    write_lock: Mutex<()>,
    change_tx: broadcast::Sender<FavoritesChange>,
}

impl FavoritesStore {
    pub fn new(storage: Arc<dyn KvStorage>) -> Self {
        let (change_tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            storage,
            snapshot: RwLock::new(FavoritesMap::new()),
            write_lock: Mutex::new(()),
            change_tx,
        }
    }

    /// Read the full favorites map from storage.
    ///
    /// A slot that was never written reads as an empty map, as does a
    /// corrupted blob (logged, not surfaced -- losing favorites beats
    /// crashing every reader).
    pub async fn list(&self) -> Result<FavoritesMap, StorageError> {
        self.read_map().await
    }

    /// Insert or overwrite the favorite at `id`.
    pub async fn add(&self, id: MovieId, record: FavoriteRecord) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut map = self.read_map().await?;
        map.insert(id.to_string(), record);
        self.write_map(&map).await?;

        self.reload().await?;
        let _ = self.change_tx.send(FavoritesChange::now(ChangeKind::Added, id));
        Ok(())
    }

    /// Remove the favorite at `id`. Removing an absent id is a no-op,
    /// not an error.
    pub async fn remove(&self, id: MovieId) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut map = self.read_map().await?;
        if map.remove(&id.to_string()).is_none() {
            return Ok(());
        }
        self.write_map(&map).await?;

        self.reload().await?;
        let _ = self
            .change_tx
            .send(FavoritesChange::now(ChangeKind::Removed, id));
        Ok(())
    }

    /// Whether `id` is in the last reconciled snapshot.
    pub async fn contains(&self, id: MovieId) -> bool {
        self.snapshot.read().await.contains_key(&id.to_string())
    }

    /// The last reconciled in-memory map.
    ///
    /// Populated by [`reload`](Self::reload) after each mutation; call
    /// [`list`](Self::list) to read through to storage instead.
    pub async fn snapshot(&self) -> FavoritesMap {
        self.snapshot.read().await.clone()
    }

    /// Subscribe to change notifications published after each
    /// committed mutation.
    pub fn subscribe(&self) -> broadcast::Receiver<FavoritesChange> {
        self.change_tx.subscribe()
    }

    /// Re-read the persisted blob into the in-memory snapshot.
    pub async fn reload(&self) -> Result<(), StorageError> {
        let map = self.read_map().await?;
        *self.snapshot.write().await = map;
        Ok(())
    }

    // ---- blob access ----

    async fn read_map(&self) -> Result<FavoritesMap, StorageError> {
        let Some(raw) = self.storage.get(FAVOURITES_KEY).await? else {
            return Ok(FavoritesMap::new());
        };
        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!(error = %e, "corrupted favorites blob; treating as empty");
                Ok(FavoritesMap::new())
            }
        }
    }

    async fn write_map(&self, map: &FavoritesMap) -> Result<(), StorageError> {
        let raw = serde_json::to_string(map)?;
        self.storage.put(FAVOURITES_KEY, &raw).await
    }
}
