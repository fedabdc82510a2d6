//! Durable local favorites, independent of network availability.
//!
//! A [`FavoritesStore`] keeps the user's favorite movies as one JSON
//! blob in a local key-value slot, with serialized read-modify-write
//! mutations, a mandatory read-after-write reload, and a broadcast
//! channel notifying observers after each committed change.

pub mod error;
pub mod models;
pub mod storage;
pub mod store;

pub use error::StorageError;
pub use models::{ChangeKind, FavoriteRecord, FavoritesChange, FavoritesMap};
pub use storage::{KvStorage, MemoryKv, SqliteKv};
pub use store::FavoritesStore;
