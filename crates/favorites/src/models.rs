use std::collections::BTreeMap;

use chrono::Utc;
use marquee_core::types::{MovieId, Timestamp};
use serde::{Deserialize, Serialize};

/// Minimal locally persisted projection of a movie.
///
/// A favorite is a copy, not a live reference: catalog metadata changes
/// after the record was saved do not propagate here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: MovieId,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: String,
}

/// The full favorites mapping, keyed by stringified movie id.
///
/// Persisted as a single JSON object; `BTreeMap` keeps the serialized
/// form deterministic.
pub type FavoritesMap = BTreeMap<String, FavoriteRecord>;

/// What a committed mutation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
}

/// Notification published after each committed favorites mutation.
#[derive(Debug, Clone)]
pub struct FavoritesChange {
    pub kind: ChangeKind,
    pub movie_id: MovieId,
    /// When the mutation was committed (UTC).
    pub timestamp: Timestamp,
}

impl FavoritesChange {
    pub(crate) fn now(kind: ChangeKind, movie_id: MovieId) -> Self {
        Self {
            kind,
            movie_id,
            timestamp: Utc::now(),
        }
    }
}
