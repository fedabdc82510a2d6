/// Errors from the local persistence layer.
///
/// Distinct from network errors by design: favorites keep working with
/// no connectivity, and a storage failure must not be rendered as an
/// offline state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The underlying database rejected a read or write.
    #[error("storage error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying pending schema migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Serializing the favorites map for writing failed.
    ///
    /// Failures while *reading* the blob are not errors: a corrupted
    /// blob decodes as an empty map.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
