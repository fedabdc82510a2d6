/// TMDB movie identifiers are numeric and assigned by the remote catalog.
pub type MovieId = i64;

/// TMDB person identifiers share the same numeric space conventions.
pub type PersonId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
