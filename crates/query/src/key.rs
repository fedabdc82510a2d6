//! Structured cache identities.
//!
//! A [`QueryKey`] is an ordered sequence of segments; two requests hit
//! the same cache slot iff their keys are structurally equal. Keys are
//! hierarchical: `["movies"]` is a prefix of every movie-related key,
//! so invalidating it reaches lists, details and searches alike.

use std::fmt;

use marquee_core::types::{MovieId, PersonId};

/// One segment of a [`QueryKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    Text(String),
    Id(i64),
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment::Text(value.to_string())
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Segment::Text(value)
    }
}

impl From<i64> for Segment {
    fn from(value: i64) -> Self {
        Segment::Id(value)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Text(text) => f.write_str(text),
            Segment::Id(id) => write!(f, "{id}"),
        }
    }
}

/// Ordered, structurally comparable identity of a cacheable request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<Segment>);

impl QueryKey {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self(segments)
    }

    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// Whether this key's leading segments equal `prefix`.
    ///
    /// Every key is a prefix of itself.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len() && self.0[..prefix.0.len()] == prefix.0[..]
    }

    /// Return a new key with `segment` appended.
    fn child(&self, segment: Segment) -> QueryKey {
        let mut segments = self.0.clone();
        segments.push(segment);
        QueryKey(segments)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Key builders for movie queries.
///
/// The hierarchy mirrors how the UI invalidates: pull-to-refresh
/// invalidates [`all`], which reaches every list, detail and search.
pub mod movie_keys {
    use super::*;

    /// `["movies"]`
    pub fn all() -> QueryKey {
        QueryKey::new(vec!["movies".into()])
    }

    /// `["movies","list"]` -- prefix of every list key.
    pub fn lists() -> QueryKey {
        all().child("list".into())
    }

    /// `["movies","list",kind]`
    pub fn list(kind: &str) -> QueryKey {
        lists().child(kind.into())
    }

    /// `["movies","detail"]` -- prefix of every detail key.
    pub fn details() -> QueryKey {
        all().child("detail".into())
    }

    /// `["movies","detail",id]`
    pub fn detail(id: MovieId) -> QueryKey {
        details().child(id.into())
    }

    /// `["movies","detail",id,"credits"]`
    pub fn credits(id: MovieId) -> QueryKey {
        detail(id).child("credits".into())
    }

    /// `["movies","detail",id,"videos"]`
    pub fn videos(id: MovieId) -> QueryKey {
        detail(id).child("videos".into())
    }

    /// `["movies","detail",id,"similar"]`
    pub fn similar(id: MovieId) -> QueryKey {
        detail(id).child("similar".into())
    }

    /// `["movies","search",query]` -- keyed by the literal search text.
    pub fn search(query: &str) -> QueryKey {
        all().child("search".into()).child(query.into())
    }
}

/// Key builders for people queries.
pub mod person_keys {
    use super::*;

    /// `["cast"]`
    pub fn all() -> QueryKey {
        QueryKey::new(vec!["cast".into()])
    }

    /// `["cast","detail",id]`
    pub fn detail(id: PersonId) -> QueryKey {
        all().child("detail".into()).child(id.into())
    }

    /// `["cast","credits",id]`
    pub fn credits(id: PersonId) -> QueryKey {
        all().child("credits".into()).child(id.into())
    }
}
