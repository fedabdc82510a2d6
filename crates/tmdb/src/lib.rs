//! Typed REST client for the TMDB catalog API.
//!
//! Wraps the read-only TMDB v3 endpoints the application consumes
//! (movie lists, trending, search, details, credits, videos, similar
//! titles, people) using [`reqwest`], decoding responses into the
//! models in [`models`]. The client never writes to the remote API.

pub mod client;
pub mod error;
pub mod models;

pub use client::TmdbClient;
pub use error::TmdbError;
