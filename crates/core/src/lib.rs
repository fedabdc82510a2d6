//! Shared building blocks for the marquee data layer.
//!
//! This crate carries the pieces every other crate needs and nothing
//! else: primitive type aliases, TMDB configuration loaded from the
//! environment, image URL construction, and the host connectivity
//! signal.

pub mod config;
pub mod connectivity;
pub mod images;
pub mod types;

pub use config::TmdbConfig;
pub use connectivity::{ConnectivityHandle, ConnectivityMonitor};
