//! Response models for the TMDB v3 API.
//!
//! Field names mirror the remote JSON schema (snake_case). Everything
//! here is read-only data decoded from responses; identity is the
//! remote numeric id. Fields the API is known to omit or null are
//! `Option` or defaulted so that a sparse record never fails decoding.
//! `vote_average` in particular is always `Option<f64>`: absence of a
//! rating is a distinct state, never folded into `0.0`.

use marquee_core::types::{MovieId, PersonId};
use serde::{Deserialize, Serialize};

/// One fetched unit of a paginated list endpoint:
/// `{ page, results, total_pages, total_results }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub page: u32,
    pub results: Vec<T>,
    pub total_pages: u32,
    pub total_results: u32,
}

impl<T> Page<T> {
    /// Whether another page follows this one in the sequence.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// A movie as returned by list, search and similar endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub video: bool,
}

/// Full movie record from the detail endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub budget: i64,
    #[serde(default)]
    pub revenue: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub production_countries: Vec<ProductionCountry>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    #[serde(default)]
    pub belongs_to_collection: Option<Collection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionCountry {
    pub iso_3166_1: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpokenLanguage {
    pub iso_639_1: String,
    pub name: String,
    #[serde(default)]
    pub english_name: String,
}

/// Collection a movie belongs to, when any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

/// Cast and crew for a movie.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credits {
    pub id: MovieId,
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CastMember {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub order: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewMember {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub job: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// A trailer, teaser or clip attached to a movie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    pub id: String,
    pub key: String,
    pub name: String,
    pub site: String,
    #[serde(default)]
    pub size: u32,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
}

/// Envelope of the `/movie/{id}/videos` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideosResponse {
    pub id: MovieId,
    #[serde(default)]
    pub results: Vec<Video>,
}

/// A person from the people endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonDetail {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub biography: String,
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub deathday: Option<String>,
    #[serde(default)]
    pub gender: u8,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub known_for_department: String,
    #[serde(default)]
    pub place_of_birth: Option<String>,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub also_known_as: Vec<String>,
}

/// Movie credits of a person (cast roles only).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonCredits {
    pub id: PersonId,
    #[serde(default)]
    pub cast: Vec<PersonMovieCredit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonMovieCredit {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub character: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

/// The fixed movie list categories TMDB exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovieListKind {
    Popular,
    NowPlaying,
    TopRated,
    Upcoming,
}

impl MovieListKind {
    /// Endpoint path for this category.
    pub fn path(self) -> &'static str {
        match self {
            MovieListKind::Popular => "/movie/popular",
            MovieListKind::NowPlaying => "/movie/now_playing",
            MovieListKind::TopRated => "/movie/top_rated",
            MovieListKind::Upcoming => "/movie/upcoming",
        }
    }

    /// Stable name used in cache keys and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            MovieListKind::Popular => "popular",
            MovieListKind::NowPlaying => "now_playing",
            MovieListKind::TopRated => "top_rated",
            MovieListKind::Upcoming => "upcoming",
        }
    }
}

/// Time window for the trending endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrendingWindow {
    Day,
    Week,
}

impl TrendingWindow {
    pub fn path(self) -> &'static str {
        match self {
            TrendingWindow::Day => "/trending/movie/day",
            TrendingWindow::Week => "/trending/movie/week",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrendingWindow::Day => "day",
            TrendingWindow::Week => "week",
        }
    }
}
