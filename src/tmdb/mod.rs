//! Upstream movie database (TMDB) access.
//!
//! The [`MovieDatabase`] trait is the seam the catalog talks to; [`TmdbClient`]
//! is the production implementation over the TMDB v3 REST API. Response
//! types decode only the fields the gateway reads, and every field TMDB may
//! omit is an `Option` so a sparse record degrades instead of failing.

pub mod client;

pub use client::TmdbClient;

use async_trait::async_trait;
use cineredux_common::Result;
use serde::Deserialize;

/// Video type TMDB uses for trailers.
const TRAILER_TYPE: &str = "Trailer";
/// Substring a trailer name must contain to be picked.
const OFFICIAL_TRAILER: &str = "Official Trailer";

/// A movie as returned in TMDB list endpoints (trending, search).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieResult {
    pub id: u64,
    pub title: Option<String>,
    pub overview: Option<String>,
    /// `YYYY-MM-DD`, empty or absent for unreleased titles.
    pub release_date: Option<String>,
    /// Community rating on a 0-10 scale.
    pub vote_average: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// Full record from `/movie/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieDetail {
    pub id: u64,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    pub genres: Option<Vec<Genre>>,
}

impl MovieDetail {
    /// Genre names in upstream order, skipping unnamed entries.
    pub fn genre_names(&self) -> Vec<String> {
        self.genres
            .iter()
            .flatten()
            .filter_map(|g| g.name.clone())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Genre {
    pub id: Option<u64>,
    pub name: Option<String>,
}

/// One entry of `/movie/{id}/videos`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Video {
    /// Site-specific video key (a YouTube id for YouTube videos).
    pub key: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub site: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ResultsPage<T> {
    results: Option<Vec<T>>,
}

impl<T> ResultsPage<T> {
    /// Entries of the page; a missing or `null` list is empty.
    pub(crate) fn into_results(self) -> Vec<T> {
        self.results.unwrap_or_default()
    }
}

/// Read access to the upstream movie database.
///
/// Implementations must surface transport failures and non-2xx answers as
/// [`Error::Upstream`](cineredux_common::Error::Upstream); they must not
/// retry.
#[async_trait]
pub trait MovieDatabase: Send + Sync {
    /// Movies trending in the configured window, in upstream order.
    async fn trending(&self) -> Result<Vec<MovieResult>>;

    /// Free-text title search, first page, in upstream order.
    async fn search(&self, query: &str) -> Result<Vec<MovieResult>>;

    /// Detail record for a single movie.
    async fn movie(&self, id: u64) -> Result<MovieDetail>;

    /// Videos attached to a movie, in upstream order.
    async fn videos(&self, id: u64) -> Result<Vec<Video>>;
}

/// Pick the trailer to show for a movie.
///
/// First entry whose type is exactly `Trailer`, whose name contains
/// `Official Trailer` (case-sensitive) and which has a non-empty key.
/// Upstream order decides ties. Returns the key.
pub fn select_trailer(videos: &[Video]) -> Option<&str> {
    videos
        .iter()
        .filter(|v| v.kind.as_deref() == Some(TRAILER_TYPE))
        .filter(|v| v.name.as_deref().is_some_and(|n| n.contains(OFFICIAL_TRAILER)))
        .find_map(|v| v.key.as_deref().filter(|k| !k.is_empty()))
}

/// Four-digit year from a TMDB date string, or empty when absent.
pub fn release_year(date: Option<&str>) -> String {
    date.and_then(|d| d.split('-').next())
        .unwrap_or_default()
        .to_string()
}
