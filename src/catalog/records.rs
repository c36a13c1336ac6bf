//! Response records served by the public endpoints.
//!
//! Field names are the wire contract the frontend reads, which is why they
//! are short and unprefixed (`movie` is the 1-based rank).

use serde::Serialize;

use crate::rating::ScoreRecord;

/// One entry of a trending or search listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSummary {
    /// 1-based position in the listing.
    pub movie: usize,
    pub title: String,
    pub overview: String,
    pub id: u64,
    #[serde(flatten)]
    pub score: ScoreRecord,
    /// Four-digit release year, empty when TMDB has no release date.
    pub year: String,
    pub poster: Option<String>,
    /// Outer `None` leaves the key out (search listings); trending always
    /// carries it, `null` when TMDB has no backdrop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<Option<String>>,
    pub trailer: Option<String>,
}

/// Body of `GET /trending`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopMovies {
    #[serde(rename = "TopMovies")]
    pub top_movies: Vec<MovieSummary>,
}

/// Body of `GET /search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarMovies {
    #[serde(rename = "SimilarMovies")]
    pub similar_movies: Vec<MovieSummary>,
}

/// Body of `GET /movie/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetailView {
    pub title: String,
    pub overview: String,
    pub year: String,
    pub genres: Vec<String>,
    /// Minutes
    pub runtime: Option<u32>,
    #[serde(flatten)]
    pub score: ScoreRecord,
    pub poster: Option<String>,
    pub trailer: Option<String>,
}

/// Absolute image URL, or `None` when TMDB has no image for the slot.
pub fn image_url(base: &str, path: Option<&str>) -> Option<String> {
    path.filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", base.trim_end_matches('/'), p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_joins_base_and_path() {
        assert_eq!(
            image_url("https://image.tmdb.org/t/p/w500", Some("/abc.jpg")).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
        assert_eq!(image_url("https://img/", Some("/abc.jpg")).as_deref(), Some("https://img/abc.jpg"));
    }

    #[test]
    fn image_url_absent_path() {
        assert_eq!(image_url("https://img", None), None);
        assert_eq!(image_url("https://img", Some("")), None);
    }

    #[test]
    fn search_summary_omits_backdrop_key() {
        let summary = MovieSummary {
            movie: 1,
            title: "Inception".into(),
            overview: "Dreams".into(),
            id: 27205,
            score: ScoreRecord::Upstream("8.37/10".into()),
            year: "2010".into(),
            poster: None,
            backdrop: None,
            trailer: None,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("backdrop").is_none());
        assert!(json["poster"].is_null());
        assert!(json["trailer"].is_null());
        assert_eq!(json["tmdbScore"], "8.37/10");
        assert_eq!(json["movie"], 1);
    }

    #[test]
    fn trending_summary_keeps_null_backdrop() {
        let summary = MovieSummary {
            movie: 1,
            title: "Inception".into(),
            overview: "Dreams".into(),
            id: 27205,
            score: ScoreRecord::Upstream("8.37/10".into()),
            year: "2010".into(),
            poster: None,
            backdrop: Some(None),
            trailer: None,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.as_object().unwrap().contains_key("backdrop"));
        assert!(json["backdrop"].is_null());
    }
}
