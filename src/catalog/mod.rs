//! Movie aggregation: the three public read operations.
//!
//! Each operation checks the caller's API key before touching the upstream,
//! fetches from the [`MovieDatabase`], then enriches every movie with a
//! score and a trailer. Enrichment runs through an order-preserving buffer,
//! so the output order is the upstream order whatever the concurrency.

pub mod records;

pub use records::{image_url, MovieDetailView, MovieSummary, SimilarMovies, TopMovies};

use std::sync::Arc;

use cineredux_common::{Error, Result};
use futures::{stream, StreamExt, TryStreamExt};
use tracing::debug;

use crate::config::Config;
use crate::rating::{normalize_title, CallContext, RatingResolver, ScoreRecord};
use crate::tmdb::{release_year, select_trailer, MovieDatabase, MovieResult};

/// Which score a listing attaches to its movies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScoreMode {
    /// Try the critics score, fall back to the TMDB vote average.
    CriticFirst,
    /// TMDB vote average only.
    UpstreamOnly,
}

/// Composes the movie database, the rating resolver and trailer lookup.
#[derive(Clone)]
pub struct AggregationService {
    db: Arc<dyn MovieDatabase>,
    resolver: RatingResolver,
    expected_key: Option<String>,
    image_base_url: String,
    video_base_url: String,
    list_limit: usize,
    concurrency: usize,
}

impl AggregationService {
    pub fn new(db: Arc<dyn MovieDatabase>, resolver: RatingResolver, config: &Config) -> Self {
        Self {
            db,
            resolver,
            expected_key: config.auth.expected_key.clone(),
            image_base_url: config.tmdb.image_base_url.clone(),
            video_base_url: config.tmdb.video_base_url.clone(),
            list_limit: config.catalog.list_limit,
            concurrency: config.catalog.enrichment_concurrency.max(1),
        }
    }

    pub fn resolver(&self) -> &RatingResolver {
        &self.resolver
    }

    /// Exact comparison against the configured key. With no key
    /// configured every caller is rejected.
    pub fn authorize(&self, provided: Option<&str>) -> Result<()> {
        match (self.expected_key.as_deref(), provided) {
            (Some(expected), Some(provided)) if !expected.is_empty() && expected == provided => {
                Ok(())
            }
            _ => Err(Error::InvalidApiKey),
        }
    }

    /// Top trending movies with critic scores where available.
    pub async fn list_trending(&self, api_key: Option<&str>) -> Result<TopMovies> {
        self.authorize(api_key)?;

        let movies = self.db.trending().await?;
        debug!(count = movies.len(), "Fetched trending movies");

        let top_movies = self
            .summarize_all(movies, ScoreMode::CriticFirst, true)
            .await?;
        Ok(TopMovies { top_movies })
    }

    /// Title search. Always scored with the TMDB vote average.
    pub async fn search_movies(
        &self,
        api_key: Option<&str>,
        query: Option<&str>,
    ) -> Result<SimilarMovies> {
        let query = query
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(Error::missing_query)?;
        self.authorize(api_key)?;

        let movies = self.db.search(query).await?;
        debug!(query = %query, count = movies.len(), "Fetched search results");

        let similar_movies = self
            .summarize_all(movies, ScoreMode::UpstreamOnly, false)
            .await?;
        Ok(SimilarMovies { similar_movies })
    }

    /// Detail view for one movie.
    pub async fn get_movie_detail(&self, api_key: Option<&str>, id: u64) -> Result<MovieDetailView> {
        self.authorize(api_key)?;

        let movie = self.db.movie(id).await?;
        let genres = movie.genre_names();
        let title = movie.title.unwrap_or_default();
        let score = self.critic_or_upstream(&title, movie.vote_average).await;
        let trailer = self.trailer_url(id).await?;

        Ok(MovieDetailView {
            year: release_year(movie.release_date.as_deref()),
            genres,
            runtime: movie.runtime,
            score,
            poster: image_url(&self.image_base_url, movie.poster_path.as_deref()),
            trailer,
            overview: movie.overview.unwrap_or_default(),
            title,
        })
    }

    async fn summarize_all(
        &self,
        movies: Vec<MovieResult>,
        mode: ScoreMode,
        with_backdrop: bool,
    ) -> Result<Vec<MovieSummary>> {
        stream::iter(movies.into_iter().take(self.list_limit).enumerate())
            .map(|(index, movie)| self.summarize(index + 1, movie, mode, with_backdrop))
            .buffered(self.concurrency)
            .try_collect()
            .await
    }

    async fn summarize(
        &self,
        rank: usize,
        movie: MovieResult,
        mode: ScoreMode,
        with_backdrop: bool,
    ) -> Result<MovieSummary> {
        let title = movie.title.unwrap_or_default();
        let score = match mode {
            ScoreMode::CriticFirst => self.critic_or_upstream(&title, movie.vote_average).await,
            ScoreMode::UpstreamOnly => ScoreRecord::upstream(movie.vote_average),
        };
        let trailer = self.trailer_url(movie.id).await?;

        let backdrop = with_backdrop
            .then(|| image_url(&self.image_base_url, movie.backdrop_path.as_deref()));

        Ok(MovieSummary {
            movie: rank,
            title,
            overview: movie.overview.unwrap_or_default(),
            id: movie.id,
            score,
            year: release_year(movie.release_date.as_deref()),
            poster: image_url(&self.image_base_url, movie.poster_path.as_deref()),
            backdrop,
            trailer,
        })
    }

    /// Critic score for the normalized title, else the vote average. A
    /// resolver refusal is logged and treated as a miss.
    async fn critic_or_upstream(&self, title: &str, vote_average: Option<f64>) -> ScoreRecord {
        let normalized = normalize_title(title);
        let critic = match self
            .resolver
            .resolve_score(CallContext::internal(), &normalized)
            .await
        {
            Ok(score) => score,
            Err(e) => {
                debug!(title = %title, error = %e, "Rating resolution skipped");
                None
            }
        };
        ScoreRecord::resolve(critic, vote_average)
    }

    async fn trailer_url(&self, id: u64) -> Result<Option<String>> {
        let videos = self.db.videos(id).await?;
        Ok(select_trailer(&videos).map(|key| format!("{}{}", self.video_base_url, key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::critics::DisabledSource;

    struct Unreachable;

    #[async_trait::async_trait]
    impl MovieDatabase for Unreachable {
        async fn trending(&self) -> Result<Vec<MovieResult>> {
            Err(Error::upstream(None, "unreachable"))
        }
        async fn search(&self, _query: &str) -> Result<Vec<MovieResult>> {
            Err(Error::upstream(None, "unreachable"))
        }
        async fn movie(&self, _id: u64) -> Result<crate::tmdb::MovieDetail> {
            Err(Error::upstream(Some(404), "unreachable"))
        }
        async fn videos(&self, _id: u64) -> Result<Vec<crate::tmdb::Video>> {
            Err(Error::upstream(None, "unreachable"))
        }
    }

    fn service(expected_key: Option<&str>) -> AggregationService {
        let mut config = Config::default();
        config.auth.expected_key = expected_key.map(str::to_string);
        AggregationService::new(
            Arc::new(Unreachable),
            RatingResolver::new(Arc::new(DisabledSource)),
            &config,
        )
    }

    #[test]
    fn authorize_requires_exact_match() {
        let svc = service(Some("secret"));
        assert!(svc.authorize(Some("secret")).is_ok());
        assert!(matches!(svc.authorize(Some("Secret")), Err(Error::InvalidApiKey)));
        assert!(matches!(svc.authorize(None), Err(Error::InvalidApiKey)));
    }

    #[test]
    fn authorize_rejects_when_unconfigured() {
        assert!(service(None).authorize(Some("")).is_err());
        assert!(service(Some("")).authorize(Some("")).is_err());
    }

    #[tokio::test]
    async fn upstream_failure_fails_whole_listing() {
        let err = service(Some("k")).list_trending(Some("k")).await.unwrap_err();
        assert_eq!(err.to_string(), "Movie not found");
        assert_eq!(err.http_status(), 502);
    }

    #[tokio::test]
    async fn detail_passes_through_upstream_404() {
        let err = service(Some("k"))
            .get_movie_detail(Some("k"), 1)
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 404);
    }

    #[tokio::test]
    async fn search_checks_query_before_key() {
        let err = service(Some("k"))
            .search_movies(Some("wrong"), None)
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 400);

        let err = service(Some("k"))
            .search_movies(Some("wrong"), Some("Inception"))
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 401);
    }
}
