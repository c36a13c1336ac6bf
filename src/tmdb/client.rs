//! TMDB (The Movie Database) HTTP client.
//!
//! Implements [`MovieDatabase`] by querying the TMDB v3 REST API. No retries
//! and no timeout override: a failing upstream fails the enclosing request.

use async_trait::async_trait;
use cineredux_common::{Error, Result};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{MovieDatabase, MovieDetail, MovieResult, ResultsPage, Video};
use crate::config::{TmdbConfig, TrendingWindow};

/// TMDB client.
///
/// # Examples
///
/// ```no_run
/// use cineredux::config::TmdbConfig;
/// use cineredux::tmdb::TmdbClient;
///
/// let config = TmdbConfig {
///     api_key: "your-api-key".into(),
///     ..TmdbConfig::default()
/// };
/// let client = TmdbClient::new(&config);
/// ```
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    trending_window: TrendingWindow,
}

impl TmdbClient {
    /// Create a client with its own connection pool.
    pub fn new(config: &TmdbConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client sharing an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, config: &TmdbConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            trending_window: config.trending_window,
        }
    }

    /// GET `path` with the API key and `params`, decoding the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        // The URL carries the API key once built, so only the path is logged.
        debug!(path = %path, "TMDB request");

        let resp = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| {
                Error::upstream(None, format!("TMDB request failed: {path}: {}", e.without_url()))
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::upstream(
                Some(status.as_u16()),
                format!("TMDB returned {status} for {path}"),
            ));
        }

        resp.json::<T>().await.map_err(|e| {
            Error::upstream(
                Some(status.as_u16()),
                format!("failed to parse TMDB response for {path}: {}", e.without_url()),
            )
        })
    }
}

#[async_trait]
impl MovieDatabase for TmdbClient {
    async fn trending(&self) -> Result<Vec<MovieResult>> {
        let path = format!("/trending/movie/{}", self.trending_window.as_str());
        let page: ResultsPage<MovieResult> = self.get_json(&path, &[]).await?;
        Ok(page.into_results())
    }

    async fn search(&self, query: &str) -> Result<Vec<MovieResult>> {
        let page: ResultsPage<MovieResult> =
            self.get_json("/search/movie", &[("query", query)]).await?;
        Ok(page.into_results())
    }

    async fn movie(&self, id: u64) -> Result<MovieDetail> {
        self.get_json(&format!("/movie/{id}"), &[]).await
    }

    async fn videos(&self, id: u64) -> Result<Vec<Video>> {
        let page: ResultsPage<Video> = self.get_json(&format!("/movie/{id}/videos"), &[]).await?;
        Ok(page.into_results())
    }
}
