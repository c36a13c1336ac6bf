//! Shared test harness for integration tests.
//!
//! Provides in-memory [`StubDatabase`] and [`StubCritics`] implementations
//! that count calls, and [`TestHarness`] which wires them into a full
//! [`AppContext`] and router.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use cineredux::config::Config;
use cineredux::critics::{CriticScore, CriticScoreSource};
use cineredux::server::{create_router, AppContext};
use cineredux::tmdb::{Genre, MovieDatabase, MovieDetail, MovieResult, Video};
use cineredux_common::{Error, Result};

pub const API_KEY: &str = "test-expected-key";

/// Canned movie database that records how often it is hit.
#[derive(Default)]
pub struct StubDatabase {
    pub trending: Vec<MovieResult>,
    pub search_results: Vec<MovieResult>,
    pub details: HashMap<u64, MovieDetail>,
    pub videos: HashMap<u64, Vec<Video>>,
    pub fail_lists: bool,
    pub calls: AtomicUsize,
    pub queries: Mutex<Vec<String>>,
}

impl StubDatabase {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl MovieDatabase for StubDatabase {
    async fn trending(&self) -> Result<Vec<MovieResult>> {
        self.hit();
        if self.fail_lists {
            return Err(Error::upstream(Some(503), "stub outage"));
        }
        Ok(self.trending.clone())
    }

    async fn search(&self, query: &str) -> Result<Vec<MovieResult>> {
        self.hit();
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail_lists {
            return Err(Error::upstream(Some(503), "stub outage"));
        }
        Ok(self.search_results.clone())
    }

    async fn movie(&self, id: u64) -> Result<MovieDetail> {
        self.hit();
        self.details
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::upstream(Some(404), format!("no movie {id}")))
    }

    async fn videos(&self, id: u64) -> Result<Vec<Video>> {
        self.hit();
        Ok(self.videos.get(&id).cloned().unwrap_or_default())
    }
}

/// Critic scores keyed by exact title; every looked-up title is recorded.
#[derive(Default)]
pub struct StubCritics {
    pub scores: HashMap<String, u32>,
    pub titles: Mutex<Vec<String>>,
}

impl StubCritics {
    pub fn with(scores: &[(&str, u32)]) -> Self {
        Self {
            scores: scores.iter().map(|(t, v)| (t.to_string(), *v)).collect(),
            titles: Mutex::new(Vec::new()),
        }
    }

    pub fn looked_up(&self) -> Vec<String> {
        self.titles.lock().unwrap().clone()
    }
}

#[async_trait]
impl CriticScoreSource for StubCritics {
    async fn critics_score(&self, title: &str) -> Option<CriticScore> {
        self.titles.lock().unwrap().push(title.to_string());
        self.scores.get(title).map(|value| CriticScore {
            label: "Tomatometer".to_string(),
            rating_count: Some(250),
            rating_value: *value,
            review_count: Some(260),
        })
    }
}

pub fn movie(id: u64, title: &str, vote_average: f64) -> MovieResult {
    MovieResult {
        id,
        title: Some(title.to_string()),
        overview: Some(format!("Overview of {title}")),
        release_date: Some("2021-06-25".to_string()),
        vote_average: Some(vote_average),
        poster_path: Some(format!("/poster{id}.jpg")),
        backdrop_path: Some(format!("/backdrop{id}.jpg")),
    }
}

pub fn detail(id: u64, title: &str, vote_average: f64) -> MovieDetail {
    MovieDetail {
        id,
        title: Some(title.to_string()),
        overview: Some(format!("Overview of {title}")),
        release_date: Some("2010-07-15".to_string()),
        vote_average: Some(vote_average),
        poster_path: Some(format!("/poster{id}.jpg")),
        backdrop_path: None,
        runtime: Some(148),
        genres: Some(vec![
            Genre {
                id: Some(28),
                name: Some("Action".to_string()),
            },
            Genre {
                id: Some(878),
                name: Some("Science Fiction".to_string()),
            },
        ]),
    }
}

pub fn video(kind: &str, name: &str, key: &str) -> Video {
    Video {
        key: Some(key.to_string()),
        name: Some(name.to_string()),
        kind: Some(kind.to_string()),
        site: Some("YouTube".to_string()),
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.expected_key = Some(API_KEY.to_string());
    config.tmdb.api_key = "tmdb-test-key".to_string();
    config
}

/// Test harness wrapping a fully-constructed [`AppContext`] over stubs.
pub struct TestHarness {
    pub db: Arc<StubDatabase>,
    pub critics: Arc<StubCritics>,
    pub app: Router,
}

impl TestHarness {
    pub fn new(db: StubDatabase, critics: StubCritics) -> Self {
        Self::with_config(test_config(), db, critics)
    }

    pub fn with_config(config: Config, db: StubDatabase, critics: StubCritics) -> Self {
        let db = Arc::new(db);
        let critics = Arc::new(critics);
        let ctx = AppContext::new(config, db.clone(), critics.clone());
        Self {
            db,
            critics,
            app: create_router(ctx),
        }
    }

    /// Issue a GET and return the status and raw body.
    pub async fn get_raw(&self, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, Vec<u8>) {
        let mut request = Request::get(uri);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = self
            .app
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    /// Issue a GET and decode the JSON body.
    pub async fn get_json(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.get_json_with_headers(uri, &[]).await
    }

    pub async fn get_json_with_headers(
        &self,
        uri: &str,
        headers: &[(&str, &str)],
    ) -> (StatusCode, serde_json::Value) {
        let (status, bytes) = self.get_raw(uri, headers).await;
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }
}
