use cineredux_common::constants::{
    BROWSER_USER_AGENT, ROTTEN_TOMATOES_BASE_URL, TMDB_BASE_URL, TMDB_IMAGE_BASE_URL,
    YOUTUBE_WATCH_URL,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub tmdb: TmdbConfig,

    #[serde(default)]
    pub critics: CriticsConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Shared secret clients pass as `?api_key=` (env: `expected_key`).
    /// When unset every public endpoint rejects.
    #[serde(default)]
    pub expected_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TmdbConfig {
    /// TMDB v3 API key (env: `api_key`)
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,

    /// Prefix for poster and backdrop paths
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,

    /// Prefix for trailer video keys
    #[serde(default = "default_video_base_url")]
    pub video_base_url: String,

    #[serde(default)]
    pub trending_window: TrendingWindow,
}

fn default_tmdb_base_url() -> String {
    TMDB_BASE_URL.to_string()
}
fn default_image_base_url() -> String {
    TMDB_IMAGE_BASE_URL.to_string()
}
fn default_video_base_url() -> String {
    YOUTUBE_WATCH_URL.to_string()
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_tmdb_base_url(),
            image_base_url: default_image_base_url(),
            video_base_url: default_video_base_url(),
            trending_window: TrendingWindow::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingWindow {
    Day,
    #[default]
    Week,
}

impl TrendingWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendingWindow::Day => "day",
            TrendingWindow::Week => "week",
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CriticsConfig {
    /// Disable to always fall back to the TMDB vote average
    #[serde(default = "default_critics_enabled")]
    pub enabled: bool,

    #[serde(default = "default_critics_base_url")]
    pub base_url: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_critics_enabled() -> bool {
    true
}
fn default_critics_base_url() -> String {
    ROTTEN_TOMATOES_BASE_URL.to_string()
}
fn default_user_agent() -> String {
    BROWSER_USER_AGENT.to_string()
}

impl Default for CriticsConfig {
    fn default() -> Self {
        Self {
            enabled: default_critics_enabled(),
            base_url: default_critics_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// Maximum number of entries returned by list endpoints
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,

    /// How many movies are enriched at once. 1 keeps the strictly
    /// sequential behaviour; output order is preserved either way.
    #[serde(default = "default_enrichment_concurrency")]
    pub enrichment_concurrency: usize,
}

fn default_list_limit() -> usize {
    10
}
fn default_enrichment_concurrency() -> usize {
    1
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
            enrichment_concurrency: default_enrichment_concurrency(),
        }
    }
}
