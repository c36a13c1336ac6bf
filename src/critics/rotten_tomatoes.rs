//! Rotten Tomatoes Tomatometer scraper.
//!
//! Movie pages live at `/m/<slug>` and embed their scorecard as JSON inside
//! `<script id="media-scorecard-json">`. None of this is a documented API;
//! anything unexpected is reported as "not found".

use async_trait::async_trait;
use reqwest::{header, Client};
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{slugify, CriticScore, CriticScoreSource, TOMATOMETER_LABEL};
use crate::config::CriticsConfig;

const SCORECARD_SELECTOR: &str = "script#media-scorecard-json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Scorecard {
    critics_score: Option<ScoreBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ScoreBlock {
    title: Option<String>,
    rating_count: Option<Value>,
    review_count: Option<Value>,
    score_percent: Option<Value>,
    score: Option<Value>,
}

/// Scrapes the Tomatometer from Rotten Tomatoes movie pages.
pub struct RottenTomatoesScraper {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl RottenTomatoesScraper {
    pub fn new(config: &CriticsConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: &CriticsConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Page URL for a title, or `None` when the slug comes out empty.
    pub fn page_url(&self, title: &str) -> Option<String> {
        let slug = slugify(title);
        if slug.is_empty() {
            return None;
        }
        Some(format!("{}/m/{}", self.base_url, slug))
    }

    async fn fetch_page(&self, url: &str) -> Option<String> {
        let resp = match self
            .client
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!(url = %url, error = %e, "Critic page request failed");
                return None;
            }
        };

        if !resp.status().is_success() {
            debug!(url = %url, status = %resp.status(), "Critic page not available");
            return None;
        }

        match resp.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read critic page body");
                None
            }
        }
    }
}

#[async_trait]
impl CriticScoreSource for RottenTomatoesScraper {
    async fn critics_score(&self, title: &str) -> Option<CriticScore> {
        let url = self.page_url(title)?;
        debug!(url = %url, "Fetching critic page");

        let html = self.fetch_page(&url).await?;
        let score = parse_scorecard(&html);
        if score.is_none() {
            debug!(url = %url, "No Tomatometer on critic page");
        }
        score
    }
}

/// Extract the Tomatometer from a movie page's HTML.
pub fn parse_scorecard(html: &str) -> Option<CriticScore> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(SCORECARD_SELECTOR).ok()?;
    let script = document.select(&selector).next()?;
    let json: String = script.text().collect();

    let scorecard: Scorecard = match serde_json::from_str(&json) {
        Ok(card) => card,
        Err(e) => {
            warn!(error = %e, "Scorecard JSON did not decode");
            return None;
        }
    };

    let block = scorecard.critics_score?;
    if block.title.as_deref() != Some(TOMATOMETER_LABEL) {
        return None;
    }

    let rating_value = block
        .score_percent
        .as_ref()
        .and_then(as_whole_number)
        .or_else(|| block.score.as_ref().and_then(as_whole_number))?;

    Some(CriticScore {
        label: TOMATOMETER_LABEL.to_string(),
        rating_count: block.rating_count.as_ref().and_then(as_whole_number),
        rating_value: u32::try_from(rating_value).ok()?,
        review_count: block.review_count.as_ref().and_then(as_whole_number),
    })
}

/// Read an integer the page may encode as a number or as text like `"85%"`.
fn as_whole_number(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
        Value::String(s) => {
            let digits = s.trim().trim_end_matches('%').replace(',', "");
            digits.parse().ok()
        }
        _ => None,
    }
}
