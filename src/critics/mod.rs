//! Critic score lookup.
//!
//! A [`CriticScoreSource`] answers "what is the Tomatometer for this title?"
//! with either a [`CriticScore`] or `None`. Every way a lookup can fail
//! (unknown slug, network error, page layout change, audience score instead
//! of critics score) collapses into `None`, so callers only ever branch on
//! found / not found.

pub mod rotten_tomatoes;

pub use rotten_tomatoes::RottenTomatoesScraper;

use async_trait::async_trait;
use serde::Serialize;

/// Label the aggregator gives its critics score.
pub const TOMATOMETER_LABEL: &str = "Tomatometer";

/// A critics score scraped for one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticScore {
    /// Label of the score block the value came from.
    #[serde(skip)]
    pub label: String,
    /// Number of ratings behind the score, when the page reports it.
    pub rating_count: Option<u64>,
    /// Score as a whole percentage.
    pub rating_value: u32,
    /// Number of reviews behind the score, when the page reports it.
    pub review_count: Option<u64>,
}

/// Source of critic scores keyed by movie title.
#[async_trait]
pub trait CriticScoreSource: Send + Sync {
    /// Look up the critics score for `title`, or `None` if it cannot be
    /// resolved for any reason.
    async fn critics_score(&self, title: &str) -> Option<CriticScore>;
}

/// Source used when critic lookups are switched off in config.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSource;

#[async_trait]
impl CriticScoreSource for DisabledSource {
    async fn critics_score(&self, _title: &str) -> Option<CriticScore> {
        None
    }
}

/// Derive the aggregator's URL slug from a title.
///
/// Drops ASCII punctuation, joins whitespace runs with `_`, lowercases.
/// This is a guess at the site's slug scheme and misses for many titles.
pub fn slugify(title: &str) -> String {
    let stripped: String = title.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    stripped
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}
