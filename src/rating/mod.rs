//! Rating resolution.
//!
//! [`RatingResolver`] is the internal-only capability that turns a title
//! into a critic score. It never knows about TMDB's own vote average: the
//! fallback to [`ScoreRecord::Upstream`] is composed by the caller via
//! [`ScoreRecord::resolve`].

use std::sync::Arc;

use axum::http::HeaderMap;
use cineredux_common::constants::{INTERNAL_CALL_HEADER, INTERNAL_CALL_VALUE};
use cineredux_common::{Error, Result};
use serde::{Serialize, Serializer};

use crate::critics::{CriticScore, CriticScoreSource};

/// Who is invoking the resolver.
///
/// In-process callers use [`CallContext::internal`]. The HTTP `/score`
/// endpoint derives the context from the `X-Internal-Call` header, which any
/// client can set: the header is a convention, not authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    internal: bool,
}

impl CallContext {
    /// Context for calls made from inside the aggregation pipeline.
    pub fn internal() -> Self {
        Self { internal: true }
    }

    /// Context for calls with no claim of being internal.
    pub fn external() -> Self {
        Self { internal: false }
    }

    /// Internal only when the marker header is present with value `true`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let internal = headers
            .get(INTERNAL_CALL_HEADER)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == INTERNAL_CALL_VALUE);
        Self { internal }
    }

    pub fn is_internal(&self) -> bool {
        self.internal
    }
}

/// Resolves critic scores for titles on behalf of the pipeline.
#[derive(Clone)]
pub struct RatingResolver {
    source: Arc<dyn CriticScoreSource>,
}

impl RatingResolver {
    pub fn new(source: Arc<dyn CriticScoreSource>) -> Self {
        Self { source }
    }

    /// Resolve the critics score for `title`.
    ///
    /// Returns `Err(Error::Forbidden)` for non-internal callers and
    /// `Err(Error::Validation)` for a blank title. `Ok(None)` means the score
    /// could not be found.
    pub async fn resolve_score(
        &self,
        ctx: CallContext,
        title: &str,
    ) -> Result<Option<CriticScore>> {
        if !ctx.is_internal() {
            return Err(Error::Forbidden);
        }
        if title.trim().is_empty() {
            return Err(Error::missing_query());
        }

        Ok(self.source.critics_score(title).await)
    }
}

/// Replace `&` with `and` so titles like "Fast & Furious" match slugs that
/// spell the word out.
pub fn normalize_title(title: &str) -> String {
    title.replace('&', "and")
}

/// TMDB vote average as shown to clients, e.g. `"7.35/10"`.
pub fn format_upstream_score(vote_average: f64) -> String {
    format!("{:.2}/10", vote_average)
}

/// The single score attached to a movie in a response.
///
/// Flattened into the enclosing record, so the variant decides the field
/// name: `"tomatometer": 85` or `"tmdbScore": "7.35/10"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ScoreRecord {
    #[serde(rename = "tomatometer", serialize_with = "serialize_critic_value")]
    Critic(CriticScore),
    #[serde(rename = "tmdbScore")]
    Upstream(String),
}

impl ScoreRecord {
    /// Critic score when resolved, otherwise the TMDB vote average.
    pub fn resolve(critic: Option<CriticScore>, vote_average: Option<f64>) -> Self {
        match critic {
            Some(score) => ScoreRecord::Critic(score),
            None => ScoreRecord::upstream(vote_average),
        }
    }

    /// Upstream variant from a possibly-missing vote average (missing is 0).
    pub fn upstream(vote_average: Option<f64>) -> Self {
        ScoreRecord::Upstream(format_upstream_score(vote_average.unwrap_or_default()))
    }
}

fn serialize_critic_value<S: Serializer>(
    score: &CriticScore,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_u32(score.rating_value)
}
