use crate::catalog::{MovieDetailView, SimilarMovies, TopMovies};
use crate::rating::CallContext;
use crate::server::error::ApiError;
use crate::server::AppContext;
use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::HeaderMap,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use cineredux_common::Error;
use serde::Deserialize;
use serde_json::json;

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/", get(index))
        .route("/trending", get(trending))
        .route("/search", get(search))
        // Search path used by the standalone-server deployment
        .route("/movie", get(search))
        .route("/movie/:id", get(movie_detail))
        .route("/score", get(score))
}

async fn index() -> impl IntoResponse {
    Json(json!({
        "status": 200,
        "message": "OK, Welcome to CineRedux"
    }))
}

#[derive(Deserialize)]
struct KeyQuery {
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct SearchQuery {
    query: Option<String>,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct ScoreQuery {
    query: Option<String>,
}

async fn trending(
    State(ctx): State<AppContext>,
    Query(params): Query<KeyQuery>,
) -> Result<Json<TopMovies>, ApiError> {
    let movies = ctx.catalog.list_trending(params.api_key.as_deref()).await?;
    Ok(Json(movies))
}

async fn search(
    State(ctx): State<AppContext>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<SimilarMovies>, ApiError> {
    let movies = ctx
        .catalog
        .search_movies(params.api_key.as_deref(), params.query.as_deref())
        .await?;
    Ok(Json(movies))
}

async fn movie_detail(
    State(ctx): State<AppContext>,
    id: Result<Path<u64>, PathRejection>,
    Query(params): Query<KeyQuery>,
) -> Result<Json<MovieDetailView>, ApiError> {
    // Non-numeric ids never reach the upstream.
    let Path(id) = id.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected movie id");
        Error::MovieNotFound
    })?;

    let movie = ctx
        .catalog
        .get_movie_detail(params.api_key.as_deref(), id)
        .await?;
    Ok(Json(movie))
}

/// Critic score lookup for callers that claim to be internal via the
/// `X-Internal-Call: true` header.
async fn score(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
    Query(params): Query<ScoreQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let call = CallContext::from_headers(&headers);
    let title = params.query.unwrap_or_default();

    let score = ctx
        .catalog
        .resolver()
        .resolve_score(call, &title)
        .await?
        .ok_or(Error::RatingNotFound)?;

    let mut body = serde_json::Map::new();
    body.insert(
        score.label.clone(),
        json!({
            "movie": title,
            "ratingCount": score.rating_count,
            "ratingValue": score.rating_value,
            "reviewCount": score.review_count,
        }),
    );
    Ok(Json(serde_json::Value::Object(body)))
}
