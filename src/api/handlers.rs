use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    models::{DiscoverPage, PopularResponse, RecommendationsResponse},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub corpus_size: usize,
    pub built_at: DateTime<Utc>,
}

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Paged catalog listing, proxied straight from the upstream discover endpoint
pub async fn get_movies(
    State(state): State<AppState>,
    Query(params): Query<PageQuery>,
) -> AppResult<Json<DiscoverPage>> {
    let page = state.provider.fetch_page(params.page).await?;
    Ok(Json(page))
}

/// Currently popular movies, proxied from upstream
pub async fn get_popular_movies(State(state): State<AppState>) -> AppResult<Json<PopularResponse>> {
    let movies = state.provider.fetch_popular().await?;
    Ok(Json(PopularResponse { movies }))
}

/// Up to five content-similar movies for the given movie id
///
/// Served entirely from the in-memory index; 503 before the first build,
/// 404 for ids outside the indexed corpus.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Path(movie_id): Path<u64>,
) -> AppResult<Json<RecommendationsResponse>> {
    let index = state.current_index().await?;
    let recommendations = index.recommend(movie_id)?;

    tracing::debug!(
        movie_id = movie_id,
        results = recommendations.len(),
        "Recommendations served"
    );

    Ok(Json(RecommendationsResponse { recommendations }))
}

/// Re-fetch the popular corpus and swap in a freshly built index
pub async fn refresh_index(State(state): State<AppState>) -> AppResult<Json<RefreshResponse>> {
    let corpus_size = state.build_index().await?;
    let index = state.current_index().await?;

    tracing::info!(corpus_size = corpus_size, "Recommendation index refreshed");

    Ok(Json(RefreshResponse {
        corpus_size,
        built_at: index.built_at(),
    }))
}
