use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{self, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
///
/// CORS is wide open, matching the service's public read-only surface.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Catalog proxy
        .route("/movies", get(handlers::get_movies))
        .route("/movies/popular", get(handlers::get_popular_movies))
        // Recommender
        .route(
            "/movies/recommend/:movie_id",
            get(handlers::get_recommendations),
        )
        .route("/movies/refresh", post(handlers::refresh_index))
        .layer(TraceLayer::new_for_http().make_span_with(request_id::make_span))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
