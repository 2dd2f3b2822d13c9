use std::sync::{Arc, Mutex};

use axum_test::TestServer;
use serde_json::json;

use cinematch_api::api::{create_router, AppState};
use cinematch_api::error::{AppError, AppResult};
use cinematch_api::models::{DiscoverPage, Movie};
use cinematch_api::services::providers::CatalogProvider;

/// Canned catalog provider: serves one fixed discover page and pops popular
/// corpora off a queue, one per fetch, so tests can drive rebuilds.
struct FixtureCatalog {
    corpora: Mutex<Vec<Vec<Movie>>>,
}

impl FixtureCatalog {
    fn new(corpora: Vec<Vec<Movie>>) -> Self {
        Self {
            corpora: Mutex::new(corpora),
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for FixtureCatalog {
    async fn fetch_page(&self, page: u32) -> AppResult<DiscoverPage> {
        Ok(DiscoverPage {
            movies: sample_corpus(),
            total_pages: 42,
            current_page: page,
            total_results: 840,
        })
    }

    async fn fetch_popular(&self) -> AppResult<Vec<Movie>> {
        let mut corpora = self.corpora.lock().unwrap();
        if corpora.is_empty() {
            return Err(AppError::ExternalApi("no fixture corpus left".to_string()));
        }
        Ok(corpora.remove(0))
    }
}

fn movie(id: u64, title: &str, overview: &str) -> Movie {
    serde_json::from_value(json!({
        "id": id,
        "title": title,
        "overview": overview,
        "poster_path": format!("/{}.jpg", id)
    }))
    .unwrap()
}

fn sample_corpus() -> Vec<Movie> {
    vec![
        movie(1, "Alpha", "a hero saves the world"),
        movie(2, "Beta", "a hero saves the world"),
        movie(3, "Gamma", "a chef bakes bread"),
    ]
}

fn make_state(corpora: Vec<Vec<Movie>>) -> AppState {
    AppState::new(Arc::new(FixtureCatalog::new(corpora)))
}

async fn built_server(corpora: Vec<Vec<Movie>>) -> TestServer {
    let state = make_state(corpora);
    state.build_index().await.unwrap();
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = built_server(vec![sample_corpus()]).await;
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_get_movies_proxies_page_metadata() {
    let server = built_server(vec![sample_corpus()]).await;

    let response = server.get("/movies").add_query_param("page", 3).await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["current_page"], 3);
    assert_eq!(body["total_pages"], 42);
    assert_eq!(body["total_results"], 840);
    assert_eq!(body["movies"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_get_popular_movies() {
    let server = built_server(vec![sample_corpus(), sample_corpus()]).await;

    let response = server.get("/movies/popular").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let movies = body["movies"].as_array().unwrap();
    assert_eq!(movies.len(), 3);
    assert_eq!(movies[0]["title"], "Alpha");
}

#[tokio::test]
async fn test_recommendations_rank_similar_text_first() {
    let server = built_server(vec![sample_corpus()]).await;

    let response = server.get("/movies/recommend/1").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let recs = body["recommendations"].as_array().unwrap();

    // Beta's text matches Alpha's exactly; Gamma shares nothing
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["id"], 2);
    assert_eq!(recs[1]["id"], 3);
    assert_eq!(recs[0]["poster_path"], "/2.jpg");
}

#[tokio::test]
async fn test_recommendations_never_include_self() {
    let server = built_server(vec![sample_corpus()]).await;

    for id in [1, 2, 3] {
        let response = server.get(&format!("/movies/recommend/{}", id)).await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        for rec in body["recommendations"].as_array().unwrap() {
            assert_ne!(rec["id"], id);
        }
    }
}

#[tokio::test]
async fn test_recommendations_capped_at_five() {
    let corpus: Vec<Movie> = (1..=9)
        .map(|i| movie(i, &format!("Movie {}", i), "a hero saves the world"))
        .collect();
    let server = built_server(vec![corpus]).await;

    let response = server.get("/movies/recommend/1").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_recommend_unknown_id_returns_404() {
    let server = built_server(vec![sample_corpus()]).await;

    let response = server.get("/movies/recommend/999").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn test_recommend_before_build_returns_503() {
    // Router created without running the startup build
    let state = make_state(vec![sample_corpus()]);
    let server = TestServer::new(create_router(state)).unwrap();

    let response = server.get("/movies/recommend/1").await;
    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_refresh_swaps_out_old_corpus() {
    let second_corpus = vec![
        movie(10, "Delta", "a robot dreams of rain"),
        movie(11, "Epsilon", "a robot dreams of snow"),
    ];
    let server = built_server(vec![sample_corpus(), second_corpus]).await;

    // Served from the first corpus
    server.get("/movies/recommend/1").await.assert_status_ok();

    let response = server.post("/movies/refresh").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["corpus_size"], 2);

    // Old ids are gone, new ids are live
    let response = server.get("/movies/recommend/1").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let response = server.get("/movies/recommend/10").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["recommendations"][0]["id"], 11);
}

#[tokio::test]
async fn test_refresh_failure_keeps_serving_old_index() {
    // Only one fixture corpus: the refresh fetch fails upstream
    let server = built_server(vec![sample_corpus()]).await;

    let response = server.post("/movies/refresh").await;
    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);

    // Previous index still answers
    server.get("/movies/recommend/1").await.assert_status_ok();
}

#[tokio::test]
async fn test_request_id_header_propagation() {
    use axum::http::{HeaderName, HeaderValue};

    let server = built_server(vec![sample_corpus()]).await;

    let response = server.get("/health").await;
    assert!(response.headers().contains_key("x-request-id"));

    let id = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
    let response = server
        .get("/health")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static(id),
        )
        .await;
    assert_eq!(response.headers()["x-request-id"], id);
}

#[tokio::test]
async fn test_single_movie_corpus_recommends_nothing() {
    let server = built_server(vec![vec![movie(1, "Alpha", "a hero saves the world")]]).await;

    let response = server.get("/movies/recommend/1").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["recommendations"].as_array().unwrap().is_empty());
}
