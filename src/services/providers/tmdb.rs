/// TMDB API provider
///
/// Wraps two read-only endpoints of the TMDB v3 API:
/// 1. Listing: /discover/movie (paginated, popularity-sorted)
/// 2. Popular: /movie/popular (page 1 feeds the recommendation index)
///
/// Language is fixed to en-US and adult/video content is excluded, matching
/// what the rest of the service expects from the corpus.
use crate::{
    error::{AppError, AppResult},
    models::{DiscoverPage, Movie, TmdbPage},
    services::providers::CatalogProvider,
};
use reqwest::Client as HttpClient;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    /// Perform a GET against a TMDB list endpoint and decode the page envelope
    async fn get_page(&self, url: &str, params: &[(&str, &str)]) -> AppResult<TmdbPage> {
        let response = self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let page: TmdbPage = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e)))?;

        Ok(page)
    }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn fetch_page(&self, page: u32) -> AppResult<DiscoverPage> {
        let url = format!("{}/discover/movie", self.api_url);
        let page_param = page.to_string();

        let tmdb_page = self
            .get_page(
                &url,
                &[
                    ("language", "en-US"),
                    ("sort_by", "popularity.desc"),
                    ("include_adult", "false"),
                    ("include_video", "false"),
                    ("page", page_param.as_str()),
                ],
            )
            .await?;

        tracing::info!(
            page = page,
            results = tmdb_page.results.len(),
            total_pages = tmdb_page.total_pages,
            provider = "tmdb",
            "Catalog page fetched"
        );

        Ok(tmdb_page.into())
    }

    async fn fetch_popular(&self) -> AppResult<Vec<Movie>> {
        let url = format!("{}/movie/popular", self.api_url);

        let tmdb_page = self
            .get_page(&url, &[("language", "en-US"), ("page", "1")])
            .await?;

        tracing::info!(
            results = tmdb_page.results.len(),
            provider = "tmdb",
            "Popular movies fetched"
        );

        Ok(tmdb_page.results)
    }
}
