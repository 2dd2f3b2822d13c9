/// Movie catalog provider abstraction
///
/// The recommender core only needs two read operations from the upstream
/// catalog, so the boundary is a small trait. The production implementation
/// talks to TMDB; tests substitute a canned provider.
use crate::{
    error::AppResult,
    models::{DiscoverPage, Movie},
};

pub mod tmdb;

/// Trait for movie catalog providers
///
/// Both operations may fail with an upstream error (network, non-2xx,
/// malformed payload); no retries happen at this layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch one page of the catalog listing, most popular first
    async fn fetch_page(&self, page: u32) -> AppResult<DiscoverPage>;

    /// Fetch the first page of currently popular movies
    ///
    /// This page is the entire corpus the recommendation index is built
    /// from; its order is preserved all the way into the similarity matrix.
    async fn fetch_popular(&self) -> AppResult<Vec<Movie>>;
}
