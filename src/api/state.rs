use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    services::{providers::CatalogProvider, recommender::RecommendationIndex},
};

/// Shared application state
///
/// The index slot starts empty and is populated by an explicit build call
/// before traffic is served. Readers take an `Arc` snapshot of the whole
/// index, so a concurrent rebuild can never hand them half of an old corpus
/// and half of a new matrix.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn CatalogProvider>,
    index: Arc<RwLock<Option<Arc<RecommendationIndex>>>>,
}

impl AppState {
    /// Creates application state with an empty index slot
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            provider,
            index: Arc::new(RwLock::new(None)),
        }
    }

    /// Fetch the popular-movies corpus and (re)build the index.
    ///
    /// The new index is built completely before the swap; a failed fetch
    /// leaves whatever index was previously installed untouched. Returns
    /// the corpus size of the new index.
    pub async fn build_index(&self) -> AppResult<usize> {
        let movies = self.provider.fetch_popular().await?;
        let index = RecommendationIndex::build(movies);
        let size = index.corpus_size();

        let mut slot = self.index.write().await;
        *slot = Some(Arc::new(index));

        Ok(size)
    }

    /// Snapshot of the current index, or `IndexNotReady` before first build
    pub async fn current_index(&self) -> AppResult<Arc<RecommendationIndex>> {
        self.index.read().await.clone().ok_or_else(|| {
            AppError::IndexNotReady("Recommendation index has not been built yet".to_string())
        })
    }
}
