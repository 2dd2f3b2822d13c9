use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::{Movie, Recommendation},
    services::{features, tfidf},
};

/// How many recommendations a query returns at most.
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Immutable content-similarity index over a movie corpus.
///
/// Corpus order and matrix row order are the same thing: row `i` scores
/// `movies[i]` against every other movie. The index is never mutated after
/// construction; a rebuild produces a whole new instance that replaces the
/// old one in a single swap.
#[derive(Debug, Clone)]
pub struct RecommendationIndex {
    movies: Vec<Movie>,
    matrix: Vec<Vec<f32>>,
    built_at: DateTime<Utc>,
}

impl RecommendationIndex {
    /// Build the index from a corpus: feature texts, TF-IDF vectors, then
    /// the all-pairs cosine matrix. Infallible for any corpus, including
    /// empty overviews/titles and duplicate ids.
    pub fn build(movies: Vec<Movie>) -> Self {
        let texts = features::build_feature_texts(&movies);
        let (_, vectors) = tfidf::TfidfVectorizer::fit_transform(&texts);
        let matrix = tfidf::similarity_matrix(&vectors);

        tracing::info!(
            corpus_size = movies.len(),
            "Recommendation index built"
        );

        Self {
            movies,
            matrix,
            built_at: Utc::now(),
        }
    }

    /// Number of movies in the indexed corpus.
    pub fn corpus_size(&self) -> usize {
        self.movies.len()
    }

    /// When this index was built.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Rank the corpus against the given movie and return the top matches.
    ///
    /// Scores sort descending; equal scores keep corpus order (lower index
    /// first), so results are deterministic. The queried movie itself is
    /// dropped by index rather than trusted to sort first. If the same id
    /// appears twice in the corpus, the lowest index wins.
    pub fn recommend(&self, movie_id: u64) -> AppResult<Vec<Recommendation>> {
        let target = self
            .movies
            .iter()
            .position(|m| m.id == movie_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Movie {} not found in corpus", movie_id))
            })?;

        let mut scores: Vec<(usize, f32)> = self.matrix[target]
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != target)
            .map(|(i, &score)| (i, score))
            .collect();

        scores.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));

        let recommendations = scores
            .into_iter()
            .take(MAX_RECOMMENDATIONS)
            .map(|(i, _)| Recommendation::from(&self.movies[i]))
            .collect();

        Ok(recommendations)
    }
}
