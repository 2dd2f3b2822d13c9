use crate::models::Movie;

/// Builds the single feature text a movie is vectorized from.
///
/// Overview first, then title, joined by one space. Missing fields are
/// already empty strings at the model layer, so the worst case is a bare
/// separator around nothing.
pub fn combined_features(movie: &Movie) -> String {
    format!("{} {}", movie.overview, movie.title)
}

/// Builds feature texts for the whole corpus, preserving input order.
///
/// The position of each text is the row index its movie will occupy in the
/// similarity matrix; nothing else links a record to its row.
pub fn build_feature_texts(movies: &[Movie]) -> Vec<String> {
    movies.iter().map(combined_features).collect()
}
