//! TF-IDF vectorization and cosine similarity.
//!
//! Tokenizes feature texts, builds a vocabulary and smoothed IDF weights
//! from the current corpus, produces unit-length TF-IDF vectors, and
//! computes an all-pairs cosine similarity matrix via dot products.
//! The vocabulary is derived fresh on every build, so scores are always
//! relative to whatever corpus is currently indexed.

use std::collections::{HashMap, HashSet};

/// Common English words excluded from the vocabulary.
const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "it", "in", "on", "of", "to", "and", "or", "for", "with", "this",
    "that", "these", "those", "be", "are", "was", "were", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "can", "shall",
    "not", "no", "nor", "but", "if", "then", "else", "when", "while", "at", "by", "from", "as",
    "into", "onto", "about", "against", "between", "through", "during", "before", "after",
    "above", "below", "up", "down", "out", "off", "over", "under", "again", "once", "here",
    "there", "all", "any", "both", "each", "few", "more", "most", "other", "some", "such",
    "only", "own", "same", "so", "than", "too", "very", "just", "its", "also", "who", "whom",
    "which", "what", "where", "why", "how", "you", "your", "yours", "i", "me", "my", "mine",
    "we", "us", "our", "ours", "they", "them", "their", "theirs", "he", "him", "his", "she",
    "her", "hers", "itself", "himself", "herself", "themselves",
];

/// Corpus-fitted TF-IDF vectorizer.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    /// term → dimension index
    vocabulary: HashMap<String, usize>,
    /// IDF weight per dimension
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Derive vocabulary and IDF weights from a corpus of texts.
    ///
    /// Uses smoothed IDF, `ln((1 + n) / (1 + df)) + 1`, so no weight ever
    /// divides by zero even for terms present in every document.
    pub fn fit(texts: &[String]) -> Self {
        let n = texts.len() as f32;

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for text in texts {
            let unique: HashSet<String> = tokenize(text).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term.clone()).or_insert(0) += 1;
                let next = vocabulary.len();
                vocabulary.entry(term).or_insert(next);
            }
        }

        let mut idf = vec![0.0f32; vocabulary.len()];
        for (term, &idx) in &vocabulary {
            let df = doc_freq[term] as f32;
            idf[idx] = ((1.0 + n) / (1.0 + df)).ln() + 1.0;
        }

        Self { vocabulary, idf }
    }

    /// Number of vocabulary dimensions.
    pub fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    /// Embed one text as a unit-length TF-IDF vector.
    ///
    /// A text with no in-vocabulary tokens (including the empty text)
    /// yields the zero vector, which has zero cosine to everything.
    pub fn transform(&self, text: &str) -> Vec<f32> {
        let mut tf: HashMap<String, f32> = HashMap::new();
        for token in tokenize(text) {
            *tf.entry(token).or_insert(0.0) += 1.0;
        }

        let mut vector = vec![0.0f32; self.vocabulary.len()];
        for (term, count) in tf {
            if let Some(&idx) = self.vocabulary.get(&term) {
                vector[idx] = count * self.idf[idx];
            }
        }

        normalize(&mut vector);
        vector
    }

    /// Fit on the corpus and embed every text, in input order.
    pub fn fit_transform(texts: &[String]) -> (Self, Vec<Vec<f32>>) {
        let vectorizer = Self::fit(texts);
        let vectors = texts.iter().map(|t| vectorizer.transform(t)).collect();
        (vectorizer, vectors)
    }
}

/// All-pairs cosine similarity over unit-length vectors.
///
/// Off-diagonal entries are plain dot products (the vectors are already
/// normalized); the diagonal is pinned to 1.0 so self-similarity holds even
/// for zero vectors. Upper triangle is computed once and mirrored, which
/// keeps the matrix exactly symmetric.
pub fn similarity_matrix(vectors: &[Vec<f32>]) -> Vec<Vec<f32>> {
    let n = vectors.len();
    let mut matrix = vec![vec![0.0f32; n]; n];

    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let score = dot(&vectors[i], &vectors[j]);
            matrix[i][j] = score;
            matrix[j][i] = score;
        }
    }

    matrix
}

/// Lowercase, split on non-alphanumeric, drop single chars and stop words.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.len() > 1)
        .filter(|w| !STOP_WORDS.contains(w))
        .map(|w| w.to_string())
        .collect()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Normalize a vector to unit length (in-place); zero vectors stay zero.
fn normalize(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for x in v.iter_mut() {
            *x /= norm;
        }
    }
}
