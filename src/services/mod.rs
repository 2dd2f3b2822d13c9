pub mod features;
pub mod providers;
pub mod recommender;
pub mod tfidf;
