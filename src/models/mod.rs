use serde::{Deserialize, Serialize};

/// A movie record as returned by the TMDB API.
///
/// Fields the recommender depends on (`title`, `overview`) default to empty
/// strings when missing or null, so a sparse upstream record never fails the
/// index build. The remaining fields are passed through to clients verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_to_empty")]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub vote_count: Option<u64>,
}

/// TMDB sends `"overview": null` for some titles; treat that as empty.
fn null_to_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Raw page envelope from TMDB list endpoints (`/discover/movie`, `/movie/popular`)
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage {
    pub page: u32,
    pub results: Vec<Movie>,
    pub total_pages: u32,
    pub total_results: u64,
}

/// Paged movie listing returned to clients
#[derive(Debug, Serialize)]
pub struct DiscoverPage {
    pub movies: Vec<Movie>,
    pub total_pages: u32,
    pub current_page: u32,
    pub total_results: u64,
}

impl From<TmdbPage> for DiscoverPage {
    fn from(page: TmdbPage) -> Self {
        Self {
            movies: page.results,
            total_pages: page.total_pages,
            current_page: page.page,
            total_results: page.total_results,
        }
    }
}

/// Popular movies payload returned to clients
#[derive(Debug, Serialize)]
pub struct PopularResponse {
    pub movies: Vec<Movie>,
}

/// Public-facing projection of a recommended movie
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub id: u64,
    pub title: String,
    pub overview: String,
    pub poster_path: Option<String>,
}

impl From<&Movie> for Recommendation {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            poster_path: movie.poster_path.clone(),
        }
    }
}

/// Ranked recommendations payload returned to clients
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<Recommendation>,
}
