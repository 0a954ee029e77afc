use serde::{Deserialize, Serialize};

/// TMDB movie identifier
pub type MovieId = u64;

/// Movie a user can search for
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchedMovie {
    /// Display title (French release title)
    #[serde(rename = "title_fr")]
    pub title: String,
    #[serde(rename = "id_recherche")]
    pub id: MovieId,
}

/// Precomputed recommendation for a searched movie
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecommendedRef {
    #[serde(rename = "id_reco")]
    pub id: MovieId,
}

/// One dataset row: `[searched_movie, [recommended_ref, ...]]`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry(pub SearchedMovie, pub Vec<RecommendedRef>);

impl CatalogEntry {
    pub fn searched(&self) -> &SearchedMovie {
        &self.0
    }

    pub fn recommendations(&self) -> &[RecommendedRef] {
        &self.1
    }
}
