use serde::{Deserialize, Serialize};

use super::MovieId;

/// Crew job that marks a director in TMDB credits
pub const DIRECTOR_JOB: &str = "Director";

/// Number of billed actors kept from the cast list
pub const MAX_ACTORS: usize = 10;

/// Movie details from GET /movie/{id}
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieInfo {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// Runtime in minutes
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    /// ISO `YYYY-MM-DD`, sometimes empty for unreleased titles
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Directors and lead actors of a movie
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MovieCredits {
    pub directors: Vec<String>,
    pub actors: Vec<String>,
}

// ============================================================================
// TMDB Credits API Types
// ============================================================================

/// API response from GET /movie/{id}/credits
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCredits {
    #[serde(default)]
    pub cast: Vec<ApiCastMember>,
    #[serde(default)]
    pub crew: Vec<ApiCrewMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCastMember {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiCrewMember {
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
}

impl From<ApiCredits> for MovieCredits {
    fn from(credits: ApiCredits) -> Self {
        let directors = credits
            .crew
            .into_iter()
            .filter(|member| member.job.as_deref() == Some(DIRECTOR_JOB))
            .map(|member| member.name)
            .collect();

        let actors = credits
            .cast
            .into_iter()
            .take(MAX_ACTORS)
            .map(|member| member.name)
            .collect();

        Self { directors, actors }
    }
}

/// Everything fetched for one movie id
///
/// A `None` half means that call failed; the failure is reported as a warning
/// alongside the bundle rather than aborting the page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieBundle {
    pub id: MovieId,
    pub info: Option<MovieInfo>,
    pub credits: Option<MovieCredits>,
}

/// Searched movie plus its recommendations, in dataset order
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendations {
    pub searched: MovieBundle,
    pub recommended: Vec<MovieBundle>,
    /// User-visible messages for failed fetches
    pub warnings: Vec<String>,
}
