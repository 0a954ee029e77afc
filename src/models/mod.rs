mod catalog;
mod movie;

pub use catalog::{CatalogEntry, MovieId, RecommendedRef, SearchedMovie};
pub use movie::{
    ApiCastMember, ApiCredits, ApiCrewMember, Genre, MovieBundle, MovieCredits, MovieInfo,
    Recommendations, DIRECTOR_JOB, MAX_ACTORS,
};
