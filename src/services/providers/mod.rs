//! Movie metadata provider abstraction
//!
//! The recommendation pipeline only needs two lookups per movie id: general
//! details and credits. Keeping them behind a trait lets the HTTP layer run
//! against TMDB in production and against stubs in tests.

use crate::{
    error::AppResult,
    models::{MovieCredits, MovieId, MovieInfo},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Fetch general information (title, images, runtime, genres, ...)
    async fn fetch_info(&self, id: MovieId) -> AppResult<MovieInfo>;

    /// Fetch directors and lead actors
    async fn fetch_credits(&self, id: MovieId) -> AppResult<MovieCredits>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
