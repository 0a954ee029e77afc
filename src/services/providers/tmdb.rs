//! TMDB movie metadata provider
//!
//! API Flow:
//! 1. Details: GET {base}/{id} → title, images, runtime, rating, genres
//! 2. Credits: GET {base}/{id}/credits → crew and cast
//!
//! Both calls carry the API key and the configured language as query parameters.
//! No retry and no timeout beyond the client defaults.

use crate::{
    error::{AppError, AppResult},
    models::{ApiCredits, MovieCredits, MovieId, MovieInfo},
    services::providers::MovieProvider,
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, language: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
        }
    }

    fn info_url(&self, id: MovieId) -> String {
        format!("{}/{}", self.api_url, id)
    }

    fn credits_url(&self, id: MovieId) -> String {
        format!("{}/{}/credits", self.api_url, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, id: MovieId) -> AppResult<T> {
        let response = self
            .http_client
            .get(url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!(
                movie_id = id,
                status = %status,
                provider = "tmdb",
                "TMDB request failed"
            );
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {} for movie {}",
                status, id
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                movie_id = id,
                error = %e,
                "Failed to deserialize TMDB response"
            );
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    async fn fetch_info(&self, id: MovieId) -> AppResult<MovieInfo> {
        let info: MovieInfo = self.get_json(&self.info_url(id), id).await?;

        tracing::debug!(
            movie_id = id,
            title = ?info.title,
            provider = "tmdb",
            "Movie info fetched"
        );

        Ok(info)
    }

    async fn fetch_credits(&self, id: MovieId) -> AppResult<MovieCredits> {
        let api_credits: ApiCredits = self.get_json(&self.credits_url(id), id).await?;
        let credits = MovieCredits::from(api_credits);

        tracing::debug!(
            movie_id = id,
            directors = credits.directors.len(),
            actors = credits.actors.len(),
            provider = "tmdb",
            "Movie credits fetched"
        );

        Ok(credits)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
