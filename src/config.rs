use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB movie endpoint base URL (ids are appended to it)
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language requested from TMDB for titles, genres and overviews
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// TMDB image CDN base URL
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Path to the recommendation dataset
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds without a request before a session is dropped
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,

    /// Upper bound on live sessions; the least recently seen goes first
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3/movie".to_string()
}

fn default_tmdb_language() -> String {
    "fr-FR".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_catalog_path() -> String {
    "data/data_final_light.json".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_session_idle_secs() -> u64 {
    3600
}

fn default_max_sessions() -> usize {
    10_000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_secs)
    }
}
