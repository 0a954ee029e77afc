use serde::Serialize;

use super::labels;

/// Poster thumbnail in the recommendation grid
pub const THUMBNAIL_SIZE: &str = "w200";
/// Poster in detail panels and click-to-zoom targets
pub const POSTER_SIZE: &str = "w500";
/// Backdrop banner behind the searched movie's title
pub const BACKDROP_SIZE: &str = "w1280";

/// Builds full CDN URLs from TMDB's relative image paths
#[derive(Debug, Clone)]
pub struct ImageUrls {
    base_url: String,
}

impl ImageUrls {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// `{base}/{size}{path}`, TMDB paths already start with a slash
    pub fn url(&self, size: &str, path: &str) -> String {
        format!("{}/{}{}", self.base_url, size, path)
    }

    /// Image record for `path`, or the text fallback when there is no usable path
    pub fn image(&self, path: Option<&str>, size: &str, alt: &str) -> ImageView {
        match path.filter(|p| !p.trim().is_empty()) {
            Some(path) => ImageView::Image {
                src: self.url(size, path),
                zoom_url: self.url(POSTER_SIZE, path),
                alt: alt.to_string(),
            },
            None => ImageView::Fallback {
                text: labels::NO_POSTER.to_string(),
            },
        }
    }
}

/// Image slot of a display record
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageView {
    Image {
        src: String,
        /// Larger rendition opened on click
        zoom_url: String,
        alt: String,
    },
    Fallback {
        text: String,
    },
}
