use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::CatalogEntry,
};

/// In-memory index over the recommendation dataset
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    /// Loads the dataset from a JSON file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Catalog(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let catalog = Self::from_json(&raw)?;

        tracing::info!(
            path = %path.display(),
            entries = catalog.len(),
            "Catalog loaded"
        );

        Ok(catalog)
    }

    /// Parses the dataset: a JSON array of `[searched_movie, [recommended_ref, ...]]`
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(raw)
            .map_err(|e| AppError::Catalog(format!("Invalid catalog format: {}", e)))?;
        Ok(Self::new(entries))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All searchable titles in dataset order
    pub fn list_titles(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.searched().title.as_str())
            .collect()
    }

    /// Sorted, deduplicated titles for the selector
    pub fn selector_titles(&self) -> Vec<&str> {
        let mut titles = self.list_titles();
        titles.sort_unstable();
        titles.dedup();
        titles
    }

    /// Case-insensitive exact match on the searched title; first match wins
    pub fn find_entry(&self, title: &str) -> Option<&CatalogEntry> {
        let needle = title.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.searched().title.to_lowercase() == needle)
    }

    /// Selector suggestions containing `query`, case-insensitively
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&str> {
        let needle = query.trim().to_lowercase();
        self.selector_titles()
            .into_iter()
            .filter(|title| title.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }
}
