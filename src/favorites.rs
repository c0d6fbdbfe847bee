//! Favorites list persisted to durable storage
//!
//! The whole list is written back after every change. Nothing here ever
//! returns an error: read, parse and write failures are logged and the
//! in-memory list stays authoritative.

use std::collections::HashSet;

use crate::models::Movie;
use crate::storage::Storage;

/// Reserved storage key holding the serialized favorites
pub const FAVORITES_KEY: &str = "movie-favorites";

/// Favorites persisted through a `Storage`
#[derive(Debug, Clone)]
pub struct FavoritesStore<S> {
    storage: S,
}

impl<S: Storage> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load favorites, falling back to an empty list on any failure
    pub fn load(&self) -> Vec<Movie> {
        let raw = match self.storage.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::error!(error = %e, "failed to read favorites");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Movie>>(&raw) {
            Ok(list) => dedup_by_id(list),
            Err(e) => {
                tracing::error!(error = %e, "failed to parse favorites, starting empty");
                Vec::new()
            }
        }
    }

    /// Persist the whole list. Failures are logged, never raised.
    pub fn save(&self, list: &[Movie]) {
        let json = match serde_json::to_string(list) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize favorites");
                return;
            }
        };

        if let Err(e) = self.storage.set(FAVORITES_KEY, &json) {
            tracing::error!(error = %e, "failed to save favorites");
        }
    }

    /// Add `movie` if absent, remove it if present, then save.
    ///
    /// Presence is decided by `imdb_id` alone. Returns the new list even
    /// when the write fails.
    pub fn toggle(&self, list: &[Movie], movie: &Movie) -> Vec<Movie> {
        let updated: Vec<Movie> = if contains(list, &movie.imdb_id) {
            list.iter()
                .filter(|m| m.imdb_id != movie.imdb_id)
                .cloned()
                .collect()
        } else {
            let mut next = list.to_vec();
            next.push(movie.clone());
            next
        };

        self.save(&updated);
        updated
    }
}

/// Whether `list` holds a movie with this external ID
pub fn contains(list: &[Movie], imdb_id: &str) -> bool {
    list.iter().any(|m| m.imdb_id == imdb_id)
}

/// Keep the first occurrence of each ID
fn dedup_by_id(list: Vec<Movie>) -> Vec<Movie> {
    let mut seen = HashSet::new();
    let before = list.len();
    let deduped: Vec<Movie> = list
        .into_iter()
        .filter(|m| seen.insert(m.imdb_id.clone()))
        .collect();
    if deduped.len() != before {
        tracing::warn!(
            dropped = before - deduped.len(),
            "stored favorites contained duplicate ids"
        );
    }
    deduped
}
