//! Data structures shared across cinefav
//!
//! - **Movie**: one search hit / favorite, shaped like the OMDb record
//! - **Search**: status, mode and the state of the current result set

use serde::{Deserialize, Serialize};
use std::fmt;

/// Poster value OMDb uses when no image exists
pub const NO_POSTER: &str = "N/A";

/// Image shown in place of a missing poster
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/150x222.png?text=No+Image";

// =============================================================================
// Movie
// =============================================================================

/// A movie summary as returned by the search API.
///
/// Field names follow the provider so the same record round-trips through
/// API responses and the favorites store. Identity is `imdb_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    /// Kept as text: series report ranges like "2005–2008"
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default = "no_poster")]
    pub poster: String,
}

fn no_poster() -> String {
    NO_POSTER.to_string()
}

impl Movie {
    pub fn new(
        imdb_id: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        poster: impl Into<String>,
    ) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            title: title.into(),
            year: year.into(),
            poster: poster.into(),
        }
    }

    /// Whether the provider returned a real poster
    pub fn has_poster(&self) -> bool {
        !self.poster.is_empty() && self.poster != NO_POSTER
    }

    /// Poster URL, or the placeholder when the provider has none
    pub fn poster_url(&self) -> &str {
        if self.has_poster() {
            &self.poster
        } else {
            PLACEHOLDER_POSTER
        }
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.year.is_empty() {
            write!(f, "{} [{}]", self.title, self.imdb_id)
        } else {
            write!(f, "{} ({}) [{}]", self.title, self.year, self.imdb_id)
        }
    }
}

// =============================================================================
// Search State
// =============================================================================

/// Where the current search is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Empty,
    Error,
}

impl fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SearchStatus::Idle => "idle",
            SearchStatus::Loading => "loading",
            SearchStatus::Success => "success",
            SearchStatus::Empty => "empty",
            SearchStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// What the result grid is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Default fetch, no user query
    #[default]
    Popular,
    /// Results for a user query
    Search,
}

/// State of the result grid.
///
/// Mutated only through `begin`, `succeed` and `fail`, which keep
/// `items` non-empty exactly when `status` is `Success`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    status: SearchStatus,
    mode: Mode,
    last_query: String,
    items: Vec<Movie>,
    error_message: String,
}

impl SearchState {
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn last_query(&self) -> &str {
        &self.last_query
    }

    pub fn items(&self) -> &[Movie] {
        &self.items
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn is_loading(&self) -> bool {
        self.status == SearchStatus::Loading
    }

    /// Enter `Loading` for a new fetch. An empty query means the default fetch.
    pub fn begin(&mut self, query: &str) {
        self.status = SearchStatus::Loading;
        self.items.clear();
        if query.is_empty() {
            self.mode = Mode::Popular;
            self.last_query.clear();
        } else {
            self.mode = Mode::Search;
            self.last_query = query.to_string();
        }
    }

    /// Record a completed fetch
    pub fn succeed(&mut self, items: Vec<Movie>) {
        if items.is_empty() {
            self.status = SearchStatus::Empty;
            self.items.clear();
        } else {
            self.status = SearchStatus::Success;
            self.items = items;
        }
    }

    /// Record a failed fetch
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = SearchStatus::Error;
        self.items.clear();
        self.error_message = message.into();
    }

    pub fn find(&self, imdb_id: &str) -> Option<&Movie> {
        self.items.iter().find(|m| m.imdb_id == imdb_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str) -> Movie {
        Movie::new(id, format!("Movie {}", id), "2001", NO_POSTER)
    }

    #[test]
    fn test_movie_serde_uses_provider_names() {
        let json = r#"{"Title":"Batman Begins","Year":"2005","imdbID":"tt0372784","Type":"movie","Poster":"https://m.media-amazon.com/images/M/batman.jpg"}"#;
        let m: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(m.imdb_id, "tt0372784");
        assert_eq!(m.title, "Batman Begins");
        assert_eq!(m.year, "2005");
        assert!(m.has_poster());

        let out = serde_json::to_string(&m).unwrap();
        assert!(out.contains("\"imdbID\":\"tt0372784\""));
    }

    #[test]
    fn test_poster_sentinel() {
        let m = movie("tt1");
        assert!(!m.has_poster());
        assert_eq!(m.poster_url(), PLACEHOLDER_POSTER);

        let missing: Movie = serde_json::from_str(r#"{"imdbID":"tt2","Title":"X"}"#).unwrap();
        assert_eq!(missing.poster, NO_POSTER);
        assert_eq!(missing.year, "");
    }

    #[test]
    fn test_movie_display() {
        assert_eq!(movie("tt1").to_string(), "Movie tt1 (2001) [tt1]");
    }

    #[test]
    fn test_search_state_transitions() {
        let mut state = SearchState::default();
        assert_eq!(state.status(), SearchStatus::Idle);

        state.begin("batman");
        assert_eq!(state.status(), SearchStatus::Loading);
        assert_eq!(state.mode(), Mode::Search);
        assert_eq!(state.last_query(), "batman");

        state.succeed(vec![movie("tt1"), movie("tt2")]);
        assert_eq!(state.status(), SearchStatus::Success);
        assert_eq!(state.items().len(), 2);
        assert!(state.find("tt2").is_some());

        state.begin("");
        assert_eq!(state.mode(), Mode::Popular);
        assert_eq!(state.last_query(), "");
        assert!(state.items().is_empty());

        state.succeed(Vec::new());
        assert_eq!(state.status(), SearchStatus::Empty);
    }

    #[test]
    fn test_search_state_fail_clears_items() {
        let mut state = SearchState::default();
        state.begin("x");
        state.succeed(vec![movie("tt1")]);
        state.begin("y");
        state.fail("boom");
        assert_eq!(state.status(), SearchStatus::Error);
        assert_eq!(state.error_message(), "boom");
        assert!(state.items().is_empty());
    }
}
