//! Display model
//!
//! Pure projection of search state and favorites into the strings and
//! cards a renderer draws. Favorites are projected from the favorites
//! list alone, independent of search status.

use std::collections::HashSet;

use crate::models::{Mode, Movie, SearchState, SearchStatus};

pub const LOADING_TEXT: &str = "Loading...";
pub const EMPTY_RESULTS_TEXT: &str = "No movies found. Try another search.";
pub const EMPTY_FAVORITES_TEXT: &str = "Your favorites list is empty.";
pub const POPULAR_HEADING: &str = "Popular Movies";

/// One movie as drawn in a grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub has_poster: bool,
    pub is_favorite: bool,
}

impl Card {
    fn new(movie: &Movie, is_favorite: bool) -> Self {
        Self {
            imdb_id: movie.imdb_id.clone(),
            title: movie.title.clone(),
            year: movie.year.clone(),
            poster_url: movie.poster_url().to_string(),
            has_poster: movie.has_poster(),
            is_favorite,
        }
    }

    /// Label for the toggle control
    pub fn toggle_label(&self) -> &'static str {
        if self.is_favorite {
            "Remove Favorite"
        } else {
            "Add Favorite"
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    /// Status area text, `None` when results are showing
    pub status: Option<String>,
    pub is_error: bool,
    pub heading: String,
    pub results: Vec<Card>,
    pub favorites: Vec<Card>,
    /// Shown instead of favorite cards when there are none
    pub favorites_message: Option<&'static str>,
}

impl View {
    pub fn new(search: &SearchState, favorites: &[Movie]) -> Self {
        let status = match search.status() {
            SearchStatus::Loading => Some(LOADING_TEXT.to_string()),
            SearchStatus::Error => Some(format!("Error: {}", search.error_message())),
            SearchStatus::Empty => Some(EMPTY_RESULTS_TEXT.to_string()),
            SearchStatus::Idle | SearchStatus::Success => None,
        };

        let results = if search.status() == SearchStatus::Success {
            let favorite_ids: HashSet<&str> =
                favorites.iter().map(|m| m.imdb_id.as_str()).collect();
            search
                .items()
                .iter()
                .map(|m| Card::new(m, favorite_ids.contains(m.imdb_id.as_str())))
                .collect()
        } else {
            Vec::new()
        };

        let heading = if search.mode() == Mode::Search && !search.last_query().is_empty() {
            format!("Results for: \"{}\"", search.last_query())
        } else {
            POPULAR_HEADING.to_string()
        };

        let favorites_message = favorites.is_empty().then_some(EMPTY_FAVORITES_TEXT);

        Self {
            status,
            is_error: search.status() == SearchStatus::Error,
            heading,
            results,
            favorites: favorites.iter().map(|m| Card::new(m, true)).collect(),
            favorites_message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str) -> Movie {
        Movie::new(id, format!("Film {}", id), "2010", "N/A")
    }

    #[test]
    fn test_loading_view() {
        let mut search = SearchState::default();
        search.begin("alien");
        let view = View::new(&search, &[]);
        assert_eq!(view.status.as_deref(), Some(LOADING_TEXT));
        assert_eq!(view.heading, "Results for: \"alien\"");
        assert!(view.results.is_empty());
        assert_eq!(view.favorites_message, Some(EMPTY_FAVORITES_TEXT));
    }

    #[test]
    fn test_success_marks_favorites() {
        let mut search = SearchState::default();
        search.begin("");
        search.succeed(vec![movie("tt1"), movie("tt2")]);
        let favorites = vec![movie("tt2")];

        let view = View::new(&search, &favorites);
        assert_eq!(view.status, None);
        assert_eq!(view.heading, POPULAR_HEADING);
        assert!(!view.results[0].is_favorite);
        assert!(view.results[1].is_favorite);
        assert_eq!(view.results[1].toggle_label(), "Remove Favorite");
        assert_eq!(view.favorites.len(), 1);
        assert_eq!(view.favorites_message, None);
    }

    #[test]
    fn test_error_view() {
        let mut search = SearchState::default();
        search.begin("x");
        search.fail("Invalid base URL 'nope'");
        let view = View::new(&search, &[]);
        assert!(view.is_error);
        assert_eq!(view.status.as_deref(), Some("Error: Invalid base URL 'nope'"));
    }

    #[test]
    fn test_favorites_render_regardless_of_status() {
        let mut search = SearchState::default();
        search.begin("x");
        search.fail("down");
        let view = View::new(&search, &[movie("tt5")]);
        assert_eq!(view.favorites.len(), 1);
        assert!(view.favorites[0].is_favorite);
        assert!(!view.favorites[0].has_poster);
    }
}
