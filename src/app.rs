//! App state and keyboard handling
//!
//! `App` is the single state object the controller owns: the result grid,
//! favorites, the search box, focus/selection and the request generation
//! used to drop stale search completions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::debounce::Debouncer;
use crate::models::{Movie, SearchState};

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

/// Which grid the selection cursor lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Results,
    Favorites,
}

/// What the controller should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond a redraw
    None,
    /// Run a search right away (empty means the default fetch)
    Search(String),
    /// Toggle the favorite with this external ID
    ToggleFavorite(String),
    Quit,
}

// =============================================================================
// Selection
// =============================================================================

/// Cursor into one of the card grids, clamped to its length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    index: usize,
    len: usize,
}

impl Selection {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// Selected index, `None` for an empty grid
    pub fn index(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1).min(self.len.saturating_sub(1));
    }

    pub fn home(&mut self) {
        self.index = 0;
    }

    pub fn end(&mut self) {
        self.index = self.len.saturating_sub(1);
    }

    /// Track a new grid length, keeping the cursor in range
    pub fn resize(&mut self, len: usize) {
        self.len = len;
        self.index = self.index.min(len.saturating_sub(1));
    }
}

// =============================================================================
// Search Box
// =============================================================================

/// Text in the search box with a caret kept on a char boundary
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    text: String,
    caret: usize,
}

impl SearchInput {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.caret, c);
        self.caret += c.len_utf8();
    }

    /// Remove the char before the caret. Returns false at the start.
    pub fn backspace(&mut self) -> bool {
        match self.text[..self.caret].chars().next_back() {
            Some(c) => {
                self.caret -= c.len_utf8();
                self.text.remove(self.caret);
                true
            }
            None => false,
        }
    }

    /// Remove the char under the caret. Returns false at the end.
    pub fn delete(&mut self) -> bool {
        if self.caret < self.text.len() {
            self.text.remove(self.caret);
            true
        } else {
            false
        }
    }

    pub fn left(&mut self) {
        if let Some(c) = self.text[..self.caret].chars().next_back() {
            self.caret -= c.len_utf8();
        }
    }

    pub fn right(&mut self) {
        if let Some(c) = self.text[self.caret..].chars().next() {
            self.caret += c.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.caret = 0;
    }

    pub fn end(&mut self) {
        self.caret = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.caret = 0;
    }

    /// Text before and after the caret
    pub fn split(&self) -> (&str, &str) {
        self.text.split_at(self.caret)
    }
}

// =============================================================================
// Main Application State
// =============================================================================

#[derive(Debug)]
pub struct App {
    pub search: SearchState,
    pub favorites: Vec<Movie>,
    pub input: SearchInput,
    pub input_mode: InputMode,
    pub focus: Focus,
    pub results_selection: Selection,
    pub favorites_selection: Selection,
    /// Pending debounced query
    pub debouncer: Debouncer<String>,
    pub running: bool,
    generation: u64,
}

impl Default for App {
    fn default() -> Self {
        Self::with_debouncer(Debouncer::default())
    }
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debouncer(debouncer: Debouncer<String>) -> Self {
        Self {
            search: SearchState::default(),
            favorites: Vec::new(),
            input: SearchInput::default(),
            input_mode: InputMode::Normal,
            focus: Focus::Results,
            results_selection: Selection::default(),
            favorites_selection: Selection::default(),
            debouncer,
            running: true,
            generation: 0,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    // -------------------------------------------------------------------------
    // Fetch Lifecycle
    // -------------------------------------------------------------------------

    /// Enter `Loading` for `query` and return the new request generation
    pub fn begin_fetch(&mut self, query: &str) -> u64 {
        self.generation += 1;
        self.search.begin(query);
        self.results_selection = Selection::default();
        self.generation
    }

    /// Apply a finished fetch. Returns false if a newer fetch superseded it.
    pub fn finish_fetch(&mut self, generation: u64, result: Result<Vec<Movie>, String>) -> bool {
        if generation != self.generation {
            tracing::debug!(
                generation,
                latest = self.generation,
                "dropping stale search result"
            );
            return false;
        }

        match result {
            Ok(items) => self.search.succeed(items),
            Err(message) => self.search.fail(message),
        }
        self.results_selection.resize(self.search.items().len());
        true
    }

    // -------------------------------------------------------------------------
    // Favorites
    // -------------------------------------------------------------------------

    pub fn set_favorites(&mut self, favorites: Vec<Movie>) {
        self.favorites_selection.resize(favorites.len());
        self.favorites = favorites;
    }

    pub fn is_favorite(&self, imdb_id: &str) -> bool {
        crate::favorites::contains(&self.favorites, imdb_id)
    }

    /// Find a movie by ID: displayed results first, then favorites
    pub fn resolve_movie(&self, imdb_id: &str) -> Option<&Movie> {
        self.search
            .find(imdb_id)
            .or_else(|| self.favorites.iter().find(|m| m.imdb_id == imdb_id))
    }

    /// The card under the cursor in the focused grid
    pub fn selected_movie(&self) -> Option<&Movie> {
        match self.focus {
            Focus::Results => self.search.items().get(self.results_selection.index()?),
            Focus::Favorites => self.favorites.get(self.favorites_selection.index()?),
        }
    }

    fn focused_selection(&mut self) -> &mut Selection {
        match self.focus {
            Focus::Results => &mut self.results_selection,
            Focus::Favorites => &mut self.favorites_selection,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Results => Focus::Favorites,
            Focus::Favorites => Focus::Results,
        };
    }

    /// Focus the search box
    pub fn focus_search(&mut self) {
        self.input_mode = InputMode::Editing;
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle a key press and report what the controller should do
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Editing => self.handle_editing_key(key.code),
            InputMode::Normal => self.handle_normal_key(key.code),
        }
    }

    fn handle_editing_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                // Submitting skips the quiet period
                self.input_mode = InputMode::Normal;
                self.debouncer.cancel();
                return Action::Search(self.input.text().trim().to_string());
            }
            code => {
                if self.edit_input(code) {
                    self.debouncer.call(self.input.text().trim().to_string());
                }
            }
        }
        Action::None
    }

    /// Apply an editing key to the search box. True if the text changed.
    fn edit_input(&mut self, code: KeyCode) -> bool {
        let input = &mut self.input;
        match code {
            KeyCode::Char(c) => {
                input.insert(c);
                return true;
            }
            KeyCode::Backspace => return input.backspace(),
            KeyCode::Delete => return input.delete(),
            KeyCode::Left => input.left(),
            KeyCode::Right => input.right(),
            KeyCode::Home => input.home(),
            KeyCode::End => input.end(),
            _ => {}
        }
        false
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> Action {
        let movement: Option<fn(&mut Selection)> = match code {
            KeyCode::Up | KeyCode::Char('k') => Some(Selection::prev),
            KeyCode::Down | KeyCode::Char('j') => Some(Selection::next),
            KeyCode::Home | KeyCode::Char('g') => Some(Selection::home),
            KeyCode::End | KeyCode::Char('G') => Some(Selection::end),
            _ => None,
        };
        if let Some(step) = movement {
            step(self.focused_selection());
            return Action::None;
        }

        match code {
            KeyCode::Char('q') => {
                self.quit();
                Action::Quit
            }
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.focus_search();
                Action::None
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_focus();
                Action::None
            }
            KeyCode::Char('f') | KeyCode::Char(' ') | KeyCode::Enter => self
                .selected_movie()
                .map(|m| Action::ToggleFavorite(m.imdb_id.clone()))
                .unwrap_or(Action::None),
            KeyCode::Char('r') => Action::Search(self.search.last_query().to_string()),
            // Clearing the box goes back to the default listing
            KeyCode::Esc if !self.input.is_empty() => {
                self.input.clear();
                Action::Search(String::new())
            }
            _ => Action::None,
        }
    }
}
