//! Application controller
//!
//! Owns the `App` state and drives every transition: startup, searches,
//! completions and favorite toggles. Each search runs as its own task and
//! reports back over a channel tagged with its request generation, so a
//! slow older search can never overwrite a newer one. Every transition
//! ends in a full render.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::KeyEvent;
use futures::FutureExt;
use tokio::sync::mpsc;

use crate::api::{SearchProvider, DEFAULT_LIMIT, MAX_LIMIT};
use crate::app::{Action, App};
use crate::debounce::Debouncer;
use crate::favorites::FavoritesStore;
use crate::models::Movie;
use crate::storage::Storage;
use crate::ui::Render;

/// A finished search task
#[derive(Debug)]
struct Completion {
    generation: u64,
    result: Result<Vec<Movie>, String>,
}

pub struct Controller<P, S, R> {
    app: App,
    provider: Arc<P>,
    store: FavoritesStore<S>,
    renderer: R,
    limit: usize,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
    in_flight: usize,
}

impl<P, S, R> Controller<P, S, R>
where
    P: SearchProvider + 'static,
    S: Storage,
    R: Render,
{
    pub fn new(provider: Arc<P>, store: FavoritesStore<S>, renderer: R) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            app: App::new(),
            provider,
            store,
            renderer,
            limit: DEFAULT_LIMIT,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Cap on results per search, at most `MAX_LIMIT`
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.min(MAX_LIMIT);
        self
    }

    /// Quiet period for typed input
    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.app.debouncer = Debouncer::new(window);
        self
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Number of searches still running
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn render(&mut self) {
        self.renderer.render(&self.app);
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Load favorites and start the default fetch
    pub fn startup(&mut self) -> u64 {
        self.load_favorites();
        self.submit("")
    }

    /// Replace the favorites panel with what the store holds
    pub fn load_favorites(&mut self) {
        let favorites = self.store.load();
        tracing::info!(count = favorites.len(), "loaded favorites");
        self.app.set_favorites(favorites);
    }

    /// Start a search for `raw` (trimmed). Empty input runs the default fetch.
    ///
    /// Returns the request generation.
    pub fn submit(&mut self, raw: &str) -> u64 {
        let query = raw.trim().to_string();
        let generation = self.app.begin_fetch(&query);
        self.render();

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        let limit = self.limit;

        tracing::debug!(generation, query = %query, "starting search");
        tokio::spawn(async move {
            let fetch = async {
                if query.is_empty() {
                    provider.fetch_default(limit).await
                } else {
                    provider.search(&query, limit).await
                }
            };

            let result = match AssertUnwindSafe(fetch).catch_unwind().await {
                Ok(Ok(movies)) => Ok(movies),
                Ok(Err(e)) => Err(e.to_string()),
                Err(_) => Err("search task panicked".to_string()),
            };

            // Receiver only goes away with the controller
            let _ = tx.send(Completion { generation, result });
        });

        self.in_flight += 1;
        generation
    }

    /// Release a debounced query if its quiet period has passed
    pub fn poll_debounce(&mut self) -> Option<u64> {
        let query = self.app.debouncer.poll()?;
        tracing::debug!(query = %query, "debounce fired");
        Some(self.submit(&query))
    }

    /// Apply every completion that is already available. Never blocks.
    pub fn poll(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Wait for the next completion. Returns false if nothing is running.
    pub async fn next_completion(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.rx.recv().await {
            Some(completion) => {
                self.apply(completion);
                true
            }
            None => false,
        }
    }

    /// Wait until every running search has completed
    pub async fn settle(&mut self) {
        while self.next_completion().await {}
    }

    fn apply(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self
            .app
            .finish_fetch(completion.generation, completion.result)
        {
            self.render();
        }
    }

    /// Toggle the favorite for a displayed card.
    ///
    /// Looks in the current results first, then favorites. Unknown IDs are
    /// ignored and return false.
    pub fn toggle_favorite(&mut self, imdb_id: &str) -> bool {
        let Some(movie) = self.app.resolve_movie(imdb_id).cloned() else {
            tracing::debug!(imdb_id, "toggle for unknown card ignored");
            return false;
        };

        let updated = self.store.toggle(&self.app.favorites, &movie);
        self.app.set_favorites(updated);
        self.render();
        true
    }

    /// Route a key press through the app and act on it
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        let action = self.app.handle_key(key);
        match &action {
            Action::Search(query) => {
                self.submit(query);
            }
            Action::ToggleFavorite(id) => {
                self.toggle_favorite(id);
            }
            Action::None => self.render(),
            Action::Quit => {}
        }
        action
    }
}
