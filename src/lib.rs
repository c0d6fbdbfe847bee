//! cinefav - terminal movie search with persistent favorites
//!
//! Type to search the OMDb catalog, star what you like, and find your
//! favorites again next time.
//!
//! # Modules
//!
//! - `models` - Movie and search state
//! - `api` - Search provider trait and the OMDb client
//! - `storage` - Durable key-value store
//! - `favorites` - Favorites list synchronized to storage
//! - `debounce` - Input debouncing
//! - `app` - Application state and key handling
//! - `controller` - Orchestrates searches, favorites and rendering
//! - `ui` - Display model and ratatui rendering
//! - `cli` / `commands` / `config` - Scriptable interface

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod debounce;
pub mod favorites;
pub mod models;
pub mod storage;
pub mod ui;

// Re-export commonly used types
pub use api::{OmdbClient, SearchProvider};
pub use app::{Action, App};
pub use controller::Controller;
pub use favorites::FavoritesStore;
pub use models::{Mode, Movie, SearchState, SearchStatus};
pub use storage::{FileStorage, MemoryStorage, Storage};
