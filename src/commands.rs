//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the appropriate backend services.
//! Each handler takes CLI args and Output, returns ExitCode.

use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::OmdbClient;
use crate::cli::{
    validate_imdb_id, Cli, ConfigCmd, ExitCode, FavoritesCmd, Output, PopularCmd, SearchCmd,
    ToggleCmd, ToggleResponse,
};
use crate::config::Config;
use crate::controller::Controller;
use crate::favorites::FavoritesStore;
use crate::models::{Movie, SearchStatus};
use crate::storage::{FileStorage, MemoryStorage, Storage};
use crate::ui::view::EMPTY_FAVORITES_TEXT;
use crate::ui::NoopRenderer;

/// Favorites store over whichever storage the flags select
pub type DynFavoritesStore = FavoritesStore<Box<dyn Storage + Send>>;

/// Resolved configuration shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub ephemeral: bool,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        let config_path = cli.config.clone().or_else(Config::path);
        let config = config_path
            .as_deref()
            .map(Config::load_from)
            .unwrap_or_default();
        Self {
            config,
            config_path,
            ephemeral: cli.ephemeral,
        }
    }

    pub fn client(&self) -> OmdbClient {
        OmdbClient::with_base_url(self.config.api_key(), self.config.base_url())
            .with_default_query(self.config.default_query())
    }

    /// Directory favorites are written to, `None` when kept in memory
    pub fn favorites_dir(&self) -> Option<PathBuf> {
        if self.ephemeral {
            return None;
        }
        self.config
            .favorites_dir
            .clone()
            .or_else(FileStorage::default_dir)
    }

    pub fn store(&self) -> DynFavoritesStore {
        let storage: Box<dyn Storage + Send> = match self.favorites_dir() {
            Some(dir) => Box::new(FileStorage::new(dir)),
            None => {
                if !self.ephemeral {
                    tracing::warn!("no data directory available, favorites will not persist");
                }
                Box::new(MemoryStorage::new())
            }
        };
        FavoritesStore::new(storage)
    }
}

fn movie_lines(movies: &[Movie]) -> Vec<String> {
    movies
        .iter()
        .enumerate()
        .map(|(i, m)| format!("{:>3}. {}", i + 1, m))
        .collect()
}

fn print_movies(movies: &[Movie], empty_msg: &str, output: &Output) -> ExitCode {
    if movies.is_empty() {
        output.note(empty_msg);
    }
    output.emit(&movies, movie_lines(movies))
}

// =============================================================================
// Search Commands
// =============================================================================

pub async fn search_cmd(cmd: SearchCmd, ctx: &Context, output: &Output) -> ExitCode {
    if cmd.query.trim().is_empty() {
        return output.fail("Search query must not be empty", ExitCode::InvalidArgs);
    }

    let client = ctx.client();
    let limit = cmd.limit.unwrap_or_else(|| ctx.config.result_limit());
    output.note(format!("Searching for: {}", cmd.query.trim()));

    match client.search(&cmd.query, limit).await {
        Ok(movies) => print_movies(&movies, "No movies found. Try another search.", output),
        Err(e) => output.fail(format!("Search failed: {}", e), ExitCode::NetworkError),
    }
}

pub async fn popular_cmd(cmd: PopularCmd, ctx: &Context, output: &Output) -> ExitCode {
    let client = ctx.client();
    let limit = cmd.limit.unwrap_or_else(|| ctx.config.result_limit());
    output.note(format!("Fetching popular movies ({})...", client.default_query()));

    match client.fetch_default(limit).await {
        Ok(movies) => print_movies(&movies, "No movies found.", output),
        Err(e) => output.fail(format!("Fetch failed: {}", e), ExitCode::NetworkError),
    }
}

// =============================================================================
// Favorites Commands
// =============================================================================

pub fn favorites_cmd(_cmd: FavoritesCmd, ctx: &Context, output: &Output) -> ExitCode {
    let favorites = ctx.store().load();
    print_movies(&favorites, EMPTY_FAVORITES_TEXT, output)
}

/// Run the same flow as the TUI: load, fetch (the query or the default
/// listing), then toggle the card by ID
pub async fn toggle_cmd(cmd: ToggleCmd, ctx: &Context, output: &Output) -> ExitCode {
    if let Err(e) = validate_imdb_id(&cmd.imdb_id) {
        return output.fail(e, ExitCode::InvalidArgs);
    }

    let mut controller = Controller::new(Arc::new(ctx.client()), ctx.store(), NoopRenderer)
        .with_limit(ctx.config.result_limit());

    match cmd.query.as_deref() {
        Some(query) => {
            output.note(format!("Searching for: {}", query.trim()));
            controller.load_favorites();
            controller.submit(query);
        }
        None => {
            controller.startup();
        }
    }
    controller.settle().await;

    let Some(title) = controller
        .app()
        .resolve_movie(&cmd.imdb_id)
        .map(|m| m.title.clone())
    else {
        let search = &controller.app().search;
        if search.status() == SearchStatus::Error {
            return output.fail(
                format!("Search failed: {}", search.error_message()),
                ExitCode::NetworkError,
            );
        }
        return output.fail(
            format!("{} not found in results or favorites", cmd.imdb_id),
            ExitCode::NotFound,
        );
    };

    controller.toggle_favorite(&cmd.imdb_id);
    let app = controller.app();
    let response = ToggleResponse {
        imdb_id: cmd.imdb_id.clone(),
        title,
        favorite: app.is_favorite(&cmd.imdb_id),
        total: app.favorites.len(),
    };

    let line = format!(
        "{} {} ({} favorites)",
        if response.favorite { "Added" } else { "Removed" },
        response.title,
        response.total
    );
    output.emit(&response, [line])
}

// =============================================================================
// Config Command
// =============================================================================

#[derive(Debug, Serialize)]
struct EffectiveConfig {
    config_path: Option<PathBuf>,
    base_url: String,
    default_query: String,
    result_limit: usize,
    debounce_ms: u64,
    favorites_dir: Option<PathBuf>,
}

impl EffectiveConfig {
    fn lines(&self) -> Vec<String> {
        let path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string())
        };
        vec![
            format!("config file    {}", path(&self.config_path)),
            format!("base url       {}", self.base_url),
            format!("default query  {}", self.default_query),
            format!("result limit   {}", self.result_limit),
            format!("debounce       {} ms", self.debounce_ms),
            format!("favorites dir  {}", path(&self.favorites_dir)),
        ]
    }
}

pub fn config_cmd(cmd: ConfigCmd, ctx: &Context, output: &Output) -> ExitCode {
    if cmd.init {
        let Some(path) = ctx.config_path.as_deref() else {
            return output.fail("Could not determine config path", ExitCode::Error);
        };
        if path.exists() {
            output.note(format!("Config already exists at {}", path.display()));
        } else {
            let mut config = ctx.config.clone();
            config.default_query = Some(ctx.config.default_query().to_string());
            config.result_limit = Some(ctx.config.result_limit());
            config.debounce_ms = Some(ctx.config.debounce().as_millis() as u64);
            if let Err(e) = config.save_to(path) {
                return output.fail(format!("Failed to write config: {}", e), ExitCode::Error);
            }
            output.note(format!("Wrote {}", path.display()));
        }
    }

    let effective = EffectiveConfig {
        config_path: ctx.config_path.clone(),
        base_url: ctx.config.base_url().to_string(),
        default_query: ctx.config.default_query().to_string(),
        result_limit: ctx.config.result_limit(),
        debounce_ms: ctx.config.debounce().as_millis() as u64,
        favorites_dir: ctx.favorites_dir(),
    };
    let lines = effective.lines();
    output.emit(&effective, lines)
}
