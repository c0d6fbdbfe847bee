//! CLI - Command Line Interface for cinefav
//!
//! Every interactive action is scriptable. All output is JSON-parseable
//! with `--json` (the default when stdout is not a terminal).
//!
//! # Examples
//!
//! ```bash
//! cinefav search "the batman" --json
//! cinefav popular --limit 10
//! cinefav toggle tt1877830 --query "the batman"
//! cinefav favorites
//! ```

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fmt::Display;
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::api::parse_limit;

// =============================================================================
// Exit Codes
// =============================================================================

/// Process exit status, stable for scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,
    Error = 1,
    InvalidArgs = 2,
    /// The movie API could not be reached or rejected the request
    NetworkError = 3,
    /// Requested movie is not among results or favorites
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

// =============================================================================
// Arguments
// =============================================================================

/// cinefav - search movies and keep a favorites list
///
/// Run without arguments for the interactive TUI.
#[derive(Parser, Debug)]
#[command(
    name = "cinefav",
    version,
    about = "Terminal movie search with persistent favorites",
    after_help = "EXAMPLES:\n\
                  cinefav                               Launch interactive TUI\n\
                  cinefav search \"blade runner\"         Search for movies\n\
                  cinefav toggle tt1856101 -Q runner    Add or remove a favorite\n\
                  cinefav favorites --json              List favorites"
)]
pub struct Cli {
    /// Print JSON (implied when stdout is not a terminal)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Only print results and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Read configuration from this file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Keep favorites in memory only (nothing is written to disk)
    #[arg(long, global = true)]
    pub ephemeral: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// A subcommand was given, so skip the TUI
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search for movies by title
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// List the default ("popular") movies
    #[command(visible_alias = "p")]
    Popular(PopularCmd),

    /// List saved favorites
    #[command(visible_alias = "fav")]
    Favorites(FavoritesCmd),

    /// Add a movie to favorites, or remove it if already there
    #[command(visible_alias = "t")]
    Toggle(ToggleCmd),

    /// Show the effective configuration
    Config(ConfigCmd),
}

#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Title or words to search for
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results, 1 to 1000 (defaults to config, then 20)
    #[arg(long, short = 'l', value_parser = parse_limit)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct PopularCmd {
    /// Maximum number of results, 1 to 1000 (defaults to config, then 20)
    #[arg(long, short = 'l', value_parser = parse_limit)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct FavoritesCmd {}

#[derive(Args, Debug)]
pub struct ToggleCmd {
    /// IMDb title ID, e.g. tt1877830
    #[arg(required = true)]
    pub imdb_id: String,

    /// Search to run first so the movie can be found (default listing otherwise)
    #[arg(long, short = 'Q')]
    pub query: Option<String>,
}

#[derive(Args, Debug)]
pub struct ConfigCmd {
    /// Write a config file with current values if none exists
    #[arg(long)]
    pub init: bool,
}

// =============================================================================
// Output
// =============================================================================

/// JSON shape of every command result
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Data { data: T },
    Failure { error: String, exit_code: i32 },
}

/// Result of a toggle
#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub imdb_id: String,
    pub title: String,
    pub favorite: bool,
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

/// Writes command results to stdout and diagnostics to stderr
#[derive(Debug, Clone, Copy)]
pub struct Output {
    pub format: Format,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            format: if cli.should_json() {
                Format::Json
            } else {
                Format::Text
            },
            quiet: cli.quiet,
        }
    }

    /// Write `data` as a JSON envelope, or `lines` in text mode
    pub fn emit<T, I>(&self, data: &T, lines: I) -> ExitCode
    where
        T: Serialize,
        I: IntoIterator<Item = String>,
    {
        match self.format {
            Format::Json => match serde_json::to_string_pretty(&Envelope::Data { data }) {
                Ok(json) => println!("{}", json),
                Err(e) => return self.fail(format!("Failed to serialize: {}", e), ExitCode::Error),
            },
            Format::Text => lines.into_iter().for_each(|line| println!("{}", line)),
        }
        ExitCode::Success
    }

    /// Report a failure and hand back its exit code
    pub fn fail(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let error = msg.into();
        match self.format {
            Format::Json => {
                let envelope = Envelope::<()>::Failure {
                    error,
                    exit_code: code.into(),
                };
                if let Ok(json) = serde_json::to_string_pretty(&envelope) {
                    eprintln!("{}", json);
                }
            }
            Format::Text if !self.quiet => eprintln!("Error: {}", error),
            Format::Text => {}
        }
        code
    }

    /// Progress note on stderr, text mode only
    pub fn note(&self, msg: impl Display) {
        if self.format == Format::Text && !self.quiet {
            eprintln!("{}", msg);
        }
    }
}

/// Check an IMDb title ID: `tt` followed by at least seven digits
pub fn validate_imdb_id(id: &str) -> Result<&str, String> {
    match id.strip_prefix("tt") {
        Some(digits) if digits.len() >= 7 && digits.bytes().all(|b| b.is_ascii_digit()) => Ok(id),
        _ => Err(format!(
            "'{}' is not an IMDb title ID (tt followed by 7+ digits)",
            id
        )),
    }
}
