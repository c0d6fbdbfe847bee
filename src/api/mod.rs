//! API clients for external services
//!
//! - OMDb: paginated movie search

pub mod omdb;

pub use omdb::{OmdbClient, OmdbError};

use std::num::ParseIntError;

use anyhow::Result;
use async_trait::async_trait;

use crate::models::Movie;

/// Default result cap for a search
pub const DEFAULT_LIMIT: usize = 20;

/// Largest result cap. OMDb serves at most 100 pages of ten.
pub const MAX_LIMIT: usize = 1000;

/// Anything that can answer a movie search.
///
/// The controller only talks to this trait, so tests can script results
/// without a network.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search by free text, returning at most `limit` movies
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Movie>>;

    /// Results shown when there is no user query
    async fn fetch_default(&self, limit: usize) -> Result<Vec<Movie>>;
}

/// Parse a `--limit` value in `1..=MAX_LIMIT`
pub fn parse_limit(raw: &str) -> Result<usize, String> {
    let limit: usize = raw.parse().map_err(|e: ParseIntError| e.to_string())?;
    if (1..=MAX_LIMIT).contains(&limit) {
        Ok(limit)
    } else {
        Err(format!("must be between 1 and {}", MAX_LIMIT))
    }
}
