//! OMDb (Open Movie Database) API client
//!
//! Search results come back ten per page. A search for N results issues
//! every page request it needs at once and merges them in page order.
//! API docs: https://www.omdbapi.com/

use anyhow::Result;
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use super::{SearchProvider, MAX_LIMIT};
use crate::models::Movie;

/// Results per page returned by the search endpoint
pub const PAGE_SIZE: usize = 10;

/// Query used when there is no user input (OMDb has no "popular" endpoint)
pub const DEFAULT_QUERY: &str = "Action";

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb API error types
#[derive(Error, Debug)]
pub enum OmdbError {
    /// `"Response": "False"` in an otherwise successful reply
    #[error("{0}")]
    NotFound(String),

    #[error("HTTP error! Status: {0}")]
    Http(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// OMDb API client
pub struct OmdbClient {
    api_key: String,
    base_url: String,
    default_query: String,
    client: reqwest::Client,
}

impl OmdbClient {
    /// Create a new OMDb client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            default_query: DEFAULT_QUERY.to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Override the term used by `fetch_default`
    pub fn with_default_query(mut self, query: impl Into<String>) -> Self {
        self.default_query = query.into();
        self
    }

    pub fn default_query(&self) -> &str {
        &self.default_query
    }

    /// Search for movies, merging as many pages as `limit` needs.
    ///
    /// A page that fails is logged and counts as empty; only a bad base
    /// URL fails the whole call. `limit` is capped at `MAX_LIMIT`.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<Movie>> {
        let query = query.trim();
        let limit = limit.min(MAX_LIMIT);
        if query.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let base = Url::parse(&self.base_url)
            .map_err(|_| OmdbError::InvalidBaseUrl(self.base_url.clone()))?;

        let pages = limit.div_ceil(PAGE_SIZE);
        let requests = (1..=pages).map(|page| {
            let url = self.page_url(&base, query, page);
            async move {
                match self.fetch_page(url).await {
                    Ok(movies) => movies,
                    Err(e) => {
                        tracing::warn!(query, page, error = %e, "search page failed");
                        Vec::new()
                    }
                }
            }
        });

        let mut movies: Vec<Movie> = join_all(requests).await.into_iter().flatten().collect();
        movies.truncate(limit);

        tracing::info!(query, pages, results = movies.len(), "search finished");
        Ok(movies)
    }

    /// Search using the default query
    pub async fn fetch_default(&self, limit: usize) -> Result<Vec<Movie>> {
        self.search(&self.default_query, limit).await
    }

    fn page_url(&self, base: &Url, query: &str, page: usize) -> Url {
        let mut url = base.clone();
        url.set_query(Some(&format!(
            "apikey={}&s={}&type=movie&page={}",
            urlencoding::encode(&self.api_key),
            urlencoding::encode(query),
            page
        )));
        url
    }

    /// Fetch and decode a single search page
    async fn fetch_page(&self, url: Url) -> Result<Vec<Movie>, OmdbError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OmdbError::Http(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: SearchResponse = serde_json::from_str(&body)
            .map_err(|e| OmdbError::InvalidResponse(format!("JSON parse error: {}", e)))?;
        parsed.into_movies()
    }
}

#[async_trait]
impl SearchProvider for OmdbClient {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<Movie>> {
        OmdbClient::search(self, query, limit).await
    }

    async fn fetch_default(&self, limit: usize) -> Result<Vec<Movie>> {
        OmdbClient::fetch_default(self, limit).await
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<Movie>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

impl SearchResponse {
    fn into_movies(self) -> Result<Vec<Movie>, OmdbError> {
        if self.response.eq_ignore_ascii_case("false") {
            return Err(OmdbError::NotFound(
                self.error
                    .unwrap_or_else(|| "API returned an error.".to_string()),
            ));
        }
        Ok(self.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url_encodes_query() {
        let client = OmdbClient::with_base_url("k3y", "http://localhost:1234/");
        let base = Url::parse("http://localhost:1234/").unwrap();
        let url = client.page_url(&base, "the dark knight", 2);
        assert_eq!(
            url.as_str(),
            "http://localhost:1234/?apikey=k3y&s=the%20dark%20knight&type=movie&page=2"
        );
    }

    #[test]
    fn test_response_false_is_not_found() {
        let raw: SearchResponse =
            serde_json::from_str(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap();
        match raw.into_movies() {
            Err(OmdbError::NotFound(msg)) => assert_eq!(msg, "Movie not found!"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_response_true_yields_movies() {
        let raw: SearchResponse = serde_json::from_str(
            r#"{"Search":[{"Title":"Heat","Year":"1995","imdbID":"tt0113277","Type":"movie","Poster":"N/A"}],"totalResults":"1","Response":"True"}"#,
        )
        .unwrap();
        let movies = raw.into_movies().unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].imdb_id, "tt0113277");
    }

    #[tokio::test]
    async fn test_empty_query_skips_network() {
        // Unroutable base URL: any request would fail loudly
        let client = OmdbClient::with_base_url("k", "not a url");
        assert!(client.search("", 20).await.unwrap().is_empty());
        assert!(client.search("   ", 20).await.unwrap().is_empty());
        assert!(client.search("batman", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_base_url_fails_whole_search() {
        let client = OmdbClient::with_base_url("k", "not a url");
        let err = client.search("batman", 20).await.unwrap_err();
        assert!(err.to_string().contains("Invalid base URL"));
    }
}
