//! Web search via the Google Custom Search JSON API.
//!
//! Uses reqwest for fetching and serde for response decoding. Results come
//! back in provider rank order and are never reordered.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this client
const USER_AGENT: &str = concat!("scout/", env!("CARGO_PKG_VERSION"));

/// Default timeout for HTTP requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Custom Search JSON API endpoint
const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("search request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("search API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },
}

/// A single ranked search result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Result title
    pub title: String,
    /// Result URL
    pub link: String,
    /// Short excerpt from the page
    pub snippet: String,
}

/// Response envelope from the Custom Search API.
///
/// The `items` field is absent entirely when a query matches nothing.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    title: String,
    link: String,
    snippet: Option<String>,
}

impl From<SearchItem> for SearchResult {
    fn from(item: SearchItem) -> Self {
        Self {
            title: item.title,
            link: item.link,
            snippet: item.snippet.unwrap_or_default(),
        }
    }
}

/// Anything that can turn a query into a ranked result list.
///
/// The interactive loop talks to this trait so tests can substitute a stub.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Performs a search and returns results in rank order.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError>;
}

/// Google Custom Search client
pub struct SearchClient {
    http: Client,
    api_key: String,
    engine_id: String,
    max_results: u8,
}

impl SearchClient {
    /// Create a client for the given API key and search engine id.
    ///
    /// `max_results` is clamped to the API's 1..=10 range.
    pub fn new(api_key: String, engine_id: String, max_results: u8) -> Result<Self, SearchError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_key,
            engine_id,
            max_results: max_results.clamp(1, 10),
        })
    }
}

#[async_trait]
impl SearchProvider for SearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, SearchError> {
        let num = self.max_results.to_string();
        let response = self
            .http
            .get(SEARCH_ENDPOINT)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: SearchResponse = response.json().await?;
        let results = envelope
            .items
            .unwrap_or_default()
            .into_iter()
            .map(SearchResult::from)
            .collect();

        Ok(results)
    }
}
