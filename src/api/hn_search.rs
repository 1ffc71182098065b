//! Hacker News search over the Algolia HTTP API.
//!
//! The query URL is built by the controller (`endpoint + term`), so this
//! source only issues the GET and decodes `{ "hits": [...] }`.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::source::{FetchError, StorySource};
use super::types::{SearchResponse, Story};

pub const DEFAULT_ENDPOINT: &str = "https://hn.algolia.com/api/v1/search?query=";

/// Story source backed by the HN search API (or anything speaking its format).
pub struct HnSearchClient {
    client: reqwest::Client,
}

impl HnSearchClient {
    /// Creates a client whose requests give up after `timeout`.
    ///
    /// Fails if the HTTP client cannot be built (e.g. no TLS backend).
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        debug!("HTTP client ready (timeout={:?})", timeout);
        Ok(Self { client })
    }
}

#[async_trait]
impl StorySource for HnSearchClient {
    fn name(&self) -> &str {
        "hn-search"
    }

    async fn fetch(&self, url: &str) -> Result<Vec<Story>, FetchError> {
        info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        debug!("Search response status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Search API error: {} - {}", status, message);
            return Err(FetchError::Api { status, message });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))?;

        info!("Search returned {} hits", parsed.hits.len());
        Ok(parsed.hits)
    }
}
