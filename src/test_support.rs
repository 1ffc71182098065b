//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use async_trait::async_trait;

use crate::api::{FetchError, Story, StorySource};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::core::storage::MemoryStore;

pub const TEST_ENDPOINT: &str = "http://stories.test/search?query=";

/// A source that answers every request the same way and records the URLs.
pub struct StaticSource {
    result: Option<Vec<Story>>,
    calls: Mutex<Vec<String>>,
}

impl StaticSource {
    pub fn ok(stories: Vec<Story>) -> Self {
        Self {
            result: Some(stories),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorySource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, url: &str) -> Result<Vec<Story>, FetchError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.result
            .clone()
            .ok_or_else(|| FetchError::Network("connection refused".to_string()))
    }
}

/// A story whose fields are all derived from its id.
pub fn story(id: &str) -> Story {
    Story {
        object_id: id.to_string(),
        title: format!("Story {id}"),
        url: format!("https://example.com/{id}"),
        author: "tester".to_string(),
        points: 1,
        num_comments: 0,
    }
}

/// Config pointing at a fake endpoint, with no storage file.
pub fn test_config() -> ResolvedConfig {
    ResolvedConfig {
        title: "Test Stories".to_string(),
        endpoint: TEST_ENDPOINT.to_string(),
        default_search_term: String::new(),
        discard_stale_responses: true,
        request_timeout: std::time::Duration::from_secs(1),
        storage_path: None,
        search_key: "search".to_string(),
    }
}

/// Creates a test App with an empty store.
pub fn test_app() -> App {
    App::new(&test_config(), &MemoryStore::new())
}
