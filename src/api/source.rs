use std::fmt;

use async_trait::async_trait;

use super::types::Story;

/// Errors that can occur while fetching stories.
///
/// The variants are kept for logging only. The state machine collapses all of
/// them into a single failure signal.
#[derive(Debug)]
pub enum FetchError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The server answered with a non-2xx status.
    Api { status: u16, message: String },
    /// The body was not a valid search response.
    Parse(String),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Network(msg) => write!(f, "network error: {msg}"),
            FetchError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            FetchError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Anything that can resolve a query URL into a list of stories.
#[async_trait]
pub trait StorySource: Send + Sync {
    /// Returns the name of the source.
    fn name(&self) -> &str;

    /// Performs a single GET against `url` and returns the result collection.
    async fn fetch(&self, url: &str) -> Result<Vec<Story>, FetchError>;
}
