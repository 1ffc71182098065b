//! # Fetch Coordinator
//!
//! Turns a `FetchRequest` into exactly one request/response cycle and posts
//! the outcome back to the event loop as an `Action`.
//!
//! `FetchInit` is applied by `update()` before the request is handed over, so
//! the loop thread stays the only writer of state. Every failure kind
//! collapses into `Action::FetchFailed`; the detail only reaches the log.
//!
//! In-flight requests are never cancelled when a newer one starts. Late
//! completions are tagged with their generation and filtered in `update()`.

use std::sync::Arc;

use log::{info, warn};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::AbortHandle;

use crate::api::StorySource;
use crate::core::action::Action;

/// One fetch to perform, tagged with the generation that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub url: String,
    pub generation: u64,
}

pub struct FetchCoordinator {
    source: Arc<dyn StorySource>,
    sender: UnboundedSender<Action>,
}

impl FetchCoordinator {
    pub fn new(source: Arc<dyn StorySource>, sender: UnboundedSender<Action>) -> Self {
        Self { source, sender }
    }

    /// Spawns the fetch on the tokio runtime.
    ///
    /// Returns None without touching the network when the URL is empty.
    pub fn spawn(&self, request: FetchRequest) -> Option<AbortHandle> {
        if request.url.is_empty() {
            info!("Skipping fetch for empty query URL");
            return None;
        }

        info!(
            "Spawning fetch via {} (generation={})",
            self.source.name(),
            request.generation
        );
        let source = self.source.clone();
        let sender = self.sender.clone();
        let handle = tokio::spawn(async move {
            let action = fetch_stories(source.as_ref(), request).await;
            if sender.send(action).is_err() {
                warn!("Failed to deliver fetch result: receiver dropped");
            }
        });
        Some(handle.abort_handle())
    }
}

/// Performs the request and maps the outcome to the action to dispatch.
pub async fn fetch_stories(source: &dyn StorySource, request: FetchRequest) -> Action {
    let FetchRequest { url, generation } = request;
    match source.fetch(&url).await {
        Ok(stories) => {
            info!(
                "Fetch succeeded: {} stories (generation={})",
                stories.len(),
                generation
            );
            Action::FetchSucceeded {
                generation,
                stories,
            }
        }
        Err(e) => {
            warn!("Fetch failed (generation={}): {}", generation, e);
            Action::FetchFailed { generation }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StaticSource, story};
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_fetch_stories_success() {
        let source = StaticSource::ok(vec![story("1"), story("2")]);
        let action = fetch_stories(
            &source,
            FetchRequest {
                url: "http://x/search?query=a".to_string(),
                generation: 3,
            },
        )
        .await;
        assert_eq!(
            action,
            Action::FetchSucceeded {
                generation: 3,
                stories: vec![story("1"), story("2")],
            }
        );
        assert_eq!(source.calls(), vec!["http://x/search?query=a".to_string()]);
    }

    #[tokio::test]
    async fn test_fetch_stories_failure_collapses() {
        let source = StaticSource::failing();
        let action = fetch_stories(
            &source,
            FetchRequest {
                url: "http://x/search?query=a".to_string(),
                generation: 1,
            },
        )
        .await;
        assert_eq!(action, Action::FetchFailed { generation: 1 });
    }

    #[tokio::test]
    async fn test_spawn_empty_url_issues_no_request() {
        let source = Arc::new(StaticSource::ok(vec![story("1")]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let coordinator = FetchCoordinator::new(source.clone(), tx);

        let handle = coordinator.spawn(FetchRequest {
            url: String::new(),
            generation: 1,
        });

        assert!(handle.is_none());
        assert!(source.calls().is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_spawn_posts_result_back() {
        let source = Arc::new(StaticSource::ok(vec![story("9")]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let coordinator = FetchCoordinator::new(source, tx);

        let handle = coordinator.spawn(FetchRequest {
            url: "http://x/search?query=b".to_string(),
            generation: 7,
        });
        assert!(handle.is_some());

        let action = rx.recv().await.unwrap();
        assert_eq!(
            action,
            Action::FetchSucceeded {
                generation: 7,
                stories: vec![story("9")],
            }
        );
    }
}
