//! # Application State
//!
//! Core business state. No TUI-specific types live here; presentation state
//! belongs to the `tui` module.
//!
//! ```text
//! App
//! ├── title: String                 // from config
//! ├── endpoint: String              // from config, prefix of every query URL
//! ├── search_key: String            // storage key of the last search term
//! ├── search_term: String           // follows every keystroke
//! ├── query_url: String             // only moves on submission
//! ├── stories: StoriesState         // fetch-result state machine
//! ├── generation: u64               // bumped once per issued fetch
//! └── discard_stale_responses: bool
//! ```
//!
//! State changes only happen through `update(app, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::core::storage::KeyValueStore;
use crate::core::stories::StoriesState;

pub struct App {
    pub title: String,
    pub endpoint: String,
    pub search_key: String,
    pub search_term: String,
    pub query_url: String,
    pub stories: StoriesState,
    /// Generation of the most recently issued fetch. Zero means none yet.
    pub generation: u64,
    pub discard_stale_responses: bool,
}

impl App {
    /// Builds the initial state, seeding the search term from `store`.
    ///
    /// The stored value wins over the configured default, even when it is an
    /// empty string. The query URL is derived from the seeded term so the
    /// first fetch can run without a submission.
    pub fn new(config: &ResolvedConfig, store: &dyn KeyValueStore) -> Self {
        let search_term = store
            .get(&config.search_key)
            .unwrap_or_else(|| config.default_search_term.clone());
        let query_url = derive_query_url(&config.endpoint, &search_term);
        Self {
            title: config.title.clone(),
            endpoint: config.endpoint.clone(),
            search_key: config.search_key.clone(),
            search_term,
            query_url,
            stories: StoriesState::default(),
            generation: 0,
            discard_stale_responses: config.discard_stale_responses,
        }
    }
}

/// `endpoint + url-encoded term`, or an empty string for an empty term.
pub fn derive_query_url(endpoint: &str, term: &str) -> String {
    if term.is_empty() {
        return String::new();
    }
    format!("{}{}", endpoint, urlencoding::encode(term))
}
