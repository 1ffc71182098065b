//! # Actions
//!
//! Everything that can happen to the search controller becomes an `Action`.
//! User types? That's `Action::SearchInput(text)`.
//! A fetch resolves? That's `Action::FetchSucceeded { .. }`.
//!
//! `update()` applies an action to the state and returns the `Effect` the
//! event loop has to carry out. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::api::Story;
use crate::core::coordinator::FetchRequest;
use crate::core::state::{App, derive_query_url};
use crate::core::stories::{StoriesAction, reduce};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The search input changed. Carries the full new text.
    SearchInput(String),
    /// The user asked to run the current search term.
    SearchSubmit,
    /// Drop a story from the fetched results.
    RemoveStory(Story),
    FetchSucceeded { generation: u64, stories: Vec<Story> },
    FetchFailed { generation: u64 },
    Quit,
}

/// Side effects requested by `update()`, performed by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Write the search term to the key-value store.
    PersistSearchTerm(String),
    /// Hand the request to the fetch coordinator.
    SpawnFetch(FetchRequest),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::SearchInput(text) => {
            if text == app.search_term {
                return Effect::None;
            }
            app.search_term = text.clone();
            Effect::PersistSearchTerm(text)
        }
        Action::SearchSubmit => {
            let url = derive_query_url(&app.endpoint, &app.search_term);
            let changed = url != app.query_url;
            app.query_url = url;
            // Same URL re-runs only as a manual retry after a failure
            if !changed && !app.stories.is_error {
                debug!("Query URL unchanged, not refetching");
                return Effect::None;
            }
            begin_fetch(app)
        }
        Action::RemoveStory(story) => {
            apply(app, StoriesAction::Remove(story));
            Effect::None
        }
        Action::FetchSucceeded {
            generation,
            stories,
        } => {
            if is_stale(app, generation) {
                return Effect::None;
            }
            apply(app, StoriesAction::FetchSuccess(stories));
            Effect::None
        }
        Action::FetchFailed { generation } => {
            if is_stale(app, generation) {
                return Effect::None;
            }
            apply(app, StoriesAction::FetchFailure);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Starts a fetch for the current query URL: `FetchInit` plus a new generation.
///
/// An empty URL starts nothing and leaves the state untouched.
pub fn begin_fetch(app: &mut App) -> Effect {
    if app.query_url.is_empty() {
        debug!("Empty query URL, no fetch issued");
        return Effect::None;
    }
    apply(app, StoriesAction::FetchInit);
    app.generation += 1;
    Effect::SpawnFetch(FetchRequest {
        url: app.query_url.clone(),
        generation: app.generation,
    })
}

fn apply(app: &mut App, action: StoriesAction) {
    let state = std::mem::take(&mut app.stories);
    app.stories = reduce(state, action);
}

fn is_stale(app: &App, generation: u64) -> bool {
    let stale = app.discard_stale_responses && generation != app.generation;
    if stale {
        debug!(
            "Dropping stale fetch result (generation {}, current {})",
            generation, app.generation
        );
    }
    stale
}
