//! # Stories State Machine
//!
//! The fetch-result state for the story list, and the pure reducer that is
//! the only way to change it.
//!
//! ```text
//!            FetchInit            FetchSuccess
//!   Idle ───────────────► Loading ────────────► Success
//!                           ▲  │                  │
//!                           │  │ FetchFailure     │ FetchInit
//!                           │  ▼                  │
//!                           └─ Failure ◄──────────┘ (and back)
//!
//!   Remove(story): filters `data` from any phase
//! ```
//!
//! `data` is only replaced on `FetchSuccess` and `Remove`; loading and
//! failure keep whatever the previous result was.

use crate::api::Story;

/// What has been fetched so far and whether a fetch is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoriesState {
    pub data: Vec<Story>,
    pub is_loading: bool,
    pub is_error: bool,
    /// Set once any fetch has completed, successful or not.
    pub has_fetched: bool,
}

/// Derived view of the flags, handy for status text and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Success,
    Failure,
}

/// Transitions of the stories state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoriesAction {
    FetchInit,
    FetchSuccess(Vec<Story>),
    FetchFailure,
    Remove(Story),
}

impl StoriesState {
    /// Returns the current phase.
    ///
    /// `Idle` means no fetch has completed yet. A fetch that returned zero
    /// hits is still a `Success`.
    pub fn phase(&self) -> Phase {
        match (self.is_loading, self.is_error) {
            (true, _) => Phase::Loading,
            (false, true) => Phase::Failure,
            (false, false) if self.has_fetched => Phase::Success,
            (false, false) => Phase::Idle,
        }
    }
}

/// Applies one action to the state and returns the new state.
pub fn reduce(state: StoriesState, action: StoriesAction) -> StoriesState {
    match action {
        StoriesAction::FetchInit => StoriesState {
            is_loading: true,
            is_error: false,
            ..state
        },
        StoriesAction::FetchSuccess(payload) => StoriesState {
            data: payload,
            is_loading: false,
            is_error: false,
            has_fetched: true,
        },
        StoriesAction::FetchFailure => StoriesState {
            is_loading: false,
            is_error: true,
            has_fetched: true,
            ..state
        },
        StoriesAction::Remove(item) => StoriesState {
            data: state
                .data
                .into_iter()
                .filter(|story| story.object_id != item.object_id)
                .collect(),
            ..state
        },
    }
}
