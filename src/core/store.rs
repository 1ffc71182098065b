//! # Store
//!
//! Owns the `App` and tells subscribers when the visible state changes.
//! Adapters never mutate `App` directly: they call `dispatch()` and redraw
//! when their `watch::Receiver` reports a change.

use log::debug;
use tokio::sync::watch;

use crate::core::action::{Action, Effect, begin_fetch, update};
use crate::core::state::App;
use crate::core::stories::StoriesState;

/// Everything a renderer needs, detached from `App`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub search_term: String,
    pub query_url: String,
    pub stories: StoriesState,
}

pub struct Store {
    app: App,
    notifier: watch::Sender<Snapshot>,
}

impl Store {
    pub fn new(app: App) -> Self {
        let (notifier, _) = watch::channel(snapshot_of(&app));
        Self { app, notifier }
    }

    /// Kicks off the fetch for the seeded query URL, if there is one.
    pub fn start(&mut self) -> Effect {
        let effect = begin_fetch(&mut self.app);
        self.notify();
        effect
    }

    pub fn dispatch(&mut self, action: Action) -> Effect {
        debug!("Dispatch: {:?}", action);
        let effect = update(&mut self.app, action);
        self.notify();
        effect
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    /// Current snapshot.
    pub fn state(&self) -> Snapshot {
        self.notifier.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.notifier.subscribe()
    }

    fn notify(&self) {
        let next = snapshot_of(&self.app);
        self.notifier.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}

fn snapshot_of(app: &App) -> Snapshot {
    Snapshot {
        search_term: app.search_term.clone(),
        query_url: app.query_url.clone(),
        stories: app.stories.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinator::FetchRequest;
    use crate::core::storage::MemoryStore;
    use crate::test_support::{TEST_ENDPOINT, story, test_app, test_config};

    #[test]
    fn test_start_without_term_does_nothing() {
        let mut store = Store::new(test_app());
        let rx = store.subscribe();
        assert_eq!(store.start(), Effect::None);
        assert!(!rx.has_changed().unwrap());
        assert!(!store.state().stories.is_loading);
    }

    #[test]
    fn test_start_with_seeded_term_fetches() {
        let kv = MemoryStore::with_entry("search", "react");
        let mut store = Store::new(App::new(&test_config(), &kv));
        let rx = store.subscribe();

        let effect = store.start();
        assert_eq!(
            effect,
            Effect::SpawnFetch(FetchRequest {
                url: format!("{TEST_ENDPOINT}react"),
                generation: 1,
            })
        );
        assert!(rx.has_changed().unwrap());
        assert!(store.state().stories.is_loading);
    }

    #[test]
    fn test_dispatch_notifies_subscribers() {
        let mut store = Store::new(test_app());
        let mut rx = store.subscribe();

        store.dispatch(Action::SearchInput("rust".to_string()));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().search_term, "rust");

        store.dispatch(Action::SearchSubmit);
        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert!(snapshot.stories.is_loading);
        assert_eq!(snapshot.query_url, format!("{TEST_ENDPOINT}rust"));
    }

    #[test]
    fn test_no_notification_without_visible_change() {
        let mut store = Store::new(test_app());
        let rx = store.subscribe();

        // Removing from an empty list changes nothing
        store.dispatch(Action::RemoveStory(story("1")));
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_full_scenario_through_store() {
        let mut store = Store::new(test_app());
        store.dispatch(Action::SearchInput("rust".to_string()));
        store.dispatch(Action::SearchSubmit);
        store.dispatch(Action::FetchSucceeded {
            generation: 1,
            stories: vec![story("1"), story("2")],
        });
        store.dispatch(Action::RemoveStory(story("1")));

        let state = store.state();
        assert_eq!(state.stories.data, vec![story("2")]);
        assert!(!state.stories.is_loading);
        assert!(!state.stories.is_error);
        assert_eq!(store.app().generation, 1);
    }
}
