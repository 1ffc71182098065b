//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI, and
//! translates keyboard events into `core::action::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Loop
//!
//! Each iteration redraws if the store notified a change (or an input event
//! arrived), waits briefly for terminal input, dispatches what it got, then
//! drains fetch results posted by the coordinator. Effects returned by
//! `dispatch()` are carried out here: persisting the search term and
//! spawning fetches.
//!
//! Enter in the search box only ever submits the search. There is no
//! navigation or other default action attached to it.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::api::{HnSearchClient, Story, StorySource};
use crate::core::action::{Action, Effect};
use crate::core::config::ResolvedConfig;
use crate::core::coordinator::FetchCoordinator;
use crate::core::state::App;
use crate::core::storage::KeyValueStore;
use crate::core::store::Store;
use crate::tui::component::EventHandler;
use crate::tui::components::{ListEvent, SearchBox, SearchEvent, StoryListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Modal input mode: determines how keyboard events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Typing goes to the search box.
    Search,
    /// Arrow keys move through the stories, `d` removes.
    Browse,
}

impl InputMode {
    fn hint(self) -> &'static str {
        match self {
            InputMode::Search => "Enter: search · Tab: browse · Ctrl+C: quit",
            InputMode::Browse => "↑/↓: select · d: remove · Tab: search · q: quit",
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_box: SearchBox,
    pub story_list: StoryListState,
    pub mode: InputMode,
}

impl TuiState {
    pub fn new(search_term: &str) -> Self {
        Self {
            search_box: SearchBox::new(search_term),
            story_list: StoryListState::new(),
            mode: InputMode::Search, // User expects to type immediately
        }
    }

    fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        self.search_box.focused = mode == InputMode::Search;
    }

    /// Routes one terminal event. Returns the action to dispatch, if any.
    fn handle_event(&mut self, event: &TuiEvent, stories: &[Story]) -> Option<Action> {
        match event {
            TuiEvent::ForceQuit => return Some(Action::Quit),
            TuiEvent::Resize => return None,
            TuiEvent::ToggleMode => {
                let next = match self.mode {
                    InputMode::Search => InputMode::Browse,
                    InputMode::Browse => InputMode::Search,
                };
                self.set_mode(next);
                return None;
            }
            _ => {}
        }

        match self.mode {
            InputMode::Search => {
                if *event == TuiEvent::Escape {
                    self.set_mode(InputMode::Browse);
                    return None;
                }
                match self.search_box.handle_event(event)? {
                    SearchEvent::Input(text) => Some(Action::SearchInput(text)),
                    SearchEvent::Submit => Some(Action::SearchSubmit),
                }
            }
            InputMode::Browse => match event {
                TuiEvent::InputChar('q') => Some(Action::Quit),
                TuiEvent::InputChar('/') | TuiEvent::Submit => {
                    self.set_mode(InputMode::Search);
                    None
                }
                _ => match self.story_list.handle_event(event)? {
                    ListEvent::Remove(idx) => stories.get(idx).cloned().map(Action::RemoveStory),
                },
            },
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, SetCursorStyle::DefaultUserShape);
    }
}

/// Carries out side effects requested by the store.
struct EffectRunner<'a> {
    coordinator: FetchCoordinator,
    storage: &'a mut dyn KeyValueStore,
    search_key: String,
    in_flight: Vec<AbortHandle>,
}

impl EffectRunner<'_> {
    /// Returns true when the loop should stop.
    fn run(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::PersistSearchTerm(term) => {
                if let Err(e) = self.storage.set(&self.search_key, &term) {
                    warn!("Failed to persist search term: {}", e);
                }
            }
            Effect::SpawnFetch(request) => {
                self.in_flight.retain(|h| !h.is_finished());
                if let Some(handle) = self.coordinator.spawn(request) {
                    self.in_flight.push(handle);
                }
            }
            Effect::Quit => return true,
        }
        false
    }
}

impl Drop for EffectRunner<'_> {
    fn drop(&mut self) {
        for handle in self.in_flight.drain(..) {
            handle.abort();
        }
    }
}

pub fn run(config: ResolvedConfig, storage: &mut dyn KeyValueStore) -> std::io::Result<()> {
    let client = HnSearchClient::new(config.request_timeout).map_err(std::io::Error::other)?;
    let source: Arc<dyn StorySource> = Arc::new(client);
    let mut store = Store::new(App::new(&config, storage));
    let mut snapshots = store.subscribe();
    let mut tui = TuiState::new(&store.state().search_term);

    // Channel for fetch results from background tasks
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut effects = EffectRunner {
        coordinator: FetchCoordinator::new(source, tx),
        storage,
        search_key: config.search_key.clone(),
        in_flight: Vec::new(),
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut should_quit = effects.run(store.start());
    let mut needs_redraw = true; // Force first frame

    while !should_quit {
        if snapshots.has_changed().unwrap_or(false) {
            needs_redraw = true;
        }

        if needs_redraw {
            let snapshot = snapshots.borrow_and_update().clone();
            tui.story_list.sync(snapshot.stories.data.len());
            terminal.draw(|f| ui::draw_ui(f, &config.title, &snapshot, &mut tui))?;
            needs_redraw = false;
        }

        // Poll faster while a fetch is outstanding so results show promptly
        let timeout = if store.app().stories.is_loading {
            Duration::from_millis(50)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            let stories = &store.app().stories.data;
            tui.story_list.sync(stories.len());
            if let Some(action) = tui.handle_event(&event, stories) {
                if effects.run(store.dispatch(action)) {
                    should_quit = true;
                    break;
                }
            }
        }

        // Fetch results from the coordinator
        while let Ok(action) = rx.try_recv() {
            debug!("Event loop received: {:?}", action);
            if effects.run(store.dispatch(action)) {
                should_quit = true;
            }
        }
    }

    drop(effects);
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::coordinator::FetchRequest;
    use crate::core::storage::MemoryStore;
    use crate::test_support::{StaticSource, TEST_ENDPOINT, story};

    fn type_text(tui: &mut TuiState, text: &str) -> Vec<Action> {
        text.chars()
            .filter_map(|c| tui.handle_event(&TuiEvent::InputChar(c), &[]))
            .collect()
    }

    #[test]
    fn test_typing_produces_search_input() {
        let mut tui = TuiState::new("");
        let actions = type_text(&mut tui, "go");
        assert_eq!(
            actions,
            vec![
                Action::SearchInput("g".to_string()),
                Action::SearchInput("go".to_string()),
            ]
        );
        assert_eq!(
            tui.handle_event(&TuiEvent::Submit, &[]),
            Some(Action::SearchSubmit)
        );
    }

    #[test]
    fn test_ctrl_c_quits_in_any_mode() {
        let mut tui = TuiState::new("");
        assert_eq!(tui.handle_event(&TuiEvent::ForceQuit, &[]), Some(Action::Quit));
        tui.set_mode(InputMode::Browse);
        assert_eq!(tui.handle_event(&TuiEvent::ForceQuit, &[]), Some(Action::Quit));
    }

    #[test]
    fn test_q_types_in_search_but_quits_in_browse() {
        let mut tui = TuiState::new("");
        assert_eq!(
            tui.handle_event(&TuiEvent::InputChar('q'), &[]),
            Some(Action::SearchInput("q".to_string()))
        );
        tui.handle_event(&TuiEvent::Escape, &[]);
        assert_eq!(tui.mode, InputMode::Browse);
        assert_eq!(tui.handle_event(&TuiEvent::InputChar('q'), &[]), Some(Action::Quit));
    }

    #[test]
    fn test_browse_remove_maps_index_to_story() {
        let stories = vec![story("1"), story("2"), story("3")];
        let mut tui = TuiState::new("");
        tui.handle_event(&TuiEvent::ToggleMode, &stories);
        tui.story_list.sync(stories.len());

        tui.handle_event(&TuiEvent::CursorDown, &stories);
        assert_eq!(
            tui.handle_event(&TuiEvent::InputChar('d'), &stories),
            Some(Action::RemoveStory(story("2")))
        );
    }

    #[test]
    fn test_toggle_mode_switches_focus() {
        let mut tui = TuiState::new("");
        assert!(tui.search_box.focused);
        tui.handle_event(&TuiEvent::ToggleMode, &[]);
        assert_eq!(tui.mode, InputMode::Browse);
        assert!(!tui.search_box.focused);
        tui.handle_event(&TuiEvent::ToggleMode, &[]);
        assert_eq!(tui.mode, InputMode::Search);
        assert!(tui.search_box.focused);
    }

    struct PendingSource;

    #[async_trait::async_trait]
    impl StorySource for PendingSource {
        fn name(&self) -> &str {
            "pending"
        }

        async fn fetch(&self, _url: &str) -> Result<Vec<Story>, crate::api::FetchError> {
            std::future::pending().await
        }
    }

    fn runner<'a>(
        source: Arc<dyn StorySource>,
        storage: &'a mut dyn KeyValueStore,
    ) -> (EffectRunner<'a>, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = EffectRunner {
            coordinator: FetchCoordinator::new(source, tx),
            storage,
            search_key: "search".to_string(),
            in_flight: Vec::new(),
        };
        (runner, rx)
    }

    fn request(url: &str, generation: u64) -> FetchRequest {
        FetchRequest {
            url: url.to_string(),
            generation,
        }
    }

    #[tokio::test]
    async fn test_persist_effect_writes_search_term() {
        let mut storage = MemoryStore::new();
        {
            let (mut effects, _rx) = runner(Arc::new(StaticSource::ok(vec![])), &mut storage);
            assert!(!effects.run(Effect::PersistSearchTerm("rust".to_string())));
        }
        assert_eq!(storage.get("search"), Some("rust".to_string()));
    }

    #[tokio::test]
    async fn test_spawn_effect_with_empty_url_tracks_nothing() {
        let source = Arc::new(StaticSource::ok(vec![story("1")]));
        let mut storage = MemoryStore::new();
        let (mut effects, _rx) = runner(source.clone(), &mut storage);

        assert!(!effects.run(Effect::SpawnFetch(request("", 1))));
        assert!(effects.in_flight.is_empty());
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_spawn_effect_reaches_coordinator() {
        let source = Arc::new(StaticSource::ok(vec![story("1")]));
        let mut storage = MemoryStore::new();
        let (mut effects, mut rx) = runner(source.clone(), &mut storage);
        let url = format!("{TEST_ENDPOINT}rust");

        assert!(!effects.run(Effect::SpawnFetch(request(&url, 3))));
        assert_eq!(effects.in_flight.len(), 1);

        let action = rx.recv().await.unwrap();
        assert_eq!(
            action,
            Action::FetchSucceeded {
                generation: 3,
                stories: vec![story("1")],
            }
        );
        assert_eq!(source.calls(), vec![url]);
    }

    #[tokio::test]
    async fn test_dropping_runner_aborts_in_flight_fetches() {
        let mut storage = MemoryStore::new();
        let (mut effects, mut rx) = runner(Arc::new(PendingSource), &mut storage);
        effects.run(Effect::SpawnFetch(request("http://stories.test/search?query=slow", 1)));
        assert_eq!(effects.in_flight.len(), 1);

        drop(effects);

        // The aborted task drops its sender, so the channel closes with no result
        let closed = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert_eq!(closed.unwrap(), None);
    }

    #[tokio::test]
    async fn test_quit_effect_stops_loop() {
        let mut storage = MemoryStore::new();
        let (mut effects, _rx) = runner(Arc::new(StaticSource::ok(vec![])), &mut storage);
        assert!(effects.run(Effect::Quit));
        assert!(!effects.run(Effect::None));
    }
}
