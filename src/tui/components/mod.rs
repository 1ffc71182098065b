//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: Title, fetch status and key hint
//! - `StoryList`: Renders the stories it is given, with `StoryListState`
//!   holding the selection between frames
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `SearchBox`: Single-line search input
//! - `StoryListState`: Selection and removal requests
//!
//! Components receive external data as props (struct fields or render
//! parameters), never by reaching into the store.

pub mod search_box;
pub mod story_list;
pub mod title_bar;

pub use search_box::{SearchBox, SearchEvent};
pub use story_list::{ListEvent, StoryList, StoryListState};
pub use title_bar::TitleBar;
