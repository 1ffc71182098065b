//! # Core Application Logic
//!
//! The search controller and the stories state machine.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Store (subscribers)  │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │  Headless  │      │   Fetch    │
//!     │  Adapter   │      │  (--print) │      │ Coordinator│
//!     │ (ratatui)  │      │            │      │  (tokio)   │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`stories`]: `StoriesState` and its pure `reduce()`
//! - [`state`]: The `App` struct: all controller state in one place
//! - [`action`]: The `Action` enum and `update()`
//! - [`store`]: Dispatch plus change notification for renderers
//! - [`coordinator`]: Runs fetches and posts results back as actions
//! - [`storage`]: Durable key-value store for the last search term
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod coordinator;
pub mod state;
pub mod storage;
pub mod stories;
pub mod store;
