pub mod hn_search;
pub mod source;
pub mod types;

pub use hn_search::{DEFAULT_ENDPOINT, HnSearchClient};
pub use source::{FetchError, StorySource};
pub use types::{SearchResponse, Story};
