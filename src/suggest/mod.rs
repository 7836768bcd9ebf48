//! Suggestion data: filtering and pluggable sources.

mod filter;
mod source;

pub use filter::filter_suggestions;
pub use source::{FETCH_ERROR_MESSAGE, FetchState, StaticSource, SuggestionSource};
