//! Pluggable suggestion data sources.
//!
//! The widget fetches its suggestion data once at mount and treats the
//! result as an immutable snapshot for its lifetime. A failed fetch
//! surfaces a static error message to the user; there is no retry.

use crate::token::Suggestion;
use anyhow::{Context, Result};

/// Message surfaced when the one-shot suggestion fetch fails.
pub const FETCH_ERROR_MESSAGE: &str = "Error loading data.";

/// Observable lifecycle of the one-shot suggestion fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchState {
    /// The fetch is in flight.
    Loading,
    /// The fetch failed; the message is shown to the user.
    Failed(String),
    /// The data set is available.
    Ready(Vec<Suggestion>),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// The loaded data set, if any.
    pub fn data(&self) -> Option<&[Suggestion]> {
        match self {
            Self::Ready(data) => Some(data),
            _ => None,
        }
    }
}

/// A read-only collection of `{id, name}` suggestion records.
pub trait SuggestionSource: Send + Sync {
    /// Fetch the full data set. Called once when the widget mounts; the
    /// call may block.
    fn fetch(&self) -> Result<Vec<Suggestion>>;

    /// Backend name for diagnostics.
    fn name(&self) -> &'static str;
}

/// In-memory source, loadable from a JSON array of `{id, name}` records.
#[derive(Clone, Debug, Default)]
pub struct StaticSource {
    suggestions: Vec<Suggestion>,
}

impl StaticSource {
    pub fn new(suggestions: Vec<Suggestion>) -> Self {
        Self { suggestions }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let suggestions =
            serde_json::from_str(raw).context("failed to parse suggestion records")?;
        Ok(Self { suggestions })
    }
}

impl SuggestionSource for StaticSource {
    fn fetch(&self) -> Result<Vec<Suggestion>> {
        Ok(self.suggestions.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
