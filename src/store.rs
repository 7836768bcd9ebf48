//! Owned widget state with synchronous change notification.
//!
//! The store replaces a process-wide singleton: construct one at the
//! application root and hand it to whatever drives the widget. Writes go
//! through setters that notify every subscriber synchronously, so any
//! reader observes updates in the same order they were made.

use crate::token::{Suggestion, Token};
use tracing::trace;

/// Identifies which store key changed in a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateChange {
    InputValue,
    FilteredSuggestions,
    SelectedTags,
    Result,
}

/// State for one formula input widget.
pub struct FormulaStore {
    input_value: String,
    filtered_suggestions: Vec<Suggestion>,
    selected_tags: Vec<Token>,
    result: String,
    next_tag_id: u64,
    subscribers: Vec<flume::Sender<StateChange>>,
}

impl Default for FormulaStore {
    fn default() -> Self {
        Self::new()
    }
}

impl FormulaStore {
    pub fn new() -> Self {
        Self {
            input_value: String::new(),
            filtered_suggestions: Vec::new(),
            selected_tags: Vec::new(),
            result: String::new(),
            next_tag_id: 1,
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber; every subsequent write sends it a [`StateChange`].
    ///
    /// Dropped receivers are pruned on the next write.
    pub fn subscribe(&mut self) -> flume::Receiver<StateChange> {
        let (tx, rx) = flume::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// The pending input text.
    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn set_input_value(&mut self, value: impl Into<String>) {
        self.input_value = value.into();
        self.notify(StateChange::InputValue);
    }

    /// The suggestion list derived from the current input.
    pub fn filtered_suggestions(&self) -> &[Suggestion] {
        &self.filtered_suggestions
    }

    pub fn set_filtered_suggestions(&mut self, suggestions: Vec<Suggestion>) {
        self.filtered_suggestions = suggestions;
        self.notify(StateChange::FilteredSuggestions);
    }

    /// The committed tags, in expression order.
    pub fn selected_tags(&self) -> &[Token] {
        &self.selected_tags
    }

    pub fn set_selected_tags(&mut self, tags: Vec<Token>) {
        self.selected_tags = tags;
        self.notify(StateChange::SelectedTags);
    }

    /// The displayed evaluation result.
    pub fn result(&self) -> &str {
        &self.result
    }

    pub fn set_result(&mut self, result: impl Into<String>) {
        self.result = result.into();
        self.notify(StateChange::Result);
    }

    /// Append a committed token, assigning it a fresh unique id.
    ///
    /// Ids come from a monotonically increasing counter, so two commits in
    /// the same instant still get distinct ids.
    pub fn add_tag(&mut self, mut token: Token) -> u64 {
        let id = self.next_tag_id;
        self.next_tag_id += 1;
        token.id = Some(id);
        self.selected_tags.push(token);
        self.notify(StateChange::SelectedTags);
        id
    }

    /// Remove the tag with the given id, if present.
    pub fn remove_tag(&mut self, id: u64) {
        self.selected_tags.retain(|tag| tag.id != Some(id));
        self.notify(StateChange::SelectedTags);
    }

    /// Remove and return the most recently committed tag.
    pub fn pop_tag(&mut self) -> Option<Token> {
        let tag = self.selected_tags.pop();
        if tag.is_some() {
            self.notify(StateChange::SelectedTags);
        }
        tag
    }

    fn notify(&mut self, change: StateChange) {
        trace!(?change, "store updated");
        self.subscribers
            .retain(|subscriber| subscriber.send(change).is_ok());
    }
}
