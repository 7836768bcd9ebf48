//! The formula input widget core.
//!
//! Owns the widget state machine: committed tags, pending input, filtered
//! suggestions, and the live evaluation result. Hosts feed discrete UI
//! events in; every mutation synchronously refilters the suggestions,
//! re-evaluates the expression, and notifies store subscribers. Rendering
//! and OS input plumbing stay on the host side.

use crate::config::Config;
use crate::focus::{FocusState, HideRequest};
use crate::formula::{Evaluator, FastevalEvaluator, evaluate_formula};
use crate::store::{FormulaStore, StateChange};
use crate::suggest::{FetchState, filter_suggestions};
use crate::token::{Suggestion, Token, is_numeric_value, is_operator_value};
use tracing::{debug, warn};

/// Headless formula input widget.
pub struct FormulaInput {
    store: FormulaStore,
    focus: FocusState,
    config: Config,
    evaluator: Box<dyn Evaluator>,
    data: FetchState,
}

impl Default for FormulaInput {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl FormulaInput {
    pub fn new(config: Config) -> Self {
        Self::with_evaluator(config, Box::new(FastevalEvaluator::new()))
    }

    /// Widget with a custom evaluator backend.
    pub fn with_evaluator(config: Config, evaluator: Box<dyn Evaluator>) -> Self {
        Self {
            store: FormulaStore::new(),
            focus: FocusState::new(),
            config,
            evaluator,
            data: FetchState::Loading,
        }
    }

    /// The host text field changed; replace the pending input.
    pub fn input_changed(&mut self, value: &str) {
        self.store.set_input_value(value);
        self.refresh();
    }

    /// Handle a key press. Returns `true` when the widget consumed the key
    /// and the host must suppress its default text-insertion behavior.
    ///
    /// Backspace over an empty pending input removes the last committed
    /// tag. An operator keystroke commits the pending input first (only if
    /// it is numeric; anything else is discarded), then the operator
    /// itself. Every other key is left to the host, which reports the
    /// edited text through [`FormulaInput::input_changed`].
    pub fn key_down(&mut self, key: &str) -> bool {
        if key == "Backspace" && self.store.input_value().is_empty() {
            if let Some(tag) = self.store.pop_tag() {
                debug!(name = %tag.name, "removed last tag");
            }
            self.refresh();
            return true;
        }

        if is_operator_value(key) {
            self.commit_operator(key);
            return true;
        }

        false
    }

    fn commit_operator(&mut self, operator: &str) {
        let pending = self.store.input_value().to_string();
        if !pending.is_empty() {
            if is_numeric_value(&pending) {
                self.store.add_tag(Token::new(pending.clone(), pending));
            } else {
                debug!(%pending, "discarded non-numeric pending input");
            }
        }
        self.store.add_tag(Token::operator(operator));
        self.store.set_input_value("");
        self.refresh();
    }

    /// Commit the suggestion at `index` in the filtered list as an operand
    /// tag. Clears the pending input and the filtered list, and cancels
    /// any pending hide so the click that got us here keeps the widget
    /// responsive. Returns `false` when the index is out of range.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        let Some(suggestion) = self.store.filtered_suggestions().get(index).cloned() else {
            warn!(index, "suggestion selection out of range");
            return false;
        };
        debug!(name = %suggestion.name, "suggestion selected");
        self.store.add_tag(Token::from(&suggestion));
        self.store.set_input_value("");
        self.store.set_filtered_suggestions(Vec::new());
        self.focus.cancel_hide();
        self.refresh();
        true
    }

    /// Reset pending input, committed tags, and result to their initial
    /// empty values.
    pub fn clear(&mut self) {
        debug!("clear");
        self.store.set_input_value("");
        self.store.set_selected_tags(Vec::new());
        self.store.set_result("");
        self.refresh();
    }

    /// The input gained focus; suggestions become visible again.
    pub fn focus(&mut self) {
        self.focus.focus();
    }

    /// The input lost focus. Returns the hide request the host must
    /// schedule; the request goes stale if a selection or refocus happens
    /// before it fires.
    pub fn blur(&mut self) -> HideRequest {
        self.focus.blur(self.config.hide_delay())
    }

    /// A scheduled hide request expired. Returns `true` when the request
    /// was still current and the suggestion list is now hidden.
    pub fn hide_elapsed(&mut self, generation: u64) -> bool {
        self.focus.hide_elapsed(generation)
    }

    /// Mark the one-shot suggestion fetch as in flight.
    pub fn data_loading(&mut self) {
        self.data = FetchState::Loading;
    }

    /// Install the fetched suggestion data set.
    pub fn data_loaded(&mut self, suggestions: Vec<Suggestion>) {
        debug!(count = suggestions.len(), "suggestion data loaded");
        self.data = FetchState::Ready(suggestions);
        self.refresh();
    }

    /// Record a failed fetch; the message is surfaced to the host as-is.
    /// The widget stays interactive with an empty data set.
    pub fn data_failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!(%message, "suggestion fetch failed");
        self.data = FetchState::Failed(message);
    }

    pub fn fetch_state(&self) -> &FetchState {
        &self.data
    }

    /// The filtered suggestions, or an empty slice while the list is hidden.
    pub fn visible_suggestions(&self) -> &[Suggestion] {
        if self.focus.suggestions_visible() {
            self.store.filtered_suggestions()
        } else {
            &[]
        }
    }

    pub fn suggestions_visible(&self) -> bool {
        self.focus.suggestions_visible()
    }

    pub fn is_focused(&self) -> bool {
        self.focus.is_focused()
    }

    pub fn store(&self) -> &FormulaStore {
        &self.store
    }

    /// Register a subscriber on the underlying store.
    pub fn subscribe(&mut self) -> flume::Receiver<StateChange> {
        self.store.subscribe()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn input_value(&self) -> &str {
        self.store.input_value()
    }

    pub fn tags(&self) -> &[Token] {
        self.store.selected_tags()
    }

    pub fn result(&self) -> &str {
        self.store.result()
    }

    /// Recompute the derived state after any mutation: the filtered
    /// suggestion list and the evaluation result.
    fn refresh(&mut self) {
        let filtered = match &self.data {
            FetchState::Ready(data) => filter_suggestions(data, self.store.input_value()),
            _ => Vec::new(),
        };
        self.store.set_filtered_suggestions(filtered);

        let outcome = evaluate_formula(
            self.store.selected_tags(),
            self.store.input_value(),
            self.evaluator.as_ref(),
            self.config.display_precision,
        );
        self.store.set_result(outcome.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget_with_data() -> FormulaInput {
        let mut input = FormulaInput::new(Config::default());
        input.data_loaded(vec![
            Suggestion::new(1, "price"),
            Suggestion::new(2, "quantity"),
        ]);
        input
    }

    fn tag_values(input: &FormulaInput) -> Vec<&str> {
        input.tags().iter().map(|tag| tag.value.as_str()).collect()
    }

    #[test]
    fn test_operator_keystroke_commits_numeric_pending() {
        let mut input = widget_with_data();
        input.input_changed("12");
        assert!(input.key_down("+"));

        assert_eq!(tag_values(&input), vec!["12", "+"]);
        assert_eq!(input.input_value(), "");
    }

    #[test]
    fn test_operator_keystroke_discards_non_numeric_pending() {
        let mut input = widget_with_data();
        input.input_changed("abc");
        assert!(input.key_down("+"));

        assert_eq!(tag_values(&input), vec!["+"]);
        assert_eq!(input.input_value(), "");
    }

    #[test]
    fn test_operator_keystroke_with_empty_pending() {
        let mut input = widget_with_data();
        assert!(input.key_down("("));
        assert_eq!(tag_values(&input), vec!["("]);
    }

    #[test]
    fn test_backspace_on_empty_pending_pops_last_tag() {
        let mut input = widget_with_data();
        input.input_changed("12");
        input.key_down("+");
        assert!(input.key_down("Backspace"));

        assert_eq!(tag_values(&input), vec!["12"]);
    }

    #[test]
    fn test_backspace_with_pending_text_is_not_consumed() {
        let mut input = widget_with_data();
        input.input_changed("12");
        assert!(!input.key_down("Backspace"));
        assert_eq!(input.input_value(), "12");
    }

    #[test]
    fn test_ordinary_keys_are_not_consumed() {
        let mut input = widget_with_data();
        assert!(!input.key_down("1"));
        assert!(!input.key_down("a"));
        assert!(!input.key_down("Enter"));
        assert!(!input.key_down("%"));
    }

    #[test]
    fn test_selection_commits_suggestion_and_clears_input() {
        let mut input = widget_with_data();
        input.focus();
        input.input_changed("pri");
        assert_eq!(input.visible_suggestions().len(), 1);

        assert!(input.select_suggestion(0));
        assert_eq!(tag_values(&input), vec!["price"]);
        assert_eq!(input.input_value(), "");
        assert!(input.store().filtered_suggestions().is_empty());
        assert_eq!(input.tags()[0].id, Some(1));
    }

    #[test]
    fn test_selection_out_of_range_is_a_no_op() {
        let mut input = widget_with_data();
        input.input_changed("pri");
        assert!(!input.select_suggestion(5));
        assert!(input.tags().is_empty());
    }

    #[test]
    fn test_result_updates_live_while_typing() {
        let mut input = widget_with_data();
        input.input_changed("3");
        input.key_down("+");
        assert_eq!(input.result(), "Invalid expression");

        input.input_changed("4");
        assert_eq!(input.result(), "7");
    }

    #[test]
    fn test_adjacent_suggestions_report_missing_operator() {
        let mut input = widget_with_data();
        input.input_changed("pri");
        input.select_suggestion(0);
        input.input_changed("quant");
        input.select_suggestion(0);

        assert_eq!(tag_values(&input), vec!["price", "quantity"]);
        assert_eq!(input.result(), "Error: Missing operator");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut input = widget_with_data();
        input.input_changed("3");
        input.key_down("+");
        input.input_changed("4");
        input.clear();

        assert!(input.tags().is_empty());
        assert_eq!(input.input_value(), "");
        assert_eq!(input.result(), "");
        assert!(input.store().filtered_suggestions().is_empty());
    }

    #[test]
    fn test_suggestions_hidden_until_focus() {
        let mut input = widget_with_data();
        input.input_changed("pri");
        assert!(!input.store().filtered_suggestions().is_empty());
        assert!(input.visible_suggestions().is_empty());

        input.focus();
        assert_eq!(input.visible_suggestions().len(), 1);
    }

    #[test]
    fn test_blur_and_elapsed_hide_suggestions() {
        let mut input = widget_with_data();
        input.focus();
        input.input_changed("pri");
        let request = input.blur();

        assert!(!input.visible_suggestions().is_empty());
        assert!(input.hide_elapsed(request.generation));
        assert!(input.visible_suggestions().is_empty());
        assert!(!input.store().filtered_suggestions().is_empty());
    }

    #[test]
    fn test_selection_cancels_pending_hide() {
        let mut input = widget_with_data();
        input.focus();
        input.input_changed("pri");
        let request = input.blur();
        input.select_suggestion(0);

        assert!(!input.hide_elapsed(request.generation));
        assert!(input.suggestions_visible());
    }

    #[test]
    fn test_widget_stays_interactive_after_fetch_failure() {
        let mut input = FormulaInput::new(Config::default());
        input.data_failed("Error loading data.");
        assert_eq!(
            input.fetch_state(),
            &FetchState::Failed("Error loading data.".to_string())
        );

        input.input_changed("pri");
        assert!(input.store().filtered_suggestions().is_empty());

        input.input_changed("3");
        input.key_down("*");
        input.input_changed("4");
        assert_eq!(input.result(), "12");
    }

    #[test]
    fn test_display_precision_comes_from_config() {
        let config = Config {
            display_precision: 2,
            ..Config::default()
        };
        let mut input = FormulaInput::new(config);
        input.data_loaded(Vec::new());
        input.input_changed("1");
        input.key_down("/");
        input.input_changed("3");
        assert_eq!(input.result(), "0.33");
    }

    #[test]
    fn test_zero_precision_rounds_to_whole_numbers() {
        let config = Config {
            display_precision: 0,
            ..Config::default()
        };
        let mut input = FormulaInput::new(config);
        input.data_loaded(Vec::new());
        input.input_changed("21");
        input.key_down("/");
        input.input_changed("2");
        assert_eq!(input.result(), "10");
    }

    #[test]
    fn test_custom_evaluator_namespace() {
        let mut evaluator = FastevalEvaluator::new();
        evaluator.bind("price", 2.5);
        let mut input =
            FormulaInput::with_evaluator(Config::default(), Box::new(evaluator));
        input.data_loaded(vec![Suggestion::new(1, "price")]);

        input.input_changed("price");
        input.select_suggestion(0);
        input.key_down("+");
        input.input_changed("1");
        assert_eq!(input.result(), "3.5");
    }

    #[test]
    fn test_unbound_suggestion_name_is_an_error() {
        let mut input = widget_with_data();
        input.input_changed("pri");
        input.select_suggestion(0);
        input.key_down("+");
        input.input_changed("1");
        assert_eq!(input.result(), "Error");
    }
}
