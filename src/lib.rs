//! Headless core for an autocomplete formula input.
//!
//! The widget lets a user compose an arithmetic expression from committed
//! tags (variable names picked from autocomplete suggestions, numeric
//! literals, and operator keystrokes) plus the text still being typed,
//! and evaluates the expression live after every change.
//!
//! The crate owns the state machine only: [`FormulaInput`] consumes
//! discrete UI events (text edits, key presses, suggestion clicks, focus
//! changes) and keeps a [`FormulaStore`] up to date, while rendering and
//! OS input plumbing stay on the host side. Evaluation is delegated to a
//! pluggable [`Evaluator`]; the default backend is `fasteval`. An async
//! [`Session`] is provided for hosts that deliver events over a channel.

pub mod config;
pub mod focus;
pub mod formula;
pub mod input;
pub mod session;
pub mod store;
pub mod suggest;
pub mod token;

pub use config::Config;
pub use focus::{FocusState, HideRequest};
pub use formula::{
    EvalError, EvalOutcome, Evaluator, FastevalEvaluator, evaluate_formula, format_value,
    has_adjacent_operands, is_complete_expression, linearize,
};
pub use input::FormulaInput;
pub use session::{Session, UiEvent};
pub use store::{FormulaStore, StateChange};
pub use suggest::{
    FETCH_ERROR_MESSAGE, FetchState, StaticSource, SuggestionSource, filter_suggestions,
};
pub use token::{Suggestion, Token, TokenKind, is_numeric_value, is_operator_char, is_operator_value};
