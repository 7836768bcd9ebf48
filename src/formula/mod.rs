//! Formula engine: structural validation, linearization, and evaluation.
//!
//! Tags arrive through discrete UI events rather than free-text parsing,
//! so the engine polices token adjacency instead of running a grammar:
//! - reject expressions ending on a dangling operator
//! - reject two operands placed back-to-back
//! - hand everything else to a pluggable string-expression evaluator

mod evaluation;
mod validation;

pub use evaluation::{
    EvalError, EvalOutcome, Evaluator, FastevalEvaluator, evaluate_formula, format_value,
};
pub use validation::{has_adjacent_operands, is_complete_expression, linearize};
