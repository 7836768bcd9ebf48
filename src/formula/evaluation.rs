//! Expression evaluation behind a pluggable evaluator.
//!
//! The widget never parses arithmetic itself: the linearized expression
//! goes to an [`Evaluator`] implementation, with `fasteval` as the
//! default backend. The pipeline here runs the structural checks in a
//! fixed order and maps every failure to its user-visible result string.

use crate::formula::validation::{has_adjacent_operands, is_complete_expression, linearize};
use crate::token::Token;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

/// Error from the pluggable expression evaluator.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EvalError {
    /// The expression references a name with no binding.
    #[error("undefined variable `{0}`")]
    Undefined(String),
    /// The evaluator could not parse or compute the expression.
    #[error("invalid expression: {0}")]
    Invalid(String),
}

impl From<fasteval::Error> for EvalError {
    fn from(error: fasteval::Error) -> Self {
        match error {
            fasteval::Error::Undefined(name) => Self::Undefined(name),
            other => Self::Invalid(format!("{:?}", other)),
        }
    }
}

/// A generic string-expression evaluator.
///
/// Operator precedence, associativity, parenthesis balancing, and division
/// semantics are all owned by the implementation; the widget only polices
/// token adjacency before calling it.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError>;
}

/// Default evaluator backed by `fasteval`.
///
/// Standard precedence for `+ - * / ^ ( )` with right-associative `^`.
/// Division by zero follows IEEE float semantics (`3/0` is infinity, `0/0`
/// is NaN) rather than erroring. An optional variable namespace resolves
/// suggestion names to numeric values; unbound names are evaluation errors.
#[derive(Clone, Debug, Default)]
pub struct FastevalEvaluator {
    variables: BTreeMap<String, f64>,
}

impl FastevalEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluator with a variable namespace for resolving suggestion names.
    pub fn with_variables(variables: BTreeMap<String, f64>) -> Self {
        Self { variables }
    }

    /// Bind one variable name to a value.
    pub fn bind(&mut self, name: impl Into<String>, value: f64) {
        self.variables.insert(name.into(), value);
    }
}

impl Evaluator for FastevalEvaluator {
    fn evaluate(&self, expression: &str) -> Result<f64, EvalError> {
        let mut namespace = self.variables.clone();
        fasteval::ez_eval(expression, &mut namespace).map_err(EvalError::from)
    }
}

/// Outcome of one evaluation attempt.
///
/// Exactly one of these is produced per attempt, and each maps to one
/// user-visible result string via [`EvalOutcome::display`].
#[derive(Clone, Debug, PartialEq)]
pub enum EvalOutcome {
    /// Nothing to evaluate: the linearized expression is empty.
    Empty,
    /// The expression ends on a dangling operator.
    Incomplete,
    /// Two operands sit back-to-back with no operator between them.
    MissingOperator,
    /// Successful evaluation.
    Value {
        /// The numeric value.
        value: f64,
        /// Formatted for display.
        display: String,
    },
    /// The evaluator rejected the expression.
    Failed,
}

impl EvalOutcome {
    /// The user-visible result string.
    pub fn display(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Incomplete => "Invalid expression",
            Self::MissingOperator => "Error: Missing operator",
            Self::Value { display, .. } => display,
            Self::Failed => "Error",
        }
    }

    /// Check if this is a successful evaluation.
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value { .. })
    }

    /// The numeric value, for successful evaluations.
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value { value, .. } => Some(*value),
            _ => None,
        }
    }
}

/// Evaluate the committed tags plus the pending input.
///
/// Checks run in a fixed order: empty guard, completeness, adjacency, then
/// the evaluator. The result is a pure function of the inputs; evaluating
/// twice with unchanged state yields the same outcome.
pub fn evaluate_formula(
    tags: &[Token],
    pending: &str,
    evaluator: &dyn Evaluator,
    precision: usize,
) -> EvalOutcome {
    let expression = linearize(tags, pending);

    if expression.trim().is_empty() {
        return EvalOutcome::Empty;
    }
    if !is_complete_expression(&expression) {
        return EvalOutcome::Incomplete;
    }
    if has_adjacent_operands(tags) {
        return EvalOutcome::MissingOperator;
    }

    match evaluator.evaluate(&expression) {
        Ok(value) => EvalOutcome::Value {
            value,
            display: format_value(value, precision),
        },
        Err(error) => {
            debug!(%expression, %error, "evaluation failed");
            EvalOutcome::Failed
        }
    }
}

/// Format a numeric result for display.
///
/// Integers drop the decimal point, other values keep up to `precision`
/// decimal places with trailing zeros trimmed. Non-finite values render as
/// `Infinity`, `-Infinity`, or `NaN`.
pub fn format_value(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let formatted = format!("{:.*}", precision, value);
        // A precision of 0 yields no decimal point and nothing to trim.
        if formatted.contains('.') {
            formatted
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        } else {
            formatted
        }
    }
}
