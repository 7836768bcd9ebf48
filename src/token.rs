//! Token model for the formula input.
//!
//! A committed tag is either an operand (a numeric literal or a variable
//! name) or an operator. The kind is decided once, at construction, by
//! testing the token value against the operator character class.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Matches values containing an operator character: `+ - * / ^ ( )`.
    static ref OPERATOR_CLASS: Regex = Regex::new(r"[+\-*/^()]").unwrap();
}

/// Check if a single character belongs to the operator class.
pub fn is_operator_char(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '^' | '(' | ')')
}

/// Check if a value contains an operator character.
///
/// Committed operator tags are always a single character, so for them this
/// is an exact test; for anything longer it classifies the value as an
/// operator as soon as one operator character appears in it.
pub fn is_operator_value(value: &str) -> bool {
    OPERATOR_CLASS.is_match(value)
}

/// Check if a value is a numeric literal.
///
/// Surrounding whitespace is ignored; anything `f64` can parse counts.
pub fn is_numeric_value(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.parse::<f64>().is_ok()
}

/// The two kinds of committed tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// A numeric literal or variable name.
    Operand,
    /// One of `+ - * / ^ ( )`.
    Operator,
}

impl TokenKind {
    /// Derive the kind by testing `value` against the operator class.
    pub fn classify(value: &str) -> Self {
        if is_operator_value(value) {
            Self::Operator
        } else {
            Self::Operand
        }
    }
}

/// A committed tag in the expression being built.
///
/// `name` is what the host displays, `value` is what the expression uses;
/// for operators and numeric commits the two are identical. `id` is `None`
/// until the store commits the token and assigns a fresh unique id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub name: String,
    pub value: String,
    pub kind: TokenKind,
    pub id: Option<u64>,
}

impl Token {
    /// Build a token, deriving its kind from `value`.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            name: name.into(),
            kind: TokenKind::classify(&value),
            value,
            id: None,
        }
    }

    /// Token for a single operator keystroke; name and value are the operator.
    pub fn operator(operator: impl Into<String>) -> Self {
        let operator = operator.into();
        Self::new(operator.clone(), operator)
    }

    /// Check if this token is an operand.
    pub fn is_operand(&self) -> bool {
        self.kind == TokenKind::Operand
    }

    /// Check if this token is an operator.
    pub fn is_operator(&self) -> bool {
        self.kind == TokenKind::Operator
    }
}

/// A suggestion record from the external data source.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Suggestion {
    pub id: u64,
    pub name: String,
}

impl Suggestion {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl From<&Suggestion> for Token {
    /// A selected suggestion commits as an operand carrying its name as the
    /// expression value, so the evaluator sees the variable by name.
    fn from(suggestion: &Suggestion) -> Self {
        Self::new(suggestion.name.clone(), suggestion.name.clone())
    }
}
