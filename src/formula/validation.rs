//! Structural checks on a candidate expression.
//!
//! These run before every evaluation attempt and decide whether the
//! committed tags plus the pending input are worth handing to the
//! evaluator at all.

use crate::token::{Token, is_operator_char};

/// Check that the linearized expression does not end on a dangling operator.
///
/// The trailing character class is the full operator class, so `3+`, `3*(`
/// and `(3+4)` are all incomplete. The empty string has no trailing
/// operator and counts as complete; callers guard empty expressions
/// separately.
pub fn is_complete_expression(expression: &str) -> bool {
    match expression.chars().last() {
        Some(last) => !is_operator_char(last),
        None => true,
    }
}

/// Scan committed tags for two operands with no operator between them.
///
/// Only committed tags are checked; the pending input is excluded.
/// Sequences of length 0 or 1 never trigger this.
pub fn has_adjacent_operands(tags: &[Token]) -> bool {
    tags.windows(2)
        .any(|pair| pair[0].is_operand() && pair[1].is_operand())
}

/// Concatenate tag values in sequence order, then the pending input.
///
/// Nothing is inserted or normalized, so an adjacency violation stays
/// visible in the output rather than being silently repaired.
pub fn linearize(tags: &[Token], pending: &str) -> String {
    let mut expression: String = tags.iter().map(|tag| tag.value.as_str()).collect();
    expression.push_str(pending);
    expression
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(values: &[&str]) -> Vec<Token> {
        values
            .iter()
            .map(|value| Token::new(*value, *value))
            .collect()
    }

    #[test]
    fn test_complete_expressions() {
        assert!(is_complete_expression("3+4"));
        assert!(is_complete_expression("12"));
        assert!(is_complete_expression("price"));
        assert!(is_complete_expression(""));
    }

    #[test]
    fn test_trailing_operator_is_incomplete() {
        for expression in ["3+", "3-", "3*", "3/", "3^", "3*(", "(3+4)"] {
            assert!(!is_complete_expression(expression), "{}", expression);
        }
    }

    #[test]
    fn test_alternating_tags_have_no_adjacent_operands() {
        assert!(!has_adjacent_operands(&tags(&["3", "+", "4"])));
        assert!(!has_adjacent_operands(&tags(&["3", "+", "4", "*", "x"])));
        assert!(!has_adjacent_operands(&tags(&["(", "3", "+", "4", ")"])));
    }

    #[test]
    fn test_adjacent_operands_detected_anywhere() {
        assert!(has_adjacent_operands(&tags(&["3", "4"])));
        assert!(has_adjacent_operands(&tags(&["3", "4", "+", "5"])));
        assert!(has_adjacent_operands(&tags(&["3", "+", "4", "5"])));
        assert!(has_adjacent_operands(&tags(&["+", "x", "y"])));
    }

    #[test]
    fn test_consecutive_operators_are_not_adjacency_violations() {
        assert!(!has_adjacent_operands(&tags(&["3", "+", "+", "4"])));
        assert!(!has_adjacent_operands(&tags(&["(", "(", "3"])));
    }

    #[test]
    fn test_short_sequences_never_trigger() {
        assert!(!has_adjacent_operands(&[]));
        assert!(!has_adjacent_operands(&tags(&["3"])));
    }

    #[test]
    fn test_linearize_is_order_preserving() {
        assert_eq!(linearize(&tags(&["3", "+"]), "4"), "3+4");
        assert_eq!(linearize(&tags(&["(", "3", "+", "4", ")"]), ""), "(3+4)");
        assert_eq!(linearize(&[], "12"), "12");
        assert_eq!(linearize(&[], ""), "");
    }

    #[test]
    fn test_linearize_inserts_nothing() {
        // Adjacent operands stay glued together rather than being repaired.
        assert_eq!(linearize(&tags(&["3", "4"]), ""), "34");
        assert_eq!(linearize(&tags(&["price", "+"]), " 2 "), "price+ 2 ");
    }
}
