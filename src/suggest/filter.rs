//! Suggestion filtering against the pending input.

use crate::token::{Suggestion, is_operator_char};

/// Derive the filtered suggestion list for the current input text.
///
/// Empty input hides everything. Input ending on an operator character
/// shows the full data set; the key protocol keeps typed operators out of
/// the input, so this branch only fires after host-driven text replacement
/// such as paste. Anything else is a case-insensitive substring match on
/// the suggestion name, preserving data-set order.
pub fn filter_suggestions(data: &[Suggestion], input: &str) -> Vec<Suggestion> {
    if input.is_empty() {
        return Vec::new();
    }

    if let Some(last) = input.chars().last()
        && is_operator_char(last)
    {
        return data.to_vec();
    }

    let needle = input.to_lowercase();
    data.iter()
        .filter(|suggestion| suggestion.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> Vec<Suggestion> {
        vec![
            Suggestion::new(1, "Price"),
            Suggestion::new(2, "quantity"),
            Suggestion::new(3, "unitPrice"),
        ]
    }

    #[test]
    fn test_empty_input_hides_all() {
        assert!(filter_suggestions(&data(), "").is_empty());
    }

    #[test]
    fn test_trailing_operator_shows_full_set() {
        let filtered = filter_suggestions(&data(), "3+");
        assert_eq!(filtered, data());
    }

    #[test]
    fn test_substring_match_is_case_insensitive() {
        let filtered = filter_suggestions(&data(), "PRICE");
        let names: Vec<&str> = filtered.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Price", "unitPrice"]);
    }

    #[test]
    fn test_order_is_preserved() {
        let filtered = filter_suggestions(&data(), "i");
        let ids: Vec<u64> = filtered.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_no_match_yields_empty() {
        assert!(filter_suggestions(&data(), "total").is_empty());
    }
}
