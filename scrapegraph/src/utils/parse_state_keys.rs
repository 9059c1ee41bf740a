//! Extracts state-key names from a node's dependency expression.
//!
//! Node `input` strings look like boolean logic (`"a AND (b OR c)"`), but the
//! expression is never evaluated: only the identifiers matter, because they
//! name the state keys a node reads. The scanner is deliberately permissive —
//! malformed syntax (unbalanced parentheses, stray punctuation) degrades to a
//! plain token scan rather than raising an error.

/// Operator keywords that are part of the expression grammar, not key names.
const OPERATORS: [&str; 3] = ["AND", "OR", "NOT"];

/// Returns the state keys named in a dependency expression, deduplicated,
/// preserving first-seen order.
///
/// Identifiers are runs of letters, digits and underscores that do not start
/// with a digit. The empty string and operator-only expressions yield an
/// empty list.
///
/// # Examples
///
/// ```
/// use scrapegraph::utils::parse_expression;
///
/// assert_eq!(parse_expression("a AND (b OR c) AND d"), vec!["a", "b", "c", "d"]);
/// assert!(parse_expression("AND OR NOT").is_empty());
/// ```
pub fn parse_expression(expression: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    let mut token = String::new();

    let mut push_token = |token: &mut String, keys: &mut Vec<String>| {
        if token.is_empty() {
            return;
        }
        let starts_with_digit = token.chars().next().is_some_and(|c| c.is_ascii_digit());
        if !starts_with_digit
            && !OPERATORS.contains(&token.as_str())
            && !keys.iter().any(|k| k == token)
        {
            keys.push(token.clone());
        }
        token.clear();
    };

    for ch in expression.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            token.push(ch);
        } else {
            push_token(&mut token, &mut keys);
        }
    }
    push_token(&mut token, &mut keys);

    keys
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: simple conjunction yields both keys in order.
    #[test]
    fn simple_expression() {
        assert_eq!(parse_expression("a AND b"), vec!["a", "b"]);
    }

    /// **Scenario**: nesting and parenthesization do not affect the key set.
    #[test]
    fn nested_expression() {
        assert_eq!(
            parse_expression("a AND (b OR c) AND d"),
            vec!["a", "b", "c", "d"]
        );
    }

    /// **Scenario**: empty expression yields no keys.
    #[test]
    fn empty_expression() {
        assert!(parse_expression("").is_empty());
    }

    /// **Scenario**: operator-only expression yields no keys.
    #[test]
    fn operators_only() {
        assert!(parse_expression("AND OR NOT").is_empty());
    }

    /// **Scenario**: repeated identifiers are deduplicated.
    #[test]
    fn repeated_keys_deduplicated() {
        assert_eq!(parse_expression("a AND a AND b OR b"), vec!["a", "b"]);
    }

    /// **Scenario**: underscores and digits are part of identifiers.
    #[test]
    fn identifier_characters() {
        assert_eq!(
            parse_expression("user_input AND doc2"),
            vec!["user_input", "doc2"]
        );
    }

    /// **Scenario**: malformed syntax degrades to a token scan, no error.
    #[test]
    fn malformed_expression_is_permissive() {
        assert_eq!(parse_expression("a AND ((b OR"), vec!["a", "b"]);
        assert_eq!(parse_expression(",a,,b,"), vec!["a", "b"]);
    }
}
