//! # Text Processing Utilities
//!
//! Label formatting for identifier-style names and lenient interpretation of
//! the flag encodings found in persisted configuration.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Matches every lower-to-upper letter transition.
static LOWER_TO_UPPER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\p{Ll})(\p{Lu})").expect("valid transition pattern"));

/// Turns an identifier-style name into a human-readable label.
///
/// A single space is inserted at each lower-to-upper letter transition; no
/// other characters are changed. Names without such a transition (for
/// example all-caps acronyms) are returned unchanged.
///
/// # Example
/// ```rust
/// use datalist_util::split_pascal_casing;
///
/// assert_eq!(split_pascal_casing("FirstName"), "First Name");
/// assert_eq!(split_pascal_casing("ID"), "ID");
/// ```
pub fn split_pascal_casing(name: &str) -> String {
    LOWER_TO_UPPER.replace_all(name, "${1} ${2}").into_owned()
}

/// Interprets a persisted flag value.
///
/// Older configuration stores booleans as `"1"`/`"0"` strings or numbers, so
/// all of `true`, `1`, `"1"` and `"true"` (case-insensitive) count as set.
/// Everything else, including `null`, is unset.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => {
            let text = text.trim();
            text == "1" || text.eq_ignore_ascii_case("true")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_at_lower_to_upper_transitions() {
        assert_eq!(split_pascal_casing("FirstName"), "First Name");
        assert_eq!(split_pascal_casing("DarkSlateGray"), "Dark Slate Gray");
        assert_eq!(split_pascal_casing("aBcD"), "a Bc D");
    }

    #[test]
    fn leaves_names_without_transitions_alone() {
        assert_eq!(split_pascal_casing("ID"), "ID");
        assert_eq!(split_pascal_casing("red"), "red");
        assert_eq!(split_pascal_casing("gamma_case"), "gamma_case");
        assert_eq!(split_pascal_casing(""), "");
    }

    #[test]
    fn acronym_followed_by_word_only_splits_on_lowercase_boundary() {
        assert_eq!(split_pascal_casing("HTTPStatus"), "HTTPStatus");
        assert_eq!(split_pascal_casing("statusHTTP"), "status HTTP");
    }

    #[test]
    fn truthy_accepts_legacy_encodings() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("1")));
        assert!(is_truthy(&json!("True")));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("0")));
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!({ "flag": true })));
    }
}
