//! Pure rule evaluation: (value, rule set) -> result.
//!
//! The evaluation order is a hard contract:
//!
//! 1. A function rule set's non-`None` return is the sole error.
//! 2. `required` + empty value short-circuits to exactly the required
//!    message; no other rule runs.
//! 3. An empty optional value is always valid; format and length rules never
//!    fail an empty field.
//! 4. Otherwise email, min length, max length, pattern, and each custom rule
//!    run in that fixed order, accumulating every failure.

use std::sync::LazyLock;

use regex::Regex;

use super::rules::RuleSet;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// Error message for a missing required value.
pub const REQUIRED_MESSAGE: &str = "This field is required";
/// Error message for a malformed email value.
pub const EMAIL_MESSAGE: &str = "Please enter a valid email address";

/// Error message for a too-short value.
pub fn min_length_message(n: usize) -> String {
    format!("Must be at least {n} characters")
}

/// Error message for a too-long value.
pub fn max_length_message(n: usize) -> String {
    format!("Must be no more than {n} characters")
}

/// local@domain.tld shape: no whitespace or extra `@`, and a dotted domain.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

// ---------------------------------------------------------------------------
// ValidationResult
// ---------------------------------------------------------------------------

/// The outcome of one validation pass. A failing result is a normal value,
/// never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Whether the value passed every applicable rule.
    pub is_valid: bool,
    /// Failure messages, in rule-evaluation order.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A passing result.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing result carrying the given messages.
    pub fn invalid(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
        }
    }
}

// ---------------------------------------------------------------------------
// evaluate
// ---------------------------------------------------------------------------

/// Evaluate a value against a rule set.
pub fn evaluate(value: &str, ruleset: &RuleSet) -> ValidationResult {
    let rules = match ruleset {
        RuleSet::Function(f) => {
            return match f(value) {
                Some(message) => ValidationResult::invalid(vec![message]),
                None => ValidationResult::valid(),
            };
        }
        RuleSet::Rules(rules) => rules,
    };

    let empty = value.trim().is_empty();
    if rules.required && empty {
        return ValidationResult::invalid(vec![REQUIRED_MESSAGE.to_owned()]);
    }
    if empty {
        // Empty optional fields never fail format/length/pattern rules.
        return ValidationResult::valid();
    }

    let mut errors = Vec::new();
    if rules.email && !EMAIL_RE.is_match(value) {
        errors.push(EMAIL_MESSAGE.to_owned());
    }
    let length = value.chars().count();
    if let Some(min) = rules.min_length {
        if length < min {
            errors.push(min_length_message(min));
        }
    }
    if let Some(max) = rules.max_length {
        if length > max {
            errors.push(max_length_message(max));
        }
    }
    if let Some(pattern) = &rules.pattern {
        if let Some(message) = pattern.check(value) {
            errors.push(message);
        }
    }
    for rule in &rules.custom {
        if let Some(message) = rule(value) {
            errors.push(message);
        }
    }

    if errors.is_empty() {
        ValidationResult::valid()
    } else {
        ValidationResult::invalid(errors)
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::rules::{Pattern, Rules};
    use pretty_assertions::assert_eq;

    fn eval(value: &str, rules: Rules) -> ValidationResult {
        evaluate(value, &rules.into())
    }

    // -----------------------------------------------------------------------
    // Function rule sets
    // -----------------------------------------------------------------------

    #[test]
    fn function_pass() {
        let set = RuleSet::function(|_| None);
        assert_eq!(evaluate("anything", &set), ValidationResult::valid());
    }

    #[test]
    fn function_failure_is_sole_error() {
        let set = RuleSet::function(|v| (!v.starts_with('x')).then(|| "must start with x".to_owned()));
        let result = evaluate("abc", &set);
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["must start with x"]);
    }

    // -----------------------------------------------------------------------
    // Required / empty short-circuits
    // -----------------------------------------------------------------------

    #[test]
    fn required_empty_yields_exactly_one_error() {
        // Even with every other rule configured, a required-empty value
        // produces only the required message.
        let result = eval("", Rules::new().required().email().min_length(5));
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec![REQUIRED_MESSAGE]);
    }

    #[test]
    fn required_whitespace_is_empty() {
        let result = eval("   \t", Rules::new().required());
        assert_eq!(result.errors, vec![REQUIRED_MESSAGE]);
    }

    #[test]
    fn optional_empty_is_valid_despite_other_rules() {
        let pattern = Pattern::new(r"^\d+$", "Digits only").unwrap();
        let result = eval(
            "",
            Rules::new().email().min_length(5).pattern(pattern).custom(|_| {
                Some("custom failure".to_owned())
            }),
        );
        assert_eq!(result, ValidationResult::valid());
    }

    #[test]
    fn optional_whitespace_is_valid() {
        let result = eval("   ", Rules::new().email());
        assert_eq!(result, ValidationResult::valid());
    }

    // -----------------------------------------------------------------------
    // Individual rules
    // -----------------------------------------------------------------------

    #[test]
    fn email_rejects_malformed() {
        let result = eval("not-an-email", Rules::new().email());
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec![EMAIL_MESSAGE]);
    }

    #[test]
    fn email_accepts_wellformed() {
        let result = eval("test@example.com", Rules::new().email().required());
        assert_eq!(result, ValidationResult::valid());
    }

    #[test]
    fn email_rejects_missing_tld() {
        assert!(!eval("user@host", Rules::new().email()).is_valid);
    }

    #[test]
    fn email_rejects_spaces() {
        assert!(!eval("us er@host.com", Rules::new().email()).is_valid);
    }

    #[test]
    fn min_length_message_states_minimum() {
        let result = eval("abc", Rules::new().min_length(5));
        assert!(!result.is_valid);
        assert_eq!(result.errors, vec!["Must be at least 5 characters"]);
    }

    #[test]
    fn min_length_counts_chars_not_bytes() {
        // Four multi-byte characters satisfy a minimum of four.
        let result = eval("\u{e9}\u{e9}\u{e9}\u{e9}", Rules::new().min_length(4));
        assert!(result.is_valid);
    }

    #[test]
    fn max_length_rejects_long() {
        let result = eval("abcdef", Rules::new().max_length(5));
        assert_eq!(result.errors, vec!["Must be no more than 5 characters"]);
    }

    #[test]
    fn pattern_uses_configured_message() {
        let pattern = Pattern::new(r"^\d+$", "Digits only").unwrap();
        let result = eval("abc", Rules::new().pattern(pattern));
        assert_eq!(result.errors, vec!["Digits only"]);
    }

    #[test]
    fn custom_rules_run_in_order() {
        let result = eval(
            "x",
            Rules::new()
                .custom(|_| Some("first".to_owned()))
                .custom(|_| None)
                .custom(|_| Some("third".to_owned())),
        );
        assert_eq!(result.errors, vec!["first", "third"]);
    }

    // -----------------------------------------------------------------------
    // Accumulation and ordering
    // -----------------------------------------------------------------------

    #[test]
    fn non_empty_failures_accumulate_in_fixed_order() {
        let pattern = Pattern::new(r"^\d+$", "Digits only").unwrap();
        let result = eval(
            "ab",
            Rules::new()
                .email()
                .min_length(5)
                .pattern(pattern)
                .custom(|_| Some("custom".to_owned())),
        );
        assert_eq!(
            result.errors,
            vec![
                EMAIL_MESSAGE.to_owned(),
                min_length_message(5),
                "Digits only".to_owned(),
                "custom".to_owned(),
            ]
        );
    }

    #[test]
    fn valid_when_all_rules_pass() {
        let result = eval(
            "test@example.com",
            Rules::new().required().email().min_length(5).max_length(50),
        );
        assert_eq!(result, ValidationResult::valid());
    }

    #[test]
    fn empty_ruleset_is_always_valid() {
        assert!(eval("anything at all", Rules::new()).is_valid);
    }
}
