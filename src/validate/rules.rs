//! Rule sets: structured constraints and custom validation functions.

use std::fmt;
use std::rc::Rc;

use regex::Regex;

/// A custom validation function: returns an error message, or `None` when
/// the value passes.
pub type CustomRule = Rc<dyn Fn(&str) -> Option<String>>;

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// A compiled regex constraint with its failure message.
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
    message: String,
}

impl Pattern {
    /// Compile a pattern rule.
    pub fn new(pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(pattern)?,
            message: message.into(),
        })
    }

    /// The failure message if `value` does not match.
    pub fn check(&self, value: &str) -> Option<String> {
        if self.regex.is_match(value) {
            None
        } else {
            Some(self.message.clone())
        }
    }

    /// The configured failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("regex", &self.regex.as_str())
            .field("message", &self.message)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Structured constraint record. Built with the chainable methods; every
/// field defaults to "not constrained".
#[derive(Clone, Default)]
pub struct Rules {
    pub(crate) required: bool,
    pub(crate) email: bool,
    pub(crate) min_length: Option<usize>,
    pub(crate) max_length: Option<usize>,
    pub(crate) pattern: Option<Pattern>,
    pub(crate) custom: Vec<CustomRule>,
}

impl Rules {
    /// No constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a non-empty (after trimming) value.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Require an email-shaped value (`local@domain.tld`).
    pub fn email(mut self) -> Self {
        self.email = true;
        self
    }

    /// Require at least `n` characters.
    pub fn min_length(mut self, n: usize) -> Self {
        self.min_length = Some(n);
        self
    }

    /// Require at most `n` characters.
    pub fn max_length(mut self, n: usize) -> Self {
        self.max_length = Some(n);
        self
    }

    /// Require the value to match a pattern.
    pub fn pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Add a custom rule, evaluated after all built-in constraints. Rules
    /// run in the order they were added.
    pub fn custom(mut self, rule: impl Fn(&str) -> Option<String> + 'static) -> Self {
        self.custom.push(Rc::new(rule));
        self
    }

    /// Add an already-boxed custom rule (adapter output).
    pub fn custom_rule(mut self, rule: CustomRule) -> Self {
        self.custom.push(rule);
        self
    }
}

impl fmt::Debug for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rules")
            .field("required", &self.required)
            .field("email", &self.email)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern)
            .field("custom", &self.custom.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// RuleSet
// ---------------------------------------------------------------------------

/// What a field validates against: a single custom function, or a structured
/// constraint record.
#[derive(Clone)]
pub enum RuleSet {
    /// A single function whose non-`None` return is the sole error.
    Function(CustomRule),
    /// A structured constraint record.
    Rules(Rules),
}

impl RuleSet {
    /// Wrap a single validation function.
    pub fn function(f: impl Fn(&str) -> Option<String> + 'static) -> Self {
        Self::Function(Rc::new(f))
    }
}

impl From<Rules> for RuleSet {
    fn from(rules: Rules) -> Self {
        Self::Rules(rules)
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(_) => f.write_str("RuleSet::Function"),
            Self::Rules(rules) => f.debug_tuple("RuleSet::Rules").field(rules).finish(),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
