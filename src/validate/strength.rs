//! Password-strength scoring.
//!
//! One point per satisfied criterion, in fixed order: length >= 8, an
//! uppercase letter, a lowercase letter, a digit, a symbol. Feedback names
//! exactly the missing criteria in the same order.

// ---------------------------------------------------------------------------
// Strength
// ---------------------------------------------------------------------------

/// Strength level derived from the criteria score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Strength {
    /// Score 0-2.
    Weak,
    /// Score 3.
    Fair,
    /// Score 4.
    Good,
    /// Score 5.
    Strong,
}

impl Strength {
    /// Lowercase label, suitable for a class suffix.
    pub fn label(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Strong => "strong",
        }
    }

    fn from_score(score: u8) -> Self {
        match score {
            0..=2 => Self::Weak,
            3 => Self::Fair,
            4 => Self::Good,
            _ => Self::Strong,
        }
    }
}

// ---------------------------------------------------------------------------
// StrengthReport
// ---------------------------------------------------------------------------

/// Feedback line for a missing length criterion.
pub const FEEDBACK_LENGTH: &str = "Use at least 8 characters";
/// Feedback line for a missing uppercase criterion.
pub const FEEDBACK_UPPERCASE: &str = "Add an uppercase letter";
/// Feedback line for a missing lowercase criterion.
pub const FEEDBACK_LOWERCASE: &str = "Add a lowercase letter";
/// Feedback line for a missing digit criterion.
pub const FEEDBACK_DIGIT: &str = "Add a number";
/// Feedback line for a missing symbol criterion.
pub const FEEDBACK_SYMBOL: &str = "Add a symbol";

/// The full scoring outcome for one password value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthReport {
    /// Number of satisfied criteria, 0-5.
    pub score: u8,
    /// Level derived from the score.
    pub level: Strength,
    /// The missing criteria, in scoring order.
    pub feedback: Vec<&'static str>,
}

/// Score a password value.
pub fn password_strength(value: &str) -> StrengthReport {
    let criteria = [
        (value.chars().count() >= 8, FEEDBACK_LENGTH),
        (value.chars().any(|c| c.is_ascii_uppercase()), FEEDBACK_UPPERCASE),
        (value.chars().any(|c| c.is_ascii_lowercase()), FEEDBACK_LOWERCASE),
        (value.chars().any(|c| c.is_ascii_digit()), FEEDBACK_DIGIT),
        (value.chars().any(|c| !c.is_alphanumeric()), FEEDBACK_SYMBOL),
    ];

    let mut score = 0u8;
    let mut feedback = Vec::new();
    for (met, message) in criteria {
        if met {
            score += 1;
        } else {
            feedback.push(message);
        }
    }

    StrengthReport {
        score,
        level: Strength::from_score(score),
        feedback,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
