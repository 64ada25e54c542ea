//! Field validation: pure rule evaluation, password-strength scoring, the
//! per-element state manager, and external-library adapters.

pub mod adapter;
pub mod engine;
pub mod manager;
pub mod rules;
pub mod strength;

pub use adapter::{
    async_adapter, detailed_adapter, evaluate_async, result_adapter, sync_adapter, AsyncRule,
    FALLBACK_MESSAGE,
};
pub use engine::{
    evaluate, max_length_message, min_length_message, ValidationResult, EMAIL_MESSAGE,
    REQUIRED_MESSAGE,
};
pub use manager::{ValidationManager, ERROR_MESSAGE_CLASS, INVALID_CLASS};
pub use rules::{CustomRule, Pattern, RuleSet, Rules};
pub use strength::{password_strength, Strength, StrengthReport};
