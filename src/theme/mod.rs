//! Theme data and the injected theme store.
//!
//! A [`Theme`] is an immutable record of colors, spacing, and animation
//! timing; the [`ThemeContext`] owns the current theme and an explicit
//! observer list, replacing the implicit global singleton pattern.

pub mod context;
pub mod theme;

pub use context::{ColorSchemeSource, SubscriptionId, ThemeContext, ThemeSpec};
pub use theme::{
    Animation, AnimationPatch, Preset, ShadowColors, ShadowColorsPatch, TextColors,
    TextColorsPatch, Theme, ThemePatch, UnknownPreset,
};
