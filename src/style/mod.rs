//! Shared style computation: the soft-shadow formula and size variants.

pub mod shadow;
pub mod size;

pub use shadow::{active_css, hover_css, shadow_css, ShadowVariant};
pub use size::ControlSize;
