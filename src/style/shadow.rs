//! Soft-shadow computation: the one shared formula every widget uses.
//!
//! Raised surfaces cast a dark shadow down-right and a light one up-left;
//! inset surfaces cast the same pair inward. Hover scales intensity up,
//! pressing scales it down and inverts the variant (a pressed raised element
//! reads as inset, and vice versa).

use serde::Deserialize;

use crate::theme::Theme;

// ---------------------------------------------------------------------------
// ShadowVariant
// ---------------------------------------------------------------------------

/// Depth treatment of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowVariant {
    /// Protrudes from the surface.
    #[default]
    Raised,
    /// Recessed into the surface.
    Inset,
    /// No depth effect.
    Flat,
}

impl ShadowVariant {
    /// The variant produced by pressing this one.
    pub fn inverted(self) -> Self {
        match self {
            Self::Raised => Self::Inset,
            Self::Inset => Self::Raised,
            Self::Flat => Self::Flat,
        }
    }
}

// ---------------------------------------------------------------------------
// Shadow CSS
// ---------------------------------------------------------------------------

/// Intensity scale factor applied on hover.
pub const HOVER_SCALE: f32 = 1.2;
/// Intensity scale factor applied while pressed.
pub const ACTIVE_SCALE: f32 = 0.5;

/// Offset distance and blur radius for a given intensity.
fn geometry(intensity: f32) -> (i32, i32) {
    let distance = (5.0 * intensity).round().max(1.0) as i32;
    (distance, distance * 2)
}

/// The box-shadow value for a variant at the given intensity.
pub fn shadow_css(variant: ShadowVariant, intensity: f32, theme: &Theme) -> String {
    if variant == ShadowVariant::Flat || intensity <= 0.0 {
        return "none".to_owned();
    }
    let (d, blur) = geometry(intensity);
    let prefix = match variant {
        ShadowVariant::Inset => "inset ",
        _ => "",
    };
    format!(
        "{prefix}{d}px {d}px {blur}px {dark}, {prefix}-{d}px -{d}px {blur}px {light}",
        dark = theme.shadow.dark,
        light = theme.shadow.light,
    )
}

/// The box-shadow value while hovered: same variant, intensity scaled up.
pub fn hover_css(variant: ShadowVariant, intensity: f32, theme: &Theme) -> String {
    shadow_css(variant, intensity * HOVER_SCALE, theme)
}

/// The box-shadow value while pressed: intensity scaled down, variant
/// inverted.
pub fn active_css(variant: ShadowVariant, intensity: f32, theme: &Theme) -> String {
    shadow_css(variant.inverted(), intensity * ACTIVE_SCALE, theme)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn theme() -> Theme {
        Theme::light()
    }

    #[test]
    fn raised_has_dual_offsets() {
        let css = shadow_css(ShadowVariant::Raised, 1.0, &theme());
        assert_eq!(css, "5px 5px 10px #bebebe, -5px -5px 10px #ffffff");
    }

    #[test]
    fn inset_prefixes_both_shadows() {
        let css = shadow_css(ShadowVariant::Inset, 1.0, &theme());
        assert_eq!(css, "inset 5px 5px 10px #bebebe, inset -5px -5px 10px #ffffff");
    }

    #[test]
    fn flat_is_none() {
        assert_eq!(shadow_css(ShadowVariant::Flat, 1.0, &theme()), "none");
    }

    #[test]
    fn zero_intensity_is_none() {
        assert_eq!(shadow_css(ShadowVariant::Raised, 0.0, &theme()), "none");
    }

    #[test]
    fn intensity_scales_distance() {
        let css = shadow_css(ShadowVariant::Raised, 2.0, &theme());
        assert!(css.starts_with("10px 10px 20px"));
    }

    #[test]
    fn intensity_floors_at_one_pixel() {
        let css = shadow_css(ShadowVariant::Raised, 0.05, &theme());
        assert!(css.starts_with("1px 1px 2px"));
    }

    #[test]
    fn hover_scales_up_same_variant() {
        let css = hover_css(ShadowVariant::Raised, 1.0, &theme());
        // 5 * 1.2 = 6
        assert!(css.starts_with("6px 6px 12px"));
        assert!(!css.contains("inset"));
    }

    #[test]
    fn active_inverts_raised_to_inset() {
        let css = active_css(ShadowVariant::Raised, 1.0, &theme());
        // 5 * 0.5 = 2.5, rounds to 3
        assert!(css.starts_with("inset 3px 3px 6px"));
    }

    #[test]
    fn active_inverts_inset_to_raised() {
        let css = active_css(ShadowVariant::Inset, 1.0, &theme());
        assert!(!css.contains("inset"));
    }

    #[test]
    fn active_flat_stays_flat() {
        assert_eq!(active_css(ShadowVariant::Flat, 1.0, &theme()), "none");
    }

    #[test]
    fn inverted_roundtrip() {
        assert_eq!(ShadowVariant::Raised.inverted(), ShadowVariant::Inset);
        assert_eq!(ShadowVariant::Inset.inverted(), ShadowVariant::Raised);
        assert_eq!(ShadowVariant::Flat.inverted(), ShadowVariant::Flat);
    }

    #[test]
    fn deserializes_lowercase_names() {
        let v: ShadowVariant = serde_json::from_str("\"inset\"").unwrap();
        assert_eq!(v, ShadowVariant::Inset);
    }

    #[test]
    fn uses_theme_shadow_colors() {
        let css = shadow_css(ShadowVariant::Raised, 1.0, &Theme::dark());
        assert!(css.contains(&Theme::dark().shadow.dark));
        assert!(css.contains(&Theme::dark().shadow.light));
    }
}
