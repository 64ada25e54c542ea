//! Theme data: colors, shadows, spacing, animation, presets, deep merge.

use std::str::FromStr;

// ---------------------------------------------------------------------------
// Sub-records
// ---------------------------------------------------------------------------

/// The paired offset-shadow colors that produce the soft-surface effect.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowColors {
    /// Highlight shadow (cast toward the light source).
    pub light: String,
    /// Occlusion shadow (cast away from the light source).
    pub dark: String,
}

/// Text colors.
#[derive(Debug, Clone, PartialEq)]
pub struct TextColors {
    /// Primary foreground color.
    pub primary: String,
    /// Secondary/muted foreground color.
    pub secondary: String,
}

/// Transition timing for state changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    /// Duration in milliseconds.
    pub duration_ms: u32,
    /// Easing function name.
    pub easing: String,
}

impl Animation {
    /// The transition value applied to styled elements.
    pub fn transition_css(&self) -> String {
        format!(
            "box-shadow {ms}ms {ease}, background-color {ms}ms {ease}, transform {ms}ms {ease}",
            ms = self.duration_ms,
            ease = self.easing
        )
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// A complete visual theme. Immutable once assigned; replaced, never edited
/// in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Shared surface color elements appear raised from or pressed into.
    pub surface: String,
    /// Offset-shadow color pair.
    pub shadow: ShadowColors,
    /// Text colors.
    pub text: TextColors,
    /// Accent color (focus rings, active toggles).
    pub accent: String,
    /// Error color.
    pub error: String,
    /// Success color.
    pub success: String,
    /// Corner radius.
    pub radius: String,
    /// Base spacing unit in pixels. Size variants scale from this.
    pub spacing: f32,
    /// Shadow intensity multiplier.
    pub intensity: f32,
    /// Transition timing.
    pub animation: Animation,
}

impl Theme {
    /// The built-in light preset. This is the theme at startup.
    pub fn light() -> Self {
        Self {
            surface: "#e0e0e0".into(),
            shadow: ShadowColors {
                light: "#ffffff".into(),
                dark: "#bebebe".into(),
            },
            text: TextColors {
                primary: "#333333".into(),
                secondary: "#666666".into(),
            },
            accent: "#6c63ff".into(),
            error: "#e53e3e".into(),
            success: "#38a169".into(),
            radius: "12px".into(),
            spacing: 16.0,
            intensity: 1.0,
            animation: Animation {
                duration_ms: 200,
                easing: "ease".into(),
            },
        }
    }

    /// The built-in dark preset.
    pub fn dark() -> Self {
        Self {
            surface: "#2e2e2e".into(),
            shadow: ShadowColors {
                light: "#3a3a3a".into(),
                dark: "#242424".into(),
            },
            text: TextColors {
                primary: "#e0e0e0".into(),
                secondary: "#a0a0a0".into(),
            },
            accent: "#8a7fff".into(),
            error: "#fc8181".into(),
            success: "#68d391".into(),
            radius: "12px".into(),
            spacing: 16.0,
            intensity: 0.8,
            animation: Animation {
                duration_ms: 200,
                easing: "ease".into(),
            },
        }
    }

    /// Resolve a preset to its theme.
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Light => Self::light(),
            Preset::Dark => Self::dark(),
        }
    }

    /// A new theme with `patch` merged over `self`.
    ///
    /// The nested shadow and animation sub-records merge field-wise: a patch
    /// touching only `shadow.dark` keeps the sibling `shadow.light`.
    pub fn merged(&self, patch: &ThemePatch) -> Self {
        let mut theme = self.clone();
        if let Some(surface) = &patch.surface {
            theme.surface = surface.clone();
        }
        if let Some(shadow) = &patch.shadow {
            if let Some(light) = &shadow.light {
                theme.shadow.light = light.clone();
            }
            if let Some(dark) = &shadow.dark {
                theme.shadow.dark = dark.clone();
            }
        }
        if let Some(text) = &patch.text {
            if let Some(primary) = &text.primary {
                theme.text.primary = primary.clone();
            }
            if let Some(secondary) = &text.secondary {
                theme.text.secondary = secondary.clone();
            }
        }
        if let Some(accent) = &patch.accent {
            theme.accent = accent.clone();
        }
        if let Some(error) = &patch.error {
            theme.error = error.clone();
        }
        if let Some(success) = &patch.success {
            theme.success = success.clone();
        }
        if let Some(radius) = &patch.radius {
            theme.radius = radius.clone();
        }
        if let Some(spacing) = patch.spacing {
            theme.spacing = spacing;
        }
        if let Some(intensity) = patch.intensity {
            theme.intensity = intensity;
        }
        if let Some(animation) = &patch.animation {
            if let Some(duration_ms) = animation.duration_ms {
                theme.animation.duration_ms = duration_ms;
            }
            if let Some(easing) = &animation.easing {
                theme.animation.easing = easing.clone();
            }
        }
        theme
    }
}

// ---------------------------------------------------------------------------
// ThemePatch
// ---------------------------------------------------------------------------

/// A partial theme overlay for [`Theme::merged`]. All fields optional.
#[derive(Debug, Clone, Default)]
pub struct ThemePatch {
    pub surface: Option<String>,
    pub shadow: Option<ShadowColorsPatch>,
    pub text: Option<TextColorsPatch>,
    pub accent: Option<String>,
    pub error: Option<String>,
    pub success: Option<String>,
    pub radius: Option<String>,
    pub spacing: Option<f32>,
    pub intensity: Option<f32>,
    pub animation: Option<AnimationPatch>,
}

/// Partial overlay for [`ShadowColors`].
#[derive(Debug, Clone, Default)]
pub struct ShadowColorsPatch {
    pub light: Option<String>,
    pub dark: Option<String>,
}

/// Partial overlay for [`TextColors`].
#[derive(Debug, Clone, Default)]
pub struct TextColorsPatch {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

/// Partial overlay for [`Animation`].
#[derive(Debug, Clone, Default)]
pub struct AnimationPatch {
    pub duration_ms: Option<u32>,
    pub easing: Option<String>,
}

// ---------------------------------------------------------------------------
// Preset
// ---------------------------------------------------------------------------

/// Named built-in themes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    Light,
    Dark,
}

/// Error for an unrecognized preset name.
#[derive(Debug, thiserror::Error)]
#[error("unknown theme preset: {0:?}")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(UnknownPreset(other.to_owned())),
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
