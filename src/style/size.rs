//! Size variants shared by widgets, resolved against theme spacing.

use serde::Deserialize;

use crate::theme::Theme;

/// Control size variant. Padding and visual dimensions scale from the
/// theme's base spacing unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlSize {
    Sm,
    #[default]
    Md,
    Lg,
}

impl ControlSize {
    /// Multiplier over the theme's base spacing.
    pub fn factor(self) -> f32 {
        match self {
            Self::Sm => 0.5,
            Self::Md => 1.0,
            Self::Lg => 1.5,
        }
    }

    /// Padding in pixels for this size under a theme.
    pub fn padding_px(self, theme: &Theme) -> i32 {
        (theme.spacing * self.factor()).round() as i32
    }

    /// The padding style value for this size under a theme.
    pub fn padding_css(self, theme: &Theme) -> String {
        format!("{}px", self.padding_px(theme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factors_are_ordered() {
        assert!(ControlSize::Sm.factor() < ControlSize::Md.factor());
        assert!(ControlSize::Md.factor() < ControlSize::Lg.factor());
    }

    #[test]
    fn padding_scales_with_theme_spacing() {
        let theme = Theme::light(); // spacing 16
        assert_eq!(ControlSize::Sm.padding_css(&theme), "8px");
        assert_eq!(ControlSize::Md.padding_css(&theme), "16px");
        assert_eq!(ControlSize::Lg.padding_css(&theme), "24px");
    }

    #[test]
    fn default_is_md() {
        assert_eq!(ControlSize::default(), ControlSize::Md);
    }

    #[test]
    fn deserializes_lowercase() {
        let size: ControlSize = serde_json::from_str("\"lg\"").unwrap();
        assert_eq!(size, ControlSize::Lg);
    }
}
