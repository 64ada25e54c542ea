//! Ui: the injected context bundle.
//!
//! One `Ui` is created at startup and passed by reference into every widget
//! factory. It bundles the document, the theme context, and the validation
//! manager — the three shared collaborators a component needs — replacing
//! implicit global state with explicit injection.

use crate::dom::Document;
use crate::theme::ThemeContext;
use crate::validate::ValidationManager;

/// Shared context bundle. Cheap to clone; all members are handles.
#[derive(Clone)]
pub struct Ui {
    document: Document,
    theme: ThemeContext,
    validation: ValidationManager,
}

impl Ui {
    /// Create a fresh document with a theme context (light preset) and
    /// validation manager over it.
    pub fn new() -> Self {
        let document = Document::new();
        let theme = ThemeContext::new(document.clone());
        let validation = ValidationManager::new(document.clone());
        Self {
            document,
            theme,
            validation,
        }
    }

    /// The element tree.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The theme store.
    pub fn theme(&self) -> &ThemeContext {
        &self.theme
    }

    /// The validation state tracker.
    pub fn validation(&self) -> &ValidationManager {
        &self.validation
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, ElementKind};
    use crate::theme::Theme;

    #[test]
    fn starts_with_empty_document_and_light_theme() {
        let ui = Ui::new();
        assert!(ui.document().is_empty());
        assert_eq!(*ui.theme().current(), Theme::light());
    }

    #[test]
    fn clones_share_state() {
        let ui = Ui::new();
        let clone = ui.clone();
        let el = ui.document().insert(Element::new(ElementKind::Container));
        assert!(clone.document().contains(el));
    }
}
