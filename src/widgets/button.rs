//! Button: a pressable soft-shadowed control with a loading state.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;

use crate::component::{Component, ComponentCore, ComponentError};
use crate::dom::{ElementId, ElementKind};
use crate::event::{EventKind, UiEvent};
use crate::style::{active_css, hover_css, shadow_css, ControlSize, ShadowVariant};
use crate::ui::Ui;

/// Class added to every button target.
pub const BUTTON_CLASS: &str = "nm-button";

/// Glyph shown in place of the label while loading.
const SPINNER_GLYPH: &str = "\u{27F3}";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Visual emphasis of the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    /// Accent-filled.
    #[default]
    Primary,
    /// Surface-colored.
    Secondary,
    /// Transparent, no depth.
    Ghost,
}

/// Full button configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonConfig {
    pub variant: ButtonVariant,
    pub size: ControlSize,
    pub disabled: bool,
}

/// Partial button reconfiguration.
#[derive(Debug, Clone, Default)]
pub struct ButtonPatch {
    pub variant: Option<ButtonVariant>,
    pub size: Option<ControlSize>,
    pub disabled: Option<bool>,
}

// ---------------------------------------------------------------------------
// Button
// ---------------------------------------------------------------------------

struct ButtonState {
    core: ComponentCore,
    config: ButtonConfig,
    hovered: bool,
    pressed: bool,
    loading: bool,
    saved_label: Option<String>,
}

/// A button element with pointer-driven depth feedback and an exclusive
/// loading state that swaps the label for a spinner.
pub struct Button {
    state: Rc<RefCell<ButtonState>>,
}

impl Button {
    /// Attach a button to a button element.
    pub fn new(ui: &Ui, element: ElementId, config: ButtonConfig) -> Result<Self, ComponentError> {
        let core = ComponentCore::attach(ui, element, "Button", "button", |k| {
            matches!(k, ElementKind::Button)
        })?;

        let state = Rc::new(RefCell::new(ButtonState {
            core,
            config,
            hovered: false,
            pressed: false,
            loading: false,
            saved_label: None,
        }));
        {
            let mut s = state.borrow_mut();
            s.core.add_class(BUTTON_CLASS);
            let disabled = s.config.disabled;
            s.core.document().set_disabled(s.core.element(), disabled);
        }

        let weak = Rc::downgrade(&state);
        let sub = ui.theme().subscribe(move |_| {
            if let Some(state) = weak.upgrade() {
                Self::repaint(&state.borrow());
            }
        });
        state.borrow_mut().core.set_theme_subscription(sub);

        for (kind, action) in [
            (EventKind::PointerEnter, PointerAction::Enter),
            (EventKind::PointerLeave, PointerAction::Leave),
            (EventKind::PointerDown, PointerAction::Down),
            (EventKind::PointerUp, PointerAction::Up),
        ] {
            let weak = Rc::downgrade(&state);
            state.borrow_mut().core.listen(element, kind, move |_| {
                if let Some(state) = weak.upgrade() {
                    let mut s = state.borrow_mut();
                    match action {
                        PointerAction::Enter => s.hovered = true,
                        PointerAction::Leave => {
                            s.hovered = false;
                            s.pressed = false;
                        }
                        PointerAction::Down => s.pressed = true,
                        PointerAction::Up => s.pressed = false,
                    }
                    Self::repaint(&s);
                }
            });
        }

        Self::repaint(&state.borrow());
        Ok(Self { state })
    }

    fn repaint(state: &ButtonState) {
        if state.core.is_destroyed() {
            return;
        }
        let theme = state.core.theme();
        let doc = state.core.document();
        let el = state.core.element();

        state.core.apply_base_style();
        doc.set_style(el, "padding", state.config.size.padding_css(&theme));
        if !doc.disabled(el) {
            doc.set_style(el, "cursor", "pointer");
        } else {
            doc.remove_style(el, "cursor");
        }

        match state.config.variant {
            ButtonVariant::Primary => {
                doc.set_style(el, "background-color", &theme.accent);
                doc.set_style(el, "color", "#ffffff");
            }
            ButtonVariant::Secondary => {
                doc.set_style(el, "background-color", &theme.surface);
                doc.set_style(el, "color", &theme.text.primary);
            }
            ButtonVariant::Ghost => {
                doc.set_style(el, "background-color", "transparent");
                doc.set_style(el, "color", &theme.text.primary);
            }
        }

        let rest = match state.config.variant {
            ButtonVariant::Ghost => ShadowVariant::Flat,
            _ => ShadowVariant::Raised,
        };
        let interactive = !doc.disabled(el) && !state.loading;
        let shadow = if state.pressed && interactive {
            active_css(rest, theme.intensity, &theme)
        } else if state.hovered && interactive {
            hover_css(rest, theme.intensity, &theme)
        } else {
            shadow_css(rest, theme.intensity, &theme)
        };
        doc.set_style(el, "box-shadow", shadow);
    }

    /// Enter or leave the loading state.
    ///
    /// Entering saves the current label, shows the spinner, and disables the
    /// button. Leaving restores the exact saved label and the configured
    /// disabled state.
    pub fn set_loading(&self, loading: bool) {
        {
            let mut state = self.state.borrow_mut();
            if state.core.is_destroyed() {
                tracing::warn!("Button: set_loading after destroy ignored");
                return;
            }
            if state.loading == loading {
                return;
            }
            state.loading = loading;
            let doc = state.core.document().clone();
            let el = state.core.element();
            if loading {
                state.saved_label = Some(doc.text(el));
                doc.set_text(el, SPINNER_GLYPH);
                doc.set_attr(el, "aria-busy", "true");
                doc.set_disabled(el, true);
            } else {
                if let Some(label) = state.saved_label.take() {
                    doc.set_text(el, label);
                }
                doc.remove_attr(el, "aria-busy");
                doc.set_disabled(el, state.config.disabled);
            }
            state.core.sync_disabled();
        }
        Self::repaint(&self.state.borrow());
    }

    /// Whether the button is in the loading state.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    /// Activate the button. Ignored while loading, disabled, or destroyed.
    pub fn click(&self) {
        let (doc, el) = {
            let state = self.state.borrow();
            if state.core.is_destroyed() || state.loading {
                return;
            }
            let doc = state.core.document().clone();
            let el = state.core.element();
            if doc.disabled(el) {
                return;
            }
            (doc, el)
        };
        doc.dispatch(el, UiEvent::Click);
    }

    /// Switch the visual emphasis.
    pub fn set_variant(&self, variant: ButtonVariant) {
        self.update(ButtonPatch {
            variant: Some(variant),
            ..ButtonPatch::default()
        });
    }

    /// Switch the size.
    pub fn set_size(&self, size: ControlSize) {
        self.update(ButtonPatch {
            size: Some(size),
            ..ButtonPatch::default()
        });
    }
}

#[derive(Clone, Copy)]
enum PointerAction {
    Enter,
    Leave,
    Down,
    Up,
}

impl Component for Button {
    type Patch = ButtonPatch;

    fn element(&self) -> ElementId {
        self.state.borrow().core.element()
    }

    fn is_destroyed(&self) -> bool {
        self.state.borrow().core.is_destroyed()
    }

    fn update(&self, patch: ButtonPatch) {
        {
            let mut state = self.state.borrow_mut();
            if state.core.is_destroyed() {
                tracing::warn!("Button: update after destroy ignored");
                return;
            }
            if let Some(variant) = patch.variant {
                state.config.variant = variant;
            }
            if let Some(size) = patch.size {
                state.config.size = size;
            }
            if let Some(disabled) = patch.disabled {
                state.config.disabled = disabled;
                if !state.loading {
                    let doc = state.core.document().clone();
                    doc.set_disabled(state.core.element(), disabled);
                    state.core.sync_disabled();
                }
            }
        }
        Self::repaint(&self.state.borrow());
    }

    fn destroy(&self) {
        let torn_down = {
            let mut state = self.state.borrow_mut();
            // A loading button gets its label and disabled flag back before
            // the unwind.
            if state.loading {
                state.loading = false;
                let doc = state.core.document().clone();
                let el = state.core.element();
                if let Some(label) = state.saved_label.take() {
                    doc.set_text(el, label);
                }
                doc.remove_attr(el, "aria-busy");
                doc.set_disabled(el, state.config.disabled);
            }
            state.core.teardown()
        };
        if torn_down {
            let (doc, el) = {
                let state = self.state.borrow();
                (state.core.document().clone(), state.core.element())
            };
            doc.dispatch(el, UiEvent::Destroyed);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use std::cell::Cell;

    fn setup() -> (Ui, ElementId) {
        let ui = Ui::new();
        let root = ui.document().insert(Element::new(ElementKind::Container));
        let el = ui
            .document()
            .insert_child(
                root,
                Element::new(ElementKind::Button).with_text("Submit"),
            )
            .unwrap();
        (ui, el)
    }

    #[test]
    fn rejects_non_button_target() {
        let ui = Ui::new();
        let el = ui.document().insert(Element::new(ElementKind::Container));
        assert!(Button::new(&ui, el, ButtonConfig::default()).is_err());
    }

    #[test]
    fn primary_paints_accent_fill() {
        let (ui, el) = setup();
        let _button = Button::new(&ui, el, ButtonConfig::default()).unwrap();
        let theme = ui.theme().current();
        assert_eq!(
            ui.document().style(el, "background-color").as_deref(),
            Some(theme.accent.as_str())
        );
        assert_eq!(
            ui.document().style(el, "box-shadow"),
            Some(shadow_css(ShadowVariant::Raised, theme.intensity, &theme))
        );
    }

    #[test]
    fn ghost_is_flat_and_transparent() {
        let (ui, el) = setup();
        let config = ButtonConfig {
            variant: ButtonVariant::Ghost,
            ..ButtonConfig::default()
        };
        let _button = Button::new(&ui, el, config).unwrap();
        assert_eq!(
            ui.document().style(el, "background-color").as_deref(),
            Some("transparent")
        );
        assert_eq!(ui.document().style(el, "box-shadow").as_deref(), Some("none"));
    }

    #[test]
    fn pointer_feedback_cycles_shadows() {
        let (ui, el) = setup();
        let _button = Button::new(&ui, el, ButtonConfig::default()).unwrap();
        let theme = ui.theme().current();

        ui.document().dispatch(el, UiEvent::PointerEnter);
        assert_eq!(
            ui.document().style(el, "box-shadow"),
            Some(hover_css(ShadowVariant::Raised, theme.intensity, &theme))
        );

        ui.document().dispatch(el, UiEvent::PointerDown);
        assert_eq!(
            ui.document().style(el, "box-shadow"),
            Some(active_css(ShadowVariant::Raised, theme.intensity, &theme))
        );

        ui.document().dispatch(el, UiEvent::PointerUp);
        assert_eq!(
            ui.document().style(el, "box-shadow"),
            Some(hover_css(ShadowVariant::Raised, theme.intensity, &theme))
        );

        ui.document().dispatch(el, UiEvent::PointerLeave);
        assert_eq!(
            ui.document().style(el, "box-shadow"),
            Some(shadow_css(ShadowVariant::Raised, theme.intensity, &theme))
        );
    }

    #[test]
    fn click_dispatches_click_event() {
        let (ui, el) = setup();
        let button = Button::new(&ui, el, ButtonConfig::default()).unwrap();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        ui.document()
            .add_listener(el, EventKind::Click, move |_| c.set(c.get() + 1));
        button.click();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn click_ignored_while_disabled() {
        let (ui, el) = setup();
        let config = ButtonConfig {
            disabled: true,
            ..ButtonConfig::default()
        };
        let button = Button::new(&ui, el, config).unwrap();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        ui.document()
            .add_listener(el, EventKind::Click, move |_| c.set(c.get() + 1));
        button.click();
        assert_eq!(count.get(), 0);
        assert_eq!(ui.document().attr(el, "aria-disabled").as_deref(), Some("true"));
    }

    #[test]
    fn loading_swaps_label_and_disables() {
        let (ui, el) = setup();
        let button = Button::new(&ui, el, ButtonConfig::default()).unwrap();
        button.set_loading(true);
        assert!(button.is_loading());
        assert_eq!(ui.document().text(el), SPINNER_GLYPH);
        assert_eq!(ui.document().attr(el, "aria-busy").as_deref(), Some("true"));
        assert!(ui.document().disabled(el));

        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        ui.document()
            .add_listener(el, EventKind::Click, move |_| c.set(c.get() + 1));
        button.click();
        assert_eq!(count.get(), 0);

        button.set_loading(false);
        assert_eq!(ui.document().text(el), "Submit");
        assert!(ui.document().attr(el, "aria-busy").is_none());
        assert!(!ui.document().disabled(el));
        button.click();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn loading_restores_exact_label() {
        let (ui, el) = setup();
        ui.document().set_text(el, "  Pay \u{20AC}10  ");
        let button = Button::new(&ui, el, ButtonConfig::default()).unwrap();
        button.set_loading(true);
        button.set_loading(false);
        assert_eq!(ui.document().text(el), "  Pay \u{20AC}10  ");
    }

    #[test]
    fn redundant_loading_writes_are_noops() {
        let (ui, el) = setup();
        let button = Button::new(&ui, el, ButtonConfig::default()).unwrap();
        button.set_loading(true);
        button.set_loading(true);
        button.set_loading(false);
        assert_eq!(ui.document().text(el), "Submit");
    }

    #[test]
    fn destroy_while_loading_restores_label_and_disabled_state() {
        let (ui, el) = setup();
        let button = Button::new(&ui, el, ButtonConfig::default()).unwrap();
        button.set_loading(true);
        assert!(ui.document().disabled(el));
        button.destroy();
        assert_eq!(ui.document().text(el), "Submit");
        assert!(ui.document().attr(el, "aria-busy").is_none());
        assert!(!ui.document().disabled(el));
        assert!(!ui.document().has_class(el, BUTTON_CLASS));
    }

    #[test]
    fn set_variant_repaints() {
        let (ui, el) = setup();
        let button = Button::new(&ui, el, ButtonConfig::default()).unwrap();
        button.set_variant(ButtonVariant::Ghost);
        assert_eq!(ui.document().style(el, "box-shadow").as_deref(), Some("none"));
    }

    #[test]
    fn update_disabled_respects_loading() {
        let (ui, el) = setup();
        let button = Button::new(&ui, el, ButtonConfig::default()).unwrap();
        button.set_loading(true);
        button.update(ButtonPatch {
            disabled: Some(false),
            ..ButtonPatch::default()
        });
        // Still disabled while loading; configured state applies after.
        assert!(ui.document().disabled(el));
        button.set_loading(false);
        assert!(!ui.document().disabled(el));
    }

    #[test]
    fn config_deserializes_lowercase_variant() {
        let config: ButtonConfig =
            serde_json::from_str(r#"{"variant":"ghost","size":"lg"}"#).unwrap();
        assert_eq!(config.variant, ButtonVariant::Ghost);
        assert_eq!(config.size, ControlSize::Lg);
    }
}
