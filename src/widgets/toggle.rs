//! Toggle: a styled stand-in for a native checkbox or radio control.
//!
//! The native element stays in the tree as the source of truth for checked
//! state (and form submission); the widget wraps it, hides it visually, and
//! renders a themed visual that tracks it. State flows one way: writes go to
//! the native element, a `Change` dispatch syncs the visual and announces
//! the new state as `Toggled`.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;

use crate::component::{Component, ComponentCore, ComponentError};
use crate::dom::{Element, ElementId, ElementKind};
use crate::event::{EventKind, UiEvent};
use crate::style::{shadow_css, ControlSize, ShadowVariant};
use crate::ui::Ui;

/// Class on the wrapper container.
pub const WRAPPER_CLASS: &str = "nm-toggle";
/// Class on the rendered visual.
pub const VISUAL_CLASS: &str = "nm-toggle-visual";
/// Class present on the visual while checked.
pub const CHECKED_CLASS: &str = "nm-checked";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Visual treatment of the toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleStyle {
    /// Sliding switch track.
    #[default]
    Switch,
    /// Square with a checkmark glyph.
    Checkmark,
    /// Round with an inner dot.
    Dot,
}

/// Full toggle configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToggleConfig {
    pub style: ToggleStyle,
    pub size: ControlSize,
}

/// Partial toggle reconfiguration.
#[derive(Debug, Clone, Default)]
pub struct TogglePatch {
    pub style: Option<ToggleStyle>,
    pub size: Option<ControlSize>,
}

// ---------------------------------------------------------------------------
// Toggle
// ---------------------------------------------------------------------------

struct ToggleState {
    core: ComponentCore,
    config: ToggleConfig,
    visual: ElementId,
}

/// A themed checkbox/radio replacement. Radio targets get group
/// exclusivity: checking one unchecks its named siblings.
pub struct Toggle {
    state: Rc<RefCell<ToggleState>>,
}

impl Toggle {
    /// Attach a toggle to a checkbox or radio element.
    pub fn new(ui: &Ui, element: ElementId, config: ToggleConfig) -> Result<Self, ComponentError> {
        let mut core = ComponentCore::attach(ui, element, "Toggle", "checkbox or radio", |k| {
            k.is_checkable()
        })?;
        let doc = core.document().clone();

        let mount = doc
            .wrap(element, Element::new(ElementKind::Container).with_class(WRAPPER_CLASS))
            .expect("attached element must be in the document");
        let wrapper = mount.wrapper;
        let visual = doc
            .insert_child(wrapper, Element::new(ElementKind::Container).with_class(VISUAL_CLASS))
            .expect("wrapper must be in the document");
        core.set_mount(mount);

        // The native control keeps working invisibly underneath the visual.
        doc.set_style(element, "position", "absolute");
        doc.set_style(element, "opacity", "0");

        let state = Rc::new(RefCell::new(ToggleState { core, config, visual }));

        // Native state changes repaint the visual and announce the toggle.
        let weak = Rc::downgrade(&state);
        state.borrow_mut().core.listen(element, EventKind::Change, move |_| {
            let Some(state) = weak.upgrade() else { return };
            let (doc, el, checked) = {
                let s = state.borrow();
                Self::sync_visual(&s);
                let doc = s.core.document().clone();
                let el = s.core.element();
                (doc.clone(), el, doc.checked(el))
            };
            doc.dispatch(el, UiEvent::Toggled { checked });
        });

        // Clicking the visual flips the native control.
        let weak = Rc::downgrade(&state);
        state.borrow_mut().core.listen(visual, EventKind::Click, move |_| {
            let Some(state) = weak.upgrade() else { return };
            let flip = {
                let s = state.borrow();
                !s.core.document().disabled(s.core.element())
            };
            if flip {
                let checked = {
                    let s = state.borrow();
                    s.core.document().checked(s.core.element())
                };
                Self::write_checked(&state, !checked);
            }
        });

        let weak = Rc::downgrade(&state);
        let sub = ui.theme().subscribe(move |_| {
            if let Some(state) = weak.upgrade() {
                Self::sync_visual(&state.borrow());
            }
        });
        state.borrow_mut().core.set_theme_subscription(sub);

        Self::sync_visual(&state.borrow());
        Ok(Self { state })
    }

    fn sync_visual(state: &ToggleState) {
        if state.core.is_destroyed() {
            return;
        }
        let theme = state.core.theme();
        let doc = state.core.document();
        let el = state.core.element();
        let visual = state.visual;
        let checked = doc.checked(el);
        let factor = state.config.size.factor();

        let (width, height) = match state.config.style {
            ToggleStyle::Switch => (40.0 * factor, 20.0 * factor),
            ToggleStyle::Checkmark | ToggleStyle::Dot => (20.0 * factor, 20.0 * factor),
        };
        doc.set_style(visual, "width", format!("{}px", width.round() as i32));
        doc.set_style(visual, "height", format!("{}px", height.round() as i32));
        doc.set_style(
            visual,
            "border-radius",
            match state.config.style {
                ToggleStyle::Checkmark => theme.radius.clone(),
                _ => "999px".to_owned(),
            },
        );
        doc.set_style(visual, "transition", theme.animation.transition_css());

        if checked {
            doc.add_class(visual, CHECKED_CLASS);
            doc.set_style(visual, "background-color", &theme.accent);
            doc.set_style(
                visual,
                "box-shadow",
                shadow_css(ShadowVariant::Raised, theme.intensity, &theme),
            );
        } else {
            doc.remove_class(visual, CHECKED_CLASS);
            doc.set_style(visual, "background-color", &theme.surface);
            doc.set_style(
                visual,
                "box-shadow",
                shadow_css(ShadowVariant::Inset, theme.intensity, &theme),
            );
        }
        let glyph = match (state.config.style, checked) {
            (ToggleStyle::Checkmark, true) => "\u{2713}",
            (ToggleStyle::Dot, true) => "\u{2022}",
            _ => "",
        };
        doc.set_text(visual, glyph);
    }

    /// Write a checked state to the native control, keeping radio groups
    /// exclusive, and dispatch `Change` so every attached widget repaints.
    fn write_checked(state: &Rc<RefCell<ToggleState>>, checked: bool) {
        let (doc, el, siblings) = {
            let s = state.borrow();
            if s.core.is_destroyed() {
                tracing::warn!("Toggle: state change after destroy ignored");
                return;
            }
            let doc = s.core.document().clone();
            let el = s.core.element();
            if doc.checked(el) == checked {
                return;
            }
            let mut siblings = Vec::new();
            if checked && doc.kind(el) == Some(ElementKind::Radio) {
                if let Some(name) = doc.attr(el, "name") {
                    siblings = doc
                        .radio_group(&name)
                        .into_iter()
                        .filter(|&other| other != el && doc.checked(other))
                        .collect();
                }
            }
            (doc, el, siblings)
        };
        for other in siblings {
            doc.set_checked(other, false);
            doc.dispatch(other, UiEvent::Change);
        }
        doc.set_checked(el, checked);
        doc.dispatch(el, UiEvent::Change);
    }

    /// Flip the checked state.
    pub fn toggle(&self) {
        let checked = self.is_checked();
        Self::write_checked(&self.state, !checked);
    }

    /// Set the checked state.
    pub fn set_checked(&self, checked: bool) {
        Self::write_checked(&self.state, checked);
    }

    /// Check the control.
    pub fn check(&self) {
        self.set_checked(true);
    }

    /// Uncheck the control.
    pub fn uncheck(&self) {
        self.set_checked(false);
    }

    /// The native control's checked state.
    pub fn is_checked(&self) -> bool {
        let state = self.state.borrow();
        state.core.document().checked(state.core.element())
    }

    /// The rendered visual element.
    pub fn visual(&self) -> ElementId {
        self.state.borrow().visual
    }
}

impl Component for Toggle {
    type Patch = TogglePatch;

    fn element(&self) -> ElementId {
        self.state.borrow().core.element()
    }

    fn is_destroyed(&self) -> bool {
        self.state.borrow().core.is_destroyed()
    }

    fn update(&self, patch: TogglePatch) {
        {
            let mut state = self.state.borrow_mut();
            if state.core.is_destroyed() {
                tracing::warn!("Toggle: update after destroy ignored");
                return;
            }
            if let Some(style) = patch.style {
                state.config.style = style;
            }
            if let Some(size) = patch.size {
                state.config.size = size;
            }
        }
        Self::sync_visual(&self.state.borrow());
    }

    fn destroy(&self) {
        let torn_down = self.state.borrow_mut().core.teardown();
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
    use std::cell::Cell;

    fn setup(kind: ElementKind) -> (Ui, ElementId, ElementId) {
        let ui = Ui::new();
        let root = ui.document().insert(Element::new(ElementKind::Container));
        let el = ui.document().insert_child(root, Element::new(kind)).unwrap();
        (ui, root, el)
    }

    #[test]
    fn rejects_non_checkable_target() {
        let ui = Ui::new();
        let el = ui.document().insert(Element::new(ElementKind::TextInput));
        assert!(Toggle::new(&ui, el, ToggleConfig::default()).is_err());
    }

    #[test]
    fn wraps_and_hides_native_control() {
        let (ui, root, el) = setup(ElementKind::Checkbox);
        let toggle = Toggle::new(&ui, el, ToggleConfig::default()).unwrap();
        let wrapper = ui.document().parent(el).unwrap();
        assert!(ui.document().has_class(wrapper, WRAPPER_CLASS));
        assert_eq!(ui.document().parent(wrapper), Some(root));
        assert_eq!(ui.document().style(el, "opacity").as_deref(), Some("0"));
        assert!(ui.document().has_class(toggle.visual(), VISUAL_CLASS));
    }

    #[test]
    fn check_uncheck_round_trip() {
        let (ui, _, el) = setup(ElementKind::Checkbox);
        let toggle = Toggle::new(&ui, el, ToggleConfig::default()).unwrap();
        assert!(!toggle.is_checked());

        toggle.check();
        assert!(toggle.is_checked());
        assert!(ui.document().checked(el));
        assert!(ui.document().has_class(toggle.visual(), CHECKED_CLASS));

        toggle.uncheck();
        assert!(!toggle.is_checked());
        assert!(!ui.document().has_class(toggle.visual(), CHECKED_CLASS));
    }

    #[test]
    fn toggled_event_carries_state() {
        let (ui, _, el) = setup(ElementKind::Checkbox);
        let toggle = Toggle::new(&ui, el, ToggleConfig::default()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        ui.document().add_listener(el, EventKind::Toggled, move |ctx| {
            if let UiEvent::Toggled { checked } = ctx.event {
                s.borrow_mut().push(*checked);
            }
        });
        toggle.toggle();
        toggle.toggle();
        toggle.check();
        toggle.check(); // no-op: no event
        assert_eq!(*seen.borrow(), vec![true, false, true]);
    }

    #[test]
    fn native_change_syncs_visual() {
        let (ui, _, el) = setup(ElementKind::Checkbox);
        let toggle = Toggle::new(&ui, el, ToggleConfig::default()).unwrap();
        // Host-driven state write, announced with a Change dispatch.
        ui.document().set_checked(el, true);
        ui.document().dispatch(el, UiEvent::Change);
        assert!(ui.document().has_class(toggle.visual(), CHECKED_CLASS));
    }

    #[test]
    fn visual_click_flips_state() {
        let (ui, _, el) = setup(ElementKind::Checkbox);
        let toggle = Toggle::new(&ui, el, ToggleConfig::default()).unwrap();
        ui.document().dispatch(toggle.visual(), UiEvent::Click);
        assert!(toggle.is_checked());
    }

    #[test]
    fn visual_click_ignored_when_disabled() {
        let (ui, _, el) = setup(ElementKind::Checkbox);
        let toggle = Toggle::new(&ui, el, ToggleConfig::default()).unwrap();
        ui.document().set_disabled(el, true);
        ui.document().dispatch(toggle.visual(), UiEvent::Click);
        assert!(!toggle.is_checked());
    }

    #[test]
    fn radio_group_is_exclusive() {
        let ui = Ui::new();
        let root = ui.document().insert(Element::new(ElementKind::Container));
        let radio = |checked| {
            let el = ui
                .document()
                .insert_child(
                    root,
                    Element::new(ElementKind::Radio).with_attr("name", "plan"),
                )
                .unwrap();
            ui.document().set_checked(el, checked);
            el
        };
        let first = radio(true);
        let second = radio(false);
        let t1 = Toggle::new(&ui, first, ToggleConfig::default()).unwrap();
        let t2 = Toggle::new(&ui, second, ToggleConfig::default()).unwrap();

        t2.check();
        assert!(t2.is_checked());
        assert!(!t1.is_checked());
        // The displaced radio's visual repainted too.
        assert!(!ui.document().has_class(t1.visual(), CHECKED_CLASS));
        assert!(ui.document().has_class(t2.visual(), CHECKED_CLASS));
    }

    #[test]
    fn unchecking_a_radio_does_not_touch_siblings() {
        let ui = Ui::new();
        let root = ui.document().insert(Element::new(ElementKind::Container));
        let a = ui
            .document()
            .insert_child(root, Element::new(ElementKind::Radio).with_attr("name", "g"))
            .unwrap();
        let b = ui
            .document()
            .insert_child(root, Element::new(ElementKind::Radio).with_attr("name", "g"))
            .unwrap();
        let ta = Toggle::new(&ui, a, ToggleConfig::default()).unwrap();
        let _tb = Toggle::new(&ui, b, ToggleConfig::default()).unwrap();
        ui.document().set_checked(b, true);

        ta.check();
        ta.uncheck();
        assert!(!ui.document().checked(a));
        // b was displaced by ta.check(); uncheck must not re-check anything.
        assert!(!ui.document().checked(b));
    }

    #[test]
    fn checkmark_style_renders_glyph() {
        let (ui, _, el) = setup(ElementKind::Checkbox);
        let config = ToggleConfig {
            style: ToggleStyle::Checkmark,
            ..ToggleConfig::default()
        };
        let toggle = Toggle::new(&ui, el, config).unwrap();
        toggle.check();
        assert_eq!(ui.document().text(toggle.visual()), "\u{2713}");
        toggle.uncheck();
        assert_eq!(ui.document().text(toggle.visual()), "");
    }

    #[test]
    fn size_scales_visual() {
        let (ui, _, el) = setup(ElementKind::Checkbox);
        let config = ToggleConfig {
            size: ControlSize::Lg,
            ..ToggleConfig::default()
        };
        let toggle = Toggle::new(&ui, el, config).unwrap();
        assert_eq!(ui.document().style(toggle.visual(), "width").as_deref(), Some("60px"));
        assert_eq!(ui.document().style(toggle.visual(), "height").as_deref(), Some("30px"));
    }

    #[test]
    fn destroy_restores_native_control() {
        let (ui, root, el) = setup(ElementKind::Checkbox);
        let len_before = ui.document().len();
        let toggle = Toggle::new(&ui, el, ToggleConfig::default()).unwrap();
        toggle.check();
        let visual = toggle.visual();

        let destroyed = Rc::new(Cell::new(false));
        let d = destroyed.clone();
        ui.document()
            .add_listener(el, EventKind::Destroyed, move |_| d.set(true));

        toggle.destroy();
        assert!(destroyed.get());
        assert!(!ui.document().contains(visual));
        assert_eq!(ui.document().parent(el), Some(root));
        assert_eq!(ui.document().len(), len_before);
        // Inline hiding styles reverted; checked state is the host's to keep.
        assert!(ui.document().style(el, "opacity").is_none());
        assert!(ui.document().checked(el));

        toggle.set_checked(false);
        assert!(ui.document().checked(el));
    }

    #[test]
    fn update_changes_style() {
        let (ui, _, el) = setup(ElementKind::Checkbox);
        let toggle = Toggle::new(&ui, el, ToggleConfig::default()).unwrap();
        toggle.check();
        toggle.update(TogglePatch {
            style: Some(ToggleStyle::Checkmark),
            ..TogglePatch::default()
        });
        assert_eq!(ui.document().text(toggle.visual()), "\u{2713}");
    }

    #[test]
    fn config_deserializes_lowercase_style() {
        let config: ToggleConfig =
            serde_json::from_str(r#"{"style":"checkmark","size":"sm"}"#).unwrap();
        assert_eq!(config.style, ToggleStyle::Checkmark);
        assert_eq!(config.size, ControlSize::Sm);
    }
}
