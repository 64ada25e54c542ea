//! Password: an input composed with visibility toggling and a strength meter.
//!
//! The widget owns an [`Input`] on the same element and adds the
//! password-specific chrome around it: when the configuration asks for a
//! visibility toggle button or a four-segment strength meter, the target is
//! wrapped in a container holding them. With both disabled the tree stays
//! structurally untouched.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;

use crate::component::{Component, ComponentError, TextField};
use crate::dom::{Document, Element, ElementId, ElementKind, ListenerId, MountRecord};
use crate::event::{EventKind, UiEvent};
use crate::ui::Ui;
use crate::validate::{password_strength, Strength, StrengthReport, ValidationResult};

use super::input::{Input, InputConfig, InputPatch};

/// Class on the wrapper container.
pub const WRAPPER_CLASS: &str = "nm-password";
/// Class on the visibility toggle button.
pub const TOGGLE_CLASS: &str = "nm-password-toggle";
/// Class on the strength meter container.
pub const METER_CLASS: &str = "nm-strength-meter";

const TOGGLE_SHOW_LABEL: &str = "Show";
const TOGGLE_HIDE_LABEL: &str = "Hide";
const METER_SEGMENTS: usize = 4;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Full password configuration. Text-field settings flatten into the same
/// object.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PasswordConfig {
    pub show_toggle: bool,
    pub strength_indicator: bool,
    #[serde(flatten)]
    pub input: InputConfig,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            show_toggle: true,
            strength_indicator: false,
            input: InputConfig::default(),
        }
    }
}

/// Partial password reconfiguration.
#[derive(Debug, Clone, Default)]
pub struct PasswordPatch {
    pub show_toggle: Option<bool>,
    pub strength_indicator: Option<bool>,
    pub input: InputPatch,
}

// ---------------------------------------------------------------------------
// Password
// ---------------------------------------------------------------------------

struct PasswordState {
    input: Input,
    document: Document,
    element: ElementId,
    show_toggle: bool,
    strength_indicator: bool,
    mount: Option<MountRecord>,
    toggle_btn: Option<ElementId>,
    meter: Option<ElementId>,
    segments: Vec<ElementId>,
    listeners: Vec<(ElementId, ListenerId)>,
    last_level: Strength,
    was_masked: bool,
    destroyed: bool,
}

/// A masked text field with a visibility toggle and strength feedback.
pub struct Password {
    state: Rc<RefCell<PasswordState>>,
}

impl Password {
    /// Attach a password field to a text input element.
    pub fn new(ui: &Ui, element: ElementId, config: PasswordConfig) -> Result<Self, ComponentError> {
        let input = Input::attach(ui, element, config.input, "Password", "text input", |k| {
            matches!(k, ElementKind::TextInput)
        })?;
        let document = ui.document().clone();

        let was_masked = document.masked(element);
        document.set_masked(element, true);

        let last_level = password_strength(&document.value(element)).level;
        let state = Rc::new(RefCell::new(PasswordState {
            input,
            document: document.clone(),
            element,
            show_toggle: config.show_toggle,
            strength_indicator: config.strength_indicator,
            mount: None,
            toggle_btn: None,
            meter: None,
            segments: Vec::new(),
            listeners: Vec::new(),
            last_level,
            was_masked,
            destroyed: false,
        }));

        // User edits drive the strength meter and level notifications.
        let weak = Rc::downgrade(&state);
        if let Some(id) = document.add_listener(element, EventKind::InputChanged, move |_| {
            if let Some(state) = weak.upgrade() {
                Self::refresh_strength(&state);
            }
        }) {
            state.borrow_mut().listeners.push((element, id));
        }

        Self::sync_chrome(&state);
        Ok(Self { state })
    }

    /// Build or drop chrome pieces to match the current flags. Only the
    /// pieces the flags ask for exist in the tree.
    fn sync_chrome(state: &Rc<RefCell<PasswordState>>) {
        let (want_toggle, want_meter) = {
            let s = state.borrow();
            (s.show_toggle, s.strength_indicator)
        };
        if want_toggle {
            Self::ensure_toggle(state);
        } else {
            Self::drop_toggle(state);
        }
        if want_meter {
            Self::ensure_meter(state);
        } else {
            Self::drop_meter(state);
        }
        Self::unwrap_if_bare(state);
    }

    fn ensure_wrapper(state: &Rc<RefCell<PasswordState>>) -> ElementId {
        let mut s = state.borrow_mut();
        if let Some(mount) = &s.mount {
            return mount.wrapper;
        }
        let mount = s
            .document
            .wrap(s.element, Element::new(ElementKind::Container).with_class(WRAPPER_CLASS))
            .expect("attached element must be in the document");
        let wrapper = mount.wrapper;
        s.mount = Some(mount);
        wrapper
    }

    fn ensure_toggle(state: &Rc<RefCell<PasswordState>>) {
        if state.borrow().toggle_btn.is_some() {
            return;
        }
        let wrapper = Self::ensure_wrapper(state);
        let (doc, label) = {
            let s = state.borrow();
            let label = if s.document.masked(s.element) {
                TOGGLE_SHOW_LABEL
            } else {
                TOGGLE_HIDE_LABEL
            };
            (s.document.clone(), label)
        };
        let btn = doc
            .insert_child(
                wrapper,
                Element::new(ElementKind::Button)
                    .with_class(TOGGLE_CLASS)
                    .with_text(label),
            )
            .expect("wrapper must be in the document");
        let weak = Rc::downgrade(state);
        let listener = doc.add_listener(btn, EventKind::Click, move |_| {
            if let Some(state) = weak.upgrade() {
                Self::toggle_on(&state);
            }
        });
        let mut s = state.borrow_mut();
        s.toggle_btn = Some(btn);
        if let Some(id) = listener {
            s.listeners.push((btn, id));
        }
    }

    fn drop_toggle(state: &Rc<RefCell<PasswordState>>) {
        let (doc, btn) = {
            let mut s = state.borrow_mut();
            let Some(btn) = s.toggle_btn.take() else {
                return;
            };
            // Removing the element drops its listener with it.
            s.listeners.retain(|&(el, _)| el != btn);
            (s.document.clone(), btn)
        };
        doc.remove(btn);
    }

    fn ensure_meter(state: &Rc<RefCell<PasswordState>>) {
        if state.borrow().meter.is_some() {
            return;
        }
        let wrapper = Self::ensure_wrapper(state);
        let doc = state.borrow().document.clone();
        let meter = doc
            .insert_child(wrapper, Element::new(ElementKind::Container).with_class(METER_CLASS))
            .expect("wrapper must be in the document");
        let mut segments = Vec::with_capacity(METER_SEGMENTS);
        for _ in 0..METER_SEGMENTS {
            let segment = doc
                .insert_child(meter, Element::new(ElementKind::Container))
                .expect("meter must be in the document");
            segments.push(segment);
        }
        {
            let mut s = state.borrow_mut();
            s.meter = Some(meter);
            s.segments = segments;
        }
        let s = state.borrow();
        Self::paint_meter(&s, &password_strength(&doc.value(s.element)));
    }

    fn drop_meter(state: &Rc<RefCell<PasswordState>>) {
        let (doc, meter) = {
            let mut s = state.borrow_mut();
            let Some(meter) = s.meter.take() else {
                return;
            };
            s.segments.clear();
            (s.document.clone(), meter)
        };
        doc.remove(meter);
    }

    fn unwrap_if_bare(state: &Rc<RefCell<PasswordState>>) {
        let (doc, mount) = {
            let mut s = state.borrow_mut();
            if s.toggle_btn.is_some() || s.meter.is_some() {
                return;
            }
            let Some(mount) = s.mount.take() else {
                return;
            };
            (s.document.clone(), mount)
        };
        doc.restore_mount(mount);
    }

    fn paint_meter(state: &PasswordState, report: &StrengthReport) {
        let Some(meter) = state.meter else {
            return;
        };
        let doc = &state.document;
        let value = doc.value(state.element);
        let filled = if value.is_empty() {
            0
        } else {
            match report.level {
                Strength::Weak => 1,
                Strength::Fair => 2,
                Strength::Good => 3,
                Strength::Strong => 4,
            }
        };
        for level in [Strength::Weak, Strength::Fair, Strength::Good, Strength::Strong] {
            doc.remove_class(meter, &format!("nm-strength-{}", level.label()));
        }
        doc.add_class(meter, &format!("nm-strength-{}", report.level.label()));
        for (i, &segment) in state.segments.iter().enumerate() {
            if i < filled {
                doc.add_class(segment, "nm-filled");
            } else {
                doc.remove_class(segment, "nm-filled");
            }
        }
    }

    fn refresh_strength(state: &Rc<RefCell<PasswordState>>) {
        let (doc, el, changed, level) = {
            let mut s = state.borrow_mut();
            if s.destroyed {
                return;
            }
            let report = password_strength(&s.document.value(s.element));
            Self::paint_meter(&s, &report);
            let changed = report.level != s.last_level;
            s.last_level = report.level;
            (s.document.clone(), s.element, changed, report.level)
        };
        if changed {
            doc.dispatch(el, UiEvent::StrengthChanged { strength: level });
        }
    }

    fn toggle_on(state: &Rc<RefCell<PasswordState>>) {
        let visible = !state.borrow().document.masked(state.borrow().element);
        Self::set_visible(state, !visible);
    }

    fn set_visible(state: &Rc<RefCell<PasswordState>>, visible: bool) {
        let (doc, el) = {
            let s = state.borrow();
            if s.destroyed {
                tracing::warn!("Password: visibility change after destroy ignored");
                return;
            }
            if s.document.masked(s.element) == !visible {
                return;
            }
            s.document.set_masked(s.element, !visible);
            if let Some(btn) = s.toggle_btn {
                let label = if visible { TOGGLE_HIDE_LABEL } else { TOGGLE_SHOW_LABEL };
                s.document.set_text(btn, label);
            }
            (s.document.clone(), s.element)
        };
        doc.dispatch(el, UiEvent::VisibilityToggled { visible });
    }

    /// Flip between masked and visible.
    pub fn toggle_visibility(&self) {
        Self::toggle_on(&self.state);
    }

    /// Reveal the value.
    pub fn show_password(&self) {
        Self::set_visible(&self.state, true);
    }

    /// Mask the value.
    pub fn hide_password(&self) {
        Self::set_visible(&self.state, false);
    }

    /// Whether the value is currently visible.
    pub fn is_visible(&self) -> bool {
        let state = self.state.borrow();
        !state.document.masked(state.element)
    }

    /// Score the current value.
    pub fn strength(&self) -> StrengthReport {
        let state = self.state.borrow();
        password_strength(&state.document.value(state.element))
    }

    /// The wrapper element around the target, present while any chrome is.
    pub fn wrapper(&self) -> Option<ElementId> {
        self.state.borrow().mount.as_ref().map(|m| m.wrapper)
    }

    /// The visibility toggle button element, when enabled.
    pub fn toggle_button(&self) -> Option<ElementId> {
        self.state.borrow().toggle_btn
    }

    /// The strength meter element, when enabled.
    pub fn meter(&self) -> Option<ElementId> {
        self.state.borrow().meter
    }
}

impl Component for Password {
    type Patch = PasswordPatch;

    fn element(&self) -> ElementId {
        self.state.borrow().element
    }

    fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    fn update(&self, patch: PasswordPatch) {
        {
            let mut state = self.state.borrow_mut();
            if state.destroyed {
                tracing::warn!("Password: update after destroy ignored");
                return;
            }
            if let Some(show_toggle) = patch.show_toggle {
                state.show_toggle = show_toggle;
            }
            if let Some(strength_indicator) = patch.strength_indicator {
                state.strength_indicator = strength_indicator;
            }
        }
        Self::sync_chrome(&self.state);
        self.state.borrow().input.update(patch.input);
    }

    fn destroy(&self) {
        let (input, document, listeners, mount, element, was_masked) = {
            let mut state = self.state.borrow_mut();
            if state.destroyed {
                return;
            }
            state.destroyed = true;
            (
                state.input.clone(),
                state.document.clone(),
                std::mem::take(&mut state.listeners),
                state.mount.take(),
                state.element,
                state.was_masked,
            )
        };
        for (el, id) in listeners {
            document.remove_listener(el, id);
        }
        if let Some(mount) = mount {
            document.restore_mount(mount);
        }
        document.set_masked(element, was_masked);
        // The composed input tears down shared state and notifies once.
        input.destroy();
    }
}

impl TextField for Password {
    fn value(&self) -> String {
        self.state.borrow().input.value()
    }

    fn set_value(&self, value: &str) {
        self.state.borrow().input.set_value(value);
    }

    fn input(&self, value: &str) {
        let input = self.state.borrow().input.clone();
        input.input(value);
    }

    fn validate(&self) -> ValidationResult {
        let input = self.state.borrow().input.clone();
        input.validate()
    }

    fn is_valid(&self) -> bool {
        self.state.borrow().input.is_valid()
    }

    fn clear_errors(&self) {
        self.state.borrow().input.clear_errors();
    }

    fn focus(&self) {
        let input = self.state.borrow().input.clone();
        input.focus();
    }

    fn blur(&self) {
        let input = self.state.borrow().input.clone();
        input.blur();
    }
}

// ===========================================================================
// Tests
// ===========================================================================
