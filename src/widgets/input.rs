//! Input: a validated single-line text field with an inset rest shadow.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::Deserialize;
use tokio::time::Instant;

use crate::component::{Component, ComponentCore, ComponentError, Debouncer, TextField};
use crate::dom::{ElementId, ElementKind};
use crate::event::{EventKind, UiEvent};
use crate::style::{shadow_css, ControlSize, ShadowVariant};
use crate::ui::Ui;
use crate::validate::{RuleSet, ValidationResult};

/// Class added to every input target.
pub const INPUT_CLASS: &str = "nm-input";

/// Default quiet period before change-triggered validation runs.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// When validation runs automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidateOn {
    /// On every blur.
    #[default]
    Blur,
    /// Debounced, after each user edit.
    Change,
    /// Only on form submission.
    Submit,
}

/// Full input configuration. Rules are not part of the serialized form;
/// attach them with [`Input::set_rules`] or through the config value.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct InputConfig {
    pub placeholder: Option<String>,
    pub disabled: bool,
    pub class_name: Option<String>,
    pub validate_on: ValidateOn,
    pub debounce_ms: Option<u64>,
    #[serde(skip)]
    pub rules: Option<RuleSet>,
}

/// Partial input reconfiguration.
#[derive(Debug, Clone, Default)]
pub struct InputPatch {
    pub placeholder: Option<String>,
    pub disabled: Option<bool>,
    pub class_name: Option<String>,
    pub validate_on: Option<ValidateOn>,
    pub debounce_ms: Option<u64>,
    pub rules: Option<RuleSet>,
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

struct InputState {
    core: ComponentCore,
    config: InputConfig,
    debounce: Debouncer,
}

/// A text-entry field: inset rest shadow, accent focus ring, and rule-driven
/// validation on the configured trigger.
#[derive(Clone)]
pub struct Input {
    state: Rc<RefCell<InputState>>,
}

impl Input {
    /// Attach an input to a text-entry element.
    pub fn new(ui: &Ui, element: ElementId, config: InputConfig) -> Result<Self, ComponentError> {
        Self::attach(ui, element, config, "Input", "text input", |k| {
            matches!(k, ElementKind::TextInput | ElementKind::TextArea)
        })
    }

    /// Shared attach path, also used by the widgets that compose an input.
    pub(crate) fn attach(
        ui: &Ui,
        element: ElementId,
        config: InputConfig,
        widget: &'static str,
        expected: &'static str,
        accepts: impl Fn(ElementKind) -> bool,
    ) -> Result<Self, ComponentError> {
        let core = ComponentCore::attach(ui, element, widget, expected, accepts)?;
        let delay = Duration::from_millis(config.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS));

        let state = Rc::new(RefCell::new(InputState {
            core,
            config,
            debounce: Debouncer::new(delay),
        }));
        {
            let mut s = state.borrow_mut();
            s.core.add_class(INPUT_CLASS);
            if let Some(class) = s.config.class_name.clone() {
                s.core.add_class(&class);
            }
        }

        let weak = Rc::downgrade(&state);
        let sub = ui.theme().subscribe(move |_| {
            if let Some(state) = weak.upgrade() {
                Self::repaint(&state.borrow());
            }
        });
        state.borrow_mut().core.set_theme_subscription(sub);

        // Focus ring on, rest shadow (and blur-triggered validation) off.
        let weak = Rc::downgrade(&state);
        state.borrow_mut().core.listen(element, EventKind::Focus, move |_| {
            if let Some(state) = weak.upgrade() {
                Self::paint_focus_ring(&state.borrow());
            }
        });
        let weak = Rc::downgrade(&state);
        state.borrow_mut().core.listen(element, EventKind::Blur, move |_| {
            let Some(state) = weak.upgrade() else { return };
            let validate = {
                let s = state.borrow();
                Self::repaint(&s);
                s.config.validate_on == ValidateOn::Blur
            };
            if validate {
                Self::run_validation(&state);
            }
        });

        // User edits arm the debounce when validating on change.
        let weak = Rc::downgrade(&state);
        state.borrow_mut().core.listen(element, EventKind::InputChanged, move |_| {
            if let Some(state) = weak.upgrade() {
                let mut s = state.borrow_mut();
                if s.config.validate_on == ValidateOn::Change {
                    s.debounce.schedule(Instant::now());
                }
            }
        });

        // Submit bubbles down from an ancestor form.
        let weak = Rc::downgrade(&state);
        state.borrow_mut().core.listen(element, EventKind::Submit, move |_| {
            if let Some(state) = weak.upgrade() {
                Self::run_validation(&state);
            }
        });

        Self::apply_config(&state);
        Self::repaint(&state.borrow());
        Ok(Self { state })
    }

    fn apply_config(state: &Rc<RefCell<InputState>>) {
        let s = state.borrow();
        let doc = s.core.document();
        let el = s.core.element();
        match &s.config.placeholder {
            Some(placeholder) => doc.set_attr(el, "placeholder", placeholder.clone()),
            None => doc.remove_attr(el, "placeholder"),
        }
        doc.set_disabled(el, s.config.disabled);
        s.core.sync_disabled();
    }

    fn repaint(state: &InputState) {
        if state.core.is_destroyed() {
            return;
        }
        let theme = state.core.theme();
        let doc = state.core.document();
        let el = state.core.element();
        state.core.apply_base_style();
        doc.set_style(el, "padding", ControlSize::Md.padding_css(&theme));
        doc.set_style(
            el,
            "box-shadow",
            shadow_css(ShadowVariant::Inset, theme.intensity, &theme),
        );
    }

    fn paint_focus_ring(state: &InputState) {
        if state.core.is_destroyed() {
            return;
        }
        let theme = state.core.theme();
        let rest = shadow_css(ShadowVariant::Inset, theme.intensity, &theme);
        let ring = format!("{rest}, 0 0 0 2px {accent}", accent = theme.accent);
        state.core.document().set_style(state.core.element(), "box-shadow", ring);
    }

    /// Run validation now, record the outcome, and notify listeners.
    fn run_validation(state: &Rc<RefCell<InputState>>) -> ValidationResult {
        let (doc, el, result) = {
            let s = state.borrow();
            let doc = s.core.document().clone();
            let el = s.core.element();
            let result = match &s.config.rules {
                Some(rules) => s.core.validation().validate(el, rules),
                None => ValidationResult::valid(),
            };
            (doc, el, result)
        };
        doc.dispatch(el, UiEvent::ValidationEvaluated { result: result.clone() });
        result
    }

    /// Replace the validation rules.
    pub fn set_rules(&self, rules: RuleSet) {
        let mut state = self.state.borrow_mut();
        if state.core.is_destroyed() {
            tracing::warn!("Input: set_rules after destroy ignored");
            return;
        }
        state.config.rules = Some(rules);
    }

    /// Fire debounced validation if its quiet period has elapsed at `now`.
    pub fn poll(&self, now: Instant) -> Option<ValidationResult> {
        let due = {
            let mut state = self.state.borrow_mut();
            !state.core.is_destroyed() && state.debounce.poll(now)
        };
        due.then(|| Self::run_validation(&self.state))
    }

    /// Whether a debounced validation is armed.
    pub fn is_validation_pending(&self) -> bool {
        self.state.borrow().debounce.is_pending()
    }

    /// Enable or disable the field.
    pub fn set_disabled(&self, disabled: bool) {
        {
            let mut state = self.state.borrow_mut();
            if state.core.is_destroyed() {
                tracing::warn!("Input: set_disabled after destroy ignored");
                return;
            }
            state.config.disabled = disabled;
        }
        Self::apply_config(&self.state);
    }
}

impl Component for Input {
    type Patch = InputPatch;

    fn element(&self) -> ElementId {
        self.state.borrow().core.element()
    }

    fn is_destroyed(&self) -> bool {
        self.state.borrow().core.is_destroyed()
    }

    fn update(&self, patch: InputPatch) {
        {
            let mut state = self.state.borrow_mut();
            if state.core.is_destroyed() {
                tracing::warn!("Input: update after destroy ignored");
                return;
            }
            if let Some(placeholder) = patch.placeholder {
                state.config.placeholder = Some(placeholder);
            }
            if let Some(disabled) = patch.disabled {
                state.config.disabled = disabled;
            }
            if let Some(class) = patch.class_name {
                if let Some(old) = state.config.class_name.take() {
                    state.core.remove_class(&old);
                }
                state.core.add_class(&class);
                state.config.class_name = Some(class);
            }
            if let Some(validate_on) = patch.validate_on {
                state.config.validate_on = validate_on;
                if validate_on != ValidateOn::Change {
                    state.debounce.cancel();
                }
            }
            if let Some(ms) = patch.debounce_ms {
                state.config.debounce_ms = Some(ms);
                state.debounce.set_delay(Duration::from_millis(ms));
            }
            if let Some(rules) = patch.rules {
                state.config.rules = Some(rules);
            }
        }
        Self::apply_config(&self.state);
        Self::repaint(&self.state.borrow());
    }

    fn destroy(&self) {
        let torn_down = {
            let mut state = self.state.borrow_mut();
            state.debounce.cancel();
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

impl TextField for Input {
    fn value(&self) -> String {
        let state = self.state.borrow();
        state.core.document().value(state.core.element())
    }

    fn set_value(&self, value: &str) {
        let state = self.state.borrow();
        if state.core.is_destroyed() {
            tracing::warn!("Input: set_value after destroy ignored");
            return;
        }
        state.core.document().set_value(state.core.element(), value);
    }

    fn input(&self, value: &str) {
        let (doc, el) = {
            let state = self.state.borrow();
            if state.core.is_destroyed() {
                tracing::warn!("Input: input after destroy ignored");
                return;
            }
            let doc = state.core.document().clone();
            let el = state.core.element();
            doc.set_value(el, value);
            (doc, el)
        };
        doc.dispatch(el, UiEvent::InputChanged { value: value.to_owned() });
    }

    fn validate(&self) -> ValidationResult {
        if self.state.borrow().core.is_destroyed() {
            tracing::warn!("Input: validate after destroy ignored");
            return ValidationResult::valid();
        }
        Self::run_validation(&self.state)
    }

    fn is_valid(&self) -> bool {
        let state = self.state.borrow();
        state
            .core
            .validation()
            .state(state.core.element())
            .map(|r| r.is_valid)
            .unwrap_or(true)
    }

    fn clear_errors(&self) {
        let state = self.state.borrow();
        if state.core.is_destroyed() {
            return;
        }
        state.core.validation().clear(state.core.element());
    }

    fn focus(&self) {
        let state = self.state.borrow();
        if state.core.is_destroyed() {
            return;
        }
        let doc = state.core.document().clone();
        let el = state.core.element();
        drop(state);
        doc.set_focus(Some(el));
    }

    fn blur(&self) {
        let state = self.state.borrow();
        if state.core.is_destroyed() {
            return;
        }
        let doc = state.core.document().clone();
        let el = state.core.element();
        drop(state);
        if doc.focused() == Some(el) {
            doc.set_focus(None);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
