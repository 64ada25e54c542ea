//! Textarea: a multi-line input with content-driven auto-resize.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;

use crate::component::{Component, ComponentError, TextField};
use crate::dom::{Document, ElementId, ElementKind, ListenerId};
use crate::event::EventKind;
use crate::ui::Ui;
use crate::validate::ValidationResult;

use super::input::{Input, InputConfig, InputPatch};

/// Class added to every textarea target.
pub const TEXTAREA_CLASS: &str = "nm-textarea";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Full textarea configuration. Text-field settings flatten into the same
/// object.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextareaConfig {
    pub auto_resize: bool,
    /// Lower bound for the computed height, in pixels.
    pub min_height: f32,
    /// Upper bound for the computed height. Content beyond it scrolls.
    pub max_height: Option<f32>,
    /// Height contributed by each line of content, in pixels.
    pub line_height: f32,
    #[serde(flatten)]
    pub input: InputConfig,
}

impl Default for TextareaConfig {
    fn default() -> Self {
        Self {
            auto_resize: true,
            min_height: 60.0,
            max_height: None,
            line_height: 20.0,
            input: InputConfig::default(),
        }
    }
}

/// Partial textarea reconfiguration.
#[derive(Debug, Clone, Default)]
pub struct TextareaPatch {
    pub auto_resize: Option<bool>,
    pub min_height: Option<f32>,
    pub max_height: Option<Option<f32>>,
    pub line_height: Option<f32>,
    pub input: InputPatch,
}

// ---------------------------------------------------------------------------
// Textarea
// ---------------------------------------------------------------------------

struct TextareaState {
    input: Input,
    document: Document,
    element: ElementId,
    config: TextareaConfig,
    listeners: Vec<(ElementId, ListenerId)>,
}

/// A multi-line field that grows with its content between configured bounds.
pub struct Textarea {
    state: Rc<RefCell<TextareaState>>,
}

impl Textarea {
    /// Attach a textarea to a multi-line text element.
    pub fn new(ui: &Ui, element: ElementId, config: TextareaConfig) -> Result<Self, ComponentError> {
        let input = Input::attach(
            ui,
            element,
            config.input.clone(),
            "Textarea",
            "textarea",
            |k| matches!(k, ElementKind::TextArea),
        )?;
        let document = ui.document().clone();
        document.add_class(element, TEXTAREA_CLASS);

        let state = Rc::new(RefCell::new(TextareaState {
            input,
            document: document.clone(),
            element,
            config,
            listeners: Vec::new(),
        }));

        let weak = Rc::downgrade(&state);
        if let Some(id) = document.add_listener(element, EventKind::InputChanged, move |_| {
            if let Some(state) = weak.upgrade() {
                Self::resize_state(&state.borrow());
            }
        }) {
            state.borrow_mut().listeners.push((element, id));
        }

        Self::resize_state(&state.borrow());
        Ok(Self { state })
    }

    fn resize_state(state: &TextareaState) {
        if state.input.is_destroyed() || !state.config.auto_resize {
            return;
        }
        let doc = &state.document;
        let el = state.element;
        let lines = doc.value(el).split('\n').count().max(1);
        let content = lines as f32 * state.config.line_height;
        let mut height = content.max(state.config.min_height);
        let mut overflow = "hidden";
        if let Some(max) = state.config.max_height {
            if content > max {
                overflow = "auto";
            }
            height = height.min(max);
        }
        doc.set_style(el, "height", format!("{}px", height.round() as i32));
        doc.set_style(el, "overflow-y", overflow);
    }

    /// Recompute the height from the current content.
    pub fn resize(&self) {
        Self::resize_state(&self.state.borrow());
    }

    /// The active configuration.
    pub fn config(&self) -> TextareaConfig {
        self.state.borrow().config.clone()
    }
}

impl Component for Textarea {
    type Patch = TextareaPatch;

    fn element(&self) -> ElementId {
        self.state.borrow().element
    }

    fn is_destroyed(&self) -> bool {
        self.state.borrow().input.is_destroyed()
    }

    fn update(&self, patch: TextareaPatch) {
        {
            let mut state = self.state.borrow_mut();
            if state.input.is_destroyed() {
                tracing::warn!("Textarea: update after destroy ignored");
                return;
            }
            if let Some(auto_resize) = patch.auto_resize {
                state.config.auto_resize = auto_resize;
            }
            if let Some(min_height) = patch.min_height {
                state.config.min_height = min_height;
            }
            if let Some(max_height) = patch.max_height {
                state.config.max_height = max_height;
            }
            if let Some(line_height) = patch.line_height {
                state.config.line_height = line_height;
            }
            state.input.update(patch.input);
        }
        Self::resize_state(&self.state.borrow());
    }

    fn destroy(&self) {
        let (input, document, listeners, element) = {
            let mut state = self.state.borrow_mut();
            (
                state.input.clone(),
                state.document.clone(),
                std::mem::take(&mut state.listeners),
                state.element,
            )
        };
        for (el, id) in listeners {
            document.remove_listener(el, id);
        }
        document.remove_class(element, TEXTAREA_CLASS);
        input.destroy();
    }
}

impl TextField for Textarea {
    fn value(&self) -> String {
        self.state.borrow().input.value()
    }

    fn set_value(&self, value: &str) {
        self.state.borrow().input.set_value(value);
        // Programmatic writes stay silent but the height must track content.
        Self::resize_state(&self.state.borrow());
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
