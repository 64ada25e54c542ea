//! Declarative initialization from element attributes.
//!
//! Elements marked with `data-nm-widget` get a component attached in
//! document order; `data-nm-config` holds the JSON configuration. Malformed
//! configuration or an unusable target never aborts the scan: the element is
//! initialized with defaults or skipped, with a warning either way.

use serde::de::DeserializeOwned;

use crate::component::AnyComponent;
use crate::dom::ElementId;
use crate::ui::Ui;
use crate::widgets::{
    Button, ButtonConfig, Card, CardConfig, Input, InputConfig, Password, PasswordConfig, Textarea,
    TextareaConfig, Toggle, ToggleConfig,
};

/// Attribute naming the widget to attach.
pub const WIDGET_ATTR: &str = "data-nm-widget";
/// Attribute holding the JSON configuration.
pub const CONFIG_ATTR: &str = "data-nm-config";

/// Scan the document and attach a widget to every marked element.
///
/// Returns the created components in document order. Elements with an
/// unknown widget name, or whose kind the named widget rejects, are skipped.
pub fn auto_init(ui: &Ui) -> Vec<Box<dyn AnyComponent>> {
    let mut components: Vec<Box<dyn AnyComponent>> = Vec::new();
    for element in ui.document().elements_with_attr(WIDGET_ATTR) {
        let Some(name) = ui.document().attr(element, WIDGET_ATTR) else {
            continue;
        };
        let created: Option<Box<dyn AnyComponent>> = match name.as_str() {
            "card" => init_one(ui, element, |ui, el, c: CardConfig| Card::new(ui, el, c)),
            "input" => init_one(ui, element, |ui, el, c: InputConfig| Input::new(ui, el, c)),
            "password" => init_one(ui, element, |ui, el, c: PasswordConfig| {
                Password::new(ui, el, c)
            }),
            "textarea" => init_one(ui, element, |ui, el, c: TextareaConfig| {
                Textarea::new(ui, el, c)
            }),
            "toggle" => init_one(ui, element, |ui, el, c: ToggleConfig| Toggle::new(ui, el, c)),
            "button" => init_one(ui, element, |ui, el, c: ButtonConfig| Button::new(ui, el, c)),
            other => {
                tracing::warn!(widget = other, "auto-init: unknown widget name, skipping");
                None
            }
        };
        components.extend(created);
    }
    components
}

fn init_one<C, W, F>(ui: &Ui, element: ElementId, build: F) -> Option<Box<dyn AnyComponent>>
where
    C: DeserializeOwned + Default,
    W: AnyComponent + 'static,
    F: FnOnce(&Ui, ElementId, C) -> Result<W, crate::component::ComponentError>,
{
    let config = parse_config(ui, element);
    match build(ui, element, config) {
        Ok(widget) => Some(Box::new(widget)),
        Err(err) => {
            tracing::warn!(error = %err, "auto-init: skipping element");
            None
        }
    }
}

/// Parse the config attribute, falling back to defaults on malformed JSON.
fn parse_config<C: DeserializeOwned + Default>(ui: &Ui, element: ElementId) -> C {
    let Some(raw) = ui.document().attr(element, CONFIG_ATTR) else {
        return C::default();
    };
    match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "auto-init: malformed config, using defaults");
            C::default()
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
