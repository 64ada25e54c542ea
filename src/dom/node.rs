//! Element types: ElementId, ElementKind, Element.

use std::collections::BTreeMap;

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for an element in the document. Copy, lightweight (u64).
    pub struct ElementId;
}

// ---------------------------------------------------------------------------
// ElementKind
// ---------------------------------------------------------------------------

/// The tag-level kind of an element.
///
/// Widgets check the kind of their target element at construction time and
/// refuse elements of the wrong kind before mutating anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Generic block container (div-like).
    Container,
    /// Inline text node (span-like). Used for labels and error messages.
    Text,
    /// Single-line text entry control.
    TextInput,
    /// Multi-line text entry control.
    TextArea,
    /// Checkbox control.
    Checkbox,
    /// Radio control. Grouped by the `name` attribute.
    Radio,
    /// Push-button control.
    Button,
}

impl ElementKind {
    /// Human-readable kind name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Text => "text",
            Self::TextInput => "text input",
            Self::TextArea => "textarea",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Button => "button",
        }
    }

    /// Whether this kind accepts single-line text entry.
    pub fn is_text_input(self) -> bool {
        matches!(self, Self::TextInput)
    }

    /// Whether this kind is a checkable control (checkbox or radio).
    pub fn is_checkable(self) -> bool {
        matches!(self, Self::Checkbox | Self::Radio)
    }
}

// ---------------------------------------------------------------------------
// Element
// ---------------------------------------------------------------------------

/// Data for a single element in the document tree.
///
/// Mirrors the surface a host document exposes to a styling library: classes,
/// attributes, inline style properties, text content, and form state. Inline
/// styles are stored as `property -> value` strings, matching the host's
/// `style` attribute contract.
#[derive(Debug, Clone)]
pub struct Element {
    /// Tag-level kind. Fixed for the lifetime of the element.
    pub kind: ElementKind,
    /// Optional unique id.
    pub id: Option<String>,
    /// Classes, in insertion order, deduplicated.
    pub classes: Vec<String>,
    /// Attributes (`name -> value`).
    attributes: BTreeMap<String, String>,
    /// Inline style properties (`property -> value`).
    styles: BTreeMap<String, String>,
    /// Text content (labels, messages, button captions).
    pub text: String,
    /// Current value, for text-entry controls.
    pub value: String,
    /// Checked state, for checkable controls.
    pub checked: bool,
    /// Whether text entry is obscured (password mode).
    pub masked: bool,
    /// Whether the control is disabled.
    pub disabled: bool,
}

impl Element {
    /// Create a new element of the given kind with empty state.
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            checked: false,
            masked: false,
            disabled: false,
        }
    }

    /// Set the element id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add a class (builder).
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
        self
    }

    /// Set an attribute (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the value (builder).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    // -----------------------------------------------------------------------
    // Classes
    // -----------------------------------------------------------------------

    /// Check whether this element has a given class.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Add a class. No-op if already present.
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_owned());
        }
    }

    /// Remove a class. No-op if not present.
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Toggle a class: add if absent, remove if present.
    pub fn toggle_class(&mut self, class: &str) {
        if self.has_class(class) {
            self.remove_class(class);
        } else {
            self.add_class(class);
        }
    }

    // -----------------------------------------------------------------------
    // Attributes
    // -----------------------------------------------------------------------

    /// Get an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Remove an attribute. No-op if absent.
    pub fn remove_attr(&mut self, name: &str) {
        self.attributes.remove(name);
    }

    /// Whether an attribute is present.
    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    // -----------------------------------------------------------------------
    // Inline styles
    // -----------------------------------------------------------------------

    /// Get an inline style property value.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    /// Set an inline style property, replacing any previous value.
    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.styles.insert(property.into(), value.into());
    }

    /// Remove an inline style property. No-op if absent.
    pub fn remove_style(&mut self, property: &str) {
        self.styles.remove(property);
    }

    /// Snapshot of the full inline style map.
    ///
    /// Components take this snapshot before styling their target so destroy
    /// can restore the element's original inline styles exactly.
    pub fn styles_snapshot(&self) -> BTreeMap<String, String> {
        self.styles.clone()
    }

    /// Replace the full inline style map.
    pub fn restore_styles(&mut self, styles: BTreeMap<String, String>) {
        self.styles = styles;
    }
}

// ===========================================================================
// Tests
// ===========================================================================
