//! The typed event table: EventKind, UiEvent.
//!
//! Every observable component event is a variant of [`UiEvent`] with its
//! payload shape fixed at compile time. [`EventKind`] is the payload-free
//! discriminant listeners subscribe by.

use crate::validate::{Strength, ValidationResult};

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// Payload-free event discriminant. Listeners register for one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The value of a text-entry control changed through user input.
    InputChanged,
    /// A validation pass completed on a field.
    ValidationEvaluated,
    /// An element gained focus.
    Focus,
    /// An element lost focus.
    Blur,
    /// An element was activated.
    Click,
    /// A password field's visibility was toggled.
    VisibilityToggled,
    /// A password field's strength level changed.
    StrengthChanged,
    /// A checkable control's value changed.
    Toggled,
    /// A component on this element was destroyed.
    Destroyed,
    /// A form submission was requested.
    Submit,
    /// Native control change (host-driven state sync).
    Change,
    /// Pointer entered the element.
    PointerEnter,
    /// Pointer left the element.
    PointerLeave,
    /// Pointer pressed on the element.
    PointerDown,
    /// Pointer released on the element.
    PointerUp,
}

// ---------------------------------------------------------------------------
// UiEvent
// ---------------------------------------------------------------------------

/// An event with its payload. Dispatched on an element and bubbled through
/// its ancestors.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// The value of a text-entry control changed through user input.
    InputChanged {
        /// The new value.
        value: String,
    },
    /// A validation pass completed on a field.
    ValidationEvaluated {
        /// The computed result.
        result: ValidationResult,
    },
    /// An element gained focus.
    Focus,
    /// An element lost focus.
    Blur,
    /// An element was activated.
    Click,
    /// A password field's visibility was toggled.
    VisibilityToggled {
        /// Whether the value is now visible (unmasked).
        visible: bool,
    },
    /// A password field's strength level changed.
    StrengthChanged {
        /// The new strength level.
        strength: Strength,
    },
    /// A checkable control's value changed.
    Toggled {
        /// The new checked state.
        checked: bool,
    },
    /// A component on this element was destroyed.
    Destroyed,
    /// A form submission was requested.
    Submit,
    /// Native control change (host-driven state sync).
    Change,
    /// Pointer entered the element.
    PointerEnter,
    /// Pointer left the element.
    PointerLeave,
    /// Pointer pressed on the element.
    PointerDown,
    /// Pointer released on the element.
    PointerUp,
}

impl UiEvent {
    /// The discriminant for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::InputChanged { .. } => EventKind::InputChanged,
            Self::ValidationEvaluated { .. } => EventKind::ValidationEvaluated,
            Self::Focus => EventKind::Focus,
            Self::Blur => EventKind::Blur,
            Self::Click => EventKind::Click,
            Self::VisibilityToggled { .. } => EventKind::VisibilityToggled,
            Self::StrengthChanged { .. } => EventKind::StrengthChanged,
            Self::Toggled { .. } => EventKind::Toggled,
            Self::Destroyed => EventKind::Destroyed,
            Self::Submit => EventKind::Submit,
            Self::Change => EventKind::Change,
            Self::PointerEnter => EventKind::PointerEnter,
            Self::PointerLeave => EventKind::PointerLeave,
            Self::PointerDown => EventKind::PointerDown,
            Self::PointerUp => EventKind::PointerUp,
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            UiEvent::InputChanged { value: "x".into() }.kind(),
            EventKind::InputChanged
        );
        assert_eq!(UiEvent::Toggled { checked: true }.kind(), EventKind::Toggled);
        assert_eq!(UiEvent::Destroyed.kind(), EventKind::Destroyed);
        assert_eq!(UiEvent::PointerEnter.kind(), EventKind::PointerEnter);
    }

    #[test]
    fn events_are_comparable() {
        assert_eq!(UiEvent::Click, UiEvent::Click);
        assert_ne!(
            UiEvent::Toggled { checked: true },
            UiEvent::Toggled { checked: false }
        );
    }
}
