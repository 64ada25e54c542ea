//! The component contract: lifecycle plus the text-field capability.

use crate::dom::ElementId;
use crate::validate::ValidationResult;

/// Lifecycle contract every widget implements.
///
/// A component is constructed against a target element, reconfigured through
/// partial patches, and destroyed exactly once. After `destroy`, mutating
/// methods are no-ops and getters report last-known state.
pub trait Component {
    /// Partial configuration: unset fields leave current settings untouched.
    type Patch;

    /// The target element this component owns.
    fn element(&self) -> ElementId;

    /// Whether `destroy` has run.
    fn is_destroyed(&self) -> bool;

    /// Apply a partial configuration update.
    fn update(&self, patch: Self::Patch);

    /// Tear down: listeners, theme subscription, validation state, structure,
    /// classes, and inline styles are all reverted. Safe to call repeatedly.
    fn destroy(&self);
}

/// Object-safe view of a component, for heterogeneous collections.
pub trait AnyComponent {
    fn element(&self) -> ElementId;
    fn is_destroyed(&self) -> bool;
    fn destroy(&self);
}

impl<C: Component> AnyComponent for C {
    fn element(&self) -> ElementId {
        Component::element(self)
    }

    fn is_destroyed(&self) -> bool {
        Component::is_destroyed(self)
    }

    fn destroy(&self) {
        Component::destroy(self)
    }
}

/// Capability shared by value-bearing widgets (Input, Password, Textarea).
///
/// `set_value` is the programmatic path: it writes the value silently, with
/// no change notification, no validation, and no debounce. `input` is the
/// user-typing path and drives all three.
pub trait TextField {
    /// Current value.
    fn value(&self) -> String;

    /// Set the value programmatically (silent).
    fn set_value(&self, value: &str);

    /// Feed a user edit: writes the value and emits the change notification.
    fn input(&self, value: &str);

    /// Run validation now and record the outcome.
    fn validate(&self) -> ValidationResult;

    /// Whether the last recorded validation passed. `true` when the field
    /// has never been validated.
    fn is_valid(&self) -> bool;

    /// Drop recorded validation state and any visible error presentation.
    fn clear_errors(&self);

    /// Move focus to the field.
    fn focus(&self);

    /// Remove focus from the field.
    fn blur(&self);
}
