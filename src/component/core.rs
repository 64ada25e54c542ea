//! ComponentCore: the shared half of every widget.
//!
//! Owns the element claim, the listener bookkeeping, the theme subscription,
//! the original-style snapshot, and the mount record — everything destroy
//! must unwind. Widgets keep a core inside their state and drive it from
//! their lifecycle methods.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::dom::{Document, ElementId, ElementKind, ListenerId, MountRecord};
use crate::event::{EventCtx, EventKind};
use crate::theme::{SubscriptionId, Theme, ThemeContext};
use crate::ui::Ui;
use crate::validate::ValidationManager;

use super::error::ComponentError;

/// Class present on every element claimed by a component.
pub const BASE_CLASS: &str = "nm-component";

/// Shared per-component state and teardown bookkeeping.
pub struct ComponentCore {
    document: Document,
    theme: ThemeContext,
    validation: ValidationManager,
    element: ElementId,
    listeners: Vec<(ElementId, ListenerId)>,
    theme_sub: Option<SubscriptionId>,
    mount: Option<MountRecord>,
    original_styles: BTreeMap<String, String>,
    added_classes: Vec<String>,
    destroyed: bool,
}

impl std::fmt::Debug for ComponentCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentCore")
            .field("element", &self.element)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

impl ComponentCore {
    /// Claim `element` for a widget.
    ///
    /// Checks the element kind through `accepts` and fails before any
    /// mutation if it does not satisfy the widget's requirement. On success
    /// the element's current inline styles are snapshotted for restoration
    /// at destroy, and the base class is added.
    pub fn attach(
        ui: &Ui,
        element: ElementId,
        widget: &'static str,
        expected: &'static str,
        accepts: impl Fn(ElementKind) -> bool,
    ) -> Result<Self, ComponentError> {
        let kind = ui
            .document()
            .kind(element)
            .ok_or(ComponentError::NotAnElement { widget })?;
        if !accepts(kind) {
            return Err(ComponentError::InvalidElementKind {
                widget,
                expected,
                actual: kind.name(),
            });
        }

        let original_styles = ui.document().styles_snapshot(element);
        let mut core = Self {
            document: ui.document().clone(),
            theme: ui.theme().clone(),
            validation: ui.validation().clone(),
            element,
            listeners: Vec::new(),
            theme_sub: None,
            mount: None,
            original_styles,
            added_classes: Vec::new(),
            destroyed: false,
        };
        core.add_class(BASE_CLASS);
        Ok(core)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The owned target element.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The document handle.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The theme context.
    pub fn theme_ctx(&self) -> &ThemeContext {
        &self.theme
    }

    /// The current theme.
    pub fn theme(&self) -> Rc<Theme> {
        self.theme.current()
    }

    /// The validation manager.
    pub fn validation(&self) -> &ValidationManager {
        &self.validation
    }

    /// Whether this component has been destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // -----------------------------------------------------------------------
    // Bookkeeping
    // -----------------------------------------------------------------------

    /// Register a listener and record it for teardown.
    pub fn listen(
        &mut self,
        element: ElementId,
        kind: EventKind,
        callback: impl Fn(&mut EventCtx) + 'static,
    ) {
        if let Some(id) = self.document.add_listener(element, kind, callback) {
            self.listeners.push((element, id));
        }
    }

    /// Record the theme subscription for teardown. Replaces any previous one.
    pub fn set_theme_subscription(&mut self, id: SubscriptionId) {
        if let Some(previous) = self.theme_sub.replace(id) {
            self.theme.unsubscribe(previous);
        }
    }

    /// Record the mount restructuring for teardown.
    pub fn set_mount(&mut self, record: MountRecord) {
        self.mount = Some(record);
    }

    /// Take the mount record (for widgets that unwind restructuring on
    /// config change rather than destroy).
    pub fn take_mount(&mut self) -> Option<MountRecord> {
        self.mount.take()
    }

    /// Add a class to the target, recorded for stripping at destroy.
    pub fn add_class(&mut self, class: &str) {
        self.document.add_class(self.element, class);
        if !self.added_classes.iter().any(|c| c == class) {
            self.added_classes.push(class.to_owned());
        }
    }

    /// Remove a previously added class.
    pub fn remove_class(&mut self, class: &str) {
        self.document.remove_class(self.element, class);
        self.added_classes.retain(|c| c != class);
    }

    // -----------------------------------------------------------------------
    // Base styling
    // -----------------------------------------------------------------------

    /// Apply the theme-derived base treatment: surface color, text color,
    /// radius, transition, and disabled presentation.
    pub fn apply_base_style(&self) {
        let theme = self.theme();
        let el = self.element;
        self.document.set_style(el, "background-color", &theme.surface);
        self.document.set_style(el, "color", &theme.text.primary);
        self.document.set_style(el, "border-radius", &theme.radius);
        self.document
            .set_style(el, "transition", theme.animation.transition_css());
        self.sync_disabled();
    }

    /// Sync the disabled presentation with the element's disabled state.
    pub fn sync_disabled(&self) {
        let el = self.element;
        if self.document.disabled(el) {
            self.document.set_attr(el, "aria-disabled", "true");
            self.document.set_style(el, "opacity", "0.6");
            self.document.set_style(el, "pointer-events", "none");
        } else {
            self.document.remove_attr(el, "aria-disabled");
            self.document.remove_style(el, "opacity");
            self.document.remove_style(el, "pointer-events");
        }
    }

    // -----------------------------------------------------------------------
    // Teardown
    // -----------------------------------------------------------------------

    /// Unwind everything this core tracked. Idempotent: returns `false` on
    /// repeat calls with no side effects.
    ///
    /// Order: listeners, theme subscription, validation entry, structural
    /// restore, classes, original inline styles. The destroy notification is
    /// the widget's responsibility (dispatched after its state borrow is
    /// released).
    pub fn teardown(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        for (element, id) in self.listeners.drain(..) {
            self.document.remove_listener(element, id);
        }
        if let Some(sub) = self.theme_sub.take() {
            self.theme.unsubscribe(sub);
        }
        self.validation.remove(self.element);
        if let Some(mount) = self.mount.take() {
            self.document.restore_mount(mount);
        }
        for class in self.added_classes.drain(..) {
            self.document.remove_class(self.element, &class);
        }
        self.document.remove_attr(self.element, "aria-disabled");
        self.document
            .restore_styles(self.element, std::mem::take(&mut self.original_styles));
        self.destroyed = true;
        true
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Element;
    use crate::event::UiEvent;
    use crate::theme::Preset;
    use crate::validate::Rules;
    use std::cell::Cell;

    fn setup() -> (Ui, ElementId) {
        let ui = Ui::new();
        let root = ui.document().insert(Element::new(ElementKind::Container));
        let el = ui
            .document()
            .insert_child(root, Element::new(ElementKind::TextInput))
            .unwrap();
        (ui, el)
    }

    fn attach(ui: &Ui, el: ElementId) -> ComponentCore {
        ComponentCore::attach(ui, el, "Test", "text input", ElementKind::is_text_input).unwrap()
    }

    #[test]
    fn attach_rejects_missing_element() {
        let ui = Ui::new();
        let el = ui.document().insert(Element::new(ElementKind::TextInput));
        ui.document().remove(el);
        let err = ComponentCore::attach(&ui, el, "Test", "text input", ElementKind::is_text_input)
            .unwrap_err();
        assert!(matches!(err, ComponentError::NotAnElement { .. }));
    }

    #[test]
    fn attach_rejects_wrong_kind_before_mutation() {
        let ui = Ui::new();
        let el = ui.document().insert(Element::new(ElementKind::Button));
        ui.document().set_style(el, "margin", "1px");

        let err = ComponentCore::attach(&ui, el, "Test", "text input", ElementKind::is_text_input)
            .unwrap_err();
        assert!(matches!(err, ComponentError::InvalidElementKind { .. }));
        // No mutation happened: no base class, styles untouched.
        assert!(!ui.document().has_class(el, BASE_CLASS));
        assert_eq!(ui.document().style(el, "margin").as_deref(), Some("1px"));
    }

    #[test]
    fn attach_adds_base_class() {
        let (ui, el) = setup();
        let _core = attach(&ui, el);
        assert!(ui.document().has_class(el, BASE_CLASS));
    }

    #[test]
    fn apply_base_style_uses_theme() {
        let (ui, el) = setup();
        let core = attach(&ui, el);
        core.apply_base_style();
        assert_eq!(
            ui.document().style(el, "background-color"),
            Some(ui.theme().current().surface.clone())
        );
        assert!(ui.document().style(el, "transition").is_some());
    }

    #[test]
    fn sync_disabled_round_trip() {
        let (ui, el) = setup();
        let core = attach(&ui, el);
        ui.document().set_disabled(el, true);
        core.sync_disabled();
        assert_eq!(ui.document().attr(el, "aria-disabled").as_deref(), Some("true"));

        ui.document().set_disabled(el, false);
        core.sync_disabled();
        assert!(ui.document().attr(el, "aria-disabled").is_none());
    }

    #[test]
    fn listen_records_for_teardown() {
        let (ui, el) = setup();
        let mut core = attach(&ui, el);
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        core.listen(el, EventKind::Click, move |_| c.set(c.get() + 1));

        ui.document().dispatch(el, UiEvent::Click);
        assert_eq!(count.get(), 1);

        core.teardown();
        ui.document().dispatch(el, UiEvent::Click);
        assert_eq!(count.get(), 1);
        assert_eq!(ui.document().listener_count(el), 0);
    }

    #[test]
    fn teardown_unsubscribes_theme() {
        let (ui, el) = setup();
        let mut core = attach(&ui, el);
        let sub = ui.theme().subscribe(|_| {});
        core.set_theme_subscription(sub);
        assert_eq!(ui.theme().observer_count(), 1);
        core.teardown();
        assert_eq!(ui.theme().observer_count(), 0);
    }

    #[test]
    fn teardown_removes_validation_entry_and_error_node() {
        let (ui, el) = setup();
        let mut core = attach(&ui, el);
        ui.validation().validate(el, &Rules::new().required().into());
        let node = ui.validation().error_node(el).unwrap();
        core.teardown();
        assert!(ui.validation().state(el).is_none());
        assert!(!ui.document().contains(node));
        assert_eq!(ui.validation().tracked_count(), 0);
    }

    #[test]
    fn teardown_restores_original_styles_and_classes() {
        let (ui, el) = setup();
        ui.document().set_style(el, "margin", "3px");
        let mut core = attach(&ui, el);
        core.add_class("nm-test");
        core.apply_base_style();

        core.teardown();
        assert!(!ui.document().has_class(el, BASE_CLASS));
        assert!(!ui.document().has_class(el, "nm-test"));
        assert!(ui.document().style(el, "background-color").is_none());
        assert_eq!(ui.document().style(el, "margin").as_deref(), Some("3px"));
    }

    #[test]
    fn teardown_restores_mount() {
        let (ui, el) = setup();
        let root = ui.document().root().unwrap();
        let mut core = attach(&ui, el);
        let record = ui
            .document()
            .wrap(el, Element::new(ElementKind::Container))
            .unwrap();
        let wrapper = record.wrapper;
        core.set_mount(record);

        core.teardown();
        assert!(!ui.document().contains(wrapper));
        assert_eq!(ui.document().parent(el), Some(root));
    }

    #[test]
    fn teardown_is_idempotent() {
        let (ui, el) = setup();
        let mut core = attach(&ui, el);
        assert!(core.teardown());
        assert!(!core.teardown());
        assert!(core.is_destroyed());
        let _ = ui;
    }

    #[test]
    fn theme_change_after_teardown_does_not_reach_observer() {
        let (ui, el) = setup();
        let mut core = attach(&ui, el);
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let sub = ui.theme().subscribe(move |_| c.set(c.get() + 1));
        core.set_theme_subscription(sub);

        ui.theme().set_theme(Preset::Dark);
        assert_eq!(count.get(), 1);
        core.teardown();
        ui.theme().set_theme(Preset::Light);
        assert_eq!(count.get(), 1);
    }
}
