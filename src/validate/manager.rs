//! ValidationManager: per-element validation state and inline error UI.
//!
//! The manager owns a map from element to its last result and lazily-created
//! error-display node. `clear` resets an element's state and hides its error
//! node; `remove` (the destroy path) deletes both. A stale entry for a
//! detached element is a leak the manager must not produce.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::SecondaryMap;

use crate::dom::{Document, Element, ElementId, ElementKind};

use super::engine::{evaluate, ValidationResult};
use super::rules::RuleSet;

/// Class set on a field whose last validation failed.
pub const INVALID_CLASS: &str = "nm-invalid";
/// Class on the inline error-display node.
pub const ERROR_MESSAGE_CLASS: &str = "nm-error-message";

struct Entry {
    /// `None` after a clear: the element is still tracked (its error node is
    /// kept for reuse) but has no recorded outcome.
    result: Option<ValidationResult>,
    error_node: Option<ElementId>,
}

struct ManagerInner {
    document: Document,
    entries: SecondaryMap<ElementId, Entry>,
}

/// Shared, cheap-clone validation state tracker.
#[derive(Clone)]
pub struct ValidationManager {
    inner: Rc<RefCell<ManagerInner>>,
}

impl ValidationManager {
    /// Create a manager over a document.
    pub fn new(document: Document) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ManagerInner {
                document,
                entries: SecondaryMap::new(),
            })),
        }
    }

    /// Evaluate `element`'s current value against a rule set, record the
    /// result, and update the inline error UI.
    ///
    /// When invalid, an error node is lazily created immediately after the
    /// element, showing the first error; the element gets the invalid class
    /// and `aria-invalid`. When valid, the error node (if any) is hidden and
    /// the markers are removed.
    pub fn validate(&self, element: ElementId, ruleset: &RuleSet) -> ValidationResult {
        let document = self.document();
        if !document.contains(element) {
            // Never track detached elements.
            return ValidationResult::valid();
        }

        let result = evaluate(&document.value(element), ruleset);
        let existing_node = {
            let inner = self.inner.borrow();
            inner.entries.get(element).and_then(|e| e.error_node)
        };

        let error_node = if result.is_valid {
            if let Some(node) = existing_node {
                document.set_style(node, "display", "none");
            }
            document.remove_class(element, INVALID_CLASS);
            document.remove_attr(element, "aria-invalid");
            existing_node
        } else {
            let node = match existing_node {
                Some(node) if document.contains(node) => node,
                _ => {
                    let el = Element::new(ElementKind::Text).with_class(ERROR_MESSAGE_CLASS);
                    let node = document
                        .insert_after(element, el)
                        .expect("validated element exists");
                    document.set_style(node, "color", "var(--nm-error)");
                    node
                }
            };
            document.set_text(node, result.errors[0].clone());
            document.remove_style(node, "display");
            document.add_class(element, INVALID_CLASS);
            document.set_attr(element, "aria-invalid", "true");
            Some(node)
        };

        self.inner.borrow_mut().entries.insert(
            element,
            Entry {
                result: Some(result.clone()),
                error_node,
            },
        );
        result
    }

    /// Drop the stored result for an element, hide its error node, and clear
    /// the invalid markers. The node is kept for reuse by a later pass.
    pub fn clear(&self, element: ElementId) {
        let (document, error_node) = {
            let mut inner = self.inner.borrow_mut();
            let document = inner.document.clone();
            let Some(entry) = inner.entries.get_mut(element) else {
                return;
            };
            entry.result = None;
            (document, entry.error_node)
        };
        if let Some(node) = error_node {
            document.set_style(node, "display", "none");
        }
        document.remove_class(element, INVALID_CLASS);
        document.remove_attr(element, "aria-invalid");
    }

    /// Untrack an element entirely: the destroy path. Deletes the stored
    /// entry and its error node, and clears the invalid markers. No entry
    /// may outlive its component.
    pub fn remove(&self, element: ElementId) {
        let (document, entry) = {
            let mut inner = self.inner.borrow_mut();
            (inner.document.clone(), inner.entries.remove(element))
        };
        if let Some(entry) = entry {
            if let Some(node) = entry.error_node {
                document.remove(node);
            }
        }
        document.remove_class(element, INVALID_CLASS);
        document.remove_attr(element, "aria-invalid");
    }

    /// The last recorded result for an element. `None` for untracked or
    /// cleared elements.
    pub fn state(&self, element: ElementId) -> Option<ValidationResult> {
        self.inner
            .borrow()
            .entries
            .get(element)
            .and_then(|entry| entry.result.clone())
    }

    /// The element's current error-display node, if one exists.
    pub fn error_node(&self, element: ElementId) -> Option<ElementId> {
        self.inner
            .borrow()
            .entries
            .get(element)
            .and_then(|entry| entry.error_node)
    }

    /// Number of tracked elements.
    pub fn tracked_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    fn document(&self) -> Document {
        self.inner.borrow().document.clone()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::engine::REQUIRED_MESSAGE;
    use crate::validate::rules::Rules;

    fn setup() -> (ValidationManager, Document, ElementId) {
        let doc = Document::new();
        let root = doc.insert(Element::new(ElementKind::Container));
        let field = doc
            .insert_child(root, Element::new(ElementKind::TextInput))
            .unwrap();
        (ValidationManager::new(doc.clone()), doc, field)
    }

    #[test]
    fn invalid_creates_adjacent_error_node() {
        let (manager, doc, field) = setup();
        let result = manager.validate(field, &Rules::new().required().into());
        assert!(!result.is_valid);

        let node = manager.error_node(field).expect("error node created");
        assert_eq!(doc.index_in_parent(node), Some(1));
        assert_eq!(doc.parent(node), doc.parent(field));
        assert_eq!(doc.text(node), REQUIRED_MESSAGE);
        assert!(doc.has_class(node, ERROR_MESSAGE_CLASS));
    }

    #[test]
    fn invalid_marks_element() {
        let (manager, doc, field) = setup();
        manager.validate(field, &Rules::new().required().into());
        assert!(doc.has_class(field, INVALID_CLASS));
        assert_eq!(doc.attr(field, "aria-invalid").as_deref(), Some("true"));
    }

    #[test]
    fn error_node_reused_across_validations() {
        let (manager, doc, field) = setup();
        manager.validate(field, &Rules::new().required().into());
        let first = manager.error_node(field).unwrap();

        doc.set_value(field, "ab");
        manager.validate(field, &Rules::new().required().min_length(5).into());
        let second = manager.error_node(field).unwrap();
        assert_eq!(first, second);
        assert_eq!(doc.text(second), "Must be at least 5 characters");
    }

    #[test]
    fn valid_hides_error_node_and_unmarks() {
        let (manager, doc, field) = setup();
        manager.validate(field, &Rules::new().required().into());
        let node = manager.error_node(field).unwrap();

        doc.set_value(field, "filled");
        let result = manager.validate(field, &Rules::new().required().into());
        assert!(result.is_valid);
        assert_eq!(doc.style(node, "display").as_deref(), Some("none"));
        assert!(!doc.has_class(field, INVALID_CLASS));
        assert!(doc.attr(field, "aria-invalid").is_none());
    }

    #[test]
    fn state_returns_last_result() {
        let (manager, doc, field) = setup();
        assert!(manager.state(field).is_none());

        manager.validate(field, &Rules::new().required().into());
        assert!(!manager.state(field).unwrap().is_valid);

        doc.set_value(field, "ok");
        manager.validate(field, &Rules::new().required().into());
        assert!(manager.state(field).unwrap().is_valid);
    }

    #[test]
    fn clear_drops_state_and_hides_node() {
        let (manager, doc, field) = setup();
        manager.validate(field, &Rules::new().required().into());
        let node = manager.error_node(field).unwrap();

        manager.clear(field);
        assert!(manager.state(field).is_none());
        // Node kept (hidden) for reuse by a later pass.
        assert!(doc.contains(node));
        assert_eq!(doc.style(node, "display").as_deref(), Some("none"));
        assert!(!doc.has_class(field, INVALID_CLASS));

        manager.validate(field, &Rules::new().required().into());
        assert_eq!(manager.error_node(field), Some(node));
        assert!(doc.style(node, "display").is_none());
    }

    #[test]
    fn remove_deletes_entry_and_node() {
        let (manager, doc, field) = setup();
        manager.validate(field, &Rules::new().required().into());
        let node = manager.error_node(field).unwrap();

        manager.remove(field);
        assert!(manager.state(field).is_none());
        assert!(!doc.contains(node));
        assert!(!doc.has_class(field, INVALID_CLASS));
        assert_eq!(manager.tracked_count(), 0);
    }

    #[test]
    fn clear_and_remove_untracked_are_noops() {
        let (manager, _, field) = setup();
        manager.clear(field); // should not panic
        manager.remove(field);
        assert!(manager.state(field).is_none());
    }

    #[test]
    fn detached_element_is_never_tracked() {
        let (manager, doc, field) = setup();
        doc.remove(field);
        let result = manager.validate(field, &Rules::new().required().into());
        assert!(result.is_valid);
        assert_eq!(manager.tracked_count(), 0);
    }

    #[test]
    fn validation_result_not_persisted_across_value_changes() {
        // The stored state reflects the last pass, recomputed each trigger.
        let (manager, doc, field) = setup();
        doc.set_value(field, "test@example.com");
        manager.validate(field, &Rules::new().email().into());
        assert!(manager.state(field).unwrap().is_valid);

        doc.set_value(field, "broken");
        manager.validate(field, &Rules::new().email().into());
        assert!(!manager.state(field).unwrap().is_valid);
    }
}
