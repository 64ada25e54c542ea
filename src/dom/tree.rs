//! Document tree: insert, remove, wrap/restore, listeners, dispatch.
//!
//! [`Document`] is a cheap-clone handle over a slotmap-backed element arena.
//! It models the host document a styling library mutates: tree structure,
//! inline styles, form state, an event-listener registry, and synchronous
//! bubbling dispatch. Listener callbacks are always invoked with no internal
//! borrow held, so handlers are free to mutate the tree they were called from.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use slotmap::{SecondaryMap, SlotMap};

use crate::event::{EventCtx, EventKind, UiEvent};

use super::node::{Element, ElementId, ElementKind};

// ---------------------------------------------------------------------------
// Listeners
// ---------------------------------------------------------------------------

/// Handle to a registered listener, used to unregister it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type ListenerFn = Rc<dyn Fn(&mut EventCtx)>;

struct ListenerEntry {
    id: ListenerId,
    kind: EventKind,
    callback: ListenerFn,
}

// ---------------------------------------------------------------------------
// MountRecord
// ---------------------------------------------------------------------------

/// Structural handle produced when a component wraps its target element.
///
/// Records exactly where the target used to live and which auxiliary nodes
/// the component created, so destroy can reverse the restructuring without
/// querying the tree for "the wrapper".
#[derive(Debug)]
pub struct MountRecord {
    /// The wrapped element.
    pub target: ElementId,
    /// The wrapper inserted at the target's original position.
    pub wrapper: ElementId,
    /// The target's parent before wrapping. `None` if it was the root or
    /// unparented.
    pub original_parent: Option<ElementId>,
    /// The target's index within its original parent's children.
    pub original_index: usize,
    /// Auxiliary nodes created by the component, removed on restore.
    pub created: Vec<ElementId>,
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

struct DocInner {
    nodes: SlotMap<ElementId, Element>,
    children: SecondaryMap<ElementId, Vec<ElementId>>,
    parent: SecondaryMap<ElementId, ElementId>,
    listeners: SecondaryMap<ElementId, Vec<ListenerEntry>>,
    root: Option<ElementId>,
    focused: Option<ElementId>,
    next_listener: u64,
}

/// The retained element tree. Cheap to clone (shared handle).
#[derive(Clone)]
pub struct Document {
    inner: Rc<RefCell<DocInner>>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(DocInner {
                nodes: SlotMap::with_key(),
                children: SecondaryMap::new(),
                parent: SecondaryMap::new(),
                listeners: SecondaryMap::new(),
                root: None,
                focused: None,
                next_listener: 0,
            })),
        }
    }

    // -----------------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------------

    /// Insert a parentless element. Becomes the root if no root is set.
    pub fn insert(&self, element: Element) -> ElementId {
        let mut inner = self.inner.borrow_mut();
        let id = inner.nodes.insert(element);
        inner.children.insert(id, Vec::new());
        if inner.root.is_none() {
            inner.root = Some(id);
        }
        id
    }

    /// Insert an element as the last child of `parent`.
    ///
    /// Returns `None` if `parent` does not exist.
    pub fn insert_child(&self, parent: ElementId, element: Element) -> Option<ElementId> {
        let mut inner = self.inner.borrow_mut();
        if !inner.nodes.contains_key(parent) {
            return None;
        }
        let id = inner.nodes.insert(element);
        inner.children.insert(id, Vec::new());
        inner.parent.insert(id, parent);
        inner
            .children
            .get_mut(parent)
            .expect("parent must have children vec")
            .push(id);
        Some(id)
    }

    /// Insert an element immediately after `sibling` in its parent.
    ///
    /// If `sibling` has no parent the new element is inserted parentless.
    /// Returns `None` if `sibling` does not exist.
    pub fn insert_after(&self, sibling: ElementId, element: Element) -> Option<ElementId> {
        let mut inner = self.inner.borrow_mut();
        if !inner.nodes.contains_key(sibling) {
            return None;
        }
        let id = inner.nodes.insert(element);
        inner.children.insert(id, Vec::new());
        if let Some(parent) = inner.parent.get(sibling).copied() {
            let index = inner.children[parent]
                .iter()
                .position(|&c| c == sibling)
                .map(|i| i + 1)
                .unwrap_or(inner.children[parent].len());
            inner.children[parent].insert(index, id);
            inner.parent.insert(id, parent);
        }
        Some(id)
    }

    /// Remove an element and all its descendants.
    ///
    /// Listeners on removed elements are dropped; focus is cleared if the
    /// focused element was inside the removed subtree.
    pub fn remove(&self, id: ElementId) {
        let mut inner = self.inner.borrow_mut();
        if !inner.nodes.contains_key(id) {
            return;
        }
        if let Some(parent) = inner.parent.remove(id) {
            if let Some(siblings) = inner.children.get_mut(parent) {
                siblings.retain(|&c| c != id);
            }
        }
        if inner.root == Some(id) {
            inner.root = None;
        }

        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(kids) = inner.children.remove(current) {
                stack.extend(kids);
            }
            inner.parent.remove(current);
            inner.listeners.remove(current);
            inner.nodes.remove(current);
            if inner.focused == Some(current) {
                inner.focused = None;
            }
        }
    }

    /// Wrap `target` in a new element inserted at the target's position.
    ///
    /// The wrapper takes the target's place in its parent (or becomes the
    /// root) and the target becomes the wrapper's first child. Returns a
    /// [`MountRecord`] that [`Document::restore_mount`] consumes for exact
    /// reversal, or `None` if `target` does not exist.
    pub fn wrap(&self, target: ElementId, wrapper: Element) -> Option<MountRecord> {
        let mut inner = self.inner.borrow_mut();
        if !inner.nodes.contains_key(target) {
            return None;
        }
        let original_parent = inner.parent.get(target).copied();
        let original_index = original_parent
            .and_then(|p| inner.children[p].iter().position(|&c| c == target))
            .unwrap_or(0);

        let wrapper_id = inner.nodes.insert(wrapper);
        inner.children.insert(wrapper_id, vec![target]);

        match original_parent {
            Some(parent) => {
                let kids = inner
                    .children
                    .get_mut(parent)
                    .expect("parent must have children vec");
                kids[original_index] = wrapper_id;
                inner.parent.insert(wrapper_id, parent);
            }
            None => {
                if inner.root == Some(target) {
                    inner.root = Some(wrapper_id);
                }
            }
        }
        inner.parent.insert(target, wrapper_id);

        Some(MountRecord {
            target,
            wrapper: wrapper_id,
            original_parent,
            original_index,
            created: Vec::new(),
        })
    }

    /// Reverse a [`Document::wrap`]: move the target back to its original
    /// parent and position, then remove the wrapper and every created node.
    pub fn restore_mount(&self, record: MountRecord) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.nodes.contains_key(record.target) {
                // Detach target from the wrapper.
                if let Some(parent) = inner.parent.remove(record.target) {
                    if let Some(siblings) = inner.children.get_mut(parent) {
                        siblings.retain(|&c| c != record.target);
                    }
                }
                match record.original_parent {
                    Some(parent) if inner.nodes.contains_key(parent) => {
                        let kids = inner
                            .children
                            .get_mut(parent)
                            .expect("parent must have children vec");
                        let index = record.original_index.min(kids.len());
                        kids.insert(index, record.target);
                        inner.parent.insert(record.target, parent);
                    }
                    _ => {
                        if inner.root == Some(record.wrapper) || inner.root.is_none() {
                            inner.root = Some(record.target);
                        }
                    }
                }
            }
        }
        // Wrapper subtree now only holds created nodes; remove it, then any
        // created nodes that lived outside the wrapper.
        self.remove(record.wrapper);
        for created in record.created {
            self.remove(created);
        }
    }

    // -----------------------------------------------------------------------
    // Relationships
    // -----------------------------------------------------------------------

    /// The parent of an element, if it has one.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.inner.borrow().parent.get(id).copied()
    }

    /// The children of an element, in order. Empty if the element has no
    /// children or does not exist.
    pub fn children(&self, id: ElementId) -> Vec<ElementId> {
        self.inner
            .borrow()
            .children
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    /// Ancestors of an element, nearest first, ending at the root.
    pub fn ancestors(&self, id: ElementId) -> Vec<ElementId> {
        let inner = self.inner.borrow();
        let mut result = Vec::new();
        let mut current = id;
        while let Some(&p) = inner.parent.get(current) {
            result.push(p);
            current = p;
        }
        result
    }

    /// The index of an element within its parent's children.
    pub fn index_in_parent(&self, id: ElementId) -> Option<usize> {
        let inner = self.inner.borrow();
        let parent = inner.parent.get(id).copied()?;
        inner.children[parent].iter().position(|&c| c == id)
    }

    /// The root element, if set.
    pub fn root(&self) -> Option<ElementId> {
        self.inner.borrow().root
    }

    /// Whether the document contains an element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.inner.borrow().nodes.contains_key(id)
    }

    /// Number of elements in the document.
    pub fn len(&self) -> usize {
        self.inner.borrow().nodes.len()
    }

    /// Whether the document is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().nodes.is_empty()
    }

    /// Pre-order depth-first traversal from `start` (document order).
    pub fn walk_depth_first(&self, start: ElementId) -> Vec<ElementId> {
        let inner = self.inner.borrow();
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !inner.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            if let Some(kids) = inner.children.get(current) {
                for &child in kids.iter().rev() {
                    stack.push(child);
                }
            }
        }
        result
    }

    // -----------------------------------------------------------------------
    // Element access
    // -----------------------------------------------------------------------

    /// Run a closure against an element's data.
    pub fn with<R>(&self, id: ElementId, f: impl FnOnce(&Element) -> R) -> Option<R> {
        self.inner.borrow().nodes.get(id).map(f)
    }

    /// Run a closure against an element's data, mutably.
    pub fn with_mut<R>(&self, id: ElementId, f: impl FnOnce(&mut Element) -> R) -> Option<R> {
        self.inner.borrow_mut().nodes.get_mut(id).map(f)
    }

    /// The kind of an element.
    pub fn kind(&self, id: ElementId) -> Option<ElementKind> {
        self.with(id, |el| el.kind)
    }

    /// The value of a text-entry element. Empty if the element is missing.
    pub fn value(&self, id: ElementId) -> String {
        self.with(id, |el| el.value.clone()).unwrap_or_default()
    }

    /// Set the value of a text-entry element.
    pub fn set_value(&self, id: ElementId, value: impl Into<String>) {
        let value = value.into();
        self.with_mut(id, |el| el.value = value);
    }

    /// The text content of an element.
    pub fn text(&self, id: ElementId) -> String {
        self.with(id, |el| el.text.clone()).unwrap_or_default()
    }

    /// Set the text content of an element.
    pub fn set_text(&self, id: ElementId, text: impl Into<String>) {
        let text = text.into();
        self.with_mut(id, |el| el.text = text);
    }

    /// The checked state of a checkable element.
    pub fn checked(&self, id: ElementId) -> bool {
        self.with(id, |el| el.checked).unwrap_or(false)
    }

    /// Set the checked state of a checkable element.
    pub fn set_checked(&self, id: ElementId, checked: bool) {
        self.with_mut(id, |el| el.checked = checked);
    }

    /// Whether a text-entry element is obscured.
    pub fn masked(&self, id: ElementId) -> bool {
        self.with(id, |el| el.masked).unwrap_or(false)
    }

    /// Set whether a text-entry element is obscured.
    pub fn set_masked(&self, id: ElementId, masked: bool) {
        self.with_mut(id, |el| el.masked = masked);
    }

    /// Whether an element is disabled.
    pub fn disabled(&self, id: ElementId) -> bool {
        self.with(id, |el| el.disabled).unwrap_or(false)
    }

    /// Set whether an element is disabled.
    pub fn set_disabled(&self, id: ElementId, disabled: bool) {
        self.with_mut(id, |el| el.disabled = disabled);
    }

    /// Get an inline style property of an element.
    pub fn style(&self, id: ElementId, property: &str) -> Option<String> {
        self.with(id, |el| el.style(property).map(str::to_owned))
            .flatten()
    }

    /// Set an inline style property of an element.
    pub fn set_style(&self, id: ElementId, property: &str, value: impl Into<String>) {
        let value = value.into();
        self.with_mut(id, |el| el.set_style(property, value));
    }

    /// Remove an inline style property of an element.
    pub fn remove_style(&self, id: ElementId, property: &str) {
        self.with_mut(id, |el| el.remove_style(property));
    }

    /// Snapshot an element's inline styles.
    pub fn styles_snapshot(&self, id: ElementId) -> BTreeMap<String, String> {
        self.with(id, Element::styles_snapshot).unwrap_or_default()
    }

    /// Replace an element's inline styles.
    pub fn restore_styles(&self, id: ElementId, styles: BTreeMap<String, String>) {
        self.with_mut(id, |el| el.restore_styles(styles));
    }

    /// Add a class to an element.
    pub fn add_class(&self, id: ElementId, class: &str) {
        self.with_mut(id, |el| el.add_class(class));
    }

    /// Remove a class from an element.
    pub fn remove_class(&self, id: ElementId, class: &str) {
        self.with_mut(id, |el| el.remove_class(class));
    }

    /// Whether an element has a class.
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.with(id, |el| el.has_class(class)).unwrap_or(false)
    }

    /// Get an attribute of an element.
    pub fn attr(&self, id: ElementId, name: &str) -> Option<String> {
        self.with(id, |el| el.attr(name).map(str::to_owned)).flatten()
    }

    /// Set an attribute of an element.
    pub fn set_attr(&self, id: ElementId, name: &str, value: impl Into<String>) {
        let value = value.into();
        self.with_mut(id, |el| el.set_attr(name, value));
    }

    /// Remove an attribute of an element.
    pub fn remove_attr(&self, id: ElementId, name: &str) {
        self.with_mut(id, |el| el.remove_attr(name));
    }

    // -----------------------------------------------------------------------
    // Focus
    // -----------------------------------------------------------------------

    /// The currently focused element.
    pub fn focused(&self) -> Option<ElementId> {
        self.inner.borrow().focused
    }

    /// Move focus. Dispatches `Blur` on the previously focused element and
    /// `Focus` on the newly focused one.
    pub fn set_focus(&self, id: Option<ElementId>) {
        let previous = {
            let mut inner = self.inner.borrow_mut();
            if inner.focused == id {
                return;
            }
            let previous = inner.focused;
            inner.focused = id;
            previous
        };
        if let Some(old) = previous {
            self.dispatch(old, UiEvent::Blur);
        }
        if let Some(new) = id {
            self.dispatch(new, UiEvent::Focus);
        }
    }

    // -----------------------------------------------------------------------
    // Listeners and dispatch
    // -----------------------------------------------------------------------

    /// Register a listener for events of `kind` on `element`.
    ///
    /// Returns `None` if the element does not exist. The callback runs with
    /// no internal borrow held, so it may freely use the document.
    pub fn add_listener(
        &self,
        element: ElementId,
        kind: EventKind,
        callback: impl Fn(&mut EventCtx) + 'static,
    ) -> Option<ListenerId> {
        let mut inner = self.inner.borrow_mut();
        if !inner.nodes.contains_key(element) {
            return None;
        }
        let id = ListenerId(inner.next_listener);
        inner.next_listener += 1;
        let entry = ListenerEntry {
            id,
            kind,
            callback: Rc::new(callback),
        };
        match inner.listeners.get_mut(element) {
            Some(entries) => entries.push(entry),
            None => {
                inner.listeners.insert(element, vec![entry]);
            }
        }
        Some(id)
    }

    /// Unregister a listener. Returns whether it was found.
    pub fn remove_listener(&self, element: ElementId, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        if let Some(entries) = inner.listeners.get_mut(element) {
            let before = entries.len();
            entries.retain(|entry| entry.id != id);
            return entries.len() != before;
        }
        false
    }

    /// Number of listeners registered on an element (all kinds).
    pub fn listener_count(&self, element: ElementId) -> usize {
        self.inner
            .borrow()
            .listeners
            .get(element)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Dispatch an event at `target`, bubbling through its ancestors.
    ///
    /// Listeners are delivered synchronously, target first, then each
    /// ancestor in order. Propagation stops after the current element once a
    /// listener calls [`EventCtx::stop_propagation`]. Returns whether any
    /// listener called [`EventCtx::prevent_default`].
    pub fn dispatch(&self, target: ElementId, event: UiEvent) -> bool {
        let kind = event.kind();
        let mut path = vec![target];
        path.extend(self.ancestors(target));

        let mut ctx = EventCtx::new(target, &event);
        for &node in &path {
            // Collect matching callbacks under the borrow, then release it
            // before invoking any of them.
            let callbacks: Vec<ListenerFn> = {
                let inner = self.inner.borrow();
                if !inner.nodes.contains_key(node) {
                    Vec::new()
                } else {
                    inner
                        .listeners
                        .get(node)
                        .map(|entries| {
                            entries
                                .iter()
                                .filter(|entry| entry.kind == kind)
                                .map(|entry| entry.callback.clone())
                                .collect()
                        })
                        .unwrap_or_default()
                }
            };
            ctx.set_current(node);
            for callback in callbacks {
                callback(&mut ctx);
            }
            if ctx.propagation_stopped() {
                break;
            }
        }
        ctx.default_prevented()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
