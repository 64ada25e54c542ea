//! EventCtx: per-dispatch state handed to listeners.

use crate::dom::ElementId;

use super::events::UiEvent;

/// Context passed to every listener during a dispatch.
///
/// One context lives for the whole dispatch; `current` is updated as the
/// event bubbles. Propagation control follows the host-document contract:
/// [`EventCtx::stop_propagation`] finishes the current element's listeners
/// and then stops bubbling; [`EventCtx::prevent_default`] is reported to the
/// dispatcher's caller.
pub struct EventCtx<'a> {
    /// The element the event was dispatched at.
    pub target: ElementId,
    /// The element whose listener is currently running.
    pub current: ElementId,
    /// The event being delivered.
    pub event: &'a UiEvent,
    stopped: bool,
    default_prevented: bool,
}

impl<'a> EventCtx<'a> {
    /// Create a context for a new dispatch.
    pub(crate) fn new(target: ElementId, event: &'a UiEvent) -> Self {
        Self {
            target,
            current: target,
            event,
            stopped: false,
            default_prevented: false,
        }
    }

    pub(crate) fn set_current(&mut self, current: ElementId) {
        self.current = current;
    }

    /// Stop the event from bubbling past the current element.
    pub fn stop_propagation(&mut self) {
        self.stopped = true;
    }

    /// Whether propagation has been stopped.
    pub fn propagation_stopped(&self) -> bool {
        self.stopped
    }

    /// Mark the event's default action as prevented.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether any listener prevented the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Document, Element, ElementKind};

    #[test]
    fn flags_start_clear() {
        let doc = Document::new();
        let el = doc.insert(Element::new(ElementKind::Container));
        let event = UiEvent::Click;
        let ctx = EventCtx::new(el, &event);
        assert!(!ctx.propagation_stopped());
        assert!(!ctx.default_prevented());
        assert_eq!(ctx.target, el);
        assert_eq!(ctx.current, el);
    }

    #[test]
    fn flags_latch() {
        let doc = Document::new();
        let el = doc.insert(Element::new(ElementKind::Container));
        let event = UiEvent::Click;
        let mut ctx = EventCtx::new(el, &event);
        ctx.stop_propagation();
        ctx.prevent_default();
        assert!(ctx.propagation_stopped());
        assert!(ctx.default_prevented());
    }
}
