//! Document queries: attribute scans and radio groups.

use super::node::{ElementId, ElementKind};
use super::tree::Document;

impl Document {
    /// All elements carrying the given attribute, in document order.
    ///
    /// Only elements reachable from the root are considered. Used by
    /// declarative auto-initialization.
    pub fn elements_with_attr(&self, name: &str) -> Vec<ElementId> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&id| self.with(id, |el| el.has_attr(name)).unwrap_or(false))
            .collect()
    }

    /// All radio elements sharing a `name` attribute, in document order.
    pub fn radio_group(&self, name: &str) -> Vec<ElementId> {
        let Some(root) = self.root() else {
            return Vec::new();
        };
        self.walk_depth_first(root)
            .into_iter()
            .filter(|&id| {
                self.with(id, |el| {
                    el.kind == ElementKind::Radio && el.attr("name") == Some(name)
                })
                .unwrap_or(false)
            })
            .collect()
    }

    /// Find the first element with a given id attribute, in document order.
    pub fn element_by_id(&self, id: &str) -> Option<ElementId> {
        let root = self.root()?;
        self.walk_depth_first(root)
            .into_iter()
            .find(|&e| self.with(e, |el| el.id.as_deref() == Some(id)).unwrap_or(false))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
