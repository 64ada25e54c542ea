//! Slotmap-backed element tree with inline styles, form state, listeners,
//! and synchronous bubbling event dispatch.
//!
//! This is the host-document model the component library mutates: the same
//! seam a browser DOM provides, reduced to what styling and behavior need.

pub mod node;
pub mod query;
pub mod tree;

pub use node::{Element, ElementId, ElementKind};
pub use tree::{Document, ListenerId, MountRecord};
