//! # neumo
//!
//! Framework-agnostic neumorphic UI components over a retained element tree.
//!
//! neumo styles and drives soft-UI ("neumorphic") widgets — cards, text
//! fields, toggles, buttons — against a headless document model standing in
//! for the host page. Components claim an element, restyle it from the
//! active theme, attach behavior, and reverse every mutation on destroy.
//!
//! ## Core Systems
//!
//! - **[`dom`]** — Slotmap-backed element arena: tree operations, inline
//!   styles, listeners, bubbling dispatch
//! - **[`event`]** — The closed, typed event table components emit and
//!   listeners subscribe by
//! - **[`theme`]** — Theme records, presets, deep merge, and the observable
//!   theme context
//! - **[`style`]** — The shared soft-shadow formula and size variants
//! - **[`validate`]** — Rule evaluation, password-strength scoring, the
//!   per-element validation manager, external-validator adapters
//! - **[`component`]** — Shared component lifecycle: the core state every
//!   widget embeds, the `Component`/`TextField` contracts, debouncing
//! - **[`widgets`]** — Built-in widgets: Card, Input, Password, Textarea,
//!   Toggle, Button
//! - **[`autoinit`]** — Declarative initialization from element attributes
//! - **[`ui`]** — The injected context bundle tying document, theme, and
//!   validation together

// Foundation
pub mod dom;
pub mod event;

// Styling
pub mod style;
pub mod theme;

// Validation
pub mod validate;

// Component system
pub mod component;
pub mod widgets;

// Entry points
pub mod autoinit;
pub mod ui;

pub use autoinit::auto_init;
pub use component::{AnyComponent, Component, ComponentError, TextField};
pub use ui::Ui;
