//! Typed events: the fixed event table and dispatch context.
//!
//! Instead of stringly-named custom events, the observable surface is a
//! closed enum — event kind and payload shape are fixed at compile time, so
//! the same contract transfers to any host target.

pub mod ctx;
pub mod events;

pub use ctx::EventCtx;
pub use events::{EventKind, UiEvent};
