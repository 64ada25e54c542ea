//! Component base layer: shared lifecycle state, the widget contract, and
//! the debounce helper.

pub mod core;
pub mod debounce;
pub mod error;
pub mod traits;

pub use self::core::{ComponentCore, BASE_CLASS};
pub use debounce::Debouncer;
pub use error::ComponentError;
pub use traits::{AnyComponent, Component, TextField};
