//! Construction errors.
//!
//! These are the only thrown failures in the library: raised synchronously,
//! before any document mutation, when a widget is handed an unusable target
//! element. Everything downstream degrades to warnings or result values.

/// Why a widget constructor refused its target element.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// The supplied id does not refer to a live element.
    #[error("{widget}: target is not an element in the document")]
    NotAnElement {
        /// The widget being constructed.
        widget: &'static str,
    },

    /// The element exists but is the wrong kind for this widget.
    #[error("{widget} requires a {expected} element, got {actual}")]
    InvalidElementKind {
        /// The widget being constructed.
        widget: &'static str,
        /// The kind(s) the widget accepts.
        expected: &'static str,
        /// The kind that was supplied.
        actual: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_widget() {
        let err = ComponentError::InvalidElementKind {
            widget: "Input",
            expected: "text input",
            actual: "button",
        };
        assert_eq!(
            err.to_string(),
            "Input requires a text input element, got button"
        );

        let err = ComponentError::NotAnElement { widget: "Card" };
        assert!(err.to_string().contains("Card"));
    }
}
