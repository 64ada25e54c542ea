//! ThemeContext: process-wide theme state with an explicit observer list.
//!
//! One context is created at startup and injected into every component
//! constructor. Replacing the theme is an atomic pointer swap; observers are
//! notified synchronously, in subscription order, before the call returns.

use std::cell::RefCell;
use std::rc::Rc;

use crate::dom::Document;

use super::theme::{Preset, Theme, ThemePatch};

// ---------------------------------------------------------------------------
// ThemeSpec
// ---------------------------------------------------------------------------

/// What to set the theme to: a named preset or a full custom theme.
#[derive(Debug, Clone)]
pub enum ThemeSpec {
    Preset(Preset),
    Custom(Theme),
}

impl From<Preset> for ThemeSpec {
    fn from(preset: Preset) -> Self {
        Self::Preset(preset)
    }
}

impl From<Theme> for ThemeSpec {
    fn from(theme: Theme) -> Self {
        Self::Custom(theme)
    }
}

// ---------------------------------------------------------------------------
// ColorSchemeSource
// ---------------------------------------------------------------------------

/// A host-platform source for the user's preferred color scheme.
///
/// The browser equivalent is the `prefers-color-scheme` media query; a
/// desktop host would bridge its appearance API. The source reports the
/// current preference and pushes changes for the lifetime of the page.
pub trait ColorSchemeSource {
    /// The currently preferred scheme.
    fn preferred(&self) -> Preset;

    /// Register a callback invoked on every subsequent preference change.
    fn on_change(&self, callback: Box<dyn Fn(Preset)>);
}

// ---------------------------------------------------------------------------
// ThemeContext
// ---------------------------------------------------------------------------

/// Handle to an observer subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Rc<dyn Fn(&Theme)>;

struct CtxInner {
    document: Document,
    current: Rc<Theme>,
    observers: Vec<(SubscriptionId, Observer)>,
    next_sub: u64,
}

/// Shared, cheap-clone theme store. Only [`ThemeContext::set_theme`] writes
/// the current theme; readers always observe a complete theme.
#[derive(Clone)]
pub struct ThemeContext {
    inner: Rc<RefCell<CtxInner>>,
}

impl ThemeContext {
    /// Create a context over a document, starting on the light preset.
    pub fn new(document: Document) -> Self {
        let ctx = Self {
            inner: Rc::new(RefCell::new(CtxInner {
                document,
                current: Rc::new(Theme::light()),
                observers: Vec::new(),
                next_sub: 0,
            })),
        };
        ctx.write_root_variables();
        ctx
    }

    /// The current theme, by shared reference. Callers must not rely on the
    /// value after the next `set_theme`; they re-read instead.
    pub fn current(&self) -> Rc<Theme> {
        self.inner.borrow().current.clone()
    }

    /// Replace the current theme with a preset or a full custom theme.
    ///
    /// Writes the theme's values as `--nm-*` style variables on the document
    /// root (when one exists), then notifies every observer synchronously in
    /// subscription order before returning.
    pub fn set_theme(&self, spec: impl Into<ThemeSpec>) {
        let theme = match spec.into() {
            ThemeSpec::Preset(preset) => Theme::preset(preset),
            ThemeSpec::Custom(theme) => theme,
        };
        let observers: Vec<Observer> = {
            let mut inner = self.inner.borrow_mut();
            inner.current = Rc::new(theme);
            inner.observers.iter().map(|(_, o)| o.clone()).collect()
        };
        self.write_root_variables();
        let current = self.current();
        for observer in observers {
            observer(&current);
        }
    }

    /// A new theme merging `patch` over the current one. Does not apply it;
    /// pass the result to [`ThemeContext::set_theme`] to activate.
    pub fn custom_theme(&self, patch: &ThemePatch) -> Theme {
        self.current().merged(patch)
    }

    /// Subscribe to theme changes. The callback runs on every `set_theme`
    /// until unsubscribed.
    pub fn subscribe(&self, callback: impl Fn(&Theme) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_sub);
        inner.next_sub += 1;
        inner.observers.push((id, Rc::new(callback)));
        id
    }

    /// Remove a subscription. Returns whether it was found.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.observers.len();
        inner.observers.retain(|(sub, _)| *sub != id);
        inner.observers.len() != before
    }

    /// Number of live subscriptions.
    pub fn observer_count(&self) -> usize {
        self.inner.borrow().observers.len()
    }

    /// Apply the host's color-scheme preference now and follow its changes
    /// for the lifetime of this context.
    pub fn auto_detect(&self, source: &dyn ColorSchemeSource) {
        self.set_theme(source.preferred());
        let weak = Rc::downgrade(&self.inner);
        source.on_change(Box::new(move |preset| {
            if let Some(inner) = weak.upgrade() {
                ThemeContext { inner }.set_theme(preset);
            }
        }));
    }

    /// Write the current theme as style variables on the document root.
    fn write_root_variables(&self) {
        let (document, theme) = {
            let inner = self.inner.borrow();
            (inner.document.clone(), inner.current.clone())
        };
        let Some(root) = document.root() else {
            return;
        };
        document.set_style(root, "--nm-surface", &theme.surface);
        document.set_style(root, "--nm-shadow-light", &theme.shadow.light);
        document.set_style(root, "--nm-shadow-dark", &theme.shadow.dark);
        document.set_style(root, "--nm-text-primary", &theme.text.primary);
        document.set_style(root, "--nm-text-secondary", &theme.text.secondary);
        document.set_style(root, "--nm-accent", &theme.accent);
        document.set_style(root, "--nm-error", &theme.error);
        document.set_style(root, "--nm-success", &theme.success);
        document.set_style(root, "--nm-radius", &theme.radius);
        document.set_style(root, "--nm-transition", theme.animation.transition_css());
    }
}

// ===========================================================================
// Tests
// ===========================================================================
