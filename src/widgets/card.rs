//! Card: a soft-shadowed container surface.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::Deserialize;

use crate::component::{Component, ComponentCore, ComponentError};
use crate::dom::ElementId;
use crate::event::{EventKind, UiEvent};
use crate::style::{hover_css, shadow_css, ControlSize, ShadowVariant};
use crate::ui::Ui;

/// Class added to every card target.
pub const CARD_CLASS: &str = "nm-card";

/// Vertical lift applied to a hovered raised card.
const HOVER_LIFT: &str = "translateY(-2px)";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Full card configuration. Missing fields take defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CardConfig {
    pub variant: ShadowVariant,
    pub size: ControlSize,
    pub hoverable: bool,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            variant: ShadowVariant::default(),
            size: ControlSize::default(),
            hoverable: true,
        }
    }
}

/// Partial card reconfiguration. `None` fields leave the current setting.
#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub variant: Option<ShadowVariant>,
    pub size: Option<ControlSize>,
    pub hoverable: Option<bool>,
}

// ---------------------------------------------------------------------------
// Card
// ---------------------------------------------------------------------------

struct CardState {
    core: ComponentCore,
    config: CardConfig,
    hovered: bool,
}

/// An element styled as a soft surface, with an optional hover lift on the
/// raised variant.
pub struct Card {
    state: Rc<RefCell<CardState>>,
}

impl Card {
    /// Attach a card to any element.
    pub fn new(ui: &Ui, element: ElementId, config: CardConfig) -> Result<Self, ComponentError> {
        let core = ComponentCore::attach(ui, element, "Card", "any element", |_| true)?;

        let state = Rc::new(RefCell::new(CardState {
            core,
            config,
            hovered: false,
        }));
        state.borrow_mut().core.add_class(CARD_CLASS);

        let weak = Rc::downgrade(&state);
        let sub = ui.theme().subscribe(move |_| Self::repaint_weak(&weak));
        state.borrow_mut().core.set_theme_subscription(sub);

        let weak = Rc::downgrade(&state);
        state.borrow_mut().core.listen(element, EventKind::PointerEnter, move |_| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().hovered = true;
                Self::repaint(&state.borrow());
            }
        });
        let weak = Rc::downgrade(&state);
        state.borrow_mut().core.listen(element, EventKind::PointerLeave, move |_| {
            if let Some(state) = weak.upgrade() {
                state.borrow_mut().hovered = false;
                Self::repaint(&state.borrow());
            }
        });

        Self::repaint(&state.borrow());
        Ok(Self { state })
    }

    fn repaint_weak(weak: &Weak<RefCell<CardState>>) {
        if let Some(state) = weak.upgrade() {
            Self::repaint(&state.borrow());
        }
    }

    fn repaint(state: &CardState) {
        if state.core.is_destroyed() {
            return;
        }
        let theme = state.core.theme();
        let doc = state.core.document();
        let el = state.core.element();

        state.core.apply_base_style();
        doc.set_style(el, "padding", state.config.size.padding_css(&theme));

        let lifted =
            state.hovered && state.config.hoverable && state.config.variant == ShadowVariant::Raised;
        let shadow = if lifted {
            hover_css(state.config.variant, theme.intensity, &theme)
        } else {
            shadow_css(state.config.variant, theme.intensity, &theme)
        };
        doc.set_style(el, "box-shadow", shadow);
        if lifted {
            doc.set_style(el, "transform", HOVER_LIFT);
        } else {
            doc.remove_style(el, "transform");
        }
    }

    /// The active configuration.
    pub fn config(&self) -> CardConfig {
        self.state.borrow().config.clone()
    }
}

impl Component for Card {
    type Patch = CardPatch;

    fn element(&self) -> ElementId {
        self.state.borrow().core.element()
    }

    fn is_destroyed(&self) -> bool {
        self.state.borrow().core.is_destroyed()
    }

    fn update(&self, patch: CardPatch) {
        {
            let mut state = self.state.borrow_mut();
            if state.core.is_destroyed() {
                tracing::warn!("Card: update after destroy ignored");
                return;
            }
            if let Some(variant) = patch.variant {
                state.config.variant = variant;
            }
            if let Some(size) = patch.size {
                state.config.size = size;
            }
            if let Some(hoverable) = patch.hoverable {
                state.config.hoverable = hoverable;
            }
        }
        Self::repaint(&self.state.borrow());
    }

    fn destroy(&self) {
        let torn_down = self.state.borrow_mut().core.teardown();
        if torn_down {
            let (doc, el) = {
                let state = self.state.borrow();
                (state.core.document().clone(), state.core.element())
            };
            doc.dispatch(el, UiEvent::Destroyed);
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, ElementKind};
    use crate::theme::Preset;
    use std::cell::Cell;

    fn setup() -> (Ui, ElementId) {
        let ui = Ui::new();
        let root = ui.document().insert(Element::new(ElementKind::Container));
        let el = ui
            .document()
            .insert_child(root, Element::new(ElementKind::Container))
            .unwrap();
        (ui, el)
    }

    #[test]
    fn accepts_any_element_kind() {
        let ui = Ui::new();
        let root = ui.document().insert(Element::new(ElementKind::Container));
        for kind in [ElementKind::Button, ElementKind::TextInput, ElementKind::Text] {
            let el = ui.document().insert_child(root, Element::new(kind)).unwrap();
            let card = Card::new(&ui, el, CardConfig::default()).unwrap();
            assert!(ui.document().has_class(el, CARD_CLASS));
            card.destroy();
            assert!(!ui.document().has_class(el, CARD_CLASS));
        }
    }

    #[test]
    fn paints_raised_shadow_and_padding() {
        let (ui, el) = setup();
        let _card = Card::new(&ui, el, CardConfig::default()).unwrap();
        let theme = ui.theme().current();
        assert_eq!(
            ui.document().style(el, "box-shadow"),
            Some(shadow_css(ShadowVariant::Raised, theme.intensity, &theme))
        );
        assert_eq!(ui.document().style(el, "padding").as_deref(), Some("16px"));
        assert!(ui.document().has_class(el, CARD_CLASS));
    }

    #[test]
    fn hover_lifts_raised_card() {
        let (ui, el) = setup();
        let _card = Card::new(&ui, el, CardConfig::default()).unwrap();
        ui.document().dispatch(el, UiEvent::PointerEnter);
        let theme = ui.theme().current();
        assert_eq!(
            ui.document().style(el, "box-shadow"),
            Some(hover_css(ShadowVariant::Raised, theme.intensity, &theme))
        );
        assert_eq!(ui.document().style(el, "transform").as_deref(), Some(HOVER_LIFT));

        ui.document().dispatch(el, UiEvent::PointerLeave);
        assert!(ui.document().style(el, "transform").is_none());
    }

    #[test]
    fn hover_is_inert_when_not_hoverable() {
        let (ui, el) = setup();
        let config = CardConfig {
            hoverable: false,
            ..CardConfig::default()
        };
        let _card = Card::new(&ui, el, config).unwrap();
        let rest = ui.document().style(el, "box-shadow");
        ui.document().dispatch(el, UiEvent::PointerEnter);
        assert_eq!(ui.document().style(el, "box-shadow"), rest);
    }

    #[test]
    fn hover_is_inert_on_inset_variant() {
        let (ui, el) = setup();
        let config = CardConfig {
            variant: ShadowVariant::Inset,
            ..CardConfig::default()
        };
        let _card = Card::new(&ui, el, config).unwrap();
        ui.document().dispatch(el, UiEvent::PointerEnter);
        assert!(ui.document().style(el, "transform").is_none());
    }

    #[test]
    fn update_repaints_with_new_variant() {
        let (ui, el) = setup();
        let card = Card::new(&ui, el, CardConfig::default()).unwrap();
        card.update(CardPatch {
            variant: Some(ShadowVariant::Flat),
            ..CardPatch::default()
        });
        assert_eq!(ui.document().style(el, "box-shadow").as_deref(), Some("none"));
        // Unset fields kept their values.
        assert!(card.config().hoverable);
    }

    #[test]
    fn theme_change_repaints() {
        let (ui, el) = setup();
        let _card = Card::new(&ui, el, CardConfig::default()).unwrap();
        ui.theme().set_theme(Preset::Dark);
        let theme = ui.theme().current();
        assert_eq!(
            ui.document().style(el, "box-shadow"),
            Some(shadow_css(ShadowVariant::Raised, theme.intensity, &theme))
        );
        assert_eq!(
            ui.document().style(el, "background-color").as_deref(),
            Some(theme.surface.as_str())
        );
    }

    #[test]
    fn destroy_restores_element_and_notifies() {
        let (ui, el) = setup();
        ui.document().set_style(el, "margin", "2px");
        let card = Card::new(&ui, el, CardConfig::default()).unwrap();

        let destroyed = Rc::new(Cell::new(false));
        let d = destroyed.clone();
        ui.document()
            .add_listener(el, EventKind::Destroyed, move |_| d.set(true));

        card.destroy();
        assert!(card.is_destroyed());
        assert!(destroyed.get());
        assert!(!ui.document().has_class(el, CARD_CLASS));
        assert!(ui.document().style(el, "box-shadow").is_none());
        assert_eq!(ui.document().style(el, "margin").as_deref(), Some("2px"));
    }

    #[test]
    fn destroy_is_idempotent() {
        let (ui, el) = setup();
        let card = Card::new(&ui, el, CardConfig::default()).unwrap();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        ui.document()
            .add_listener(el, EventKind::Destroyed, move |_| c.set(c.get() + 1));
        card.destroy();
        card.destroy();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn update_after_destroy_is_ignored() {
        let (ui, el) = setup();
        let card = Card::new(&ui, el, CardConfig::default()).unwrap();
        card.destroy();
        card.update(CardPatch {
            variant: Some(ShadowVariant::Flat),
            ..CardPatch::default()
        });
        assert!(ui.document().style(el, "box-shadow").is_none());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: CardConfig = serde_json::from_str(r#"{"variant":"inset"}"#).unwrap();
        assert_eq!(config.variant, ShadowVariant::Inset);
        assert!(config.hoverable);
        assert_eq!(config.size, ControlSize::Md);
    }
}
