use crate::card::MountedCard;
use crate::constants::{DEFAULT_CARD_SELECTOR, GENERATED_KEY_PREFIX};
use crate::dom;
use fnv::FnvHashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use wasm_bindgen::prelude::*;
use web_sys as web;

static NEXT_KEY: AtomicU32 = AtomicU32::new(0);

/// The element id, or a generated `tilt-N` key for id-less elements.
fn key_for(element: &web::HtmlElement) -> String {
    let id = element.id();
    if id.is_empty() {
        format!(
            "{}{}",
            GENERATED_KEY_PREFIX,
            NEXT_KEY.fetch_add(1, Ordering::Relaxed)
        )
    } else {
        id
    }
}

/// A JS-owned set of mounted tilt cards. Freeing it unmounts every card.
#[wasm_bindgen]
#[derive(Default)]
pub struct TiltDeck {
    cards: FnvHashMap<String, MountedCard>,
}

#[wasm_bindgen]
impl TiltDeck {
    #[wasm_bindgen(constructor)]
    pub fn new() -> TiltDeck {
        TiltDeck::default()
    }

    /// Mount `element` and return its key. Mounting an element whose key is
    /// already present replaces the previous card.
    pub fn mount(&mut self, element: web::HtmlElement) -> String {
        let key = key_for(&element);
        if self.cards.remove(&key).is_some() {
            log::info!("[deck] remounting {}", key);
        }
        let card = MountedCard::mount(key.clone(), element);
        self.cards.insert(key.clone(), card);
        key
    }

    /// Unmount the card stored under `key`. Returns whether one was found.
    pub fn unmount(&mut self, key: &str) -> bool {
        self.cards.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        let n = self.cards.len();
        self.cards.clear();
        log::info!("[deck] cleared {} card(s)", n);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[wasm_bindgen(js_name = isEmpty)]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn keys(&self) -> Vec<String> {
        self.cards.keys().cloned().collect()
    }

    /// Interaction phase of a card (`Idle`, `Tracking` or `Returning`).
    pub fn phase(&self, key: &str) -> Option<String> {
        self.cards.get(key).map(|c| format!("{:?}", c.phase()))
    }

    /// Number of cards with a frame pending right now.
    #[wasm_bindgen(js_name = animatingCount)]
    pub fn animating_count(&self) -> usize {
        self.cards.values().filter(|c| c.is_animating()).count()
    }
}

/// Mount every element matching `selector` (default `[data-tilt]`).
#[wasm_bindgen(js_name = mountAll)]
pub fn mount_all(selector: Option<String>) -> Result<TiltDeck, JsValue> {
    collect_deck(selector.as_deref().unwrap_or(DEFAULT_CARD_SELECTOR))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn collect_deck(selector: &str) -> anyhow::Result<TiltDeck> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let elements = dom::query_elements(&document, selector)?;
    let mut deck = TiltDeck::new();
    for el in elements {
        deck.mount(el);
    }
    log::info!("[deck] mounted {} card(s) for {:?}", deck.len(), selector);
    Ok(deck)
}

/// A single JS-owned card. Freeing the handle unmounts it.
#[wasm_bindgen]
pub struct TiltHandle {
    card: MountedCard,
}

#[wasm_bindgen]
impl TiltHandle {
    pub fn key(&self) -> String {
        self.card.key().to_string()
    }

    pub fn phase(&self) -> String {
        format!("{:?}", self.card.phase())
    }

    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.card.is_animating()
    }
}

/// Mount one element outside any deck.
#[wasm_bindgen]
pub fn mount(element: web::HtmlElement) -> TiltHandle {
    let key = key_for(&element);
    TiltHandle {
        card: MountedCard::mount(key, element),
    }
}
