use crate::card::CardShared;
use crate::constants::{EVENT_POINTER_CANCEL, EVENT_POINTER_LEAVE, EVENT_POINTER_MOVE};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// An event listener that unregisters itself when dropped.
pub struct PointerListener {
    target: web::HtmlElement,
    event: &'static str,
    closure: Closure<dyn FnMut(web::PointerEvent)>,
}

impl PointerListener {
    pub fn attach(
        target: &web::HtmlElement,
        event: &'static str,
        handler: impl FnMut(web::PointerEvent) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::PointerEvent)>);
        match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                event,
                closure,
            }),
            Err(e) => {
                log::warn!("[mount] could not listen for {}: {:?}", event, e);
                None
            }
        }
    }
}

impl Drop for PointerListener {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Listen for move, leave and cancel on the card's surface.
///
/// Handlers hold weak references, so an event that races an unmount finds
/// nothing to update.
pub fn wire_card_listeners(card: &Rc<CardShared>) -> Vec<PointerListener> {
    let mut listeners = Vec::with_capacity(3);

    let weak = Rc::downgrade(card);
    listeners.extend(PointerListener::attach(
        card.element(),
        EVENT_POINTER_MOVE,
        move |ev: web::PointerEvent| {
            if let Some(card) = weak.upgrade() {
                card.on_pointer_move(ev.client_x() as f32, ev.client_y() as f32);
            }
        },
    ));

    for event in [EVENT_POINTER_LEAVE, EVENT_POINTER_CANCEL] {
        let weak = Rc::downgrade(card);
        listeners.extend(PointerListener::attach(
            card.element(),
            event,
            move |_ev: web::PointerEvent| {
                if let Some(card) = weak.upgrade() {
                    card.on_pointer_leave();
                }
            },
        ));
    }

    listeners
}
