use crate::constants::{PRESERVE_3D, STYLE_TRANSFORM, STYLE_TRANSFORM_STYLE, STYLE_WILL_CHANGE};
use crate::dom::{self, LayerHandles};
use crate::events::{self, PointerListener};
use crate::frame::FrameLoop;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tilt_core::{Phase, TiltCard};
use web_sys as web;

/// Everything a mounted card's callbacks need. Shared between the pointer
/// listeners and the frame loop through weak references.
pub struct CardShared {
    element: web::HtmlElement,
    layers: LayerHandles,
    state: RefCell<TiltCard>,
    frame: FrameLoop,
}

impl CardShared {
    #[inline]
    pub fn element(&self) -> &web::HtmlElement {
        &self.element
    }

    pub fn on_pointer_move(&self, client_x: f32, client_y: f32) {
        // Geometry is re-read for every sample; layout may have shifted
        let bounds = dom::surface_bounds(&self.element);
        let wants_frame = self
            .state
            .borrow_mut()
            .pointer_move(client_x, client_y, bounds);
        if wants_frame {
            self.frame.request();
        }
    }

    pub fn on_pointer_leave(&self) {
        if self.state.borrow_mut().pointer_leave() {
            self.frame.request();
        }
    }

    fn on_frame(&self) {
        let dt_sec = self.frame.begin_frame();
        if !self.element.is_connected() {
            self.frame.sleep();
            return;
        }
        let outcome = self.state.borrow_mut().tick(dt_sec);
        self.apply_styles();
        if outcome.settled {
            log::debug!("[frame] settled in {:?}", outcome.phase);
            self.frame.sleep();
        } else {
            self.frame.request();
        }
    }

    fn apply_styles(&self) {
        let state = self.state.borrow();
        let css = state.transform().to_css(state.config().perspective_px);
        dom::set_style(&self.element, STYLE_TRANSFORM, &css);
        for (el, layer) in self.layers.iter().zip(state.layer_transforms()) {
            dom::set_style(el, STYLE_TRANSFORM, &layer.to_css());
        }
    }

    fn prepare_styles(&self) {
        dom::set_style(&self.element, STYLE_TRANSFORM_STYLE, PRESERVE_3D);
        dom::set_style(&self.element, STYLE_WILL_CHANGE, STYLE_TRANSFORM);
        for el in &self.layers {
            dom::set_style(el, STYLE_TRANSFORM_STYLE, PRESERVE_3D);
        }
        self.apply_styles();
    }

    fn clear_styles(&self) {
        for prop in [STYLE_TRANSFORM, STYLE_TRANSFORM_STYLE, STYLE_WILL_CHANGE] {
            dom::clear_style(&self.element, prop);
        }
        for el in &self.layers {
            dom::clear_style(el, STYLE_TRANSFORM);
            dom::clear_style(el, STYLE_TRANSFORM_STYLE);
        }
    }
}

/// A card attached to a DOM element. Dropping it unmounts the card: pointer
/// listeners are removed, the pending frame is cancelled and the inline
/// styles it wrote are cleared.
pub struct MountedCard {
    key: String,
    shared: Rc<CardShared>,
    listeners: Vec<PointerListener>,
}

impl MountedCard {
    pub fn mount(key: String, element: web::HtmlElement) -> Self {
        let (config, layers) = dom::read_card_config(&element);
        let shared = Rc::new_cyclic(|weak: &Weak<CardShared>| {
            let weak = weak.clone();
            CardShared {
                element,
                layers,
                state: RefCell::new(TiltCard::new(config)),
                frame: FrameLoop::new(move || {
                    if let Some(card) = weak.upgrade() {
                        card.on_frame();
                    }
                }),
            }
        });
        shared.prepare_styles();
        let listeners = events::wire_card_listeners(&shared);
        log::info!(
            "[mount] {} max={:.1}deg k={} c={} layers={}",
            key,
            shared.state.borrow().config().max_deg,
            shared.state.borrow().config().spring.stiffness,
            shared.state.borrow().config().spring.damping,
            shared.layers.len()
        );
        Self {
            key,
            shared,
            listeners,
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn phase(&self) -> Phase {
        self.shared.state.borrow().phase()
    }

    pub fn is_animating(&self) -> bool {
        self.shared.frame.is_scheduled()
    }
}

impl Drop for MountedCard {
    fn drop(&mut self) {
        // No new samples first, then no more frames
        self.listeners.clear();
        self.shared.frame.stop();
        self.shared.clear_styles();
        log::info!("[mount] {} unmounted", self.key);
    }
}
