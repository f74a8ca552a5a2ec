use instant::Instant;
use std::cell::{Cell, RefCell};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A requestAnimationFrame ticking task owned by one card.
///
/// The callback runs at most once per requested frame. The owner re-requests
/// from inside the callback while it still has motion to show and calls
/// [`FrameLoop::sleep`] once it settles; nothing is scheduled while idle.
pub struct FrameLoop {
    raf_id: Cell<Option<i32>>,
    last_frame: Cell<Option<Instant>>,
    callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl FrameLoop {
    pub fn new(mut on_frame: impl FnMut() + 'static) -> Self {
        let callback = Closure::wrap(Box::new(move || on_frame()) as Box<dyn FnMut()>);
        Self {
            raf_id: Cell::new(None),
            last_frame: Cell::new(None),
            callback: RefCell::new(Some(callback)),
        }
    }

    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.raf_id.get().is_some()
    }

    /// Schedule the next frame unless one is already pending or the loop was stopped.
    pub fn request(&self) {
        if self.is_scheduled() {
            return;
        }
        let Some(window) = web::window() else {
            return;
        };
        let callback = self.callback.borrow();
        let Some(cb) = callback.as_ref() else {
            return;
        };
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => self.raf_id.set(Some(id)),
            Err(e) => log::warn!("[frame] requestAnimationFrame failed: {:?}", e),
        }
    }

    /// Mark the pending frame as delivered and return the seconds elapsed
    /// since the previous one. The first frame after a wake-up reports 0.0,
    /// which the spring replaces with its nominal delta.
    pub fn begin_frame(&self) -> f32 {
        self.raf_id.set(None);
        let now = Instant::now();
        self.last_frame
            .replace(Some(now))
            .map(|prev| now.duration_since(prev).as_secs_f32())
            .unwrap_or(0.0)
    }

    /// Stop ticking until the next `request`, forgetting the frame clock so
    /// the idle gap is not fed to the spring.
    pub fn sleep(&self) {
        self.last_frame.set(None);
    }

    /// Cancel any pending frame and drop the callback for good.
    pub fn stop(&self) {
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.last_frame.set(None);
        self.callback.borrow_mut().take();
    }
}
