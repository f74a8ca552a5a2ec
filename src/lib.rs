#![cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod card;
mod constants;
mod deck;
mod dom;
mod events;
mod frame;

pub use deck::{mount, mount_all, TiltDeck, TiltHandle};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("tiltdeck-web starting");
    Ok(())
}
