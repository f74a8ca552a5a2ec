pub mod pointer;

pub use pointer::{wire_card_listeners, PointerListener};
