pub mod card;
pub mod config;
pub mod constants;
pub mod normalize;
pub mod pointer;
pub mod spring;
pub mod transform;

pub use card::*;
pub use config::*;
pub use constants::*;
pub use normalize::*;
pub use pointer::*;
pub use spring::*;
pub use transform::*;
