//! Client-side diagram renderer
//!
//! Finds diagram placeholders in the page, renders their source through the
//! diagram library and optionally wires pan/zoom onto the result. Browser
//! bindings live in [`crate::wasm`]; everything here is host-agnostic.

pub mod behavior;
pub mod dom;
pub mod markup;
pub mod once;
pub mod resize;
pub mod settings;
pub mod spawn;

pub use behavior::*;
pub use dom::*;
pub use markup::*;
pub use once::*;
pub use resize::*;
pub use settings::*;
#[cfg(target_arch = "wasm32")]
pub use spawn::*;
