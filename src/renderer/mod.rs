//! Rendering module
//!
//! Game logic never touches the presentation. Each frame the state is
//! projected into positioned sprites; on the web those sprites are applied to
//! absolutely positioned DOM elements.

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod sprites;

#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;
pub use sprites::{Frame, Sprite, project};
