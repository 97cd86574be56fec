//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Keyboard mapping (held movement keys, math entry, restart)
//! - The wasm-bindgen handle JavaScript drives once per animation frame

pub mod keyboard;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use keyboard::{HeldKey, KeyboardInput};
