#![forbid(unsafe_code)]

//! Core primitives for formbind: geometry, the input event model, and
//! (with the `crossterm` feature) terminal session lifecycle.

pub mod event;
pub mod geometry;
#[cfg(all(feature = "crossterm", not(target_arch = "wasm32")))]
pub mod terminal_session;
