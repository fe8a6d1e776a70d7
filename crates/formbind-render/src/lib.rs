#![forbid(unsafe_code)]

//! Render target for formbind.
//!
//! Widgets draw into a [`Buffer`](buffer::Buffer): a fixed-size grid of
//! [`Cell`](cell::Cell)s. The buffer is backend-neutral; the demo copies
//! [`Buffer::to_lines`](buffer::Buffer::to_lines) to the terminal and tests
//! compare the same text.

pub mod buffer;
pub mod cell;
