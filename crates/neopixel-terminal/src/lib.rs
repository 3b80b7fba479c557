//! Terminal preview backend for neopixel LED frames.
//!
//! Stands in for LED hardware during development: a [`TerminalSink`] is a
//! [`neopixel_core::PixelSink`], so it can sit at the root of a view tree
//! exactly where a strip driver would.
//!
//! ```text
//! LayerView → Display → TerminalSink → crossterm
//! ```

mod color;
mod sink;

pub use color::ColorMode;
pub use sink::{TerminalGuard, TerminalSink};
