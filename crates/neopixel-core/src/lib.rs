//! Core types for driving addressable-LED pixel grids.
//!
//! This crate provides:
//! - Packed LED color: [`Color`] with saturating add and a hue wheel
//! - Bounds policy: [`OverflowMode`] (`Error`, `Clip`, `Wrap`)
//! - Framebuffer: [`ColorFrame`] with pixel, fill and rect operations
//! - Compositing: [`CombineMode`] and [`ColorFrame::combine_rect`]
//! - Change propagation: [`Drawable`], [`FrameView`], [`LayerView`], [`Display`]
//! - Output: [`PixelSink`] and the recording [`MemorySink`]
//! - Digit glyphs: [`digit_glyph`], [`number_glyphs`]

mod color;
mod combine;
mod error;
mod frame;
pub mod glyph;
mod overflow;
mod sink;
pub mod view;

pub use color::{Color, ColorParseError};
pub use combine::CombineMode;
pub use error::{FrameError, SinkError};
pub use frame::ColorFrame;
pub use glyph::{digit_glyph, number_glyphs};
pub use overflow::OverflowMode;
pub use sink::{MemorySink, PixelSink};
pub use view::{Display, Drawable, FrameSource, FrameView, LayerView};
