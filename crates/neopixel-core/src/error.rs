//! Error types for neopixel-core.

use thiserror::Error;

/// Errors raised by frame construction and pixel access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// A coordinate fell outside the frame under [`OverflowMode::Error`](crate::OverflowMode::Error).
    #[error("tried to access ({x},{y}) but the frame has dimensions ({width},{height})")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    },

    /// A frame was requested with a zero dimension.
    #[error("invalid frame dimensions {width}x{height} (both must be positive)")]
    InvalidDimensions { width: usize, height: usize },

    /// No glyph exists for the requested digit.
    #[error("no glyph for digit {0} (expected 0-9)")]
    InvalidGlyph(u32),
}

/// Errors raised by a [`PixelSink`](crate::PixelSink) while pushing a frame.
#[derive(Debug, Error)]
pub enum SinkError {
    /// IO error from the output device.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The frame does not match the geometry the sink drives.
    #[error("frame is {actual_width}x{actual_height} but the sink expects {expected_width}x{expected_height}")]
    SizeMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },
}
