//! Output side of the view tree.

use crate::{ColorFrame, SinkError};

/// Destination for fully resolved frames (LED driver, preview, recorder).
pub trait PixelSink {
    /// Push one frame to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if the output rejects the frame or the device fails.
    fn show(&mut self, frame: &ColorFrame) -> Result<(), SinkError>;
}

impl<S: PixelSink + ?Sized> PixelSink for Box<S> {
    fn show(&mut self, frame: &ColorFrame) -> Result<(), SinkError> {
        (**self).show(frame)
    }
}

/// Sink that keeps a copy of every frame it is shown.
#[derive(Debug, Default)]
pub struct MemorySink {
    frames: Vec<ColorFrame>,
    geometry: Option<(usize, usize)>,
}

impl MemorySink {
    /// Accept frames of any size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept only `width` x `height` frames, like a fixed LED panel.
    #[must_use]
    pub fn with_geometry(width: usize, height: usize) -> Self {
        Self {
            frames: Vec::new(),
            geometry: Some((width, height)),
        }
    }

    /// Every frame shown so far, oldest first.
    #[must_use]
    pub fn frames(&self) -> &[ColorFrame] {
        &self.frames
    }

    /// The most recent frame.
    #[must_use]
    pub fn last(&self) -> Option<&ColorFrame> {
        self.frames.last()
    }

    /// Drop recorded frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl PixelSink for MemorySink {
    fn show(&mut self, frame: &ColorFrame) -> Result<(), SinkError> {
        if let Some((width, height)) = self.geometry {
            if (frame.width(), frame.height()) != (width, height) {
                return Err(SinkError::SizeMismatch {
                    expected_width: width,
                    expected_height: height,
                    actual_width: frame.width(),
                    actual_height: frame.height(),
                });
            }
        }
        self.frames.push(frame.clone());
        Ok(())
    }
}
