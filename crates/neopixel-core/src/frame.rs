//! Fixed-size grid of packed colors.

use crate::view::Drawable;
use crate::{Color, FrameError, OverflowMode};
use std::rc::Weak;

/// Rectangular grid of [`Color`] values with a fixed size.
///
/// Storage is row-major. A frame may carry a non-owning link to a parent
/// [`Drawable`]; [`ColorFrame::draw`] forwards to it so that whoever owns
/// the physical output learns the content may have changed.
///
/// Clones copy the grid only; a clone starts without a parent.
pub struct ColorFrame {
    width: usize,
    height: usize,
    colors: Vec<Color>,
    parent: Option<Weak<dyn Drawable>>,
}

impl ColorFrame {
    /// Create a `width` x `height` frame filled with `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::InvalidDimensions`] if either dimension is zero.
    pub fn new(width: usize, height: usize, fill: Color) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            colors: vec![fill; width * height],
            parent: None,
        })
    }

    /// Frame width in cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Frame height in cells.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total cell count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; frames have at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Row-major view of every cell.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Iterate over `(x, y, color)` in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        let width = self.width;
        self.colors
            .iter()
            .enumerate()
            .map(move |(idx, &color)| (idx % width, idx / width, color))
    }

    /// Resolve a coordinate to a linear index, or `None` if clipped.
    fn locate(
        &self,
        x: i64,
        y: i64,
        mode: OverflowMode,
    ) -> Result<Option<usize>, FrameError> {
        match mode.resolve(x, y, self.width, self.height) {
            Ok(cell) => Ok(cell.map(|(col, row)| row * self.width + col)),
            Err(err) => {
                tracing::debug!(%err, "rejected out-of-bounds pixel access");
                Err(err)
            }
        }
    }

    /// Read a cell.
    ///
    /// Clipped reads return [`Color::BLACK`].
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::OutOfBounds`] under [`OverflowMode::Error`].
    pub fn get(&self, x: i32, y: i32, mode: OverflowMode) -> Result<Color, FrameError> {
        self.read(i64::from(x), i64::from(y), mode)
    }

    pub(crate) fn read(&self, x: i64, y: i64, mode: OverflowMode) -> Result<Color, FrameError> {
        Ok(self
            .locate(x, y, mode)?
            .map_or(Color::BLACK, |idx| self.colors[idx]))
    }

    /// Write a cell.
    ///
    /// Clipped writes are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::OutOfBounds`] under [`OverflowMode::Error`];
    /// the grid is left untouched.
    pub fn set(
        &mut self,
        x: i32,
        y: i32,
        color: Color,
        mode: OverflowMode,
    ) -> Result<(), FrameError> {
        self.write(i64::from(x), i64::from(y), color, mode)
    }

    pub(crate) fn write(
        &mut self,
        x: i64,
        y: i64,
        color: Color,
        mode: OverflowMode,
    ) -> Result<(), FrameError> {
        if let Some(idx) = self.locate(x, y, mode)? {
            self.colors[idx] = color;
        }
        Ok(())
    }

    /// Overwrite every cell.
    pub fn set_all(&mut self, color: Color) {
        self.colors.fill(color);
    }

    /// Paste `source` with its top-left corner at `(x, y)`.
    ///
    /// Every destination cell is resolved independently, so a paste that
    /// hangs off the edge is partially applied under `Clip` and folded
    /// back under `Wrap`.
    ///
    /// # Errors
    ///
    /// Under [`OverflowMode::Error`] the whole destination rectangle is
    /// checked first; the first out-of-range cell (row-major) is reported
    /// and nothing is written.
    pub fn set_rect(
        &mut self,
        x: i32,
        y: i32,
        source: &Self,
        mode: OverflowMode,
    ) -> Result<(), FrameError> {
        self.check_rect(x, y, source, mode)?;
        for (j, i, color) in source.pixels() {
            self.write(offset(x, j), offset(y, i), color, mode)?;
        }
        Ok(())
    }

    /// Validate that every cell `source` would cover at `(x, y)` resolves.
    pub(crate) fn check_rect(
        &self,
        x: i32,
        y: i32,
        source: &Self,
        mode: OverflowMode,
    ) -> Result<(), FrameError> {
        if mode != OverflowMode::Error {
            return Ok(());
        }
        for i in 0..source.height {
            for j in 0..source.width {
                self.locate(offset(x, j), offset(y, i), mode)?;
            }
        }
        Ok(())
    }

    /// Attach the parent notified by [`ColorFrame::draw`].
    pub fn set_parent(&mut self, parent: Weak<dyn Drawable>) {
        self.parent = Some(parent);
    }

    /// Detach the parent.
    pub fn clear_parent(&mut self) {
        self.parent = None;
    }

    /// True if a parent is attached and still alive.
    #[must_use]
    pub fn has_parent(&self) -> bool {
        self.parent.as_ref().is_some_and(|p| p.strong_count() > 0)
    }

    /// Signal that this frame's content may have changed.
    ///
    /// Forwards to the parent's `draw()` if there is one; otherwise does
    /// nothing. Runs on every call, whether or not anything changed.
    pub fn draw(&self) {
        if let Some(parent) = self.parent.as_ref().and_then(Weak::upgrade) {
            tracing::trace!(width = self.width, height = self.height, "propagating draw");
            parent.draw();
        }
    }
}

impl Drawable for ColorFrame {
    fn draw(&self) {
        Self::draw(self);
    }
}

impl Clone for ColorFrame {
    fn clone(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            colors: self.colors.clone(),
            parent: None,
        }
    }
}

impl PartialEq for ColorFrame {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.colors == other.colors
    }
}

impl Eq for ColorFrame {}

impl std::fmt::Debug for ColorFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorFrame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("colors", &self.colors)
            .field("has_parent", &self.has_parent())
            .finish()
    }
}

/// `base + delta` widened to `i64`, so rect cells past `i32::MAX` keep
/// their true coordinate.
pub(crate) fn offset(base: i32, delta: usize) -> i64 {
    i64::from(base).saturating_add(i64::try_from(delta).unwrap_or(i64::MAX))
}
