//! Differential terminal renderer for LED frames.
//!
//! Each LED is drawn as a two-column block so the panel keeps a roughly
//! square aspect ratio. Only LEDs that changed since the previous frame
//! are rewritten, and foreground changes are skipped when consecutive
//! LEDs share a color.

use crate::color::ColorMode;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color as CrosstermColor, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use neopixel_core::{Color, ColorFrame, PixelSink, SinkError};
use std::io::{self, BufWriter, Stdout, Write};

const LIT: &str = "██";
const DARK: &str = "  ";

/// [`PixelSink`] that previews frames in a terminal.
#[derive(Debug)]
pub struct TerminalSink<W: Write> {
    writer: W,
    color_mode: ColorMode,
    origin: (u16, u16),
    previous: Option<(usize, usize, Vec<Color>)>,
    cells_written: usize,
}

impl TerminalSink<Stdout> {
    /// Sink writing to stdout with the detected color mode.
    #[must_use]
    pub fn stdout() -> Self {
        Self::stdout_with(ColorMode::detect())
    }

    /// Sink writing to stdout with an explicit color mode.
    #[must_use]
    pub fn stdout_with(color_mode: ColorMode) -> Self {
        Self::new(io::stdout(), color_mode)
    }
}

impl<W: Write> TerminalSink<W> {
    /// Sink writing to `writer` with an explicit color mode.
    pub fn new(writer: W, color_mode: ColorMode) -> Self {
        Self {
            writer,
            color_mode,
            origin: (0, 0),
            previous: None,
            cells_written: 0,
        }
    }

    /// Place the panel's top-left LED at terminal cell `(col, row)`.
    #[must_use]
    pub fn with_origin(mut self, col: u16, row: u16) -> Self {
        self.origin = (col, row);
        self
    }

    /// The color mode in use.
    #[must_use]
    pub const fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// LEDs written by the last `show()`.
    #[must_use]
    pub const fn cells_written(&self) -> usize {
        self.cells_written
    }

    /// Forget the previous frame so the next `show()` redraws everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Borrow the underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&mut self, frame: &ColorFrame) -> io::Result<usize> {
        let full = !matches!(
            &self.previous,
            Some((w, h, _)) if (*w, *h) == (frame.width(), frame.height())
        );
        let mut written = 0;
        let mut last_fg: Option<CrosstermColor> = None;
        let mut cursor: Option<(u16, u16)> = None;

        let mut out = BufWriter::with_capacity(8192, &mut self.writer);
        queue!(out, ResetColor)?;

        for (x, y, color) in frame.pixels() {
            let unchanged = !full
                && self
                    .previous
                    .as_ref()
                    .is_some_and(|(_, _, prev)| prev[y * frame.width() + x] == color);
            if unchanged {
                continue;
            }

            let (col, row) = cell_position(self.origin, x, y);
            if cursor != Some((col, row)) {
                queue!(out, MoveTo(col, row))?;
            }

            if color.is_black() {
                queue!(out, Print(DARK))?;
            } else {
                let fg = self.color_mode.to_crossterm(color);
                if last_fg != Some(fg) {
                    queue!(out, SetForegroundColor(fg))?;
                    last_fg = Some(fg);
                }
                queue!(out, Print(LIT))?;
            }

            cursor = Some((col.saturating_add(2), row));
            written += 1;
        }

        queue!(out, ResetColor)?;
        out.flush()?;
        drop(out);

        self.previous = Some((frame.width(), frame.height(), frame.colors().to_vec()));
        Ok(written)
    }
}

impl<W: Write> PixelSink for TerminalSink<W> {
    fn show(&mut self, frame: &ColorFrame) -> Result<(), SinkError> {
        self.cells_written = self.render(frame)?;
        tracing::trace!(cells = self.cells_written, "terminal frame flushed");
        Ok(())
    }
}

fn cell_position(origin: (u16, u16), x: usize, y: usize) -> (u16, u16) {
    let col = origin.0.saturating_add(u16::try_from(x * 2).unwrap_or(u16::MAX));
    let row = origin.1.saturating_add(u16::try_from(y).unwrap_or(u16::MAX));
    (col, row)
}

/// Clears the screen and hides the cursor; restores the cursor on drop.
pub struct TerminalGuard<W: Write> {
    writer: W,
}

impl<W: Write> TerminalGuard<W> {
    /// Prepare `writer` for a full-screen preview.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal commands cannot be written.
    pub fn enter(mut writer: W) -> io::Result<Self> {
        execute!(writer, Clear(ClearType::All), Hide)?;
        Ok(Self { writer })
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if let Err(err) = execute!(self.writer, ResetColor, Show, Print("\r\n")) {
            tracing::warn!(%err, "failed to restore terminal");
        }
    }
}
