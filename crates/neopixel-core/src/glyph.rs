//! 2x3 digit glyphs for tiny LED panels.

use crate::{Color, ColorFrame, CombineMode, FrameError, OverflowMode};

/// Glyph width in pixels.
pub const GLYPH_WIDTH: usize = 2;
/// Glyph height in pixels.
pub const GLYPH_HEIGHT: usize = 3;

type Mask = [[bool; GLYPH_WIDTH]; GLYPH_HEIGHT];

const X: bool = true;
const O: bool = false;

/// Masks for digits 0-9, indexed `[digit][row][col]`.
pub static DIGIT_MASKS: [Mask; 10] = [
    [[X, X], [X, X], [X, X]], // 0
    [[O, X], [O, X], [O, X]], // 1
    [[X, X], [O, X], [X, O]], // 2
    [[X, X], [O, X], [X, X]], // 3
    [[X, O], [X, X], [O, X]], // 4
    [[X, X], [X, O], [O, X]], // 5
    [[X, O], [X, X], [X, X]], // 6
    [[X, X], [O, X], [X, O]], // 7
    [[X, X], [O, O], [X, X]], // 8
    [[X, X], [X, X], [O, X]], // 9
];

/// Render one digit as a 2x3 frame: `fg` where the mask is set, `bg` elsewhere.
///
/// # Errors
///
/// Returns [`FrameError::InvalidGlyph`] for digits above 9.
pub fn digit_glyph(digit: u32, fg: Color, bg: Color) -> Result<ColorFrame, FrameError> {
    let mask = usize::try_from(digit)
        .ok()
        .and_then(|d| DIGIT_MASKS.get(d))
        .ok_or(FrameError::InvalidGlyph(digit))?;
    let mut frame = ColorFrame::new(GLYPH_WIDTH, GLYPH_HEIGHT, bg)?;
    for (y, row) in mask.iter().enumerate() {
        for (x, &lit) in row.iter().enumerate() {
            if lit {
                frame.set(x as i32, y as i32, fg, OverflowMode::Error)?;
            }
        }
    }
    Ok(frame)
}

/// Render the decimal digits of `n` left to right with a one-column gap.
///
/// # Errors
///
/// Propagates frame construction failures; none occur for valid digits.
pub fn number_glyphs(n: u64, fg: Color, bg: Color) -> Result<ColorFrame, FrameError> {
    let digits: Vec<u32> = n
        .to_string()
        .bytes()
        .map(|b| u32::from(b - b'0'))
        .collect();
    let width = digits.len() * (GLYPH_WIDTH + 1) - 1;
    let mut frame = ColorFrame::new(width, GLYPH_HEIGHT, bg)?;
    for (i, digit) in digits.into_iter().enumerate() {
        let glyph = digit_glyph(digit, fg, bg)?;
        let x = (i * (GLYPH_WIDTH + 1)) as i32;
        frame.combine_rect(x, 0, &glyph, CombineMode::OverwriteAll, OverflowMode::Error)?;
    }
    Ok(frame)
}
