//! Rect compositing under a per-pixel blend rule.

use crate::frame::offset;
use crate::{Color, ColorFrame, FrameError, OverflowMode};
use serde::{Deserialize, Serialize};

/// Per-pixel rule used by [`ColorFrame::combine_rect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombineMode {
    /// Replace the destination unconditionally.
    #[default]
    OverwriteAll,
    /// Replace the destination unless the source is black (black is transparent).
    Overwrite,
    /// Saturating per-channel sum of destination and source.
    Add,
    /// Like `Overwrite`, but two lit pixels landing on the same cell turn white.
    SetWhite,
}

impl CombineMode {
    /// Blend one source pixel into the current destination value.
    ///
    /// Returns `None` when the destination is left as is.
    #[must_use]
    pub const fn blend(self, dst: Color, src: Color) -> Option<Color> {
        match self {
            Self::OverwriteAll => Some(src),
            Self::Overwrite | Self::SetWhite if src.is_black() => None,
            Self::Overwrite => Some(src),
            Self::Add => Some(dst.saturating_add(src)),
            Self::SetWhite if dst.is_black() => Some(src),
            Self::SetWhite => Some(Color::WHITE),
        }
    }
}

impl std::str::FromStr for CombineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "overwrite_all" => Ok(Self::OverwriteAll),
            "overwrite" => Ok(Self::Overwrite),
            "add" => Ok(Self::Add),
            "set_white" => Ok(Self::SetWhite),
            other => Err(format!("unknown combine mode '{other}'")),
        }
    }
}

impl ColorFrame {
    /// Composite `source` onto this frame with its top-left corner at `(x, y)`.
    ///
    /// Each destination read and write applies `overflow` independently,
    /// exactly like [`ColorFrame::get`] and [`ColorFrame::set`].
    ///
    /// # Errors
    ///
    /// Under [`OverflowMode::Error`] the destination rectangle is checked
    /// before anything is written; see [`ColorFrame::set_rect`].
    pub fn combine_rect(
        &mut self,
        x: i32,
        y: i32,
        source: &Self,
        combine: CombineMode,
        overflow: OverflowMode,
    ) -> Result<(), FrameError> {
        self.check_rect(x, y, source, overflow)?;
        for (j, i, src) in source.pixels() {
            let (dx, dy) = (offset(x, j), offset(y, i));
            let dst = self.read(dx, dy, overflow)?;
            if let Some(color) = combine.blend(dst, src) {
                self.write(dx, dy, color, overflow)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIM: Color = Color::rgb(40, 10, 0);
    const TEAL: Color = Color::rgb(0, 90, 90);

    fn filled(w: usize, h: usize, c: Color) -> ColorFrame {
        ColorFrame::new(w, h, c).unwrap()
    }

    #[test]
    fn test_blend_table() {
        use CombineMode::*;
        let k = Color::BLACK;
        assert_eq!(OverwriteAll.blend(TEAL, k), Some(k));
        assert_eq!(Overwrite.blend(TEAL, k), None);
        assert_eq!(Overwrite.blend(TEAL, DIM), Some(DIM));
        assert_eq!(Add.blend(TEAL, DIM), Some(Color::rgb(40, 100, 90)));
        assert_eq!(SetWhite.blend(TEAL, k), None);
        assert_eq!(SetWhite.blend(k, DIM), Some(DIM));
        assert_eq!(SetWhite.blend(TEAL, DIM), Some(Color::WHITE));
    }

    #[test]
    fn test_overwrite_all_copies_black() {
        let mut dst = filled(2, 2, TEAL);
        let src = filled(1, 1, Color::BLACK);
        dst.combine_rect(0, 0, &src, CombineMode::OverwriteAll, OverflowMode::Error)
            .unwrap();
        assert_eq!(dst.get(0, 0, OverflowMode::Error), Ok(Color::BLACK));
        assert_eq!(dst.get(1, 0, OverflowMode::Error), Ok(TEAL));
    }

    #[test]
    fn test_overwrite_black_source_is_transparent() {
        let mut dst = filled(3, 3, TEAL);
        let before = dst.clone();
        let src = filled(3, 3, Color::BLACK);
        dst.combine_rect(0, 0, &src, CombineMode::Overwrite, OverflowMode::Error)
            .unwrap();
        assert_eq!(dst, before);
    }

    #[test]
    fn test_overwrite_single_pixel() {
        let mut dst = filled(3, 3, TEAL);
        let mut src = filled(2, 2, Color::BLACK);
        src.set(1, 0, DIM, OverflowMode::Error).unwrap();
        dst.combine_rect(1, 1, &src, CombineMode::Overwrite, OverflowMode::Error)
            .unwrap();
        let changed: Vec<_> = dst.pixels().filter(|(_, _, c)| *c != TEAL).collect();
        assert_eq!(changed, vec![(2, 1, DIM)]);
    }

    #[test]
    fn test_add_saturates() {
        let mut dst = filled(1, 1, Color::rgb(200, 0, 10));
        let src = filled(1, 1, Color::rgb(100, 5, 10));
        dst.combine_rect(0, 0, &src, CombineMode::Add, OverflowMode::Error)
            .unwrap();
        assert_eq!(dst.get(0, 0, OverflowMode::Error), Ok(Color::rgb(255, 5, 20)));
    }

    #[test]
    fn test_set_white_on_second_combine() {
        let mut dst = filled(2, 2, Color::BLACK);
        let a = filled(1, 1, DIM);
        let b = filled(1, 1, TEAL);
        dst.combine_rect(1, 1, &a, CombineMode::SetWhite, OverflowMode::Error)
            .unwrap();
        assert_eq!(dst.get(1, 1, OverflowMode::Error), Ok(DIM));
        dst.combine_rect(1, 1, &b, CombineMode::SetWhite, OverflowMode::Error)
            .unwrap();
        assert_eq!(dst.get(1, 1, OverflowMode::Error), Ok(Color::WHITE));
    }

    #[test]
    fn test_combine_clip_drops_overhang() {
        let mut dst = filled(2, 2, Color::BLACK);
        let src = filled(3, 3, DIM);
        dst.combine_rect(1, 1, &src, CombineMode::Add, OverflowMode::Clip)
            .unwrap();
        assert_eq!(dst.colors().iter().filter(|c| **c == DIM).count(), 1);
    }

    #[test]
    fn test_combine_wrap_folds_overhang() {
        let mut dst = filled(2, 1, Color::BLACK);
        let src = filled(3, 1, Color::rgb(10, 0, 0));
        dst.combine_rect(0, 0, &src, CombineMode::Add, OverflowMode::Wrap)
            .unwrap();
        // Column 0 receives source columns 0 and 2.
        assert_eq!(dst.get(0, 0, OverflowMode::Error), Ok(Color::rgb(20, 0, 0)));
        assert_eq!(dst.get(1, 0, OverflowMode::Error), Ok(Color::rgb(10, 0, 0)));
    }

    #[test]
    fn test_combine_wrap_from_i32_max() {
        let mut dst = filled(3, 1, Color::BLACK);
        let src = filled(3, 1, DIM);
        dst.combine_rect(i32::MAX, 0, &src, CombineMode::Add, OverflowMode::Wrap)
            .unwrap();
        // Three consecutive columns cover every cell of a 3-wide frame once.
        assert!(dst.colors().iter().all(|&c| c == DIM));
    }

    #[test]
    fn test_combine_error_writes_nothing() {
        let mut dst = filled(2, 2, Color::BLACK);
        let src = filled(2, 2, DIM);
        assert!(dst
            .combine_rect(-1, 0, &src, CombineMode::OverwriteAll, OverflowMode::Error)
            .is_err());
        assert!(dst.colors().iter().all(|c| c.is_black()));
    }

    #[test]
    fn test_parse_combine_mode() {
        assert_eq!("set-white".parse::<CombineMode>(), Ok(CombineMode::SetWhite));
        assert_eq!("OVERWRITE_ALL".parse::<CombineMode>(), Ok(CombineMode::OverwriteAll));
        assert!("multiply".parse::<CombineMode>().is_err());
    }
}
