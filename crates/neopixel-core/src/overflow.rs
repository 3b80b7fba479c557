//! Out-of-bounds coordinate policy.

use crate::FrameError;
use serde::{Deserialize, Serialize};

/// How a coordinate outside the frame is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowMode {
    /// Fail with [`FrameError::OutOfBounds`].
    Error,
    /// Reads return black, writes are dropped.
    #[default]
    Clip,
    /// Reduce each axis modulo the frame dimension.
    Wrap,
}

impl OverflowMode {
    /// Resolve `(x, y)` against a `width` x `height` grid.
    ///
    /// Coordinates are 64-bit so that a rect offset past `i32::MAX` still
    /// reduces the true position instead of a saturated one.
    ///
    /// Returns `Ok(Some((col, row)))` for an addressable cell and `Ok(None)`
    /// when the access should be skipped (clipped).
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::OutOfBounds`] in [`OverflowMode::Error`] when the
    /// coordinate is outside the grid.
    pub fn resolve(
        self,
        x: i64,
        y: i64,
        width: usize,
        height: usize,
    ) -> Result<Option<(usize, usize)>, FrameError> {
        if let Some(cell) = in_bounds(x, y, width, height) {
            return Ok(Some(cell));
        }
        match self {
            Self::Error => Err(FrameError::OutOfBounds {
                x,
                y,
                width,
                height,
            }),
            Self::Clip => Ok(None),
            Self::Wrap => Ok(Some((wrap_axis(x, width), wrap_axis(y, height)))),
        }
    }
}

impl std::fmt::Display for OverflowMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Clip => "clip",
            Self::Wrap => "wrap",
        })
    }
}

impl std::str::FromStr for OverflowMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "clip" => Ok(Self::Clip),
            "wrap" => Ok(Self::Wrap),
            other => Err(format!(
                "unknown overflow mode '{other}' (expected error, clip or wrap)"
            )),
        }
    }
}

fn in_bounds(x: i64, y: i64, width: usize, height: usize) -> Option<(usize, usize)> {
    let col = usize::try_from(x).ok().filter(|&c| c < width)?;
    let row = usize::try_from(y).ok().filter(|&r| r < height)?;
    Some((col, row))
}

/// Euclidean remainder of `v` by `len`, so negative values land in `[0, len)`.
fn wrap_axis(v: i64, len: usize) -> usize {
    debug_assert!(len > 0, "frame dimension must be positive");
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    v.rem_euclid(len) as usize
}
