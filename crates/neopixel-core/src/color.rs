//! Packed RGB color as consumed by addressable-LED drivers.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CHANNEL_MASK: u32 = 0xff;
const RED_SHIFT: u32 = 0;
const BLUE_SHIFT: u32 = 8;
const GREEN_SHIFT: u32 = 16;

/// 32-bit packed color.
///
/// Layout (LSB first): red in bits 0-7, blue in bits 8-15, green in
/// bits 16-23. The high byte is reserved and never written by the
/// constructors. Drivers that clock out this word directly depend on
/// the layout, so it must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    /// Black (all channels off). Also the "unset" pixel value.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White (all channels full).
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Pure red.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Pure green.
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Pure blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Pack three channels into a color.
    #[must_use]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(
            ((green as u32) << GREEN_SHIFT)
                | ((blue as u32) << BLUE_SHIFT)
                | ((red as u32) << RED_SHIFT),
        )
    }

    /// Wrap a raw packed word without touching any bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw packed word.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Red channel.
    #[must_use]
    pub const fn red(self) -> u8 {
        ((self.0 >> RED_SHIFT) & CHANNEL_MASK) as u8
    }

    /// Green channel.
    #[must_use]
    pub const fn green(self) -> u8 {
        ((self.0 >> GREEN_SHIFT) & CHANNEL_MASK) as u8
    }

    /// Blue channel.
    #[must_use]
    pub const fn blue(self) -> u8 {
        ((self.0 >> BLUE_SHIFT) & CHANNEL_MASK) as u8
    }

    /// True when the packed word is exactly black.
    ///
    /// Compares all 32 bits, so a color with a non-zero reserved byte is
    /// not black even if its channels are.
    #[must_use]
    pub const fn is_black(self) -> bool {
        self.0 == Self::BLACK.0
    }

    /// Channel-wise sum, capped at 255 per channel.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self::rgb(
            self.red().saturating_add(other.red()),
            self.green().saturating_add(other.green()),
            self.blue().saturating_add(other.blue()),
        )
    }

    /// Point on a three-segment color wheel.
    ///
    /// Hues above 255 are folded back by repeatedly subtracting 255, so
    /// 256 maps to 1 and 510 maps to 255.
    #[must_use]
    pub const fn hue(hue: u32) -> Self {
        let h = (if hue > 255 { (hue - 1) % 255 + 1 } else { hue }) as u8;
        if h < 85 {
            Self::rgb(h * 3, 255 - h * 3, 0)
        } else if h < 170 {
            let h = h - 85;
            Self::rgb(255 - h * 3, 0, h * 3)
        } else {
            let h = h - 170;
            Self::rgb(0, h * 3, 255 - h * 3)
        }
    }

    /// Parse a hex color string (e.g., "#ff0000" or "ff0000").
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a 6-digit hex color.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return Err(ColorParseError::InvalidLength);
        }
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or(ColorParseError::InvalidHex)
        };
        Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Convert to hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())
    }
}

impl std::ops::Add for Color {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl std::ops::AddAssign for Color {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Invalid hex characters
    #[error("invalid hex characters")]
    InvalidHex,
    /// Invalid string length
    #[error("invalid hex string length (expected 6)")]
    InvalidLength,
}
