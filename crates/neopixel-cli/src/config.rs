//! Display configuration loaded from TOML.
//!
//! ```toml
//! width = 16
//! height = 8
//! overflow = "wrap"
//! background = "#000010"
//! color_mode = "256"
//! frames = 120
//! ```

use neopixel_core::{Color, OverflowMode};
use neopixel_terminal::ColorMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures while loading or rendering configuration.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid configuration TOML.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration could not be rendered back to TOML.
    #[error("failed to render config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// The values parse but cannot drive a panel.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Terminal color depth requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub(crate) enum ColorChoice {
    /// Detect from `COLORTERM`/`TERM`.
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "truecolor")]
    TrueColor,
    #[serde(rename = "256")]
    Color256,
    #[serde(rename = "16")]
    Color16,
    #[serde(rename = "mono")]
    Mono,
}

impl ColorChoice {
    /// Resolve to a concrete terminal color mode.
    #[must_use]
    pub(crate) fn resolve(self) -> ColorMode {
        match self {
            Self::Auto => ColorMode::detect(),
            Self::TrueColor => ColorMode::TrueColor,
            Self::Color256 => ColorMode::Color256,
            Self::Color16 => ColorMode::Color16,
            Self::Mono => ColorMode::Mono,
        }
    }
}

/// Panel geometry and preview settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct DisplayConfig {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) overflow: OverflowMode,
    pub(crate) background: Color,
    pub(crate) color_mode: ColorChoice,
    /// Frames rendered by `demo`.
    pub(crate) frames: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 8,
            overflow: OverflowMode::Clip,
            background: Color::BLACK,
            color_mode: ColorChoice::Auto,
            frames: 60,
        }
    }
}

impl DisplayConfig {
    /// Load from `path`, or return defaults when no file is given or the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, does not parse, or
    /// fails validation.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "config not found; using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let config = Self::from_toml(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] or [`ConfigError::Invalid`].
    pub(crate) fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub(crate) fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject settings no panel can have.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero dimension.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "panel must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}
