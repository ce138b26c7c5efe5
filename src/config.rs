//! Resize configuration.
//!
//! An optional TOML file supplies encoder defaults that the six-parameter
//! call has no room for. Every key is optional; omitted keys keep the stock
//! value.
//!
//! ## Configuration Options
//!
//! ```toml
//! [jpeg]
//! default_quality = 75              # used when the caller passes a negative quality
//!
//! [gif]
//! max_colors = 256                  # palette budget for GIF output (2-256)
//! dither = false                    # Floyd-Steinberg when quantizing
//! transparency = "same-coordinate"  # or "scaled"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{PaletteOptions, Quality, TransparencyMapping};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeConfig {
    pub jpeg: JpegConfig,
    pub gif: GifConfig,
}

/// JPEG encoder settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JpegConfig {
    /// Quality used when the request carries none (1-100).
    pub default_quality: u32,
}

impl Default for JpegConfig {
    fn default() -> Self {
        Self {
            default_quality: u32::from(Quality::default().value()),
        }
    }
}

impl JpegConfig {
    pub fn default_quality(&self) -> Quality {
        Quality::new(self.default_quality)
    }
}

/// GIF palette and transparency settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GifConfig {
    pub max_colors: u32,
    pub dither: bool,
    pub transparency: TransparencyMapping,
}

impl Default for GifConfig {
    fn default() -> Self {
        let palette = PaletteOptions::default();
        Self {
            max_colors: palette.max_colors as u32,
            dither: palette.dither,
            transparency: TransparencyMapping::default(),
        }
    }
}

impl GifConfig {
    pub fn palette_options(&self) -> PaletteOptions {
        PaletteOptions {
            max_colors: self.max_colors as usize,
            dither: self.dither,
        }
    }
}

impl ResizeConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.jpeg.default_quality) {
            return Err(ConfigError::Validation(
                "jpeg.default_quality must be 1-100".into(),
            ));
        }
        if !(2..=256).contains(&self.gif.max_colors) {
            return Err(ConfigError::Validation(
                "gif.max_colors must be 2-256".into(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ResizeConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Used by the `--print-config` CLI flag.
pub fn stock_config_toml() -> &'static str {
    r##"# fastimage-resize configuration
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# JPEG output
# ---------------------------------------------------------------------------
[jpeg]
# Quality used when the caller passes a negative quality (1 = worst, 100 = best).
# Explicit qualities are clamped to 1-100.
default_quality = 75

# ---------------------------------------------------------------------------
# GIF output
# ---------------------------------------------------------------------------
[gif]
# Palette size for the reduced output image (2-256).
max_colors = 256

# Floyd-Steinberg dithering when the image has more colors than max_colors.
dither = false

# Where to look for the color that becomes transparent after resizing:
#   "same-coordinate"  the source pixel's coordinate, unchanged
#   "scaled"           that coordinate scaled by the resize ratio
# Only an identity resize is guaranteed to find the original color.
transparency = "same-coordinate"
"##
}
