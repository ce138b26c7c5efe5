//! Parameter types for a resize.
//!
//! These structs describe *what* to do, not *how*. A [`ResizeRequest`] is
//! the six values a caller hands over; the [`pipeline`](super::pipeline)
//! turns it into pixels.
//!
//! ## Types
//!
//! - [`Quality`] — JPEG quality (1–100, default 75). Clamped on construction.
//! - [`ResizeRequest`] — input path, output path, target dimensions, format, quality.

use super::error::ResizeError;
use super::format::Format;
use std::path::{Path, PathBuf};

/// Quality setting for lossy JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    /// Interpret a raw quality as passed by a foreign caller.
    ///
    /// Negative values mean "no preference" and return `None`, so the
    /// configured default applies.
    pub fn from_raw(value: i32) -> Option<Self> {
        u32::try_from(value).ok().map(Self::new)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(75)
    }
}

/// A single resize job.
///
/// `width` or `height` may be zero, in which case it is derived from the
/// source aspect ratio. Both zero is rejected when the pipeline runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub format: Format,
    /// JPEG quality; ignored for PNG and GIF. `None` uses the configured default.
    pub quality: Option<Quality>,
}

impl ResizeRequest {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>, format: Format) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            width: 0,
            height: 0,
            format,
            quality: None,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Build a request from the six scalars a foreign binding supplies.
    ///
    /// Rejects unknown format selectors, negative dimensions, and `0x0`
    /// before any file is touched.
    pub fn from_raw(
        input: &Path,
        output: &Path,
        width: i32,
        height: i32,
        format: i32,
        quality: i32,
    ) -> Result<Self, ResizeError> {
        let format = Format::try_from(format)?;
        let invalid = || ResizeError::InvalidDimensions {
            width: width.into(),
            height: height.into(),
        };
        let w = u32::try_from(width).map_err(|_| invalid())?;
        let h = u32::try_from(height).map_err(|_| invalid())?;
        if w == 0 && h == 0 {
            return Err(invalid());
        }

        Ok(Self {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            width: w,
            height: h,
            format,
            quality: Quality::from_raw(quality),
        })
    }
}
