//! Single-color transparency carried from a palette source to a palette output.
//!
//! Resampling works on truecolor pixels, so the transparent palette slot
//! cannot survive it directly. Instead the pipeline:
//!
//! 1. finds the first source pixel using the transparent index
//!    ([`extract_transparency`]), then clears the declaration so that pixel
//!    is resampled as an ordinary opaque color;
//! 2. after palette reduction of the output, reads the index found at the
//!    mapped coordinate and declares *that* index transparent
//!    ([`TransparencyMapping::locate`]).
//!
//! Step 2 is an approximation. Resampling moves content around, so the pixel
//! at the mapped coordinate is only guaranteed to hold the old transparent
//! color on an identity resize. [`TransparencyMapping::SameCoordinate`]
//! reuses the source coordinate as-is; [`TransparencyMapping::Scaled`] maps it
//! proportionally, which keeps it inside the image on downscales.

use super::calculations::{Dimensions, scale_coordinate};
use super::decode::IndexedSource;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Location of the first pixel that used the source's transparent index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransparencyMark {
    pub x: u32,
    pub y: u32,
}

/// How a [`TransparencyMark`] is carried into the resized image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransparencyMapping {
    /// Read the output at the exact source coordinate.
    #[default]
    SameCoordinate,
    /// Scale the coordinate by the resize ratio on each axis.
    Scaled,
}

impl TransparencyMapping {
    /// Coordinate in the output whose color should become transparent.
    ///
    /// Returns `None` when the coordinate falls outside the output.
    pub fn locate(
        self,
        mark: TransparencyMark,
        source: Dimensions,
        output: Dimensions,
    ) -> Option<(u32, u32)> {
        let (x, y) = match self {
            TransparencyMapping::SameCoordinate => (mark.x, mark.y),
            TransparencyMapping::Scaled => scale_coordinate(mark.x, mark.y, source, output),
        };
        if output.contains(x, y) {
            Some((x, y))
        } else {
            warn!(
                x,
                y,
                width = output.width,
                height = output.height,
                "transparent pixel falls outside the resized image, dropping transparency"
            );
            None
        }
    }
}

/// Scan for the first pixel using the transparent index.
///
/// The scan walks columns, not rows: X is the outer loop and Y the inner
/// one, so the leftmost transparent column wins and, within it, the topmost
/// pixel.
pub fn find_transparency_mark(source: &IndexedSource) -> Option<TransparencyMark> {
    let transparent = source.transparent?;
    (0..source.width)
        .flat_map(|x| (0..source.height).map(move |y| (x, y)))
        .find(|&(x, y)| source.index_at(x, y) == transparent)
        .map(|(x, y)| TransparencyMark { x, y })
}

/// Locate the transparent pixel, then clear the source's declaration.
///
/// The declaration is cleared whether or not a pixel was found; a declared
/// index that no pixel uses leaves the image without transparency.
pub fn extract_transparency(source: &mut IndexedSource) -> Option<TransparencyMark> {
    let declared = source.transparent?;
    let mark = find_transparency_mark(source);
    source.clear_transparent();
    match mark {
        Some(m) => debug!(index = declared, x = m.x, y = m.y, "found transparent pixel"),
        None => debug!(index = declared, "transparent index declared but unused"),
    }
    mark
}
