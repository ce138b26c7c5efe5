//! Truecolor target canvas and the resampled copy into it.

use super::calculations::Dimensions;
use super::format::Format;
use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Smooth, bilinear-family filter used for every resize.
pub const FILTER: FilterType = FilterType::Triangle;

/// How source alpha lands on the target canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphaMode {
    /// Alpha is copied verbatim and kept in the output (PNG).
    Preserve,
    /// Pixels are blended onto an opaque black canvas (JPEG, GIF).
    BlendOnBlack,
}

impl AlphaMode {
    pub fn for_format(format: Format) -> Self {
        match format {
            Format::Png => AlphaMode::Preserve,
            Format::Jpeg | Format::Gif => AlphaMode::BlendOnBlack,
        }
    }
}

/// The freshly resampled output bitmap.
#[derive(Debug, Clone)]
pub struct TargetImage {
    canvas: RgbaImage,
    alpha: AlphaMode,
}

impl TargetImage {
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.canvas.width(), self.canvas.height())
    }

    pub fn alpha(&self) -> AlphaMode {
        self.alpha
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn into_canvas(self) -> RgbaImage {
        self.canvas
    }
}

/// Resample the whole source into a `target`-sized canvas.
///
/// An identity resize copies pixels untouched, so PNG alpha and GIF colors
/// survive it byte-for-byte.
pub fn resample(source: &RgbaImage, target: Dimensions, alpha: AlphaMode) -> TargetImage {
    let mut canvas = if source.dimensions() == (target.width, target.height) {
        source.clone()
    } else {
        imageops::resize(source, target.width, target.height, FILTER)
    };

    if alpha == AlphaMode::BlendOnBlack {
        blend_onto_black(&mut canvas);
    }

    TargetImage { canvas, alpha }
}

fn blend_onto_black(canvas: &mut RgbaImage) {
    for pixel in canvas.pixels_mut() {
        let a = u16::from(pixel[3]);
        if a == 255 {
            continue;
        }
        for channel in pixel.0.iter_mut().take(3) {
            *channel = ((u16::from(*channel) * a + 127) / 255) as u8;
        }
        pixel[3] = 255;
    }
}
