//! Truecolor → palette reduction for GIF output.
//!
//! Canvases with at most `max_colors` distinct colors get an exact palette,
//! so flat artwork and identity resizes keep every color bit-for-bit.
//! Anything richer is quantized with NeuQuant (`color_quant`), optionally
//! with Floyd–Steinberg dithering through `image::imageops::dither`.

use image::imageops::{self, ColorMap};
use image::{Rgba, RgbaImage};
use std::collections::HashMap;
use tracing::debug;

/// NeuQuant sampling factor: 1 is slowest and best, 30 fastest.
const NEUQUANT_SAMPLE_FACTOR: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteOptions {
    /// 2..=256.
    pub max_colors: usize,
    pub dither: bool,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            max_colors: 256,
            dither: false,
        }
    }
}

/// A palette image ready for GIF encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedImage {
    pub width: u32,
    pub height: u32,
    pub palette: Vec<[u8; 3]>,
    /// Row-major, `width * height` entries.
    pub indices: Vec<u8>,
    pub transparent: Option<u8>,
}

impl IndexedImage {
    pub fn index_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.indices
            .get((y as usize) * (self.width as usize) + x as usize)
            .copied()
    }

    /// Palette as packed RGB bytes, the layout GIF color tables use.
    pub fn palette_bytes(&self) -> Vec<u8> {
        self.palette.iter().flatten().copied().collect()
    }
}

/// Reduce an opaque RGBA canvas to at most `options.max_colors` colors.
///
/// Alpha is ignored; GIF output canvases have already been flattened.
pub fn reduce_to_palette(canvas: RgbaImage, options: &PaletteOptions) -> IndexedImage {
    let max_colors = options.max_colors.clamp(2, 256);
    match exact_palette(&canvas, max_colors) {
        Some(indexed) => {
            debug!(colors = indexed.palette.len(), "exact palette");
            indexed
        }
        None => quantize(canvas, max_colors, options.dither),
    }
}

/// Palette in first-seen row-major order, or `None` past `max_colors`.
fn exact_palette(canvas: &RgbaImage, max_colors: usize) -> Option<IndexedImage> {
    let mut lookup: HashMap<[u8; 3], u8> = HashMap::new();
    let mut palette = Vec::new();
    let mut indices = Vec::with_capacity(canvas.as_raw().len() / 4);

    for pixel in canvas.pixels() {
        let rgb = [pixel[0], pixel[1], pixel[2]];
        let index = match lookup.get(&rgb).copied() {
            Some(index) => index,
            None => {
                if palette.len() == max_colors {
                    return None;
                }
                let index = palette.len() as u8;
                palette.push(rgb);
                lookup.insert(rgb, index);
                index
            }
        };
        indices.push(index);
    }

    Some(IndexedImage {
        width: canvas.width(),
        height: canvas.height(),
        palette,
        indices,
        transparent: None,
    })
}

/// NeuQuant color map usable by `image::imageops::dither`.
struct NeuQuantMap(color_quant::NeuQuant);

impl ColorMap for NeuQuantMap {
    type Color = Rgba<u8>;

    fn index_of(&self, color: &Rgba<u8>) -> usize {
        self.0.index_of(&color.0)
    }

    fn map_color(&self, color: &mut Rgba<u8>) {
        self.0.map_pixel(&mut color.0);
    }
}

fn quantize(mut canvas: RgbaImage, max_colors: usize, dither: bool) -> IndexedImage {
    let map = NeuQuantMap(color_quant::NeuQuant::new(
        NEUQUANT_SAMPLE_FACTOR,
        max_colors,
        canvas.as_raw(),
    ));
    if dither {
        imageops::dither(&mut canvas, &map);
    }

    let palette: Vec<[u8; 3]> = map
        .0
        .color_map_rgb()
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();
    let indices: Vec<u8> = canvas.pixels().map(|p| map.index_of(p) as u8).collect();
    debug!(colors = palette.len(), dither, "quantized palette");

    IndexedImage {
        width: canvas.width(),
        height: canvas.height(),
        palette,
        indices,
        transparent: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn few_colors_get_an_exact_palette() {
        let canvas = RgbaImage::from_fn(4, 2, |x, _| {
            if x < 2 {
                Rgba([10, 20, 30, 255])
            } else {
                Rgba([200, 100, 0, 255])
            }
        });
        let indexed = reduce_to_palette(canvas, &PaletteOptions::default());
        assert_eq!(indexed.palette, vec![[10, 20, 30], [200, 100, 0]]);
        assert_eq!(indexed.indices, vec![0, 0, 1, 1, 0, 0, 1, 1]);
        assert_eq!(indexed.transparent, None);
    }

    #[test]
    fn many_colors_are_quantized_within_budget() {
        // 32x32 gradient: 1024 distinct colors.
        let canvas = RgbaImage::from_fn(32, 32, |x, y| Rgba([(x * 8) as u8, (y * 8) as u8, 77, 255]));
        let options = PaletteOptions {
            max_colors: 16,
            dither: false,
        };
        let indexed = reduce_to_palette(canvas, &options);
        assert_eq!(indexed.palette.len(), 16);
        assert_eq!(indexed.indices.len(), 32 * 32);
        assert!(indexed.indices.iter().all(|&i| (i as usize) < 16));
    }

    #[test]
    fn dithered_quantization_stays_within_palette() {
        let canvas = RgbaImage::from_fn(20, 20, |x, y| Rgba([(x * 12) as u8, (y * 12) as u8, 0, 255]));
        let options = PaletteOptions {
            max_colors: 8,
            dither: true,
        };
        let indexed = reduce_to_palette(canvas, &options);
        assert_eq!(indexed.palette.len(), 8);
        assert!(indexed.indices.iter().all(|&i| (i as usize) < 8));
    }

    #[test]
    fn index_at_is_bounds_checked() {
        let canvas = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        let indexed = reduce_to_palette(canvas, &PaletteOptions::default());
        assert_eq!(indexed.index_at(1, 1), Some(0));
        assert_eq!(indexed.index_at(2, 0), None);
        assert_eq!(indexed.palette_bytes(), vec![1, 2, 3]);
    }
}
