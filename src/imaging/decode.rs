//! Format-specific decoding into a [`SourceImage`].
//!
//! | Format | Decoder | Result |
//! |---|---|---|
//! | JPEG | `image::codecs::jpeg::JpegDecoder` | truecolor |
//! | PNG | `image::codecs::png::PngDecoder` | truecolor, native alpha kept |
//! | GIF | `gif::Decoder` with indexed output | palette indices + transparent slot |
//!
//! GIF bypasses the `image` crate because `image` expands GIF frames to
//! RGBA, losing the palette indices and the transparent index that the
//! transparency heuristic needs.

use super::calculations::Dimensions;
use super::error::ResizeError;
use super::format::Format;
use image::codecs::jpeg::JpegDecoder;
use image::codecs::png::PngDecoder;
use image::{DynamicImage, Rgba, RgbaImage};
use std::fs::File;
use std::io::BufReader;
use tracing::debug;

type Result<T> = std::result::Result<T, ResizeError>;

/// A decoded input bitmap.
#[derive(Debug, Clone)]
pub enum SourceImage {
    Truecolor(RgbaImage),
    Indexed(IndexedSource),
}

impl SourceImage {
    pub fn dimensions(&self) -> Dimensions {
        match self {
            SourceImage::Truecolor(img) => Dimensions::new(img.width(), img.height()),
            SourceImage::Indexed(indexed) => Dimensions::new(indexed.width, indexed.height),
        }
    }

    /// Expand to RGBA, consuming the source.
    pub fn into_rgba(self) -> RgbaImage {
        match self {
            SourceImage::Truecolor(img) => img,
            SourceImage::Indexed(indexed) => indexed.to_rgba(),
        }
    }
}

/// A palette image: one index per pixel into a table of at most 256 colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedSource {
    pub width: u32,
    pub height: u32,
    pub palette: Vec<[u8; 3]>,
    /// Row-major, `width * height` entries.
    pub indices: Vec<u8>,
    pub transparent: Option<u8>,
}

impl IndexedSource {
    pub fn index_at(&self, x: u32, y: u32) -> u8 {
        self.indices[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Drop the transparent declaration; that slot's color becomes opaque.
    pub fn clear_transparent(&mut self) {
        self.transparent = None;
    }

    /// Expand indices through the palette.
    ///
    /// Pixels using the declared transparent index get alpha 0; indices past
    /// the end of the palette render as opaque black.
    pub fn to_rgba(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let index = self.index_at(x, y);
            if self.transparent == Some(index) {
                return Rgba([0, 0, 0, 0]);
            }
            let [r, g, b] = self
                .palette
                .get(index as usize)
                .copied()
                .unwrap_or([0, 0, 0]);
            Rgba([r, g, b, 255])
        })
    }
}

/// Decode an already-opened input file as `format`.
///
/// The file handle is consumed and closed before this returns.
pub fn decode(file: File, format: Format) -> Result<SourceImage> {
    let reader = BufReader::new(file);
    let source = match format {
        Format::Jpeg => {
            let decoder = JpegDecoder::new(reader).map_err(|e| ResizeError::decode(format, e))?;
            truecolor(DynamicImage::from_decoder(decoder), format)?
        }
        Format::Png => {
            let decoder = PngDecoder::new(reader).map_err(|e| ResizeError::decode(format, e))?;
            truecolor(DynamicImage::from_decoder(decoder), format)?
        }
        Format::Gif => SourceImage::Indexed(decode_gif(reader)?),
    };

    let dims = source.dimensions();
    debug!(%format, width = dims.width, height = dims.height, "decoded input");
    Ok(source)
}

fn truecolor(decoded: image::ImageResult<DynamicImage>, format: Format) -> Result<SourceImage> {
    let img = decoded.map_err(|e| ResizeError::decode(format, e))?;
    Ok(SourceImage::Truecolor(img.into_rgba8()))
}

/// Decode the first frame of a GIF at the frame's own size.
///
/// The logical screen and the frame's left/top offset are ignored, so the
/// bitmap holds exactly the pixels the frame encodes.
fn decode_gif(reader: BufReader<File>) -> Result<IndexedSource> {
    let mut options = gif::DecodeOptions::new();
    options.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = options
        .read_info(reader)
        .map_err(|e| ResizeError::decode(Format::Gif, e))?;

    let global_palette = decoder.global_palette().map(<[u8]>::to_vec);

    let frame = decoder
        .read_next_frame()
        .map_err(|e| ResizeError::decode(Format::Gif, e))?
        .ok_or_else(|| ResizeError::decode(Format::Gif, "no image frames"))?;

    let width = u32::from(frame.width);
    let height = u32::from(frame.height);
    if width == 0 || height == 0 {
        return Err(ResizeError::decode(Format::Gif, "empty first frame"));
    }

    let palette_bytes = frame
        .palette
        .as_deref()
        .or(global_palette.as_deref())
        .ok_or_else(|| ResizeError::decode(Format::Gif, "no color table"))?;
    let palette: Vec<[u8; 3]> = palette_bytes
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    let pixel_count = (width as usize) * (height as usize);
    let indices = frame
        .buffer
        .get(..pixel_count)
        .ok_or_else(|| ResizeError::decode(Format::Gif, "truncated frame data"))?
        .to_vec();

    Ok(IndexedSource {
        width,
        height,
        palette,
        indices,
        transparent: frame.transparent,
    })
}
