//! Format-specific encoders and the output-file guard.
//!
//! | Format | Encoder |
//! |---|---|
//! | JPEG | `image::codecs::jpeg::JpegEncoder` at the requested quality |
//! | PNG | `image::codecs::png::PngEncoder`, always RGBA8 |
//! | GIF | `gif::Encoder`, single frame, global palette + optional transparent index |

use super::error::ResizeError;
use super::format::Format;
use super::palette::IndexedImage;
use super::params::Quality;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

type Result<T> = std::result::Result<T, ResizeError>;

/// An output file that is deleted on drop unless [`finish`](Self::finish)
/// completes.
///
/// Guarantees a failed encode never leaves a truncated file behind.
pub struct PendingOutput {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
    committed: bool,
}

impl PendingOutput {
    /// Create or truncate `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path).map_err(|source| ResizeError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: Some(BufWriter::new(file)),
            committed: false,
        })
    }

    /// Run `encode` against the file, flush, and keep the result.
    pub fn finish<F>(mut self, encode: F) -> Result<()>
    where
        F: FnOnce(&mut BufWriter<File>) -> Result<()>,
    {
        if let Some(writer) = self.writer.as_mut() {
            encode(writer)?;
            writer.flush().map_err(|source| ResizeError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        self.committed = true;
        Ok(())
    }
}

impl Drop for PendingOutput {
    fn drop(&mut self) {
        // Close the handle first so removal also works where open files are locked.
        self.writer.take();
        if !self.committed {
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!(path = %self.path.display(), error = %e, "could not remove partial output");
            }
        }
    }
}

pub fn encode_jpeg<W: Write>(canvas: RgbaImage, quality: Quality, writer: W) -> Result<()> {
    let rgb = DynamicImage::ImageRgba8(canvas).into_rgb8();
    let encoder = JpegEncoder::new_with_quality(writer, quality.value());
    encoder
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ResizeError::encode(Format::Jpeg, e))
}

pub fn encode_png<W: Write>(canvas: &RgbaImage, writer: W) -> Result<()> {
    PngEncoder::new(writer)
        .write_image(
            canvas.as_raw(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| ResizeError::encode(Format::Png, e))
}

pub fn encode_gif<W: Write>(image: &IndexedImage, writer: W) -> Result<()> {
    let err = |e: &dyn std::fmt::Display| ResizeError::encode(Format::Gif, e);
    let too_large = || err(&format!("{}x{} exceeds GIF limits", image.width, image.height));
    let width = u16::try_from(image.width).map_err(|_| too_large())?;
    let height = u16::try_from(image.height).map_err(|_| too_large())?;

    let palette = image.palette_bytes();
    let mut encoder = gif::Encoder::new(writer, width, height, &palette).map_err(|e| err(&e))?;

    let mut frame = gif::Frame::default();
    frame.width = width;
    frame.height = height;
    frame.buffer = Cow::Borrowed(&image.indices[..]);
    frame.transparent = image.transparent;
    encoder.write_frame(&frame).map_err(|e| err(&e))?;

    encoder.into_inner().map_err(|e| err(&e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn dropped_guard_removes_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        let guard = PendingOutput::create(&path).unwrap();
        assert!(path.exists());
        drop(guard);
        assert!(!path.exists());
    }

    #[test]
    fn failed_encode_removes_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.gif");
        let result = PendingOutput::create(&path)
            .unwrap()
            .finish(|_| Err(ResizeError::encode(Format::Gif, "boom")));
        assert!(matches!(result, Err(ResizeError::Encode { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn finished_guard_keeps_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.png");
        let canvas = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 4]));
        PendingOutput::create(&path)
            .unwrap()
            .finish(|w| encode_png(&canvas, w))
            .unwrap();
        assert_eq!(image::image_dimensions(&path).unwrap(), (3, 2));
    }

    #[test]
    fn create_in_missing_directory_is_write_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("no/such/dir/out.png");
        assert!(matches!(
            PendingOutput::create(&path),
            Err(ResizeError::Write { .. })
        ));
    }

    #[test]
    fn gif_carries_transparent_index() {
        let image = IndexedImage {
            width: 2,
            height: 1,
            palette: vec![[9, 9, 9], [250, 0, 0]],
            indices: vec![0, 1],
            transparent: Some(1),
        };
        let mut bytes = Vec::new();
        encode_gif(&image, &mut bytes).unwrap();

        let mut options = gif::DecodeOptions::new();
        options.set_color_output(gif::ColorOutput::Indexed);
        let mut decoder = options.read_info(bytes.as_slice()).unwrap();
        let frame = decoder.read_next_frame().unwrap().unwrap();
        assert_eq!(frame.transparent, Some(1));
        assert_eq!(&frame.buffer[..], &[0, 1]);
    }

    #[test]
    fn oversized_gif_is_an_encode_error() {
        let image = IndexedImage {
            width: 70_000,
            height: 1,
            palette: vec![[0, 0, 0]],
            indices: vec![],
            transparent: None,
        };
        let result = encode_gif(&image, Vec::new());
        assert!(matches!(result, Err(ResizeError::Encode { .. })));
    }
}
