//! The resize pipeline.
//!
//! ```text
//! open input → decode → [GIF: find + clear transparency] → resolve size
//!   → resample onto truecolor canvas → open output → encode
//!   → [GIF: reduce palette + re-declare transparency]
//! ```
//!
//! Every bitmap and handle is an owned value scoped to one call, so all of
//! them are released on every exit path. Nothing is written until decoding
//! and dimension resolution have succeeded, and the output is removed again
//! if encoding fails.

use super::calculations::{Dimensions, check_target_size, resolve_dimensions};
use super::decode::{SourceImage, decode};
use super::encode::{PendingOutput, encode_gif, encode_jpeg, encode_png};
use super::error::ResizeError;
use super::format::Format;
use super::palette::{IndexedImage, reduce_to_palette};
use super::params::ResizeRequest;
use super::resample::{AlphaMode, resample};
use super::transparency::{TransparencyMapping, TransparencyMark, extract_transparency};
use crate::config::ResizeConfig;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

type Result<T> = std::result::Result<T, ResizeError>;

/// Resize with the stock configuration.
pub fn resize(request: &ResizeRequest) -> Result<()> {
    resize_with(request, &ResizeConfig::default())
}

/// Resize from the six scalars a foreign binding passes through.
///
/// `format` is `0` (JPEG), `1` (PNG) or `2` (GIF). A negative `quality`
/// uses the configured default JPEG quality.
pub fn resize_image(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    width: i32,
    height: i32,
    format: i32,
    quality: i32,
) -> Result<()> {
    let request =
        ResizeRequest::from_raw(input.as_ref(), output.as_ref(), width, height, format, quality)?;
    resize(&request)
}

/// Resize `request.input` into `request.output` using `config` for encoder
/// defaults.
pub fn resize_with(request: &ResizeRequest, config: &ResizeConfig) -> Result<()> {
    let span = tracing::debug_span!("resize", input = %request.input.display(), format = %request.format);
    let _enter = span.enter();

    let input = File::open(&request.input).map_err(|source| ResizeError::NotFound {
        path: request.input.clone(),
        source,
    })?;
    let mut source = decode(input, request.format)?;

    let mark = match &mut source {
        SourceImage::Indexed(indexed) => extract_transparency(indexed),
        SourceImage::Truecolor(_) => None,
    };

    let original = source.dimensions();
    let target_size = resolve_dimensions(original, request.width, request.height)?;
    check_target_size(target_size, request.format)?;
    debug!(
        width = target_size.width,
        height = target_size.height,
        "resolved target size"
    );

    let target = resample(
        &source.into_rgba(),
        target_size,
        AlphaMode::for_format(request.format),
    );

    let output = PendingOutput::create(&request.output)?;
    match request.format {
        Format::Jpeg => {
            let quality = request
                .quality
                .unwrap_or_else(|| config.jpeg.default_quality());
            output.finish(|w| encode_jpeg(target.into_canvas(), quality, w))?;
        }
        Format::Png => {
            output.finish(|w| encode_png(target.canvas(), w))?;
        }
        Format::Gif => {
            let mut indexed = reduce_to_palette(target.into_canvas(), &config.gif.palette_options());
            if let Some(mark) = mark {
                indexed.transparent =
                    transparent_index(&indexed, mark, config.gif.transparency, original);
            }
            output.finish(|w| encode_gif(&indexed, w))?;
        }
    }

    info!(
        output = %request.output.display(),
        width = target_size.width,
        height = target_size.height,
        "resized"
    );
    Ok(())
}

/// Palette index to declare transparent in the reduced output.
///
/// Reads whatever index sits at the mapped coordinate. On anything but an
/// identity resize that pixel may no longer hold the source's transparent
/// color; see [`TransparencyMapping`].
fn transparent_index(
    indexed: &IndexedImage,
    mark: TransparencyMark,
    mapping: TransparencyMapping,
    original: Dimensions,
) -> Option<u8> {
    let output = Dimensions::new(indexed.width, indexed.height);
    let (x, y) = mapping.locate(mark, original, output)?;
    let index = indexed.index_at(x, y)?;
    debug!(index, x, y, ?mapping, "re-declared transparent index");
    Some(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indexed(width: u32, height: u32, indices: Vec<u8>) -> IndexedImage {
        IndexedImage {
            width,
            height,
            palette: vec![[0, 0, 0], [255, 0, 0], [0, 255, 0]],
            indices,
            transparent: None,
        }
    }

    #[test]
    fn transparent_index_reads_mark_position() {
        let img = indexed(2, 2, vec![0, 1, 2, 0]);
        let mark = TransparencyMark { x: 0, y: 1 };
        let index = transparent_index(
            &img,
            mark,
            TransparencyMapping::SameCoordinate,
            Dimensions::new(2, 2),
        );
        assert_eq!(index, Some(2));
    }

    #[test]
    fn transparent_index_scaled_on_downscale() {
        let img = indexed(2, 2, vec![0, 1, 2, 0]);
        let mark = TransparencyMark { x: 3, y: 0 };
        let index = transparent_index(
            &img,
            mark,
            TransparencyMapping::Scaled,
            Dimensions::new(4, 4),
        );
        assert_eq!(index, Some(1));
    }

    #[test]
    fn transparent_index_outside_output_is_none() {
        let img = indexed(2, 2, vec![0, 1, 2, 0]);
        let mark = TransparencyMark { x: 3, y: 0 };
        let index = transparent_index(
            &img,
            mark,
            TransparencyMapping::SameCoordinate,
            Dimensions::new(4, 4),
        );
        assert_eq!(index, None);
    }

    #[test]
    fn oversized_target_is_rejected_before_resampling() {
        let tmp = tempfile::TempDir::new().unwrap();
        let input = tmp.path().join("in.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([9, 9, 9, 255]))
            .save(&input)
            .unwrap();
        let output = tmp.path().join("out.png");

        let result = resize_image(&input, &output, i32::MAX, i32::MAX, 1, -1);
        assert!(matches!(result, Err(ResizeError::InvalidDimensions { .. })));
        assert!(!output.exists());
    }

    #[test]
    fn missing_input_is_not_found() {
        let request = ResizeRequest::new("/nonexistent/in.png", "/nonexistent/out.png", Format::Png)
            .with_size(10, 10);
        assert!(matches!(
            resize(&request),
            Err(ResizeError::NotFound { .. })
        ));
    }
}
