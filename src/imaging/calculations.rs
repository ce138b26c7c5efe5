//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::error::ResizeError;
use super::format::Format;

/// Largest output canvas accepted, in pixels (512 MiB of RGBA).
pub const MAX_TARGET_PIXELS: u64 = 1 << 27;

/// GIF stores each side in 16 bits.
pub const MAX_GIF_SIDE: u32 = u16::MAX as u32;

/// Width and height of an image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn contains(self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }
}

/// Resolve the output dimensions of a resize.
///
/// A zero `width` or `height` is derived from the original aspect ratio with
/// integer truncation: `missing = given * other_original / given_original`.
///
/// # Examples
/// ```
/// # use fastimage_resize::imaging::{Dimensions, resolve_dimensions};
/// // 100x50 source, width 33 → height 33 * 50 / 100 = 16
/// let dims = resolve_dimensions(Dimensions::new(100, 50), 33, 0).unwrap();
/// assert_eq!(dims, Dimensions::new(33, 16));
/// ```
///
/// # Errors
/// `InvalidDimensions` when both are zero, or when the derived side
/// truncates to zero (e.g. width 1 on a 100x50 source).
pub fn resolve_dimensions(
    original: Dimensions,
    width: u32,
    height: u32,
) -> Result<Dimensions, ResizeError> {
    let invalid = || ResizeError::InvalidDimensions {
        width: width.into(),
        height: height.into(),
    };

    let (w, h) = match (width, height) {
        (0, 0) => return Err(invalid()),
        (0, h) => (derive_side(h, original.width, original.height), Some(h)),
        (w, 0) => (Some(w), derive_side(w, original.height, original.width)),
        (w, h) => (Some(w), Some(h)),
    };

    match (w, h) {
        (Some(w), Some(h)) => Ok(Dimensions::new(w, h)),
        _ => Err(invalid()),
    }
}

/// `given * other_original / given_original`, computed in 64-bit so large
/// sources cannot overflow. Returns `None` for a zero or out-of-range result.
fn derive_side(given: u32, other_original: u32, given_original: u32) -> Option<u32> {
    if given_original == 0 {
        return None;
    }
    let side = u64::from(given) * u64::from(other_original) / u64::from(given_original);
    u32::try_from(side).ok().filter(|&s| s > 0)
}

/// Reject target sizes the encoder cannot represent or that exceed
/// [`MAX_TARGET_PIXELS`], before any canvas is allocated.
pub fn check_target_size(target: Dimensions, format: Format) -> Result<(), ResizeError> {
    let pixels = u64::from(target.width) * u64::from(target.height);
    let gif_overflow =
        format == Format::Gif && (target.width > MAX_GIF_SIDE || target.height > MAX_GIF_SIDE);
    if pixels > MAX_TARGET_PIXELS || gif_overflow {
        return Err(ResizeError::InvalidDimensions {
            width: target.width.into(),
            height: target.height.into(),
        });
    }
    Ok(())
}

/// Map a pixel coordinate proportionally from one image size to another.
///
/// The result is clamped to the last row/column of `to`.
pub fn scale_coordinate(x: u32, y: u32, from: Dimensions, to: Dimensions) -> (u32, u32) {
    let scale = |v: u32, from: u32, to: u32| -> u32 {
        if from == 0 || to == 0 {
            return 0;
        }
        let scaled = u64::from(v) * u64::from(to) / u64::from(from);
        scaled.min(u64::from(to - 1)) as u32
    };
    (
        scale(x, from.width, to.width),
        scale(y, from.height, to.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // resolve_dimensions tests
    // =========================================================================

    #[test]
    fn explicit_dimensions_pass_through() {
        let dims = resolve_dimensions(Dimensions::new(100, 50), 70, 90).unwrap();
        assert_eq!(dims, Dimensions::new(70, 90));
    }

    #[test]
    fn derives_height_from_width() {
        // 40 * 50 / 100 = 20
        let dims = resolve_dimensions(Dimensions::new(100, 50), 40, 0).unwrap();
        assert_eq!(dims, Dimensions::new(40, 20));
    }

    #[test]
    fn derived_height_truncates() {
        // 33 * 50 / 100 = 16.5 → 16
        let dims = resolve_dimensions(Dimensions::new(100, 50), 33, 0).unwrap();
        assert_eq!(dims, Dimensions::new(33, 16));
    }

    #[test]
    fn derives_width_from_height() {
        // 17 * 100 / 50 = 34
        let dims = resolve_dimensions(Dimensions::new(100, 50), 0, 17).unwrap();
        assert_eq!(dims, Dimensions::new(34, 17));
    }

    #[test]
    fn derived_width_truncates() {
        // 10 * 17 / 32 = 5.3 → 5
        let dims = resolve_dimensions(Dimensions::new(17, 32), 0, 10).unwrap();
        assert_eq!(dims, Dimensions::new(5, 10));
    }

    #[test]
    fn both_zero_is_rejected() {
        let result = resolve_dimensions(Dimensions::new(100, 50), 0, 0);
        assert!(matches!(
            result,
            Err(ResizeError::InvalidDimensions {
                width: 0,
                height: 0
            })
        ));
    }

    #[test]
    fn derived_zero_is_rejected() {
        // 1 * 50 / 100 = 0
        let result = resolve_dimensions(Dimensions::new(100, 50), 1, 0);
        assert!(matches!(result, Err(ResizeError::InvalidDimensions { .. })));
    }

    #[test]
    fn large_sources_do_not_overflow() {
        let dims = resolve_dimensions(Dimensions::new(60_000, 40_000), 50_000, 0).unwrap();
        assert_eq!(dims.height, 33_333);
    }

    // =========================================================================
    // check_target_size tests
    // =========================================================================

    #[test]
    fn ordinary_sizes_fit_the_budget() {
        assert!(check_target_size(Dimensions::new(8000, 6000), Format::Jpeg).is_ok());
        assert!(check_target_size(Dimensions::new(65_535, 1), Format::Gif).is_ok());
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        let result = check_target_size(Dimensions::new(u32::MAX, u32::MAX), Format::Png);
        assert!(matches!(
            result,
            Err(ResizeError::InvalidDimensions {
                width: 4_294_967_295,
                height: 4_294_967_295
            })
        ));
        assert!(check_target_size(Dimensions::new(20_000, 20_000), Format::Jpeg).is_err());
    }

    #[test]
    fn gif_sides_are_limited_to_16_bits() {
        let wide = Dimensions::new(70_000, 1);
        assert!(check_target_size(wide, Format::Png).is_ok());
        assert!(matches!(
            check_target_size(wide, Format::Gif),
            Err(ResizeError::InvalidDimensions { .. })
        ));
    }

    // =========================================================================
    // scale_coordinate tests
    // =========================================================================

    #[test]
    fn scale_identity_is_unchanged() {
        let d = Dimensions::new(20, 10);
        assert_eq!(scale_coordinate(7, 3, d, d), (7, 3));
    }

    #[test]
    fn scale_halves_on_downscale() {
        let from = Dimensions::new(20, 10);
        let to = Dimensions::new(10, 5);
        assert_eq!(scale_coordinate(19, 9, from, to), (9, 4));
        assert_eq!(scale_coordinate(4, 2, from, to), (2, 1));
    }

    #[test]
    fn scale_clamps_to_last_pixel() {
        let from = Dimensions::new(3, 3);
        let to = Dimensions::new(10, 10);
        assert_eq!(scale_coordinate(2, 2, from, to), (6, 6));
        let to = Dimensions::new(1, 1);
        assert_eq!(scale_coordinate(2, 2, from, to), (0, 0));
    }

    #[test]
    fn contains_checks_bounds() {
        let d = Dimensions::new(4, 2);
        assert!(d.contains(3, 1));
        assert!(!d.contains(4, 0));
        assert!(!d.contains(0, 2));
    }
}
