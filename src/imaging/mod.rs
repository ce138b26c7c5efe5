//! Image resizing — decode, resample, re-encode.
//!
//! | Step | Crate / function |
//! |---|---|
//! | **Decode JPEG/PNG** | `image` codecs |
//! | **Decode GIF** | `gif` crate, indexed output |
//! | **Resample** | `image::imageops::resize` with `Triangle` |
//! | **Palette reduction** | exact palette, else `color_quant::NeuQuant` |
//! | **Encode** | `image` codecs for JPEG/PNG, `gif` for GIF |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: [`ResizeRequest`] and [`Quality`]
//! - **Decode / Resample / Palette / Encode**: one file per pipeline stage
//! - **Transparency**: the GIF transparent-pixel heuristic
//! - **Pipeline**: [`resize`] tying the stages together

mod calculations;
pub mod decode;
pub mod encode;
mod error;
mod format;
pub mod palette;
mod params;
pub mod pipeline;
pub mod resample;
pub mod transparency;

pub use calculations::{
    Dimensions, MAX_GIF_SIDE, MAX_TARGET_PIXELS, check_target_size, resolve_dimensions,
    scale_coordinate,
};
pub use error::ResizeError;
pub use format::Format;
pub use palette::{IndexedImage, PaletteOptions};
pub use params::{Quality, ResizeRequest};
pub use pipeline::{resize, resize_image, resize_with};
pub use transparency::{TransparencyMapping, TransparencyMark};
