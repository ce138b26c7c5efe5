//! # fastimage-resize
//!
//! Resize a JPEG, PNG or GIF file on disk and write the result back to disk
//! in the same format, keeping single-color transparency on GIFs.
//!
//! ```no_run
//! use fastimage_resize::imaging::{Format, ResizeRequest, resize};
//!
//! // 0 height: derived from the aspect ratio.
//! let request = ResizeRequest::new("photo.png", "thumb.png", Format::Png).with_size(200, 0);
//! resize(&request)?;
//! # Ok::<(), fastimage_resize::imaging::ResizeError>(())
//! ```
//!
//! # Pipeline
//!
//! ```text
//! decode → (GIF: locate + clear transparent index) → resolve size
//!        → resample onto a truecolor canvas → encode
//!        → (GIF: reduce palette, re-declare transparent index)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`imaging`] | The pipeline: decode, dimension math, resample, palette reduction, encode |
//! | [`config`] | Optional `toml` config with JPEG and GIF encoder defaults |
//!
//! # Design Decisions
//!
//! ## Caller Declares the Format
//!
//! There is no content sniffing. The format selector picks both decoder and
//! encoder, so a mislabelled file fails with a decode error instead of being
//! converted.
//!
//! ## GIF Transparency Is a Heuristic
//!
//! Resampling happens on truecolor pixels, where a palette "transparent
//! index" has no meaning. The pipeline remembers where the first transparent
//! pixel was, resamples it as an opaque color, and after palette reduction
//! declares whichever index ended up at that spot transparent. This is exact
//! for identity resizes and approximate otherwise; see
//! [`imaging::TransparencyMapping`].
//!
//! ## Typed Failures
//!
//! [`imaging::ResizeError`] separates a missing input, an unknown format,
//! bad dimensions, undecodable input, and an unwritable output.

pub mod config;
pub mod imaging;
