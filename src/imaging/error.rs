//! Error type for the resize pipeline.
//!
//! Every way a resize can fail maps to exactly one variant, so callers can
//! tell "the input is missing" apart from "the input is not a GIF" apart
//! from "the output directory is read-only".

use super::format::Format;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("cannot open input {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unsupported format selector {0} (expected 0 = jpeg, 1 = png, 2 = gif)")]
    UnsupportedFormat(i32),
    #[error("invalid target dimensions {width}x{height}")]
    InvalidDimensions { width: i64, height: i64 },
    #[error("failed to decode {format} input: {message}")]
    Decode { format: Format, message: String },
    #[error("cannot write output {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode {format} output: {message}")]
    Encode { format: Format, message: String },
}

impl ResizeError {
    pub(crate) fn decode(format: Format, err: impl std::fmt::Display) -> Self {
        ResizeError::Decode {
            format,
            message: err.to_string(),
        }
    }

    pub(crate) fn encode(format: Format, err: impl std::fmt::Display) -> Self {
        ResizeError::Encode {
            format,
            message: err.to_string(),
        }
    }
}
