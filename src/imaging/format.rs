//! The closed set of file formats the pipeline reads and writes.
//!
//! The same selector picks both the decoder and the encoder: a GIF in is a
//! GIF out. There is no content sniffing, so a PNG declared as JPEG fails to
//! decode instead of being silently accepted.

use super::error::ResizeError;
use std::fmt;

/// Encoded file format, with the numeric selectors used by foreign callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Format {
    Jpeg = 0,
    Png = 1,
    Gif = 2,
}

impl Format {
    pub fn selector(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Format::Jpeg => "jpeg",
            Format::Png => "png",
            Format::Gif => "gif",
        }
    }
}

impl TryFrom<i32> for Format {
    type Error = ResizeError;

    fn try_from(selector: i32) -> Result<Self, Self::Error> {
        match selector {
            0 => Ok(Format::Jpeg),
            1 => Ok(Format::Png),
            2 => Ok(Format::Gif),
            other => Err(ResizeError::UnsupportedFormat(other)),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
