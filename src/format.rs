//! The pixel format catalog: byte layout and channel properties of every format the engine can
//! read from or write to.

use crate::error::{Error::UnknownColorFormat, Result};
use std::fmt;
use std::str::FromStr;

/// Represents the memory layout of a pixel buffer.
///
/// Multi-byte formats are stored little-endian, i.e. blue comes first in memory for
/// [`ColorFormat::Rgb888`], [`ColorFormat::Xrgb8888`] and [`ColorFormat::Argb8888`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    /// 8-bit alpha only. Used as a coverage canvas: it stores how much a pixel is covered, not a
    /// displayable color.
    A8,

    /// 8-bit luminance, no alpha.
    L8,

    /// 8-bit luminance followed by 8-bit alpha.
    Al88,

    /// 16-bit packed color: 5 bits red, 6 bits green, 5 bits blue.
    Rgb565,

    /// 24-bit color stored as `[b, g, r]`.
    Rgb888,

    /// 32-bit color stored as `[b, g, r, x]`. The fourth byte is ignored when read and written
    /// as `0xff`.
    Xrgb8888,

    /// 32-bit color with a real alpha channel, stored as `[b, g, r, a]`.
    Argb8888,

    /// 1 bit per pixel, MSB-first within each byte.
    I1,
}

impl ColorFormat {
    /// All formats known to the engine.
    pub const ALL: [Self; 8] = [
        Self::A8,
        Self::L8,
        Self::Al88,
        Self::Rgb565,
        Self::Rgb888,
        Self::Xrgb8888,
        Self::Argb8888,
        Self::I1,
    ];

    /// Returns the amount of bits a single pixel occupies.
    #[inline]
    #[must_use]
    pub const fn bits_per_pixel(&self) -> usize {
        match self {
            Self::I1 => 1,
            Self::A8 | Self::L8 => 8,
            Self::Al88 | Self::Rgb565 => 16,
            Self::Rgb888 => 24,
            Self::Xrgb8888 | Self::Argb8888 => 32,
        }
    }

    /// Returns the amount of whole bytes a single pixel occupies. This is `0` for
    /// [`ColorFormat::I1`], whose pixels are packed into bits.
    #[inline]
    #[must_use]
    pub const fn bytes_per_pixel(&self) -> usize {
        self.bits_per_pixel() / 8
    }

    /// Returns the amount of bytes needed to store `width` pixels, without any padding.
    #[inline]
    #[must_use]
    pub const fn row_bytes(&self, width: u32) -> usize {
        (width as usize * self.bits_per_pixel() + 7) / 8
    }

    /// Whether pixels of this format carry color alongside a real alpha channel.
    #[inline]
    #[must_use]
    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::Al88 | Self::Argb8888)
    }

    /// Whether this format only stores alpha (coverage) and no color.
    #[inline]
    #[must_use]
    pub const fn is_alpha_only(&self) -> bool {
        matches!(self, Self::A8)
    }

    /// Whether this format stores a displayable color (or luminance).
    #[inline]
    #[must_use]
    pub const fn has_color(&self) -> bool {
        !self.is_alpha_only()
    }

    /// Returns the lowercase name of the format.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::A8 => "a8",
            Self::L8 => "l8",
            Self::Al88 => "al88",
            Self::Rgb565 => "rgb565",
            Self::Rgb888 => "rgb888",
            Self::Xrgb8888 => "xrgb8888",
            Self::Argb8888 => "argb8888",
            Self::I1 => "i1",
        }
    }
}

impl FromStr for ColorFormat {
    type Err = crate::Error;

    /// Parses a format name such as `"rgb565"`, case-insensitively.
    ///
    /// # Errors
    /// * The name does not match any known format.
    fn from_str(s: &str) -> Result<Self> {
        let lower = s.to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|format| format.name() == lower)
            .ok_or_else(|| UnknownColorFormat(s.to_string()))
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::A8 => "A8",
            Self::L8 => "L8",
            Self::Al88 => "AL88",
            Self::Rgb565 => "RGB565",
            Self::Rgb888 => "RGB888",
            Self::Xrgb8888 => "XRGB8888",
            Self::Argb8888 => "ARGB8888",
            Self::I1 => "I1",
        })
    }
}
