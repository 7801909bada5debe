//! Common error types.

use crate::format::ColorFormat;
use std::fmt;

/// A shortcut type equivalent to `Result<T, swblend::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents an error that occurs while describing a blend.
///
/// Blending itself never fails: these errors are raised when building the buffer views and
/// descriptors handed to the blenders, before any pixel is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A row stride was smaller than the bytes needed to store one row of pixels.
    InvalidStride {
        /// The format of the buffer.
        format: ColorFormat,
        /// The stride that was given, in bytes.
        stride: usize,
        /// The minimum stride for the buffer's width, in bytes.
        row_bytes: usize,
    },

    /// A buffer is too small for the dimensions it was declared with.
    IncompatibleBufferData {
        width: u32,
        height: u32,
        /// The amount of bytes that were needed.
        required: usize,
        /// The amount of bytes that were received.
        received: usize,
    },

    /// A region was requested that does not lie inside its parent buffer.
    RegionOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// A region of a packed 1-bit buffer must start on a byte boundary.
    MisalignedRegion {
        /// The requested horizontal offset, in pixels.
        x: u32,
    },

    /// A color format name could not be parsed.
    UnknownColorFormat(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidStride {
                format,
                stride,
                row_bytes,
            } => write!(
                f,
                "Invalid stride: a {format} row needs at least {row_bytes} bytes, got a stride of {stride}"
            ),
            Self::IncompatibleBufferData {
                width,
                height,
                required,
                received,
            } => write!(
                f,
                "A buffer with dimensions {width}x{height} needs {required} bytes, received {received} instead"
            ),
            Self::RegionOutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "Region {width}x{height} at ({x}, {y}) is out of the bounds of its buffer"
            ),
            Self::MisalignedRegion { x } => write!(
                f,
                "Regions of 1-bit buffers must start on a byte boundary, got x = {x}"
            ),
            Self::UnknownColorFormat(name) => write!(f, "Unknown color format: {name}"),
        }
    }
}
