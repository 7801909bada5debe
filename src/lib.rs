//! Software pixel blending into caller-owned buffers.
//!
//! Two operations are provided: filling a rectangle with a constant color ([`blend_color`]) and
//! compositing a source buffer into a rectangle ([`blend_image`]). Both accept an optional
//! per-pixel [`Mask`] and a global opacity, and support every [`ColorFormat`].
//!
//! ```
//! use swblend::prelude::*;
//!
//! let mut data = [0u8; 3];
//! let dest = DestBuffer::packed(&mut data, 1, 1, ColorFormat::Rgb888)?;
//! blend_color(&mut FillDescriptor::new(dest, Rgb::new(255, 0, 0)).with_opacity(128));
//!
//! // stored as blue, green, red
//! assert_eq!(data, [0, 0, 128]);
//! # Ok::<(), swblend::Error>(())
//! ```

pub mod arch;
pub mod buffer;
pub mod descriptor;
pub mod error;
pub mod fill;
pub mod format;
pub mod image;
pub mod mix;
pub mod pixel;

pub use buffer::{DestBuffer, Mask, SourceBuffer};
pub use descriptor::{BlendCase, FillDescriptor, ImageDescriptor};
pub use error::{Error, Result};
pub use fill::{
    blend_color, blend_color_to_a8, blend_color_to_al88, blend_color_to_argb8888,
    blend_color_to_i1, blend_color_to_l8, blend_color_to_rgb565, blend_color_to_rgb888,
    blend_color_to_xrgb8888,
};
pub use format::ColorFormat;
pub use image::{
    blend_image, blend_image_to_a8, blend_image_to_al88, blend_image_to_argb8888,
    blend_image_to_i1, blend_image_to_l8, blend_image_to_rgb565, blend_image_to_rgb888,
    blend_image_to_xrgb8888,
};
pub use mix::BlendMode;
pub use pixel::{BitPixel, La, Pixel, Rgb, Rgb565, Rgba, Xrgb, L};

pub mod prelude {
    pub use super::{
        blend_color, blend_image, BitPixel, BlendMode, ColorFormat, DestBuffer, FillDescriptor,
        ImageDescriptor, La, Mask, Pixel, Rgb, Rgb565, Rgba, SourceBuffer, Xrgb, L,
    };
}
