//! Composites a constant color into a rectangle of the destination.
//!
//! The entry points are [`blend_color`], which dispatches on the destination format, and one
//! `blend_color_to_*` function per destination format. Every call is classified once into a
//! [`BlendCase`], handed to the active [`BlendKernel`] and, if the kernel declines it, run by the
//! generic loops in this module.

use crate::arch::{self, BlendKernel, Generic, KernelResult};
use crate::buffer::{DestBuffer, Mask};
use crate::descriptor::{BlendCase, FillDescriptor};
use crate::format::ColorFormat;
use crate::mix::{coverage_merge, mix2, OPA_COVER, OPA_TRANSP};
use crate::pixel::{BitPixel, La, Pixel, Rgb, Rgb565, Rgba, Xrgb, L};

/// Fills the destination of `dsc` with its color, using the active kernel.
///
/// Empty rectangles and fully transparent fills leave the destination untouched.
pub fn blend_color(dsc: &mut FillDescriptor<'_>) {
    blend_color_with(dsc, arch::kernel());
}

/// Fills the destination of `dsc` with its color, trying `kernel` before the generic loops.
pub fn blend_color_with(dsc: &mut FillDescriptor<'_>, kernel: &dyn BlendKernel) {
    if dsc.dest.is_empty() || dsc.opacity == OPA_TRANSP {
        return;
    }

    let case = dsc.case();
    if kernel.blend_color(dsc, case) == KernelResult::NotHandled {
        log::trace!(
            "{} kernel declined {case:?} fill into {}",
            kernel.name(),
            dsc.dest.format()
        );
        Generic.blend_color(dsc, case);
    }
}

macro_rules! blend_color_to {
    ($($(#[$doc:meta])* $name:ident => $format:ident;)+) => {
        $(
            $(#[$doc])*
            ///
            /// A destination of any other format is left untouched and a warning is logged.
            pub fn $name(dsc: &mut FillDescriptor<'_>) {
                blend_color_to(ColorFormat::$format, dsc);
            }
        )+
    };
}

blend_color_to! {
    /// Fills an A8 coverage canvas. The color is ignored: the fill contributes full coverage
    /// scaled by the mask and opacity, merged with `max`.
    blend_color_to_a8 => A8;
    /// Fills an L8 buffer with the luminance of the color.
    blend_color_to_l8 => L8;
    /// Fills an AL88 buffer with the luminance of the color.
    blend_color_to_al88 => Al88;
    /// Fills an RGB565 buffer.
    blend_color_to_rgb565 => Rgb565;
    /// Fills an RGB888 buffer.
    blend_color_to_rgb888 => Rgb888;
    /// Fills an XRGB8888 buffer.
    blend_color_to_xrgb8888 => Xrgb8888;
    /// Fills an ARGB8888 buffer.
    blend_color_to_argb8888 => Argb8888;
    /// Fills a 1-bit buffer. Pixels end up set where the blended luminance is above 127.
    blend_color_to_i1 => I1;
}

fn blend_color_to(format: ColorFormat, dsc: &mut FillDescriptor<'_>) {
    if dsc.dest.format() != format {
        log::warn!(
            "Not blending a color into a {} buffer through the {format} entry point",
            dsc.dest.format()
        );
        return;
    }

    blend_color(dsc);
}

/// The generic fill, used by [`Generic`].
pub(crate) fn fill_generic(dsc: &mut FillDescriptor<'_>, case: BlendCase) {
    let color = dsc.color;
    let opacity = dsc.opacity;
    let (dest, mask) = dsc.parts();

    match dest.format() {
        ColorFormat::A8 => merge_uniform(dest, mask, opacity, case),
        ColorFormat::L8 => fill_pixels::<L>(dest, mask, color, opacity, case),
        ColorFormat::Al88 => fill_pixels::<La>(dest, mask, color, opacity, case),
        ColorFormat::Rgb565 => fill_pixels::<Rgb565>(dest, mask, color, opacity, case),
        ColorFormat::Rgb888 => fill_pixels::<Rgb>(dest, mask, color, opacity, case),
        ColorFormat::Xrgb8888 => fill_pixels::<Xrgb>(dest, mask, color, opacity, case),
        ColorFormat::Argb8888 => fill_pixels::<Rgba>(dest, mask, color, opacity, case),
        ColorFormat::I1 => fill_pixels::<BitPixel>(dest, mask, color, opacity, case),
    }
}

/// Merges a uniform full-coverage contribution, scaled by the mask and opacity, into a coverage
/// canvas. Shared with image blends of sources that carry no alpha.
pub(crate) fn merge_uniform(
    dest: &mut DestBuffer<'_>,
    mask: Option<Mask<'_>>,
    opacity: u8,
    case: BlendCase,
) {
    let (width, height) = (dest.width(), dest.height());

    match (case, mask) {
        (BlendCase::Plain, _) => {
            for row in dest.rows_mut() {
                row.fill(OPA_COVER);
            }
        }
        (BlendCase::OpacityOnly, _) => {
            for row in dest.rows_mut() {
                for px in row {
                    coverage_merge(px, opacity);
                }
            }
        }
        (BlendCase::MaskOnly, Some(mask)) => {
            for (row, mask) in dest.rows_mut().zip(mask.rows(width, height)) {
                for (px, &m) in row.iter_mut().zip(mask) {
                    coverage_merge(px, m);
                }
            }
        }
        (BlendCase::MaskAndOpacity, Some(mask)) => {
            for (row, mask) in dest.rows_mut().zip(mask.rows(width, height)) {
                for (px, &m) in row.iter_mut().zip(mask) {
                    coverage_merge(px, mix2(m, opacity));
                }
            }
        }
        // masked cases are only ever classified from a present mask
        (BlendCase::MaskOnly | BlendCase::MaskAndOpacity, None) => {}
    }
}

fn fill_pixels<P: Pixel>(
    dest: &mut DestBuffer<'_>,
    mask: Option<Mask<'_>>,
    color: Rgb,
    opacity: u8,
    case: BlendCase,
) {
    match (case, mask) {
        (BlendCase::Plain, _) => fill_solid(dest, P::from_rgb(color)),
        (BlendCase::OpacityOnly, _) => map_pixels::<P>(dest, |px| px.blend(color, opacity)),
        (BlendCase::MaskOnly, Some(mask)) => {
            map_pixels_masked::<P>(dest, mask, |px, m| px.blend(color, m));
        }
        (BlendCase::MaskAndOpacity, Some(mask)) => {
            map_pixels_masked::<P>(dest, mask, |px, m| px.blend(color, mix2(m, opacity)));
        }
        (BlendCase::MaskOnly | BlendCase::MaskAndOpacity, None) => {}
    }
}

/// Overwrites every pixel with `pixel`. Rows are memset when the encoded pixel is a single
/// repeated byte.
fn fill_solid<P: Pixel>(dest: &mut DestBuffer<'_>, pixel: P) {
    let width = dest.width() as usize;
    let size = P::FORMAT.bytes_per_pixel();

    if size == 0 {
        for row in dest.rows_mut() {
            for x in 0..width {
                pixel.write_at(row, x);
            }
        }
        return;
    }

    let mut encoded = [0; 4];
    pixel.write_at(&mut encoded, 0);
    let encoded = &encoded[..size];

    if encoded.iter().all(|&byte| byte == encoded[0]) {
        for row in dest.rows_mut() {
            row.fill(encoded[0]);
        }
    } else {
        for row in dest.rows_mut() {
            for px in row.chunks_exact_mut(size) {
                px.copy_from_slice(encoded);
            }
        }
    }
}

/// Replaces every pixel of the destination with the result of `f`.
fn map_pixels<P: Pixel>(dest: &mut DestBuffer<'_>, mut f: impl FnMut(P) -> P) {
    let width = dest.width() as usize;

    for row in dest.rows_mut() {
        for x in 0..width {
            f(P::read_at(row, x)).write_at(row, x);
        }
    }
}

/// Like [`map_pixels`], also passing the mask byte of each pixel.
fn map_pixels_masked<P: Pixel>(
    dest: &mut DestBuffer<'_>,
    mask: Mask<'_>,
    mut f: impl FnMut(P, u8) -> P,
) {
    let (width, height) = (dest.width(), dest.height());

    for (row, mask) in dest.rows_mut().zip(mask.rows(width, height)) {
        for (x, &m) in mask.iter().enumerate() {
            f(P::read_at(row, x), m).write_at(row, x);
        }
    }
}
