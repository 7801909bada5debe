//! Composites a source pixel buffer into a rectangle of the destination.
//!
//! Coverage canvases ([`ColorFormat::A8`]) take the alpha of the source, or full coverage for
//! sources without alpha, and merge it with `max`. Color destinations composite the source color
//! with the src-over law, folding the source alpha, the mask and the opacity into one effective
//! alpha per pixel.

use crate::arch::{self, BlendKernel, Generic, KernelResult};
use crate::buffer::{DestBuffer, Mask, SourceBuffer};
use crate::descriptor::{BlendCase, ImageDescriptor};
use crate::fill::merge_uniform;
use crate::format::ColorFormat;
use crate::mix::{coverage_merge, mix2, mix3, BlendMode, OPA_TRANSP};
use crate::pixel::{BitPixel, La, Pixel, Rgb, Rgb565, Rgba, Xrgb, L};

/// Returns whether the engine can blend a `source` buffer into a `dest` buffer.
///
/// Every pair is supported except an A8 source into a color destination: an A8 source carries
/// no color to composite.
#[must_use]
pub const fn is_supported(source: ColorFormat, dest: ColorFormat) -> bool {
    dest.is_alpha_only() || source.has_color()
}

/// Composites the source of `dsc` into its destination, using the active kernel.
///
/// Empty rectangles and fully transparent blends leave the destination untouched. Unsupported
/// format pairs (see [`is_supported`]) log a warning and write nothing.
pub fn blend_image(dsc: &mut ImageDescriptor<'_>) {
    blend_image_with(dsc, arch::kernel());
}

/// Composites the source of `dsc` into its destination, trying `kernel` before the generic
/// loops.
pub fn blend_image_with(dsc: &mut ImageDescriptor<'_>, kernel: &dyn BlendKernel) {
    if dsc.dest.is_empty() || dsc.opacity == OPA_TRANSP {
        return;
    }

    let (source, dest) = (dsc.source.format(), dsc.dest.format());
    if !is_supported(source, dest) {
        log::warn!("Blending a {source} source into a {dest} buffer is not supported");
        return;
    }

    let case = dsc.case();
    if kernel.blend_image(dsc, case) == KernelResult::NotHandled {
        log::trace!(
            "{} kernel declined {case:?} {source} blend into {dest}",
            kernel.name()
        );
        Generic.blend_image(dsc, case);
    }
}

macro_rules! blend_image_to {
    ($($(#[$doc:meta])* $name:ident => $format:ident;)+) => {
        $(
            $(#[$doc])*
            ///
            /// A destination of any other format is left untouched and a warning is logged.
            pub fn $name(dsc: &mut ImageDescriptor<'_>) {
                blend_image_to(ColorFormat::$format, dsc);
            }
        )+
    };
}

blend_image_to! {
    /// Blends into an A8 coverage canvas.
    blend_image_to_a8 => A8;
    /// Blends into an L8 buffer.
    blend_image_to_l8 => L8;
    /// Blends into an AL88 buffer.
    blend_image_to_al88 => Al88;
    /// Blends into an RGB565 buffer.
    blend_image_to_rgb565 => Rgb565;
    /// Blends into an RGB888 buffer.
    blend_image_to_rgb888 => Rgb888;
    /// Blends into an XRGB8888 buffer.
    blend_image_to_xrgb8888 => Xrgb8888;
    /// Blends into an ARGB8888 buffer.
    blend_image_to_argb8888 => Argb8888;
    /// Blends into a 1-bit buffer.
    blend_image_to_i1 => I1;
}

fn blend_image_to(format: ColorFormat, dsc: &mut ImageDescriptor<'_>) {
    if dsc.dest.format() != format {
        log::warn!(
            "Not blending an image into a {} buffer through the {format} entry point",
            dsc.dest.format()
        );
        return;
    }

    blend_image(dsc);
}

/// The generic image blend, used by [`Generic`]. The format pair must be supported.
pub(crate) fn blend_generic(dsc: &mut ImageDescriptor<'_>, case: BlendCase) {
    match dsc.dest.format() {
        ColorFormat::A8 => blend_to_coverage(dsc, case),
        ColorFormat::L8 => blend_to_color::<L>(dsc, case),
        ColorFormat::Al88 => blend_to_color::<La>(dsc, case),
        ColorFormat::Rgb565 => blend_to_color::<Rgb565>(dsc, case),
        ColorFormat::Rgb888 => blend_to_color::<Rgb>(dsc, case),
        ColorFormat::Xrgb8888 => blend_to_color::<Xrgb>(dsc, case),
        ColorFormat::Argb8888 => blend_to_color::<Rgba>(dsc, case),
        ColorFormat::I1 => blend_to_color::<BitPixel>(dsc, case),
    }
}

fn blend_to_coverage(dsc: &mut ImageDescriptor<'_>, case: BlendCase) {
    let (source, mask, opacity) = (dsc.source, dsc.mask, dsc.opacity);
    let dest = &mut dsc.dest;

    match source.format() {
        ColorFormat::A8 => merge_alpha(dest, source, mask, opacity, case, |row, x| row[x]),
        ColorFormat::Al88 => merge_alpha(dest, source, mask, opacity, case, |row, x| row[x * 2 + 1]),
        ColorFormat::Argb8888 => {
            merge_alpha(dest, source, mask, opacity, case, |row, x| row[x * 4 + 3]);
        }
        ColorFormat::I1 => merge_alpha(dest, source, mask, opacity, case, |row, x| {
            BitPixel::read_at(row, x).luminance()
        }),
        ColorFormat::L8 | ColorFormat::Rgb565 | ColorFormat::Rgb888 | ColorFormat::Xrgb8888 => {
            merge_uniform(dest, mask, opacity, case);
        }
    }
}

/// Merges the per-pixel alpha of the source, scaled by the mask and opacity, into a coverage
/// canvas.
fn merge_alpha(
    dest: &mut DestBuffer<'_>,
    source: SourceBuffer<'_>,
    mask: Option<Mask<'_>>,
    opacity: u8,
    case: BlendCase,
    alpha: impl Fn(&[u8], usize) -> u8,
) {
    let (width, height) = (dest.width(), dest.height());
    let rows = dest.rows_mut().zip(source.rows(width, height));

    match (case, mask) {
        (BlendCase::Plain, _) => {
            for (row, src) in rows {
                for (x, px) in row.iter_mut().enumerate() {
                    coverage_merge(px, alpha(src, x));
                }
            }
        }
        (BlendCase::OpacityOnly, _) => {
            for (row, src) in rows {
                for (x, px) in row.iter_mut().enumerate() {
                    coverage_merge(px, mix2(alpha(src, x), opacity));
                }
            }
        }
        (BlendCase::MaskOnly, Some(mask)) => {
            for ((row, src), mask) in rows.zip(mask.rows(width, height)) {
                for (x, (px, &m)) in row.iter_mut().zip(mask).enumerate() {
                    coverage_merge(px, mix2(alpha(src, x), m));
                }
            }
        }
        (BlendCase::MaskAndOpacity, Some(mask)) => {
            for ((row, src), mask) in rows.zip(mask.rows(width, height)) {
                for (x, (px, &m)) in row.iter_mut().zip(mask).enumerate() {
                    coverage_merge(px, mix3(alpha(src, x), m, opacity));
                }
            }
        }
        (BlendCase::MaskOnly | BlendCase::MaskAndOpacity, None) => {}
    }
}

fn blend_to_color<D: Pixel>(dsc: &mut ImageDescriptor<'_>, case: BlendCase) {
    match dsc.source.format() {
        ColorFormat::L8 => blend_pixels::<D, L>(dsc, case),
        ColorFormat::Al88 => blend_pixels::<D, La>(dsc, case),
        ColorFormat::Rgb565 => blend_pixels::<D, Rgb565>(dsc, case),
        ColorFormat::Rgb888 => blend_pixels::<D, Rgb>(dsc, case),
        ColorFormat::Xrgb8888 => blend_pixels::<D, Xrgb>(dsc, case),
        ColorFormat::Argb8888 => blend_pixels::<D, Rgba>(dsc, case),
        ColorFormat::I1 => blend_pixels::<D, BitPixel>(dsc, case),
        // rejected by `is_supported` before reaching the generic loops
        ColorFormat::A8 => {}
    }
}

fn blend_pixels<D: Pixel, S: Pixel>(dsc: &mut ImageDescriptor<'_>, case: BlendCase) {
    let (source, mask, opacity, mode) = (dsc.source, dsc.mask, dsc.opacity, dsc.mode);
    let dest = &mut dsc.dest;
    let (width, height) = (dest.width(), dest.height());

    if case == BlendCase::Plain
        && mode == BlendMode::Normal
        && D::FORMAT == S::FORMAT
        && !S::FORMAT.has_alpha()
    {
        copy_rows(dest, source);
        return;
    }

    let composite = |d: D, s: S, alpha: u8| -> D {
        let color = match mode {
            BlendMode::Normal => s.to_rgb(),
            mode => mode.apply(s.to_rgb(), d.to_rgb()),
        };
        d.blend(color, alpha)
    };

    let px_width = width as usize;
    let rows = dest.rows_mut().zip(source.rows(width, height));

    match (case, mask) {
        (BlendCase::Plain, _) => {
            for (row, src) in rows {
                for x in 0..px_width {
                    let s = S::read_at(src, x);
                    composite(D::read_at(row, x), s, s.alpha()).write_at(row, x);
                }
            }
        }
        (BlendCase::OpacityOnly, _) => {
            for (row, src) in rows {
                for x in 0..px_width {
                    let s = S::read_at(src, x);
                    composite(D::read_at(row, x), s, mix2(s.alpha(), opacity)).write_at(row, x);
                }
            }
        }
        (BlendCase::MaskOnly, Some(mask)) => {
            for ((row, src), mask) in rows.zip(mask.rows(width, height)) {
                for (x, &m) in mask.iter().enumerate() {
                    let s = S::read_at(src, x);
                    composite(D::read_at(row, x), s, mix2(s.alpha(), m)).write_at(row, x);
                }
            }
        }
        (BlendCase::MaskAndOpacity, Some(mask)) => {
            for ((row, src), mask) in rows.zip(mask.rows(width, height)) {
                for (x, &m) in mask.iter().enumerate() {
                    let s = S::read_at(src, x);
                    let alpha = mix3(s.alpha(), m, opacity);
                    composite(D::read_at(row, x), s, alpha).write_at(row, x);
                }
            }
        }
        (BlendCase::MaskOnly | BlendCase::MaskAndOpacity, None) => {}
    }
}

/// Copies source rows verbatim into a destination of the same format.
fn copy_rows(dest: &mut DestBuffer<'_>, source: SourceBuffer<'_>) {
    let (width, height) = (dest.width(), dest.height());

    if dest.format() == ColorFormat::I1 {
        // the last byte of a row may hold pixels outside the rectangle
        let whole = width as usize / 8;
        for (row, src) in dest.rows_mut().zip(source.rows(width, height)) {
            row[..whole].copy_from_slice(&src[..whole]);
            for x in whole * 8..width as usize {
                BitPixel::read_at(src, x).write_at(row, x);
            }
        }
    } else {
        for (row, src) in dest.rows_mut().zip(source.rows(width, height)) {
            row.copy_from_slice(src);
        }
    }
}
