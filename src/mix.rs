//! Fixed-point mixing shared by every blender and kernel.
//!
//! All arithmetic works on 8-bit factors where `0` means "nothing" and `255` means "all".
//! Products of two factors are scaled back with [`div255`], which rounds to the nearest integer.
//! Accelerated kernels must reproduce these results bit for bit.

use crate::pixel::Rgb;

/// Fully transparent opacity.
pub const OPA_TRANSP: u8 = 0;

/// Fully opaque opacity.
pub const OPA_COVER: u8 = 255;

/// Divides `value` by 255, rounding to the nearest integer.
///
/// `value` must not exceed `255 * 255`, which holds for any product of two bytes and for any
/// weighted sum `a * w + b * (255 - w)`.
#[inline]
#[must_use]
pub const fn div255(value: u32) -> u8 {
    debug_assert!(value <= 255 * 255);
    ((value + 127) / 255) as u8
}

/// Multiplies two 8-bit factors: `round(a * b / 255)`.
///
/// `mix2(x, 255) == x` and `mix2(x, 0) == 0` for every `x`.
#[inline]
#[must_use]
pub const fn mix2(a: u8, b: u8) -> u8 {
    div255(a as u32 * b as u32)
}

/// Multiplies three 8-bit factors as `mix2(mix2(a, b), c)`.
///
/// The order matters for rounding, kernels must combine factors in the same order.
#[inline]
#[must_use]
pub const fn mix3(a: u8, b: u8, c: u8) -> u8 {
    mix2(mix2(a, b), c)
}

/// Merges `value` into a coverage byte. Coverage only ever grows.
#[inline]
pub fn coverage_merge(dest: &mut u8, value: u8) {
    if *dest < value {
        *dest = value;
    }
}

/// Mixes one channel with the src-over law: `src * alpha + dest * (1 - alpha)`.
#[inline]
#[must_use]
pub const fn mix_channel(src: u8, dest: u8, alpha: u8) -> u8 {
    div255(src as u32 * alpha as u32 + dest as u32 * (255 - alpha as u32))
}

/// Mixes every channel of `src` over `dest` with the given alpha.
#[inline]
#[must_use]
pub fn mix_channels<const N: usize>(src: [u8; N], dest: [u8; N], alpha: u8) -> [u8; N] {
    let mut out = dest;
    for (o, s) in out.iter_mut().zip(src) {
        *o = mix_channel(s, *o, alpha);
    }
    out
}

/// Mixes an RGB color over another one with the given alpha.
#[inline]
#[must_use]
pub fn mix_rgb(src: Rgb, dest: Rgb, alpha: u8) -> Rgb {
    let [r, g, b] = mix_channels([src.r, src.g, src.b], [dest.r, dest.g, dest.b], alpha);

    Rgb { r, g, b }
}

/// Composites opaque channels with an effective `alpha` over a destination that carries its own
/// alpha. Returns the new channels and the new destination alpha.
#[must_use]
pub fn mix_over_alpha<const N: usize>(
    src: [u8; N],
    dest: [u8; N],
    dest_alpha: u8,
    alpha: u8,
) -> ([u8; N], u8) {
    match (alpha, dest_alpha) {
        (OPA_TRANSP, _) => (dest, dest_alpha),
        (OPA_COVER, _) => (src, OPA_COVER),
        (_, OPA_COVER) => (mix_channels(src, dest, alpha), OPA_COVER),
        (_, OPA_TRANSP) => (src, alpha),
        _ => {
            let out_alpha = 255 - mix2(255 - alpha, 255 - dest_alpha);
            // out_alpha >= alpha > 0, so the ratio stays within a byte
            let out_alpha_wide = u32::from(out_alpha);
            let ratio = (u32::from(alpha) * 255 + out_alpha_wide / 2) / out_alpha_wide;

            (mix_channels(src, dest, ratio as u8), out_alpha)
        }
    }
}

/// Represents how the source color is combined with the destination color before it is mixed in
/// with the src-over law.
///
/// Only color destinations honor blend modes; coverage canvases always merge coverage.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// The source color replaces the destination color.
    #[default]
    Normal,
    /// The channels are added together, saturating at 255.
    Additive,
    /// The source channels are subtracted from the destination channels, saturating at 0.
    Subtractive,
    /// The channels are multiplied.
    Multiply,
}

impl BlendMode {
    /// Returns the color that will be mixed over `dest`.
    #[inline]
    #[must_use]
    pub fn apply(self, src: Rgb, dest: Rgb) -> Rgb {
        match self {
            Self::Normal => src,
            Self::Additive => Rgb {
                r: src.r.saturating_add(dest.r),
                g: src.g.saturating_add(dest.g),
                b: src.b.saturating_add(dest.b),
            },
            Self::Subtractive => Rgb {
                r: dest.r.saturating_sub(src.r),
                g: dest.g.saturating_sub(src.g),
                b: dest.b.saturating_sub(src.b),
            },
            Self::Multiply => Rgb {
                r: mix2(src.r, dest.r),
                g: mix2(src.g, dest.g),
                b: mix2(src.b, dest.b),
            },
        }
    }
}
