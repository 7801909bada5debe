#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{BlendKernel, KernelResult};
use crate::buffer::Mask;
use crate::descriptor::{BlendCase, FillDescriptor, ImageDescriptor};
use crate::format::ColorFormat;
use crate::mix::{coverage_merge, mix2, mix3};

const LANES: usize = 16;

/// SSE2 kernel for coverage canvases.
///
/// Handles every masked or translucent blend into [`ColorFormat::A8`] whose contribution does not
/// depend on the source pixels, and every blend of an A8 source into an A8 canvas. Sources with a
/// per-pixel alpha or bit, and everything else, are declined.
#[derive(Debug)]
pub struct Sse2 {
    _private: (),
}

static SSE2: Sse2 = Sse2 { _private: () };

impl Sse2 {
    /// Returns the kernel if the running CPU supports SSE2.
    #[must_use]
    pub fn detect() -> Option<&'static Self> {
        is_x86_feature_detected!("sse2").then_some(&SSE2)
    }
}

impl BlendKernel for Sse2 {
    fn name(&self) -> &'static str {
        "sse2"
    }

    fn blend_color(&self, dsc: &mut FillDescriptor<'_>, case: BlendCase) -> KernelResult {
        if dsc.dest.format() != ColorFormat::A8 || case == BlendCase::Plain {
            return KernelResult::NotHandled;
        }

        let opacity = dsc.opacity;
        let (dest, mask) = dsc.parts();
        let (width, height) = (dest.width(), dest.height());

        // SAFETY: `Sse2` is only constructed after SSE2 support was detected.
        unsafe { merge_uniform(dest.rows_mut(), mask, width, height, opacity, case) }

        KernelResult::Handled
    }

    fn blend_image(&self, dsc: &mut ImageDescriptor<'_>, case: BlendCase) -> KernelResult {
        if dsc.dest.format() != ColorFormat::A8 {
            return KernelResult::NotHandled;
        }

        let (source, mask, opacity) = (dsc.source, dsc.mask, dsc.opacity);
        let dest = &mut dsc.dest;
        let (width, height) = (dest.width(), dest.height());

        match source.format() {
            ColorFormat::A8 => {
                let rows = dest.rows_mut().zip(source.rows(width, height));
                // SAFETY: see `blend_color`.
                unsafe {
                    match (case, mask) {
                        (BlendCase::Plain, _) => {
                            for (row, src) in rows {
                                merge_max(row, src);
                            }
                        }
                        (BlendCase::OpacityOnly, _) => {
                            for (row, src) in rows {
                                merge_scaled(row, src, opacity);
                            }
                        }
                        (BlendCase::MaskOnly, Some(mask)) => {
                            for ((row, src), mask) in rows.zip(mask.rows(width, height)) {
                                merge_product(row, src, mask);
                            }
                        }
                        (BlendCase::MaskAndOpacity, Some(mask)) => {
                            for ((row, src), mask) in rows.zip(mask.rows(width, height)) {
                                merge_product_scaled(row, src, mask, opacity);
                            }
                        }
                        (BlendCase::MaskOnly | BlendCase::MaskAndOpacity, None) => {}
                    }
                }
                KernelResult::Handled
            }
            ColorFormat::L8 | ColorFormat::Rgb565 | ColorFormat::Rgb888 | ColorFormat::Xrgb8888
                if case != BlendCase::Plain =>
            {
                // SAFETY: see `blend_color`.
                unsafe { merge_uniform(dest.rows_mut(), mask, width, height, opacity, case) }
                KernelResult::Handled
            }
            _ => KernelResult::NotHandled,
        }
    }
}

/// Merges full coverage scaled by the mask and opacity into every row.
#[target_feature(enable = "sse2")]
unsafe fn merge_uniform<'a>(
    rows: impl Iterator<Item = &'a mut [u8]>,
    mask: Option<Mask<'_>>,
    width: u32,
    height: u32,
    opacity: u8,
    case: BlendCase,
) {
    match (case, mask) {
        (BlendCase::Plain, _) => {
            for row in rows {
                row.fill(u8::MAX);
            }
        }
        (BlendCase::OpacityOnly, _) => {
            for row in rows {
                merge_splat(row, opacity);
            }
        }
        (BlendCase::MaskOnly, Some(mask)) => {
            for (row, mask) in rows.zip(mask.rows(width, height)) {
                merge_max(row, mask);
            }
        }
        (BlendCase::MaskAndOpacity, Some(mask)) => {
            for (row, mask) in rows.zip(mask.rows(width, height)) {
                merge_scaled(row, mask, opacity);
            }
        }
        (BlendCase::MaskOnly | BlendCase::MaskAndOpacity, None) => {}
    }
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn load(bytes: &[u8]) -> __m128i {
    debug_assert!(bytes.len() >= LANES);
    _mm_loadu_si128(bytes.as_ptr().cast())
}

#[inline]
#[target_feature(enable = "sse2")]
unsafe fn store(bytes: &mut [u8], value: __m128i) {
    debug_assert!(bytes.len() >= LANES);
    _mm_storeu_si128(bytes.as_mut_ptr().cast(), value);
}

/// Lane-wise [`mix2`]. `t = a * b + 128` fits in 16 bits and `(t + (t >> 8)) >> 8` equals
/// `(a * b + 127) / 255` for every pair of bytes.
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn mix2_epu8(a: __m128i, b: __m128i) -> __m128i {
    let zero = _mm_setzero_si128();
    let bias = _mm_set1_epi16(128);

    let lo = _mm_add_epi16(
        _mm_mullo_epi16(_mm_unpacklo_epi8(a, zero), _mm_unpacklo_epi8(b, zero)),
        bias,
    );
    let hi = _mm_add_epi16(
        _mm_mullo_epi16(_mm_unpackhi_epi8(a, zero), _mm_unpackhi_epi8(b, zero)),
        bias,
    );

    let lo = _mm_srli_epi16(_mm_add_epi16(lo, _mm_srli_epi16(lo, 8)), 8);
    let hi = _mm_srli_epi16(_mm_add_epi16(hi, _mm_srli_epi16(hi, 8)), 8);
    _mm_packus_epi16(lo, hi)
}

/// Length of the part of a row covered by whole vectors.
#[inline]
const fn vector_len(len: usize) -> usize {
    len - len % LANES
}

/// `row = max(row, value)`
#[target_feature(enable = "sse2")]
unsafe fn merge_splat(row: &mut [u8], value: u8) {
    let splat = _mm_set1_epi8(value as i8);
    let split = vector_len(row.len());

    for chunk in row[..split].chunks_exact_mut(LANES) {
        store(chunk, _mm_max_epu8(load(chunk), splat));
    }
    for px in &mut row[split..] {
        coverage_merge(px, value);
    }
}

/// `row = max(row, src)`
#[target_feature(enable = "sse2")]
unsafe fn merge_max(row: &mut [u8], src: &[u8]) {
    let split = vector_len(row.len());

    for (chunk, src) in row[..split]
        .chunks_exact_mut(LANES)
        .zip(src.chunks_exact(LANES))
    {
        store(chunk, _mm_max_epu8(load(chunk), load(src)));
    }
    for (px, &s) in row[split..].iter_mut().zip(&src[split..]) {
        coverage_merge(px, s);
    }
}

/// `row = max(row, mix2(src, factor))`
#[target_feature(enable = "sse2")]
unsafe fn merge_scaled(row: &mut [u8], src: &[u8], factor: u8) {
    let splat = _mm_set1_epi8(factor as i8);
    let split = vector_len(row.len());

    for (chunk, src) in row[..split]
        .chunks_exact_mut(LANES)
        .zip(src.chunks_exact(LANES))
    {
        let value = mix2_epu8(load(src), splat);
        store(chunk, _mm_max_epu8(load(chunk), value));
    }
    for (px, &s) in row[split..].iter_mut().zip(&src[split..]) {
        coverage_merge(px, mix2(s, factor));
    }
}

/// `row = max(row, mix2(src, mask))`
#[target_feature(enable = "sse2")]
unsafe fn merge_product(row: &mut [u8], src: &[u8], mask: &[u8]) {
    let split = vector_len(row.len());

    for ((chunk, src), mask) in row[..split]
        .chunks_exact_mut(LANES)
        .zip(src.chunks_exact(LANES))
        .zip(mask.chunks_exact(LANES))
    {
        let value = mix2_epu8(load(src), load(mask));
        store(chunk, _mm_max_epu8(load(chunk), value));
    }
    for ((px, &s), &m) in row[split..]
        .iter_mut()
        .zip(&src[split..])
        .zip(&mask[split..])
    {
        coverage_merge(px, mix2(s, m));
    }
}

/// `row = max(row, mix3(src, mask, factor))`
#[target_feature(enable = "sse2")]
unsafe fn merge_product_scaled(row: &mut [u8], src: &[u8], mask: &[u8], factor: u8) {
    let splat = _mm_set1_epi8(factor as i8);
    let split = vector_len(row.len());

    for ((chunk, src), mask) in row[..split]
        .chunks_exact_mut(LANES)
        .zip(src.chunks_exact(LANES))
        .zip(mask.chunks_exact(LANES))
    {
        let value = mix2_epu8(mix2_epu8(load(src), load(mask)), splat);
        store(chunk, _mm_max_epu8(load(chunk), value));
    }
    for ((px, &s), &m) in row[split..]
        .iter_mut()
        .zip(&src[split..])
        .zip(&mask[split..])
    {
        coverage_merge(px, mix3(s, m, factor));
    }
}
