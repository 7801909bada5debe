//! Architecture-specific blend kernels.
//!
//! A [`BlendKernel`] may take over a whole blend call. Every call is first offered to the active
//! kernel returned by [`kernel`]; when it answers [`KernelResult::NotHandled`], the portable
//! [`Generic`] kernel runs instead. Kernels must produce the exact same bytes as [`Generic`] for
//! every input they accept, including the rounding of [`crate::mix::div255`].

mod manual;
#[cfg(all(feature = "simd", any(target_arch = "x86", target_arch = "x86_64")))]
mod x86;

use crate::descriptor::{BlendCase, FillDescriptor, ImageDescriptor};

pub use manual::Generic;
#[cfg(all(feature = "simd", any(target_arch = "x86", target_arch = "x86_64")))]
pub use x86::Sse2;

/// Whether a kernel blended a call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KernelResult {
    /// The kernel wrote the whole destination rectangle.
    Handled,
    /// The kernel does not support this call and left the destination untouched.
    NotHandled,
}

/// A set of blending routines covering some combinations of formats, mask and opacity.
///
/// The dispatchers only call kernels with non-empty destinations, a non-zero opacity and
/// supported format pairs, with `case` classified from the descriptor.
pub trait BlendKernel: Sync {
    /// A short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Fills the destination of `dsc`, or declines without writing anything.
    fn blend_color(&self, _dsc: &mut FillDescriptor<'_>, _case: BlendCase) -> KernelResult {
        KernelResult::NotHandled
    }

    /// Blends the source of `dsc` into its destination, or declines without writing anything.
    fn blend_image(&self, _dsc: &mut ImageDescriptor<'_>, _case: BlendCase) -> KernelResult {
        KernelResult::NotHandled
    }
}

/// Returns the fastest kernel supported by the running CPU.
#[must_use]
pub fn kernel() -> &'static dyn BlendKernel {
    #[cfg(all(feature = "simd", any(target_arch = "x86", target_arch = "x86_64")))]
    {
        if let Some(kernel) = Sse2::detect() {
            return kernel;
        }
    }

    &Generic
}
