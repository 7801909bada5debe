use super::{BlendKernel, KernelResult};
use crate::descriptor::{BlendCase, FillDescriptor, ImageDescriptor};
use crate::{fill, image};

/// The portable kernel. Handles every call with plain per-pixel loops and is the fallback for
/// every other kernel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Generic;

impl BlendKernel for Generic {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn blend_color(&self, dsc: &mut FillDescriptor<'_>, case: BlendCase) -> KernelResult {
        fill::fill_generic(dsc, case);
        KernelResult::Handled
    }

    fn blend_image(&self, dsc: &mut ImageDescriptor<'_>, case: BlendCase) -> KernelResult {
        if !image::is_supported(dsc.source.format(), dsc.dest.format()) {
            return KernelResult::NotHandled;
        }

        image::blend_generic(dsc, case);
        KernelResult::Handled
    }
}
