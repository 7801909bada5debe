mod common;

use std::sync::atomic::{AtomicUsize, Ordering};

use swblend::arch::{self, BlendKernel, Generic, KernelResult};
use swblend::fill::blend_color_with;
use swblend::image::blend_image_with;
use swblend::prelude::*;
use swblend::BlendCase;

const WIDTHS: [u32; 5] = [1, 15, 16, 33, 70];
const HEIGHT: u32 = 3;
const OPACITIES: [u8; 3] = [255, 128, 1];

fn fill_with(
    kernel: &dyn BlendKernel,
    width: u32,
    opacity: u8,
    mask: Option<&[u8]>,
) -> swblend::Result<Vec<u8>> {
    let mut data = common::noise((width * HEIGHT) as usize, width);
    let dest = DestBuffer::packed(&mut data, width, HEIGHT, ColorFormat::A8)?;
    let mut dsc = FillDescriptor::new(dest, Rgb::white()).with_opacity(opacity);
    if let Some(mask) = mask {
        dsc = dsc.with_mask(Mask::new(mask, width as usize))?;
    }

    blend_color_with(&mut dsc, kernel);
    Ok(data)
}

fn image_with(
    kernel: &dyn BlendKernel,
    width: u32,
    source: SourceBuffer<'_>,
    opacity: u8,
    mask: Option<&[u8]>,
) -> swblend::Result<Vec<u8>> {
    let mut data = common::noise((width * HEIGHT) as usize, width + 1);
    let dest = DestBuffer::packed(&mut data, width, HEIGHT, ColorFormat::A8)?;
    let mut dsc = ImageDescriptor::new(dest, source)?.with_opacity(opacity);
    if let Some(mask) = mask {
        dsc = dsc.with_mask(Mask::new(mask, width as usize))?;
    }

    blend_image_with(&mut dsc, kernel);
    Ok(data)
}

#[test]
fn test_active_kernel_matches_generic_fill() -> swblend::Result<()> {
    let active = arch::kernel();

    for width in WIDTHS {
        let mask = common::noise((width * HEIGHT) as usize, 99);
        for opacity in OPACITIES {
            for mask in [None, Some(mask.as_slice())] {
                assert_eq!(
                    fill_with(active, width, opacity, mask)?,
                    fill_with(&Generic, width, opacity, mask)?,
                    "{} kernel, width {width}, opacity {opacity}, masked {}",
                    active.name(),
                    mask.is_some(),
                );
            }
        }
    }
    Ok(())
}

#[test]
fn test_active_kernel_matches_generic_image() -> swblend::Result<()> {
    let active = arch::kernel();

    for width in WIDTHS {
        let pixels = (width * HEIGHT) as usize;
        let mask = common::noise(pixels, 98);

        for format in ColorFormat::ALL {
            if !swblend::image::is_supported(format, ColorFormat::A8) {
                continue;
            }

            let stride = format.row_bytes(width);
            let data = common::noise(stride * HEIGHT as usize, 97);
            let source = SourceBuffer::new(&data, stride, format);

            for opacity in OPACITIES {
                for mask in [None, Some(mask.as_slice())] {
                    assert_eq!(
                        image_with(active, width, source, opacity, mask)?,
                        image_with(&Generic, width, source, opacity, mask)?,
                        "{} kernel, {format} source, width {width}, opacity {opacity}, masked {}",
                        active.name(),
                        mask.is_some(),
                    );
                }
            }
        }
    }
    Ok(())
}

/// Declines every call, counting how often it was asked.
#[derive(Default)]
struct Declining {
    calls: AtomicUsize,
}

impl BlendKernel for Declining {
    fn name(&self) -> &'static str {
        "declining"
    }

    fn blend_color(&self, _dsc: &mut FillDescriptor<'_>, _case: BlendCase) -> KernelResult {
        self.calls.fetch_add(1, Ordering::Relaxed);
        KernelResult::NotHandled
    }
}

#[test]
fn test_declined_calls_fall_back_to_generic() -> swblend::Result<()> {
    let kernel = Declining::default();
    let mask = common::noise(33, 96);

    let declined = {
        let mut data = common::noise(33, 95);
        let dest = DestBuffer::packed(&mut data, 33, 1, ColorFormat::Rgb565)?;
        let mut dsc = FillDescriptor::new(dest, Rgb::new(30, 60, 90))
            .with_opacity(77)
            .with_mask(Mask::new(&mask, 33))?;
        blend_color_with(&mut dsc, &kernel);
        data
    };
    let generic = {
        let mut data = common::noise(33, 95);
        let dest = DestBuffer::packed(&mut data, 33, 1, ColorFormat::Rgb565)?;
        let mut dsc = FillDescriptor::new(dest, Rgb::new(30, 60, 90))
            .with_opacity(77)
            .with_mask(Mask::new(&mask, 33))?;
        blend_color_with(&mut dsc, &Generic);
        data
    };

    assert_eq!(declined, generic);
    assert_eq!(kernel.calls.load(Ordering::Relaxed), 1);
    Ok(())
}

#[test]
fn test_kernel_is_not_called_for_noops() -> swblend::Result<()> {
    let kernel = Declining::default();
    let mut data = [0; 4];

    let dest = DestBuffer::packed(&mut data, 4, 1, ColorFormat::A8)?;
    blend_color_with(&mut FillDescriptor::new(dest, Rgb::white()).with_opacity(0), &kernel);

    let dest = DestBuffer::packed(&mut data, 0, 1, ColorFormat::A8)?;
    blend_color_with(&mut FillDescriptor::new(dest, Rgb::white()), &kernel);

    assert_eq!(kernel.calls.load(Ordering::Relaxed), 0);
    assert_eq!(data, [0; 4]);
    Ok(())
}

#[test]
fn test_blend_case_classification() {
    assert_eq!(BlendCase::classify(false, 255), BlendCase::Plain);
    assert_eq!(BlendCase::classify(false, 254), BlendCase::OpacityOnly);
    assert_eq!(BlendCase::classify(true, 255), BlendCase::MaskOnly);
    assert_eq!(BlendCase::classify(true, 1), BlendCase::MaskAndOpacity);
}
