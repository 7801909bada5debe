mod common;

use swblend::prelude::*;
use swblend::{blend_image_to_a8, blend_image_to_rgb888};

fn a8_blend(dest: &mut [u8], source: &[u8], width: u32) -> swblend::Result<()> {
    let dest = DestBuffer::packed(dest, width, 1, ColorFormat::A8)?;
    let source = SourceBuffer::new(source, width as usize, ColorFormat::A8);
    blend_image(&mut ImageDescriptor::new(dest, source)?);
    Ok(())
}

#[test]
fn test_a8_merge_is_order_independent() -> swblend::Result<()> {
    let first = common::noise(50, 10);
    let second = common::noise(50, 11);
    let initial = common::noise(50, 12);

    let mut forward = initial.clone();
    a8_blend(&mut forward, &first, 50)?;
    a8_blend(&mut forward, &second, 50)?;

    let mut backward = initial.clone();
    a8_blend(&mut backward, &second, 50)?;
    a8_blend(&mut backward, &first, 50)?;

    assert_eq!(forward, backward);
    for i in 0..50 {
        assert_eq!(forward[i], initial[i].max(first[i]).max(second[i]));
    }
    Ok(())
}

#[test]
fn test_a8_from_argb_takes_alpha() -> swblend::Result<()> {
    let source = common::encode(&[
        Rgba::new(0, 0, 0, 255),
        Rgba::new(255, 255, 255, 128),
        Rgba::new(9, 9, 9, 0),
    ]);
    let mut data = [10, 100, 5];
    let dest = DestBuffer::packed(&mut data, 3, 1, ColorFormat::A8)?;
    let source = SourceBuffer::new(&source, 12, ColorFormat::Argb8888);
    blend_image_to_a8(&mut ImageDescriptor::new(dest, source)?.with_opacity(128));

    assert_eq!(data, [128, 100, 5]);
    Ok(())
}

#[test]
fn test_a8_from_i1_covers_set_bits_only() -> swblend::Result<()> {
    let source = [0xff, 0x00];
    let mut data = [0; 16];
    let dest = DestBuffer::packed(&mut data, 16, 1, ColorFormat::A8)?;
    let source = SourceBuffer::new(&source, 2, ColorFormat::I1);
    blend_image(&mut ImageDescriptor::new(dest, source)?.with_opacity(100));

    let mut expected = [0; 16];
    expected[..8].fill(100);
    assert_eq!(data, expected);

    let source = [0b1000_0001, 0b0100_0000];
    let mask = [200; 16];
    let mut data = [0; 16];
    let dest = DestBuffer::packed(&mut data, 16, 1, ColorFormat::A8)?;
    let source = SourceBuffer::new(&source, 2, ColorFormat::I1);
    blend_image(&mut ImageDescriptor::new(dest, source)?.with_mask(Mask::new(&mask, 16))?);

    let mut expected = [0; 16];
    for x in [0, 7, 9] {
        expected[x] = 200;
    }
    assert_eq!(data, expected);

    Ok(())
}

#[test]
fn test_a8_from_opaque_source() -> swblend::Result<()> {
    let source = common::encode(&[Rgb::black(), Rgb::white()]);
    let mut data = [50, 150];
    let dest = DestBuffer::packed(&mut data, 2, 1, ColorFormat::A8)?;
    let source = SourceBuffer::new(&source, 6, ColorFormat::Rgb888);
    blend_image(&mut ImageDescriptor::new(dest, source)?.with_opacity(100));

    assert_eq!(data, [100, 150]);
    Ok(())
}

#[test]
fn test_a8_ignores_blend_mode() -> swblend::Result<()> {
    let source = [40, 200];
    let mut data = [100, 100];
    let dest = DestBuffer::packed(&mut data, 2, 1, ColorFormat::A8)?;
    let source = SourceBuffer::new(&source, 2, ColorFormat::A8);
    blend_image(&mut ImageDescriptor::new(dest, source)?.with_mode(BlendMode::Subtractive));

    assert_eq!(data, [100, 200]);
    Ok(())
}

#[test_log::test]
fn test_a8_source_into_color_is_unsupported() -> swblend::Result<()> {
    let source = [255; 4];
    let initial = common::noise(12, 13);
    let mut data = initial.clone();
    let dest = DestBuffer::packed(&mut data, 4, 1, ColorFormat::Rgb888)?;
    let source = SourceBuffer::new(&source, 4, ColorFormat::A8);
    blend_image_to_rgb888(&mut ImageDescriptor::new(dest, source)?);

    assert_eq!(data, initial);
    assert!(!swblend::image::is_supported(ColorFormat::A8, ColorFormat::Rgb888));
    assert!(swblend::image::is_supported(ColorFormat::Rgb888, ColorFormat::A8));
    Ok(())
}

#[test]
fn test_same_format_copy() -> swblend::Result<()> {
    // two rows of two RGB565 pixels, padded to 6 bytes in the source and 8 in the destination
    let source = [1, 2, 3, 4, 0xee, 0xee, 5, 6, 7, 8];
    let mut data = [0xaa; 16];
    let dest = DestBuffer::new(&mut data, 2, 2, 8, ColorFormat::Rgb565)?;
    let source = SourceBuffer::new(&source, 6, ColorFormat::Rgb565);
    blend_image(&mut ImageDescriptor::new(dest, source)?);

    assert_eq!(
        data,
        [1, 2, 3, 4, 0xaa, 0xaa, 0xaa, 0xaa, 5, 6, 7, 8, 0xaa, 0xaa, 0xaa, 0xaa]
    );
    Ok(())
}

#[test]
fn test_i1_copy_keeps_trailing_bits() -> swblend::Result<()> {
    let source = [0b1010_1010, 0b1111_1111];
    let mut data = [0, 0];
    let dest = DestBuffer::packed(&mut data, 12, 1, ColorFormat::I1)?;
    let source = SourceBuffer::new(&source, 2, ColorFormat::I1);
    blend_image(&mut ImageDescriptor::new(dest, source)?);

    assert_eq!(data, [0b1010_1010, 0b1111_0000]);
    Ok(())
}

#[test]
fn test_argb_over_rgb888() -> swblend::Result<()> {
    let source = common::encode(&[Rgba::new(255, 0, 0, 128)]);
    let mut data = [0; 3];
    let dest = DestBuffer::packed(&mut data, 1, 1, ColorFormat::Rgb888)?;
    let source = SourceBuffer::new(&source, 4, ColorFormat::Argb8888);
    blend_image(&mut ImageDescriptor::new(dest, source)?);

    assert_eq!(data, [0, 0, 128]);
    Ok(())
}

#[test]
fn test_rgb888_into_xrgb8888() -> swblend::Result<()> {
    let source = common::encode(&[Rgb::new(1, 2, 3)]);
    let mut data = [0; 4];
    let dest = DestBuffer::packed(&mut data, 1, 1, ColorFormat::Xrgb8888)?;
    let source = SourceBuffer::new(&source, 3, ColorFormat::Rgb888);
    blend_image(&mut ImageDescriptor::new(dest, source)?);

    assert_eq!(data, [3, 2, 1, 0xff]);
    Ok(())
}

#[test]
fn test_alpha_sources_over_l8() -> swblend::Result<()> {
    let mask = [255, 255];
    let source = [200, 200];
    let mut data = [0, 0];
    let dest = DestBuffer::packed(&mut data, 2, 1, ColorFormat::L8)?;
    let source = SourceBuffer::new(&source, 2, ColorFormat::L8);
    blend_image(
        &mut ImageDescriptor::new(dest, source)?
            .with_opacity(128)
            .with_mask(Mask::new(&mask, 2))?,
    );
    assert_eq!(data, [100, 100]);

    let source = common::encode(&[La::new(200, 128)]);
    let mut data = [0];
    let dest = DestBuffer::packed(&mut data, 1, 1, ColorFormat::L8)?;
    let source = SourceBuffer::new(&source, 2, ColorFormat::Al88);
    blend_image(&mut ImageDescriptor::new(dest, source)?);
    assert_eq!(data, [100]);

    Ok(())
}

#[test]
fn test_argb_accumulates_alpha() -> swblend::Result<()> {
    let source = common::encode(&[Rgba::new(255, 0, 0, 200)]);
    let mut data = common::encode(&[Rgba::new(0, 0, 0, 128)]);
    let dest = DestBuffer::packed(&mut data, 1, 1, ColorFormat::Argb8888)?;
    let source = SourceBuffer::new(&source, 4, ColorFormat::Argb8888);
    blend_image(&mut ImageDescriptor::new(dest, source)?);

    assert_eq!(common::decode::<Rgba>(&data, 1), [Rgba::new(224, 0, 0, 228)]);
    Ok(())
}

#[test]
fn test_blend_modes() -> swblend::Result<()> {
    let source = common::encode(&[Rgb::new(100, 100, 100)]);
    let mut data = common::encode(&[Rgb::new(100, 50, 200)]);
    let dest = DestBuffer::packed(&mut data, 1, 1, ColorFormat::Rgb888)?;
    let source = SourceBuffer::new(&source, 3, ColorFormat::Rgb888);
    blend_image(&mut ImageDescriptor::new(dest, source)?.with_mode(BlendMode::Additive));
    assert_eq!(common::decode::<Rgb>(&data, 1), [Rgb::new(200, 150, 255)]);

    let source = common::encode(&[Rgb::new(200, 100, 0)]);
    let mut data = common::encode(&[Rgb::new(100, 50, 255)]);
    let dest = DestBuffer::packed(&mut data, 1, 1, ColorFormat::Rgb888)?;
    let source = SourceBuffer::new(&source, 3, ColorFormat::Rgb888);
    blend_image(
        &mut ImageDescriptor::new(dest, source)?
            .with_mode(BlendMode::Multiply)
            .with_opacity(128),
    );
    assert_eq!(common::decode::<Rgb>(&data, 1), [Rgb::new(89, 35, 127)]);

    Ok(())
}

#[test]
fn test_source_offset() -> swblend::Result<()> {
    let source: Vec<u8> = (0..16).collect();
    let mut data = [0; 2];
    let dest = DestBuffer::packed(&mut data, 2, 1, ColorFormat::L8)?;
    let source = SourceBuffer::new(&source, 4, ColorFormat::L8).offset(1, 2)?;
    blend_image(&mut ImageDescriptor::new(dest, source)?);

    assert_eq!(data, [9, 10]);
    Ok(())
}

#[test]
fn test_short_source_is_rejected() -> swblend::Result<()> {
    let source = [0; 5];
    let mut data = [0; 6];
    let dest = DestBuffer::packed(&mut data, 3, 2, ColorFormat::L8)?;
    let source = SourceBuffer::new(&source, 3, ColorFormat::L8);

    assert!(matches!(
        ImageDescriptor::new(dest, source),
        Err(swblend::Error::IncompatibleBufferData { required: 6, received: 5, .. })
    ));
    Ok(())
}
