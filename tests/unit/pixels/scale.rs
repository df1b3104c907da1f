use super::*;

/// Nearest-neighbour stand-in so box-filter results are exact.
struct Nearest;

impl Resampler for Nearest {
    fn resize(
        &self,
        src: &[u8],
        src_width: u32,
        src_height: u32,
        dst: &mut [u8],
        dst_width: u32,
        dst_height: u32,
        channels: usize,
    ) -> PixelResult<()> {
        for y in 0..dst_height as usize {
            let sy = y * src_height as usize / dst_height as usize;
            for x in 0..dst_width as usize {
                let sx = x * src_width as usize / dst_width as usize;
                let s = (sy * src_width as usize + sx) * channels;
                let d = (y * dst_width as usize + x) * channels;
                dst[d..d + channels].copy_from_slice(&src[s..s + channels]);
            }
        }
        Ok(())
    }
}

fn uniform(format: FormatTag, w: u32, h: u32, px: &[u8]) -> PixelBuffer {
    let bytes = px.repeat((w * h) as usize);
    PixelBuffer::from_bytes(format, w, h, 1, 0, bytes).unwrap()
}

#[test]
fn uniform_image_scales_to_uniform_chain() {
    let src = uniform(FormatTag::Rgba8, 8, 8, &[200, 100, 50, 255]);
    let out = src.scale(4, 4, 3).unwrap();
    assert_eq!((out.width(), out.height(), out.levels()), (4, 4, 3));
    assert_eq!(out.bytes().len(), 64 + 16 + 4);
    for px in out.bytes().chunks_exact(4) {
        for (got, want) in px.iter().zip([200u8, 100, 50, 255]) {
            assert!(got.abs_diff(want) <= 1, "{px:?}");
        }
    }
}

#[test]
fn single_channel_buffers_scale_too() {
    let src = uniform(FormatTag::R8, 6, 3, &[90]);
    let out = src.scale(3, 2, 1).unwrap();
    assert_eq!(out.format(), FormatTag::R8);
    assert!(out.bytes().iter().all(|&v| v.abs_diff(90) <= 1));
}

#[test]
fn box_filter_truncates_the_mean() {
    // 2x2 RGBA: red channel 1, 2, 3, 5 averages to 11 / 4 = 2.
    let bytes = vec![
        1, 0, 0, 255, 2, 0, 0, 255, //
        3, 0, 0, 255, 5, 0, 0, 254,
    ];
    let src = PixelBuffer::from_bytes(FormatTag::Rgba8, 2, 2, 1, 0, bytes).unwrap();
    let out = src.scale_with(&Nearest, 2, 2, 2).unwrap();
    assert_eq!(out.level_bytes(0).unwrap(), src.bytes());
    assert_eq!(out.level_bytes(1).unwrap(), &[2, 0, 0, 254]);
}

#[test]
fn odd_trailing_column_is_dropped() {
    // 3x2 RGB: the third column never contributes to level 1.
    let bytes = vec![
        10, 10, 10, 20, 20, 20, 250, 250, 250, //
        30, 30, 30, 40, 40, 40, 250, 250, 250,
    ];
    let src = PixelBuffer::from_bytes(FormatTag::Rgb8, 3, 2, 1, 0, bytes).unwrap();
    let out = src.scale_with(&Nearest, 3, 2, 2).unwrap();
    assert_eq!(out.level_bytes(1).unwrap(), &[25, 25, 25]);
}

#[test]
fn collapsed_levels_stay_zero() {
    // 4x1 halves to a working height of 0, so level 1 is never written.
    let src = uniform(FormatTag::Rgba8, 4, 1, &[9, 9, 9, 9]);
    let out = src.scale_with(&Nearest, 4, 1, 2).unwrap();
    assert_eq!(out.level_dims(1), (2, 1));
    assert_eq!(out.level_bytes(1).unwrap(), &[0; 8]);
}

#[test]
fn scale_preconditions() {
    let packed = PixelBuffer::new(FormatTag::Rgb565, 4, 4, 1, 0).unwrap();
    assert!(matches!(
        packed.scale(2, 2, 1),
        Err(PixelError::InvalidArgument(_))
    ));

    let etc = PixelBuffer::new(FormatTag::Rgb8Etc1, 4, 4, 1, 0).unwrap();
    assert!(etc.scale(2, 2, 1).is_err());

    let rgba = uniform(FormatTag::Rgba8, 4, 4, &[1, 2, 3, 4]);
    assert!(rgba.scale(0, 2, 1).is_err());
    assert!(rgba.scale(2, 2, 0).is_err());
}

#[test]
fn create_mipmaps_keeps_level_zero() {
    let mut bytes = Vec::new();
    for y in 0..4u8 {
        for x in 0..4u8 {
            bytes.extend_from_slice(&[x * 16, y * 16, 0, 255]);
        }
    }
    let src = PixelBuffer::from_bytes(FormatTag::Rgba8, 4, 4, 1, 7, bytes).unwrap();
    let out = src.create_mipmaps(3).unwrap();
    assert_eq!(out.levels(), 3);
    assert_eq!(out.quality(), 7);
    assert_eq!(out.level_bytes(0).unwrap(), src.bytes());
    // Top-left 2x2: x in {0, 16}, y in {0, 16}.
    assert_eq!(&out.level_bytes(1).unwrap()[..4], &[8, 8, 0, 255]);
    // Level 2 averages level 1: x means 8 and 40, y means 8 and 40.
    assert_eq!(out.level_bytes(2).unwrap(), &[24, 24, 0, 255]);
}

#[test]
fn create_mipmaps_preconditions() {
    let rgb = uniform(FormatTag::Rgb8, 4, 4, &[1, 2, 3]);
    assert!(matches!(
        rgb.create_mipmaps(2),
        Err(PixelError::InvalidArgument(_))
    ));

    let chain = PixelBuffer::new(FormatTag::Rgba8, 4, 4, 2, 0).unwrap();
    assert!(chain.create_mipmaps(3).is_err());
}
