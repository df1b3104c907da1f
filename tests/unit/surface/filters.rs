use super::*;

fn gray(values: &[u8]) -> Vec<u8> {
    values.iter().flat_map(|&v| [v; 4]).collect()
}

#[test]
fn kernel_pins_first_tap_and_truncates() {
    assert_eq!(gaussian_kernel(1.0), vec![1, 90, 1]);
    assert_eq!(gaussian_kernel(3.0), vec![1, 12, 54, 90, 54, 12, 1]);
    assert_eq!(gaussian_kernel(1.5), vec![1, 403, 2980, 403, 1]);
}

#[test]
fn kernel_is_empty_for_non_positive_radius() {
    assert!(gaussian_kernel(0.0).is_empty());
    assert!(gaussian_kernel(-2.0).is_empty());
    assert!(gaussian_kernel(f32::NAN).is_empty());
}

#[test]
fn kernel_is_empty_for_unrepresentable_radius() {
    assert!(gaussian_kernel(f32::INFINITY).is_empty());
    assert!(gaussian_kernel(f32::MAX).is_empty());
    assert!(gaussian_kernel(1.0e9).is_empty());
}

#[test]
fn kernel_for_radius_past_i32_square_range() {
    // ceil(50_000)^2 overflows i32; the taps still come out symmetric and bounded.
    let k = gaussian_kernel(50_000.0);
    assert_eq!(k.len(), 100_001);
    assert_eq!((k[0], k[100_000]), (1, 1));
    assert_eq!(k[1], k[99_999]);
    assert!(k.iter().all(|&w| (0..=MAX_WEIGHT).contains(&w)));
}

#[test]
fn kernel_weights_stay_finite_for_tiny_radius() {
    let k = gaussian_kernel(0.01);
    assert_eq!(k.len(), 3);
    assert_eq!(k[0], 1);
    assert!(k[1] > 1 && k[1] <= MAX_WEIGHT);
}

#[test]
fn zero_radii_leave_buffer_untouched() {
    let src: Vec<u8> = (0..4 * 3 * 4).map(|v| v as u8).collect();
    let mut buf = src.clone();
    gaussian_blur_rgba8_in_place(&mut buf, 4, 3, 0.0, 0.0).unwrap();
    assert_eq!(buf, src);
    gaussian_blur_rgba8_in_place(&mut buf, 4, 3, -1.0, -5.0).unwrap();
    assert_eq!(buf, src);
}

#[test]
fn uniform_image_is_unchanged_by_blur() {
    let src = [40u8, 80, 120, 200].repeat(9 * 7);
    let mut buf = src.clone();
    gaussian_blur_rgba8_in_place(&mut buf, 9, 7, 3.0, 2.0).unwrap();
    assert_eq!(buf, src);
}

#[test]
fn horizontal_impulse_keeps_trailing_margin() {
    // Kernel [1, 90, 1] (total 92). Windows start at 0 and 1 only, writing texels 1 and 2.
    let mut buf = gray(&[0, 0, 0, 92, 0]);
    gaussian_blur_rgba8_in_place(&mut buf, 5, 1, 1.0, 0.0).unwrap();
    assert_eq!(buf, gray(&[0, 0, 1, 92, 0]));
}

#[test]
fn vertical_impulse_keeps_trailing_margin() {
    let mut buf = gray(&[0, 0, 0, 92, 0]);
    gaussian_blur_rgba8_in_place(&mut buf, 1, 5, 0.0, 1.0).unwrap();
    assert_eq!(buf, gray(&[0, 0, 1, 92, 0]));
}

#[test]
fn vertical_pass_starts_from_horizontal_result() {
    let (w, h) = (5usize, 5usize);
    let mut values = vec![0u8; w * h];
    values[3 * w + 3] = 92;
    let mut buf = gray(&values);
    gaussian_blur_rgba8_in_place(&mut buf, 5, 5, 1.0, 1.0).unwrap();

    let mut expected = vec![0u8; w * h];
    expected[3 * w + 3] = 92;
    expected[3 * w + 2] = 1;
    expected[2 * w + 3] = 1;
    assert_eq!(buf, gray(&expected));
}

#[test]
fn short_lines_are_not_filtered() {
    // A 3-tap window never fits in a 3-texel row.
    let src = gray(&[10, 200, 30]);
    let mut buf = src.clone();
    gaussian_blur_rgba8_in_place(&mut buf, 3, 1, 1.0, 0.0).unwrap();
    assert_eq!(buf, src);
}

#[test]
fn huge_radius_blur_is_a_no_op() {
    let src: Vec<u8> = (0..8 * 8 * 4).map(|v| (v * 7) as u8).collect();
    let mut buf = src.clone();
    gaussian_blur_rgba8_in_place(&mut buf, 8, 8, 50_000.0, 0.0).unwrap();
    assert_eq!(buf, src);
    gaussian_blur_rgba8_in_place(&mut buf, 8, 8, 50_000.0, 50_000.0).unwrap();
    assert_eq!(buf, src);
    gaussian_blur_rgba8_in_place(&mut buf, 8, 8, f32::INFINITY, f32::MAX).unwrap();
    assert_eq!(buf, src);
}

#[test]
fn kernel_wider_than_axis_leaves_buffer_unchanged() {
    let src: Vec<u8> = (0..4 * 3 * 4).map(|v| (v * 13 + 5) as u8).collect();
    // Radius 2 gives 5 taps, radius 1.5 gives 5 taps: neither fits a 4x3 image.
    for (h, v) in [(2.0, 2.0), (1.5, 1.5), (2.0, 0.0), (0.0, 1.5), (1.5, 1.0)] {
        let mut buf = src.clone();
        gaussian_blur_rgba8_in_place(&mut buf, 4, 3, h, v).unwrap();
        assert_eq!(buf, src, "radii ({h}, {v})");
    }
    // Exactly as wide as the axis still never fits a window.
    let row = gray(&[10, 200, 30, 90, 250]);
    let mut buf = row.clone();
    gaussian_blur_rgba8_in_place(&mut buf, 5, 1, 2.0, 0.0).unwrap();
    assert_eq!(buf, row);
}

#[test]
fn blur_rejects_mismatched_length() {
    let mut buf = vec![0u8; 10];
    let err = gaussian_blur_rgba8_in_place(&mut buf, 2, 2, 1.0, 1.0).unwrap_err();
    assert!(matches!(err, PixelError::InvalidArgument(_)));
}

#[test]
fn color_fill_scales_by_destination_alpha() {
    let mut buf = vec![
        9, 9, 9, 0, //
        0, 0, 0, 255, //
        50, 60, 70, 128,
    ];
    color_fill_rgba8_in_place(&mut buf, Color::new(1.0, 0.0, 0.0, 0.5));
    assert_eq!(
        buf,
        vec![
            0, 0, 0, 0, //
            127, 0, 0, 127, //
            63, 0, 0, 63,
        ]
    );
}

#[test]
fn color_fill_on_transparent_buffer_is_zero() {
    let mut buf = vec![0u8; 4 * 6];
    color_fill_rgba8_in_place(&mut buf, Color::new(0.2, 0.9, 1.0, 1.0));
    assert!(buf.iter().all(|&v| v == 0));
}

#[test]
fn unpremultiply_uses_truncating_division() {
    let out = unpremultiply_rgba8(&[
        64, 0, 0, 128, //
        128, 0, 0, 255, //
        5, 6, 7, 0,
    ]);
    assert_eq!(
        out,
        vec![
            127, 0, 0, 128, //
            128, 0, 0, 255, //
            0, 0, 0, 0,
        ]
    );
}

#[test]
fn unpremultiply_does_not_clamp() {
    // 255 * 200 / 100 = 510, which wraps to 254.
    assert_eq!(unpremultiply_rgba8(&[200, 0, 0, 100]), vec![254, 0, 0, 100]);
}
