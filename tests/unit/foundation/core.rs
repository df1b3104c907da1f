use super::*;

#[test]
fn color_premultiplies_before_quantizing() {
    let c = Color::new(1.0, 0.5, 0.0, 0.5);
    // 1.0 * 0.5 * 255 = 127.5 -> 127; 0.5 * 0.5 * 255 = 63.75 -> 63.
    assert_eq!(c.to_premul_rgba8(), [127, 63, 0, 127]);
    assert_eq!(Color::transparent().to_premul_rgba8(), [0, 0, 0, 0]);
}

#[test]
fn color_out_of_range_channels_clamp() {
    let c = Color::new(2.0, -1.0, 0.25, 1.0);
    assert_eq!(c.to_premul_rgba8(), [255, 0, 63, 255]);
}

#[test]
fn pack_4444_orders_nibbles() {
    assert_eq!(ChannelOrder::Rgba.pack_4444(0x1, 0x2, 0x3, 0x4), 0x1234);
    assert_eq!(ChannelOrder::Bgra.pack_4444(0x1, 0x2, 0x3, 0x4), 0x3214);
}

#[test]
fn platform_default_matches_target() {
    let expected = if cfg!(any(
        target_os = "macos",
        target_os = "ios",
        target_os = "android"
    )) {
        ChannelOrder::Rgba
    } else {
        ChannelOrder::Bgra
    };
    assert_eq!(ChannelOrder::default(), expected);
}

#[cfg(any(target_os = "linux", target_os = "windows"))]
#[test]
fn desktop_targets_default_to_bgra() {
    assert_eq!(ChannelOrder::platform_default(), ChannelOrder::Bgra);
    assert_eq!(
        ChannelOrder::platform_default().pack_4444(0xf, 0, 0, 0xf),
        0x00ff
    );
}

#[test]
fn filter_mode_defaults_to_linear() {
    assert_eq!(FilterMode::default(), FilterMode::Linear);
}
