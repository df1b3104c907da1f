/// `x * y / 255` with truncating division, as used by coverage scaling.
pub(crate) fn mul_div255_trunc(x: u8, y: u8) -> u8 {
    ((u32::from(x) * u32::from(y)) / 255) as u8
}

/// Map a unit float to a byte: `trunc(v * 255)` clamped to `0..=255`. NaN maps to 0.
pub(crate) fn unit_to_byte(v: f32) -> u8 {
    let a = (v * 255.0) as i32;
    a.clamp(0, 255) as u8
}

/// Truncating integer mean of three channels.
pub(crate) fn avg3(r: u8, g: u8, b: u8) -> u8 {
    ((u16::from(r) + u16::from(g) + u16::from(b)) / 3) as u8
}

/// Undo alpha premultiplication for one channel: `255 * c / a`, truncated to a byte.
///
/// No clamping: a channel larger than its alpha wraps. Callers handle `a == 0`.
pub(crate) fn unpremul_channel(c: u8, a: u8) -> u8 {
    debug_assert!(a > 0);
    (255 * u32::from(c) / u32::from(a)) as u8
}

/// Read a pixel's RGBA channels from `px`, substituting missing channels:
/// green from red, blue from green, alpha fully opaque.
pub(crate) fn fetch_rgba(px: &[u8]) -> [u8; 4] {
    let r = px[0];
    let g = if px.len() >= 2 { px[1] } else { r };
    let b = if px.len() >= 3 { px[2] } else { g };
    let a = if px.len() >= 4 { px[3] } else { 0xff };
    [r, g, b, a]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
