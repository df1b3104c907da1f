use crate::foundation::core::Color;
use crate::foundation::error::{PixelError, PixelResult};
use crate::foundation::math::{mul_div255_trunc, unpremul_channel};

/// Upper bound for a single kernel weight.
const MAX_WEIGHT: i64 = 1 << 40;

/// Largest radius [`gaussian_kernel`] builds taps for; `f32` stops resolving integer offsets
/// beyond it.
const MAX_RADIUS: f32 = (1u32 << 24) as f32;

/// Discrete 1-D Gaussian kernel for `radius`, with `2 * ceil(radius) + 1` taps.
///
/// With `sigma = radius / 3` and `g(x) = exp(-x^2 / (2 sigma^2)) / sqrt(2 pi sigma)`, tap 0
/// (offset `-r`) is pinned to 1 and the tap at offset `k` is `trunc(g(k) / g(-r))`, computed in
/// `f32`. Weights are clamped to a finite maximum. Returns an empty kernel for non-positive,
/// non-finite, or larger-than-`2^24` radii.
pub fn gaussian_kernel(radius: f32) -> Vec<i64> {
    if !radius.is_finite() || radius <= 0.0 || radius > MAX_RADIUS {
        return Vec::new();
    }
    let r = radius.ceil() as i64;
    let sigma = radius / 3.0;
    let sigma22 = 2.0 * sigma * sigma;
    let sqrt_sigma_pi2 = (2.0 * std::f32::consts::PI * sigma).sqrt();
    let gauss = |x: i64| (-((x * x) as f32) / sigma22).exp() / sqrt_sigma_pi2;

    let first = gauss(-r);
    let mut kernel = Vec::with_capacity(kernel_len(radius));
    kernel.push(1);
    for k in (-r + 1)..=r {
        let ratio = if first > 0.0 {
            gauss(k) / first
        } else {
            // g(-r) underflowed; the same ratio without the shared factor.
            (((r * r - k * k) as f32) / sigma22).exp()
        };
        kernel.push((ratio as i64).clamp(0, MAX_WEIGHT));
    }
    kernel
}

/// Tap count `2 * ceil(radius) + 1` for a positive finite radius; the cast saturates.
fn kernel_len(radius: f32) -> usize {
    (2.0 * f64::from(radius).ceil() + 1.0) as usize
}

/// Whether a pass with `radius` writes anything on a line of `len` texels.
fn window_fits(radius: f32, len: usize) -> bool {
    radius > 0.0 && radius.is_finite() && kernel_len(radius) < len
}

/// Separable Gaussian blur of a premultiplied RGBA8 buffer, in place.
///
/// The horizontal pass runs first, then the vertical pass; an axis with a non-positive radius is
/// copied through, as is an axis whose `2 * ceil(radius) + 1` taps do not fit inside
/// the line. A window is only evaluated while it fits entirely inside the row (or column),
/// and its result lands on the window's middle tap. Positions a pass never writes keep the value
/// they held before that pass, so the trailing `size / 2 + 1` texels of each filtered axis (and
/// the leading `size / 2`) are untouched by it.
pub fn gaussian_blur_rgba8_in_place(
    buf: &mut [u8],
    width: u32,
    height: u32,
    hradius: f32,
    vradius: f32,
) -> PixelResult<()> {
    let expected_len = rgba8_len(width, height)?;
    if buf.len() != expected_len {
        return Err(PixelError::invalid_argument(format!(
            "blur expects {expected_len} bytes for {width}x{height}, got {}",
            buf.len()
        )));
    }
    let (w, h) = (width as usize, height as usize);
    // A kernel as wide as the line never fits a window, so that pass writes nothing.
    let (blur_h, blur_v) = (window_fits(hradius, w), window_fits(vradius, h));
    if !blur_h && !blur_v {
        return Ok(());
    }

    let mut tmp = buf.to_vec();
    if blur_h {
        let kernel = gaussian_kernel(hradius);
        for row in 0..h {
            convolve_line(buf, &mut tmp, row * w * 4, 4, w, &kernel);
        }
    }

    buf.copy_from_slice(&tmp);
    if blur_v {
        let kernel = gaussian_kernel(vradius);
        for col in 0..w {
            convolve_line(&tmp, buf, col * 4, w * 4, h, &kernel);
        }
    }
    Ok(())
}

/// Convolve one line of `len` RGBA texels starting at `start` with texel stride `step`.
fn convolve_line(src: &[u8], dst: &mut [u8], start: usize, step: usize, len: usize, k: &[i64]) {
    let size = k.len();
    let total: i64 = k.iter().sum();
    if total == 0 {
        return;
    }
    let mut pos = 0;
    while pos + size < len {
        let mut acc = [0i64; 4];
        for (i, &kw) in k.iter().enumerate() {
            let idx = start + (pos + i) * step;
            for c in 0..4 {
                acc[c] += i64::from(src[idx + c]) * kw;
            }
        }
        let out = start + (pos + size / 2) * step;
        for c in 0..4 {
            dst[out + c] = (acc[c] / total) as u8;
        }
        pos += 1;
    }
}

/// Tint premultiplied RGBA8 pixels with `color` inside their existing coverage.
///
/// Every channel becomes `dest_alpha * premul(color)[c] / 255`, truncating.
pub fn color_fill_rgba8_in_place(buf: &mut [u8], color: Color) {
    let fill = color.to_premul_rgba8();
    for px in buf.chunks_exact_mut(4) {
        let dest_alpha = px[3];
        for (dst, src) in px.iter_mut().zip(fill) {
            *dst = mul_div255_trunc(dest_alpha, src);
        }
    }
}

/// Straight-alpha copy of a premultiplied RGBA8 buffer.
///
/// Colour channels become `255 * c / a` (not clamped) and are zeroed where alpha is 0; alpha is
/// copied unchanged.
pub fn unpremultiply_rgba8(buf: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(buf.len());
    for px in buf.chunks_exact(4) {
        let a = px[3];
        if a == 0 {
            out.extend_from_slice(&[0, 0, 0, 0]);
        } else {
            out.extend_from_slice(&[
                unpremul_channel(px[0], a),
                unpremul_channel(px[1], a),
                unpremul_channel(px[2], a),
                a,
            ]);
        }
    }
    out
}

pub(crate) fn rgba8_len(width: u32, height: u32) -> PixelResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| PixelError::invalid_argument("RGBA8 buffer size overflow"))
}

#[cfg(test)]
#[path = "../../tests/unit/surface/filters.rs"]
mod tests;
