use crate::format::FormatTag;
use crate::foundation::core::ChannelOrder;
use crate::foundation::error::{PixelError, PixelResult};
use crate::foundation::math::fetch_rgba;
use crate::pixels::buffer::{PixelBuffer, calculate_size};

/// Error-diffusion capability for 16-bit packed targets ([`FormatTag::Rgba4444`] and
/// [`FormatTag::Rgb565`]).
pub trait Ditherer: Send + Sync {
    /// Consume the whole uncompressed `source` and return a new buffer tagged `target`.
    fn apply(&self, source: &PixelBuffer, target: FormatTag) -> PixelResult<PixelBuffer>;
}

/// Floyd-Steinberg error diffusion (7/16, 3/16, 5/16, 1/16), one level at a time.
///
/// Output words are little-endian. `Rgba4444` nibbles follow the configured [`ChannelOrder`];
/// `Rgb565` is `r5 << 11 | g6 << 5 | b5`.
#[derive(Clone, Copy, Debug)]
pub struct FloydSteinberg {
    channel_order: ChannelOrder,
}

impl FloydSteinberg {
    /// Create a ditherer packing 4444 words in `channel_order`.
    pub fn new(channel_order: ChannelOrder) -> Self {
        Self { channel_order }
    }
}

impl Default for FloydSteinberg {
    fn default() -> Self {
        Self::new(ChannelOrder::platform_default())
    }
}

impl Ditherer for FloydSteinberg {
    fn apply(&self, source: &PixelBuffer, target: FormatTag) -> PixelResult<PixelBuffer> {
        source.require_uncompressed("dithering")?;
        let bits: [u32; 4] = match target {
            FormatTag::Rgba4444 => [4, 4, 4, 4],
            FormatTag::Rgb565 => [5, 6, 5, 0],
            other => {
                return Err(PixelError::invalid_argument(format!(
                    "dithering targets Rgba4444 or Rgb565, got {other:?}"
                )));
            }
        };

        let (width, height, levels) = (source.width(), source.height(), source.levels());
        let size = calculate_size(width, height, levels, target)?;
        let mut out = Vec::with_capacity(size);
        for level in 0..levels {
            self.diffuse_level(source, level, target, bits, &mut out);
        }
        PixelBuffer::from_bytes(target, width, height, levels, source.quality(), out)
    }
}

impl FloydSteinberg {
    fn diffuse_level(
        &self,
        source: &PixelBuffer,
        level: u32,
        target: FormatTag,
        bits: [u32; 4],
        out: &mut Vec<u8>,
    ) {
        let (w, h) = source.level_dims(level);
        let w = w as usize;
        let bpp = source.bytes_per_pixel();
        let src = source.bytes();

        // Error rows are padded by one texel on each side.
        let mut err_cur = vec![[0i32; 4]; w + 2];
        let mut err_next = vec![[0i32; 4]; w + 2];

        for y in 0..h {
            for x in 0..w {
                let off = source.texel_offset(level, x as u32, y);
                let px = fetch_rgba(&src[off..off + bpp]);
                let mut q = [0u8; 4];
                for c in 0..4 {
                    if bits[c] == 0 {
                        continue;
                    }
                    let max = (1i32 << bits[c]) - 1;
                    let v = (i32::from(px[c]) + err_cur[x + 1][c]).clamp(0, 255);
                    let level_q = (v * max + 127) / 255;
                    let recon = (level_q * 255 + max / 2) / max;
                    let e = v - recon;
                    err_cur[x + 2][c] += e * 7 / 16;
                    err_next[x][c] += e * 3 / 16;
                    err_next[x + 1][c] += e * 5 / 16;
                    err_next[x + 2][c] += e / 16;
                    q[c] = level_q as u8;
                }
                let word = match target {
                    FormatTag::Rgb565 => {
                        (u16::from(q[0]) << 11) | (u16::from(q[1]) << 5) | u16::from(q[2])
                    }
                    _ => self.channel_order.pack_4444(q[0], q[1], q[2], q[3]),
                };
                out.extend_from_slice(&word.to_le_bytes());
            }
            std::mem::swap(&mut err_cur, &mut err_next);
            err_next.iter_mut().for_each(|e| *e = [0; 4]);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/dither.rs"]
mod tests;
