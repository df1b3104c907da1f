use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma, LumaA, Pixel, Rgb, Rgba};

use crate::format::FormatTag;
use crate::foundation::error::{PixelError, PixelResult};
use crate::pixels::buffer::{PixelBuffer, calculate_offset, calculate_size, level_size};

/// General-purpose area-aware resize of 8-bit-per-channel pixels.
pub trait Resampler: Send + Sync {
    /// Resize `src` (`src_width x src_height`) into `dst` (`dst_width x dst_height`).
    #[allow(clippy::too_many_arguments)]
    fn resize(
        &self,
        src: &[u8],
        src_width: u32,
        src_height: u32,
        dst: &mut [u8],
        dst_width: u32,
        dst_height: u32,
        channels: usize,
    ) -> PixelResult<()>;
}

/// [`Resampler`] backed by `image::imageops::resize`.
#[derive(Clone, Copy, Debug)]
pub struct ImageResampler {
    filter: FilterType,
}

impl ImageResampler {
    /// Resampler using `filter`.
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Default for ImageResampler {
    fn default() -> Self {
        Self::new(FilterType::Triangle)
    }
}

impl Resampler for ImageResampler {
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
        let (sw, sh, dw, dh) = (src_width, src_height, dst_width, dst_height);
        match channels {
            1 => resize_as::<Luma<u8>>(src, sw, sh, dst, dw, dh, self.filter),
            2 => resize_as::<LumaA<u8>>(src, sw, sh, dst, dw, dh, self.filter),
            3 => resize_as::<Rgb<u8>>(src, sw, sh, dst, dw, dh, self.filter),
            4 => resize_as::<Rgba<u8>>(src, sw, sh, dst, dw, dh, self.filter),
            n => Err(PixelError::invalid_argument(format!(
                "resampling supports 1 to 4 channels, got {n}"
            ))),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn resize_as<P: Pixel<Subpixel = u8> + 'static>(
    src: &[u8],
    src_width: u32,
    src_height: u32,
    dst: &mut [u8],
    dst_width: u32,
    dst_height: u32,
    filter: FilterType,
) -> PixelResult<()> {
    let img = ImageBuffer::<P, &[u8]>::from_raw(src_width, src_height, src).ok_or_else(|| {
        PixelError::invalid_argument(format!(
            "resample source of {} bytes does not hold {src_width}x{src_height}",
            src.len()
        ))
    })?;
    let resized = imageops::resize(&img, dst_width, dst_height, filter);
    let raw = resized.as_raw();
    if raw.len() != dst.len() {
        return Err(PixelError::invalid_argument(format!(
            "resample target holds {} bytes, expected {}",
            dst.len(),
            raw.len()
        )));
    }
    dst.copy_from_slice(raw);
    Ok(())
}

impl PixelBuffer {
    /// Resize level 0 to `target_width x target_height` with [`ImageResampler`] and build
    /// `target_levels` mip levels with a 2x2 box filter.
    pub fn scale(
        &self,
        target_width: u32,
        target_height: u32,
        target_levels: u32,
    ) -> PixelResult<PixelBuffer> {
        self.scale_with(
            &ImageResampler::default(),
            target_width,
            target_height,
            target_levels,
        )
    }

    /// [`PixelBuffer::scale`] with an explicit [`Resampler`].
    #[tracing::instrument(
        skip(self, resampler),
        fields(format = ?self.format(), width = self.width(), height = self.height())
    )]
    pub fn scale_with(
        &self,
        resampler: &dyn Resampler,
        target_width: u32,
        target_height: u32,
        target_levels: u32,
    ) -> PixelResult<PixelBuffer> {
        self.require_uncompressed("scaling")?;
        let desc = self.descriptor();
        if !desc.is_byte_per_channel() {
            return Err(PixelError::invalid_argument(format!(
                "scaling needs one byte per channel, got {:?}",
                self.format()
            )));
        }
        if target_width == 0 || target_height == 0 {
            return Err(PixelError::invalid_argument(format!(
                "scale target must be non-zero, got {target_width}x{target_height}"
            )));
        }

        let format = self.format();
        let size = calculate_size(target_width, target_height, target_levels, format)?;
        let mut out = vec![0u8; size];
        let base_len = level_size(target_width, target_height, 0, format);
        let src_len = level_size(self.width(), self.height(), 0, format);
        resampler.resize(
            &self.bytes()[..src_len],
            self.width(),
            self.height(),
            &mut out[..base_len],
            target_width,
            target_height,
            desc.bytes_per_pixel,
        )?;

        if target_levels > 1 {
            tracing::debug!(
                channels = desc.num_channels,
                bytes_per_pixel = desc.bytes_per_pixel,
                "creating mipmaps"
            );
            box_filter_chain(&mut out, target_width, target_height, target_levels, format);
        }
        PixelBuffer::from_bytes(
            format,
            target_width,
            target_height,
            target_levels,
            self.quality(),
            out,
        )
    }

    /// Build a `target_levels`-deep chain from this single-level RGBA buffer with a 2x2 box
    /// filter. Level 0 is copied unchanged.
    #[tracing::instrument(
        skip(self),
        fields(format = ?self.format(), width = self.width(), height = self.height())
    )]
    pub fn create_mipmaps(&self, target_levels: u32) -> PixelResult<PixelBuffer> {
        self.require_uncompressed("mipmap generation")?;
        if self.bytes_per_pixel() != 4 {
            return Err(PixelError::invalid_argument(format!(
                "mipmap generation needs 4 bytes per pixel, got {:?}",
                self.format()
            )));
        }
        if self.levels() != 1 {
            return Err(PixelError::invalid_argument(format!(
                "mipmap generation needs a single-level source, got {} levels",
                self.levels()
            )));
        }

        let (w, h, format) = (self.width(), self.height(), self.format());
        let size = calculate_size(w, h, target_levels, format)?;
        let mut out = vec![0u8; size];
        let base_len = level_size(w, h, 0, format);
        out[..base_len].copy_from_slice(&self.bytes()[..base_len]);
        box_filter_chain(&mut out, w, h, target_levels, format);
        PixelBuffer::from_bytes(format, w, h, target_levels, self.quality(), out)
    }
}

/// Fill levels `1..levels` of `data` from level 0.
///
/// Each texel is the truncated mean of the 2x2 block at `(2x, 2y)` of the previous level.
/// Working dimensions halve with floor, so an odd trailing row or column is dropped and levels
/// whose working size reaches 0 stay untouched.
fn box_filter_chain(data: &mut [u8], base_width: u32, base_height: u32, levels: u32, format: FormatTag) {
    let nch = format.bytes_per_pixel();
    let mut source_width = base_width as usize;
    let (mut target_width, mut target_height) = (source_width / 2, base_height as usize / 2);

    for level in 1..levels {
        let src_off = calculate_offset(base_width, base_height, level - 1, format);
        let dst_off = calculate_offset(base_width, base_height, level, format);
        let (head, tail) = data.split_at_mut(dst_off);
        let src = &head[src_off..];
        let stride = source_width * nch;

        for y in 0..target_height {
            for x in 0..target_width {
                let s = (2 * y * source_width + 2 * x) * nch;
                let t = (y * target_width + x) * nch;
                for c in 0..nch {
                    let sum = u16::from(src[s + c])
                        + u16::from(src[s + c + nch])
                        + u16::from(src[s + c + stride])
                        + u16::from(src[s + c + stride + nch]);
                    tail[t + c] = (sum / 4) as u8;
                }
            }
        }

        source_width = target_width;
        target_width /= 2;
        target_height /= 2;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/scale.rs"]
mod tests;
