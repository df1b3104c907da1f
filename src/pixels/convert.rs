use crate::config::PipelineConfig;
use crate::format::{Compression, FormatTag};
use crate::foundation::core::ChannelOrder;
use crate::foundation::error::{PixelError, PixelResult};
use crate::foundation::math::{avg3, fetch_rgba};
use crate::pixels::buffer::{PixelBuffer, calculate_size};
use crate::pixels::dither::{Ditherer, FloydSteinberg};
use crate::pixels::encoder::{BlockEncoder, PreparedEncoder};

enum Dithering {
    BuiltIn,
    Custom(Box<dyn Ditherer>),
    Off,
}

/// Converts uncompressed buffers into other internal formats.
///
/// Targets are dispatched in priority order:
///
/// 1. block-compressed formats, via the installed [`BlockEncoder`];
/// 2. one byte holding two channels ([`FormatTag::La44`]);
/// 3. one channel ([`FormatTag::R8`]);
/// 4. 16-bit RGB/RGBA ([`FormatTag::Rgb565`], [`FormatTag::Rgba4444`]), via the ditherer;
/// 5. remaining 16-bit targets, packed directly.
///
/// Anything else is rejected with [`PixelError::InvalidArgument`].
pub struct Converter {
    encoder: Option<PreparedEncoder>,
    dithering: Dithering,
    channel_order: ChannelOrder,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

impl Converter {
    /// Converter with the built-in ditherer, no block encoder, and the platform channel order.
    pub fn new() -> Self {
        Self {
            encoder: None,
            dithering: Dithering::BuiltIn,
            channel_order: ChannelOrder::platform_default(),
        }
    }

    /// Converter configured from [`PipelineConfig`].
    pub fn from_config(cfg: &PipelineConfig) -> Self {
        let conv = Self::new().with_channel_order(cfg.channel_order);
        if cfg.dither {
            conv
        } else {
            conv.without_dithering()
        }
    }

    /// Install the block codec used for compressed targets.
    pub fn with_block_encoder(mut self, encoder: impl BlockEncoder + 'static) -> Self {
        self.encoder = Some(PreparedEncoder::new(Box::new(encoder)));
        self
    }

    /// Replace the built-in ditherer.
    pub fn with_ditherer(mut self, ditherer: impl Ditherer + 'static) -> Self {
        self.dithering = Dithering::Custom(Box::new(ditherer));
        self
    }

    /// Pack 4444 targets directly and reject 565 targets.
    pub fn without_dithering(mut self) -> Self {
        self.dithering = Dithering::Off;
        self
    }

    /// Set the nibble order for 4444 output (direct packing and the built-in ditherer).
    pub fn with_channel_order(mut self, order: ChannelOrder) -> Self {
        self.channel_order = order;
        self
    }

    /// Nibble order for 4444 output.
    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    /// Convert `source` into `target`, returning a new buffer.
    #[tracing::instrument(
        skip(self, source),
        fields(
            source_format = ?source.format(),
            width = source.width(),
            height = source.height(),
            levels = source.levels(),
        )
    )]
    pub fn convert(&self, source: &PixelBuffer, target: FormatTag) -> PixelResult<PixelBuffer> {
        source.require_uncompressed("conversion")?;
        if target == FormatTag::NoFormat {
            return Err(PixelError::invalid_argument(
                "cannot convert to NoFormat",
            ));
        }

        let dst = target.descriptor();
        if dst.compression.is_block() {
            return self.encode_blocks(source, target);
        }
        if dst.num_channels == 2 && dst.bytes_per_pixel == 1 {
            return pack_luminance_alpha_nibbles(source, target);
        }
        if dst.num_channels == 1 {
            return average_to_single_channel(source, target);
        }
        if dst.bytes_per_pixel == 2 && matches!(dst.num_channels, 3 | 4) {
            match &self.dithering {
                Dithering::BuiltIn => {
                    return checked_dither(
                        &FloydSteinberg::new(self.channel_order),
                        source,
                        target,
                    );
                }
                Dithering::Custom(d) => return checked_dither(d.as_ref(), source, target),
                Dithering::Off => {}
            }
        }
        if dst.bytes_per_pixel == 2 {
            return match dst.num_channels {
                2 => pack_luminance_alpha_words(source, target),
                4 => pack_nibbles(source, target, self.channel_order),
                n => Err(PixelError::invalid_argument(format!(
                    "{target:?} ({n} channels, 16-bit) needs a ditherer"
                ))),
            };
        }
        Err(PixelError::invalid_argument(format!(
            "no conversion from {:?} to {target:?}",
            source.format()
        )))
    }

    fn encode_blocks(&self, source: &PixelBuffer, target: FormatTag) -> PixelResult<PixelBuffer> {
        let compression = target.compression();
        let encoder = self.encoder.as_ref().ok_or_else(|| {
            PixelError::config(format!("no block encoder installed for {compression:?}"))
        })?;
        let (width, height, levels) = (source.width(), source.height(), source.levels());
        if !width.is_multiple_of(4) || !height.is_multiple_of(4) {
            return Err(PixelError::invalid_argument(format!(
                "block compression needs dimensions divisible by 4, got {width}x{height}"
            )));
        }

        let size = calculate_size(width, height, levels, target)?;
        let block_len = compression.bytes_per_block();
        let mut out = vec![0u8; size];
        encoder.ensure_prepared(compression)?;

        let bpp = source.bytes_per_pixel();
        let src = source.bytes();
        let mut scratch = [0u8; 64];
        let input = &mut scratch[..compression.input_block_len()];
        let mut target_offset = 0usize;

        for level in 0..levels {
            let (lw, lh) = source.level_dims(level);
            let (rows, cols) = (lh.div_ceil(4), lw.div_ceil(4));
            for row in 0..rows {
                for col in 0..cols {
                    for y in 0..4u32 {
                        for x in 0..4u32 {
                            // Only deep levels can be narrower than a block.
                            let sx = (col * 4 + x).min(lw - 1);
                            let sy = (row * 4 + y).min(lh - 1);
                            let off = source.texel_offset(level, sx, sy);
                            let [r, g, b, a] = fetch_rgba(&src[off..off + bpp]);
                            let t = (y * 4 + x) as usize;
                            match compression {
                                Compression::Etc1 => {
                                    input[t * 4..t * 4 + 4].copy_from_slice(&[r, g, b, 255]);
                                }
                                Compression::Dxt1 => {
                                    input[t * 4..t * 4 + 4].copy_from_slice(&[b, g, r, 255]);
                                }
                                Compression::Rgtc1 => input[t] = r,
                                Compression::Rgtc2 => {
                                    input[t] = r;
                                    input[t + 16] = a;
                                }
                                Compression::None => {}
                            }
                        }
                    }
                    encoder.encode(
                        compression,
                        input,
                        source.quality(),
                        &mut out[target_offset..target_offset + block_len],
                    )?;
                    target_offset += block_len;
                }
            }
        }
        debug_assert_eq!(target_offset, size);

        PixelBuffer::from_bytes(target, width, height, levels, source.quality(), out)
    }
}

fn checked_dither(
    ditherer: &dyn Ditherer,
    source: &PixelBuffer,
    target: FormatTag,
) -> PixelResult<PixelBuffer> {
    let out = ditherer.apply(source, target)?;
    if out.format() != target {
        return Err(PixelError::Other(anyhow::anyhow!(
            "ditherer returned {:?} for a {target:?} request",
            out.format()
        )));
    }
    Ok(out)
}

fn require_single_level(source: &PixelBuffer, target: FormatTag) -> PixelResult<()> {
    if source.levels() != 1 {
        return Err(PixelError::invalid_argument(format!(
            "conversion to {target:?} takes a single level, got {}",
            source.levels()
        )));
    }
    Ok(())
}

/// Map every source texel of every level through `f`.
fn map_texels<const N: usize>(
    source: &PixelBuffer,
    target: FormatTag,
    f: impl Fn([u8; 4]) -> [u8; N],
) -> PixelResult<PixelBuffer> {
    let bpp = source.bytes_per_pixel();
    let mut out = Vec::with_capacity(source.bytes().len() / bpp * N);
    for px in source.bytes().chunks_exact(bpp) {
        out.extend_from_slice(&f(fetch_rgba(px)));
    }
    PixelBuffer::from_bytes(
        target,
        source.width(),
        source.height(),
        source.levels(),
        source.quality(),
        out,
    )
}

fn pack_luminance_alpha_nibbles(
    source: &PixelBuffer,
    target: FormatTag,
) -> PixelResult<PixelBuffer> {
    require_single_level(source, target)?;
    map_texels(source, target, |[r, g, b, a]| {
        let lum = (avg3(r, g, b) >> 4).min(15);
        [((a >> 4) << 4) | lum]
    })
}

fn average_to_single_channel(source: &PixelBuffer, target: FormatTag) -> PixelResult<PixelBuffer> {
    require_single_level(source, target)?;
    map_texels(source, target, |[r, g, b, _]| [avg3(r, g, b)])
}

fn pack_luminance_alpha_words(
    source: &PixelBuffer,
    target: FormatTag,
) -> PixelResult<PixelBuffer> {
    map_texels(source, target, |[r, g, b, a]| {
        let lum = u16::from(avg3(r, g, b)).min(255);
        ((u16::from(a) << 8) | lum).to_le_bytes()
    })
}

fn pack_nibbles(
    source: &PixelBuffer,
    target: FormatTag,
    order: ChannelOrder,
) -> PixelResult<PixelBuffer> {
    map_texels(source, target, |[r, g, b, a]| {
        order.pack_4444(r >> 4, g >> 4, b >> 4, a >> 4).to_le_bytes()
    })
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/convert.rs"]
mod tests;
