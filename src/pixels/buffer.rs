use anyhow::Context;

use crate::format::{FormatDescriptor, FormatTag};
use crate::foundation::error::{PixelError, PixelResult};

/// Dimensions of mip `level`: each axis halves with floor and never drops below 1.
pub fn level_dims(width: u32, height: u32, level: u32) -> (u32, u32) {
    fn halve(d: u32, level: u32) -> u32 {
        d.checked_shr(level).unwrap_or(0).max(1)
    }
    (halve(width, level), halve(height, level))
}

/// Byte size of one mip level.
///
/// Block-compressed levels round each axis up to whole blocks, so partial edge blocks are
/// stored in full.
pub fn level_size(width: u32, height: u32, level: u32, format: FormatTag) -> usize {
    let (w, h) = level_dims(width, height, level);
    let desc = format.descriptor();
    if desc.compression.is_block() {
        let dim = desc.compression.block_dim();
        let cols = w.div_ceil(dim) as usize;
        let rows = h.div_ceil(dim) as usize;
        cols * rows * desc.compression.bytes_per_block()
    } else {
        (w as usize) * (h as usize) * desc.bytes_per_pixel
    }
}

/// Byte offset of mip `level` inside a chain whose base is `width x height`.
///
/// Level 0 starts at 0; `calculate_offset(w, h, n, f)` is the size of an `n`-level chain.
pub fn calculate_offset(width: u32, height: u32, level: u32, format: FormatTag) -> usize {
    (0..level)
        .map(|l| level_size(width, height, l, format))
        .sum()
}

/// Total byte size of a `levels`-deep mip chain. `levels` must be at least 1.
pub fn calculate_size(width: u32, height: u32, levels: u32, format: FormatTag) -> PixelResult<usize> {
    if levels == 0 {
        return Err(PixelError::invalid_argument(
            "a mip chain needs at least one level",
        ));
    }
    Ok(calculate_offset(width, height, levels, format))
}

/// Owned image storage in one internal format, possibly holding a full mip chain.
///
/// Levels are laid out back to back, level 0 first. Every transform allocates a new buffer; a
/// `PixelBuffer` is never modified after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    format: FormatTag,
    width: u32,
    height: u32,
    levels: u32,
    quality: i16,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a cleared buffer.
    ///
    /// Uncompressed storage is zeroed; block-compressed storage is filled with the codec's
    /// empty block.
    pub fn new(
        format: FormatTag,
        width: u32,
        height: u32,
        levels: u32,
        quality: i16,
    ) -> PixelResult<Self> {
        validate_shape(format, width, height)?;
        let size = calculate_size(width, height, levels, format)?;
        let compression = format.compression();
        tracing::debug!(?format, width, height, levels, size, "clearing pixel storage");
        let bytes = if compression.is_block() {
            compression
                .empty_block()
                .repeat(size / compression.bytes_per_block())
        } else {
            vec![0u8; size]
        };
        Ok(Self {
            format,
            width,
            height,
            levels,
            quality,
            bytes,
        })
    }

    /// Wrap already-decoded bytes; the length must match the chain size exactly.
    pub fn from_bytes(
        format: FormatTag,
        width: u32,
        height: u32,
        levels: u32,
        quality: i16,
        bytes: Vec<u8>,
    ) -> PixelResult<Self> {
        validate_shape(format, width, height)?;
        let size = calculate_size(width, height, levels, format)?;
        if bytes.len() != size {
            return Err(PixelError::invalid_argument(format!(
                "{format:?} {width}x{height} with {levels} level(s) needs {size} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self {
            format,
            width,
            height,
            levels,
            quality,
            bytes,
        })
    }

    /// Decode an encoded image (PNG, JPEG, ...) from memory into straight-alpha `Rgba8`.
    pub fn decode_rgba8(encoded: &[u8]) -> PixelResult<Self> {
        let dyn_img = image::load_from_memory(encoded).context("decode image from memory")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_bytes(FormatTag::Rgba8, width, height, 1, 0, rgba.into_raw())
    }

    /// The "no image" value: [`FormatTag::NoFormat`], zero dimensions, no storage.
    pub fn null() -> Self {
        Self {
            format: FormatTag::NoFormat,
            width: 0,
            height: 0,
            levels: 1,
            quality: 0,
            bytes: Vec::new(),
        }
    }

    /// Return `true` for the value produced by [`PixelBuffer::null`].
    pub fn is_null(&self) -> bool {
        self.format == FormatTag::NoFormat
    }

    /// Format tag.
    pub fn format(&self) -> FormatTag {
        self.format
    }

    /// Static traits of [`PixelBuffer::format`].
    pub fn descriptor(&self) -> &'static FormatDescriptor {
        self.format.descriptor()
    }

    /// Base level width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Base level height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of mip levels stored.
    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Encoder quality hint.
    pub fn quality(&self) -> i16 {
        self.quality
    }

    /// Whole chain storage.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Take ownership of the storage.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Dimensions of `level`.
    pub fn level_dims(&self, level: u32) -> (u32, u32) {
        level_dims(self.width, self.height, level)
    }

    /// Byte offset of `level` within [`PixelBuffer::bytes`].
    pub fn offset(&self, level: u32) -> usize {
        calculate_offset(self.width, self.height, level, self.format)
    }

    /// Bytes of a single level, or `None` past the end of the chain.
    pub fn level_bytes(&self, level: u32) -> Option<&[u8]> {
        if self.is_null() || level >= self.levels {
            return None;
        }
        let start = self.offset(level);
        let end = start + level_size(self.width, self.height, level, self.format);
        self.bytes.get(start..end)
    }

    /// Byte offset of texel `(x, y)` of `level` in an uncompressed buffer.
    pub fn texel_offset(&self, level: u32, x: u32, y: u32) -> usize {
        let (w, _) = self.level_dims(level);
        self.offset(level) + ((y as usize) * (w as usize) + (x as usize)) * self.bytes_per_pixel()
    }

    pub(crate) fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Reject null and block-compressed buffers for texel-level transforms.
    pub(crate) fn require_uncompressed(&self, op: &str) -> PixelResult<()> {
        if self.is_null() {
            return Err(PixelError::invalid_argument(format!(
                "{op} needs an image, got the null buffer"
            )));
        }
        if self.descriptor().compression.is_block() {
            return Err(PixelError::invalid_argument(format!(
                "{op} needs an uncompressed source, got {:?}",
                self.format
            )));
        }
        Ok(())
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::null()
    }
}

fn validate_shape(format: FormatTag, width: u32, height: u32) -> PixelResult<()> {
    if format == FormatTag::NoFormat {
        return Err(PixelError::invalid_argument(
            "NoFormat is reserved for the null buffer",
        ));
    }
    if width == 0 || height == 0 {
        return Err(PixelError::invalid_argument(format!(
            "image dimensions must be non-zero, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/buffer.rs"]
mod tests;
