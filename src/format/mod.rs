//! Static description of every internal pixel format.
//!
//! Each [`FormatTag`] maps to exactly one immutable [`FormatDescriptor`]; the table is looked up
//! by value and never mutated.

/// Block codec family of a format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Compression {
    /// Uncompressed, addressable per texel.
    None,
    /// Ericsson texture compression, RGB.
    Etc1,
    /// S3TC / BC1, RGB.
    Dxt1,
    /// Single-channel red texture compression (BC4).
    Rgtc1,
    /// Two-channel red/green texture compression (BC5).
    Rgtc2,
}

impl Compression {
    /// Every block codec, in a stable order.
    pub const BLOCK_CODECS: [Compression; 4] = [
        Compression::Etc1,
        Compression::Dxt1,
        Compression::Rgtc1,
        Compression::Rgtc2,
    ];

    /// Return `true` for block-compressed formats.
    pub fn is_block(self) -> bool {
        self != Compression::None
    }

    /// Texel edge length of one block (0 for uncompressed data).
    pub fn block_dim(self) -> u32 {
        match self {
            Compression::None => 0,
            Compression::Etc1 | Compression::Dxt1 | Compression::Rgtc1 | Compression::Rgtc2 => 4,
        }
    }

    /// Encoded size of one block in bytes (0 for uncompressed data).
    pub fn bytes_per_block(self) -> usize {
        match self {
            Compression::None => 0,
            Compression::Etc1 | Compression::Dxt1 | Compression::Rgtc1 => 8,
            Compression::Rgtc2 => 16,
        }
    }

    /// Size of the raw texel block handed to an encoder.
    ///
    /// ETC1/DXT1 take 16 four-byte texels, RGTC1 16 red bytes, RGTC2 16 red then 16 alpha bytes.
    pub fn input_block_len(self) -> usize {
        match self {
            Compression::None => 0,
            Compression::Etc1 | Compression::Dxt1 => 64,
            Compression::Rgtc1 => 16,
            Compression::Rgtc2 => 32,
        }
    }

    /// Bytes of one cleared ("empty") encoded block.
    pub(crate) fn empty_block(self) -> &'static [u8] {
        const ETC1: [u8; 8] = [0, 0, 0, 0, 0xff, 0xff, 0xff, 0xff];
        const DXT1: [u8; 8] = [0, 0, 0, 0, 0xaa, 0xaa, 0xaa, 0xaa];
        const RGTC1: [u8; 8] = [3, 0, 0, 0, 0, 0, 0, 0];
        const RGTC2: [u8; 16] = [3, 0, 0, 0, 0, 0, 0, 0, 3, 0, 0, 0, 0, 0, 0, 0];
        match self {
            Compression::None => &[],
            Compression::Etc1 => &ETC1,
            Compression::Dxt1 => &DXT1,
            Compression::Rgtc1 => &RGTC1,
            Compression::Rgtc2 => &RGTC2,
        }
    }

    pub(crate) fn index(self) -> Option<usize> {
        Self::BLOCK_CODECS.iter().position(|c| *c == self)
    }
}

/// Static traits of one internal format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatDescriptor {
    /// Bytes per texel; 0 for block-compressed formats.
    pub bytes_per_pixel: usize,
    /// Logical channel count.
    pub num_channels: u8,
    /// Block codec, if any.
    pub compression: Compression,
}

impl FormatDescriptor {
    const fn plain(bytes_per_pixel: usize, num_channels: u8) -> Self {
        Self {
            bytes_per_pixel,
            num_channels,
            compression: Compression::None,
        }
    }

    const fn block(num_channels: u8, compression: Compression) -> Self {
        Self {
            bytes_per_pixel: 0,
            num_channels,
            compression,
        }
    }

    /// Return `true` when texels are stored one byte per channel.
    pub fn is_byte_per_channel(&self) -> bool {
        !self.compression.is_block() && self.bytes_per_pixel == usize::from(self.num_channels)
    }
}

/// Enumerated internal pixel format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FormatTag {
    /// Tag of the null buffer; no storage.
    NoFormat,
    /// 8-bit single channel.
    R8,
    /// Luminance and alpha nibbles in one byte (`alpha << 4 | luminance`).
    La44,
    /// Luminance and alpha bytes in one 16-bit word (`alpha << 8 | luminance`).
    La88,
    /// 16-bit `r5 g6 b5`.
    Rgb565,
    /// 16-bit four nibbles.
    Rgba4444,
    /// 24-bit RGB.
    Rgb8,
    /// 32-bit RGBA.
    Rgba8,
    /// ETC1-compressed RGB.
    Rgb8Etc1,
    /// DXT1-compressed RGB.
    Rgb8Dxt1,
    /// RGTC1-compressed red.
    R8Rgtc1,
    /// RGTC2-compressed red/green.
    Rg8Rgtc2,
}

impl FormatTag {
    /// All real formats (excludes [`FormatTag::NoFormat`]).
    pub const ALL: [FormatTag; 11] = [
        FormatTag::R8,
        FormatTag::La44,
        FormatTag::La88,
        FormatTag::Rgb565,
        FormatTag::Rgba4444,
        FormatTag::Rgb8,
        FormatTag::Rgba8,
        FormatTag::Rgb8Etc1,
        FormatTag::Rgb8Dxt1,
        FormatTag::R8Rgtc1,
        FormatTag::Rg8Rgtc2,
    ];

    /// Look up the descriptor for this tag.
    pub fn descriptor(self) -> &'static FormatDescriptor {
        static NO_FORMAT: FormatDescriptor = FormatDescriptor::plain(0, 0);
        static R8: FormatDescriptor = FormatDescriptor::plain(1, 1);
        static LA44: FormatDescriptor = FormatDescriptor::plain(1, 2);
        static LA88: FormatDescriptor = FormatDescriptor::plain(2, 2);
        static RGB565: FormatDescriptor = FormatDescriptor::plain(2, 3);
        static RGBA4444: FormatDescriptor = FormatDescriptor::plain(2, 4);
        static RGB8: FormatDescriptor = FormatDescriptor::plain(3, 3);
        static RGBA8: FormatDescriptor = FormatDescriptor::plain(4, 4);
        static ETC1: FormatDescriptor = FormatDescriptor::block(3, Compression::Etc1);
        static DXT1: FormatDescriptor = FormatDescriptor::block(3, Compression::Dxt1);
        static RGTC1: FormatDescriptor = FormatDescriptor::block(1, Compression::Rgtc1);
        static RGTC2: FormatDescriptor = FormatDescriptor::block(2, Compression::Rgtc2);

        match self {
            FormatTag::NoFormat => &NO_FORMAT,
            FormatTag::R8 => &R8,
            FormatTag::La44 => &LA44,
            FormatTag::La88 => &LA88,
            FormatTag::Rgb565 => &RGB565,
            FormatTag::Rgba4444 => &RGBA4444,
            FormatTag::Rgb8 => &RGB8,
            FormatTag::Rgba8 => &RGBA8,
            FormatTag::Rgb8Etc1 => &ETC1,
            FormatTag::Rgb8Dxt1 => &DXT1,
            FormatTag::R8Rgtc1 => &RGTC1,
            FormatTag::Rg8Rgtc2 => &RGTC2,
        }
    }

    /// Shorthand for `descriptor().bytes_per_pixel`.
    pub fn bytes_per_pixel(self) -> usize {
        self.descriptor().bytes_per_pixel
    }

    /// Shorthand for `descriptor().num_channels`.
    pub fn num_channels(self) -> u8 {
        self.descriptor().num_channels
    }

    /// Shorthand for `descriptor().compression`.
    pub fn compression(self) -> Compression {
        self.descriptor().compression
    }
}

#[cfg(test)]
#[path = "../../tests/unit/format/registry.rs"]
mod tests;
