use std::sync::Once;

use crate::format::Compression;
use crate::foundation::error::{PixelError, PixelResult};

/// Block codec capability used for compressed conversion targets.
///
/// The converter hands over one raw 4x4 texel block at a time (see
/// [`Compression::input_block_len`] for the layout) and expects exactly
/// [`Compression::bytes_per_block`] bytes back in `out`.
pub trait BlockEncoder: Send + Sync {
    /// One-time setup for `compression` (table builds and the like).
    ///
    /// Called lazily before the first block of that codec is encoded, at most once per process
    /// for each compression kind, however many [`crate::Converter`]s are built.
    fn prepare(&self, _compression: Compression) {}

    /// Encode one block into `out`.
    fn encode_block(
        &self,
        compression: Compression,
        texels: &[u8],
        quality: i16,
        out: &mut [u8],
    ) -> PixelResult<()>;
}

/// Process-wide "prepared" latches, one per block codec.
static PREPARED: [Once; 4] = [const { Once::new() }; 4];

/// A [`BlockEncoder`] plus the per-codec "prepared" latches it answers to.
pub(crate) struct PreparedEncoder {
    inner: Box<dyn BlockEncoder>,
    prepared: &'static [Once; 4],
}

impl PreparedEncoder {
    pub(crate) fn new(inner: Box<dyn BlockEncoder>) -> Self {
        Self::with_latches(inner, &PREPARED)
    }

    pub(crate) fn with_latches(inner: Box<dyn BlockEncoder>, prepared: &'static [Once; 4]) -> Self {
        Self { inner, prepared }
    }

    /// Run the encoder's setup for `compression` unless it already ran in this process.
    pub(crate) fn ensure_prepared(&self, compression: Compression) -> PixelResult<()> {
        let idx = compression.index().ok_or_else(|| {
            PixelError::invalid_argument(format!("{compression:?} is not a block codec"))
        })?;
        self.prepared[idx].call_once(|| {
            tracing::debug!(?compression, "preparing block encoder");
            self.inner.prepare(compression);
        });
        Ok(())
    }

    pub(crate) fn encode(
        &self,
        compression: Compression,
        texels: &[u8],
        quality: i16,
        out: &mut [u8],
    ) -> PixelResult<()> {
        self.inner.encode_block(compression, texels, quality, out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixels/encoder.rs"]
mod tests;
