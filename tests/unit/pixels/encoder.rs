use super::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Default)]
struct CountingEncoder {
    prepared: Arc<AtomicUsize>,
}

impl BlockEncoder for CountingEncoder {
    fn prepare(&self, _compression: Compression) {
        self.prepared.fetch_add(1, Ordering::SeqCst);
    }

    fn encode_block(
        &self,
        _compression: Compression,
        _texels: &[u8],
        _quality: i16,
        out: &mut [u8],
    ) -> PixelResult<()> {
        out.fill(0);
        Ok(())
    }
}

fn fresh_latches() -> &'static [Once; 4] {
    Box::leak(Box::new([const { Once::new() }; 4]))
}

#[test]
fn latches_are_shared_between_wrappers() {
    let latches = fresh_latches();
    let enc = CountingEncoder::default();
    let first = PreparedEncoder::with_latches(Box::new(enc.clone()), latches);
    let second = PreparedEncoder::with_latches(Box::new(enc.clone()), latches);

    first.ensure_prepared(Compression::Etc1).unwrap();
    second.ensure_prepared(Compression::Etc1).unwrap();
    first.ensure_prepared(Compression::Etc1).unwrap();
    assert_eq!(enc.prepared.load(Ordering::SeqCst), 1);

    second.ensure_prepared(Compression::Rgtc2).unwrap();
    assert_eq!(enc.prepared.load(Ordering::SeqCst), 2);
}

#[test]
fn uncompressed_has_no_latch() {
    let enc = PreparedEncoder::with_latches(Box::new(CountingEncoder::default()), fresh_latches());
    let err = enc.ensure_prepared(Compression::None).unwrap_err();
    assert!(matches!(err, PixelError::InvalidArgument(_)));
}
